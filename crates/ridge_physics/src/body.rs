//! Rigid bodies: mass, velocity, and per-step forces

use crate::collider::ColliderHandle;
use crate::error::{PhysicsError, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Handle to a body in the physics world
///
/// Handles are plain indices, valid until the next [`clear`] on the world.
///
/// [`clear`]: crate::world::PhysicsWorld::clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub(crate) usize);

impl BodyHandle {
    /// Get the raw index
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Description for creating a body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Collider this body drives
    pub collider: ColliderHandle,
    /// Mass (must be positive)
    pub mass: f32,
    /// Initial velocity
    pub velocity: Vec2,
}

impl BodyDesc {
    /// Create a body description for a collider
    pub fn new(collider: ColliderHandle, mass: f32) -> Self {
        Self {
            collider,
            mass,
            velocity: Vec2::ZERO,
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = Vec2::new(x, y);
        self
    }

    /// Check the description for invalid values
    pub fn validate(&self) -> Result<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "body mass must be positive and finite, got {}",
                self.mass
            )));
        }
        if !self.velocity.is_finite() {
            return Err(PhysicsError::InvalidConfig(
                "body velocity must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Runtime body state
///
/// Forces are a per-step queue: the integrator sums and clears them every
/// step, so a mover must re-submit its forces each frame. The pending
/// velocity is the tentative result of integration; the resolver adjusts it
/// and the commit phase makes it current. Position lives on the collider.
#[derive(Debug, Clone)]
pub struct Body {
    mass: f32,
    pub(crate) velocity: Vec2,
    pub(crate) pending_velocity: Vec2,
    forces: Vec<Vec2>,
    pub(crate) collider: ColliderHandle,
    pub(crate) skip_friction: bool,
}

impl Body {
    pub(crate) fn from_desc(desc: BodyDesc) -> Self {
        Self {
            mass: desc.mass,
            velocity: desc.velocity,
            pending_velocity: desc.velocity,
            forces: Vec::new(),
            collider: desc.collider,
            skip_friction: false,
        }
    }

    /// Get the mass
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Get the committed velocity
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Overwrite the velocity (also resets the pending velocity)
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.pending_velocity = velocity;
    }

    /// Get the tentative velocity produced by the current step
    pub fn pending_velocity(&self) -> Vec2 {
        self.pending_velocity
    }

    /// Handle of the collider this body drives
    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    /// Queue a force for the next step
    pub fn apply_force(&mut self, force: Vec2) {
        self.forces.push(force);
    }

    /// Suppress ground friction for the next step only
    ///
    /// Used for jump takeoff so friction cannot eat the launch impulse.
    pub fn skip_friction_once(&mut self) {
        self.skip_friction = true;
    }

    /// Sum and clear the queued forces
    pub(crate) fn take_net_force(&mut self) -> Vec2 {
        let net = self.forces.iter().copied().sum();
        self.forces.clear();
        net
    }
}
