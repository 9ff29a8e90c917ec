//! Physics configuration

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Physics world configuration
///
/// Coordinates are screen-space: +y points down, so the default gravity is a
/// positive-y vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity acceleration (default: 500 units/s² in +y)
    pub gravity: Vec2,

    /// Velocity retained after an elastic bounce
    pub restitution: f32,

    /// Speed cap applied when committing velocities
    pub max_speed: f32,

    /// Horizontal speed below which a body on flat ground is stopped
    pub min_speed: f32,

    /// Maximum resolution passes per frame
    pub max_iterations: usize,

    /// How far a shape is virtually displaced along gravity when probing
    /// for resting contact
    pub ground_probe_distance: f32,

    /// Extra distance added when separating an overlapping pair
    pub separation_epsilon: f32,

    /// Normal-speed threshold below which a colliding body is treated as
    /// resting on the surface
    pub rest_threshold: f32,

    /// Slope angles within this tolerance of zero count as flat ground
    pub flat_threshold: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 500.0),
            restitution: 0.8,
            max_speed: 1500.0,
            min_speed: 4.0,
            max_iterations: 10,
            ground_probe_distance: 2.0,
            separation_epsilon: 0.05,
            rest_threshold: 20.0,
            flat_threshold: 1.0_f32.to_radians(),
        }
    }
}

impl PhysicsConfig {
    /// Set gravity
    pub fn with_gravity(mut self, x: f32, y: f32) -> Self {
        self.gravity = Vec2::new(x, y);
        self
    }

    /// Set the restitution factor
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set the resolution pass cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the commit-phase speed cap
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }
}
