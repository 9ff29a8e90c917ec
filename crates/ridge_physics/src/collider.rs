//! Collider shapes and runtime collider state

use crate::body::BodyHandle;
use crate::error::{PhysicsError, Result};
use crate::group::CollisionGroup;
use crate::material::SurfaceMaterial;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Handle to a collider in the physics world
///
/// Handles are plain indices, valid until the next [`clear`] on the world.
///
/// [`clear`]: crate::world::PhysicsWorld::clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderHandle(pub(crate) usize);

impl ColliderHandle {
    /// Get the raw index
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Collision shape type
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Circle with radius
    Circle { radius: f32 },
    /// Rectangle with full extents and rotation in radians
    Rect {
        width: f32,
        height: f32,
        rotation: f32,
    },
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::Rect {
            width: 32.0,
            height: 32.0,
            rotation: 0.0,
        }
    }
}

impl ColliderShape {
    /// Create a circle shape
    pub fn circle(radius: f32) -> Self {
        Self::Circle { radius }
    }

    /// Create an axis-aligned rectangle shape
    pub fn rect(width: f32, height: f32) -> Self {
        Self::Rect {
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Create a rotated rectangle shape
    pub fn rect_rotated(width: f32, height: f32, rotation: f32) -> Self {
        Self::Rect {
            width,
            height,
            rotation,
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::Circle { radius } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(PhysicsError::InvalidConfig(format!(
                        "circle radius must be positive and finite, got {radius}"
                    )));
                }
            }
            Self::Rect {
                width,
                height,
                rotation,
            } => {
                if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
                    return Err(PhysicsError::InvalidConfig(format!(
                        "rectangle extents must be positive and finite, got {width}x{height}"
                    )));
                }
                if !rotation.is_finite() {
                    return Err(PhysicsError::InvalidConfig(
                        "rectangle rotation must be finite".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Description for creating a collider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColliderDesc {
    /// Collision shape
    pub shape: ColliderShape,
    /// Owner anchor position in world space
    pub position: Vec2,
    /// Local offset from the owner anchor
    pub offset: Vec2,
    /// Surface material
    pub material: SurfaceMaterial,
    /// Collision group tag
    pub group: CollisionGroup,
    /// Whether dynamic shapes can stand on this collider
    pub can_be_ground: bool,
    /// User data (entity ID, etc.)
    pub user_data: u128,
}

impl Default for ColliderDesc {
    fn default() -> Self {
        Self {
            shape: ColliderShape::default(),
            position: Vec2::ZERO,
            offset: Vec2::ZERO,
            material: SurfaceMaterial::default(),
            group: CollisionGroup::DEFAULT,
            can_be_ground: true,
            user_data: 0,
        }
    }
}

impl ColliderDesc {
    /// Create a new collider description with a shape
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    /// Set the owner anchor position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set the local offset
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Set the material
    pub fn with_material(mut self, material: SurfaceMaterial) -> Self {
        self.material = material;
        self
    }

    /// Set the collision group
    pub fn with_group(mut self, group: CollisionGroup) -> Self {
        self.group = group;
        self
    }

    /// Set whether dynamic shapes can stand on this collider
    pub fn with_can_be_ground(mut self, can_be_ground: bool) -> Self {
        self.can_be_ground = can_be_ground;
        self
    }

    /// Set user data
    pub fn with_user_data(mut self, data: u128) -> Self {
        self.user_data = data;
        self
    }

    /// Check the description for invalid values
    pub fn validate(&self) -> Result<()> {
        self.shape.validate()?;
        if !(self.material.friction.is_finite() && self.material.friction >= 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "friction must be non-negative and finite, got {}",
                self.material.friction
            )));
        }
        if !(self.position.is_finite() && self.offset.is_finite()) {
            return Err(PhysicsError::InvalidConfig(
                "collider position and offset must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Runtime collider state
///
/// The anchor position is the single storage point for location: the world
/// position is recomputed from anchor + offset on every read, and the owning
/// body carries no position of its own, so the two can never disagree.
#[derive(Debug, Clone)]
pub struct Collider {
    shape: ColliderShape,
    offset: Vec2,
    pub(crate) position: Vec2,
    material: SurfaceMaterial,
    group: CollisionGroup,
    can_be_ground: bool,
    user_data: u128,
    /// Driving body, if any. A collider without one is static.
    pub(crate) body: Option<BodyHandle>,
    pub(crate) on_ground: bool,
    pub(crate) ground: Option<ColliderHandle>,
    pub(crate) slope_angle: f32,
}

impl Collider {
    pub(crate) fn from_desc(desc: ColliderDesc) -> Self {
        Self {
            shape: desc.shape,
            offset: desc.offset,
            position: desc.position,
            material: desc.material,
            group: desc.group,
            can_be_ground: desc.can_be_ground,
            user_data: desc.user_data,
            body: None,
            on_ground: false,
            ground: None,
            slope_angle: 0.0,
        }
    }

    /// Get the collision shape
    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// Get the local offset from the owner anchor
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Get the owner anchor position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the owner anchor (teleport; velocities are untouched)
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Shape center in world space: anchor + offset, computed on read
    pub fn world_position(&self) -> Vec2 {
        self.position + self.offset
    }

    /// Get the surface material
    pub fn material(&self) -> &SurfaceMaterial {
        &self.material
    }

    /// Whether contacts against this collider bounce
    pub fn is_elastic(&self) -> bool {
        self.material.elastic
    }

    /// Get the collision group tag
    pub fn group(&self) -> CollisionGroup {
        self.group
    }

    /// Whether dynamic shapes can stand on this collider
    pub fn can_be_ground(&self) -> bool {
        self.can_be_ground
    }

    /// Get the user data
    pub fn user_data(&self) -> u128 {
        self.user_data
    }

    /// Handle of the driving body, if any
    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    /// Whether this collider has no driving body
    pub fn is_static(&self) -> bool {
        self.body.is_none()
    }

    /// Whether the collider is resting on ground this frame
    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    /// The collider currently stood on, if any
    pub fn ground(&self) -> Option<ColliderHandle> {
        self.ground
    }

    /// Angle of the ground surface tangent in radians (0 = flat)
    pub fn slope_angle(&self) -> f32 {
        self.slope_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_position_follows_anchor() {
        let desc = ColliderDesc::new(ColliderShape::circle(8.0))
            .with_position(100.0, 50.0)
            .with_offset(4.0, -2.0);
        let mut collider = Collider::from_desc(desc);
        assert_eq!(collider.world_position(), Vec2::new(104.0, 48.0));

        collider.set_position(Vec2::new(10.0, 10.0));
        assert_eq!(collider.world_position(), Vec2::new(14.0, 8.0));
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        assert!(ColliderDesc::new(ColliderShape::circle(0.0)).validate().is_err());
        assert!(ColliderDesc::new(ColliderShape::circle(-1.0)).validate().is_err());
        assert!(ColliderDesc::new(ColliderShape::rect(0.0, 10.0)).validate().is_err());
        assert!(ColliderDesc::new(ColliderShape::rect(10.0, f32::NAN)).validate().is_err());
        assert!(ColliderDesc::new(ColliderShape::rect(10.0, 10.0)).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_friction() {
        let mut desc = ColliderDesc::default();
        desc.material.friction = -0.5;
        assert!(desc.validate().is_err());
    }
}
