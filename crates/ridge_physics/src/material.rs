//! Surface materials defining contact response

use serde::{Deserialize, Serialize};

/// Surface properties of a collider
///
/// `elastic` selects the contact response: an elastic surface reflects the
/// incoming velocity (scaled by the world restitution factor), an inelastic
/// one makes the body slide along the surface tangent. `friction` is the
/// coefficient applied against grounded movement; the integrator always
/// reads it from the ground collider, not from the moving body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SurfaceMaterial {
    /// Whether contacts against this surface bounce instead of slide
    pub elastic: bool,
    /// Friction coefficient (0 = frictionless)
    pub friction: f32,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            elastic: false,
            friction: 0.5,
        }
    }
}

impl SurfaceMaterial {
    /// Create a new inelastic material with the given friction
    pub fn new(friction: f32) -> Self {
        Self {
            friction,
            ..Default::default()
        }
    }

    /// Near-frictionless ice-like surface
    pub fn ice() -> Self {
        Self {
            elastic: false,
            friction: 0.05,
        }
    }

    /// Bouncy rubber-like surface
    pub fn rubber() -> Self {
        Self {
            elastic: true,
            friction: 0.8,
        }
    }

    /// Rough stone/concrete surface
    pub fn stone() -> Self {
        Self {
            elastic: false,
            friction: 0.7,
        }
    }

    /// Smooth metal surface
    pub fn metal() -> Self {
        Self {
            elastic: false,
            friction: 0.3,
        }
    }

    /// Set the friction coefficient (clamped to non-negative)
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction.max(0.0);
        self
    }

    /// Set the elastic flag
    pub fn with_elastic(mut self, elastic: bool) -> Self {
        self.elastic = elastic;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friction_clamped() {
        let m = SurfaceMaterial::default().with_friction(-2.0);
        assert_eq!(m.friction, 0.0);
    }

    #[test]
    fn test_presets() {
        assert!(SurfaceMaterial::rubber().elastic);
        assert!(!SurfaceMaterial::ice().elastic);
        assert!(SurfaceMaterial::ice().friction < SurfaceMaterial::stone().friction);
    }
}
