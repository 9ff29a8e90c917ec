//! Collision group tags
//!
//! A group is an opaque label the embedding game attaches to a collider and
//! reads back from contact events to decide how to react. The simulation
//! itself never filters or branches on it.

use serde::{Deserialize, Serialize};

/// A collision group identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionGroup(pub u32);

impl CollisionGroup {
    /// Default group
    pub const DEFAULT: Self = Self(0);
    /// Player group
    pub const PLAYER: Self = Self(1);
    /// Enemy group
    pub const ENEMIES: Self = Self(2);
    /// Projectile group
    pub const PROJECTILES: Self = Self(3);
    /// Static terrain group
    pub const TERRAIN: Self = Self(4);
    /// Pickup/item group
    pub const PICKUPS: Self = Self(5);

    /// Create a custom group
    pub const fn custom(id: u32) -> Self {
        Self(id)
    }
}

impl Default for CollisionGroup {
    fn default() -> Self {
        Self::DEFAULT
    }
}
