//! Ridge Physics - Fixed-Step 2D Platformer Physics
//!
//! This crate provides the rigid body simulation for the Ridge Engine:
//! a small fixed-timestep core tuned for platformer movement rather than
//! general-purpose dynamics.
//!
//! Coordinates are screen-space: x grows to the right, y grows downward,
//! so the default gravity points along +y.
//!
//! # Features
//!
//! - Fixed-timestep rigid body integration with force queues
//! - Circle and rotated-rectangle colliders with SAT collision detection
//! - Elastic and sliding collision response with resting stabilization
//! - Ground detection with probing and per-surface slope angles
//! - Slope-projected gravity and friction for grounded movement
//! - Trigger notifications between dynamic pairs
//! - Surface materials (friction, elasticity) and collision group tags
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  PhysicsWorld                    │
//! │  ┌───────────┐  ┌──────────┐  ┌──────────────┐  │
//! │  │ Colliders │  │  Bodies  │  │ ContactEvents│  │
//! │  └───────────┘  └──────────┘  └──────────────┘  │
//! │  ┌──────────────────────────────────────────────┐│
//! │  │              step(dt)                        ││
//! │  │  (integrate, resolve passes, commit)         ││
//! │  └──────────────────────────────────────────────┘│
//! └──────────────────────────────────────────────────┘
//!                         │
//!          ┌──────────────┼──────────────┐
//!          ▼              ▼              ▼
//!     ┌─────────┐   ┌──────────┐   ┌──────────┐
//!     │ Circle  │   │   Rect   │   │ Trigger  │
//!     │Collider │   │ Collider │   │  Pairs   │
//!     └─────────┘   └──────────┘   └──────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ridge_physics::prelude::*;
//!
//! // Create the physics world
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default());
//!
//! // Static ground, useable as footing
//! let ground = physics.add_collider(
//!     ColliderDesc::new(ColliderShape::rect(1000.0, 32.0)).with_position(0.0, 300.0),
//! )?;
//!
//! // A crate driven by a rigid body
//! let crate_collider = physics.add_collider(
//!     ColliderDesc::new(ColliderShape::rect(50.0, 130.0)).with_position(0.0, 100.0),
//! )?;
//! let crate_body = physics.add_body(BodyDesc::new(crate_collider, 2.0))?;
//!
//! // Fixed-step the simulation
//! physics.step(1.0 / 60.0);
//!
//! if physics.collider(crate_collider)?.is_on_ground() {
//!     // grounded: jumping is allowed
//! }
//! ```

pub mod body;
pub mod collider;
pub mod config;
pub mod error;
pub mod events;
pub mod group;
pub mod material;
pub mod narrow;
pub mod world;

mod integrator;
mod resolver;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::body::{Body, BodyDesc, BodyHandle};
    pub use crate::collider::{Collider, ColliderDesc, ColliderHandle, ColliderShape};
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::events::{ContactEvent, ContactKind, PhysicsEventHandler};
    pub use crate::group::CollisionGroup;
    pub use crate::material::SurfaceMaterial;
    pub use crate::narrow::Contact;
    pub use crate::world::PhysicsWorld;
}

pub use prelude::*;
