//! Physics world: shape registry, stepping, and event queries
//!
//! The world owns every collider and body and advances them with a fixed
//! timestep. One step runs three phases in order:
//!
//! 1. integrate: forces and gravity become pending velocities, positions
//!    advance by the velocity the frame started with
//! 2. resolve: overlap passes separate shapes, bounce or slide dynamic
//!    ones against static ones, and refresh ground state
//! 3. commit: pending velocities are clamped and become current
//!
//! All access goes through `&mut self`, so the borrow checker enforces the
//! single-writer contract: nothing can mutate shapes while a step runs.

use crate::body::{Body, BodyDesc, BodyHandle};
use crate::collider::{Collider, ColliderDesc, ColliderHandle};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use crate::events::{ContactEvent, ContactKind, EventCollector, PhysicsEventHandler};
use crate::{integrator, resolver};

/// The 2D physics world
///
/// Colliders registered without a body take part in collisions as immovable
/// terrain. Handles returned from registration stay valid until [`clear`].
///
/// [`clear`]: PhysicsWorld::clear
pub struct PhysicsWorld {
    config: PhysicsConfig,
    colliders: Vec<Collider>,
    bodies: Vec<Body>,
    events: EventCollector,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl PhysicsWorld {
    /// Create a world with the given configuration
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            colliders: Vec::new(),
            bodies: Vec::new(),
            events: EventCollector::new(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Register a collider
    ///
    /// The description is validated up front so a bad shape fails here and
    /// not somewhere in the middle of a step.
    pub fn add_collider(&mut self, desc: ColliderDesc) -> Result<ColliderHandle> {
        desc.validate()?;
        let handle = ColliderHandle(self.colliders.len());
        log::trace!("registering collider {:?}: {:?}", handle, desc.shape);
        self.colliders.push(Collider::from_desc(desc));
        Ok(handle)
    }

    /// Register a body driving an existing collider
    ///
    /// A collider accepts at most one driving body.
    pub fn add_body(&mut self, desc: BodyDesc) -> Result<BodyHandle> {
        desc.validate()?;
        let collider = self
            .colliders
            .get_mut(desc.collider.index())
            .ok_or(PhysicsError::ColliderNotFound(desc.collider))?;
        if collider.body.is_some() {
            return Err(PhysicsError::ColliderAlreadyDriven(desc.collider));
        }
        let handle = BodyHandle(self.bodies.len());
        collider.body = Some(handle);
        log::trace!("registering body {:?} for collider {:?}", handle, desc.collider);
        self.bodies.push(Body::from_desc(desc));
        Ok(handle)
    }

    /// Remove every collider, body, and queued event
    pub fn clear(&mut self) {
        log::debug!(
            "clearing physics world: {} colliders, {} bodies",
            self.colliders.len(),
            self.bodies.len()
        );
        self.colliders.clear();
        self.bodies.clear();
        self.events.clear();
    }

    /// Get a collider by handle
    pub fn collider(&self, handle: ColliderHandle) -> Result<&Collider> {
        self.colliders
            .get(handle.index())
            .ok_or(PhysicsError::ColliderNotFound(handle))
    }

    /// Get a collider by handle, mutably
    pub fn collider_mut(&mut self, handle: ColliderHandle) -> Result<&mut Collider> {
        self.colliders
            .get_mut(handle.index())
            .ok_or(PhysicsError::ColliderNotFound(handle))
    }

    /// Get a body by handle
    pub fn body(&self, handle: BodyHandle) -> Result<&Body> {
        self.bodies
            .get(handle.index())
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get a body by handle, mutably
    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.bodies
            .get_mut(handle.index())
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Number of registered colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all colliders in registration order
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.colliders
            .iter()
            .enumerate()
            .map(|(index, collider)| (ColliderHandle(index), collider))
    }

    /// Iterate over all bodies in registration order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (BodyHandle(index), body))
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Non-positive or non-finite timesteps are ignored. Events collected
    /// during the previous step are dropped when the new one begins.
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.events.clear();
        integrator::integrate(&mut self.bodies, &mut self.colliders, &self.config, dt);
        resolver::resolve(
            &mut self.colliders,
            &mut self.bodies,
            &self.config,
            &mut self.events,
        );
        integrator::commit(&mut self.bodies, &self.colliders, &self.config);
    }

    /// Run collision resolution alone, without advancing time
    ///
    /// Useful after teleporting shapes: overlaps are re-separated and ground
    /// state refreshed immediately, and the events describe what was hit.
    pub fn resolve(&mut self) {
        self.events.clear();
        resolver::resolve(
            &mut self.colliders,
            &mut self.bodies,
            &self.config,
            &mut self.events,
        );
    }

    /// All contact events from the last step or resolve
    pub fn events(&self) -> &[ContactEvent] {
        self.events.events()
    }

    /// Trigger events from the last step or resolve
    pub fn triggers(&self) -> impl Iterator<Item = &ContactEvent> {
        self.events.triggers()
    }

    /// Physical-collision events from the last step or resolve
    pub fn physical_contacts(&self) -> impl Iterator<Item = &ContactEvent> {
        self.events.physical_contacts()
    }

    /// Deliver the collected events to a handler, routed by kind
    pub fn dispatch_events(&self, handler: &mut dyn PhysicsEventHandler) {
        for event in self.events.events() {
            match event.kind {
                ContactKind::Trigger => handler.on_trigger(event),
                ContactKind::Physical => handler.on_physical_collision(event),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::ColliderShape;
    use crate::material::SurfaceMaterial;
    use approx::assert_relative_eq;
    use glam::Vec2;

    #[test]
    fn test_world_starts_empty() {
        let world = PhysicsWorld::default();
        assert_eq!(world.collider_count(), 0);
        assert_eq!(world.body_count(), 0);
        assert!(world.events().is_empty());
    }

    #[test]
    fn test_register_and_enumerate() {
        let mut world = PhysicsWorld::default();
        let ground = world
            .add_collider(ColliderDesc::new(ColliderShape::rect(100.0, 10.0)))
            .unwrap();
        let ball = world
            .add_collider(
                ColliderDesc::new(ColliderShape::circle(8.0)).with_position(10.0, -20.0),
            )
            .unwrap();
        let body = world.add_body(BodyDesc::new(ball, 2.0)).unwrap();

        assert_eq!(world.collider_count(), 2);
        assert_eq!(world.body_count(), 1);
        assert!(world.collider(ground).unwrap().is_static());
        assert_eq!(world.collider(ball).unwrap().body(), Some(body));
        assert_relative_eq!(world.body(body).unwrap().mass(), 2.0);

        let handles: Vec<_> = world.colliders().map(|(handle, _)| handle).collect();
        assert_eq!(handles, vec![ground, ball]);
    }

    #[test]
    fn test_add_body_requires_existing_collider() {
        let mut world = PhysicsWorld::default();
        let missing = ColliderHandle(42);
        let result = world.add_body(BodyDesc::new(missing, 1.0));
        assert!(matches!(result, Err(PhysicsError::ColliderNotFound(_))));
    }

    #[test]
    fn test_collider_accepts_one_driving_body() {
        let mut world = PhysicsWorld::default();
        let collider = world
            .add_collider(ColliderDesc::new(ColliderShape::circle(8.0)))
            .unwrap();
        world.add_body(BodyDesc::new(collider, 1.0)).unwrap();
        let second = world.add_body(BodyDesc::new(collider, 1.0));
        assert!(matches!(second, Err(PhysicsError::ColliderAlreadyDriven(_))));
    }

    #[test]
    fn test_clear_resets_world() {
        let mut world = PhysicsWorld::default();
        let collider = world
            .add_collider(ColliderDesc::new(ColliderShape::circle(8.0)))
            .unwrap();
        world.add_body(BodyDesc::new(collider, 1.0)).unwrap();
        world.clear();

        assert_eq!(world.collider_count(), 0);
        assert_eq!(world.body_count(), 0);
        assert!(world.collider(collider).is_err());

        // The world is reusable after a clear.
        let again = world
            .add_collider(ColliderDesc::new(ColliderShape::circle(4.0)))
            .unwrap();
        assert_eq!(again.index(), 0);
    }

    #[test]
    fn test_gravity_accelerates_free_body() {
        let mut world = PhysicsWorld::default();
        let collider = world
            .add_collider(ColliderDesc::new(ColliderShape::circle(8.0)))
            .unwrap();
        let body = world.add_body(BodyDesc::new(collider, 1.0)).unwrap();

        for _ in 0..10 {
            world.step(0.1);
        }

        // Position integrates the pre-step velocity, so after ten steps the
        // fall covers dt^2 * g * (0 + 1 + ... + 9).
        assert_relative_eq!(world.body(body).unwrap().velocity().y, 500.0, epsilon = 1e-2);
        assert_relative_eq!(
            world.collider(collider).unwrap().position().y,
            225.0,
            epsilon = 1e-2
        );
    }

    #[test]
    fn test_falling_box_settles_on_ground() {
        let mut world = PhysicsWorld::default();
        world
            .add_collider(ColliderDesc::new(ColliderShape::rect(1000.0, 32.0)).with_position(0.0, 300.0))
            .unwrap();
        let crate_collider = world
            .add_collider(ColliderDesc::new(ColliderShape::rect(50.0, 130.0)).with_position(0.0, 179.0))
            .unwrap();
        let crate_body = world.add_body(BodyDesc::new(crate_collider, 2.0)).unwrap();

        for _ in 0..120 {
            world.step(1.0 / 60.0);
        }

        let collider = world.collider(crate_collider).unwrap();
        assert!(collider.is_on_ground());
        assert!(world.body(crate_body).unwrap().velocity().y.abs() < 1e-3);
        // The bottom edge rests just above the ground top at y = 284.
        let bottom = collider.world_position().y + 65.0;
        assert!((bottom - 284.0).abs() < 0.1, "bottom edge at {bottom}");
    }

    #[test]
    fn test_elastic_ball_reflects_and_loses_energy() {
        let config = PhysicsConfig::default().with_gravity(0.0, 0.0);
        let mut world = PhysicsWorld::new(config);
        world
            .add_collider(
                ColliderDesc::new(ColliderShape::circle(16.0))
                    .with_position(0.0, 30.0)
                    .with_material(SurfaceMaterial::default().with_elastic(true)),
            )
            .unwrap();
        let ball = world
            .add_collider(ColliderDesc::new(ColliderShape::circle(16.0)))
            .unwrap();
        let body = world
            .add_body(BodyDesc::new(ball, 1.0).with_velocity(0.0, 100.0))
            .unwrap();

        world.step(0.1);

        let velocity = world.body(body).unwrap().velocity();
        assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(velocity.y, -80.0, epsilon = 1e-2);
    }

    #[test]
    fn test_resolve_probes_ground_without_time() {
        let mut world = PhysicsWorld::default();
        world
            .add_collider(ColliderDesc::new(ColliderShape::rect(1000.0, 32.0)).with_position(0.0, 100.0))
            .unwrap();
        let probe_gap = world.config().ground_probe_distance;
        let box_collider = world
            .add_collider(
                ColliderDesc::new(ColliderShape::rect(50.0, 50.0))
                    .with_position(0.0, 84.0 - 25.0 - probe_gap),
            )
            .unwrap();
        world.add_body(BodyDesc::new(box_collider, 1.0)).unwrap();

        world.resolve();

        let collider = world.collider(box_collider).unwrap();
        assert!(collider.is_on_ground());
        assert_relative_eq!(collider.slope_angle(), 0.0, epsilon = 1e-5);
        assert_eq!(collider.position(), Vec2::new(0.0, 84.0 - 25.0 - probe_gap));
    }

    #[test]
    fn test_step_ignores_bad_timesteps() {
        let config = PhysicsConfig::default().with_gravity(0.0, 0.0);
        let mut world = PhysicsWorld::new(config);
        let collider = world
            .add_collider(ColliderDesc::new(ColliderShape::circle(8.0)))
            .unwrap();
        let body = world
            .add_body(BodyDesc::new(collider, 1.0).with_velocity(10.0, 0.0))
            .unwrap();

        world.step(0.0);
        world.step(-0.5);
        world.step(f32::NAN);

        assert_eq!(world.collider(collider).unwrap().position(), Vec2::ZERO);
        assert_eq!(world.body(body).unwrap().velocity(), Vec2::new(10.0, 0.0));
    }

    #[derive(Default)]
    struct Counting {
        triggers: usize,
        physical: usize,
    }

    impl PhysicsEventHandler for Counting {
        fn on_trigger(&mut self, _event: &ContactEvent) {
            self.triggers += 1;
        }

        fn on_physical_collision(&mut self, _event: &ContactEvent) {
            self.physical += 1;
        }
    }

    #[test]
    fn test_dispatch_routes_events_by_kind() {
        let config = PhysicsConfig::default().with_gravity(0.0, 0.0);
        let mut world = PhysicsWorld::new(config);

        // Two overlapping movers: a trigger pair.
        let left = world
            .add_collider(ColliderDesc::new(ColliderShape::circle(10.0)).with_position(200.0, 0.0))
            .unwrap();
        let right = world
            .add_collider(ColliderDesc::new(ColliderShape::circle(10.0)).with_position(212.0, 0.0))
            .unwrap();
        world.add_body(BodyDesc::new(left, 1.0)).unwrap();
        world.add_body(BodyDesc::new(right, 1.0)).unwrap();

        // A mover sunk into static terrain: a physical pair.
        world
            .add_collider(ColliderDesc::new(ColliderShape::rect(20.0, 20.0)).with_position(0.0, 15.0))
            .unwrap();
        let crate_collider = world
            .add_collider(ColliderDesc::new(ColliderShape::rect(20.0, 20.0)))
            .unwrap();
        world.add_body(BodyDesc::new(crate_collider, 1.0)).unwrap();

        world.step(0.01);

        let mut counting = Counting::default();
        world.dispatch_events(&mut counting);
        assert_eq!(counting.triggers, 1);
        assert_eq!(counting.physical, 1);
        assert_eq!(world.triggers().count(), 1);
        assert_eq!(world.physical_contacts().count(), 1);
    }

    #[test]
    fn test_contact_events_echo_user_data() {
        let config = PhysicsConfig::default().with_gravity(0.0, 0.0);
        let mut world = PhysicsWorld::new(config);
        let terrain = world
            .add_collider(
                ColliderDesc::new(ColliderShape::rect(20.0, 20.0))
                    .with_position(0.0, 15.0)
                    .with_user_data(7),
            )
            .unwrap();
        let crate_collider = world
            .add_collider(ColliderDesc::new(ColliderShape::rect(20.0, 20.0)).with_user_data(99))
            .unwrap();
        world.add_body(BodyDesc::new(crate_collider, 1.0)).unwrap();

        world.resolve();

        // Physical events put the dynamic side in `a`, with each tag echoed.
        let event = world.physical_contacts().next().unwrap();
        assert_eq!(event.a, crate_collider);
        assert_eq!(event.b, terrain);
        assert_eq!(event.user_data_a, 99);
        assert_eq!(event.user_data_b, 7);
    }

    #[test]
    fn test_forces_feed_through_step() {
        let config = PhysicsConfig::default().with_gravity(0.0, 0.0);
        let mut world = PhysicsWorld::new(config);
        let collider = world
            .add_collider(ColliderDesc::new(ColliderShape::circle(8.0)))
            .unwrap();
        let body = world.add_body(BodyDesc::new(collider, 2.0)).unwrap();

        world.body_mut(body).unwrap().apply_force(Vec2::new(10.0, 0.0));
        world.step(1.0);

        assert_relative_eq!(world.body(body).unwrap().velocity().x, 5.0);
    }
}
