//! Force integration and velocity commit
//!
//! Each step runs in two halves around the resolver. `integrate` sums
//! forces, applies gravity according to ground state, stores the tentative
//! velocity, and advances positions with the pre-step velocity. After
//! resolution has adjusted tentative velocities, `commit` applies the speed
//! cap and anti-jitter snap and makes them current.

use crate::body::Body;
use crate::collider::Collider;
use crate::config::PhysicsConfig;
use glam::Vec2;

/// First half of a step, before resolution
pub(crate) fn integrate(
    bodies: &mut [Body],
    colliders: &mut [Collider],
    config: &PhysicsConfig,
    dt: f32,
) {
    for body in bodies.iter_mut() {
        let collider_index = body.collider.index();
        let (on_ground, slope_angle, ground) = {
            let c = &colliders[collider_index];
            (c.on_ground, c.slope_angle, c.ground)
        };

        let mut acceleration = body.take_net_force() / body.mass();

        if on_ground {
            // Only the tangential component of gravity acts on a grounded
            // body: slopes push it along the surface, never into it.
            let tangent = Vec2::new(slope_angle.cos(), slope_angle.sin());
            acceleration += tangent * config.gravity.dot(tangent);

            if !body.skip_friction && body.velocity.length_squared() > f32::EPSILON {
                if let Some(ground_handle) = ground {
                    let normal_force =
                        body.mass() * config.gravity.length() * slope_angle.cos();
                    let friction = colliders[ground_handle.index()].material().friction;
                    let direction = body.velocity.normalize();
                    acceleration -= direction * (friction * normal_force / body.mass());
                }
            }
        } else {
            acceleration += config.gravity;
            // Airborne: stale slope data must not leak into the next landing.
            let c = &mut colliders[collider_index];
            c.ground = None;
            c.slope_angle = 0.0;
        }

        body.pending_velocity = body.velocity + acceleration * dt;
        // Position advances with the pre-step velocity; the resolver then
        // operates on the already-moved position. The updated velocity is
        // committed only after resolution.
        colliders[collider_index].position += body.velocity * dt;
        body.skip_friction = false;
    }
}

/// Second half of a step, after resolution
pub(crate) fn commit(bodies: &mut [Body], colliders: &[Collider], config: &PhysicsConfig) {
    for body in bodies.iter_mut() {
        let slope_angle = colliders[body.collider.index()].slope_angle;

        let speed = body.pending_velocity.length();
        if speed > config.max_speed {
            body.pending_velocity *= config.max_speed / speed;
        }

        // Anti-jitter: tiny horizontal drift on flat ground is stopped.
        // Slope sliding velocities stay untouched no matter how small.
        if body.pending_velocity.x.abs() < config.min_speed
            && slope_angle.abs() < config.flat_threshold
        {
            body.pending_velocity.x = 0.0;
        }

        body.velocity = body.pending_velocity;
    }
}
