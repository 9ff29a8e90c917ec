//! Falling blocks demonstration
//!
//! This example shows:
//! - Building a scene from static and dynamic shapes
//! - Fixed-timestep simulation with gravity
//! - Elastic bouncing versus inelastic settling
//! - Ground detection and slope angles
//! - Contact event dispatch

use ridge_physics::prelude::*;

struct PrintEvents;

impl PhysicsEventHandler for PrintEvents {
    fn on_physical_collision(&mut self, event: &ContactEvent) {
        println!(
            "  contact: {:?} hit {:?} (depth {:.2})",
            event.a, event.b, event.depth
        );
    }

    fn on_trigger(&mut self, event: &ContactEvent) {
        println!("  trigger: {:?} overlaps {:?}", event.a, event.b);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("Falling Blocks Demo");
    println!("===================\n");

    let mut physics = PhysicsWorld::new(PhysicsConfig::default());

    // Flat ground across the bottom of the scene (y grows downward).
    physics.add_collider(
        ColliderDesc::new(ColliderShape::rect(2000.0, 40.0)).with_position(0.0, 400.0),
    )?;

    // A ramp rising to the right.
    physics.add_collider(
        ColliderDesc::new(ColliderShape::rect_rotated(400.0, 20.0, -0.35))
            .with_position(400.0, 330.0),
    )?;

    // An inelastic crate that settles where it lands.
    let crate_collider = physics.add_collider(
        ColliderDesc::new(ColliderShape::rect(60.0, 60.0))
            .with_position(-200.0, 100.0)
            .with_material(SurfaceMaterial::stone()),
    )?;
    let crate_body = physics.add_body(BodyDesc::new(crate_collider, 2.0))?;

    // A rubber ball that bounces a while before it calms down.
    let ball_collider = physics.add_collider(
        ColliderDesc::new(ColliderShape::circle(16.0))
            .with_position(0.0, 50.0)
            .with_material(SurfaceMaterial::rubber()),
    )?;
    let ball_body = physics.add_body(BodyDesc::new(ball_collider, 1.0).with_velocity(40.0, 0.0))?;

    println!(
        "✓ Scene built: {} colliders, {} bodies\n",
        physics.collider_count(),
        physics.body_count()
    );

    let dt = 1.0 / 60.0;
    let mut printer = PrintEvents;
    for frame in 0..600 {
        physics.step(dt);

        // Show the first contacts as they happen.
        if frame < 90 && !physics.events().is_empty() {
            println!("frame {frame}:");
            physics.dispatch_events(&mut printer);
        }

        if frame % 120 == 119 {
            let crate_pos = physics.collider(crate_collider)?.world_position();
            let ball_pos = physics.collider(ball_collider)?.world_position();
            println!(
                "t={:.1}s  crate at ({:.1}, {:.1})  ball at ({:.1}, {:.1})",
                (frame + 1) as f32 * dt,
                crate_pos.x,
                crate_pos.y,
                ball_pos.x,
                ball_pos.y
            );
        }
    }

    println!("\nAfter 10 seconds:");
    let crate_state = physics.collider(crate_collider)?;
    let crate_velocity = physics.body(crate_body)?.velocity();
    println!(
        "  crate: on_ground={} slope={:.2} velocity=({:.1}, {:.1})",
        crate_state.is_on_ground(),
        crate_state.slope_angle(),
        crate_velocity.x,
        crate_velocity.y
    );
    let ball_state = physics.collider(ball_collider)?;
    let ball_velocity = physics.body(ball_body)?.velocity();
    println!(
        "  ball:  on_ground={} slope={:.2} velocity=({:.1}, {:.1})",
        ball_state.is_on_ground(),
        ball_state.slope_angle(),
        ball_velocity.x,
        ball_velocity.y
    );

    Ok(())
}
