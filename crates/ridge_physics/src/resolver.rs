//! Multi-pass collision resolution
//!
//! Each pass visits every unique collider pair in registration order.
//! Intersections are answered immediately (bounce, slide, or trigger), and
//! passes repeat while any pass found an intersection, so secondary
//! collisions caused by separation propagate within the same frame. Pairs
//! that are close but not touching are ground-probed so resting contact is
//! recognized without penetration.

use crate::body::Body;
use crate::collider::{Collider, ColliderHandle};
use crate::config::PhysicsConfig;
use crate::events::{ContactEvent, ContactKind, EventCollector};
use crate::narrow::{self, Contact};
use glam::Vec2;

/// Run overlap-resolution passes until convergence or the iteration cap
pub(crate) fn resolve(
    colliders: &mut [Collider],
    bodies: &mut [Body],
    config: &PhysicsConfig,
    events: &mut EventCollector,
) {
    // Stale contact state must be reconfirmed every resolution.
    for collider in colliders.iter_mut() {
        if collider.body.is_some() {
            collider.on_ground = false;
            collider.ground = None;
        }
    }

    let mut converged = false;
    for _ in 0..config.max_iterations {
        if !run_pass(colliders, bodies, config, events) {
            converged = true;
            break;
        }
    }
    if !converged {
        log::warn!(
            "collision resolution hit the {}-pass cap with overlaps remaining",
            config.max_iterations
        );
    }
}

/// One pass over all unique pairs. Returns whether any pair intersected.
fn run_pass(
    colliders: &mut [Collider],
    bodies: &mut [Body],
    config: &PhysicsConfig,
    events: &mut EventCollector,
) -> bool {
    let mut any_intersection = false;
    let count = colliders.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let body_i = colliders[i].body;
            let body_j = colliders[j].body;
            // Static pairs cannot move and raise no events.
            if body_i.is_none() && body_j.is_none() {
                continue;
            }

            let contact = narrow::intersect(&colliders[i], &colliders[j]);
            match (contact, body_i, body_j) {
                (Some(contact), Some(_), Some(_)) => {
                    // Two movers: notify game logic, apply no impulse.
                    any_intersection = true;
                    events.push_unique(ContactEvent {
                        a: ColliderHandle(i),
                        b: ColliderHandle(j),
                        kind: ContactKind::Trigger,
                        normal: contact.normal,
                        depth: contact.depth,
                        user_data_a: colliders[i].user_data(),
                        user_data_b: colliders[j].user_data(),
                    });
                }
                (Some(contact), Some(_), None) => {
                    any_intersection = true;
                    // The test ran i->j = dynamic->static; the bounce
                    // contract takes the normal from the static side.
                    let oriented = Contact {
                        normal: -contact.normal,
                        depth: contact.depth,
                    };
                    bounce(colliders, bodies, config, events, i, j, oriented);
                }
                (Some(contact), None, Some(_)) => {
                    any_intersection = true;
                    bounce(colliders, bodies, config, events, j, i, contact);
                }
                (None, Some(_), None) => probe_ground(colliders, i, j, config),
                (None, None, Some(_)) => probe_ground(colliders, j, i, config),
                _ => {}
            }
        }
    }
    any_intersection
}

/// Respond to a dynamic shape overlapping a static one
///
/// `contact.normal` is the unit normal pointing from the static shape to the
/// dynamic one; callers flip the narrow-phase result as needed so this
/// orientation always holds.
fn bounce(
    colliders: &mut [Collider],
    bodies: &mut [Body],
    config: &PhysicsConfig,
    events: &mut EventCollector,
    dynamic_index: usize,
    static_index: usize,
    contact: Contact,
) {
    let Contact { normal, depth } = contact;
    // A degenerate normal gives no direction to respond along.
    if normal.length_squared() < f32::EPSILON {
        return;
    }
    let Some(body_handle) = colliders[dynamic_index].body else {
        return;
    };

    let elastic = colliders[dynamic_index].is_elastic() || colliders[static_index].is_elastic();
    let can_be_ground = colliders[static_index].can_be_ground();

    let body = &mut bodies[body_handle.index()];
    let velocity = body.pending_velocity;
    body.pending_velocity = if elastic {
        (velocity - 2.0 * velocity.dot(normal) * normal) * config.restitution
    } else {
        // Slope-follow: keep only the motion along the surface.
        let tangent = normal.perp();
        tangent * velocity.dot(tangent)
    };

    // Only the dynamic side moves; static shapes never do.
    colliders[dynamic_index].position += normal * (depth + config.separation_epsilon);

    // Resting contact: a tiny normal rebound would re-penetrate and bounce
    // again next frame, so it is damped out and the surface becomes ground.
    let normal_speed = body.pending_velocity.dot(normal);
    if normal_speed.abs() < config.rest_threshold {
        body.pending_velocity -= normal * normal_speed;
        if can_be_ground {
            let collider = &mut colliders[dynamic_index];
            collider.on_ground = true;
            collider.ground = Some(ColliderHandle(static_index));
            collider.slope_angle = slope_angle(normal);
        }
    }

    events.push_unique(ContactEvent {
        a: ColliderHandle(dynamic_index),
        b: ColliderHandle(static_index),
        kind: ContactKind::Physical,
        normal: -normal,
        depth,
        user_data_a: colliders[dynamic_index].user_data(),
        user_data_b: colliders[static_index].user_data(),
    });
}

/// Probe for resting contact below a dynamic shape
///
/// The shape is nudged along gravity by the probe distance, retested against
/// the static shape, and restored bit-exactly. A probe hit marks ground
/// without moving anything.
fn probe_ground(
    colliders: &mut [Collider],
    dynamic_index: usize,
    static_index: usize,
    config: &PhysicsConfig,
) {
    if !colliders[static_index].can_be_ground() {
        return;
    }
    let direction = config.gravity.normalize_or_zero();
    if direction == Vec2::ZERO {
        return;
    }

    let saved = colliders[dynamic_index].position;
    colliders[dynamic_index].position = saved + direction * config.ground_probe_distance;
    let probe = narrow::intersect(&colliders[dynamic_index], &colliders[static_index]);
    colliders[dynamic_index].position = saved;

    if let Some(contact) = probe {
        // The test ran dynamic-first; flip to the upward normal.
        let collider = &mut colliders[dynamic_index];
        collider.on_ground = true;
        collider.ground = Some(ColliderHandle(static_index));
        collider.slope_angle = slope_angle(-contact.normal);
    }
}

/// Surface tangent angle from an upward contact normal
///
/// The tangent is the normal rotated a quarter turn, so flat ground (normal
/// straight up) gives zero and a surface rising to the right gives a
/// negative angle (y points down).
fn slope_angle(normal: Vec2) -> f32 {
    let tangent = normal.perp();
    tangent.y.atan2(tangent.x)
}
