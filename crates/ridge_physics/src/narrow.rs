//! Narrow-phase overlap tests
//!
//! Circle-circle by center distance, rectangle-rectangle by the separating
//! axis theorem, rectangle-circle by closest-point clamping. Every test
//! reports the same orientation contract: the normal points from the first
//! tested shape to the second.

use crate::collider::{Collider, ColliderShape};
use glam::Vec2;

/// Tolerance on overlap comparisons. Shapes in exact touch count as
/// intersecting with zero depth, which is what lets the ground probe fire at
/// exactly the probe distance.
pub(crate) const CONTACT_EPSILON: f32 = 1e-3;

/// Result of a positive overlap test
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit normal pointing from the first tested shape to the second
    pub normal: Vec2,
    /// Non-negative penetration depth along the normal
    pub depth: f32,
}

/// Test two colliders for overlap
///
/// Returns `None` when the shapes do not intersect. Dispatch is keyed on the
/// shape-kind pair; the mirrored rect/circle ordering reuses the same test
/// with the normal flipped back into first-to-second orientation.
pub fn intersect(a: &Collider, b: &Collider) -> Option<Contact> {
    match (*a.shape(), *b.shape()) {
        (ColliderShape::Circle { radius: ra }, ColliderShape::Circle { radius: rb }) => {
            circle_circle(a.world_position(), ra, b.world_position(), rb)
        }
        (
            ColliderShape::Rect {
                width,
                height,
                rotation,
            },
            ColliderShape::Rect {
                width: b_width,
                height: b_height,
                rotation: b_rotation,
            },
        ) => rect_rect(
            &Obb::new(a.world_position(), width, height, rotation),
            &Obb::new(b.world_position(), b_width, b_height, b_rotation),
        ),
        (
            ColliderShape::Rect {
                width,
                height,
                rotation,
            },
            ColliderShape::Circle { radius },
        ) => rect_circle(
            &Obb::new(a.world_position(), width, height, rotation),
            b.world_position(),
            radius,
        ),
        (
            ColliderShape::Circle { radius },
            ColliderShape::Rect {
                width,
                height,
                rotation,
            },
        ) => rect_circle(
            &Obb::new(b.world_position(), width, height, rotation),
            a.world_position(),
            radius,
        )
        .map(|mut contact| {
            contact.normal = -contact.normal;
            contact
        }),
    }
}

/// Oriented rectangle in world space
struct Obb {
    center: Vec2,
    half: Vec2,
    axis_x: Vec2,
    axis_y: Vec2,
}

impl Obb {
    fn new(center: Vec2, width: f32, height: f32, rotation: f32) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self {
            center,
            half: Vec2::new(width * 0.5, height * 0.5),
            axis_x: Vec2::new(cos, sin),
            axis_y: Vec2::new(-sin, cos),
        }
    }

    fn vertices(&self) -> [Vec2; 4] {
        let ex = self.axis_x * self.half.x;
        let ey = self.axis_y * self.half.y;
        [
            self.center - ex - ey,
            self.center + ex - ey,
            self.center + ex + ey,
            self.center - ex + ey,
        ]
    }
}

fn circle_circle(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> Option<Contact> {
    let delta = c2 - c1;
    let radii = r1 + r2;
    let dist_sq = delta.length_squared();
    if dist_sq >= (radii + CONTACT_EPSILON) * (radii + CONTACT_EPSILON) {
        return None;
    }

    let distance = dist_sq.sqrt();
    // Coincident centers leave no separation direction; push along +y.
    let normal = if distance > 1e-6 {
        delta / distance
    } else {
        Vec2::Y
    };
    Some(Contact {
        normal,
        depth: (radii - distance).max(0.0),
    })
}

fn project(vertices: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    let mut min = vertices[0].dot(axis);
    let mut max = min;
    for vertex in &vertices[1..] {
        let p = vertex.dot(axis);
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}

fn rect_rect(a: &Obb, b: &Obb) -> Option<Contact> {
    let verts_a = a.vertices();
    let verts_b = b.vertices();
    // Two unique edge normals per rectangle; parallel edges share an axis.
    let axes = [a.axis_x, a.axis_y, b.axis_x, b.axis_y];

    let mut min_overlap = f32::MAX;
    let mut min_axis = axes[0];
    for axis in axes {
        let (min_a, max_a) = project(&verts_a, axis);
        let (min_b, max_b) = project(&verts_b, axis);
        let overlap = max_a.min(max_b) - min_a.max(min_b);
        if overlap < -CONTACT_EPSILON {
            return None;
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            min_axis = axis;
        }
    }

    // Minimum translation vector: the axis of least overlap, sign-corrected
    // to point from a to b.
    let mut normal = min_axis;
    if (b.center - a.center).dot(normal) < 0.0 {
        normal = -normal;
    }
    Some(Contact {
        normal,
        depth: min_overlap.max(0.0),
    })
}

fn rect_circle(rect: &Obb, center: Vec2, radius: f32) -> Option<Contact> {
    // Circle center in the rectangle's local (un-rotated) frame.
    let delta = center - rect.center;
    let local = Vec2::new(delta.dot(rect.axis_x), delta.dot(rect.axis_y));
    let clamped = local.clamp(-rect.half, rect.half);
    let offset = local - clamped;
    let dist_sq = offset.length_squared();

    if dist_sq > 1e-9 {
        // Center outside: the clamped point is the closest boundary point.
        if dist_sq >= (radius + CONTACT_EPSILON) * (radius + CONTACT_EPSILON) {
            return None;
        }
        let distance = dist_sq.sqrt();
        let local_normal = offset / distance;
        let normal = rect.axis_x * local_normal.x + rect.axis_y * local_normal.y;
        return Some(Contact {
            normal,
            depth: (radius - distance).max(0.0),
        });
    }

    // Center inside the rectangle: push out through the nearest edge.
    let to_edge_x = rect.half.x - local.x.abs();
    let to_edge_y = rect.half.y - local.y.abs();
    let (local_normal, edge_distance) = if to_edge_x < to_edge_y {
        (Vec2::new(local.x.signum(), 0.0), to_edge_x)
    } else {
        (Vec2::new(0.0, local.y.signum()), to_edge_y)
    };
    let normal = rect.axis_x * local_normal.x + rect.axis_y * local_normal.y;
    Some(Contact {
        normal,
        depth: radius + edge_distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::ColliderDesc;
    use approx::assert_relative_eq;

    fn collider(shape: ColliderShape, x: f32, y: f32) -> Collider {
        Collider::from_desc(ColliderDesc::new(shape).with_position(x, y))
    }

    #[test]
    fn test_separated_circles_do_not_intersect() {
        let a = collider(ColliderShape::circle(10.0), 0.0, 0.0);
        let b = collider(ColliderShape::circle(10.0), 20.1, 0.0);
        assert!(intersect(&a, &b).is_none());
    }

    #[test]
    fn test_touching_circles_intersect_with_zero_depth() {
        let a = collider(ColliderShape::circle(10.0), 0.0, 0.0);
        let b = collider(ColliderShape::circle(10.0), 20.0, 0.0);
        let contact = intersect(&a, &b).expect("touching circles should register");
        assert_relative_eq!(contact.depth, 0.0, epsilon = 1e-4);
        assert_relative_eq!(contact.normal.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_overlapping_circles_depth_and_normal() {
        let a = collider(ColliderShape::circle(16.0), 0.0, 0.0);
        let b = collider(ColliderShape::circle(16.0), 0.0, 30.0);
        let contact = intersect(&a, &b).unwrap();
        assert_relative_eq!(contact.depth, 2.0, epsilon = 1e-4);
        assert_relative_eq!(contact.normal.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_coincident_circles_fall_back_to_fixed_axis() {
        let a = collider(ColliderShape::circle(5.0), 3.0, 3.0);
        let b = collider(ColliderShape::circle(5.0), 3.0, 3.0);
        let contact = intersect(&a, &b).unwrap();
        assert_eq!(contact.normal, Vec2::Y);
        assert_relative_eq!(contact.depth, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_separated_rects_do_not_intersect() {
        let a = collider(ColliderShape::rect(64.0, 64.0), 0.0, 0.0);
        let b = collider(ColliderShape::rect(64.0, 64.0), 100.0, 0.0);
        assert!(intersect(&a, &b).is_none());
    }

    #[test]
    fn test_axis_aligned_rect_overlap_depth() {
        // Equal 64x64 rects offset 54 on x: 10 units of overlap on one axis.
        let a = collider(ColliderShape::rect(64.0, 64.0), 0.0, 0.0);
        let b = collider(ColliderShape::rect(64.0, 64.0), 54.0, 0.0);
        let contact = intersect(&a, &b).unwrap();
        assert_relative_eq!(contact.depth, 10.0, epsilon = 1e-4);
        assert_relative_eq!(contact.normal.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(contact.normal.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rotated_rect_uses_minimum_overlap_axis() {
        // A 45-degree square's corner reaches 50*sqrt(2) from its center, so
        // it pokes 20.71 into the axis-aligned square on the x axis.
        let a = collider(ColliderShape::rect(100.0, 100.0), 0.0, 0.0);
        let b = collider(
            ColliderShape::rect_rotated(100.0, 100.0, std::f32::consts::FRAC_PI_4),
            100.0,
            0.0,
        );
        let contact = intersect(&a, &b).unwrap();
        assert_relative_eq!(contact.depth, 50.0 * std::f32::consts::SQRT_2 - 50.0, epsilon = 1e-3);
        assert_relative_eq!(contact.normal.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rect_circle_outside_closest_point() {
        let a = collider(ColliderShape::rect(100.0, 50.0), 0.0, 0.0);
        let b = collider(ColliderShape::circle(10.0), 58.0, 0.0);
        let contact = intersect(&a, &b).unwrap();
        assert_relative_eq!(contact.depth, 2.0, epsilon = 1e-4);
        assert_relative_eq!(contact.normal.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rect_circle_center_inside() {
        // Center 10 units from the right face: pushed out through it with
        // depth = radius + face distance.
        let a = collider(ColliderShape::rect(100.0, 50.0), 0.0, 0.0);
        let b = collider(ColliderShape::circle(8.0), 40.0, 0.0);
        let contact = intersect(&a, &b).unwrap();
        assert_relative_eq!(contact.depth, 18.0, epsilon = 1e-4);
        assert_relative_eq!(contact.normal.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_mirrored_order_flips_normal() {
        let rect = collider(ColliderShape::rect(100.0, 50.0), 0.0, 0.0);
        let circle = collider(ColliderShape::circle(10.0), 58.0, 0.0);

        let forward = intersect(&rect, &circle).unwrap();
        let reversed = intersect(&circle, &rect).unwrap();
        assert_relative_eq!(forward.normal.x, -reversed.normal.x, epsilon = 1e-5);
        assert_relative_eq!(forward.normal.y, -reversed.normal.y, epsilon = 1e-5);
        assert_relative_eq!(forward.depth, reversed.depth, epsilon = 1e-5);
    }

    #[test]
    fn test_offset_shifts_world_position() {
        let a = collider(ColliderShape::circle(10.0), 0.0, 0.0);
        let b = Collider::from_desc(
            ColliderDesc::new(ColliderShape::circle(10.0))
                .with_position(40.0, 0.0)
                .with_offset(-25.0, 0.0),
        );
        // World center of b is at x = 15, well inside a's reach.
        let contact = intersect(&a, &b).unwrap();
        assert_relative_eq!(contact.depth, 5.0, epsilon = 1e-4);
    }
}
