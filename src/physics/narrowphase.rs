//! Narrowphase collision detection: circle-circle, Voronoi-region
//! rectangle-circle, and support-point SAT for rectangle-rectangle.
//!
//! Every test returns a contact whose normal points from the first shape
//! to the second. `start` lies on the second shape's surface (inside the
//! first shape) and `end` on the first shape's surface.
//!
//! Shapes that exactly touch collide with depth zero, for every pair type.

use glam::Vec2;

use super::collider::{Rectangle, ShapeKind};
use super::contact::CollisionInfo;
use super::rigid_body::Shape;
use super::EPSILON;

/// Normal reported when two circle centres coincide.
pub const COINCIDENT_NORMAL: Vec2 = Vec2::NEG_Y;

/// Circle-circle test.
pub fn circle_circle(
    center_a: Vec2,
    radius_a: f32,
    center_b: Vec2,
    radius_b: f32,
) -> Option<CollisionInfo> {
    let from_a_to_b = center_b - center_a;
    let radius_sum = radius_a + radius_b;
    let dist_sq = from_a_to_b.length_squared();

    if dist_sq > radius_sum * radius_sum {
        return None;
    }

    let dist = dist_sq.sqrt();
    if dist > EPSILON {
        let normal = from_a_to_b / dist;
        let start = center_b - normal * radius_b;
        return Some(CollisionInfo::new(radius_sum - dist, normal, start));
    }

    // Same centre: no meaningful direction, push along a fixed axis from
    // the top of the larger circle.
    let top = if radius_a > radius_b {
        center_a + Vec2::new(0.0, radius_a)
    } else {
        center_b + Vec2::new(0.0, radius_b)
    };
    Some(CollisionInfo::new(radius_sum, COINCIDENT_NORMAL, top))
}

/// Rectangle-circle test. The normal points from the rectangle to the circle.
pub fn rect_circle(rect: &Rectangle, center: Vec2, radius: f32) -> Option<CollisionInfo> {
    let vertices = rect.vertices();
    let normals = rect.face_normals();

    // Face whose plane the centre is farthest in front of.
    let mut best_distance = f32::NEG_INFINITY;
    let mut nearest_edge = 0;
    for i in 0..4 {
        let projection = (center - vertices[i]).dot(normals[i]);
        if projection > best_distance {
            best_distance = projection;
            nearest_edge = i;
        }
    }

    if best_distance <= 0.0 {
        // Centre inside the rectangle.
        let normal = normals[nearest_edge];
        return Some(CollisionInfo::new(
            radius - best_distance,
            normal,
            center - normal * radius,
        ));
    }

    let edge_start = vertices[nearest_edge];
    let edge_end = vertices[(nearest_edge + 1) % 4];
    let edge = edge_end - edge_start;

    // Corner region before the edge
    let to_center = center - edge_start;
    if to_center.dot(edge) < 0.0 {
        return corner_contact(to_center, center, radius);
    }

    // Corner region after the edge
    let to_center = center - edge_end;
    if to_center.dot(-edge) < 0.0 {
        return corner_contact(to_center, center, radius);
    }

    // Face region
    if best_distance <= radius {
        let normal = normals[nearest_edge];
        Some(CollisionInfo::new(
            radius - best_distance,
            normal,
            center - normal * radius,
        ))
    } else {
        None
    }
}

/// Circle against a single rectangle vertex, `corner_to_center = center - vertex`.
fn corner_contact(corner_to_center: Vec2, center: Vec2, radius: f32) -> Option<CollisionInfo> {
    let dist = corner_to_center.length();
    if dist > radius || dist <= EPSILON {
        return None;
    }
    let normal = corner_to_center / dist;
    Some(CollisionInfo::new(radius - dist, normal, center - normal * radius))
}

/// Face of `a` with the least penetration by `b`.
///
/// Returns `(depth, a's face normal, contact point on b)`, or `None` if one
/// of `a`'s faces separates the rectangles. When an edge of `b` lies flush
/// against the face, the contact point is centred on their overlap.
fn axis_least_penetration(a: &Rectangle, b: &Rectangle) -> Option<(f32, Vec2, Vec2)> {
    let vertices = a.vertices();
    let mut best: Option<(f32, Vec2, Vec2)> = None;

    for (i, normal) in a.face_normals().iter().enumerate() {
        let face_start = vertices[i];
        let feature = b.support_point(-*normal, face_start)?;
        if best.map_or(true, |(best_depth, _, _)| feature.depth < best_depth) {
            let face_end = vertices[(i + 1) % 4];
            let point = feature.clipped_midpoint(face_start, face_end);
            best = Some((feature.depth, *normal, point));
        }
    }

    best
}

/// Rectangle-rectangle test over both rectangles' face normals.
pub fn rect_rect(a: &Rectangle, b: &Rectangle) -> Option<CollisionInfo> {
    let (depth_a, normal_a, support_b) = axis_least_penetration(a, b)?;
    let (depth_b, normal_b, support_a) = axis_least_penetration(b, a)?;

    if depth_a <= depth_b {
        // B reaches into A.
        Some(CollisionInfo::new(depth_a, normal_a, support_b))
    } else {
        // A reaches into B; report from B's face towards A's feature.
        Some(CollisionInfo::new(
            depth_b,
            -normal_b,
            support_a + normal_b * depth_b,
        ))
    }
}

/// Detect collision between two shapes. The normal points from `a` to `b`.
pub fn collision_test(a: &Shape, b: &Shape) -> Option<CollisionInfo> {
    match (a.kind(), b.kind()) {
        (ShapeKind::Circle(circle_a), ShapeKind::Circle(circle_b)) => {
            circle_circle(a.center(), circle_a.radius, b.center(), circle_b.radius)
        }
        (ShapeKind::Rectangle(rect), ShapeKind::Circle(circle)) => {
            rect_circle(rect, b.center(), circle.radius)
        }
        (ShapeKind::Circle(circle), ShapeKind::Rectangle(rect)) => {
            rect_circle(rect, a.center(), circle.radius).map(|mut info| {
                info.change_direction();
                info
            })
        }
        (ShapeKind::Rectangle(rect_a), ShapeKind::Rectangle(rect_b)) => rect_rect(rect_a, rect_b),
    }
}

impl Shape {
    /// Narrowphase test against `other`. See [`collision_test`].
    #[inline]
    pub fn collision_test(&self, other: &Shape) -> Option<CollisionInfo> {
        collision_test(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::transform::Transform2D;
    use std::f32::consts::FRAC_PI_4;

    const EPS: f32 = 1e-4;

    fn rect_at(x: f32, y: f32, w: f32, h: f32, rotation: f32) -> Rectangle {
        let t = Transform2D {
            rotation,
            ..Transform2D::from_position(Vec2::new(x, y))
        };
        Rectangle::new(w, h, &t)
    }

    #[test]
    fn test_circle_circle_depth() {
        for &(ra, rb, d) in &[(1.0, 1.0, 1.5), (0.5, 2.0, 2.4), (1.0, 1.0, 2.0), (3.0, 0.1, 0.2)] {
            let info = circle_circle(Vec2::ZERO, ra, Vec2::new(d, 0.0), rb)
                .expect("circles should overlap");
            assert!((info.depth - (ra + rb - d)).abs() < EPS);
            assert!((info.normal - Vec2::X).length() < EPS);
        }
    }

    #[test]
    fn test_circle_circle_no_intersection() {
        assert!(circle_circle(Vec2::ZERO, 1.0, Vec2::new(2.001, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_circle_circle_surface_points() {
        let info = circle_circle(Vec2::ZERO, 1.0, Vec2::new(0.0, 1.5), 1.0).unwrap();
        assert!((info.start - Vec2::new(0.0, 0.5)).length() < EPS);
        assert!((info.end - Vec2::new(0.0, 1.0)).length() < EPS);
    }

    #[test]
    fn test_circle_circle_coincident() {
        let info = circle_circle(Vec2::new(2.0, 2.0), 1.0, Vec2::new(2.0, 2.0), 3.0).unwrap();
        assert_eq!(info.normal, COINCIDENT_NORMAL);
        assert!((info.depth - 4.0).abs() < EPS);
        assert!((info.start - Vec2::new(2.0, 5.0)).length() < EPS);
    }

    #[test]
    fn test_rect_circle_face_region() {
        let rect = rect_at(0.0, 0.0, 10.0, 1.0, 0.0);
        let info = rect_circle(&rect, Vec2::new(1.0, 0.9), 0.5).unwrap();
        assert!((info.normal - Vec2::Y).length() < EPS);
        assert!((info.depth - 0.1).abs() < EPS);
        assert!((info.end.y - 0.5).abs() < EPS);
    }

    #[test]
    fn test_rect_circle_face_region_miss() {
        let rect = rect_at(0.0, 0.0, 10.0, 1.0, 0.0);
        assert!(rect_circle(&rect, Vec2::new(1.0, 1.2), 0.5).is_none());
    }

    #[test]
    fn test_rect_circle_corner_region() {
        let rect = rect_at(0.0, 0.0, 2.0, 2.0, 0.0);
        // Diagonal from the (1, 1) corner.
        let center = Vec2::new(1.5, 1.5);
        let info = rect_circle(&rect, center, 1.0).unwrap();
        let expected_normal = Vec2::new(1.0, 1.0).normalize();
        assert!((info.normal - expected_normal).length() < EPS);
        assert!((info.depth - (1.0 - 0.5f32.sqrt())).abs() < EPS);
        assert!((info.end - Vec2::new(1.0, 1.0)).length() < EPS);

        // Same direction, out of reach of the corner.
        assert!(rect_circle(&rect, Vec2::new(1.8, 1.8), 1.0).is_none());
    }

    #[test]
    fn test_rect_circle_every_corner() {
        let rect = rect_at(0.0, 0.0, 2.0, 2.0, 0.0);
        for corner in rect.vertices() {
            let center = *corner * 1.3;
            let info = rect_circle(&rect, center, 0.5).expect("corner contact");
            assert!((info.normal - corner.normalize()).length() < EPS);
        }
    }

    #[test]
    fn test_rect_circle_center_inside() {
        let rect = rect_at(0.0, 0.0, 4.0, 2.0, 0.0);
        let info = rect_circle(&rect, Vec2::new(1.5, 0.2), 0.25).unwrap();
        // Nearest face is the right one (0.5 away), not the top (0.8 away).
        assert!((info.normal - Vec2::X).length() < EPS);
        assert!((info.depth - 0.75).abs() < EPS);
    }

    #[test]
    fn test_rect_circle_rotated() {
        let rect = rect_at(0.0, 0.0, 2.0, 2.0, FRAC_PI_4);
        // The rotated corner points straight up at (0, sqrt 2).
        let info = rect_circle(&rect, Vec2::new(0.0, 2.0f32.sqrt() + 0.4), 0.5).unwrap();
        assert!((info.normal - Vec2::Y).length() < EPS);
        assert!((info.depth - 0.1).abs() < EPS);
    }

    #[test]
    fn test_rect_rect_overlap() {
        let a = rect_at(0.0, 0.0, 2.0, 2.0, 0.0);
        let b = rect_at(1.5, 0.2, 2.0, 2.0, 0.0);
        let info = rect_rect(&a, &b).unwrap();
        assert!((info.normal - Vec2::X).length() < EPS);
        assert!((info.depth - 0.5).abs() < EPS);
        assert!((info.end - info.start - info.normal * info.depth).length() < EPS);
    }

    #[test]
    fn test_rect_rect_normal_from_b_face() {
        // B is large, so the minimum-penetration face belongs to B.
        let a = rect_at(0.0, 0.5, 1.0, 1.0, FRAC_PI_4);
        let b = rect_at(0.0, -5.0, 20.0, 10.0, 0.0);
        let info = rect_rect(&a, &b).unwrap();

        // A's lowest corner sits at (0, 0.5 - sqrt(0.5)), below B's top face.
        let expected_depth = 0.5f32.sqrt() - 0.5;
        assert!((info.normal - Vec2::NEG_Y).length() < EPS);
        assert!((info.depth - expected_depth).abs() < EPS);
        assert!((info.start - Vec2::ZERO).length() < EPS);
        assert!((info.end - Vec2::new(0.0, -expected_depth)).length() < EPS);
    }

    #[test]
    fn test_rect_rect_flush_faces_centre_contact() {
        let floor = rect_at(0.0, 0.0, 10.0, 1.0, 0.0);
        let block = rect_at(2.0, 0.9, 1.0, 1.0, 0.0);

        // Floor first: the block's bottom edge is centred under it.
        let info = rect_rect(&floor, &block).unwrap();
        assert!((info.normal - Vec2::Y).length() < EPS);
        assert!((info.depth - 0.1).abs() < EPS);
        assert!((info.start - Vec2::new(2.0, 0.4)).length() < EPS);

        // Block first: the floor's top edge is clipped to the block's width.
        let info = rect_rect(&block, &floor).unwrap();
        assert!((info.normal - Vec2::NEG_Y).length() < EPS);
        assert!((info.depth - 0.1).abs() < EPS);
        assert!((info.start - Vec2::new(2.0, 0.5)).length() < EPS);
        assert!((info.end - Vec2::new(2.0, 0.4)).length() < EPS);
    }

    #[test]
    fn test_touching_counts_for_every_pair() {
        let a = rect_at(0.0, 0.0, 2.0, 2.0, 0.0);
        let b = rect_at(2.0, 0.0, 2.0, 2.0, 0.0);
        let info = rect_rect(&a, &b).expect("touching rectangles");
        assert_eq!(info.depth, 0.0);
        assert!((info.normal - Vec2::X).length() < EPS);

        let info = rect_circle(&a, Vec2::new(0.0, 1.5), 0.5).expect("touching face");
        assert_eq!(info.depth, 0.0);

        let info = circle_circle(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0).expect("touching circles");
        assert_eq!(info.depth, 0.0);
    }

    #[test]
    fn test_rect_rect_separated() {
        let a = rect_at(0.0, 0.0, 2.0, 2.0, 0.0);
        let b = rect_at(3.0, 0.0, 2.0, 2.0, 0.0);
        assert!(rect_rect(&a, &b).is_none());

        // Bounding circles overlap, but a rotated gap separates them.
        let a = rect_at(0.0, 0.0, 2.0, 2.0, FRAC_PI_4);
        let b = rect_at(2.5, 0.0, 2.0, 2.0, 0.0);
        assert!(rect_rect(&a, &b).is_none());
    }

    #[test]
    fn test_dispatch_orientation() {
        let circle = Shape::circle(Transform2D::from_position(Vec2::new(0.0, 0.9)), 0.5);
        let ground = Shape::rectangle(Transform2D::identity(), 10.0, 1.0);

        let down = circle.collision_test(&ground).unwrap();
        assert!((down.normal - Vec2::NEG_Y).length() < EPS);

        let up = ground.collision_test(&circle).unwrap();
        assert!((up.normal - Vec2::Y).length() < EPS);
        assert!((up.depth - down.depth).abs() < EPS);
    }
}
