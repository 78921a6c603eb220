//! Collider geometry for the two supported shape variants.

use glam::Vec2;

use super::transform::Transform2D;
use super::EPSILON;

/// Circle geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }

    /// Radius of the smallest circle around the centre enclosing the shape.
    #[inline]
    pub fn bound_radius(&self) -> f32 {
        self.radius
    }

    /// Moment of inertia per unit mass.
    #[inline]
    pub fn inertia_factor(&self) -> f32 {
        self.radius * self.radius / 12.0
    }
}

/// Oriented rectangle with world-space vertices and outward face normals.
///
/// Vertices are stored counter-clockwise (y up), starting at the local
/// bottom-left corner. Face `i` is the edge from `vertices[i]` to
/// `vertices[(i + 1) % 4]` and `face_normals[i]` is its outward unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    width: f32,
    height: f32,
    vertices: [Vec2; 4],
    face_normals: [Vec2; 4],
}

impl Rectangle {
    /// Create a rectangle and place it with `transform`.
    pub fn new(width: f32, height: f32, transform: &Transform2D) -> Self {
        let mut rect = Self {
            width: width.max(0.0),
            height: height.max(0.0),
            vertices: [Vec2::ZERO; 4],
            face_normals: [Vec2::ZERO; 4],
        };
        rect.update_geometry(transform);
        rect
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2; 4] {
        &self.vertices
    }

    #[inline]
    pub fn face_normals(&self) -> &[Vec2; 4] {
        &self.face_normals
    }

    /// Half of the diagonal.
    #[inline]
    pub fn bound_radius(&self) -> f32 {
        0.5 * (self.width * self.width + self.height * self.height).sqrt()
    }

    /// Moment of inertia per unit mass.
    #[inline]
    pub fn inertia_factor(&self) -> f32 {
        (self.width * self.width + self.height * self.height) / 12.0
    }

    /// Change the extents, keeping them non-negative, and re-place the vertices.
    pub fn resize(&mut self, width: f32, height: f32, transform: &Transform2D) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.update_geometry(transform);
    }

    /// Recompute world-space vertices and face normals from `transform`.
    pub fn update_geometry(&mut self, transform: &Transform2D) {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        let local = [
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ];

        let affine = transform.to_affine();
        for (world, corner) in self.vertices.iter_mut().zip(local) {
            *world = affine.transform_point2(corner);
        }

        // Rotating the axis normals keeps them unit length even when an
        // extent is zero.
        let rotation = Vec2::from_angle(transform.rotation);
        self.face_normals = [
            rotation.rotate(Vec2::NEG_Y),
            rotation.rotate(Vec2::X),
            rotation.rotate(Vec2::Y),
            rotation.rotate(Vec2::NEG_X),
        ];
    }

    /// Deepest feature of this rectangle behind the plane through
    /// `point_on_face` with normal `-direction`.
    ///
    /// Vertices within [`EPSILON`] of the deepest one form an edge, so a
    /// flush face reports both of its corners. Vertices exactly on the plane
    /// count as touching. Returns `None` if every vertex lies in front of it.
    pub fn support_point(&self, direction: Vec2, point_on_face: Vec2) -> Option<SupportFeature> {
        let mut best: Option<SupportFeature> = None;
        for &vertex in &self.vertices {
            let projection = (vertex - point_on_face).dot(direction);
            if projection < 0.0 {
                continue;
            }
            best = match best {
                None => Some(SupportFeature::vertex(vertex, projection)),
                Some(feature) if projection > feature.depth + EPSILON => {
                    Some(SupportFeature::vertex(vertex, projection))
                }
                Some(feature) if projection >= feature.depth - EPSILON => Some(SupportFeature {
                    end: vertex,
                    depth: feature.depth.max(projection),
                    ..feature
                }),
                keep => keep,
            };
        }
        best
    }
}

/// Vertex, or edge of two tied vertices, lying deepest behind a face plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportFeature {
    pub start: Vec2,
    /// Equal to `start` for a single vertex.
    pub end: Vec2,
    pub depth: f32,
}

impl SupportFeature {
    fn vertex(vertex: Vec2, depth: f32) -> Self {
        Self {
            start: vertex,
            end: vertex,
            depth,
        }
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }

    /// Point of the feature centred within the span of the face
    /// `face_start -> face_end`.
    ///
    /// The feature is clipped to the face's extent along the face tangent
    /// and the middle of the clipped part is returned. A single vertex, a
    /// degenerate face, or a feature entirely beside the face yields the
    /// feature's own midpoint.
    pub fn clipped_midpoint(&self, face_start: Vec2, face_end: Vec2) -> Vec2 {
        let tangent = face_end - face_start;
        let face_len_sq = tangent.length_squared();
        if face_len_sq <= EPSILON * EPSILON || self.start == self.end {
            return self.midpoint();
        }

        let s0 = (self.start - face_start).dot(tangent) / face_len_sq;
        let s1 = (self.end - face_start).dot(tangent) / face_len_sq;
        if (s1 - s0).abs() <= EPSILON {
            return self.midpoint();
        }

        let lo = s0.min(s1).max(0.0);
        let hi = s0.max(s1).min(1.0);
        if lo > hi {
            return self.midpoint();
        }

        let t = ((lo + hi) * 0.5 - s0) / (s1 - s0);
        self.start.lerp(self.end, t)
    }
}

/// Geometry of a rigid body. The variant set is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Circle(Circle),
    Rectangle(Rectangle),
}

impl ShapeKind {
    #[inline]
    pub fn bound_radius(&self) -> f32 {
        match self {
            ShapeKind::Circle(circle) => circle.bound_radius(),
            ShapeKind::Rectangle(rect) => rect.bound_radius(),
        }
    }

    #[inline]
    pub fn inertia_factor(&self) -> f32 {
        match self {
            ShapeKind::Circle(circle) => circle.inertia_factor(),
            ShapeKind::Rectangle(rect) => rect.inertia_factor(),
        }
    }

    /// Refresh pose-dependent geometry. Circles have none.
    #[inline]
    pub fn update_geometry(&mut self, transform: &Transform2D) {
        if let ShapeKind::Rectangle(rect) = self {
            rect.update_geometry(transform);
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle(_) => "circle",
            ShapeKind::Rectangle(_) => "rectangle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rectangle_vertices_axis_aligned() {
        let t = Transform2D::from_position(Vec2::new(1.0, 2.0));
        let rect = Rectangle::new(4.0, 2.0, &t);

        let eps = 1e-5;
        let expected = [
            Vec2::new(-1.0, 1.0),
            Vec2::new(3.0, 1.0),
            Vec2::new(3.0, 3.0),
            Vec2::new(-1.0, 3.0),
        ];
        for (v, e) in rect.vertices().iter().zip(expected) {
            assert!((*v - e).length() < eps, "{v} != {e}");
        }
    }

    #[test]
    fn test_face_normals_point_outward() {
        let t = Transform2D {
            rotation: 0.3,
            ..Transform2D::from_position(Vec2::new(-2.0, 5.0))
        };
        let rect = Rectangle::new(3.0, 1.0, &t);

        for i in 0..4 {
            let n = rect.face_normals()[i];
            let a = rect.vertices()[i];
            let b = rect.vertices()[(i + 1) % 4];
            let mid = (a + b) * 0.5;
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(b - a).abs() < 1e-4, "normal {i} not perpendicular");
            assert!(n.dot(mid - t.position) > 0.0, "normal {i} points inward");
        }
    }

    #[test]
    fn test_rotation_updates_geometry() {
        let mut t = Transform2D::identity();
        let mut rect = Rectangle::new(2.0, 1.0, &t);
        t.rotation = FRAC_PI_2;
        rect.update_geometry(&t);

        let eps = 1e-5;
        assert!((rect.face_normals()[1] - Vec2::Y).length() < eps);
        assert!((rect.vertices()[0] - Vec2::new(0.5, -1.0)).length() < eps);
    }

    #[test]
    fn test_bound_radius_encloses_rectangle() {
        let t = Transform2D {
            rotation: 1.1,
            ..Transform2D::from_position(Vec2::new(4.0, -1.0))
        };
        let rect = Rectangle::new(6.0, 8.0, &t);
        assert!((rect.bound_radius() - 5.0).abs() < 1e-5);
        for v in rect.vertices() {
            assert!(v.distance(t.position) <= rect.bound_radius() + 1e-4);
        }
    }

    #[test]
    fn test_support_point() {
        let rect = Rectangle::new(2.0, 2.0, &Transform2D::from_position(Vec2::new(0.3, 1.5)));
        // Plane y = 1 facing up; the bottom vertices (y = 0.5) are behind it.
        let feature = rect
            .support_point(Vec2::NEG_Y, Vec2::new(0.0, 1.0))
            .expect("support point");
        assert!((feature.depth - 0.5).abs() < 1e-5);
        // Both bottom corners tie, so the feature is the bottom edge.
        assert!((feature.midpoint() - Vec2::new(0.3, 0.5)).length() < 1e-5);
        assert!((feature.start - feature.end).length() > 1.9);

        assert!(rect.support_point(Vec2::NEG_Y, Vec2::new(0.0, -1.0)).is_none());
    }

    #[test]
    fn test_support_point_single_vertex() {
        let t = Transform2D {
            rotation: 0.2,
            ..Transform2D::from_position(Vec2::new(0.0, 1.5))
        };
        let rect = Rectangle::new(2.0, 2.0, &t);
        let feature = rect
            .support_point(Vec2::NEG_Y, Vec2::new(0.0, 1.0))
            .expect("support point");
        assert_eq!(feature.start, feature.end);
        // Rotating counter-clockwise lowers the bottom-left corner.
        assert_eq!(feature.start, rect.vertices()[0]);
    }

    #[test]
    fn test_support_point_touching_plane() {
        let rect = Rectangle::new(2.0, 2.0, &Transform2D::from_position(Vec2::new(0.0, 2.0)));
        let feature = rect
            .support_point(Vec2::NEG_Y, Vec2::new(0.0, 1.0))
            .expect("touching counts");
        assert_eq!(feature.depth, 0.0);
    }

    #[test]
    fn test_clipped_midpoint() {
        // A long edge under a short face is clipped to the face's span.
        let feature = SupportFeature {
            start: Vec2::new(5.0, 0.5),
            end: Vec2::new(-5.0, 0.5),
            depth: 0.1,
        };
        let point = feature.clipped_midpoint(Vec2::new(1.5, 0.4), Vec2::new(2.5, 0.4));
        assert!((point - Vec2::new(2.0, 0.5)).length() < 1e-5);

        // A short edge inside a long face keeps its own midpoint.
        let feature = SupportFeature {
            start: Vec2::new(1.5, 0.4),
            end: Vec2::new(2.5, 0.4),
            depth: 0.1,
        };
        let point = feature.clipped_midpoint(Vec2::new(5.0, 0.5), Vec2::new(-5.0, 0.5));
        assert!((point - Vec2::new(2.0, 0.4)).length() < 1e-5);

        // A single vertex is never moved.
        let corner = Vec2::new(7.0, 0.0);
        let feature = SupportFeature {
            start: corner,
            end: corner,
            depth: 0.2,
        };
        assert_eq!(feature.clipped_midpoint(Vec2::ZERO, Vec2::X), corner);
    }

    #[test]
    fn test_negative_sizes_clamped() {
        let rect = Rectangle::new(-1.0, 2.0, &Transform2D::identity());
        assert_eq!(rect.width(), 0.0);
        assert!((rect.face_normals()[0] - Vec2::NEG_Y).length() < 1e-6);
    }
}
