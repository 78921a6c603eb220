//! Contact data produced by the narrowphase.

use glam::Vec2;

/// A single contact between two shapes.
///
/// `start` and `end` bound the overlap along the normal:
/// `end = start + depth * normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Penetration depth along `normal`.
    pub depth: f32,
    /// Unit contact normal (from shape A to shape B).
    pub normal: Vec2,
    pub start: Vec2,
    pub end: Vec2,
}

impl CollisionInfo {
    pub fn new(depth: f32, normal: Vec2, start: Vec2) -> Self {
        Self {
            depth,
            normal,
            start,
            end: start + normal * depth,
        }
    }

    /// Flip the normal and swap the start and end points.
    pub fn change_direction(&mut self) {
        self.normal = -self.normal;
        std::mem::swap(&mut self.start, &mut self.end);
    }

    /// Point where impulses are applied: `start` and `end` blended by the
    /// other body's share of the total inverse mass.
    ///
    /// A body that cannot move pins the point to its own side of the
    /// overlap. Callers never pass two immovable bodies.
    pub fn contact_point(&self, inv_mass_a: f32, inv_mass_b: f32) -> Vec2 {
        let total = inv_mass_a + inv_mass_b;
        if total <= 0.0 {
            return (self.start + self.end) * 0.5;
        }
        self.start * (inv_mass_b / total) + self.end * (inv_mass_a / total)
    }
}
