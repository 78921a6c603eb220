//! 2D transform shared between game entities and their rigid bodies.

use glam::{Affine2, Vec2};

/// Position, rotation, and size of an entity in the plane.
///
/// Physics reads and writes `position` and `rotation`. `size` is the
/// render size of the entity and `z_depth` its draw order; neither is
/// used by the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    /// Rotation in radians, counter-clockwise.
    pub rotation: f32,
    pub size: Vec2,
    pub z_depth: f32,
}

impl Transform2D {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            size: Vec2::ONE,
            z_depth: 0.0,
        }
    }

    /// Create a transform from a position.
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Create a transform from a position and size.
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            ..Self::identity()
        }
    }

    /// Rotation and translation as an affine map (size is not applied).
    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_angle_translation(self.rotation, self.position)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}
