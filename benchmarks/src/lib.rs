//! Scene setup helpers shared by the physics benchmarks.

use glam::Vec2;
use rein2d::ecs::bridge::spawn_body;
use rein2d::{PhysicsConfig, PhysicsWorld, Shape, Transform2D};

/// Columns used when laying bodies out on a grid.
const GRID_COLUMNS: usize = 20;

fn grid_position(i: usize, spacing: f32) -> Vec2 {
    let column = (i % GRID_COLUMNS) as f32;
    let row = (i / GRID_COLUMNS) as f32;
    Vec2::new((column - GRID_COLUMNS as f32 * 0.5) * spacing, 2.0 + row * spacing)
}

/// Wide static floor under every scene.
pub fn floor() -> Shape {
    Shape::rectangle(
        Transform2D::from_position(Vec2::new(0.0, -0.5)),
        GRID_COLUMNS as f32 * 4.0,
        1.0,
    )
    .with_mass(0.0)
}

/// `n` circles on a grid, tightly packed so neighbours overlap.
pub fn setup_circle_set(n: usize) -> Vec<Shape> {
    (0..n)
        .map(|i| Shape::circle(Transform2D::from_position(grid_position(i, 0.9)), 0.5))
        .collect()
}

/// `n` alternating circles and rotated boxes on a grid, plus a floor.
pub fn setup_mixed_set(n: usize) -> Vec<Shape> {
    let mut shapes = vec![floor()];
    shapes.extend((0..n).map(|i| {
        let position = grid_position(i, 1.2);
        if i % 2 == 0 {
            Shape::circle(Transform2D::from_position(position), 0.5)
        } else {
            Shape::rectangle(
                Transform2D {
                    position,
                    rotation: i as f32 * 0.3,
                    ..Transform2D::identity()
                },
                1.0,
                0.8,
            )
        }
    }));
    shapes
}

/// A physics world holding [`setup_mixed_set`].
pub fn setup_world(n: usize) -> anyhow::Result<PhysicsWorld> {
    let mut physics = PhysicsWorld::new(PhysicsConfig::default())?;
    for shape in setup_mixed_set(n) {
        physics.add_shape(shape);
    }
    Ok(physics)
}

/// An ECS world holding [`setup_mixed_set`] as entities.
pub fn setup_ecs_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    for shape in setup_mixed_set(n) {
        spawn_body(&mut world, shape);
    }
    world
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_sizes() {
        assert_eq!(setup_circle_set(10).len(), 10);
        assert_eq!(setup_mixed_set(10).len(), 11);
        assert_eq!(setup_world(10).unwrap().shapes().len(), 11);
        assert_eq!(setup_ecs_world(10).len(), 11);
    }
}
