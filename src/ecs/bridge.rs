//! Bridge between free-standing shapes and ECS entities.

use crate::ecs::components::{Shape, Transform2D};

/// Spawn a `Shape` as an ECS entity.
///
/// Creates an entity with a Transform2D copied from the shape's pose and
/// the Shape itself.
pub fn spawn_body(world: &mut hecs::World, shape: Shape) -> hecs::Entity {
    let transform = *shape.transform();
    world.spawn((transform, shape))
}

/// Remove the Shape component from an entity, keeping the entity and its
/// Transform2D. Returns the removed shape.
pub fn detach_body(world: &mut hecs::World, entity: hecs::Entity) -> Option<Shape> {
    world.remove_one::<Shape>(entity).ok()
}

/// Copy every entity's Transform2D into its Shape.
///
/// [`physics_system`](crate::ecs::physics_system) does this itself at the
/// start of each tick; call it directly after moving entities when shape
/// geometry is needed before the next tick.
pub fn sync_shapes(world: &mut hecs::World) {
    for (_, (transform, shape)) in world.query_mut::<(&Transform2D, &mut Shape)>() {
        if shape.transform() != transform {
            shape.set_transform(*transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_spawn_body_copies_pose() {
        let mut world = hecs::World::new();
        let shape = Shape::circle(Transform2D::from_position(Vec2::new(1.0, 2.0)), 0.5);
        let entity = spawn_body(&mut world, shape);

        let transform = world.get::<&Transform2D>(entity).unwrap();
        assert_eq!(transform.position, Vec2::new(1.0, 2.0));
        assert!(world.get::<&Shape>(entity).is_ok());
    }

    #[test]
    fn test_sync_shapes_follows_transform() {
        let mut world = hecs::World::new();
        let entity = spawn_body(
            &mut world,
            Shape::rectangle(Transform2D::identity(), 2.0, 1.0),
        );

        world.get::<&mut Transform2D>(entity).unwrap().position = Vec2::new(3.0, 0.0);
        sync_shapes(&mut world);

        let shape = world.get::<&Shape>(entity).unwrap();
        assert_eq!(shape.center(), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_detach_body() {
        let mut world = hecs::World::new();
        let entity = spawn_body(&mut world, Shape::circle(Transform2D::identity(), 1.0));

        assert!(detach_body(&mut world, entity).is_some());
        assert!(detach_body(&mut world, entity).is_none());
        assert!(world.get::<&Transform2D>(entity).is_ok());
    }
}
