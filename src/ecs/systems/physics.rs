//! Rigid body simulation over ECS entities.

use crate::ecs::components::{Shape, Transform2D};
use crate::physics::contact::CollisionInfo;
use crate::physics::solver::{process_set, RigidBodyAccess};
use crate::physics::PhysicsConfig;

/// A shape detached from its entity for the duration of a tick.
struct PhysicsBody {
    entity: hecs::Entity,
    shape: Shape,
}

impl RigidBodyAccess for PhysicsBody {
    #[inline]
    fn rigid_body(&self) -> Option<&Shape> {
        Some(&self.shape)
    }

    #[inline]
    fn rigid_body_mut(&mut self) -> Option<&mut Shape> {
        Some(&mut self.shape)
    }
}

/// Advance every entity with a Transform2D and a Shape by one tick of `dt`.
///
/// Phase 1: Pull each Transform2D into its Shape and integrate.
/// Phase 2: Relax contacts across all bodies.
/// Phase 3: Push shape state and pose back onto the entities.
///
/// Returns the number of bodies simulated.
pub fn physics_system(
    world: &mut hecs::World,
    config: &PhysicsConfig,
    dt: f32,
    infos: Option<&mut Vec<CollisionInfo>>,
) -> usize {
    // Phase 1: Collect bodies first to avoid borrow conflicts while solving.
    let mut bodies: Vec<PhysicsBody> = world
        .query_mut::<(&Transform2D, &Shape)>()
        .into_iter()
        .map(|(entity, (transform, shape))| {
            let mut shape = shape.clone();
            if shape.transform() != transform {
                shape.set_transform(*transform);
            }
            shape.update(config, dt);
            PhysicsBody { entity, shape }
        })
        .collect();

    // Phase 2
    let collided = process_set(&mut bodies, config, infos);
    tracing::trace!(bodies = bodies.len(), collided, "physics system tick");

    // Phase 3: Only position and rotation flow back; size and depth belong
    // to the entity.
    let count = bodies.len();
    for PhysicsBody { entity, shape } in bodies {
        if let Ok(mut transform) = world.get::<&mut Transform2D>(entity) {
            transform.position = shape.center();
            transform.rotation = shape.rotation();
        }
        if let Ok(mut stored) = world.get::<&mut Shape>(entity) {
            *stored = shape;
        }
    }

    count
}
