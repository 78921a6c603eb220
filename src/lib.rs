//! Rein 2D physics core
//!
//! Rigid-body simulation for circles and rectangles with impulse-based
//! collision response.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **physics** - Shapes, collision detection, the resolver and the
//!    relaxation solver loop, driven by a fixed-timestep [`PhysicsWorld`]
//! 2. **ecs** - hecs integration (feature = "ecs")

pub mod physics;

#[cfg(feature = "ecs")]
pub mod ecs;

pub use physics::collider::{Circle, Rectangle, ShapeKind};
pub use physics::contact::CollisionInfo;
pub use physics::debug::{contact_lines, ContactVertex};
pub use physics::narrowphase::collision_test;
pub use physics::rigid_body::Shape;
pub use physics::solver::{
    collide_shapes, process_obj_to_set, process_set, process_set_to_set, RigidBodyAccess,
};
pub use physics::transform::Transform2D;
pub use physics::{PhysicsConfig, PhysicsError, PhysicsWorld};

#[cfg(feature = "ecs")]
pub use ecs::physics_system;

// Re-export glam for convenience
pub use glam;
