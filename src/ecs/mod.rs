//! Entity Component System integration with hecs.
//!
//! Entities carrying both a [`Transform2D`](crate::Transform2D) and a
//! [`Shape`](crate::Shape) are simulated by [`physics_system`].

pub mod bridge;
pub mod components;
pub mod systems;

pub use systems::physics_system;

pub mod prelude {
    pub use super::bridge::*;
    pub use super::components::*;
    pub use super::systems::physics_system;
}
