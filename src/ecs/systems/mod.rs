//! ECS systems (physics simulation).

pub mod physics;

pub use physics::physics_system;
