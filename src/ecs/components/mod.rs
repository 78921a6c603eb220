//! ECS components.
//!
//! The physics types double as components: the entity's [`Transform2D`] is
//! the authoritative pose, and its [`Shape`] carries the body state.

pub use crate::physics::rigid_body::Shape;
pub use crate::physics::transform::Transform2D;
