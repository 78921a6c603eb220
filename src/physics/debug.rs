//! Contact visualization data.
//!
//! Turns collected contacts into line-list vertices that can be copied
//! straight into a GPU vertex buffer.

use bytemuck::{Pod, Zeroable};

use super::contact::CollisionInfo;

/// Colour of the segment from `start` (on B) to `end` (on A).
pub const CONTACT_COLOR: [f32; 4] = [1.0, 0.2, 0.2, 1.0];

/// Vertex with 2D position and color.
/// Used for contact line rendering.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ContactVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl ContactVertex {
    pub const fn new(position: [f32; 2], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Two vertices per contact, `start` then `end`, for a line-list topology.
pub fn contact_lines(infos: &[CollisionInfo]) -> Vec<ContactVertex> {
    let mut vertices = Vec::with_capacity(infos.len() * 2);
    for info in infos {
        vertices.push(ContactVertex::new(info.start.to_array(), CONTACT_COLOR));
        vertices.push(ContactVertex::new(info.end.to_array(), CONTACT_COLOR));
    }
    vertices
}
