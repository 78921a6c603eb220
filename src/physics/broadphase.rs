//! Broadphase collision detection using bounding circles.
//!
//! Every shape is enclosed by a circle around its centre. Two shapes can
//! only touch when their bounding circles do, so this test never rejects a
//! real contact; the narrowphase filters out the false positives.

use glam::Vec2;

use super::solver::RigidBodyAccess;

/// Test whether two bounding circles overlap. Touching counts as overlap.
#[inline]
pub fn bounds_overlap(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    center_a.distance_squared(center_b) <= reach * reach
}

/// Index pairs `(i, j)`, `i < j`, whose bounding circles overlap and where at
/// least one body can move. Entries without a rigid body are skipped.
pub fn find_pairs<E: RigidBodyAccess>(set: &[E]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();

    // O(n^2) brute force - sufficient for small numbers of bodies
    for (i, a) in set.iter().enumerate() {
        let Some(a) = a.rigid_body() else {
            continue;
        };
        for (j, b) in set.iter().enumerate().skip(i + 1) {
            let Some(b) = b.rigid_body() else {
                continue;
            };
            if a.is_static() && b.is_static() {
                continue;
            }
            if a.bound_test(b) {
                pairs.push((i, j));
            }
        }
    }

    pairs
}
