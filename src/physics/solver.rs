//! Relaxation solver loop.
//!
//! Contacts are resolved one pair at a time. Repeating the whole pass
//! `relaxation_count` times per tick lets impulses propagate through stacks
//! and resting contacts, approximating a simultaneous solution.

use super::contact::CollisionInfo;
use super::narrowphase::collision_test;
use super::resolver::resolve_collision;
use super::rigid_body::Shape;
use super::PhysicsConfig;

/// Access to the rigid body of a game object.
///
/// Objects without a body return `None` and are skipped by the solver.
pub trait RigidBodyAccess {
    fn rigid_body(&self) -> Option<&Shape>;
    fn rigid_body_mut(&mut self) -> Option<&mut Shape>;
}

impl RigidBodyAccess for Shape {
    #[inline]
    fn rigid_body(&self) -> Option<&Shape> {
        Some(self)
    }

    #[inline]
    fn rigid_body_mut(&mut self) -> Option<&mut Shape> {
        Some(self)
    }
}

impl RigidBodyAccess for Option<Shape> {
    #[inline]
    fn rigid_body(&self) -> Option<&Shape> {
        self.as_ref()
    }

    #[inline]
    fn rigid_body_mut(&mut self) -> Option<&mut Shape> {
        self.as_mut()
    }
}

/// Detect and resolve a single pair.
///
/// Runs the bound test, then the narrowphase, orients the normal from `a`
/// towards `b`, and resolves the contact. The contact is appended to
/// `infos` when a list is given. Returns whether the shapes collided.
pub fn collide_shapes(
    a: &mut Shape,
    b: &mut Shape,
    config: &PhysicsConfig,
    infos: Option<&mut Vec<CollisionInfo>>,
) -> bool {
    if a.is_static() && b.is_static() {
        return false;
    }
    if !a.bound_test(b) {
        return false;
    }

    let Some(mut info) = collision_test(a, b) else {
        return false;
    };

    // The centre-to-centre direction decides which way the normal faces.
    let a_to_b = b.center() - a.center();
    if a_to_b.dot(info.normal) < 0.0 {
        info.change_direction();
    }

    resolve_collision(a, b, &info, config);

    if let Some(infos) = infos {
        infos.push(info);
    }
    true
}

/// Collide `obj` against every body in `set`, `relaxation_count` times.
pub fn process_obj_to_set<O, E>(
    obj: &mut O,
    set: &mut [E],
    config: &PhysicsConfig,
    mut infos: Option<&mut Vec<CollisionInfo>>,
) -> bool
where
    O: RigidBodyAccess + ?Sized,
    E: RigidBodyAccess,
{
    let Some(body) = obj.rigid_body_mut() else {
        return false;
    };

    let mut collided = false;
    for _ in 0..config.relaxation_count() {
        for other in set.iter_mut() {
            if let Some(other) = other.rigid_body_mut() {
                collided |= collide_shapes(body, other, config, infos.as_deref_mut());
            }
        }
    }
    collided
}

/// Collide every body in `set_a` against every body in `set_b`,
/// `relaxation_count` times.
pub fn process_set_to_set<A, B>(
    set_a: &mut [A],
    set_b: &mut [B],
    config: &PhysicsConfig,
    mut infos: Option<&mut Vec<CollisionInfo>>,
) -> bool
where
    A: RigidBodyAccess,
    B: RigidBodyAccess,
{
    let mut collided = false;
    for _ in 0..config.relaxation_count() {
        for a in set_a.iter_mut() {
            let Some(a) = a.rigid_body_mut() else {
                continue;
            };
            for b in set_b.iter_mut() {
                if let Some(b) = b.rigid_body_mut() {
                    collided |= collide_shapes(a, b, config, infos.as_deref_mut());
                }
            }
        }
    }
    collided
}

/// Collide every pair `i < j` within `set`, `relaxation_count` times.
pub fn process_set<E: RigidBodyAccess>(
    set: &mut [E],
    config: &PhysicsConfig,
    mut infos: Option<&mut Vec<CollisionInfo>>,
) -> bool {
    let mut collided = false;
    for _ in 0..config.relaxation_count() {
        for i in 0..set.len() {
            let (head, tail) = set.split_at_mut(i + 1);
            let Some(a) = head[i].rigid_body_mut() else {
                continue;
            };
            for b in tail.iter_mut() {
                if let Some(b) = b.rigid_body_mut() {
                    collided |= collide_shapes(a, b, config, infos.as_deref_mut());
                }
            }
        }
    }
    collided
}
