//! Contact response: positional correction and impulse resolution.

use glam::Vec2;

use super::contact::CollisionInfo;
use super::rigid_body::Shape;
use super::{clamped_acos, PhysicsConfig, EPSILON};

/// Push the shapes apart along the contact normal, each in proportion to its
/// inverse mass.
pub fn positional_correction(a: &mut Shape, b: &mut Shape, info: &CollisionInfo, rate: f32) {
    let inv_mass_a = a.inv_mass();
    let inv_mass_b = b.inv_mass();
    let inv_mass_sum = inv_mass_a + inv_mass_b;
    if inv_mass_sum <= 0.0 {
        return;
    }

    let amount = info.depth / inv_mass_sum * rate;
    let correction = info.normal * amount;
    a.adjust_position_by(correction, -inv_mass_a);
    b.adjust_position_by(correction, inv_mass_b);
}

/// Velocity of the material point at offset `r` from the centre.
#[inline]
fn point_velocity(linear: Vec2, angular: f32, r: Vec2) -> Vec2 {
    linear + r.perp() * angular
}

/// Apply `impulse` at offsets `r_a`/`r_b`: subtracted from A, added to B.
fn apply_impulse(a: &mut Shape, b: &mut Shape, impulse: Vec2, r_a: Vec2, r_b: Vec2) {
    a.set_velocity(a.velocity() - impulse * a.inv_mass());
    b.set_velocity(b.velocity() + impulse * b.inv_mass());
    a.set_angular_velocity(a.angular_velocity() - r_a.perp_dot(impulse) * a.inv_inertia());
    b.set_angular_velocity(b.angular_velocity() + r_b.perp_dot(impulse) * b.inv_inertia());
}

/// Resolve one contact whose normal points from `a` to `b`.
///
/// Applies positional correction when enabled in `config`, then normal and
/// friction impulses. Contacts that are already separating receive no
/// impulse. Returns whether an impulse was applied.
pub fn resolve_collision(
    a: &mut Shape,
    b: &mut Shape,
    info: &CollisionInfo,
    config: &PhysicsConfig,
) -> bool {
    if a.is_static() && b.is_static() {
        return false;
    }

    if config.positional_correction() {
        positional_correction(a, b, info, config.correction_rate());
    }

    let normal = info.normal;
    let point = info.contact_point(a.inv_mass(), b.inv_mass());
    let r_a = point - a.center();
    let r_b = point - b.center();

    let vel_a = point_velocity(a.velocity(), a.angular_velocity(), r_a);
    let vel_b = point_velocity(b.velocity(), b.angular_velocity(), r_b);
    let relative_velocity = vel_b - vel_a;
    let normal_velocity = relative_velocity.dot(normal);

    if normal_velocity > 0.0 {
        return false;
    }

    let restitution = (a.restitution() + b.restitution()) * 0.5;
    let friction = (a.friction() + b.friction()) * 0.5;

    // Normal impulse
    let r_a_cross_n = r_a.perp_dot(normal);
    let r_b_cross_n = r_b.perp_dot(normal);
    let inv_mass_n = a.inv_mass()
        + b.inv_mass()
        + r_a_cross_n * r_a_cross_n * a.inv_inertia()
        + r_b_cross_n * r_b_cross_n * b.inv_inertia();

    let j_normal = -(1.0 + restitution) * normal_velocity / inv_mass_n;
    apply_impulse(a, b, normal * j_normal, r_a, r_b);

    tracing::trace!(
        j_normal,
        depth = info.depth,
        impact_angle = clamped_acos(-relative_velocity.normalize_or_zero().dot(normal)),
        "normal impulse"
    );

    // Friction impulse, opposing the sliding direction.
    let tangent_velocity = relative_velocity - normal * normal_velocity;
    let tangent_len = tangent_velocity.length();
    if tangent_len > EPSILON {
        let tangent = -tangent_velocity / tangent_len;

        let r_a_cross_t = r_a.perp_dot(tangent);
        let r_b_cross_t = r_b.perp_dot(tangent);
        let inv_mass_t = a.inv_mass()
            + b.inv_mass()
            + r_a_cross_t * r_a_cross_t * a.inv_inertia()
            + r_b_cross_t * r_b_cross_t * b.inv_inertia();

        let j_tangent =
            (-(1.0 + restitution) * relative_velocity.dot(tangent) * friction / inv_mass_t)
                .min(j_normal);
        apply_impulse(a, b, tangent * j_tangent, r_a, r_b);
    }

    debug_assert!(
        a.is_finite() && b.is_finite(),
        "non-finite state after resolving contact: {a:?} / {b:?}"
    );

    true
}
