//! Rigid body state: mass, inertia, velocity, and the attached geometry.

use std::fmt;

use glam::Vec2;

use super::broadphase;
use super::collider::{Circle, Rectangle, ShapeKind};
use super::transform::Transform2D;
use super::PhysicsConfig;

/// Mass given to newly created shapes.
pub const DEFAULT_MASS: f32 = 1.0;
/// Friction given to newly created shapes.
pub const DEFAULT_FRICTION: f32 = 0.8;
/// Restitution given to newly created shapes.
pub const DEFAULT_RESTITUTION: f32 = 0.2;

/// A rigid body with circle or rectangle geometry.
///
/// An inverse mass of zero marks the body as immovable: it never
/// integrates, never receives impulses, and is never pushed apart by
/// positional correction.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    transform: Transform2D,
    kind: ShapeKind,
    velocity: Vec2,
    /// Radians per second.
    angular_velocity: f32,
    inv_mass: f32,
    inv_inertia: f32,
    friction: f32,
    restitution: f32,
    bound_radius: f32,
}

impl Shape {
    /// Create a circle with the default mass, friction, and restitution.
    pub fn circle(transform: Transform2D, radius: f32) -> Self {
        Self::from_kind(transform, ShapeKind::Circle(Circle::new(radius)))
    }

    /// Create a rectangle with the default mass, friction, and restitution.
    pub fn rectangle(transform: Transform2D, width: f32, height: f32) -> Self {
        let rect = Rectangle::new(width, height, &transform);
        Self::from_kind(transform, ShapeKind::Rectangle(rect))
    }

    fn from_kind(transform: Transform2D, kind: ShapeKind) -> Self {
        let mut shape = Self {
            transform,
            kind,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            inv_mass: 0.0,
            inv_inertia: 0.0,
            friction: DEFAULT_FRICTION,
            restitution: DEFAULT_RESTITUTION,
            bound_radius: kind.bound_radius(),
        };
        shape.set_mass(DEFAULT_MASS);
        shape
    }

    /// Builder form of [`Shape::set_mass`].
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.set_mass(mass);
        self
    }

    /// Builder form of [`Shape::set_friction`].
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.set_friction(friction);
        self
    }

    /// Builder form of [`Shape::set_restitution`].
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.set_restitution(restitution);
        self
    }

    /// Builder form of [`Shape::set_velocity`].
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.set_velocity(velocity);
        self
    }

    /// Set the mass. A mass of zero or less makes the body immovable.
    pub fn set_mass(&mut self, mass: f32) {
        self.inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        self.update_inertia();
    }

    fn update_inertia(&mut self) {
        self.inv_inertia = if self.inv_mass == 0.0 {
            0.0
        } else {
            let inertia = self.kind.inertia_factor() / self.inv_mass;
            if inertia > 0.0 {
                1.0 / inertia
            } else {
                0.0
            }
        };
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Mass, or zero for an immovable body.
    pub fn mass(&self) -> f32 {
        if self.inv_mass > 0.0 {
            1.0 / self.inv_mass
        } else {
            0.0
        }
    }

    #[inline]
    pub fn inv_inertia(&self) -> f32 {
        self.inv_inertia
    }

    /// Moment of inertia, or zero for an immovable body.
    pub fn inertia(&self) -> f32 {
        if self.inv_inertia > 0.0 {
            1.0 / self.inv_inertia
        } else {
            0.0
        }
    }

    #[inline]
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Set the friction coefficient, clamped to `[0, 1]`.
    pub fn set_friction(&mut self, friction: f32) {
        self.friction = friction.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Set the coefficient of restitution, clamped to `[0, 1]`.
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = restitution.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    #[inline]
    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_velocity = angular_velocity;
    }

    #[inline]
    pub fn bound_radius(&self) -> f32 {
        self.bound_radius
    }

    #[inline]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    #[inline]
    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.transform.position
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    /// Replace the whole pose, e.g. after game logic moved the owning entity.
    pub fn set_transform(&mut self, transform: Transform2D) {
        self.transform = transform;
        self.kind.update_geometry(&self.transform);
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
        self.kind.update_geometry(&self.transform);
    }

    pub fn set_rotation(&mut self, radians: f32) {
        self.transform.rotation = radians;
        self.kind.update_geometry(&self.transform);
    }

    pub fn rotate_by(&mut self, radians: f32) {
        self.set_rotation(self.transform.rotation + radians);
    }

    /// Nudge the position by `direction * scale`. Used by positional correction.
    pub fn adjust_position_by(&mut self, direction: Vec2, scale: f32) {
        self.transform.position += direction * scale;
        self.kind.update_geometry(&self.transform);
    }

    /// Acceleration this body receives from the system acceleration.
    #[inline]
    pub fn acceleration(&self, system_acceleration: Vec2) -> Vec2 {
        if self.is_static() {
            Vec2::ZERO
        } else {
            system_acceleration
        }
    }

    /// Semi-implicit Euler step: velocity first, then position and rotation.
    ///
    /// Immovable bodies are left untouched.
    pub fn integrate(&mut self, dt: f32, acceleration: Vec2) {
        if self.is_static() {
            return;
        }
        self.velocity += acceleration * dt;
        self.transform.position += self.velocity * dt;
        self.transform.rotation += self.angular_velocity * dt;
        self.kind.update_geometry(&self.transform);
    }

    /// Integrate one tick under `config`, honouring the motion toggle.
    pub fn update(&mut self, config: &PhysicsConfig, dt: f32) {
        if !config.has_motion() {
            return;
        }
        let acceleration = self.acceleration(config.system_acceleration());
        self.integrate(dt, acceleration);
    }

    /// Move by the current velocity without applying any acceleration.
    pub fn travel(&mut self, dt: f32) {
        self.transform.position += self.velocity * dt;
        self.kind.update_geometry(&self.transform);
    }

    /// Grow (or shrink, for negative `delta`) the shape.
    ///
    /// Circles change their radius; rectangles change width and height.
    /// Extents never drop below zero.
    pub fn inc_shape_size_by(&mut self, delta: f32) {
        match &mut self.kind {
            ShapeKind::Circle(circle) => {
                circle.radius = (circle.radius + delta).max(0.0);
            }
            ShapeKind::Rectangle(rect) => {
                let (width, height) = (rect.width() + delta, rect.height() + delta);
                rect.resize(width, height, &self.transform);
            }
        }
        self.bound_radius = self.kind.bound_radius();
        self.update_inertia();
    }

    /// Broadphase check against another shape's bounding circle.
    #[inline]
    pub fn bound_test(&self, other: &Shape) -> bool {
        broadphase::bounds_overlap(
            self.center(),
            self.bound_radius,
            other.center(),
            other.bound_radius,
        )
    }

    /// True when position, rotation, and velocities hold no NaN or infinity.
    pub fn is_finite(&self) -> bool {
        self.transform.position.is_finite()
            && self.transform.rotation.is_finite()
            && self.velocity.is_finite()
            && self.angular_velocity.is_finite()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} M={:.3} I={:.3} F={:.3} R={:.3}",
            self.kind.name(),
            self.mass(),
            self.inertia(),
            self.friction,
            self.restitution
        )
    }
}
