//! CPU-based 2D physics with rigid body simulation and collision detection.
//!
//! # Architecture
//!
//! The physics pipeline runs in a fixed timestep loop:
//!
//! 1. Integrate every movable shape (semi-implicit Euler)
//! 2. Broadphase rejection (bounding circles)
//! 3. Narrowphase collision detection (circle/rectangle pair tests)
//! 4. Positional correction
//! 5. Impulse resolution
//!
//! Steps 2-5 run pair by pair and are repeated `relaxation_count` times per
//! tick.

pub mod broadphase;
pub mod collider;
pub mod contact;
pub mod debug;
pub mod narrowphase;
pub mod resolver;
pub mod rigid_body;
pub mod solver;
pub mod transform;

use glam::Vec2;

use self::contact::CollisionInfo;
use self::rigid_body::Shape;

/// Lengths at or below this are treated as zero when normalizing.
pub const EPSILON: f32 = 1e-6;

/// Default acceleration applied to every movable shape.
pub const DEFAULT_SYSTEM_ACCELERATION: Vec2 = Vec2::new(0.0, -20.0);
/// Default fraction of the penetration removed by positional correction.
pub const DEFAULT_CORRECTION_RATE: f32 = 0.8;
/// Default number of relaxation passes per tick.
pub const DEFAULT_RELAXATION_COUNT: u32 = 15;

/// `acos` with its argument clamped to `[-1, 1]`, so rounding drift in a
/// dot product of unit vectors never yields NaN.
#[inline]
pub fn clamped_acos(cos_theta: f32) -> f32 {
    cos_theta.clamp(-1.0, 1.0).acos()
}

/// Errors reported for invalid physics settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("relaxation count must be at least 1")]
    ZeroRelaxationCount,
    #[error("system acceleration must be finite, got {0}")]
    NonFiniteAcceleration(Vec2),
    #[error("correction rate must be in (0, 1], got {0}")]
    InvalidCorrectionRate(f32),
    #[error("fixed timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),
    #[error("max substeps must be at least 1")]
    ZeroSubsteps,
}

/// Configuration for the physics simulation.
///
/// Every simulation owns its own copy, so independent worlds can run side
/// by side with different settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    system_acceleration: Vec2,
    positional_correction: bool,
    correction_rate: f32,
    relaxation_count: u32,
    has_motion: bool,
    fixed_timestep: f64,
    max_substeps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            system_acceleration: DEFAULT_SYSTEM_ACCELERATION,
            positional_correction: true,
            correction_rate: DEFAULT_CORRECTION_RATE,
            relaxation_count: DEFAULT_RELAXATION_COUNT,
            has_motion: true,
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
        }
    }
}

impl PhysicsConfig {
    /// Check every setting, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.relaxation_count == 0 {
            return Err(PhysicsError::ZeroRelaxationCount);
        }
        if !self.system_acceleration.is_finite() {
            return Err(PhysicsError::NonFiniteAcceleration(self.system_acceleration));
        }
        if !(self.correction_rate > 0.0 && self.correction_rate <= 1.0) {
            return Err(PhysicsError::InvalidCorrectionRate(self.correction_rate));
        }
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(PhysicsError::InvalidTimestep(self.fixed_timestep));
        }
        if self.max_substeps == 0 {
            return Err(PhysicsError::ZeroSubsteps);
        }
        Ok(())
    }

    /// Acceleration applied to movable shapes. Default: (0, -20).
    #[inline]
    pub fn system_acceleration(&self) -> Vec2 {
        self.system_acceleration
    }

    pub fn set_system_acceleration(&mut self, acceleration: Vec2) -> Result<(), PhysicsError> {
        if !acceleration.is_finite() {
            return Err(PhysicsError::NonFiniteAcceleration(acceleration));
        }
        tracing::debug!(%acceleration, "system acceleration changed");
        self.system_acceleration = acceleration;
        Ok(())
    }

    /// Whether contacts are pushed apart directly. Default: true.
    #[inline]
    pub fn positional_correction(&self) -> bool {
        self.positional_correction
    }

    pub fn set_positional_correction(&mut self, enabled: bool) {
        tracing::debug!(enabled, "positional correction toggled");
        self.positional_correction = enabled;
    }

    pub fn toggle_positional_correction(&mut self) {
        self.set_positional_correction(!self.positional_correction);
    }

    /// Fraction of the penetration removed per correction. Default: 0.8.
    #[inline]
    pub fn correction_rate(&self) -> f32 {
        self.correction_rate
    }

    pub fn set_correction_rate(&mut self, rate: f32) -> Result<(), PhysicsError> {
        if !(rate > 0.0 && rate <= 1.0) {
            return Err(PhysicsError::InvalidCorrectionRate(rate));
        }
        self.correction_rate = rate;
        Ok(())
    }

    /// Relaxation passes per tick. Default: 15.
    #[inline]
    pub fn relaxation_count(&self) -> u32 {
        self.relaxation_count
    }

    pub fn set_relaxation_count(&mut self, count: u32) -> Result<(), PhysicsError> {
        if count == 0 {
            return Err(PhysicsError::ZeroRelaxationCount);
        }
        tracing::debug!(count, "relaxation count changed");
        self.relaxation_count = count;
        Ok(())
    }

    /// Add `delta` passes, never dropping below one.
    pub fn inc_relaxation_count(&mut self, delta: i32) {
        let count = (i64::from(self.relaxation_count) + i64::from(delta)).clamp(1, i64::from(u32::MAX));
        self.relaxation_count = count as u32;
    }

    /// Whether shapes integrate motion at all. Default: true.
    #[inline]
    pub fn has_motion(&self) -> bool {
        self.has_motion
    }

    pub fn set_has_motion(&mut self, enabled: bool) {
        tracing::debug!(enabled, "motion toggled");
        self.has_motion = enabled;
    }

    pub fn toggle_has_motion(&mut self) {
        self.set_has_motion(!self.has_motion);
    }

    /// Fixed timestep in seconds. Default: 1/60.
    #[inline]
    pub fn fixed_timestep(&self) -> f64 {
        self.fixed_timestep
    }

    pub fn set_fixed_timestep(&mut self, seconds: f64) -> Result<(), PhysicsError> {
        if !(seconds.is_finite() && seconds > 0.0) {
            return Err(PhysicsError::InvalidTimestep(seconds));
        }
        self.fixed_timestep = seconds;
        Ok(())
    }

    /// Maximum ticks run by one [`PhysicsWorld::step`]. Default: 4.
    #[inline]
    pub fn max_substeps(&self) -> u32 {
        self.max_substeps
    }

    pub fn set_max_substeps(&mut self, substeps: u32) -> Result<(), PhysicsError> {
        if substeps == 0 {
            return Err(PhysicsError::ZeroSubsteps);
        }
        self.max_substeps = substeps;
        Ok(())
    }
}

/// A self-contained simulation: configuration, bodies, and the fixed
/// timestep accumulator.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    accumulator: f64,
    shapes: Vec<Shape>,
    collect_contacts: bool,
    contacts: Vec<CollisionInfo>,
}

impl PhysicsWorld {
    /// Create a new physics world with the given configuration.
    pub fn new(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        tracing::debug!(?config, "physics world created");
        Ok(Self {
            config,
            accumulator: 0.0,
            shapes: Vec::new(),
            collect_contacts: false,
            contacts: Vec::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Mutable settings. The setters keep them valid.
    #[inline]
    pub fn config_mut(&mut self) -> &mut PhysicsConfig {
        &mut self.config
    }

    /// Add a body and return its index.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Remove a body. Later indices shift down by one.
    pub fn remove_shape(&mut self, index: usize) -> Option<Shape> {
        (index < self.shapes.len()).then(|| self.shapes.remove(index))
    }

    #[inline]
    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    #[inline]
    pub fn shape_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    /// Keep the contacts of the latest tick for visualization.
    pub fn set_collect_contacts(&mut self, enabled: bool) {
        self.collect_contacts = enabled;
        if !enabled {
            self.contacts = Vec::new();
        }
    }

    /// Contacts recorded during the latest tick, one per pair per
    /// relaxation pass. Empty unless collection is enabled.
    #[inline]
    pub fn contacts(&self) -> &[CollisionInfo] {
        &self.contacts
    }

    /// Index pairs whose bounding circles currently overlap.
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        broadphase::find_pairs(&self.shapes)
    }

    /// Step the simulation forward by `delta_time` seconds.
    ///
    /// Runs as many whole fixed ticks as the accumulated time allows, up to
    /// `max_substeps`. Returns the number of ticks run. Negative or
    /// non-finite frame times are ignored.
    pub fn step(&mut self, delta_time: f64) -> u32 {
        if !(delta_time.is_finite() && delta_time >= 0.0) {
            tracing::warn!(delta_time, "ignoring invalid frame time");
            return 0;
        }

        let fixed_timestep = self.config.fixed_timestep;
        let max_substeps = self.config.max_substeps;
        self.accumulator += delta_time;

        let mut substeps = 0u32;
        while self.accumulator >= fixed_timestep && substeps < max_substeps {
            self.tick(fixed_timestep as f32);
            self.accumulator -= fixed_timestep;
            substeps += 1;
        }

        // Clamp accumulator to avoid spiral of death
        if self.accumulator > fixed_timestep * max_substeps as f64 {
            tracing::warn!(
                dropped_seconds = self.accumulator,
                "physics fell behind, dropping accumulated time"
            );
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Run exactly one tick of `dt` seconds: integrate, then relax contacts.
    pub fn tick(&mut self, dt: f32) {
        for shape in &mut self.shapes {
            shape.update(&self.config, dt);
        }

        self.contacts.clear();
        let infos = self.collect_contacts.then_some(&mut self.contacts);
        solver::process_set(&mut self.shapes, &self.config, infos);
    }
}
