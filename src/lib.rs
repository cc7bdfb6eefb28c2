//! Agent Core - a single controllable agent's real-time state machine
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (locomotion, health/resource regulation,
//!   invulnerability, defeat, timed display transitions)
//! - `settings`: Data-driven agent tuning
//! - `error`: Configuration and setup errors
//! - `headless`: Logging collaborators and a seeded demo pilot for the binary

pub mod error;
pub mod headless;
pub mod settings;
pub mod sim;

pub use error::{AgentError, ConfigError};
pub use settings::{AgentConfig, SprintRule};

use glam::{Quat, Vec3};

/// Simulation and tuning constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Gravitational acceleration (units/s²), scaled by the gravity multiplier
    pub const GRAVITY: f32 = 9.81;

    /// Locomotion defaults
    pub const GRAVITY_MULTIPLIER: f32 = 3.0;
    pub const WALK_SPEED: f32 = 5.0;
    pub const INITIAL_JUMP_SPEED: f32 = 10.0;
    /// Degrees per second per unit of mouse delta
    pub const ROTATIONAL_SPEED_DEG: f32 = 360.0;
    pub const SPRINT_MULTIPLIER: f32 = 2.0;

    /// Health defaults
    pub const MAX_HEALTH: u32 = 5;
    pub const INVULNERABILITY_SECS: f32 = 1.5;
    pub const HAZARD_DAMAGE: u32 = 1;

    /// Resource bar: below this the bar turns to the warning color, above it shooting is allowed
    pub const RESOURCE_LOW_THRESHOLD: f32 = 0.4;
    pub const SHOOT_COST: f32 = 0.4;
    pub const REGEN_AMOUNT: f32 = 0.05;
    pub const REGEN_INTERVAL_SECS: f32 = 2.5;
    pub const RESOURCE_TRANSITION_SECS: f32 = 0.5;

    /// Insufficient-resource flash: alert/warning half-steps, repeated per cycle
    pub const FLASH_HALF_STEP_SECS: f32 = 0.2;
    pub const FLASH_CYCLES: u8 = 2;

    /// Body tint transition duration
    pub const TINT_TRANSITION_SECS: f32 = 1.0;
    /// Shoot particle color spread (± per RGB channel)
    pub const SHOOT_COLOR_SPREAD: f32 = 0.2;

    /// Undrained agent events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;
}

/// Clamp to the normalized range [0, 1]
#[inline]
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Rotation about the up axis for a yaw angle (radians)
#[inline]
pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(yaw)
}

/// Rotate a local-space vector into world space by yaw
#[inline]
pub fn local_to_world(yaw: f32, local: Vec3) -> Vec3 {
    yaw_rotation(yaw) * local
}
