//! Wheel Dodge - a steering wheel dodging sliding obstacles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawner, collisions, threshold gate, player)
//! - `config`: Immutable game configuration, loadable from JSON
//! - `runner`: Fixed-timestep driver for hosts with variable frame times
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod runner;
pub mod sim;

pub use config::Config;
pub use error::{ConfigError, Result};
pub use runner::FixedStepRunner;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz keeps every period a whole tick count)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the runner accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Surface defaults (points, portrait phone)
    pub const SURFACE_WIDTH: f32 = 390.0;
    pub const SURFACE_HEIGHT: f32 = 844.0;

    /// Player (steering wheel) defaults
    pub const PLAYER_SIZE: f32 = 100.0;
    pub const SCALE_UP_FACTOR: f32 = 1.1;
    pub const SCALE_DOWN_FACTOR: f32 = 0.9;
    pub const SCALE_ANIMATION_SECS: f32 = 0.15;
    pub const MIN_WHEEL_WIDTH: f32 = 10.0;

    /// Continuous rotation: a quarter turn per second
    pub const ROTATION_SECS: f32 = 1.0;
    pub const ROTATION_STEP: f32 = std::f32::consts::FRAC_PI_2;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 100.0;
    pub const OBSTACLE_HEIGHT: f32 = 20.0;
    pub const SPAWN_INTERVAL_SECS: f32 = 2.0;
    pub const CROSSING_SECS: f32 = 5.0;

    /// Collision polling period
    pub const POLL_INTERVAL_SECS: f32 = 0.1;

    /// Collisions before the restart prompt
    pub const COLLISION_THRESHOLD: u32 = 5;
    /// Player transform reset animation after restart
    pub const RESET_ANIMATION_SECS: f32 = 0.3;
}

/// Convert a duration in seconds to whole simulation ticks (at least one)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    ((secs / consts::SIM_DT).round() as u64).max(1)
}

/// Convert a tick count back to seconds
#[inline]
pub fn ticks_to_secs(ticks: u64) -> f32 {
    ticks as f32 * consts::SIM_DT
}
