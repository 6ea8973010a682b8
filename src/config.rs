//! Game configuration
//!
//! One immutable value handed to the simulation at construction. Loadable
//! from JSON; any field left out falls back to the defaults in `consts`.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};
use crate::secs_to_ticks;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Surface ===
    pub surface_width: f32,
    pub surface_height: f32,

    // === Player ===
    /// Unscaled edge length of the square wheel
    pub player_size: f32,
    pub scale_up_factor: f32,
    pub scale_down_factor: f32,
    /// Duration of a scale step animation (seconds)
    pub scale_animation_secs: f32,
    /// Smallest on-screen wheel width the scale controller allows
    pub min_wheel_width: f32,
    /// Largest on-screen wheel width the scale controller allows
    pub max_wheel_width: f32,
    /// Duration of one rotation step (seconds)
    pub rotation_secs: f32,
    /// Angle committed per rotation step (radians)
    pub rotation_step: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub spawn_interval_secs: f32,
    /// Time for an obstacle to travel from the right edge past the left edge
    pub crossing_secs: f32,

    // === Collisions ===
    pub poll_interval_secs: f32,
    pub collision_threshold: u32,
    /// Player transform reset animation after restart (seconds)
    pub reset_animation_secs: f32,
    /// Freeze the whole simulation while the restart prompt is up
    pub pause_during_warning: bool,

    /// Spawner RNG seed
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,

            player_size: PLAYER_SIZE,
            scale_up_factor: SCALE_UP_FACTOR,
            scale_down_factor: SCALE_DOWN_FACTOR,
            scale_animation_secs: SCALE_ANIMATION_SECS,
            min_wheel_width: MIN_WHEEL_WIDTH,
            // The wheel may grow up to the full surface width
            max_wheel_width: SURFACE_WIDTH,
            rotation_secs: ROTATION_SECS,
            rotation_step: ROTATION_STEP,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            crossing_secs: CROSSING_SECS,

            poll_interval_secs: POLL_INTERVAL_SECS,
            collision_threshold: COLLISION_THRESHOLD,
            reset_animation_secs: RESET_ANIMATION_SECS,
            pause_during_warning: false,

            seed: 0x5eed_d0d6e,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config for a surface of the given size; max wheel width tracks
    /// the width but never drops below the unscaled wheel
    pub fn for_surface(width: f32, height: f32) -> Self {
        let defaults = Self::default();
        Self {
            surface_width: width,
            surface_height: height,
            max_wheel_width: width.max(defaults.player_size),
            ..defaults
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("surface_width", self.surface_width),
            ("surface_height", self.surface_height),
            ("player_size", self.player_size),
            ("scale_up_factor", self.scale_up_factor),
            ("scale_down_factor", self.scale_down_factor),
            ("scale_animation_secs", self.scale_animation_secs),
            ("min_wheel_width", self.min_wheel_width),
            ("max_wheel_width", self.max_wheel_width),
            ("rotation_secs", self.rotation_secs),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("spawn_interval_secs", self.spawn_interval_secs),
            ("crossing_secs", self.crossing_secs),
            ("poll_interval_secs", self.poll_interval_secs),
            ("reset_animation_secs", self.reset_animation_secs),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be a positive finite number, got {value}"),
                ));
            }
        }

        if !self.rotation_step.is_finite() {
            return Err(ConfigError::invalid("rotation_step", "must be finite"));
        }
        if self.collision_threshold == 0 {
            return Err(ConfigError::invalid("collision_threshold", "must be at least 1"));
        }
        if self.min_wheel_width > self.max_wheel_width {
            return Err(ConfigError::invalid(
                "min_wheel_width",
                format!(
                    "{} exceeds max_wheel_width {}",
                    self.min_wheel_width, self.max_wheel_width
                ),
            ));
        }
        // The wheel starts at scale 1.0, which must lie inside the scale bounds
        if self.player_size < self.min_wheel_width || self.player_size > self.max_wheel_width {
            return Err(ConfigError::invalid(
                "player_size",
                format!(
                    "{} outside wheel width bounds [{}, {}]",
                    self.player_size, self.min_wheel_width, self.max_wheel_width
                ),
            ));
        }
        Ok(())
    }

    pub fn surface_size(&self) -> Vec2 {
        Vec2::new(self.surface_width, self.surface_height)
    }

    pub fn surface_center(&self) -> Vec2 {
        self.surface_size() / 2.0
    }

    pub fn obstacle_size(&self) -> Vec2 {
        Vec2::new(self.obstacle_width, self.obstacle_height)
    }

    /// Scale factor bounds derived from the wheel width limits
    pub fn scale_bounds(&self) -> (f32, f32) {
        (
            self.min_wheel_width / self.player_size,
            self.max_wheel_width / self.player_size,
        )
    }

    /// Highest spawn y that keeps the obstacle clear of the bottom edge
    pub fn max_spawn_y(&self) -> f32 {
        (self.surface_height - self.obstacle_height * 2.0).max(0.0)
    }

    pub fn spawn_interval_ticks(&self) -> u64 {
        secs_to_ticks(self.spawn_interval_secs)
    }

    pub fn poll_interval_ticks(&self) -> u64 {
        secs_to_ticks(self.poll_interval_secs)
    }

    pub fn crossing_ticks(&self) -> u64 {
        secs_to_ticks(self.crossing_secs)
    }

    pub fn rotation_ticks(&self) -> u64 {
        secs_to_ticks(self.rotation_secs)
    }

    pub fn scale_animation_ticks(&self) -> u64 {
        secs_to_ticks(self.scale_animation_secs)
    }

    pub fn reset_animation_ticks(&self) -> u64 {
        secs_to_ticks(self.reset_animation_secs)
    }
}
