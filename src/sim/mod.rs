//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod player;
pub mod rect;
pub mod schedule;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{detect_collisions, overlapping_obstacles};
pub use player::{Player, Transform2D, Tween};
pub use rect::Rect;
pub use schedule::{RepeatingTask, Schedule};
pub use spawner::{clear_obstacles, retire_exited, spawn_obstacle};
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, ObstacleView, SessionCounters, Snapshot,
};
pub use tick::{TickInput, acknowledge_warning, reset_session, scale_down, scale_up, tick};
