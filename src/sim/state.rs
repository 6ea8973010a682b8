//! Game state and core simulation types

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::player::{Player, Transform2D};
use super::rect::Rect;
use super::schedule::Schedule;
use crate::config::Config;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play
    Running,
    /// Collision threshold reached; waiting for the restart acknowledgement
    Warning,
}

/// Things the host reacts to (haptics, dialogs, sounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32, y: f32 },
    ObstacleExited { id: u32 },
    /// First touch between the wheel and an obstacle (haptic impact)
    Collision { id: u32, count: u32 },
    /// Collision count reached the threshold; show the restart prompt
    ThresholdReached { count: u32 },
    /// In-flight obstacles removed by a restart
    ObstaclesCleared { count: usize },
    SessionReset,
    PlayerScaled { scale: f32 },
}

/// A horizontal bar sliding from the right edge past the left edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub spawn_tick: u64,
    /// Top-left corner at spawn time
    pub start: Vec2,
    /// Final x of the top-left corner
    pub end_x: f32,
    pub size: Vec2,
    pub crossing_ticks: u64,
}

impl Obstacle {
    /// Fraction of the crossing completed at `now`, None before the obstacle exists
    pub fn progress(&self, now: u64) -> Option<f32> {
        if now < self.spawn_tick || self.crossing_ticks == 0 {
            return None;
        }
        let elapsed = (now - self.spawn_tick) as f32;
        Some((elapsed / self.crossing_ticks as f32).min(1.0))
    }

    /// Interpolated frame at `now`
    pub fn bounds_at(&self, now: u64) -> Option<Rect> {
        let t = self.progress(now)?;
        let x = self.start.x + (self.end_x - self.start.x) * t;
        Some(Rect {
            origin: Vec2::new(x, self.start.y),
            size: self.size,
        })
    }

    pub fn has_exited(&self, now: u64) -> bool {
        now.saturating_sub(self.spawn_tick) >= self.crossing_ticks
    }
}

/// Collision count plus the ids already counted this session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounters {
    pub collision_count: u32,
    pub counted: BTreeSet<u32>,
}

impl SessionCounters {
    /// Record a first touch. Returns the new count, or None if `id` was already counted.
    pub fn record(&mut self, id: u32) -> Option<u32> {
        if !self.counted.insert(id) {
            return None;
        }
        self.collision_count += 1;
        Some(self.collision_count)
    }

    pub fn is_counted(&self, id: u32) -> bool {
        self.counted.contains(&id)
    }

    pub fn clear(&mut self) {
        self.collision_count = 0;
        self.counted.clear();
    }
}

/// Complete simulation state (deterministic for a given config and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// In-flight obstacles, ascending id (creation order)
    pub obstacles: Vec<Obstacle>,
    pub counters: SessionCounters,
    pub schedule: Schedule,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    pub fn new(config: Config) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(config.seed),
            time_ticks: 0,
            phase: GamePhase::Running,
            player: Player::new(config.surface_center(), config.player_size),
            obstacles: Vec::new(),
            counters: SessionCounters::default(),
            schedule: Schedule::new(&config),
            events: Vec::new(),
            next_id: 1,
            config,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn collision_count(&self) -> u32 {
        self.counters.collision_count
    }

    pub fn obstacle(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Render-facing view of the current tick
    pub fn snapshot(&self) -> Snapshot {
        let now = self.time_ticks;
        Snapshot {
            tick: now,
            phase: self.phase,
            player_transform: self.player.displayed(now),
            player_bounds: self.player.displayed_bounds(now),
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    bounds: o.bounds_at(now).unwrap_or(Rect::ZERO),
                })
                .collect(),
            collision_count: self.counters.collision_count,
        }
    }
}

/// An obstacle as the rendering surface should draw it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub bounds: Rect,
}

/// Serializable per-tick view for the rendering surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub player_transform: Transform2D,
    pub player_bounds: Rect,
    pub obstacles: Vec<ObstacleView>,
    pub collision_count: u32,
}
