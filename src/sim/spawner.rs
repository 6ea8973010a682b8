//! Obstacle spawning and retirement

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle};

/// Spawn one obstacle at the right edge at a random height. Returns its id.
pub fn spawn_obstacle(state: &mut GameState) -> u32 {
    let max_y = state.config.max_spawn_y();
    let y = if max_y > 0.0 {
        state.rng.random_range(0.0..=max_y)
    } else {
        0.0
    };

    let id = state.next_entity_id();
    let size = state.config.obstacle_size();
    let obstacle = Obstacle {
        id,
        spawn_tick: state.time_ticks,
        start: Vec2::new(state.config.surface_width, y),
        end_x: -size.x,
        size,
        crossing_ticks: state.config.crossing_ticks(),
    };
    state.obstacles.push(obstacle);
    state.push_event(GameEvent::ObstacleSpawned { id, y });
    log::debug!("Spawned obstacle {} at y={:.1} (tick {})", id, y, state.time_ticks);
    id
}

/// Remove every obstacle whose crossing has completed, by identity
pub fn retire_exited(state: &mut GameState) {
    let now = state.time_ticks;
    let exited: Vec<u32> = state
        .obstacles
        .iter()
        .filter(|o| o.has_exited(now))
        .map(|o| o.id)
        .collect();
    if exited.is_empty() {
        return;
    }

    state.obstacles.retain(|o| !o.has_exited(now));
    for id in exited {
        log::debug!("Obstacle {} exited (tick {})", id, now);
        state.push_event(GameEvent::ObstacleExited { id });
    }
}

/// Remove all in-flight obstacles. Returns how many were removed.
pub fn clear_obstacles(state: &mut GameState) -> usize {
    let count = state.obstacles.len();
    state.obstacles.clear();
    count
}
