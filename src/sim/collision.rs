//! Collision detection between the wheel and in-flight obstacles
//!
//! Runs on the poll task, not every tick. Only the first touch of each
//! obstacle counts; the threshold gate fires once per crossing.

use super::rect::Rect;
use super::state::{GameEvent, GamePhase, GameState, Obstacle};

/// Ids of obstacles (in creation order) whose frame at `now` overlaps `player`
pub fn overlapping_obstacles<'a>(
    player: Rect,
    obstacles: &'a [Obstacle],
    now: u64,
) -> impl Iterator<Item = u32> + 'a {
    obstacles.iter().filter_map(move |o| {
        // Frame unavailable this tick: treat as no collision
        let bounds = o.bounds_at(now).unwrap_or(Rect::ZERO);
        player.intersects(&bounds).then_some(o.id)
    })
}

/// Test the wheel against every obstacle and count new touches.
/// Returns the number of newly counted collisions.
pub fn detect_collisions(state: &mut GameState) -> u32 {
    let now = state.time_ticks;
    let player = state.player.bounds();
    let touching: Vec<u32> = overlapping_obstacles(player, &state.obstacles, now)
        .filter(|id| !state.counters.is_counted(*id))
        .collect();

    log::trace!(
        "Collision poll at tick {}: {} obstacles, {} new touches",
        now,
        state.obstacles.len(),
        touching.len()
    );

    let mut new_hits = 0;
    for id in touching {
        let Some(count) = state.counters.record(id) else {
            continue;
        };
        new_hits += 1;
        log::debug!("Collision with obstacle {} (count {})", id, count);
        state.push_event(GameEvent::Collision { id, count });

        if count >= state.config.collision_threshold {
            trigger_gate(state, count);
        }
    }
    new_hits
}

/// Enter the warning phase; no-op if the prompt is already up
fn trigger_gate(state: &mut GameState, count: u32) {
    if state.phase == GamePhase::Warning {
        return;
    }
    state.phase = GamePhase::Warning;
    log::info!("Collision threshold reached ({}), awaiting restart", count);
    state.push_event(GameEvent::ThresholdReached { count });
}
