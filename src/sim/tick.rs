//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically.

use super::collision::detect_collisions;
use super::spawner::{clear_obstacles, retire_exited, spawn_obstacle};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Plus button presses this tick
    pub scale_up: u32,
    /// Minus button presses this tick
    pub scale_down: u32,
    /// RESTART pressed on the warning prompt
    pub acknowledge: bool,
}

impl TickInput {
    /// Fold another frame's presses into this pending input
    pub fn merge(&mut self, other: &TickInput) {
        self.scale_up += other.scale_up;
        self.scale_down += other.scale_down;
        self.acknowledge |= other.acknowledge;
    }

    pub fn is_empty(&self) -> bool {
        self.scale_up == 0 && self.scale_down == 0 && !self.acknowledge
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.acknowledge {
        acknowledge_warning(state);
    }

    for _ in 0..input.scale_up {
        scale_up(state);
    }
    for _ in 0..input.scale_down {
        scale_down(state);
    }

    // Frozen while the prompt is up, if configured
    if state.phase == GamePhase::Warning && state.config.pause_during_warning {
        return;
    }

    let now = state.time_ticks;

    if state.schedule.spawn.poll(now) {
        spawn_obstacle(state);
    }

    if state.schedule.rotation.poll(now) {
        let step = state.config.rotation_step;
        let duration = state.config.rotation_ticks();
        state.player.rotate_step(step, now, duration);
    }

    retire_exited(state);

    if state.schedule.poll.poll(now) {
        detect_collisions(state);
    }

    state.time_ticks += 1;
}

/// Plus button: grow the wheel by the configured factor
pub fn scale_up(state: &mut GameState) -> f32 {
    let factor = state.config.scale_up_factor;
    apply_scale(state, factor)
}

/// Minus button: shrink the wheel by the configured factor
pub fn scale_down(state: &mut GameState) -> f32 {
    let factor = state.config.scale_down_factor;
    apply_scale(state, factor)
}

fn apply_scale(state: &mut GameState, factor: f32) -> f32 {
    let bounds = state.config.scale_bounds();
    let duration = state.config.scale_animation_ticks();
    let scale = state
        .player
        .scale_by(factor, bounds, state.time_ticks, duration);
    state.push_event(GameEvent::PlayerScaled { scale });
    scale
}

/// RESTART on the warning prompt: reset the session. Ignored outside the warning phase.
pub fn acknowledge_warning(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Warning {
        return false;
    }
    reset_session(state);
    true
}

/// Restore the wheel, drop all obstacles, restart rotation and clear the counters
pub fn reset_session(state: &mut GameState) {
    let now = state.time_ticks;
    let duration = state.config.reset_animation_ticks();
    state.player.reset_transform(now, duration);

    let cleared = clear_obstacles(state);
    state.push_event(GameEvent::ObstaclesCleared { count: cleared });

    state.schedule.rotation.restart(now);
    state.counters.clear();
    state.phase = GamePhase::Running;

    log::info!("Session reset at tick {} ({} obstacles cleared)", now, cleared);
    state.push_event(GameEvent::SessionReset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::state::Obstacle;
    use glam::Vec2;
    use proptest::prelude::*;

    fn run(state: &mut GameState, ticks: u64) {
        let input = TickInput::default();
        for _ in 0..ticks {
            tick(state, &input);
        }
    }

    /// Place an obstacle that sits on the wheel from `spawn_tick` for `ticks` ticks
    fn overlap_for(state: &mut GameState, spawn_tick: u64, ticks: u64) -> u32 {
        let id = state.next_entity_id();
        let center = state.player.center;
        state.obstacles.push(Obstacle {
            id,
            spawn_tick,
            start: center - Vec2::new(50.0, 10.0),
            end_x: center.x - 50.0,
            size: Vec2::new(100.0, 20.0),
            crossing_ticks: ticks,
        });
        id
    }

    /// State whose spawner never fires
    fn quiet_state() -> GameState {
        let mut state = GameState::new(Config::new());
        state.schedule.spawn.next_due = u64::MAX;
        state
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = GameState::new(Config::new());
        // t = 0..=6 s
        run(&mut state, 721);
        let spawned: Vec<u32> = state
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ObstacleSpawned { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        // t = 0, 2, 4, 6
        assert_eq!(spawned.len(), 4);
    }

    #[test]
    fn test_first_obstacle_removed_at_five_seconds() {
        let mut state = GameState::new(Config::new());
        run(&mut state, 1);
        let first = state.obstacles[0].id;
        assert_eq!(state.obstacles[0].spawn_tick, 0);

        // Through t = 5 s minus one tick: still in flight
        run(&mut state, 599);
        assert!(state.obstacle(first).is_some());

        // Tick 600 (t = 5 s) retires it
        run(&mut state, 1);
        assert!(state.obstacle(first).is_none());
        assert!(state.events.contains(&GameEvent::ObstacleExited { id: first }));
    }

    #[test]
    fn test_one_obstacle_overlapping_ten_polls_counts_once() {
        let mut state = quiet_state();
        // Ten polls at 12 ticks each
        overlap_for(&mut state, 0, 120);
        run(&mut state, 120);
        let polls = 120 / state.config.poll_interval_ticks();
        assert_eq!(polls, 10);
        assert_eq!(state.collision_count(), 1);
    }

    #[test]
    fn test_five_obstacles_trigger_gate_once() {
        let mut state = quiet_state();
        let poll = state.config.poll_interval_ticks();
        for i in 0..5 {
            // Each obstacle is alive for exactly one poll
            overlap_for(&mut state, i * poll, 1);
            run(&mut state, poll);
            assert_eq!(state.collision_count(), (i + 1) as u32);
        }
        assert_eq!(state.phase, GamePhase::Warning);
        // Keep polling with more overlaps: no further gate
        let now = state.time_ticks;
        overlap_for(&mut state, now, 50);
        run(&mut state, 50);
        let gates = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ThresholdReached { .. }))
            .count();
        assert_eq!(gates, 1);
        assert_eq!(state.collision_count(), 6);
    }

    #[test]
    fn test_gate_fires_again_after_restart() {
        let mut state = quiet_state();
        let ack = TickInput {
            acknowledge: true,
            ..Default::default()
        };
        let poll = state.config.poll_interval_ticks();

        for session in 1..=2 {
            for _ in 0..5 {
                let now = state.time_ticks;
                overlap_for(&mut state, now, 1);
                run(&mut state, poll);
            }
            assert_eq!(state.phase, GamePhase::Warning);
            assert_eq!(state.collision_count(), 5);
            let gates = state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::ThresholdReached { .. }))
                .count();
            assert_eq!(gates, session);

            tick(&mut state, &ack);
            assert_eq!(state.phase, GamePhase::Running);
            assert_eq!(state.collision_count(), 0);
            // Realign to the poll grid
            let wait = state.schedule.poll.next_due - state.time_ticks;
            run(&mut state, wait);
        }
    }

    #[test]
    fn test_scale_up_never_shrinks_on_narrow_surface() {
        let config = Config::for_surface(80.0, 600.0);
        assert!(config.validate().is_ok());
        let mut state = GameState::new(config);
        let scale = scale_up(&mut state);
        assert!(scale >= 1.0, "scale_up shrank the wheel to {scale}");
    }

    #[test]
    fn test_acknowledge_resets_session() {
        let mut state = quiet_state();
        scale_up(&mut state);
        for _ in 0..5 {
            overlap_for(&mut state, 0, 12);
        }
        run(&mut state, 1);
        assert_eq!(state.phase, GamePhase::Warning);
        assert!(!state.obstacles.is_empty());

        let input = TickInput {
            acknowledge: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.collision_count(), 0);
        assert!(state.counters.counted.is_empty());
        assert!(state.obstacles.is_empty());
        assert!(state.player.committed().scale == 1.0);
        assert!(state.events.contains(&GameEvent::SessionReset));
    }

    #[test]
    fn test_reset_restarts_rotation() {
        let mut state = quiet_state();
        run(&mut state, 30);
        state.phase = GamePhase::Warning;
        assert!(acknowledge_warning(&mut state));
        assert!(state.player.committed().is_identity());
        // The next tick commits a fresh quarter turn from zero
        run(&mut state, 1);
        let step = state.config.rotation_step;
        assert!((state.player.committed().rotation - step).abs() < 1e-6);
    }

    #[test]
    fn test_acknowledge_ignored_while_running() {
        let mut state = quiet_state();
        overlap_for(&mut state, 0, 100);
        run(&mut state, 1);
        assert_eq!(state.collision_count(), 1);
        assert!(!acknowledge_warning(&mut state));
        assert_eq!(state.collision_count(), 1);
    }

    #[test]
    fn test_scale_up_three_times() {
        let mut state = quiet_state();
        let input = TickInput {
            scale_up: 3,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.player.committed().scale - 1.331).abs() < 1e-4);
    }

    #[test]
    fn test_scale_down_then_up() {
        let mut state = quiet_state();
        scale_down(&mut state);
        let scale = scale_up(&mut state);
        assert!((scale - 0.99).abs() < 1e-5);
    }

    #[test]
    fn test_simulation_keeps_running_during_warning_by_default() {
        let mut state = GameState::new(Config::new());
        state.phase = GamePhase::Warning;
        run(&mut state, 241);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.time_ticks, 241);
    }

    #[test]
    fn test_pause_during_warning() {
        let config = Config {
            pause_during_warning: true,
            ..Config::new()
        };
        let mut state = GameState::new(config);
        state.phase = GamePhase::Warning;
        run(&mut state, 500);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.time_ticks, 0);

        let input = TickInput {
            acknowledge: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(Config::new());
        let mut state2 = GameState::new(Config::new());

        let inputs = [
            TickInput {
                scale_up: 1,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                scale_down: 2,
                ..Default::default()
            },
        ];

        for i in 0..3000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.events, state2.events);
        assert_eq!(state1.snapshot(), state2.snapshot());
    }

    proptest! {
        #[test]
        fn prop_counter_matches_distinct_touches(
            seed in any::<u64>(),
            ticks in 1u64..4000,
        ) {
            let config = Config {
                seed,
                ..Config::new()
            };
            let mut state = GameState::new(config);
            // Bigger wheel, more hits
            scale_up(&mut state);
            scale_up(&mut state);
            run(&mut state, ticks);

            let mut ids: Vec<u32> = state
                .events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::Collision { id, .. } => Some(*id),
                    _ => None,
                })
                .collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            // No obstacle is ever counted twice
            prop_assert_eq!(ids.len(), total);
            prop_assert_eq!(state.collision_count() as usize, total);
        }
    }
}
