//! Wheel Dodge entry point
//!
//! Headless host: drives the simulation with simulated 60 Hz frames, plays
//! the haptic and dialog roles through the log, and prints the final
//! snapshot as JSON. Optional first argument: path to a JSON config.

use wheel_dodge::{Config, ticks_to_secs};
use wheel_dodge::runner::FixedStepRunner;
use wheel_dodge::sim::{GameEvent, GamePhase, GameState, TickInput};

/// Simulated frame length (seconds)
const FRAME_DT: f32 = 1.0 / 60.0;
/// How long the demo session runs (seconds)
const SESSION_SECS: f32 = 60.0;
/// Delay before the scripted user taps RESTART (frames)
const ACK_DELAY_FRAMES: u32 = 60;

/// Host holding the simulation and the pending one-shot input
struct Game {
    state: GameState,
    runner: FixedStepRunner,
    input: TickInput,
    /// Frames left until the scripted RESTART tap
    prompt_frames: Option<u32>,
    frame: u32,
    restarts: u32,
}

impl Game {
    fn new(config: Config) -> Self {
        Self {
            state: GameState::new(config),
            runner: FixedStepRunner::new(),
            input: TickInput::default(),
            prompt_frames: None,
            frame: 0,
            restarts: 0,
        }
    }

    /// Scripted user: alternate plus and minus taps every couple of seconds
    fn script_input(&mut self) {
        match self.frame % 240 {
            0 => self.input.scale_up += 1,
            120 => self.input.scale_down += 1,
            _ => {}
        }

        if let Some(frames) = self.prompt_frames.as_mut() {
            if *frames == 0 {
                log::info!("User tapped RESTART");
                self.input.acknowledge = true;
                self.prompt_frames = None;
            } else {
                *frames -= 1;
            }
        }
    }

    fn update(&mut self) {
        self.script_input();
        let input = std::mem::take(&mut self.input);
        self.runner.advance(&mut self.state, &input, FRAME_DT);
        self.frame += 1;

        for event in self.state.drain_events() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Collision { id, count } => {
                log::info!("Haptic: heavy impact (obstacle {}, count {})", id, count);
            }
            GameEvent::ThresholdReached { count } => {
                log::warn!("Warning: Need restart the screen. ({} collisions) [RESTART]", count);
                self.prompt_frames = Some(ACK_DELAY_FRAMES);
            }
            GameEvent::SessionReset => {
                self.restarts += 1;
            }
            GameEvent::ObstacleSpawned { .. }
            | GameEvent::ObstacleExited { .. }
            | GameEvent::ObstaclesCleared { .. }
            | GameEvent::PlayerScaled { .. } => {
                log::debug!("{:?}", event);
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Wheel Dodge (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    log::info!("Game initialized with seed: {}", config.seed);

    let mut game = Game::new(config);
    let frames = (SESSION_SECS / FRAME_DT) as u32;
    for _ in 0..frames {
        game.update();
    }

    let snapshot = game.state.snapshot();
    log::info!(
        "Session over after {} ticks ({:.1}s): {} restarts, {} collisions pending, phase {:?}",
        snapshot.tick,
        ticks_to_secs(snapshot.tick),
        game.restarts,
        snapshot.collision_count,
        snapshot.phase
    );
    if snapshot.phase == GamePhase::Warning {
        log::info!("Restart prompt still showing");
    }

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
