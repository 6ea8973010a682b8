//! Fixed-timestep driver
//!
//! Hosts call [`FixedStepRunner::advance`] once per frame with the real
//! frame delta; the runner turns it into whole simulation ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameState, TickInput, tick};

#[derive(Debug, Clone, Default)]
pub struct FixedStepRunner {
    accumulator: f32,
    /// One-shot input not yet consumed by a tick
    pending: TickInput,
}

impl FixedStepRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many ticks as `frame_dt` seconds allow. One-shot input
    /// (button presses, acknowledgement) is queued and applied on the next
    /// tick that runs, even if this frame is too short to run one.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, state: &mut GameState, input: &TickInput, frame_dt: f32) -> u32 {
        self.pending.merge(input);

        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            log::warn!("Ignoring non-finite frame delta {}", frame_dt);
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.pending);
            tick(state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::warn!(
                "Simulation falling behind, dropping {:.3}s",
                self.accumulator
            );
            self.accumulator = 0.0;
        }
        substeps
    }

    /// True if input is waiting for the next tick
    pub fn has_pending_input(&self) -> bool {
        !self.pending.is_empty()
    }
}
