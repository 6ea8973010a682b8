//! Central timing facility
//!
//! Every recurring behaviour (spawning, collision polling, rotation) is a
//! repeating task keyed on the simulation tick counter. Tasks fire on their
//! first due tick and then once per period.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A task that fires every `period` ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatingTask {
    pub period: u64,
    pub next_due: u64,
}

impl RepeatingTask {
    /// Task whose first firing is at `start`
    pub fn starting_at(start: u64, period: u64) -> Self {
        Self {
            period: period.max(1),
            next_due: start,
        }
    }

    /// Returns true (and advances) if the task fires on tick `now`
    pub fn poll(&mut self, now: u64) -> bool {
        if now < self.next_due {
            return false;
        }
        // Skip firings missed while frozen rather than bursting
        let missed = (now - self.next_due) / self.period;
        self.next_due += (missed + 1) * self.period;
        true
    }

    /// Restart so the next firing is at `now`
    pub fn restart(&mut self, now: u64) {
        self.next_due = now;
    }
}

/// The simulation's recurring tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub spawn: RepeatingTask,
    pub poll: RepeatingTask,
    pub rotation: RepeatingTask,
}

impl Schedule {
    /// All tasks first fire on tick 0, so a wheel already touching a
    /// fresh obstacle is caught on the very first poll
    pub fn new(config: &Config) -> Self {
        Self {
            spawn: RepeatingTask::starting_at(0, config.spawn_interval_ticks()),
            poll: RepeatingTask::starting_at(0, config.poll_interval_ticks()),
            rotation: RepeatingTask::starting_at(0, config.rotation_ticks()),
        }
    }
}
