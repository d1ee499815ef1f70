//! Difficulty ramp and spawn gate
//!
//! Two clocks drive difficulty:
//! - the ramp, fired by a wall-clock timer, shortens the spawn interval and
//!   grows the burst size (or resets both once the run is over)
//! - the spawn gate, accumulated per simulation tick, releases a burst of
//!   enemies whenever it reaches the current interval

use serde::Serialize;

use super::state::Mode;
use crate::tuning::Tuning;

/// Spawn cadence parameters for the current run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyState {
    /// Time between spawn bursts. Not clamped unless tuning sets a floor, so
    /// it may reach zero or below (a burst every tick).
    pub spawn_interval_ms: f64,
    /// Enemies per burst
    pub batch_size: u32,
    /// Time accumulated by the spawn gate since the last burst
    pub spawn_accum_ms: f64,
    /// Number of ramp steps applied this run
    pub ramps: u32,
}

impl DifficultyState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            spawn_interval_ms: tuning.initial_spawn_interval_ms,
            batch_size: tuning.initial_batch_size,
            spawn_accum_ms: tuning.spawn_accumulator_start_ms,
            ramps: 0,
        }
    }

    /// Back to the initial cadence
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Apply one ramp firing. Returns true if the cadence was reset because
    /// the run is over.
    pub fn ramp(&mut self, mode: Mode, tuning: &Tuning) -> bool {
        if mode == Mode::GameOver {
            self.spawn_interval_ms = tuning.initial_spawn_interval_ms;
            self.batch_size = tuning.initial_batch_size;
            self.ramps = 0;
            return true;
        }
        self.spawn_interval_ms -= tuning.ramp_interval_step_ms;
        if let Some(floor) = tuning.min_spawn_interval_ms {
            self.spawn_interval_ms = self.spawn_interval_ms.max(floor);
        }
        self.batch_size = self.batch_size.saturating_add(tuning.ramp_batch_step);
        self.ramps += 1;
        false
    }

    /// Feed the spawn gate. Returns the burst size when the accumulated time
    /// reaches the interval, resetting the accumulator.
    pub fn accumulate(&mut self, step_ms: f64) -> Option<u32> {
        self.spawn_accum_ms += step_ms;
        if self.spawn_accum_ms >= self.spawn_interval_ms {
            self.spawn_accum_ms = 0.0;
            Some(self.batch_size)
        } else {
            None
        }
    }
}
