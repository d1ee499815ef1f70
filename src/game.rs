//! Frame loop and run-mode state machine
//!
//! [`Game`] owns the [`GameState`] plus the host-facing clocks: the
//! wall-clock difficulty ramp, the fire-control repeat timer and the
//! fixed-timestep accumulator. Hosts call [`Game::frame`] once per display
//! frame with the elapsed wall time and forward lifecycle controls.
//!
//! Within a frame the ramp timer runs first, then the fire timer, then the
//! simulation ticks.

use serde::Serialize;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT_MS};
use crate::platform::InputState;
use crate::sim::{GameEvent, GameState, IntervalTimer, Mode, aim_gun, autopilot, fire_bullet, tick};
use crate::tuning::{Canvas, Tuning};

/// End-of-session statistics
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub score: u64,
    pub kills: u64,
    pub peak_enemies: usize,
    pub mode: Mode,
    pub spawn_interval_ms: f64,
    pub batch_size: u32,
    pub ramps: u32,
}

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    pub input: InputState,
    ramp_timer: IntervalTimer,
    fire_timer: IntervalTimer,
    accumulator_ms: f64,
    autopilot: bool,
    peak_enemies: usize,
}

impl Game {
    pub fn new(canvas: Canvas, tuning: Tuning, seed: u64) -> Self {
        let mut ramp_timer = IntervalTimer::new(tuning.ramp_period_ms);
        ramp_timer.start();
        let fire_timer = IntervalTimer::new(tuning.fire_period_ms);
        log::info!(
            "New game on {}x{} canvas with seed {}",
            canvas.width,
            canvas.height,
            seed
        );
        Self {
            state: GameState::new(canvas, tuning, seed),
            input: InputState::new(),
            ramp_timer,
            fire_timer,
            accumulator_ms: 0.0,
            autopilot: false,
            peak_enemies: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn is_running(&self) -> bool {
        self.state.mode == Mode::Running
    }

    pub fn is_firing(&self) -> bool {
        self.fire_timer.is_running()
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Advance wall-clock timers by `dt_ms` and run the simulation ticks that
    /// fit. Returns the number of ticks run.
    pub fn frame(&mut self, dt_ms: f64) -> u32 {
        let dt_ms = dt_ms.max(0.0);

        // --- RAMP ---
        for _ in 0..self.ramp_timer.advance(dt_ms) {
            let state = &mut self.state;
            if state.difficulty.ramp(state.mode, &state.tuning) {
                log::info!("Difficulty reset (run over)");
                state.events.push(GameEvent::DifficultyReset);
            } else {
                log::info!(
                    "Difficulty ramp {}: interval {} ms, batch {}",
                    state.difficulty.ramps,
                    state.difficulty.spawn_interval_ms,
                    state.difficulty.batch_size
                );
                state.events.push(GameEvent::DifficultyRamped {
                    spawn_interval_ms: state.difficulty.spawn_interval_ms,
                    batch_size: state.difficulty.batch_size,
                });
            }
        }

        // --- FIRE CONTROL ---
        for _ in 0..self.fire_timer.advance(dt_ms) {
            self.shoot();
        }

        // --- SIMULATION ---
        if !self.is_running() {
            self.accumulator_ms = 0.0;
            return 0;
        }
        self.accumulator_ms += dt_ms.min(MAX_FRAME_DT as f64 * 1000.0);

        let mut substeps = 0;
        while self.accumulator_ms >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            let input = if self.autopilot {
                autopilot::steer(&self.state)
            } else {
                self.input.snapshot()
            };
            tick(&mut self.state, &input);
            self.accumulator_ms -= SIM_DT_MS;
            substeps += 1;
            self.peak_enemies = self.peak_enemies.max(self.state.enemies.len());

            if !self.is_running() {
                self.accumulator_ms = 0.0;
                break;
            }
        }
        substeps
    }

    /// Fire control pressed: shoot now, then every fire period until released
    pub fn press_fire(&mut self) {
        if self.fire_timer.is_running() {
            return;
        }
        self.fire_timer.start();
        self.shoot();
    }

    /// Fire control released. Safe to call when not firing.
    pub fn release_fire(&mut self) {
        self.fire_timer.cancel();
    }

    /// One shot along the current aim; ignored unless the run is live
    fn shoot(&mut self) {
        if !self.is_running() {
            return;
        }
        let aim = if self.autopilot {
            autopilot::steer(&self.state).aim
        } else {
            self.input.aim()
        };
        aim_gun(&mut self.state, aim);
        fire_bullet(&mut self.state);
    }

    /// Running <-> Paused. Has no effect once the run is over.
    pub fn toggle_pause(&mut self) {
        self.state.mode = match self.state.mode {
            Mode::Running => {
                log::info!("Paused at tick {}", self.state.time_ticks);
                Mode::Paused
            }
            Mode::Paused => {
                log::info!("Resumed at tick {}", self.state.time_ticks);
                self.accumulator_ms = 0.0;
                Mode::Running
            }
            Mode::GameOver => Mode::GameOver,
        };
    }

    /// Start a new run. Only valid from GameOver; returns whether it happened.
    pub fn restart(&mut self) -> bool {
        if self.state.mode != Mode::GameOver {
            return false;
        }
        log::info!("Restarting (previous score {})", self.state.score);
        self.state.reset_run();
        self.ramp_timer.start();
        self.fire_timer.cancel();
        self.input.release_all();
        self.accumulator_ms = 0.0;
        self.peak_enemies = 0;
        if self.autopilot {
            self.press_fire();
        }
        true
    }

    /// Toggle the demo pilot. It holds the trigger while active.
    pub fn set_autopilot(&mut self, on: bool) {
        if self.autopilot == on {
            return;
        }
        self.autopilot = on;
        log::info!("Autopilot: {}", on);
        if on {
            self.press_fire();
        } else {
            self.release_fire();
        }
    }

    /// Take pending events for audio/HUD
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.state.seed,
            ticks: self.state.time_ticks,
            score: self.state.score,
            kills: self.state.kills,
            peak_enemies: self.peak_enemies,
            mode: self.state.mode,
            spawn_interval_ms: self.state.difficulty.spawn_interval_ms,
            batch_size: self.state.difficulty.batch_size,
            ramps: self.state.difficulty.ramps,
        }
    }
}
