//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Values are per-tick for
//! speeds and fractions of canvas width for sizes; the defaults reproduce the
//! classic feel. Tuning files are JSON and may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value: {0}")]
    Invalid(String),
}

/// How the spawn gate accumulates time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnClock {
    /// Add the real duration of each tick (frame-rate independent)
    #[default]
    Elapsed,
    /// Add a fixed 10 ms per tick regardless of its real duration
    FrameLocked,
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Pixels per tick along each held axis
    pub player_speed: f32,
    /// Player diameter as a fraction of canvas width
    pub player_size_ratio: f32,
    pub gun_width_ratio: f32,
    pub gun_length_ratio: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_size_ratio: f32,
    /// Milliseconds between shots while the fire control is held
    pub fire_period_ms: f64,

    // === Enemies ===
    pub enemy_speed: f32,
    pub enemy_size_ratio: f32,
    /// Distance outside the canvas edge where enemies appear
    pub spawn_margin: f32,
    pub kill_score: u64,

    // === Difficulty ===
    /// Wall-clock period of the difficulty ramp
    pub ramp_period_ms: f64,
    pub initial_spawn_interval_ms: f64,
    pub initial_batch_size: u32,
    pub ramp_interval_step_ms: f64,
    pub ramp_batch_step: u32,
    /// Spawn accumulator value at the start of a run. Anything at or above
    /// the initial interval yields a burst on the first tick.
    pub spawn_accumulator_start_ms: f64,
    pub spawn_clock: SpawnClock,
    /// Optional lower bound on the spawn interval. Unset means the ramp keeps
    /// shrinking the interval without limit.
    pub min_spawn_interval_ms: Option<f64>,

    // === Canvas ===
    /// Fraction of the viewport width given to the canvas
    pub viewport_fraction: f64,
    /// Height / width
    pub aspect_ratio: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            player_size_ratio: 0.05,
            gun_width_ratio: 0.01,
            gun_length_ratio: 0.03,

            bullet_speed: 10.0,
            bullet_size_ratio: 0.005,
            fire_period_ms: 200.0,

            enemy_speed: 0.75,
            enemy_size_ratio: 0.05,
            spawn_margin: 50.0,
            kill_score: 10,

            ramp_period_ms: 60.0 * 1000.0,
            initial_spawn_interval_ms: 5000.0,
            initial_batch_size: 3,
            ramp_interval_step_ms: 500.0,
            ramp_batch_step: 2,
            spawn_accumulator_start_ms: 8000.0,
            spawn_clock: SpawnClock::Elapsed,
            min_spawn_interval_ms: None,

            viewport_fraction: 0.70,
            aspect_ratio: 800.0 / 1200.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values that would make the simulation meaningless
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_speed", self.player_speed as f64),
            ("player_size_ratio", self.player_size_ratio as f64),
            ("gun_width_ratio", self.gun_width_ratio as f64),
            ("gun_length_ratio", self.gun_length_ratio as f64),
            ("bullet_speed", self.bullet_speed as f64),
            ("bullet_size_ratio", self.bullet_size_ratio as f64),
            ("fire_period_ms", self.fire_period_ms),
            ("enemy_speed", self.enemy_speed as f64),
            ("enemy_size_ratio", self.enemy_size_ratio as f64),
            ("ramp_period_ms", self.ramp_period_ms),
            ("viewport_fraction", self.viewport_fraction),
            ("aspect_ratio", self.aspect_ratio),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.viewport_fraction > 1.0 {
            return Err(TuningError::Invalid(format!(
                "viewport_fraction must be at most 1.0, got {}",
                self.viewport_fraction
            )));
        }
        if self.spawn_margin < 0.0 {
            return Err(TuningError::Invalid("spawn_margin must not be negative".into()));
        }
        Ok(())
    }

    /// Spawn-gate increment for one tick of `tick_ms` real milliseconds
    pub fn spawn_step_ms(&self, tick_ms: f64) -> f64 {
        match self.spawn_clock {
            SpawnClock::Elapsed => tick_ms,
            SpawnClock::FrameLocked => crate::consts::FRAME_LOCKED_STEP_MS,
        }
    }
}

/// Playfield dimensions in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size the canvas from the browser viewport width
    pub fn from_viewport(viewport_width: f64, tuning: &Tuning) -> Self {
        let width = (tuning.viewport_fraction * viewport_width).floor();
        let height = (width * tuning.aspect_ratio).floor();
        Self::new(width as f32, height as f32)
    }

    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if `p` lies inside `[0, width] x [0, height]`
    pub fn contains(&self, p: glam::Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Entity sizes derived once from the canvas width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityDims {
    pub player_size: f32,
    pub gun_width: f32,
    pub gun_length: f32,
    pub bullet_size: f32,
    pub enemy_size: f32,
}

impl EntityDims {
    pub fn from_canvas(canvas: &Canvas, tuning: &Tuning) -> Self {
        let w = canvas.width;
        Self {
            player_size: w * tuning.player_size_ratio,
            gun_width: w * tuning.gun_width_ratio,
            gun_length: w * tuning.gun_length_ratio,
            bullet_size: w * tuning.bullet_size_ratio,
            enemy_size: w * tuning.enemy_size_ratio,
        }
    }
}
