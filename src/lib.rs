//! Swarm Gunner - a single-screen arcade survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, difficulty, spawning)
//! - `game`: Frame loop and run-mode state machine driving the simulation
//! - `platform`: Input latching and host frame clock
//! - `renderer`: Read-only rendering interface plus headless/canvas backends
//! - `tuning`: Data-driven game balance and canvas sizing

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{Game, RunSummary};
pub use tuning::{Canvas, EntityDims, SpawnClock, Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Fixed timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest host frame delta fed to the simulation accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Spawn-gate increment per tick when the gate is frame-locked
    pub const FRAME_LOCKED_STEP_MS: f64 = 10.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle (radians) of the ray from `from` toward `to`.
///
/// Returns `None` when the two points coincide; callers keep their previous
/// heading in that case.
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> Option<f32> {
    let d = to - from;
    if d.length_squared() <= f32::EPSILON {
        None
    } else {
        Some(d.y.atan2(d.x))
    }
}

/// Unit vector for a heading angle
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Move `pos` toward `target` by at most `speed`.
///
/// Snaps onto the target when it is within one step, so homing never
/// overshoots; a zero-length offset leaves `pos` unchanged.
#[inline]
pub fn step_toward(pos: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let offset = target - pos;
    let dist = offset.length();
    if dist <= f32::EPSILON {
        return pos;
    }
    if dist <= speed {
        return target;
    }
    pos + offset / dist * speed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_to_zero_distance() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(angle_to(p, p), None);
    }

    #[test]
    fn test_angle_to_axes() {
        let origin = Vec2::ZERO;
        let right = angle_to(origin, Vec2::new(10.0, 0.0)).unwrap();
        let down = angle_to(origin, Vec2::new(0.0, 10.0)).unwrap();
        assert!(right.abs() < 1e-6);
        assert!((down - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_step_toward_moves_by_speed() {
        let next = step_toward(Vec2::ZERO, Vec2::new(10.0, 0.0), 0.75);
        assert!((next.x - 0.75).abs() < 1e-6);
        assert_eq!(next.y, 0.0);
    }

    #[test]
    fn test_step_toward_snaps_without_overshoot() {
        let target = Vec2::new(1.0, 1.0);
        let next = step_toward(Vec2::new(0.5, 1.0), target, 0.75);
        assert_eq!(next, target);
    }

    #[test]
    fn test_step_toward_zero_distance_is_noop() {
        let p = Vec2::new(7.0, -2.0);
        assert_eq!(step_toward(p, p, 5.0), p);
    }

    #[test]
    fn test_direction_from_angle_is_unit() {
        for i in 0..16 {
            let a = i as f32 * 0.4;
            assert!((direction_from_angle(a).length() - 1.0).abs() < 1e-5);
        }
    }
}
