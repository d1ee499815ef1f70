//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Mark-and-compact removal, never removal during iteration
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{HitReport, circles_overlap, player_caught, resolve_bullet_hits};
pub use difficulty::DifficultyState;
pub use spawner::{Edge, perimeter_position, spawn_burst, spawn_enemy};
pub use state::{Bullet, Enemy, GameEvent, GameState, Gun, Mode, Player};
pub use tick::{TickInput, aim_gun, fire_bullet, tick};
pub use timer::IntervalTimer;
