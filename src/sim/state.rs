//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one owned [`GameState`]; the
//! tick, spawner and difficulty controller receive it explicitly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::DifficultyState;
use crate::tuning::{Canvas, EntityDims, Tuning};

/// Coarse run state gating whether ticks execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Mode {
    /// Simulation advances every tick
    Running,
    /// Suspended until the pause toggle is pressed again
    Paused,
    /// Run ended; only a restart leaves this state
    GameOver,
}

/// The player's avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Diameter in pixels
    pub size: f32,
    /// Pixels per tick along each held axis
    pub speed: f32,
}

impl Player {
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// The gun drawn at the player's rim
#[derive(Debug, Clone)]
pub struct Gun {
    /// Heading in radians (screen space, +y down)
    pub angle: f32,
    pub width: f32,
    pub length: f32,
}

/// A player projectile
#[derive(Debug, Clone)]
pub struct Bullet {
    /// Sequence number shared with enemies; only used to tell entities apart in traces
    pub id: u32,
    pub pos: Vec2,
    /// Unit direction captured from the gun angle at fire time
    pub dir: Vec2,
    pub speed: f32,
    pub size: f32,
    /// Cleared when the bullet leaves the canvas or hits an enemy
    pub visible: bool,
}

/// A homing enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Sequence number for trace logging (see [`GameState::next_entity_id`])
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Cleared when a bullet destroys the enemy
    pub alive: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, size: f32, speed: f32) -> Self {
        Self {
            id,
            pos,
            size,
            speed,
            alive: true,
        }
    }

    /// Advance one tick toward `target`
    pub fn home_on(&mut self, target: Vec2) {
        self.pos = crate::step_toward(self.pos, target, self.speed);
    }
}

/// Things that happened during a tick or timer callback, drained by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BulletFired,
    EnemyKilled { pos: Vec2 },
    PlayerCaught,
    BurstSpawned { count: u32 },
    DifficultyRamped { spawn_interval_ms: f64, batch_size: u32 },
    DifficultyReset,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub canvas: Canvas,
    pub dims: EntityDims,
    pub mode: Mode,
    /// Non-negative, +kill_score per enemy destroyed
    pub score: u64,
    pub kills: u64,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    pub player: Player,
    pub gun: Gun,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub difficulty: DifficultyState,
    /// Pending events for the host (audio, HUD)
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state on the given canvas
    pub fn new(canvas: Canvas, tuning: Tuning, seed: u64) -> Self {
        let dims = EntityDims::from_canvas(&canvas, &tuning);
        let difficulty = DifficultyState::new(&tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player {
                pos: canvas.center(),
                size: dims.player_size,
                speed: tuning.player_speed,
            },
            gun: Gun {
                angle: 0.0,
                width: dims.gun_width,
                length: dims.gun_length,
            },
            tuning,
            canvas,
            dims,
            mode: Mode::Running,
            score: 0,
            kills: 0,
            time_ticks: 0,
            bullets: Vec::new(),
            enemies: Vec::new(),
            difficulty,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Clear the run: score, enemies, bullets, player position and difficulty.
    ///
    /// The RNG keeps its stream so successive runs differ.
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.kills = 0;
        self.time_ticks = 0;
        self.enemies.clear();
        self.bullets.clear();
        self.player.pos = self.canvas.center();
        self.difficulty.reset(&self.tuning);
        self.mode = Mode::Running;
        self.events.push(GameEvent::DifficultyReset);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
