//! Input latching
//!
//! Host events flip flags here as they arrive; the simulation polls a
//! [`TickInput`] snapshot once per tick.

use glam::Vec2;

use crate::sim::TickInput;

/// A movement direction bound to a key or touch button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value to a direction (WASD or arrows)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "a" | "A" | "ArrowLeft" => Some(Direction::Left),
            "d" | "D" | "ArrowRight" => Some(Direction::Right),
            "w" | "W" | "ArrowUp" => Some(Direction::Up),
            "s" | "S" | "ArrowDown" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Current state of every input the simulation reads
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    aim: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_direction(&mut self, dir: Direction, pressed: bool) {
        match dir {
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
        }
    }

    /// Handle a key press. Returns true if the key is a movement key.
    pub fn key_down(&mut self, key: &str) -> bool {
        match Direction::from_key(key) {
            Some(dir) => {
                self.set_direction(dir, true);
                true
            }
            None => false,
        }
    }

    /// Handle a key release. Returns true if the key is a movement key.
    pub fn key_up(&mut self, key: &str) -> bool {
        match Direction::from_key(key) {
            Some(dir) => {
                self.set_direction(dir, false);
                true
            }
            None => false,
        }
    }

    /// Record the pointer/touch position in canvas pixels
    pub fn set_aim(&mut self, pos: Vec2) {
        self.aim = Some(pos);
    }

    pub fn aim(&self) -> Option<Vec2> {
        self.aim
    }

    /// Release every held direction (focus loss, restart)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
    }

    /// Snapshot for the next tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            aim: self.aim,
        }
    }
}
