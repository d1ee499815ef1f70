//! Idle/demo mode - a simple pilot that plays the game
//!
//! Aims at the closest enemy and backs away from it, drifting toward the
//! canvas center when nothing is near.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;

/// Distance at which the pilot starts evading
const EVADE_RADIUS: f32 = 220.0;
/// Dead zone so the pilot does not jitter around its goal
const SETTLE: f32 = 4.0;

/// Produce this tick's input from the current state
pub fn steer(state: &GameState) -> TickInput {
    let player = state.player.pos;
    let nearest = state.enemies.iter().min_by(|a, b| {
        a.pos
            .distance_squared(player)
            .partial_cmp(&b.pos.distance_squared(player))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let Some(enemy) = nearest else {
        return drift_to(player, state.canvas.center(), None);
    };

    let goal = if enemy.pos.distance(player) < EVADE_RADIUS {
        // Flee, biased back toward the center so we don't pin ourselves in a corner
        let away = (player - enemy.pos).normalize_or_zero();
        let home = (state.canvas.center() - player).normalize_or_zero() * 0.5;
        player + (away + home) * EVADE_RADIUS
    } else {
        state.canvas.center()
    };
    drift_to(player, goal, Some(enemy.pos))
}

fn drift_to(from: Vec2, goal: Vec2, aim: Option<Vec2>) -> TickInput {
    let delta = goal - from;
    TickInput {
        left: delta.x < -SETTLE,
        right: delta.x > SETTLE,
        up: delta.y < -SETTLE,
        down: delta.y > SETTLE,
        aim,
    }
}
