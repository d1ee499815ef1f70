//! Circle collision tests and hit resolution
//!
//! Hits are resolved mark-and-compact: a scan marks bullets and enemies as
//! spent, then each collection is filtered once. Nothing is removed while a
//! collection is being iterated.

use glam::Vec2;

use super::state::{Bullet, Enemy, Player};

/// True if two circles given by center and diameter overlap
#[inline]
pub fn circles_overlap(a: Vec2, a_size: f32, b: Vec2, b_size: f32) -> bool {
    crate::distance(a, b) < (a_size + b_size) / 2.0
}

/// Result of resolving bullet hits for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitReport {
    /// Positions of destroyed enemies, in bullet order
    pub kills: Vec<Vec2>,
}

/// Match live bullets against live enemies.
///
/// Each bullet destroys at most one enemy and each enemy is destroyed by at
/// most one bullet. Spent entities are flagged, then both collections are
/// compacted.
pub fn resolve_bullet_hits(bullets: &mut Vec<Bullet>, enemies: &mut Vec<Enemy>) -> HitReport {
    let mut report = HitReport::default();

    for bullet in bullets.iter_mut().filter(|b| b.visible) {
        let hit = enemies
            .iter_mut()
            .filter(|e| e.alive)
            .find(|e| circles_overlap(bullet.pos, bullet.size, e.pos, e.size));
        if let Some(enemy) = hit {
            enemy.alive = false;
            bullet.visible = false;
            report.kills.push(enemy.pos);
        }
    }

    bullets.retain(|b| b.visible);
    enemies.retain(|e| e.alive);
    report
}

/// True if any enemy touches the player
pub fn player_caught(player: &Player, enemies: &[Enemy]) -> bool {
    enemies
        .iter()
        .any(|e| circles_overlap(player.pos, player.size, e.pos, e.size))
}
