//! Enemy spawning at the canvas perimeter

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState};
use crate::tuning::Canvas;

/// Canvas edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Pick an edge uniformly at random
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Position `margin` pixels outside `edge`, uniformly spread along it.
///
/// The along-edge coordinate is a whole pixel in `[0, extent]`.
pub fn perimeter_position(edge: Edge, canvas: &Canvas, margin: f32, rng: &mut impl Rng) -> Vec2 {
    let along_x = rng.random_range(0..=canvas.width as i64) as f32;
    let along_y = rng.random_range(0..=canvas.height as i64) as f32;
    match edge {
        Edge::Top => Vec2::new(along_x, -margin),
        Edge::Right => Vec2::new(canvas.width + margin, along_y),
        Edge::Bottom => Vec2::new(along_x, canvas.height + margin),
        Edge::Left => Vec2::new(-margin, along_y),
    }
}

/// Spawn one enemy just outside a random edge.
///
/// Every enemy uses the tuned size and speed.
pub fn spawn_enemy(state: &mut GameState) {
    let edge = Edge::random(&mut state.rng);
    let pos = perimeter_position(edge, &state.canvas, state.tuning.spawn_margin, &mut state.rng);
    let id = state.next_entity_id();
    let enemy = Enemy::new(id, pos, state.dims.enemy_size, state.tuning.enemy_speed);
    log::trace!("Enemy {} spawned on {:?} at {}", id, edge, pos);
    state.enemies.push(enemy);
}

/// Spawn a burst of `count` enemies
pub fn spawn_burst(state: &mut GameState, count: u32) {
    for _ in 0..count {
        spawn_enemy(state);
    }
    log::debug!(
        "Spawn burst of {} (interval {} ms, {} enemies alive)",
        count,
        state.difficulty.spawn_interval_ms,
        state.enemies.len()
    );
    state.events.push(GameEvent::BurstSpawned { count });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn on_perimeter(p: Vec2, canvas: &Canvas, margin: f32) -> bool {
        let top = p.y == -margin && (0.0..=canvas.width).contains(&p.x);
        let bottom = p.y == canvas.height + margin && (0.0..=canvas.width).contains(&p.x);
        let left = p.x == -margin && (0.0..=canvas.height).contains(&p.y);
        let right = p.x == canvas.width + margin && (0.0..=canvas.height).contains(&p.y);
        top || bottom || left || right
    }

    #[test]
    fn test_positions_lie_outside_edges() {
        let canvas = Canvas::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let edge = Edge::random(&mut rng);
            let p = perimeter_position(edge, &canvas, 50.0, &mut rng);
            assert!(on_perimeter(p, &canvas, 50.0), "{p} not on perimeter");
            assert!(!canvas.contains(p));
        }
    }

    #[test]
    fn test_edges_chosen_uniformly() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut counts = [0u32; 4];
        for _ in 0..4000 {
            let edge = Edge::random(&mut rng);
            let i = Edge::ALL
                .iter()
                .position(|&e| e == edge)
                .expect("edge in ALL");
            counts[i] += 1;
        }
        // ~1000 each; the band is several standard deviations wide
        for (edge, &n) in Edge::ALL.iter().zip(&counts) {
            assert!((850..=1150).contains(&n), "{edge:?} chosen {n} times");
        }
    }

    #[test]
    fn test_burst_uses_tuned_enemy_stats() {
        let mut state = GameState::new(Canvas::new(800.0, 600.0), Tuning::default(), 3);
        spawn_burst(&mut state, 5);
        assert_eq!(state.enemies.len(), 5);
        for enemy in &state.enemies {
            assert!((enemy.size - 40.0).abs() < 1e-4);
            assert_eq!(enemy.speed, 0.75);
            assert!(enemy.alive);
        }
        assert_eq!(state.events, vec![GameEvent::BurstSpawned { count: 5 }]);
    }
}
