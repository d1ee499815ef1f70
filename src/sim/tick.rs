//! Fixed timestep simulation tick
//!
//! Advances the run by one discrete step. Order per tick:
//! 1. player movement (and gun aim)
//! 2. bullet advance and off-canvas culling
//! 3. enemy homing toward the already-moved player
//! 4. bullet/enemy hits
//! 5. player/enemy contact
//! 6. spawn gate

use glam::Vec2;

use super::collision::{player_caught, resolve_bullet_hits};
use super::spawner::spawn_burst;
use super::state::{Bullet, GameEvent, GameState, Mode};
use crate::consts::SIM_DT_MS;

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Pointer or touch position in canvas pixels
    pub aim: Option<Vec2>,
}

impl TickInput {
    /// Per-axis movement direction. Left beats right and up beats down.
    pub fn axis(&self) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}

/// Advance the game state by one tick. Does nothing unless the run is live.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.mode != Mode::Running {
        return;
    }
    state.time_ticks += 1;

    // --- PLAYER ---
    // Axes are not normalized: a diagonal moves full speed on both.
    let half = state.player.radius();
    let min = Vec2::splat(half);
    let max = Vec2::new(state.canvas.width - half, state.canvas.height - half).max(min);
    state.player.pos = (state.player.pos + input.axis() * state.player.speed).clamp(min, max);
    aim_gun(state, input.aim);

    // --- BULLETS ---
    let canvas = state.canvas;
    for bullet in state.bullets.iter_mut().filter(|b| b.visible) {
        bullet.pos += bullet.dir * bullet.speed;
        if !canvas.contains(bullet.pos) {
            bullet.visible = false;
        }
    }
    state.bullets.retain(|b| b.visible);

    // --- ENEMIES ---
    let target = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.home_on(target);
    }

    // --- HITS ---
    let report = resolve_bullet_hits(&mut state.bullets, &mut state.enemies);
    for pos in report.kills {
        state.score += state.tuning.kill_score;
        state.kills += 1;
        state.events.push(GameEvent::EnemyKilled { pos });
    }

    // --- CONTACT ---
    if player_caught(&state.player, &state.enemies) {
        state.mode = Mode::GameOver;
        state.events.push(GameEvent::PlayerCaught);
        log::info!(
            "Player caught after {} ticks - final score {}",
            state.time_ticks,
            state.score
        );
    }

    // --- SPAWN GATE ---
    let step = state.tuning.spawn_step_ms(SIM_DT_MS);
    if let Some(count) = state.difficulty.accumulate(step) {
        spawn_burst(state, count);
    }
}

/// Point the gun at `aim`. A target on the player's center keeps the old angle.
pub fn aim_gun(state: &mut GameState, aim: Option<Vec2>) {
    if let Some(angle) = aim.and_then(|target| crate::angle_to(state.player.pos, target)) {
        state.gun.angle = angle;
    }
}

/// Fire one bullet from the player's center along the gun heading
pub fn fire_bullet(state: &mut GameState) {
    let id = state.next_entity_id();
    log::trace!("Bullet {} fired at angle {:.3}", id, state.gun.angle);
    state.bullets.push(Bullet {
        id,
        pos: state.player.pos,
        dir: crate::direction_from_angle(state.gun.angle),
        speed: state.tuning.bullet_speed,
        size: state.dims.bullet_size,
        visible: true,
    });
    state.events.push(GameEvent::BulletFired);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Enemy;
    use crate::tuning::{Canvas, Tuning};
    use proptest::prelude::*;

    /// 800x600 field, player size 20 at (100, 100), spawning disabled
    fn quiet_state() -> GameState {
        let mut state = GameState::new(Canvas::new(800.0, 600.0), Tuning::default(), 12345);
        state.player.pos = Vec2::new(100.0, 100.0);
        state.player.size = 20.0;
        state.difficulty.spawn_accum_ms = f64::MIN;
        state
    }

    fn add_enemy(state: &mut GameState, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        let size = state.dims.enemy_size;
        state.enemies.push(Enemy::new(id, Vec2::new(x, y), size, 0.75));
        id
    }

    #[test]
    fn test_first_tick_spawns_initial_burst() {
        let mut state = GameState::new(Canvas::new(800.0, 600.0), Tuning::default(), 1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 3);
        assert!(state.enemies.iter().all(|e| !state.canvas.contains(e.pos)));
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut state = quiet_state();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left);
        assert_eq!(state.player.pos, Vec2::new(95.0, 100.0));

        for _ in 0..100 {
            tick(&mut state, &left);
        }
        assert_eq!(state.player.pos.x, 10.0);
    }

    #[test]
    fn test_opposing_keys_prefer_left_and_up() {
        let mut state = quiet_state();
        let input = TickInput {
            left: true,
            right: true,
            up: true,
            down: true,
            aim: None,
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos, Vec2::new(95.0, 95.0));
    }

    #[test]
    fn test_diagonal_not_normalized() {
        let mut state = quiet_state();
        let input = TickInput {
            right: true,
            down: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos, Vec2::new(105.0, 105.0));
    }

    #[test]
    fn test_aim_follows_pointer_and_survives_zero_distance() {
        let mut state = quiet_state();
        let input = TickInput {
            aim: Some(Vec2::new(100.0, 200.0)),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.gun.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        let input = TickInput {
            aim: Some(state.player.pos),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.gun.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_bullet_culled_after_leaving_canvas() {
        let mut state = quiet_state();
        state.gun.angle = std::f32::consts::PI; // pointing left
        state.player.pos = Vec2::new(15.0, 100.0);
        fire_bullet(&mut state);
        assert_eq!(state.bullets.len(), 1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.bullets[0].pos.x, 5.0);
        tick(&mut state, &TickInput::default());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_enemy_homes_without_overshoot() {
        let mut state = quiet_state();
        add_enemy(&mut state, -50.0, 100.0);
        let mut last_x = -50.0;
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
            if state.mode != Mode::Running {
                break;
            }
            let x = state.enemies[0].pos.x;
            assert!(x > last_x);
            assert!(x <= 100.0);
            last_x = x;
        }
    }

    #[test]
    fn test_enemy_from_left_edge_closes_in_monotonically() {
        // Player (100, 100) size 20 on 800x600, enemy entering at (-50, 300)
        let mut state = quiet_state();
        add_enemy(&mut state, -50.0, 300.0);
        let mut last_x = -50.0;
        for _ in 0..1000 {
            tick(&mut state, &TickInput::default());
            if state.mode != Mode::Running {
                break;
            }
            let x = state.enemies[0].pos.x;
            assert!(x > last_x, "x went back from {last_x} to {x}");
            assert!(x <= 100.0, "overshot to {x}");
            last_x = x;
        }
        assert_eq!(state.mode, Mode::GameOver);
        assert!(last_x <= 100.0);
    }

    #[test]
    fn test_enemy_reaching_player_center_is_stable() {
        let mut state = quiet_state();
        add_enemy(&mut state, 100.0, 100.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies[0].pos, Vec2::new(100.0, 100.0));
        assert!(state.enemies[0].pos.is_finite());
        assert_eq!(state.mode, Mode::GameOver);
    }

    #[test]
    fn test_bullet_kills_enemy_and_scores() {
        let mut state = quiet_state();
        add_enemy(&mut state, 400.0, 400.0);
        state.bullets.push(Bullet {
            id: 999,
            pos: Vec2::new(390.0, 400.0),
            dir: Vec2::X,
            speed: 10.0,
            size: 4.0,
            visible: true,
        });

        tick(&mut state, &TickInput::default());

        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.kills, 1);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemyKilled { .. }))
        );
    }

    #[test]
    fn test_two_bullets_on_one_enemy_score_once() {
        let mut state = quiet_state();
        add_enemy(&mut state, 400.0, 400.0);
        for id in [900, 901] {
            state.bullets.push(Bullet {
                id,
                pos: Vec2::new(390.0, 400.0),
                dir: Vec2::X,
                speed: 10.0,
                size: 4.0,
                visible: true,
            });
        }

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 10);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].id, 901);
    }

    #[test]
    fn test_contact_ends_run_but_finishes_tick() {
        let mut state = quiet_state();
        add_enemy(&mut state, 130.0, 100.0);
        state.bullets.push(Bullet {
            id: 999,
            pos: Vec2::new(500.0, 500.0),
            dir: Vec2::X,
            speed: 10.0,
            size: 4.0,
            visible: true,
        });

        tick(&mut state, &TickInput::default());

        assert_eq!(state.mode, Mode::GameOver);
        // Motion computed this tick is kept
        assert_eq!(state.bullets[0].pos, Vec2::new(510.0, 500.0));
        assert!(state.events.contains(&GameEvent::PlayerCaught));

        // No further ticks once over
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_fire_bullet_uses_gun_heading() {
        let mut state = quiet_state();
        state.gun.angle = std::f32::consts::FRAC_PI_2;
        fire_bullet(&mut state);
        let bullet = &state.bullets[0];
        assert_eq!(bullet.pos, state.player.pos);
        assert!(bullet.dir.x.abs() < 1e-6);
        assert!((bullet.dir.y - 1.0).abs() < 1e-6);
        assert_eq!(bullet.speed, 10.0);
        assert!((bullet.size - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(Canvas::new(800.0, 600.0), Tuning::default(), 99999);
        let mut b = GameState::new(Canvas::new(800.0, 600.0), Tuning::default(), 99999);
        let inputs = [
            TickInput {
                left: true,
                aim: Some(Vec2::new(0.0, 0.0)),
                ..Default::default()
            },
            TickInput {
                down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..100 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
        }
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, up, down)| TickInput {
                left,
                right,
                up,
                down,
                aim: None,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_player_stays_inside(inputs in proptest::collection::vec(arb_input(), 1..300)) {
            let mut state = GameState::new(Canvas::new(800.0, 600.0), Tuning::default(), 5);
            let half = state.player.radius();
            for input in &inputs {
                tick(&mut state, input);
                let p = state.player.pos;
                prop_assert!(p.x >= half && p.x <= 800.0 - half);
                prop_assert!(p.y >= half && p.y <= 600.0 - half);
            }
        }

        #[test]
        fn prop_bullets_inside_and_score_monotonic(
            seed in any::<u64>(),
            angles in proptest::collection::vec(0.0f32..std::f32::consts::TAU, 1..60),
        ) {
            let mut state = GameState::new(Canvas::new(800.0, 600.0), Tuning::default(), seed);
            let mut last_score = 0;
            for angle in angles {
                state.gun.angle = angle;
                fire_bullet(&mut state);
                for _ in 0..5 {
                    tick(&mut state, &TickInput::default());
                    for bullet in &state.bullets {
                        prop_assert!(state.canvas.contains(bullet.pos));
                    }
                    prop_assert!(state.score >= last_score);
                    prop_assert_eq!(state.score % 10, 0);
                    last_score = state.score;
                }
            }
        }
    }
}
