//! Canvas 2D renderer (browser only)

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{FrameView, Renderer};
use crate::sim::Mode;

const BULLET_COLOR: &str = "#39FF14";
const PLAYER_COLOR: &str = "blue";
const GUN_COLOR: &str = "black";
const ENEMY_COLOR: &str = "red";
const TEXT_COLOR: &str = "white";
const OVERLAY_COLOR: &str = "rgba(0, 0, 0, 0.5)";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Grab the 2D context of `canvas`. Returns `None` if the browser refuses.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    fn circle(&self, x: f32, y: f32, diameter: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx
            .arc(x as f64, y as f64, diameter as f64 / 2.0, 0.0, TAU)
            .ok();
        self.ctx.fill();
    }

    fn overlay(&self, view: &FrameView<'_>, lines: &[String]) {
        let (w, h) = (view.canvas.width as f64, view.canvas.height as f64);
        self.ctx.set_fill_style_str(OVERLAY_COLOR);
        self.ctx.fill_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.set_font("bold 24px Arial");
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        for (i, line) in lines.iter().enumerate() {
            self.ctx.fill_text(line, w / 2.0, h / 2.0 + i as f64 * 30.0).ok();
        }
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, view: &FrameView<'_>) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, view.canvas.width as f64, view.canvas.height as f64);

        // Bullets are squares centered on their position
        ctx.set_fill_style_str(BULLET_COLOR);
        for bullet in view.bullets.iter().filter(|b| b.visible) {
            let s = bullet.size as f64;
            ctx.fill_rect(
                bullet.pos.x as f64 - s / 2.0,
                bullet.pos.y as f64 - s / 2.0,
                s,
                s,
            );
        }

        let player = view.player;
        self.circle(player.pos.x, player.pos.y, player.size, PLAYER_COLOR);

        // Gun barrel starts at the player's rim
        ctx.save();
        ctx.translate(player.pos.x as f64, player.pos.y as f64).ok();
        ctx.rotate(view.gun.angle as f64).ok();
        ctx.set_fill_style_str(GUN_COLOR);
        ctx.fill_rect(
            player.radius() as f64,
            -view.gun.width as f64 / 2.0,
            view.gun.length as f64,
            view.gun.width as f64,
        );
        ctx.restore();

        for enemy in view.enemies {
            self.circle(enemy.pos.x, enemy.pos.y, enemy.size, ENEMY_COLOR);
        }

        // Score, top right
        let ctx = &self.ctx;
        ctx.set_font("20px Arial");
        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.set_text_align("right");
        ctx.set_text_baseline("top");
        ctx.fill_text(
            &format!("Score: {}", view.score),
            view.canvas.width as f64 - 10.0,
            10.0,
        )
        .ok();

        match view.mode {
            Mode::Running => {}
            Mode::Paused => self.overlay(view, &["Game Paused".to_string()]),
            Mode::GameOver => self.overlay(
                view,
                &["Game Over".to_string(), format!("Score: {}", view.score)],
            ),
        }
    }
}
