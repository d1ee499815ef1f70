//! Rendering interface
//!
//! Renderers receive a read-only [`FrameView`] once per frame, after the
//! simulation has stepped. They never mutate game state.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod headless;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use headless::HeadlessRenderer;

use crate::sim::{Bullet, Enemy, GameState, Gun, Mode, Player};
use crate::tuning::Canvas;

/// Borrowed snapshot of everything a frame draws
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub canvas: Canvas,
    pub player: &'a Player,
    pub gun: &'a Gun,
    pub bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub score: u64,
    pub mode: Mode,
}

impl<'a> FrameView<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            canvas: state.canvas,
            player: &state.player,
            gun: &state.gun,
            bullets: &state.bullets,
            enemies: &state.enemies,
            score: state.score,
            mode: state.mode,
        }
    }
}

/// A display backend
pub trait Renderer {
    fn render(&mut self, view: &FrameView<'_>);
}
