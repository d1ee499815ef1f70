//! Headless renderer for native runs
//!
//! Draws nothing; logs a one-line status at a fixed frame interval and on
//! mode changes.

use super::{FrameView, Renderer};
use crate::sim::Mode;

pub struct HeadlessRenderer {
    log_every: u64,
    frames: u64,
    last_mode: Option<Mode>,
}

impl HeadlessRenderer {
    /// Log status every `log_every` frames (0 disables periodic lines)
    pub fn new(log_every: u64) -> Self {
        Self {
            log_every,
            frames: 0,
            last_mode: None,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, view: &FrameView<'_>) {
        self.frames += 1;

        if self.last_mode != Some(view.mode) {
            log::info!("Mode: {:?} (score {})", view.mode, view.score);
            self.last_mode = Some(view.mode);
        }

        if self.log_every > 0 && self.frames.is_multiple_of(self.log_every) {
            log::info!(
                "frame {:>6} | score {:>5} | enemies {:>3} | bullets {:>3} | player ({:.0}, {:.0})",
                self.frames,
                view.score,
                view.enemies.len(),
                view.bullets.len(),
                view.player.pos.x,
                view.player.pos.y
            );
        }
    }
}
