//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (keyboard, pointer, touch) latched into a per-tick snapshot
//! - Frame time (animation-frame timestamps to clamped deltas)

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{Direction, InputState};
