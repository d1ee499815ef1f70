//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Gun fired
    Shot,
    /// Bullet destroyed an enemy
    EnemyDown,
    /// Player caught by the swarm
    GameOver,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BulletFired => Some(SoundEffect::Shot),
            GameEvent::EnemyKilled { .. } => Some(SoundEffect::EnemyDown),
            GameEvent::PlayerCaught => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.6,
            muted: false,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play the cue for each event that has one
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.muted || self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Shot => self.play_shot(ctx, self.volume),
            SoundEffect::EnemyDown => self.play_enemy_down(ctx, self.volume),
            SoundEffect::GameOver => self.play_game_over(ctx, self.volume),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Short square-wave pop
    fn play_shot(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.05)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(220.0, t + 0.05)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.06).ok();
    }

    /// Sawtooth crunch with a falling pitch
    fn play_enemy_down(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.35, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Descending three-note sting
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [392.0, 311.0, 196.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                continue;
            };
            let start = t + i as f64 * 0.18;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.4, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.3)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.32).ok();
        }
    }
}
