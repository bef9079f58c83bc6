//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball launched from the spawn point
    Jump,
    /// Ball bounced off a platform
    Bounce,
    /// Star picked up
    PowerUpCollect,
    /// Invulnerability switched on
    Invulnerability,
    /// New level reached
    LevelUp,
    /// Ball hit by a spiked obstacle
    ObstacleHit,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Sound to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::FirstJump => Some(Self::Jump),
            GameEvent::Bounced => Some(Self::Bounce),
            GameEvent::PowerUpCollected => Some(Self::PowerUpCollect),
            GameEvent::InvulnerabilityActivated => Some(Self::Invulnerability),
            GameEvent::LevelUp { .. } => Some(Self::LevelUp),
            GameEvent::ObstacleHit => Some(Self::ObstacleHit),
            GameEvent::GameOver { .. } => Some(Self::GameOver),
            GameEvent::RunStarted
            | GameEvent::RunRestarted
            | GameEvent::InvulnerabilityEnded
            | GameEvent::PowerUpSpawned
            | GameEvent::ObstacleSpawned => None,
        }
    }
}

/// Combined output gain, 0 when muted
pub fn effective_volume(master: f32, sfx: f32, muted: bool) -> f32 {
    if muted {
        0.0
    } else {
        master.clamp(0.0, 1.0) * sfx.clamp(0.0, 1.0)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, effective_volume};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = effective_volume(self.master_volume, self.sfx_volume, self.muted);
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => self.play_jump(ctx, vol),
                SoundEffect::Bounce => self.play_bounce(ctx, vol),
                SoundEffect::PowerUpCollect => self.play_pickup(ctx, vol),
                SoundEffect::Invulnerability => self.play_invulnerability(ctx, vol),
                SoundEffect::LevelUp => self.play_level_up(ctx, vol),
                SoundEffect::ObstacleHit => self.play_obstacle_hit(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
            }
        }

        // === Sound generators ===

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

        /// Enveloped glide from `from` to `to` Hz starting at `t`
        #[allow(clippy::too_many_arguments)]
        fn sweep(
            &self,
            ctx: &AudioContext,
            from: f32,
            to: f32,
            osc_type: OscillatorType,
            peak: f32,
            t: f64,
            length: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            gain.gain().set_value_at_time(peak, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + length)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + length + 0.05).ok();
        }

        /// Jump - whoosh up
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.sweep(ctx, 200.0, 600.0, OscillatorType::Triangle, vol * 0.3, t, 0.15);
        }

        /// Bounce - springy boing
        fn play_bounce(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.sweep(ctx, 250.0, 500.0, OscillatorType::Sine, vol * 0.3, t, 0.1);
        }

        /// Pickup - happy ding
        fn play_pickup(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [600.0, 800.0, 1000.0].iter().enumerate() {
                let t = ctx.current_time() + i as f64 * 0.08;
                self.sweep(ctx, *freq, *freq, OscillatorType::Sine, vol * 0.25, t, 0.15);
            }
        }

        /// Invulnerability - shimmering chord
        fn play_invulnerability(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [1200.0, 1800.0, 2400.0].iter().enumerate() {
                let t = ctx.current_time() + i as f64 * 0.02;
                self.sweep(ctx, *freq, *freq * 1.5, OscillatorType::Sine, vol * 0.2, t, 0.3);
            }
        }

        /// Level up - fanfare
        fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 500.0, 600.0, 800.0].iter().enumerate() {
                let t = ctx.current_time() + i as f64 * 0.1;
                self.sweep(ctx, *freq, *freq, OscillatorType::Triangle, vol * 0.3, t, 0.4);
            }
        }

        /// Obstacle hit - metallic crunch
        fn play_obstacle_hit(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.sweep(ctx, 100.0, 30.0, OscillatorType::Sawtooth, vol * 0.5, t, 0.4);
            self.sweep(ctx, 1500.0, 800.0, OscillatorType::Square, vol * 0.2, t, 0.1);
        }

        /// Game over - sad descending
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let t = ctx.current_time() + i as f64 * 0.2;
                self.sweep(ctx, *freq, *freq, OscillatorType::Sine, vol * 0.3, t, 0.3);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameOverCause;

    #[test]
    fn test_gameplay_events_have_sounds() {
        assert_eq!(SoundEffect::for_event(&GameEvent::FirstJump), Some(SoundEffect::Jump));
        assert_eq!(SoundEffect::for_event(&GameEvent::Bounced), Some(SoundEffect::Bounce));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::LevelUp { level: 3 }),
            Some(SoundEffect::LevelUp)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver {
                score: 12.0,
                level: 2,
                cause: GameOverCause::Fell,
            }),
            Some(SoundEffect::GameOver)
        );
    }

    #[test]
    fn test_bookkeeping_events_are_silent() {
        for event in [
            GameEvent::RunStarted,
            GameEvent::RunRestarted,
            GameEvent::InvulnerabilityEnded,
            GameEvent::PowerUpSpawned,
            GameEvent::ObstacleSpawned,
        ] {
            assert_eq!(SoundEffect::for_event(&event), None, "{:?}", event);
        }
    }

    #[test]
    fn test_effective_volume() {
        assert_eq!(effective_volume(0.8, 0.5, false), 0.4);
        assert_eq!(effective_volume(0.8, 0.5, true), 0.0);
        assert_eq!(effective_volume(2.0, 1.0, false), 1.0);
    }
}
