//! Audio system using Web Audio API
//!
//! Drums and notes are synthesized with oscillators - no sample files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::music::{NoteDuration, NoteTable};
use crate::sim::SoundEvent;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    notes: NoteTable,
    master_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(notes: NoteTable) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            notes,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound requested by the simulation
    pub fn play(&self, sound: SoundEvent, tempo: f64) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match sound {
            SoundEvent::Kick => self.play_kick(ctx, vol),
            SoundEvent::HiHat => self.play_hat(ctx, vol),
            SoundEvent::Note {
                pitch_index,
                duration,
                ..
            } => self.play_note(ctx, vol, pitch_index, duration, tempo),
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

    /// Kick - long sine drop
    fn play_kick(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.7, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.5)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.55).ok();
    }

    /// Hi-hat - short bright tick
    fn play_hat(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        // Two detuned squares approximate metallic noise
        for freq in [6000.0, 8300.0] {
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.06, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.05)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.06).ok();
            }
        }
    }

    /// Pitched note - soft attack, FM-ish overtone
    fn play_note(
        &self,
        ctx: &AudioContext,
        vol: f32,
        pitch_index: usize,
        duration: NoteDuration,
        tempo: f64,
    ) {
        let note = self.notes.note(pitch_index);
        let freq = note.frequency();
        let length = duration.seconds(tempo);
        let t = ctx.current_time();
        log::debug!("Note {} ({})", note, duration.as_str());

        // Fundamental plus a quieter overtone
        for (mult, level, osc_type) in [
            (1.0, 0.35, OscillatorType::Triangle),
            (2.0, 0.1, OscillatorType::Sine),
        ] {
            if let Some((osc, gain)) = self.create_osc(ctx, freq * mult, osc_type) {
                gain.gain().set_value_at_time(0.01, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * level, t + 0.025)
                    .ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + length + 0.4)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + length + 0.45).ok();
            }
        }
    }
}
