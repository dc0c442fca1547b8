//! Audio system
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is synthesized into a mono sample buffer, which the browser
//! plays back through a Web Audio buffer source.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::MUTE_KEY;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run started or resumed
    Start,
    /// Target shot
    Hit,
    /// Shot went wide or a target expired
    Miss,
    /// Lives ran out
    GameOver,
}

impl SoundEffect {
    /// Sound for a gameplay event
    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::Started => SoundEffect::Start,
            GameEvent::Hit => SoundEffect::Hit,
            GameEvent::Miss => SoundEffect::Miss,
            GameEvent::GameOver => SoundEffect::GameOver,
        }
    }
}

/// Oscillator shapes, evaluated at a phase in `0.0..1.0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
    Noise,
}

impl Waveform {
    fn sample(self, phase: f32, rng: &mut Pcg32) -> f32 {
        match self {
            Waveform::Sine => (std::f32::consts::TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Waveform::Noise => rng.random_range(-1.0..=1.0),
        }
    }
}

/// One voice: a frequency sweep with a decaying envelope
#[derive(Debug, Clone, Copy)]
struct Tone {
    /// Offset from the start of the effect, seconds
    start: f32,
    duration: f32,
    from_hz: f32,
    to_hz: f32,
    wave: Waveform,
    gain: f32,
}

impl Tone {
    const fn new(
        start: f32,
        duration: f32,
        from_hz: f32,
        to_hz: f32,
        wave: Waveform,
        gain: f32,
    ) -> Self {
        Self {
            start,
            duration,
            from_hz,
            to_hz,
            wave,
            gain,
        }
    }
}

/// Attack time shared by every voice, seconds
const ATTACK: f32 = 0.005;

// Rising arpeggio C5 E5 G5
const START_VOICES: &[Tone] = &[
    Tone::new(0.00, 0.09, 523.25, 523.25, Waveform::Square, 0.25),
    Tone::new(0.08, 0.09, 659.25, 659.25, Waveform::Square, 0.25),
    Tone::new(0.16, 0.16, 783.99, 783.99, Waveform::Square, 0.25),
];

// Bright upward chirp with a click on top
const HIT_VOICES: &[Tone] = &[
    Tone::new(0.0, 0.12, 600.0, 1400.0, Waveform::Sine, 0.5),
    Tone::new(0.0, 0.02, 3000.0, 3000.0, Waveform::Noise, 0.15),
];

// Low buzz sliding down
const MISS_VOICES: &[Tone] = &[
    Tone::new(0.0, 0.22, 220.0, 90.0, Waveform::Sawtooth, 0.35),
    Tone::new(0.0, 0.08, 1.0, 1.0, Waveform::Noise, 0.1),
];

// Slow falling sequence
const GAME_OVER_VOICES: &[Tone] = &[
    Tone::new(0.00, 0.20, 440.0, 415.3, Waveform::Triangle, 0.45),
    Tone::new(0.20, 0.20, 349.23, 329.63, Waveform::Triangle, 0.45),
    Tone::new(0.40, 0.20, 293.66, 277.18, Waveform::Triangle, 0.45),
    Tone::new(0.60, 0.50, 220.0, 110.0, Waveform::Triangle, 0.45),
];

fn voices(effect: SoundEffect) -> &'static [Tone] {
    match effect {
        SoundEffect::Start => START_VOICES,
        SoundEffect::Hit => HIT_VOICES,
        SoundEffect::Miss => MISS_VOICES,
        SoundEffect::GameOver => GAME_OVER_VOICES,
    }
}

/// Length of an effect in seconds
pub fn duration(effect: SoundEffect) -> f32 {
    voices(effect)
        .iter()
        .map(|t| t.start + t.duration)
        .fold(0.0, f32::max)
}

/// Render an effect into mono samples in `-1.0..=1.0`
pub fn synthesize(effect: SoundEffect, sample_rate: f32) -> Vec<f32> {
    let len = (duration(effect) * sample_rate).ceil() as usize;
    let mut out = vec![0.0f32; len];
    let mut rng = Pcg32::seed_from_u64(effect as u64);

    for tone in voices(effect) {
        let offset = (tone.start * sample_rate) as usize;
        let n = (tone.duration * sample_rate) as usize;
        let attack = (ATTACK * sample_rate).max(1.0);
        let mut phase = 0.0f32;
        for i in 0..n {
            let Some(slot) = out.get_mut(offset + i) else {
                break;
            };
            let t = i as f32 / n as f32;
            // Exponential sweep, like an AudioParam exponential ramp
            let freq = tone.from_hz * (tone.to_hz / tone.from_hz).powf(t);
            phase = (phase + freq / sample_rate).fract();
            let envelope = (i as f32 / attack).min(1.0) * (1.0 - t) * (1.0 - t);
            *slot += tone.wave.sample(phase, &mut rng) * envelope * tone.gain;
        }
    }

    for sample in &mut out {
        *sample = sample.clamp(-1.0, 1.0);
    }
    out
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        #[cfg(target_arch = "wasm32")]
        let ctx = {
            // May fail outside a secure context
            let ctx = web_sys::AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            ctx
        };
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Mute or unmute, returning the new muted state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    /// Toggle mute on the mute key. Returns true if the key was handled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !key.eq_ignore_ascii_case(MUTE_KEY) {
            return false;
        }
        self.toggle_mute();
        true
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the sound for each gameplay event, in order
    pub fn play_events(&self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(*event));
        }
    }

    /// Play a sound effect
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        if Self::play_buffer(ctx, effect, vol).is_none() {
            log::warn!("Failed to play {:?}", effect);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, effect: SoundEffect) {
        log::trace!("Sound {:?} at volume {:.2}", effect, self.effective_volume());
    }

    #[cfg(target_arch = "wasm32")]
    fn play_buffer(ctx: &web_sys::AudioContext, effect: SoundEffect, vol: f32) -> Option<()> {
        let rate = ctx.sample_rate();
        let mut samples = synthesize(effect, rate);

        let buffer = ctx.create_buffer(1, samples.len() as u32, rate).ok()?;
        buffer.copy_to_channel(&mut samples, 0).ok()?;

        let source = ctx.create_buffer_source().ok()?;
        source.set_buffer(Some(&buffer));
        let gain = ctx.create_gain().ok()?;
        gain.gain().set_value(vol);
        source.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        source.start().ok()?;
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f32 = 44_100.0;
    const ALL: [SoundEffect; 4] = [
        SoundEffect::Start,
        SoundEffect::Hit,
        SoundEffect::Miss,
        SoundEffect::GameOver,
    ];

    #[test]
    fn test_every_effect_is_audible_and_bounded() {
        for effect in ALL {
            let samples = synthesize(effect, RATE);
            let expected = (duration(effect) * RATE).ceil() as usize;
            assert_eq!(samples.len(), expected, "{effect:?}");
            let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
            assert!(peak > 0.05, "{effect:?} is silent");
            assert!(peak <= 1.0, "{effect:?} clips");
        }
    }

    #[test]
    fn test_effects_are_distinct() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(synthesize(*a, RATE), synthesize(*b, RATE), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        assert_eq!(synthesize(SoundEffect::Miss, RATE), synthesize(SoundEffect::Miss, RATE));
    }

    #[test]
    fn test_game_over_is_longest() {
        let game_over = duration(SoundEffect::GameOver);
        for effect in [SoundEffect::Start, SoundEffect::Hit, SoundEffect::Miss] {
            assert!(duration(effect) < game_over);
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::for_event(GameEvent::Started), SoundEffect::Start);
        assert_eq!(SoundEffect::for_event(GameEvent::Hit), SoundEffect::Hit);
        assert_eq!(SoundEffect::for_event(GameEvent::Miss), SoundEffect::Miss);
        assert_eq!(SoundEffect::for_event(GameEvent::GameOver), SoundEffect::GameOver);
    }

    #[test]
    fn test_volume_from_settings() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        let audio = AudioManager::new(&settings);
        assert!((audio.effective_volume() - 0.25).abs() < 1e-6);

        let muted = AudioManager::new(&Settings {
            muted: true,
            ..settings
        });
        assert_eq!(muted.effective_volume(), 0.0);
    }

    #[test]
    fn test_mute_key_toggles() {
        let mut audio = AudioManager::default();
        let loud = audio.effective_volume();
        assert!(audio.handle_key("M"));
        assert_eq!(audio.effective_volume(), 0.0);
        assert!(!audio.handle_key("x"));
        assert_eq!(audio.effective_volume(), 0.0);
        assert!(audio.handle_key("m"));
        assert_eq!(audio.effective_volume(), loud);
        assert!(audio.toggle_mute());
    }
}
