//! Procedural sound effects
//!
//! Each cue is a small cluster of oscillator tones with an exponential decay.
//! The voicings are plain data so any [`AudioSink`] can play them; the
//! browser build renders them with the Web Audio API.

use crate::sim::{GameEvent, ProjectileKind, Side};

/// Sound cue requested by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Run (re)started
    RunStart,
    /// Kiss thrown
    Kiss,
    /// Flower tossed
    Flower,
    /// Bomb lobbed
    Bomb,
    /// Enemy lobbed a shot
    EnemyShot,
    /// Player landed a hit
    Hit,
    /// Player got hit
    Hurt,
    /// Bomb detonation
    Explosion,
    /// Enemy telegraphs a melee swing
    Windup,
    /// New opponent entered
    WaveStart,
    /// Opponent defeated
    WaveClear,
    /// Perk unlocked
    PerkUnlock,
    /// Player defeated
    GameOver,
    /// Score made the board
    HighScore,
}

impl AudioCue {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        let cue = match event {
            GameEvent::RunStarted { .. } => Self::RunStart,
            GameEvent::Shot(kind) => match kind {
                ProjectileKind::Kiss => Self::Kiss,
                ProjectileKind::Flower => Self::Flower,
                ProjectileKind::Bomb => Self::Bomb,
                ProjectileKind::EnemyShot => Self::EnemyShot,
            },
            GameEvent::FighterHit {
                side: Side::Enemy, ..
            } => Self::Hit,
            GameEvent::FighterHit {
                side: Side::Player, ..
            } => Self::Hurt,
            GameEvent::Explosion { .. } => Self::Explosion,
            GameEvent::MeleeWindup => Self::Windup,
            // The first opponent shares the run start cue
            GameEvent::WaveSpawned { index: 0, .. } => return None,
            GameEvent::WaveSpawned { .. } => Self::WaveStart,
            GameEvent::WaveWon { .. } => Self::WaveClear,
            GameEvent::PerkUnlocked(_) => Self::PerkUnlock,
            GameEvent::RunLost { .. } => Self::GameOver,
        };
        Some(cue)
    }

    /// Oscillator voicing for this cue
    pub fn tones(self) -> &'static [Tone] {
        match self {
            Self::RunStart => &RUN_START,
            Self::Kiss => &KISS,
            Self::Flower => &FLOWER,
            Self::Bomb => &BOMB,
            Self::EnemyShot => &ENEMY_SHOT,
            Self::Hit => &HIT,
            Self::Hurt => &HURT,
            Self::Explosion => &EXPLOSION,
            Self::Windup => &WINDUP,
            Self::WaveStart => &WAVE_START,
            Self::WaveClear => &WAVE_CLEAR,
            Self::PerkUnlock => &PERK_UNLOCK,
            Self::GameOver => &GAME_OVER,
            Self::HighScore => &HIGH_SCORE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator with a gain envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Waveform,
    pub freq: f32,
    /// Exponential glide target, if the pitch sweeps
    pub end_freq: Option<f32>,
    /// Peak gain before volume scaling
    pub gain: f32,
    /// Start offset (s)
    pub delay: f64,
    /// Decay time (s)
    pub duration: f64,
}

const fn tone(wave: Waveform, freq: f32, gain: f32, delay: f64, duration: f64) -> Tone {
    Tone {
        wave,
        freq,
        end_freq: None,
        gain,
        delay,
        duration,
    }
}

const fn sweep(wave: Waveform, freq: f32, end: f32, gain: f32, duration: f64) -> Tone {
    Tone {
        wave,
        freq,
        end_freq: Some(end),
        gain,
        delay: 0.0,
        duration,
    }
}

use Waveform::*;

const RUN_START: [Tone; 1] = [sweep(Triangle, 200.0, 600.0, 0.3, 0.2)];
const KISS: [Tone; 2] = [
    sweep(Sine, 900.0, 1400.0, 0.2, 0.08),
    tone(Sine, 1800.0, 0.08, 0.03, 0.06),
];
const FLOWER: [Tone; 1] = [sweep(Triangle, 500.0, 900.0, 0.25, 0.15)];
const BOMB: [Tone; 1] = [sweep(Square, 180.0, 120.0, 0.15, 0.12)];
const ENEMY_SHOT: [Tone; 1] = [sweep(Sawtooth, 300.0, 150.0, 0.15, 0.12)];
const HIT: [Tone; 1] = [sweep(Sine, 150.0, 60.0, 0.6, 0.1)];
const HURT: [Tone; 2] = [
    sweep(Square, 220.0, 90.0, 0.3, 0.18),
    tone(Sine, 60.0, 0.3, 0.0, 0.1),
];
const EXPLOSION: [Tone; 2] = [
    sweep(Sawtooth, 100.0, 30.0, 0.5, 0.4),
    tone(Square, 1500.0, 0.2, 0.0, 0.1),
];
const WINDUP: [Tone; 1] = [sweep(Triangle, 120.0, 240.0, 0.2, 0.25)];
const WAVE_START: [Tone; 2] = [
    tone(Triangle, 300.0, 0.25, 0.0, 0.2),
    tone(Triangle, 450.0, 0.25, 0.1, 0.25),
];
const WAVE_CLEAR: [Tone; 4] = [
    tone(Triangle, 400.0, 0.3, 0.0, 0.4),
    tone(Triangle, 500.0, 0.3, 0.1, 0.4),
    tone(Triangle, 600.0, 0.3, 0.2, 0.4),
    tone(Triangle, 800.0, 0.3, 0.3, 0.4),
];
const PERK_UNLOCK: [Tone; 3] = [
    tone(Sine, 600.0, 0.25, 0.0, 0.15),
    tone(Sine, 800.0, 0.25, 0.08, 0.15),
    tone(Sine, 1000.0, 0.25, 0.16, 0.15),
];
const GAME_OVER: [Tone; 4] = [
    tone(Sine, 400.0, 0.3, 0.0, 0.3),
    tone(Sine, 350.0, 0.3, 0.2, 0.3),
    tone(Sine, 300.0, 0.3, 0.4, 0.3),
    tone(Sine, 200.0, 0.3, 0.6, 0.3),
];
const HIGH_SCORE: [Tone; 5] = [
    tone(Triangle, 500.0, 0.25, 0.0, 0.25),
    tone(Triangle, 600.0, 0.25, 0.08, 0.25),
    tone(Triangle, 700.0, 0.25, 0.16, 0.25),
    tone(Triangle, 800.0, 0.25, 0.24, 0.25),
    tone(Triangle, 1000.0, 0.25, 0.32, 0.25),
];

/// Fire-and-forget cue playback
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
    /// Overall gain, 0.0 - 1.0
    fn set_volume(&mut self, volume: f32);
}

/// Sink that plays nothing (native builds)
#[derive(Debug, Clone, Default)]
pub struct SilentAudio {
    muted: bool,
}

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: AudioCue) {}

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_volume(&mut self, _volume: f32) {}
}

/// Records audible cues in order
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    pub played: Vec<AudioCue>,
    pub muted: bool,
    pub volume: f32,
}

impl CueLog {
    pub fn count(&self, cue: AudioCue) -> usize {
        self.played.iter().filter(|&&c| c == cue).count()
    }
}

impl AudioSink for CueLog {
    fn play(&mut self, cue: AudioCue) {
        if !self.muted {
            self.played.push(cue);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioCue, AudioSink, Tone, Waveform};

    /// Web Audio sink
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: 0.8,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
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

        fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) {
            let osc_type = match tone.wave {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = Self::create_osc(ctx, tone.freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + tone.delay;

            gain.gain().set_value_at_time(vol * tone.gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + tone.duration)
                .ok();
            if let Some(end) = tone.end_freq {
                osc.frequency().set_value_at_time(tone.freq, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(end, t + tone.duration)
                    .ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + tone.duration + 0.05).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: AudioCue) {
            let vol = if self.muted { 0.0 } else { self.volume };
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers suspend the context until a user gesture
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in cue.tones() {
                Self::play_tone(ctx, tone, vol);
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn is_muted(&self) -> bool {
            self.muted
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }
}
