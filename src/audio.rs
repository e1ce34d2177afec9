//! Audio system using Web Audio API
//!
//! Procedurally generated tones, no external files needed. The simulation
//! only names a `SoundEvent`; what it sounds like lives here. Native builds
//! get a silent manager with the same interface.

use serde::{Deserialize, Serialize};

use crate::settings::AudioMix;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEvent {
    /// Plane flaps upward
    Jump,
    /// Obstacle passed or star collected
    Score,
    /// Run started
    Start,
    /// Run ended
    GameOver,
    /// Shield absorbed a hit
    ShieldBreak,
    /// Power-up collected
    PowerUp,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A tone or short melody
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    /// Notes played back to back, each `duration / notes.len()` long
    pub notes: &'static [f32],
    /// Total length (seconds)
    pub duration: f64,
    pub waveform: Waveform,
    /// Peak gain before master/sfx volume
    pub volume: f32,
}

impl SoundEvent {
    pub fn tone(&self) -> ToneSpec {
        match self {
            SoundEvent::Jump => ToneSpec {
                notes: &[400.0],
                duration: 0.1,
                waveform: Waveform::Sine,
                volume: 0.3,
            },
            // C5, E5, G5
            SoundEvent::Score => ToneSpec {
                notes: &[523.0, 659.0, 784.0],
                duration: 0.3,
                waveform: Waveform::Sine,
                volume: 0.4,
            },
            // C4, E4, G4, C5
            SoundEvent::Start => ToneSpec {
                notes: &[262.0, 330.0, 392.0, 523.0],
                duration: 0.6,
                waveform: Waveform::Sine,
                volume: 0.4,
            },
            // E4, C#4, A3
            SoundEvent::GameOver => ToneSpec {
                notes: &[330.0, 277.0, 220.0],
                duration: 0.8,
                waveform: Waveform::Sawtooth,
                volume: 0.5,
            },
            SoundEvent::ShieldBreak => ToneSpec {
                notes: &[880.0, 440.0],
                duration: 0.25,
                waveform: Waveform::Square,
                volume: 0.25,
            },
            SoundEvent::PowerUp => ToneSpec {
                notes: &[600.0, 800.0, 1000.0],
                duration: 0.24,
                waveform: Waveform::Triangle,
                volume: 0.3,
            },
        }
    }
}

/// Plays `SoundEvent`s through the browser's audio graph
///
/// Fire-and-forget: nothing is returned and playback failures are ignored.
/// Without an `AudioContext` (native, or a browser refusing one) every call
/// is silently dropped.
#[derive(Default)]
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
    mix: AudioMix,
}

impl AudioManager {
    pub fn new(mix: AudioMix) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self {
                ctx: web_sys::AudioContext::new().ok(),
                mix,
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self { mix }
        }
    }

    pub fn is_available(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.ctx.is_some()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    pub fn mix(&self) -> &AudioMix {
        &self.mix
    }

    /// Flip mute; returns true when sound is on afterwards
    pub fn toggle_muted(&mut self) -> bool {
        self.mix.muted = !self.mix.muted;
        !self.mix.muted
    }

    pub fn play(&self, event: SoundEvent) {
        let gain = self.mix.gain();
        if gain <= 0.0 {
            return;
        }
        log::trace!("sound {:?} at gain {:.2}", event, gain);

        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            schedule(ctx, event.tone(), gain);
        }
    }
}

/// Queue every note of `tone` back to back, each with its own decay
#[cfg(target_arch = "wasm32")]
fn schedule(ctx: &web_sys::AudioContext, tone: ToneSpec, gain: f32) {
    use web_sys::{AudioContextState, OscillatorType};

    // Autoplay policy keeps the context suspended until a user gesture
    if ctx.state() == AudioContextState::Suspended {
        let _ = ctx.resume();
    }

    let shape = match tone.waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    };
    let step = tone.duration / tone.notes.len().max(1) as f64;
    let start = ctx.current_time();

    for (i, &freq) in tone.notes.iter().enumerate() {
        let at = start + i as f64 * step;
        if voice(ctx, shape, freq, tone.volume * gain, at, step).is_none() {
            log::debug!("Dropped note {} Hz", freq);
            return;
        }
    }
}

/// One oscillator -> gain -> destination chain, started and stopped at `at`
#[cfg(target_arch = "wasm32")]
fn voice(
    ctx: &web_sys::AudioContext,
    shape: web_sys::OscillatorType,
    freq: f32,
    peak: f32,
    at: f64,
    len: f64,
) -> Option<()> {
    let osc = ctx.create_oscillator().ok()?;
    let amp = ctx.create_gain().ok()?;
    osc.set_type(shape);
    osc.frequency().set_value_at_time(freq, at).ok()?;
    osc.connect_with_audio_node(&amp).ok()?;
    amp.connect_with_audio_node(&ctx.destination()).ok()?;

    amp.gain().set_value_at_time(peak, at).ok()?;
    amp.gain().exponential_ramp_to_value_at_time(0.01, at + len).ok()?;
    osc.start_with_when(at).ok()?;
    osc.stop_with_when(at + len).ok()?;
    Some(())
}
