//! Player preferences
//!
//! One JSON blob under `paperPlane_settings`. Best scores are stored
//! separately, one key per difficulty (see `persistence`).

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// How much visual garnish to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EffectsLevel {
    /// No clouds, no trails, few particles
    Low,
    #[default]
    Medium,
    High,
}

impl EffectsLevel {
    /// Live particle cap
    pub fn particle_cap(self) -> usize {
        match self {
            EffectsLevel::Low => 60,
            EffectsLevel::Medium => 250,
            EffectsLevel::High => 1000,
        }
    }

    pub fn draws_clouds(self) -> bool {
        self != EffectsLevel::Low
    }

    pub fn draws_trails(self) -> bool {
        self != EffectsLevel::Low
    }
}

/// Volume mix shared with the audio manager
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioMix {
    /// 0.0 - 1.0
    pub master: f32,
    /// 0.0 - 1.0
    pub sfx: f32,
    pub muted: bool,
}

impl Default for AudioMix {
    fn default() -> Self {
        Self {
            master: 0.5,
            sfx: 1.0,
            muted: false,
        }
    }
}

impl AudioMix {
    /// Final gain multiplier (0 when muted)
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master.clamp(0.0, 1.0) * self.sfx.clamp(0.0, 1.0)
        }
    }
}

/// Missing fields fall back to defaults, so older saves keep loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last difficulty picked on the start screen
    pub difficulty: Difficulty,
    pub effects: EffectsLevel,
    pub particles: bool,
    /// Particles streaming behind the plane
    pub trails: bool,
    /// Position/velocity overlay while playing
    pub show_debug: bool,
    pub audio: AudioMix,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            effects: EffectsLevel::Medium,
            particles: true,
            trails: true,
            show_debug: false,
            audio: AudioMix::default(),
        }
    }
}

impl Settings {
    pub const STORAGE_KEY: &'static str = "paperPlane_settings";

    pub fn particle_cap(&self) -> usize {
        if self.particles {
            self.effects.particle_cap()
        } else {
            0
        }
    }

    /// Low effects switch trails off regardless of the toggle
    pub fn trails_enabled(&self) -> bool {
        self.particles && self.trails && self.effects.draws_trails()
    }

    /// Parse a saved blob; anything unreadable yields defaults
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable settings: {}", e);
            Self::default()
        })
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten()) {
            Some(json) => {
                log::info!("Settings restored");
                Self::from_json(&json)
            }
            None => Self::default(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let (Some(storage), Some(json)) = (Self::storage(), self.to_json()) else {
            log::warn!("Settings not saved - LocalStorage unavailable");
            return;
        };
        if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
            log::warn!("Settings not saved - LocalStorage write failed");
        }
    }

    /// Native builds keep settings in memory only
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        log::debug!("Settings are not persisted on native builds");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.difficulty, Difficulty::Normal);
        assert_eq!(settings.particle_cap(), 250);
        assert!(settings.trails_enabled());
        assert_eq!(settings.audio.gain(), 0.5);
    }

    #[test]
    fn test_low_effects_and_particle_toggle() {
        let mut settings = Settings {
            effects: EffectsLevel::Low,
            ..Settings::default()
        };
        assert!(settings.trails);
        assert!(!settings.trails_enabled());
        assert!(!settings.effects.draws_clouds());
        settings.particles = false;
        assert_eq!(settings.particle_cap(), 0);
    }

    #[test]
    fn test_partial_and_corrupt_json() {
        let settings = Settings::from_json(r#"{"effects":"High","show_debug":true}"#);
        assert_eq!(settings.effects, EffectsLevel::High);
        assert!(settings.show_debug);
        assert_eq!(settings.difficulty, Difficulty::Normal);

        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_muted_mix_is_silent() {
        let mix = AudioMix {
            muted: true,
            ..AudioMix::default()
        };
        assert_eq!(mix.gain(), 0.0);
    }
}
