//! Game settings and preferences
//!
//! Persisted separately from progress under their own key.

use serde::{Deserialize, Serialize};

use crate::persistence::{PersistenceStore, StorageBackend, keys};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// All sound off
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Visual Effects ===
    /// Screen shake on explosions/impacts
    pub screen_shake: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,

            screen_shake: true,

            show_fps: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Output gain for effects, 0 when muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings, falling back to defaults when missing or corrupt
    pub fn load<B: StorageBackend>(store: &PersistenceStore<B>) -> Self {
        match store.load_json(keys::SETTINGS) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save<B: StorageBackend>(&self, store: &mut PersistenceStore<B>) {
        store.save_json(keys::SETTINGS, self);
        log::debug!("Settings saved");
    }
}
