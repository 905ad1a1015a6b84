//! Audio and narration preferences
//!
//! Persisted as one JSON value, separate from game progress. Game speed is
//! progress (it has its own key) and lives in the game state instead.

use serde::{Deserialize, Serialize};

use crate::persistence::{Store, StoreError, keys};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute everything
    pub muted: bool,

    // === Accessibility ===
    /// Speak the game-over line in the character's voice
    pub narration: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.3,
            muted: false,
            narration: true,
        }
    }
}

impl Settings {
    /// Effective sound effect gain (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music gain (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn Store) -> Self {
        if let Some(json) = store.get(keys::SETTINGS) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Corrupt settings ({}), using defaults", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut dyn Store) -> Result<(), StoreError> {
        let json = serde_json::to_string(self).map_err(|source| StoreError::Encode {
            key: keys::SETTINGS.to_string(),
            source,
        })?;
        store.set(keys::SETTINGS, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_save_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            muted: true,
            narration: false,
            ..Default::default()
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_corrupt_settings_use_defaults() {
        let store = MemoryStore::with([(keys::SETTINGS, "[1,2")]);
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_mute_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }
}
