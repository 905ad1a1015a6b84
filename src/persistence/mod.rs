//! Key/value persistence
//!
//! Progress lives under flat string keys, one value per key, written right
//! after each change. Reads tolerate missing or corrupt values and fall back
//! to defaults.
//!
//! - `MemoryStore`: in-process map (native builds and tests)
//! - `LocalStore`: browser LocalStorage (wasm32)

#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use thiserror::Error;

use crate::consts::DEFAULT_GAME_SPEED;
use crate::skins::SkinId;

/// Storage keys
pub mod keys {
    pub const HIGH_SCORE: &str = "highScore";
    pub const SKULLS: &str = "skulls";
    pub const GAME_SPEED: &str = "gameSpeed";
    pub const SELECTED_SKIN: &str = "selectedSkin";
    pub const UNLOCKED_SKINS: &str = "unlockedSkins";
    pub const SETTINGS: &str = "upsideFlapSettings";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A durable string key/value store
pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store (handy for tests)
    pub fn with<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Everything read back from the store at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub high_score: u32,
    pub skulls: u32,
    pub game_speed: f32,
    pub selected_skin: SkinId,
    pub unlocked_skins: BTreeSet<SkinId>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            high_score: 0,
            skulls: 0,
            game_speed: DEFAULT_GAME_SPEED,
            selected_skin: SkinId::default(),
            unlocked_skins: SkinId::free_skins().collect(),
        }
    }
}

impl Progress {
    /// Load progress, substituting defaults for anything missing or corrupt
    pub fn load(store: &dyn Store) -> Self {
        let defaults = Self::default();

        let high_score = read_parsed(store, keys::HIGH_SCORE).unwrap_or(defaults.high_score);
        let skulls = read_parsed(store, keys::SKULLS).unwrap_or(defaults.skulls);
        let game_speed = read_parsed::<f32>(store, keys::GAME_SPEED)
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(defaults.game_speed);

        let mut unlocked_skins = defaults.unlocked_skins;
        unlocked_skins.extend(read_unlocked(store));

        let selected_skin = match store.get(keys::SELECTED_SKIN) {
            Some(raw) => match SkinId::from_str(&raw) {
                Some(skin) if unlocked_skins.contains(&skin) => skin,
                _ => {
                    log::warn!("Ignoring stored skin {:?}", raw);
                    defaults.selected_skin
                }
            },
            None => defaults.selected_skin,
        };

        Self {
            high_score,
            skulls,
            game_speed,
            selected_skin,
            unlocked_skins,
        }
    }
}

fn read_parsed<T: std::str::FromStr>(store: &dyn Store, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Corrupt value for {}: {:?}, using default", key, raw);
            None
        }
    }
}

/// Unlocked skins are stored as a JSON map of skin id to `true`
fn read_unlocked(store: &dyn Store) -> Vec<SkinId> {
    let Some(json) = store.get(keys::UNLOCKED_SKINS) else {
        return Vec::new();
    };
    match serde_json::from_str::<BTreeMap<String, serde_json::Value>>(&json) {
        Ok(map) => map
            .into_iter()
            .filter(|(_, v)| v.as_bool() == Some(true))
            .filter_map(|(k, _)| SkinId::from_str(&k))
            .collect(),
        Err(e) => {
            log::warn!("Corrupt unlocked skins ({}), starting from free skins", e);
            Vec::new()
        }
    }
}

/// Encode unlocked skins as a JSON map of skin id to `true`
pub fn encode_unlocked(skins: &BTreeSet<SkinId>) -> Result<String, StoreError> {
    let map: BTreeMap<&str, bool> = skins.iter().map(|s| (s.as_str(), true)).collect();
    serde_json::to_string(&map).map_err(|source| StoreError::Encode {
        key: keys::UNLOCKED_SKINS.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_gives_defaults() {
        let progress = Progress::load(&MemoryStore::new());
        assert_eq!(progress, Progress::default());
        assert_eq!(progress.game_speed, 2.0);
        assert_eq!(progress.selected_skin, SkinId::Demogorgon);
        assert!(progress.unlocked_skins.contains(&SkinId::Will));
    }

    #[test]
    fn test_reads_stored_values() {
        let store = MemoryStore::with([
            (keys::HIGH_SCORE, "42"),
            (keys::SKULLS, "17"),
            (keys::GAME_SPEED, "3.5"),
            (keys::SELECTED_SKIN, "vecna"),
            (keys::UNLOCKED_SKINS, r#"{"vecna":true,"steve":false}"#),
        ]);
        let progress = Progress::load(&store);
        assert_eq!(progress.high_score, 42);
        assert_eq!(progress.skulls, 17);
        assert_eq!(progress.game_speed, 3.5);
        assert_eq!(progress.selected_skin, SkinId::Vecna);
        assert!(progress.unlocked_skins.contains(&SkinId::Vecna));
        assert!(!progress.unlocked_skins.contains(&SkinId::Steve));
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let store = MemoryStore::with([
            (keys::HIGH_SCORE, "lots"),
            (keys::SKULLS, "-5"),
            (keys::GAME_SPEED, "NaN"),
            (keys::SELECTED_SKIN, "barb"),
            (keys::UNLOCKED_SKINS, "{not json"),
        ]);
        assert_eq!(Progress::load(&store), Progress::default());
    }

    #[test]
    fn test_locked_selected_skin_is_ignored() {
        let store = MemoryStore::with([(keys::SELECTED_SKIN, "mindflayer")]);
        assert_eq!(Progress::load(&store).selected_skin, SkinId::Demogorgon);
    }

    #[test]
    fn test_unknown_unlocked_ids_are_skipped() {
        let store = MemoryStore::with([(keys::UNLOCKED_SKINS, r#"{"barb":true,"robin":true}"#)]);
        let progress = Progress::load(&store);
        assert!(progress.unlocked_skins.contains(&SkinId::Robin));
        assert_eq!(progress.unlocked_skins.len(), 9);
    }

    #[test]
    fn test_encode_unlocked() {
        let skins: BTreeSet<_> = [SkinId::Steve, SkinId::Demogorgon].into_iter().collect();
        let json = encode_unlocked(&skins).unwrap();
        assert_eq!(json, r#"{"demogorgon":true,"steve":true}"#);
    }
}
