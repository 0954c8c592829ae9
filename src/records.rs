//! High score and aggregate stats persistence gateway
//!
//! The simulations never touch storage directly: they read a loaded
//! [`GameRecords`] at construction and the host writes it back on the
//! game-over transition. Storage failure always degrades to defaults.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage keys, matching the original localStorage layout
pub const SNAKE_HIGH_SCORE_KEY: &str = "snakeHighScore";
pub const SNAKE_STATS_KEY: &str = "snakeStats";
pub const FLAPPY_HIGH_SCORE_KEY: &str = "flappyHighScore";
pub const FLAPPY_STATS_KEY: &str = "flappyStats";

/// Injected key-value store. The only persistence surface the core sees.
pub trait RecordStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Best-effort write; implementations swallow storage errors.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for native builds and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl RecordStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok()).flatten()?;
        storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok()).flatten() {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to persist {key}");
            }
        }
    }
}

/// Aggregate stats for the grid game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnakeStats {
    pub games_played: u64,
    pub total_score: u64,
    pub food_eaten: u64,
    pub power_ups_collected: u64,
}

impl SnakeStats {
    /// Mean score per finished run, rounded
    pub fn average_score(&self) -> u64 {
        if self.games_played == 0 {
            0
        } else {
            (self.total_score as f64 / self.games_played as f64).round() as u64
        }
    }
}

/// Aggregate stats for the continuous game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlappyStats {
    pub games_played: u64,
    pub total_score: u64,
    pub pipes_passed: u64,
}

/// Per-game persisted records: one high score plus one stats blob.
///
/// Loaded once when a game is constructed; saved only on the game-over
/// transition. The high score is monotone non-decreasing across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecords<S> {
    pub high_score: u64,
    pub stats: S,
    score_key: &'static str,
    stats_key: &'static str,
}

impl<S: Serialize + DeserializeOwned + Default> GameRecords<S> {
    /// Load records, falling back to defaults on missing or corrupt data.
    pub fn load(store: &dyn RecordStore, score_key: &'static str, stats_key: &'static str) -> Self {
        let high_score = store
            .get(score_key)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let stats = store
            .get(stats_key)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self {
            high_score,
            stats,
            score_key,
            stats_key,
        }
    }

    /// Write both records back. Best-effort; failures stay in the store impl.
    pub fn save(&self, store: &mut dyn RecordStore) {
        store.set(self.score_key, &self.high_score.to_string());
        if let Ok(json) = serde_json::to_string(&self.stats) {
            store.set(self.stats_key, &json);
        }
        log::info!("Records saved (high score {})", self.high_score);
    }
}

impl GameRecords<SnakeStats> {
    pub fn snake(store: &dyn RecordStore) -> Self {
        Self::load(store, SNAKE_HIGH_SCORE_KEY, SNAKE_STATS_KEY)
    }
}

impl GameRecords<FlappyStats> {
    pub fn flappy(store: &dyn RecordStore) -> Self {
        Self::load(store, FLAPPY_HIGH_SCORE_KEY, FLAPPY_STATS_KEY)
    }
}
