//! User preferences
//!
//! Persisted through the injected record store, separately from game records.

use serde::{Deserialize, Serialize};

use crate::records::RecordStore;

/// Bird color options offered by the shell
pub const BIRD_COLORS: [&str; 4] = ["#FFD700", "#FF4444", "#4444FF", "#44FF44"];

/// Cross-session preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Master switch for audio cues
    pub sound_enabled: bool,
    /// Bird fill color (purely cosmetic)
    pub bird_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            bird_color: BIRD_COLORS[0].to_string(),
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "arcadeSettings";

    /// Load settings, falling back to defaults on missing or corrupt data
    pub fn load(store: &dyn RecordStore) -> Self {
        match store
            .get(Self::STORAGE_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
        {
            Some(settings) => settings,
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn RecordStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(Self::STORAGE_KEY, &json);
        }
    }
}
