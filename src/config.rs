//! Game-wide flags and per-page puzzle configuration
//!
//! `GameConfig` is persisted under its own key, separately from progress.
//! `PageConfig` is handed over by each puzzle page and never stored.

use serde::{Deserialize, Serialize};

use crate::consts::CONFIG_KEY;
use crate::day::Day;
use crate::persistence::KeyValueStore;

/// Game-wide behaviour flags, fixed for the lifetime of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Compare answers exactly instead of ignoring case
    pub case_sensitive: bool,
    /// Go straight to the next page after a correct answer, no win modal
    pub disable_win_modal: bool,
}

impl GameConfig {
    /// Load from the store, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(CONFIG_KEY) {
            match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded game config: {:?}", config);
                    return config;
                }
                Err(e) => log::warn!("Ignoring malformed game config: {}", e),
            }
        }

        log::info!("Using default game config");
        Self::default()
    }
}

/// What a puzzle page tells the controller about itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageConfig {
    pub day_number: Day,
    pub correct_answer: String,
    pub next_page_url: String,
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
