//! Escape Calendar - a 16-day puzzle advent calendar
//!
//! Core modules:
//! - `progress`: Unlocked/completed day sets over a key-value store
//! - `calendar`: Grid model rebuilt from progress on every change
//! - `puzzle`: Per-page answer validation and completion flow
//! - `persistence`: Storage backends (LocalStorage on web, memory natively)
//! - `dev`: Console commands for inspecting and editing progress
//! - `web`: DOM bindings (wasm only)

pub mod calendar;
pub mod config;
pub mod day;
pub mod dev;
pub mod persistence;
pub mod progress;
pub mod puzzle;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use calendar::{Calendar, Progress, Tile, TileAction};
pub use config::{GameConfig, PageConfig};
pub use day::{Day, DayError, DayStatus};
pub use persistence::{KeyValueStore, MemoryStore, StoreError};
pub use progress::{CalendarState, ProgressStore};
pub use puzzle::{PuzzleController, PuzzleState, Submission};

/// Game configuration constants
pub mod consts {
    /// Number of days on the calendar
    pub const TOTAL_DAYS: u8 = 16;

    /// Storage keys
    pub const UNLOCKED_KEY: &str = "escapegame_unlocked";
    pub const COMPLETED_KEY: &str = "escapegame_completed";
    pub const CONFIG_KEY: &str = "escapegame_config";

    /// Calendar root, relative to a puzzle page
    pub const CALENDAR_URL: &str = "../index.html";
    /// Delay between closing the win modal and leaving the page
    pub const RETURN_DELAY_MS: i32 = 500;
}
