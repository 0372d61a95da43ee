//! Calendar grid model
//!
//! The grid is rebuilt from scratch out of the progress store after every
//! change; there is no incremental update. The web layer turns a
//! [`Calendar`] into DOM tiles.

use crate::consts::TOTAL_DAYS;
use crate::day::{Day, DayStatus};
use crate::persistence::KeyValueStore;
use crate::progress::{ProgressStore, status_of};

/// Transform applied to an open tile while hovered
pub const HOVER_TRANSFORM: &str = "translateY(-8px) scale(1.05)";

/// One day on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub day: Day,
    pub status: DayStatus,
}

/// Result of clicking a tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileAction {
    /// Full page navigation to the day
    Navigate(String),
    /// Show the locked notice with this message
    ShowLocked(String),
}

impl Tile {
    pub fn url(&self) -> String {
        self.day.url()
    }

    pub fn click(&self) -> TileAction {
        if self.status.is_open() {
            TileAction::Navigate(self.url())
        } else {
            TileAction::ShowLocked(locked_message(self.day))
        }
    }

    /// Hover transform, `None` for locked tiles
    pub fn hover_transform(&self) -> Option<&'static str> {
        self.status.is_open().then_some(HOVER_TRANSFORM)
    }
}

pub fn locked_message(day: Day) -> String {
    format!("Day {} is locked!", day)
}

/// Completion progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
}

impl Progress {
    pub fn percentage(&self) -> f64 {
        self.completed as f64 / TOTAL_DAYS as f64 * 100.0
    }

    /// CSS width of the fill bar
    pub fn fill_width(&self) -> String {
        format!("{}%", self.percentage())
    }

    pub fn text(&self) -> String {
        format!("{} / {} days completed", self.completed, TOTAL_DAYS)
    }
}

/// The full grid plus progress bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub tiles: Vec<Tile>,
    pub progress: Progress,
}

impl Calendar {
    /// Build the grid from current store state
    pub fn build<S: KeyValueStore>(progress: &ProgressStore<S>) -> Self {
        let unlocked = progress.unlocked();
        let completed = progress.completed();

        let tiles = Day::all()
            .map(|day| Tile {
                day,
                status: status_of(day, &unlocked, &completed),
            })
            .collect();

        Self {
            tiles,
            progress: Progress {
                completed: completed.len(),
            },
        }
    }

    pub fn tile(&self, day: Day) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.day == day)
    }

    pub fn count(&self, status: DayStatus) -> usize {
        self.tiles.iter().filter(|t| t.status == status).count()
    }

    /// Plain-text rendition, one row of four tiles per line
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in self.tiles.chunks(4) {
            let cells: Vec<String> = row
                .iter()
                .map(|t| format!("{:>2} {}", t.day.number(), t.status.icon()))
                .collect();
            out.push_str(&cells.join("  "));
            out.push('\n');
        }
        out.push_str(&self.progress.text());
        out
    }
}
