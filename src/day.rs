//! Calendar days and their derived status

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::TOTAL_DAYS;

/// Error raised when a day number falls outside the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid day {0}: days run from 1 to 16")]
pub struct DayError(pub i64);

/// A validated calendar day (1..=16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Day(u8);

impl Day {
    /// The first day, which can never be locked
    pub const FIRST: Day = Day(1);

    pub fn new(number: i64) -> Result<Self, DayError> {
        if (1..=TOTAL_DAYS as i64).contains(&number) {
            Ok(Self(number as u8))
        } else {
            Err(DayError(number))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    /// Page URL relative to the calendar root
    pub fn url(self) -> String {
        format!("pages/day{}.html", self.0)
    }

    /// All days in ascending order
    pub fn all() -> impl Iterator<Item = Day> {
        (1..=TOTAL_DAYS).map(Day)
    }
}

impl TryFrom<i64> for Day {
    type Error = DayError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Day::new(value)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> u8 {
        day.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derived status of a day, computed from the persisted sets on every render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    /// Not yet reachable
    Locked,
    /// Reachable, puzzle not solved
    Unlocked,
    /// Puzzle solved at least once
    Completed,
}

impl DayStatus {
    /// CSS class applied to the tile
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Locked => "locked",
            DayStatus::Unlocked => "unlocked",
            DayStatus::Completed => "completed",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DayStatus::Locked => "🔒",
            DayStatus::Unlocked => "🔓",
            DayStatus::Completed => "✅",
        }
    }

    /// Whether the player may open this day's page
    pub fn is_open(&self) -> bool {
        !matches!(self, DayStatus::Locked)
    }
}
