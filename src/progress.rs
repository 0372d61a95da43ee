//! Player progress: which days are unlocked and which are completed
//!
//! Both sets are stored as JSON arrays of day numbers. Day 1 is always
//! unlocked, on read and on write.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::consts::{COMPLETED_KEY, UNLOCKED_KEY};
use crate::day::{Day, DayStatus};
use crate::persistence::{KeyValueStore, StoreError};

/// Ordered set of days
pub type DaySet = BTreeSet<Day>;

/// Snapshot of the whole calendar, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarState {
    pub unlocked: Vec<Day>,
    pub completed: Vec<Day>,
    pub locked: Vec<Day>,
}

/// Unlocked/completed sets backed by a key-value store
#[derive(Debug)]
pub struct ProgressStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unlocked days, `{1}` when nothing is stored
    pub fn unlocked(&self) -> DaySet {
        let mut days = self.read_set(UNLOCKED_KEY);
        days.insert(Day::FIRST);
        days
    }

    /// Completed days, empty when nothing is stored
    pub fn completed(&self) -> DaySet {
        self.read_set(COMPLETED_KEY)
    }

    pub fn status(&self, day: Day) -> DayStatus {
        status_of(day, &self.unlocked(), &self.completed())
    }

    /// Add a day to the unlocked set. Returns whether anything changed.
    pub fn unlock(&mut self, day: Day) -> Result<bool, StoreError> {
        let mut unlocked = self.unlocked();
        if !unlocked.insert(day) {
            return Ok(false);
        }
        self.write_unlocked(unlocked)?;
        log::info!("Day {} unlocked", day);
        Ok(true)
    }

    /// Remove a day from both sets. Day 1 cannot be locked.
    pub fn lock(&mut self, day: Day) -> Result<bool, StoreError> {
        if day.is_first() {
            log::info!("Day 1 is always unlocked, ignoring lock");
            return Ok(false);
        }

        let mut unlocked = self.unlocked();
        let mut completed = self.completed();
        let was_unlocked = unlocked.remove(&day);
        let was_completed = completed.remove(&day);

        if was_unlocked {
            self.write_unlocked(unlocked)?;
        }
        if was_completed {
            self.write_set(COMPLETED_KEY, &completed)?;
        }
        if was_unlocked || was_completed {
            log::info!("Day {} locked", day);
        }
        Ok(was_unlocked || was_completed)
    }

    /// Record a solved puzzle. Returns whether the day was newly completed.
    pub fn mark_completed(&mut self, day: Day) -> Result<bool, StoreError> {
        let mut completed = self.completed();
        if !completed.insert(day) {
            return Ok(false);
        }
        self.write_set(COMPLETED_KEY, &completed)?;
        log::info!("Day {} completed ({} total)", day, completed.len());
        Ok(true)
    }

    /// Back to a fresh calendar: only day 1 unlocked, nothing completed
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.write_unlocked(DaySet::new())?;
        self.write_set(COMPLETED_KEY, &DaySet::new())?;
        log::info!("Progress reset");
        Ok(())
    }

    pub fn unlock_all(&mut self) -> Result<(), StoreError> {
        self.write_unlocked(Day::all().collect())?;
        log::info!("All days unlocked");
        Ok(())
    }

    /// Drop the completed set entirely. Unlocked days are kept.
    pub fn clear_completed(&mut self) -> Result<(), StoreError> {
        self.store.remove(COMPLETED_KEY)?;
        log::info!("Completed days cleared");
        Ok(())
    }

    pub fn snapshot(&self) -> CalendarState {
        let unlocked = self.unlocked();
        let completed = self.completed();
        let locked = Day::all()
            .filter(|&d| status_of(d, &unlocked, &completed) == DayStatus::Locked)
            .collect();
        CalendarState {
            unlocked: unlocked.into_iter().collect(),
            completed: completed.into_iter().collect(),
            locked,
        }
    }

    fn write_unlocked(&mut self, mut days: DaySet) -> Result<(), StoreError> {
        days.insert(Day::FIRST);
        self.write_set(UNLOCKED_KEY, &days)
    }

    fn write_set(&mut self, key: &str, days: &DaySet) -> Result<(), StoreError> {
        let json = serde_json::to_string(days)?;
        self.store.set(key, &json)
    }

    /// Absent, malformed or non-array values read as the empty set.
    /// Entries that are not a day number are dropped one by one.
    fn read_set(&self, key: &str) -> DaySet {
        let Some(json) = self.store.get(key) else {
            return DaySet::new();
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&json) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Ignoring unreadable `{}`: {}", key, e);
                return DaySet::new();
            }
        };

        entries
            .into_iter()
            .filter_map(|entry| match entry.as_i64().map(Day::new) {
                Some(Ok(day)) => Some(day),
                Some(Err(e)) => {
                    log::warn!("Dropping entry from `{}`: {}", key, e);
                    None
                }
                None => {
                    log::warn!("Dropping non-integer entry from `{}`: {}", key, entry);
                    None
                }
            })
            .collect()
    }
}

/// Completed wins over unlocked; anything else is locked
pub fn status_of(day: Day, unlocked: &DaySet, completed: &DaySet) -> DayStatus {
    if completed.contains(&day) {
        DayStatus::Completed
    } else if unlocked.contains(&day) {
        DayStatus::Unlocked
    } else {
        DayStatus::Locked
    }
}
