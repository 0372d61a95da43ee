//! Developer console commands
//!
//! Thin layer over [`ProgressStore`] that accepts raw day numbers from the
//! console. Bad input and storage failures are logged, never raised.
//! Every mutating command hands a freshly built [`Calendar`] to the redraw
//! hook, if one is set.

use crate::calendar::Calendar;
use crate::day::Day;
use crate::persistence::{KeyValueStore, StoreError};
use crate::progress::{CalendarState, ProgressStore};

pub struct DevCommands<'a, S> {
    progress: &'a mut ProgressStore<S>,
    redraw: Option<Box<dyn FnMut(&Calendar) + 'a>>,
}

impl<'a, S: KeyValueStore> DevCommands<'a, S> {
    pub fn new(progress: &'a mut ProgressStore<S>) -> Self {
        Self {
            progress,
            redraw: None,
        }
    }

    /// Rebuild and redraw the calendar after each mutating command
    pub fn on_change(mut self, redraw: impl FnMut(&Calendar) + 'a) -> Self {
        self.redraw = Some(Box::new(redraw));
        self
    }

    pub fn unlock_day(&mut self, number: i64) -> bool {
        let changed = parse_day(number)
            .and_then(|day| report(self.progress.unlock(day)))
            .unwrap_or(false);
        self.changed();
        changed
    }

    pub fn lock_day(&mut self, number: i64) -> bool {
        let changed = parse_day(number)
            .and_then(|day| report(self.progress.lock(day)))
            .unwrap_or(false);
        self.changed();
        changed
    }

    /// Mark a day solved without going through its puzzle page
    pub fn complete_day(&mut self, number: i64) -> bool {
        let changed = parse_day(number)
            .and_then(|day| report(self.progress.mark_completed(day)))
            .unwrap_or(false);
        self.changed();
        changed
    }

    pub fn reset_progress(&mut self) -> bool {
        let done = report(self.progress.reset()).is_some();
        self.changed();
        done
    }

    pub fn unlock_all_days(&mut self) -> bool {
        let done = report(self.progress.unlock_all()).is_some();
        self.changed();
        done
    }

    pub fn clear_completed_days(&mut self) -> bool {
        let done = report(self.progress.clear_completed()).is_some();
        self.changed();
        done
    }

    pub fn calendar_state(&self) -> CalendarState {
        let state = self.progress.snapshot();
        log::info!("Calendar State: {:?}", state);
        state
    }

    fn changed(&mut self) {
        if let Some(redraw) = self.redraw.as_mut() {
            redraw(&Calendar::build(&*self.progress));
        }
    }
}

fn parse_day(number: i64) -> Option<Day> {
    Day::new(number)
        .map_err(|e| log::error!("{}", e))
        .ok()
}

fn report<T>(result: Result<T, StoreError>) -> Option<T> {
    result.map_err(|e| log::warn!("Progress not saved: {}", e)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::DayStatus;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_rejects_out_of_range() {
        let mut progress = ProgressStore::new(MemoryStore::new());
        let mut dev = DevCommands::new(&mut progress);
        assert!(!dev.unlock_day(0));
        assert!(!dev.unlock_day(17));
        assert!(!dev.lock_day(-5));
        drop(dev);
        assert!(progress.store().is_empty());
    }

    #[test]
    fn test_unlock_and_lock() {
        let mut progress = ProgressStore::new(MemoryStore::new());
        let mut dev = DevCommands::new(&mut progress);
        assert!(dev.unlock_day(7));
        assert!(!dev.unlock_day(7));
        assert!(dev.lock_day(7));
        assert!(!dev.lock_day(1));
        assert_eq!(dev.calendar_state().unlocked.len(), 1);
    }

    #[test]
    fn test_bulk_commands() {
        let mut progress = ProgressStore::new(MemoryStore::new());
        progress.mark_completed(Day::new(2).unwrap()).unwrap();

        let mut dev = DevCommands::new(&mut progress);
        assert!(dev.unlock_all_days());
        assert!(dev.calendar_state().locked.is_empty());
        assert!(dev.clear_completed_days());
        assert!(dev.calendar_state().completed.is_empty());
        assert!(dev.reset_progress());

        drop(dev);
        assert_eq!(progress.status(Day::new(2).unwrap()), DayStatus::Locked);
    }

    #[test]
    fn test_complete_day() {
        let mut progress = ProgressStore::new(MemoryStore::new());
        let mut dev = DevCommands::new(&mut progress);
        assert!(dev.complete_day(9));
        assert!(!dev.complete_day(9));
        assert!(!dev.complete_day(40));
        drop(dev);
        assert_eq!(progress.status(Day::new(9).unwrap()), DayStatus::Completed);
    }

    #[test]
    fn test_every_command_redraws() {
        let mut progress = ProgressStore::new(MemoryStore::new());
        let mut frames: Vec<Calendar> = Vec::new();
        {
            let mut dev = DevCommands::new(&mut progress).on_change(|c| frames.push(c.clone()));
            dev.unlock_day(4);
            dev.complete_day(4);
            dev.lock_day(1);
            dev.unlock_day(99);
            dev.unlock_all_days();
            dev.clear_completed_days();
            dev.reset_progress();
            dev.calendar_state();
        }

        assert_eq!(frames.len(), 7);
        let day4 = Day::new(4).unwrap();
        assert_eq!(frames[0].tile(day4).unwrap().status, DayStatus::Unlocked);
        assert_eq!(frames[1].tile(day4).unwrap().status, DayStatus::Completed);
        assert_eq!(frames[1].progress.completed, 1);
        assert_eq!(frames[4].count(DayStatus::Locked), 0);
        assert_eq!(frames[5].progress.completed, 0);
        assert_eq!(frames[6].count(DayStatus::Locked), 15);
    }

    #[test]
    fn test_storage_failure_is_reported_not_raised() {
        let mut progress = ProgressStore::new(MemoryStore::read_only());
        let mut dev = DevCommands::new(&mut progress);
        assert!(!dev.unlock_day(4));
        assert!(!dev.reset_progress());
        assert!(!dev.unlock_all_days());
    }
}
