//! In-memory ledger: a consistent per-call snapshot, and the test fake.

use chrono::{DateTime, Local};
use movodoro_core::error::HistoryError;
use movodoro_core::event::{CompletionEvent, DayStats};
use movodoro_core::history::{DayCount, HistoryStore};
use std::sync::{RwLock, RwLockReadGuard};

/// A ledger that keeps every event in a Vec, evaluated at a fixed instant.
///
/// Appends are visible to subsequent reads, which makes it a faithful fake
/// for multi-step scenarios ("complete A, then select again").
pub struct MemoryLedger {
    as_of: DateTime<Local>,
    events: RwLock<Vec<CompletionEvent>>,
}

impl MemoryLedger {
    /// An empty ledger evaluated at `as_of`.
    pub fn new(as_of: DateTime<Local>) -> Self {
        Self::with_events(as_of, Vec::new())
    }

    /// A ledger pre-populated with `events`, evaluated at `as_of`.
    pub fn with_events(as_of: DateTime<Local>, events: Vec<CompletionEvent>) -> Self {
        Self {
            as_of,
            events: RwLock::new(events),
        }
    }

    /// Move the evaluation instant, e.g. to simulate the next day.
    pub fn at(self, as_of: DateTime<Local>) -> Self {
        Self { as_of, ..self }
    }

    /// A copy of every event, in insertion order.
    pub fn events(&self) -> Result<Vec<CompletionEvent>, HistoryError> {
        Ok(self.read()?.clone())
    }

    /// Today's aggregates.
    pub fn today_stats(&self) -> Result<DayStats, HistoryError> {
        let events = self.read()?;
        Ok(DayStats::from_events(self.today(), events.iter()))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<CompletionEvent>>, HistoryError> {
        self.events
            .read()
            .map_err(|_| HistoryError::Storage("ledger lock poisoned".into()))
    }
}

impl HistoryStore for MemoryLedger {
    fn name(&self) -> &str {
        "memory"
    }

    fn as_of(&self) -> DateTime<Local> {
        self.as_of
    }

    fn count_today(&self, code: &str) -> Result<DayCount, HistoryError> {
        let today = self.today();
        let events = self.read()?;
        let mut count = DayCount::default();
        for e in events.iter().filter(|e| e.code == code && e.day() == today) {
            if e.is_completed() {
                count.completed += 1;
            } else {
                count.skipped += 1;
            }
        }
        Ok(count)
    }

    fn last_completed_at(&self, code: &str) -> Result<Option<DateTime<Local>>, HistoryError> {
        let events = self.read()?;
        Ok(events
            .iter()
            .filter(|e| e.code == code && e.is_completed())
            .map(|e| e.timestamp)
            .max())
    }

    fn today_cumulative_intensity(&self) -> Result<u32, HistoryError> {
        let today = self.today();
        let events = self.read()?;
        Ok(events
            .iter()
            .filter(|e| e.is_completed() && e.day() == today)
            .fold(0u32, |acc, e| acc.saturating_add(e.intensity)))
    }

    fn append(&self, event: CompletionEvent) -> Result<(), HistoryError> {
        self.events
            .write()
            .map_err(|_| HistoryError::Storage("ledger lock poisoned".into()))?
            .push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn counts_only_today() {
        let now = noon(2026, 3, 10);
        let ledger = MemoryLedger::with_events(
            now,
            vec![
                CompletionEvent::completed(now - Duration::hours(1), "RB-box", 4, 1),
                CompletionEvent::completed(now - Duration::hours(2), "RB-box", 4, 1),
                CompletionEvent::skipped(now - Duration::hours(3), "RB-box"),
                CompletionEvent::completed(now - Duration::days(1), "RB-box", 4, 1),
            ],
        );
        let count = ledger.count_today("RB-box").unwrap();
        assert_eq!(count, DayCount { completed: 2, skipped: 1 });
        assert_eq!(ledger.count_today("TS-lift").unwrap(), DayCount::default());
    }

    #[test]
    fn last_completed_ignores_skips() {
        let now = noon(2026, 3, 10);
        let done_at = now - Duration::days(3);
        let ledger = MemoryLedger::with_events(
            now,
            vec![
                CompletionEvent::completed(done_at, "TS-lift", 6, 8),
                CompletionEvent::skipped(now - Duration::hours(1), "TS-lift"),
            ],
        );
        assert_eq!(ledger.last_completed_at("TS-lift").unwrap(), Some(done_at));
        assert!(ledger.ever_completed("TS-lift").unwrap());
        assert!(!ledger.ever_completed("RB-box").unwrap());
    }

    #[test]
    fn cumulative_intensity_sums_today_completions() {
        let now = noon(2026, 3, 10);
        let ledger = MemoryLedger::new(now);
        ledger
            .append(CompletionEvent::completed(now, "TS-lift", 6, 9))
            .unwrap();
        ledger
            .append(CompletionEvent::completed(now, "RB-box", 4, 1))
            .unwrap();
        ledger.append(CompletionEvent::skipped(now, "TS-pushups")).unwrap();
        ledger
            .append(CompletionEvent::completed(now - Duration::days(1), "TS-lift", 6, 9))
            .unwrap();
        assert_eq!(ledger.today_cumulative_intensity().unwrap(), 10);
        assert_eq!(ledger.events().unwrap().len(), 4);
    }

    #[test]
    fn cumulative_intensity_saturates() {
        let now = noon(2026, 3, 10);
        let ledger = MemoryLedger::with_events(
            now,
            vec![
                CompletionEvent::completed(now, "TS-lift", 6, u32::MAX),
                CompletionEvent::completed(now, "RB-box", 4, 5),
            ],
        );
        assert_eq!(ledger.today_cumulative_intensity().unwrap(), u32::MAX);
    }

    #[test]
    fn moving_the_clock_changes_today() {
        let now = noon(2026, 3, 10);
        let ledger = MemoryLedger::new(now);
        ledger
            .append(CompletionEvent::completed(now, "RB-box", 4, 1))
            .unwrap();
        let tomorrow = ledger.at(now + Duration::days(1));
        assert_eq!(tomorrow.count_today("RB-box").unwrap().completed, 0);
        assert_eq!(tomorrow.today_cumulative_intensity().unwrap(), 0);
        assert!(tomorrow.ever_completed("RB-box").unwrap());
    }
}
