//! History store trait: the read/append surface of the completion ledger.
//!
//! The selection engine only ever reads through this trait. Implementations
//! live in `movodoro-history`: a day-partitioned JSONL ledger on disk and an
//! in-memory ledger used both as a per-call snapshot and as a test fake.

use crate::error::HistoryError;
use crate::event::CompletionEvent;
use chrono::{DateTime, Local, NaiveDate};

/// Today's decisions for a single item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayCount {
    pub completed: u32,
    pub skipped: u32,
}

/// The core HistoryStore trait.
///
/// "Today" is defined by [`HistoryStore::as_of`], so a store pinned to a
/// single instant gives every read in a selection call the same day boundary.
///
/// Implementations: file ledger, in-memory ledger.
pub trait HistoryStore: Send + Sync {
    /// The backend name (e.g., "file", "memory").
    fn name(&self) -> &str;

    /// The instant this view of the ledger is evaluated at.
    fn as_of(&self) -> DateTime<Local>;

    /// The local calendar day considered "today".
    fn today(&self) -> NaiveDate {
        self.as_of().date_naive()
    }

    /// Completed and skipped counts for `code` today.
    fn count_today(&self, code: &str) -> Result<DayCount, HistoryError>;

    /// Whether `code` has any completed record in all-time history.
    fn ever_completed(&self, code: &str) -> Result<bool, HistoryError> {
        Ok(self.last_completed_at(code)?.is_some())
    }

    /// Timestamp of the most recent completion of `code`.
    fn last_completed_at(&self, code: &str) -> Result<Option<DateTime<Local>>, HistoryError>;

    /// Sum of intensity over today's completed events.
    fn today_cumulative_intensity(&self) -> Result<u32, HistoryError>;

    /// Append a new event.
    fn append(&self, event: CompletionEvent) -> Result<(), HistoryError>;
}
