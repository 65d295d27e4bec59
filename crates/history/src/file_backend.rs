//! File-based ledger: append-only, day-partitioned JSON-lines storage.
//!
//! Each local day gets its own file named `YYYYMMDD.jsonl`; each line is a
//! JSON-encoded `CompletionEvent`. Files are only ever appended to (one
//! whole line per write) or removed wholesale by `clear_day`.
//!
//! Storage location: `~/.movodoro/logs/`

use chrono::{DateTime, Local, NaiveDate};
use movodoro_core::error::HistoryError;
use movodoro_core::event::{CompletionEvent, DayStats};
use movodoro_core::history::{DayCount, HistoryStore};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::in_memory::MemoryLedger;

/// File extension of ledger day files.
pub const LEDGER_EXT: &str = "jsonl";

/// A directory of per-day JSONL files.
///
/// Reads go to disk every time. Use [`FileLedger::snapshot`] to get a view
/// pinned at one instant for a whole selection call.
#[derive(Debug, Clone)]
pub struct FileLedger {
    dir: PathBuf,
}

impl FileLedger {
    /// Create a ledger rooted at `dir`. The directory is created on first append.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default directory: `~/.movodoro/logs`
    pub fn default_dir() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".movodoro").join("logs")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `date`'s events.
    pub fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}.{LEDGER_EXT}", date.format("%Y%m%d")))
    }

    /// Events recorded on `date`, in file order. A missing file is an empty day.
    pub fn day_events(&self, date: NaiveDate) -> Result<Vec<CompletionEvent>, HistoryError> {
        read_events(&self.day_path(date))
    }

    /// Every event in the ledger, oldest day first.
    pub fn all_events(&self) -> Result<Vec<CompletionEvent>, HistoryError> {
        let mut events = Vec::new();
        for path in self.day_files()? {
            events.extend(read_events(&path)?);
        }
        Ok(events)
    }

    /// Aggregates for `date`.
    pub fn day_stats(&self, date: NaiveDate) -> Result<DayStats, HistoryError> {
        let events = self.day_events(date)?;
        Ok(DayStats::from_events(date, &events))
    }

    /// Remove `date`'s file. Returns whether anything was removed.
    pub fn clear_day(&self, date: NaiveDate) -> Result<bool, HistoryError> {
        let path = self.day_path(date);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Cleared ledger day");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(HistoryError::Write {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Load the whole ledger into memory, evaluated at the current instant.
    pub fn snapshot(&self) -> Result<MemoryLedger, HistoryError> {
        self.snapshot_at(Local::now())
    }

    /// Load the whole ledger into memory, evaluated at `as_of`.
    pub fn snapshot_at(&self, as_of: DateTime<Local>) -> Result<MemoryLedger, HistoryError> {
        let events = self.all_events()?;
        debug!(dir = %self.dir.display(), count = events.len(), "Ledger snapshot loaded");
        Ok(MemoryLedger::with_events(as_of, events))
    }

    /// Day files sorted by name (`YYYYMMDD` sorts chronologically).
    pub fn day_files(&self) -> Result<Vec<PathBuf>, HistoryError> {
        list_files(&self.dir, LEDGER_EXT)
    }
}

impl HistoryStore for FileLedger {
    fn name(&self) -> &str {
        "file"
    }

    fn as_of(&self) -> DateTime<Local> {
        Local::now()
    }

    fn count_today(&self, code: &str) -> Result<DayCount, HistoryError> {
        let mut count = DayCount::default();
        for e in self.day_events(self.today())?.iter().filter(|e| e.code == code) {
            if e.is_completed() {
                count.completed += 1;
            } else {
                count.skipped += 1;
            }
        }
        Ok(count)
    }

    fn last_completed_at(&self, code: &str) -> Result<Option<DateTime<Local>>, HistoryError> {
        Ok(self
            .all_events()?
            .into_iter()
            .filter(|e| e.code == code && e.is_completed())
            .map(|e| e.timestamp)
            .max())
    }

    fn today_cumulative_intensity(&self) -> Result<u32, HistoryError> {
        Ok(self.day_stats(self.today())?.total_intensity)
    }

    fn append(&self, event: CompletionEvent) -> Result<(), HistoryError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| HistoryError::Write {
            path: self.dir.display().to_string(),
            reason: format!("failed to create logs directory: {e}"),
        })?;

        let path = self.day_path(event.day());
        let mut line = serde_json::to_string(&event)
            .map_err(|e| HistoryError::InvalidRecord(format!("failed to serialize event: {e}")))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| HistoryError::Write {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        file.write_all(line.as_bytes())
            .map_err(|e| HistoryError::Write {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!(code = %event.code, outcome = %event.outcome, path = %path.display(), "Event appended");
        Ok(())
    }
}

/// Parse a JSONL day file, skipping corrupted lines.
fn read_events(path: &Path) -> Result<Vec<CompletionEvent>, HistoryError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(HistoryError::Read {
                path: path.display().to_string(),
                reason: e.to_string(),
            });
        }
    };

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str::<CompletionEvent>(line) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping corrupted ledger entry");
                None
            }
        })
        .collect())
}

/// Files in `dir` with extension `ext` whose stem is an 8-digit date, sorted.
pub(crate) fn list_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, HistoryError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(HistoryError::Read {
                path: dir.display().to_string(),
                reason: e.to_string(),
            });
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|e| e == ext))
        .filter(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()))
        })
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn append_partitions_by_day() {
        let tmp = TempDir::new().unwrap();
        let ledger = FileLedger::new(tmp.path().join("logs"));
        let day1 = noon(2026, 2, 1);
        let day2 = noon(2026, 2, 2);

        ledger
            .append(CompletionEvent::completed(day1, "RB-box", 4, 1))
            .unwrap();
        ledger
            .append(CompletionEvent::completed(day2, "TS-lift", 6, 9))
            .unwrap();
        ledger.append(CompletionEvent::skipped(day2, "TS-pushups")).unwrap();

        assert!(tmp.path().join("logs/20260201.jsonl").exists());
        assert!(tmp.path().join("logs/20260202.jsonl").exists());
        assert_eq!(ledger.day_events(day1.date_naive()).unwrap().len(), 1);
        assert_eq!(ledger.day_events(day2.date_naive()).unwrap().len(), 2);
        assert_eq!(ledger.all_events().unwrap().len(), 3);
        assert_eq!(ledger.all_events().unwrap()[0].code, "RB-box");
    }

    #[test]
    fn missing_directory_is_an_empty_ledger() {
        let tmp = TempDir::new().unwrap();
        let ledger = FileLedger::new(tmp.path().join("nope"));
        assert!(ledger.all_events().unwrap().is_empty());
        assert_eq!(ledger.count_today("RB-box").unwrap(), DayCount::default());
        assert_eq!(ledger.today_cumulative_intensity().unwrap(), 0);
    }

    #[test]
    fn handles_corrupted_lines() {
        let tmp = TempDir::new().unwrap();
        let ledger = FileLedger::new(tmp.path());
        let day = noon(2026, 2, 1);
        ledger
            .append(CompletionEvent::completed(day, "RB-box", 4, 1))
            .unwrap();
        let path = ledger.day_path(day.date_naive());
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "this is not json").unwrap();
        drop(file);
        ledger
            .append(CompletionEvent::completed(day, "RB-box", 4, 1))
            .unwrap();

        assert_eq!(ledger.day_events(day.date_naive()).unwrap().len(), 2);
    }

    #[test]
    fn ignores_foreign_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("notes.jsonl"), "{}\n").unwrap();
        std::fs::write(tmp.path().join("20260101.log"), "legacy\n").unwrap();
        let ledger = FileLedger::new(tmp.path());
        assert!(ledger.day_files().unwrap().is_empty());
    }

    #[test]
    fn clear_day_removes_only_that_day() {
        let tmp = TempDir::new().unwrap();
        let ledger = FileLedger::new(tmp.path());
        let day1 = noon(2026, 2, 1);
        let day2 = noon(2026, 2, 2);
        ledger
            .append(CompletionEvent::completed(day1, "RB-box", 4, 1))
            .unwrap();
        ledger
            .append(CompletionEvent::completed(day2, "RB-box", 4, 1))
            .unwrap();

        assert!(ledger.clear_day(day2.date_naive()).unwrap());
        assert!(!ledger.clear_day(day2.date_naive()).unwrap());
        assert_eq!(ledger.all_events().unwrap().len(), 1);
    }

    #[test]
    fn snapshot_pins_today() {
        let tmp = TempDir::new().unwrap();
        let ledger = FileLedger::new(tmp.path());
        let now = noon(2026, 2, 2);
        ledger
            .append(CompletionEvent::completed(now - Duration::hours(2), "TS-lift", 6, 9))
            .unwrap();
        ledger
            .append(CompletionEvent::completed(now - Duration::days(1), "TS-lift", 6, 9))
            .unwrap();

        let snap = ledger.snapshot_at(now).unwrap();
        assert_eq!(snap.count_today("TS-lift").unwrap().completed, 1);
        assert_eq!(snap.today_cumulative_intensity().unwrap(), 9);
        assert_eq!(
            snap.last_completed_at("TS-lift").unwrap(),
            Some(now - Duration::hours(2))
        );
    }

    #[test]
    fn day_stats_from_disk() {
        let tmp = TempDir::new().unwrap();
        let ledger = FileLedger::new(tmp.path());
        let day = noon(2026, 2, 1);
        ledger
            .append(
                CompletionEvent::completed(day, "RB-box", 4, 1).with_subset(Some("calm".into())),
            )
            .unwrap();
        ledger.append(CompletionEvent::skipped(day, "TS-lift")).unwrap();

        let stats = ledger.day_stats(day.date_naive()).unwrap();
        assert_eq!(stats.completed.len(), 1);
        assert_eq!(stats.skipped.len(), 1);
        assert_eq!(stats.total_duration, 4);
        assert_eq!(stats.subsets(), vec!["calm".to_string()]);
    }
}
