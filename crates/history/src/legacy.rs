//! Migration of legacy plain-text day logs into the JSONL ledger.
//!
//! Legacy files are named `YYYYMMDD.log` and hold one whitespace-separated
//! record per line: `TIMESTAMP CODE STATUS DURATION RPE`, where `TIMESTAMP`
//! is RFC 3339 and `STATUS` is `done` or `skip`.

use chrono::{DateTime, Local};
use movodoro_core::error::HistoryError;
use movodoro_core::event::{CompletionEvent, Outcome};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::file_backend::{LEDGER_EXT, list_files};

/// Extension of legacy day logs.
pub const LEGACY_EXT: &str = "log";

/// Per-file result of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Converted; original kept as `.log.bak`
    Converted { entries: usize },
    /// A `.jsonl` file for that day already exists
    AlreadyMigrated,
    /// Could not be converted; the original is untouched
    Failed { reason: String },
}

/// Summary of a migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl MigrationReport {
    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Converted { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::AlreadyMigrated))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Parse one legacy line.
pub fn parse_legacy_line(line: &str) -> Result<CompletionEvent, HistoryError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 5 {
        return Err(HistoryError::InvalidRecord(format!(
            "expected 5 fields, got {}",
            parts.len()
        )));
    }

    let timestamp = DateTime::parse_from_rfc3339(parts[0])
        .map_err(|e| HistoryError::InvalidRecord(format!("invalid timestamp: {e}")))?
        .with_timezone(&Local);
    let outcome = match parts[2] {
        "done" => Outcome::Completed,
        "skip" => Outcome::Skipped,
        other => {
            return Err(HistoryError::InvalidRecord(format!("invalid status: {other}")));
        }
    };
    let duration: u32 = parts[3]
        .parse()
        .map_err(|_| HistoryError::InvalidRecord(format!("invalid duration: {}", parts[3])))?;
    let intensity: u32 = parts[4]
        .parse()
        .map_err(|_| HistoryError::InvalidRecord(format!("invalid RPE: {}", parts[4])))?;

    Ok(match outcome {
        Outcome::Completed => CompletionEvent::completed(timestamp, parts[1], duration, intensity),
        Outcome::Skipped => CompletionEvent::skipped(timestamp, parts[1]),
    })
}

/// Convert every legacy `.log` file in `dir` to the JSONL format.
pub fn migrate_legacy_logs(dir: &Path) -> Result<MigrationReport, HistoryError> {
    let mut report = MigrationReport::default();
    for path in list_files(dir, LEGACY_EXT)? {
        let outcome = migrate_file(&path);
        match &outcome {
            FileOutcome::Converted { entries } => {
                info!(path = %path.display(), entries, "Migrated legacy log");
            }
            FileOutcome::Failed { reason } => {
                warn!(path = %path.display(), reason = %reason, "Legacy log migration failed");
            }
            FileOutcome::AlreadyMigrated => {}
        }
        report.files.push((path, outcome));
    }
    Ok(report)
}

fn migrate_file(path: &Path) -> FileOutcome {
    let target = path.with_extension(LEDGER_EXT);
    if target.exists() {
        return FileOutcome::AlreadyMigrated;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return FileOutcome::Failed { reason: format!("could not read: {e}") },
    };

    let events: Vec<CompletionEvent> = content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| parse_legacy_line(l).ok())
        .collect();
    if events.is_empty() {
        return FileOutcome::Failed { reason: "no valid entries found".into() };
    }

    let mut out = String::new();
    for event in &events {
        match serde_json::to_string(event) {
            Ok(line) => {
                out.push_str(&line);
                out.push('\n');
            }
            Err(e) => return FileOutcome::Failed { reason: format!("could not encode: {e}") },
        }
    }

    if let Err(e) = std::fs::write(&target, out) {
        return FileOutcome::Failed { reason: format!("could not write {}: {e}", target.display()) };
    }

    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    if let Err(e) = std::fs::rename(path, PathBuf::from(backup)) {
        // Leave the source in place rather than risk a double import later.
        let _ = std::fs::remove_file(&target);
        return FileOutcome::Failed { reason: format!("could not back up original: {e}") };
    }

    FileOutcome::Converted { entries: events.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileLedger;
    use tempfile::TempDir;

    const OLD_LOG: &str = "2025-10-12T10:00:00Z TB-box-breath done 4 1\n\
                           2025-10-12T11:00:00Z TS-pushups skip 0 0\n\
                           2025-10-12T12:00:00Z TS-heavy-lift done 6 9\n";

    #[test]
    fn parses_valid_line() {
        let e = parse_legacy_line("2025-10-12T14:09:37+01:00 GUP-naked-getups done 4 3").unwrap();
        assert_eq!(e.code, "GUP-naked-getups");
        assert_eq!(e.outcome, Outcome::Completed);
        assert_eq!(e.duration, 4);
        assert_eq!(e.intensity, 3);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_legacy_line("bad-timestamp GUP-naked-getups done 4 3").is_err());
        assert!(parse_legacy_line("2025-10-12T14:09:37+01:00 GUP-naked-getups done").is_err());
        assert!(parse_legacy_line("2025-10-12T14:09:37+01:00 GUP-naked-getups done abc 3").is_err());
        assert!(parse_legacy_line("2025-10-12T14:09:37+01:00 GUP-naked-getups maybe 4 3").is_err());
    }

    #[test]
    fn skip_lines_normalize_to_zero() {
        let e = parse_legacy_line("2025-10-12T14:09:37+01:00 TS-pushups skip 5 7").unwrap();
        assert_eq!(e.outcome, Outcome::Skipped);
        assert_eq!((e.duration, e.intensity), (0, 0));
    }

    #[test]
    fn converts_and_backs_up() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("20251012.log"), OLD_LOG).unwrap();

        let report = migrate_legacy_logs(tmp.path()).unwrap();
        assert_eq!(report.converted(), 1);
        assert_eq!(report.failed(), 0);
        assert!(tmp.path().join("20251012.jsonl").exists());
        assert!(tmp.path().join("20251012.log.bak").exists());
        assert!(!tmp.path().join("20251012.log").exists());

        let ledger = FileLedger::new(tmp.path());
        let events = ledger.all_events().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2].code, "TS-heavy-lift");
        assert_eq!(events[2].intensity, 9);
    }

    #[test]
    fn existing_jsonl_is_left_alone() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("20251012.log"), OLD_LOG).unwrap();
        std::fs::write(tmp.path().join("20251012.jsonl"), "").unwrap();

        let report = migrate_legacy_logs(tmp.path()).unwrap();
        assert_eq!(report.skipped(), 1);
        assert!(tmp.path().join("20251012.log").exists());
    }

    #[test]
    fn file_without_valid_lines_fails() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("20251013.log"), "garbage\nmore garbage\n").unwrap();

        let report = migrate_legacy_logs(tmp.path()).unwrap();
        assert_eq!(report.failed(), 1);
        assert!(tmp.path().join("20251013.log").exists());
        assert!(!tmp.path().join("20251013.jsonl").exists());
    }

    #[test]
    fn malformed_lines_are_dropped() {
        let tmp = TempDir::new().unwrap();
        let content = format!("{OLD_LOG}not a record\n2025-10-12T13:00:00Z X-y done nope 1\n");
        std::fs::write(tmp.path().join("20251012.log"), content).unwrap();

        let report = migrate_legacy_logs(tmp.path()).unwrap();
        assert_eq!(report.files[0].1, FileOutcome::Converted { entries: 3 });
    }
}
