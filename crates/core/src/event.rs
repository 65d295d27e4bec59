//! Completion events: one record per user decision on an item.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What the user did with a presented item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Completed,
    Skipped,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Completed => write!(f, "completed"),
            Outcome::Skipped => write!(f, "skipped"),
        }
    }
}

/// A single ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub timestamp: DateTime<Local>,

    /// Full item code
    pub code: String,

    pub outcome: Outcome,

    /// Actual minutes spent (0 for skips)
    pub duration: u32,

    /// Actual intensity (0 for skips)
    pub intensity: u32,

    /// Subset active when the decision was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subset: Option<String>,
}

impl CompletionEvent {
    /// A completion with the actual duration and intensity.
    pub fn completed(
        timestamp: DateTime<Local>,
        code: impl Into<String>,
        duration: u32,
        intensity: u32,
    ) -> Self {
        Self {
            timestamp,
            code: code.into(),
            outcome: Outcome::Completed,
            duration,
            intensity,
            subset: None,
        }
    }

    /// A skip. Duration and intensity are always zero.
    pub fn skipped(timestamp: DateTime<Local>, code: impl Into<String>) -> Self {
        Self {
            timestamp,
            code: code.into(),
            outcome: Outcome::Skipped,
            duration: 0,
            intensity: 0,
            subset: None,
        }
    }

    pub fn with_subset(mut self, subset: Option<String>) -> Self {
        self.subset = subset.filter(|s| !s.is_empty());
        self
    }

    pub fn is_completed(&self) -> bool {
        self.outcome == Outcome::Completed
    }

    /// The local calendar day this event belongs to.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Aggregates for a single day of the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct DayStats {
    pub date: NaiveDate,
    pub completed: Vec<CompletionEvent>,
    pub skipped: Vec<CompletionEvent>,
    pub total_duration: u32,
    pub total_intensity: u32,
}

impl DayStats {
    /// Summarize the events that fall on `date`. Events from other days are ignored.
    pub fn from_events<'a>(date: NaiveDate, events: impl IntoIterator<Item = &'a CompletionEvent>) -> Self {
        let mut stats = Self {
            date,
            completed: vec![],
            skipped: vec![],
            total_duration: 0,
            total_intensity: 0,
        };
        for event in events.into_iter().filter(|e| e.day() == date) {
            match event.outcome {
                Outcome::Completed => {
                    stats.total_duration = stats.total_duration.saturating_add(event.duration);
                    stats.total_intensity = stats.total_intensity.saturating_add(event.intensity);
                    stats.completed.push(event.clone());
                }
                Outcome::Skipped => stats.skipped.push(event.clone()),
            }
        }
        stats
    }

    /// Total number of decisions (completed + skipped).
    pub fn total_entries(&self) -> usize {
        self.completed.len() + self.skipped.len()
    }

    /// Distinct subset labels seen today, sorted.
    pub fn subsets(&self) -> Vec<String> {
        self.completed
            .iter()
            .chain(self.skipped.iter())
            .filter_map(|e| e.subset.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Completed-count for one code.
    pub fn completed_count(&self, code: &str) -> usize {
        self.completed.iter().filter(|e| e.code == code).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap()
    }

    #[test]
    fn skip_carries_zero_duration_and_intensity() {
        let e = CompletionEvent::skipped(at(2026, 1, 5, 10), "TS-pushups");
        assert_eq!(e.duration, 0);
        assert_eq!(e.intensity, 0);
        assert!(!e.is_completed());
    }

    #[test]
    fn empty_subset_label_is_dropped() {
        let e = CompletionEvent::completed(at(2026, 1, 5, 10), "RB-box", 4, 1)
            .with_subset(Some(String::new()));
        assert!(e.subset.is_none());
    }

    #[test]
    fn day_totals_saturate() {
        let day = at(2026, 1, 5, 10);
        let events = [
            CompletionEvent::completed(day, "TS-lift", u32::MAX, u32::MAX),
            CompletionEvent::completed(day, "RB-box", 4, 5),
        ];
        let stats = DayStats::from_events(day.date_naive(), &events);
        assert_eq!(stats.total_duration, u32::MAX);
        assert_eq!(stats.total_intensity, u32::MAX);
        assert_eq!(stats.completed.len(), 2);
    }

    #[test]
    fn outcome_serializes_snake_case() {
        let e = CompletionEvent::completed(at(2026, 1, 5, 10), "RB-box", 4, 1);
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"completed\""));
        assert!(!json.contains("subset"));
    }

    #[test]
    fn day_stats_sum_only_completed_on_that_day() {
        let events = vec![
            CompletionEvent::completed(at(2026, 1, 5, 9), "RB-box", 4, 1),
            CompletionEvent::completed(at(2026, 1, 5, 11), "TS-lift", 6, 9)
                .with_subset(Some("travel".into())),
            CompletionEvent::skipped(at(2026, 1, 5, 12), "TS-pushups"),
            CompletionEvent::completed(at(2026, 1, 4, 12), "TS-lift", 6, 9),
        ];
        let stats = DayStats::from_events(at(2026, 1, 5, 0).date_naive(), &events);
        assert_eq!(stats.completed.len(), 2);
        assert_eq!(stats.skipped.len(), 1);
        assert_eq!(stats.total_duration, 10);
        assert_eq!(stats.total_intensity, 10);
        assert_eq!(stats.total_entries(), 3);
        assert_eq!(stats.subsets(), vec!["travel".to_string()]);
        assert_eq!(stats.completed_count("TS-lift"), 1);
    }
}
