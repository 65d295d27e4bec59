//! Weight computation.
//!
//! Starts from the item's base weight and applies independent,
//! multiplicative boosts read from the history snapshot.

use chrono::Duration;
use movodoro_core::error::HistoryError;
use movodoro_core::history::HistoryStore;
use movodoro_core::item::Item;

/// Multiplier for an item whose daily minimum is still unmet.
pub const MIN_PER_DAY_BOOST: f64 = 10.0;
/// Multiplier for an item never completed.
pub const NEVER_DONE_BOOST: f64 = 3.0;
/// Multiplier for an item last completed at least [`RECENCY_DAYS`] ago.
pub const RECENCY_BOOST: f64 = 2.0;
/// Age in days at which the recency boost starts to apply.
pub const RECENCY_DAYS: i64 = 7;

/// A computed weight and the boosts that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBreakdown {
    pub base: f64,
    pub min_per_day: bool,
    pub never_done: bool,
    pub recency: bool,
    pub total: f64,
}

impl WeightBreakdown {
    /// Names of the boosts that applied, in application order.
    pub fn boosts(&self) -> Vec<&'static str> {
        [
            (self.min_per_day, "daily-minimum"),
            (self.never_done, "never-done"),
            (self.recency, "not-recent"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

/// Compute the weight of `item` against `history`, with the applied boosts.
pub fn weigh(item: &Item, history: &dyn HistoryStore) -> Result<WeightBreakdown, HistoryError> {
    let min_per_day =
        item.min_per_day > 0 && history.count_today(&item.code)?.completed < item.min_per_day;

    let last = history.last_completed_at(&item.code)?;
    let never_done = last.is_none();
    let recency = last.is_some_and(|at| history.as_of() - at >= Duration::days(RECENCY_DAYS));

    let mut total = item.weight;
    if min_per_day {
        total *= MIN_PER_DAY_BOOST;
    }
    if never_done {
        total *= NEVER_DONE_BOOST;
    }
    if recency {
        total *= RECENCY_BOOST;
    }

    Ok(WeightBreakdown {
        base: item.weight,
        min_per_day,
        never_done,
        recency,
        total,
    })
}

/// Compute the weight of `item` against `history`.
pub fn compute_weight(item: &Item, history: &dyn HistoryStore) -> Result<f64, HistoryError> {
    Ok(weigh(item, history)?.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone};
    use movodoro_core::event::CompletionEvent;
    use movodoro_history::MemoryLedger;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    fn done(ledger: &MemoryLedger, code: &str, days_ago: i64) {
        ledger
            .append(CompletionEvent::completed(now() - Duration::days(days_ago), code, 3, 2))
            .unwrap();
    }

    #[test]
    fn never_done_is_tripled() {
        let ledger = MemoryLedger::new(now());
        let item = Item::new("A-a").with_weight(2.0);
        let w = weigh(&item, &ledger).unwrap();
        assert!(w.never_done && !w.recency && !w.min_per_day);
        assert_eq!(w.total, 6.0);
        assert_eq!(w.boosts(), vec!["never-done"]);
    }

    #[test]
    fn recently_done_keeps_base_weight() {
        let ledger = MemoryLedger::new(now());
        done(&ledger, "A-a", 6);
        assert_eq!(compute_weight(&Item::new("A-a"), &ledger).unwrap(), 1.0);
    }

    #[test]
    fn stale_item_is_doubled() {
        let ledger = MemoryLedger::new(now());
        done(&ledger, "A-a", 7);
        let w = weigh(&Item::new("A-a"), &ledger).unwrap();
        assert!(w.recency);
        assert_eq!(w.total, 2.0);
    }

    #[test]
    fn recency_uses_most_recent_completion() {
        let ledger = MemoryLedger::new(now());
        done(&ledger, "A-a", 30);
        done(&ledger, "A-a", 1);
        assert_eq!(compute_weight(&Item::new("A-a"), &ledger).unwrap(), 1.0);
    }

    #[test]
    fn skips_are_not_completions() {
        let ledger = MemoryLedger::new(now());
        ledger.append(CompletionEvent::skipped(now(), "A-a")).unwrap();
        assert_eq!(compute_weight(&Item::new("A-a"), &ledger).unwrap(), 3.0);
    }

    #[test]
    fn boosts_multiply() {
        let ledger = MemoryLedger::new(now());
        let item = Item::new("A-a").with_weight(0.5).with_daily_limits(1, 0);
        let w = weigh(&item, &ledger).unwrap();
        assert_eq!(w.total, 0.5 * MIN_PER_DAY_BOOST * NEVER_DONE_BOOST);
        assert_eq!(w.boosts(), vec!["daily-minimum", "never-done"]);
    }

    #[test]
    fn met_minimum_drops_the_boost() {
        let ledger = MemoryLedger::new(now());
        done(&ledger, "A-a", 0);
        let item = Item::new("A-a").with_daily_limits(1, 0);
        assert_eq!(compute_weight(&item, &ledger).unwrap(), 1.0);
    }

    #[test]
    fn weight_is_deterministic() {
        let ledger = MemoryLedger::new(now());
        done(&ledger, "A-a", 9);
        let item = Item::new("A-a").with_daily_limits(2, 0);
        let first = compute_weight(&item, &ledger).unwrap();
        let second = compute_weight(&item, &ledger).unwrap();
        assert_eq!(first, second);
    }
}
