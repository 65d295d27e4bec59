//! Candidate filters, applied in pipeline order by the [`Selector`](crate::Selector).
//!
//! Each filter takes a slice of item references and returns a new,
//! order-preserving Vec. None of them mutate their input.

use movodoro_core::constraint::Constraint;
use movodoro_core::error::{HistoryError, SelectError};
use movodoro_core::history::HistoryStore;
use movodoro_core::item::Item;
use movodoro_core::subset::Subsets;

/// Keep items matching category, tags, intensity band and duration.
///
/// An exact duration takes precedence over the min/max window. An empty
/// result is not an error here.
pub fn filter_by_constraint<'a>(items: &[&'a Item], constraint: &Constraint) -> Vec<&'a Item> {
    let (min_int, max_int) = constraint.intensity_band();
    let (min_dur, max_dur) = constraint.duration_window();
    let exact = constraint.exact_duration();
    let category = constraint.category();

    items
        .iter()
        .copied()
        .filter(|item| category.is_none_or(|c| item.category == c))
        .filter(|item| item.has_all_tags(&constraint.tags))
        .filter(|item| (min_int..=max_int).contains(&item.intensity))
        .filter(|item| match exact {
            Some(minutes) => item.fits_duration(minutes),
            None => item.overlaps_duration(min_dur, max_dur),
        })
        .collect()
}

/// Restrict to the codes of the named subset.
///
/// A missing or blank name is the identity. An unknown name fails with
/// [`SelectError::UnknownSubset`]; an empty intersection is returned as is.
pub fn filter_by_subset<'a>(
    items: &[&'a Item],
    subset_name: Option<&str>,
    subsets: &Subsets,
) -> Result<Vec<&'a Item>, SelectError> {
    let Some(name) = subset_name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(items.to_vec());
    };

    let subset = subsets
        .get(name)
        .ok_or_else(|| SelectError::UnknownSubset(name.to_string()))?;

    Ok(items
        .iter()
        .copied()
        .filter(|item| subset.contains(&item.code))
        .collect())
}

/// Items whose daily minimum is not yet met today.
///
/// Items without a daily minimum never appear in the output.
pub fn filter_incomplete_minimums<'a>(
    items: &[&'a Item],
    history: &dyn HistoryStore,
) -> Result<Vec<&'a Item>, HistoryError> {
    let mut out = Vec::new();
    for item in items.iter().copied().filter(|i| i.min_per_day > 0) {
        if history.count_today(&item.code)?.completed < item.min_per_day {
            out.push(item);
        }
    }
    Ok(out)
}

/// Drop items that reached their daily maximum.
///
/// `max_per_week` is carried on [`Item`] but not enforced. If it ever is,
/// the rule is: completions over the rolling 7 local days ending today
/// at or above `max_per_week` excludes the item.
pub fn filter_by_frequency<'a>(
    items: &[&'a Item],
    history: &dyn HistoryStore,
) -> Result<Vec<&'a Item>, HistoryError> {
    let mut out = Vec::with_capacity(items.len());
    for item in items.iter().copied() {
        if item.max_per_day > 0 && history.count_today(&item.code)?.completed >= item.max_per_day {
            continue;
        }
        out.push(item);
    }
    Ok(out)
}
