//! The selection pipeline.
//!
//! `select_item` runs, in order: recovery check, constraint filter, subset
//! filter, priority tier, frequency filter, weighting and the weighted draw.
//! Every read goes through the supplied [`HistoryStore`]; nothing is cached
//! between calls.

use movodoro_core::constraint::Constraint;
use movodoro_core::error::SelectError;
use movodoro_core::history::HistoryStore;
use movodoro_core::item::Item;
use movodoro_core::subset::Subsets;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::draw::draw_weighted;
use crate::filter::{
    filter_by_constraint, filter_by_frequency, filter_by_subset, filter_incomplete_minimums,
};
use crate::weight::{WeightBreakdown, weigh};

/// Intensity ceiling forced while the daily budget is exhausted.
pub const RECOVERY_MAX_INTENSITY: u32 = 2;

/// Whether the daily intensity budget forced a recovery-only draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryOverride {
    pub active: bool,
    /// Today's completed intensity when the call was made
    pub cumulative_intensity: u32,
    pub cap: u32,
    /// The caller's max-intensity bound before any override
    pub requested_max_intensity: Option<u32>,
}

/// The outcome of one successful selection.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub item: &'a Item,
    pub weight: WeightBreakdown,
    /// Number of items that survived every filter
    pub candidates: usize,
    pub recovery: RecoveryOverride,
}

/// Picks the next item. Owns its random source.
pub struct Selector<R: Rng> {
    rng: R,
}

impl<R: Rng> Selector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Choose one item from `catalog` for `constraint`.
    ///
    /// When today's completed intensity has reached `daily_budget_cap`, the
    /// caller's max intensity is replaced by [`RECOVERY_MAX_INTENSITY`].
    pub fn select_item<'a>(
        &mut self,
        catalog: &'a [Item],
        history: &dyn HistoryStore,
        constraint: &Constraint,
        subsets: &Subsets,
        daily_budget_cap: u32,
    ) -> Result<Selection<'a>, SelectError> {
        let cumulative = history.today_cumulative_intensity()?;
        let recovery = RecoveryOverride {
            active: cumulative >= daily_budget_cap,
            cumulative_intensity: cumulative,
            cap: daily_budget_cap,
            requested_max_intensity: constraint.max_intensity,
        };

        let effective;
        let constraint = if recovery.active {
            info!(
                cumulative,
                cap = daily_budget_cap,
                "Daily intensity budget reached, recovery mode on"
            );
            let mut forced = constraint.clone();
            forced.max_intensity = Some(RECOVERY_MAX_INTENSITY);
            effective = forced;
            &effective
        } else {
            constraint
        };

        let all: Vec<&Item> = catalog.iter().collect();

        let matched = filter_by_constraint(&all, constraint);
        debug!(count = matched.len(), "After constraint filter");
        if matched.is_empty() {
            return Err(SelectError::NoMatch);
        }

        let mut candidates = match constraint.subset_name() {
            Some(name) => {
                let narrowed = filter_by_subset(&matched, Some(name), subsets)?;
                debug!(subset = name, count = narrowed.len(), "After subset filter");
                if narrowed.is_empty() {
                    return Err(SelectError::NoMatch);
                }
                narrowed
            }
            None => matched,
        };

        if !constraint.skip_priority {
            let priority = filter_incomplete_minimums(&candidates, history)?;
            debug!(count = priority.len(), "Incomplete daily minimums");
            if !priority.is_empty() {
                candidates = priority;
            }
        }

        let candidates = filter_by_frequency(&candidates, history)?;
        debug!(count = candidates.len(), "After frequency filter");
        if candidates.is_empty() {
            return Err(SelectError::ExhaustedToday);
        }

        let mut breakdowns = Vec::with_capacity(candidates.len());
        for item in &candidates {
            breakdowns.push((*item, weigh(item, history)?));
        }
        let weighted: Vec<(&Item, f64)> = breakdowns.iter().map(|(i, w)| (*i, w.total)).collect();

        let item = draw_weighted(&weighted, &mut self.rng)
            .ok_or_else(|| SelectError::Internal("weighted draw over no candidates".into()))?;
        let weight = breakdowns
            .iter()
            .find(|(i, _)| std::ptr::eq(*i, item))
            .map(|(_, w)| *w)
            .ok_or_else(|| SelectError::Internal("drawn item has no weight".into()))?;

        debug!(code = %item.code, weight = weight.total, candidates = candidates.len(), "Item selected");

        Ok(Selection {
            item,
            weight,
            candidates: candidates.len(),
            recovery,
        })
    }
}

impl Selector<StdRng> {
    /// A deterministic selector.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A selector seeded once from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}
