//! # Movodoro Engine
//!
//! Picks the next item to offer. The pipeline narrows the catalog by query
//! constraints, named subset, unmet daily minimums and daily maximums,
//! then weights the survivors toward novel and neglected items and draws
//! one at random. A daily intensity budget switches the pipeline to
//! low-intensity recovery items once it is used up.

pub mod draw;
pub mod filter;
pub mod selector;
pub mod weight;

pub use draw::draw_weighted;
pub use filter::{filter_by_constraint, filter_by_frequency, filter_by_subset, filter_incomplete_minimums};
pub use selector::{RECOVERY_MAX_INTENSITY, RecoveryOverride, Selection, Selector};
pub use weight::{
    MIN_PER_DAY_BOOST, NEVER_DONE_BOOST, RECENCY_BOOST, RECENCY_DAYS, WeightBreakdown,
    compute_weight, weigh,
};
