//! Constraints: the ad hoc query for one selection call.

use serde::{Deserialize, Serialize};

/// Query constraints for a single `select_item` call.
///
/// Numeric bounds of `0` are treated the same as `None` (unbounded), so CLI
/// flags that default to zero need no special handling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Required tags (all must be present, case-insensitive)
    #[serde(default)]
    pub tags: Vec<String>,

    /// Category code
    #[serde(default)]
    pub category: Option<String>,

    /// Exact duration in minutes; takes precedence over the range bounds
    #[serde(default)]
    pub exact_duration: Option<u32>,

    #[serde(default)]
    pub min_duration: Option<u32>,

    #[serde(default)]
    pub max_duration: Option<u32>,

    #[serde(default)]
    pub min_intensity: Option<u32>,

    #[serde(default)]
    pub max_intensity: Option<u32>,

    /// Named subset restricting the pool
    #[serde(default)]
    pub subset: Option<String>,

    /// Bypass the daily-minimum priority tier
    #[serde(default)]
    pub skip_priority: bool,
}

fn bound(v: Option<u32>) -> Option<u32> {
    v.filter(|n| *n > 0)
}

impl Constraint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags
            .into_iter()
            .map(Into::into)
            .map(|t: String| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_exact_duration(mut self, minutes: u32) -> Self {
        self.exact_duration = Some(minutes);
        self
    }

    pub fn with_duration_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_duration = min;
        self.max_duration = max;
        self
    }

    pub fn with_intensity_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_intensity = min;
        self.max_intensity = max;
        self
    }

    pub fn with_subset(mut self, subset: impl Into<String>) -> Self {
        self.subset = Some(subset.into());
        self
    }

    pub fn skipping_priority(mut self, skip: bool) -> Self {
        self.skip_priority = skip;
        self
    }

    /// Category filter, if set and non-empty.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// Subset name, if set and non-empty.
    pub fn subset_name(&self) -> Option<&str> {
        self.subset.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn exact_duration(&self) -> Option<u32> {
        bound(self.exact_duration)
    }

    /// Duration window for range-overlap mode; unset bounds widen to `[0, ∞)`.
    pub fn duration_window(&self) -> (u32, u32) {
        (
            bound(self.min_duration).unwrap_or(0),
            bound(self.max_duration).unwrap_or(u32::MAX),
        )
    }

    /// Intensity band; unset bounds widen to `[0, ∞)`.
    pub fn intensity_band(&self) -> (u32, u32) {
        (
            bound(self.min_intensity).unwrap_or(0),
            bound(self.max_intensity).unwrap_or(u32::MAX),
        )
    }
}
