//! Items: the schedulable units of the catalog.
//!
//! An `Item` is fully resolved by the catalog loader before it reaches the
//! selection engine: tags are merged with the category's, intensity and
//! weight carry their effective values, and `code` is the full
//! `{category}-{slug}` identifier.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default base weight for an item.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A single activity ("movo") with duration, intensity and recurrence metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Globally unique full code, e.g. `RB-box-breath`
    pub code: String,

    /// Category code, e.g. `RB`
    pub category: String,

    /// Short human-readable title
    #[serde(default)]
    pub title: String,

    /// Instructions shown to the user
    #[serde(default)]
    pub description: String,

    /// Lower bound of the duration range in minutes
    pub duration_min: u32,

    /// Upper bound of the duration range in minutes
    pub duration_max: u32,

    /// Effective intensity on the 1–10 effort scale
    pub intensity: u32,

    /// Effective base weight (> 0)
    pub weight: f64,

    /// Category tags followed by item tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Maximum completions per day (0 = unlimited)
    #[serde(default)]
    pub max_per_day: u32,

    /// Maximum completions per rolling week. Carried but not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_per_week: Option<u32>,

    /// Completions required every day before anything else is offered
    #[serde(default)]
    pub min_per_day: u32,
}

impl Item {
    /// Create an item with neutral defaults: 1 minute, intensity 1, weight 1.0.
    ///
    /// The category is taken from the code prefix before the first `-`.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let category = code
            .split_once('-')
            .map(|(cat, _)| cat.to_string())
            .unwrap_or_default();
        Self {
            title: code.clone(),
            code,
            category,
            description: String::new(),
            duration_min: 1,
            duration_max: 1,
            intensity: 1,
            weight: DEFAULT_WEIGHT,
            tags: vec![],
            max_per_day: 0,
            max_per_week: None,
            min_per_day: 0,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_duration(mut self, min: u32, max: u32) -> Self {
        self.duration_min = min;
        self.duration_max = max;
        self
    }

    pub fn with_intensity(mut self, intensity: u32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the daily minimum and maximum in one go.
    pub fn with_daily_limits(mut self, min_per_day: u32, max_per_day: u32) -> Self {
        self.min_per_day = min_per_day;
        self.max_per_day = max_per_day;
        self
    }

    /// True if the item carries every required tag (case-insensitive).
    /// An empty requirement always matches.
    pub fn has_all_tags(&self, required: &[String]) -> bool {
        if required.is_empty() {
            return true;
        }
        let own: HashSet<String> = self.tags.iter().map(|t| t.to_lowercase()).collect();
        required.iter().all(|t| own.contains(&t.to_lowercase()))
    }

    /// True if `[min, max]` intersects the item's duration range.
    pub fn overlaps_duration(&self, min: u32, max: u32) -> bool {
        self.duration_max >= min && self.duration_min <= max
    }

    /// True if `minutes` lies inside the item's duration range.
    pub fn fits_duration(&self, minutes: u32) -> bool {
        (self.duration_min..=self.duration_max).contains(&minutes)
    }

    /// Midpoint of the duration range, rounded up.
    pub fn default_duration(&self) -> u32 {
        (self.duration_min + self.duration_max).div_ceil(2)
    }

    /// Items with a daily minimum ("every day" items).
    pub fn is_everyday(&self) -> bool {
        self.min_per_day > 0
    }
}
