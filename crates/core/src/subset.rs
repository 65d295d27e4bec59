//! Subsets: named allow-lists of item codes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user-defined allow-list, e.g. "back-safe" or "travel".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subset {
    #[serde(default)]
    pub description: String,

    /// Full item codes
    #[serde(default)]
    pub codes: Vec<String>,
}

impl Subset {
    pub fn new<I, S>(description: impl Into<String>, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            description: description.into(),
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }
}

/// All configured subsets keyed by name.
pub type Subsets = BTreeMap<String, Subset>;
