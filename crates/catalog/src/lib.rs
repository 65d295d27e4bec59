//! Catalog loading for Movodoro.
//!
//! Reads category YAML files from the movos directory into a validated
//! [`Catalog`] of resolved items, and reads the optional `subsets.yaml`.

pub mod loader;
pub mod subsets;

pub use loader::{Catalog, CategoryFile, ItemSpec, load_category};
pub use subsets::{SUBSETS_FILE, load_subsets, unknown_codes};

use std::path::PathBuf;

/// Errors from catalog and subset loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Movos directory not found: {0}")]
    NotFound(PathBuf),

    #[error("No category files found in {0}")]
    Empty(PathBuf),

    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid item {code}: {reason}")]
    Invalid { code: String, reason: String },
}
