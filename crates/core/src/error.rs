//! Error types for the Movodoro domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for Movodoro operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- History ledger errors ---
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    // --- Selection errors ---
    #[error("Selection error: {0}")]
    Select(#[from] SelectError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Catalog errors ---
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    // --- User input ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of the history ledger. Always fatal for the current call.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("Invalid ledger record: {0}")]
    InvalidRecord(String),
}

/// Outcomes of the selection pipeline that yield no item.
#[derive(Debug, Error)]
pub enum SelectError {
    /// Constraint or subset filtering emptied the pool.
    #[error("No items match the specified filters")]
    NoMatch,

    /// The named subset is not configured.
    #[error("Unknown subset: {0}")]
    UnknownSubset(String),

    /// Every remaining candidate has hit its daily cap.
    #[error("All matching items have reached their daily limit")]
    ExhaustedToday,

    #[error("History store failure: {0}")]
    Store(#[from] HistoryError),

    #[error("Internal selection error: {0}")]
    Internal(String),
}

impl SelectError {
    /// Whether the caller can recover by relaxing the query or waiting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SelectError::NoMatch | SelectError::ExhaustedToday)
    }
}
