//! # Movodoro Core
//!
//! Domain types, traits, and error definitions for the Movodoro habit
//! scheduler. This crate has **no I/O**: it defines the domain model that
//! the ledger, catalog and selection engine crates implement against.
//!
//! ## Design Philosophy
//!
//! The history ledger is defined as a trait here and implemented in
//! `movodoro-history`. This keeps the selection engine testable with
//! in-memory fakes and keeps the dependency graph pointing inward.

pub mod error;
pub mod item;
pub mod event;
pub mod constraint;
pub mod subset;
pub mod history;

// Re-export key types at crate root for ergonomics
pub use error::{Error, HistoryError, Result, SelectError};
pub use item::Item;
pub use event::{CompletionEvent, DayStats, Outcome};
pub use constraint::Constraint;
pub use subset::{Subset, Subsets};
pub use history::{DayCount, HistoryStore};
