//! History ledger implementations for Movodoro.

pub mod in_memory;
pub mod file_backend;
pub mod legacy;

pub use in_memory::MemoryLedger;
pub use file_backend::FileLedger;
pub use legacy::{FileOutcome, MigrationReport, migrate_legacy_logs};
