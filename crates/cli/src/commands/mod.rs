//! Command implementations. Each module exposes a `run` entry point.

pub mod clear;
pub mod config_cmd;
pub mod done;
pub mod everyday;
pub mod get;
pub mod interactive;
pub mod migrate;
pub mod report;
pub mod skip;
pub mod subsets;

mod context;
mod current;
mod prompt;
mod render;

pub use context::Context;
