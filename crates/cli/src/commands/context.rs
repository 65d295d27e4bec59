//! Per-invocation context shared by every command.

use chrono::Local;
use movodoro_catalog::{Catalog, load_subsets};
use movodoro_config::AppConfig;
use movodoro_core::event::{CompletionEvent, DayStats};
use movodoro_core::history::HistoryStore;
use movodoro_core::item::Item;
use movodoro_core::subset::Subsets;
use movodoro_core::{Error, Result};
use movodoro_history::FileLedger;

use super::current::CurrentItem;

pub struct Context {
    pub config: AppConfig,
    pub ledger: FileLedger,
    subset_flag: Option<String>,
}

impl Context {
    /// Load configuration and open the ledger. `subset_flag` wins over the
    /// configured active subset.
    pub fn load(subset_flag: Option<String>) -> Result<Self> {
        let config = AppConfig::load().map_err(|e| Error::Config {
            message: e.to_string(),
        })?;
        Ok(Self::new(config, subset_flag))
    }

    pub fn new(config: AppConfig, subset_flag: Option<String>) -> Self {
        let ledger = FileLedger::new(config.logs_dir());
        Self {
            config,
            ledger,
            subset_flag: subset_flag.filter(|s| !s.trim().is_empty()),
        }
    }

    /// The subset in effect: command-line flag, then environment or config.
    pub fn active_subset(&self) -> Option<&str> {
        self.subset_flag
            .as_deref()
            .or_else(|| self.config.active_subset())
    }

    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::load(&self.config.movos_dir()).map_err(|e| Error::Catalog {
            message: e.to_string(),
        })
    }

    pub fn subsets(&self) -> Result<Subsets> {
        load_subsets(&self.config.movos_dir()).map_err(|e| Error::Catalog {
            message: e.to_string(),
        })
    }

    pub fn current(&self) -> CurrentItem {
        CurrentItem::new(self.config.current_path())
    }

    /// Look up `code`, or the saved current item when `code` is `None`.
    pub fn resolve<'c>(&self, catalog: &'c Catalog, code: Option<String>) -> Result<&'c Item> {
        let code = match code.filter(|c| !c.trim().is_empty()) {
            Some(c) => c.trim().to_string(),
            None => self.current().load().ok_or_else(|| Error::Internal(
                "no current movo. Use 'movodoro get' first or specify a code".into(),
            ))?,
        };
        catalog
            .get(&code)
            .ok_or_else(|| Error::Internal(format!("movo code '{code}' not found")))
    }

    /// Append `event`, labelled with the active subset, and return the
    /// totals for the event's day.
    pub fn record(&self, event: CompletionEvent) -> Result<DayStats> {
        let day = event.day();
        let event = event.with_subset(self.active_subset().map(str::to_string));
        self.ledger.append(event)?;
        Ok(self.ledger.day_stats(day)?)
    }

    /// Today's totals.
    pub fn today(&self) -> Result<DayStats> {
        Ok(self.ledger.day_stats(Local::now().date_naive())?)
    }
}
