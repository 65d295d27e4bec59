//! `movodoro get`: pick a movo matching filters and save it as current.

use clap::Args;
use movodoro_catalog::Catalog;
use movodoro_core::constraint::Constraint;
use movodoro_core::error::SelectError;
use movodoro_core::subset::Subsets;
use movodoro_engine::{Selection, Selector};
use rand::Rng;
use tracing::warn;

use super::{Context, render};

#[derive(Debug, Clone, Default, Args)]
pub struct GetArgs {
    /// Filter by category code
    #[arg(short, long)]
    pub category: Option<String>,

    /// Filter by tags (comma-separated, all required)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Exact duration in minutes
    #[arg(short, long)]
    pub duration: Option<u32>,

    /// Minimum duration in minutes
    #[arg(short = 'm', long)]
    pub min_duration: Option<u32>,

    /// Maximum duration in minutes
    #[arg(short = 'M', long)]
    pub max_duration: Option<u32>,

    /// Minimum RPE
    #[arg(short = 'r', long)]
    pub min_rpe: Option<u32>,

    /// Maximum RPE
    #[arg(short = 'R', long)]
    pub max_rpe: Option<u32>,

    /// Ignore the daily-minimum priority
    #[arg(long)]
    pub skip_minimums: bool,

    /// Seed the random draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show why the movo was drawn
    #[arg(long)]
    pub explain: bool,
}

impl GetArgs {
    pub fn constraint(&self, subset: Option<&str>) -> Constraint {
        let mut c = Constraint::new()
            .with_tags(self.tags.iter().cloned())
            .with_duration_range(self.min_duration, self.max_duration)
            .with_intensity_range(self.min_rpe, self.max_rpe)
            .skipping_priority(self.skip_minimums);
        if let Some(category) = self.category.as_deref() {
            c = c.with_category(category.trim().to_uppercase());
        }
        if let Some(minutes) = self.duration {
            c = c.with_exact_duration(minutes);
        }
        if let Some(name) = subset {
            c = c.with_subset(name);
        }
        c
    }
}

pub fn run(ctx: &Context, args: &GetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = ctx.catalog()?;
    let subsets = ctx.subsets()?;
    let constraint = args.constraint(ctx.active_subset());
    let mut selector = match args.seed {
        Some(seed) => Selector::seeded(seed),
        None => Selector::from_entropy(),
    };

    let selection = match draw(ctx, &catalog, &subsets, &constraint, &mut selector) {
        Ok(s) => s,
        Err(e) => {
            println!("❌ {e}");
            if let Some(hint) = hint(&e) {
                println!("   {hint}");
            }
            return Err(e.into());
        }
    };

    if let Err(e) = ctx.current().save(&selection.item.code) {
        warn!(error = %e, "Could not save current movo");
    }

    if selection.recovery.active {
        print!("\n{}", render::recovery_notice(&selection.recovery));
    }
    print!("{}", render::item_card(selection.item));
    if args.explain {
        print!("{}", render::explain(&selection));
    }
    println!();
    println!("When done, run:");
    println!("  movodoro done");
    println!("Or skip with:");
    println!("  movodoro skip");
    println!();
    Ok(())
}

/// Run one selection against a fresh snapshot of the ledger.
pub(crate) fn draw<'a, R: Rng>(
    ctx: &Context,
    catalog: &'a Catalog,
    subsets: &Subsets,
    constraint: &Constraint,
    selector: &mut Selector<R>,
) -> Result<Selection<'a>, SelectError> {
    let snapshot = ctx.ledger.snapshot()?;
    selector.select_item(
        catalog.items(),
        &snapshot,
        constraint,
        subsets,
        ctx.config.max_daily_intensity,
    )
}

/// A suggestion for the user when nothing could be drawn.
pub(crate) fn hint(err: &SelectError) -> Option<&'static str> {
    match err {
        SelectError::NoMatch => Some("Try relaxing the filters or choosing another subset."),
        SelectError::ExhaustedToday => Some("Every matching movo hit its daily limit. Come back tomorrow!"),
        SelectError::UnknownSubset(_) => Some("Run 'movodoro subsets' to see the configured subsets."),
        _ => None,
    }
}
