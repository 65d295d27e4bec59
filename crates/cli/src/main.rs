//! Movodoro CLI: the main entry point.
//!
//! Commands:
//! - *(none)*: interactive mode (pick, do or skip, repeat)
//! - `get`: Pick a movo matching filters
//! - `done`: Log a completion
//! - `skip`: Log a skip
//! - `report`: Today's report
//! - `clear`: Delete today's history
//! - `config`: Show configuration and catalog health
//! - `everyday`: Daily-minimum movos and today's progress
//! - `subsets`: List configured subsets
//! - `migrate`: Convert legacy `.log` files

use clap::{Parser, Subcommand};

mod commands;

use commands::Context;
use commands::get::GetArgs;
use commands::report::Period;

#[derive(Parser)]
#[command(
    name = "movodoro",
    about = "Movodoro: movement snacks, one at a time",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use a named subset from subsets.yaml (overrides MOVODORO_ACTIVE_SUBSET)
    #[arg(long, global = true)]
    subset: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick, do or skip movos until one is done (default)
    Interactive,

    /// Pick a movo and save it as current
    Get(GetArgs),

    /// Log a completion of CODE or the current movo
    Done {
        code: Option<String>,

        /// Minutes spent (prompted if omitted)
        #[arg(short, long)]
        duration: Option<u32>,

        /// Perceived effort 1-10 (prompted if omitted)
        #[arg(short, long)]
        rpe: Option<u32>,
    },

    /// Log a skip of CODE or the current movo
    Skip { code: Option<String> },

    /// Show a report
    Report {
        #[arg(value_enum, default_value = "day")]
        period: Period,

        /// Markdown output
        #[arg(long, alias = "markdown")]
        md: bool,

        /// Include titles and tags
        #[arg(short, long)]
        long: bool,
    },

    /// Delete today's history
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show configuration and catalog health
    Config,

    /// Show daily-minimum movos and today's progress
    Everyday,

    /// List configured subsets
    Subsets,

    /// Convert legacy space-separated logs to the JSONL ledger
    Migrate,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context::load(cli.subset)?;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => commands::interactive::run(&ctx)?,
        Commands::Get(args) => commands::get::run(&ctx, &args)?,
        Commands::Done { code, duration, rpe } => commands::done::run(&ctx, code, duration, rpe)?,
        Commands::Skip { code } => commands::skip::run(&ctx, code)?,
        Commands::Report { period, md, long } => commands::report::run(&ctx, period, md, long)?,
        Commands::Clear { yes } => commands::clear::run(&ctx, yes)?,
        Commands::Config => commands::config_cmd::run(&ctx)?,
        Commands::Everyday => commands::everyday::run(&ctx)?,
        Commands::Subsets => commands::subsets::run(&ctx)?,
        Commands::Migrate => commands::migrate::run(&ctx)?,
    }

    Ok(())
}
