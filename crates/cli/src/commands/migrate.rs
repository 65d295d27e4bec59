//! `movodoro migrate`: convert legacy `.log` day files to the JSONL ledger.

use movodoro_history::{FileOutcome, migrate_legacy_logs};

use super::Context;

pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let dir = ctx.ledger.dir();
    println!("🔄 Migrating legacy logs in {}...", dir.display());

    let report = migrate_legacy_logs(dir)?;
    if report.files.is_empty() {
        println!("   No legacy .log files found.");
        return Ok(());
    }

    for (path, outcome) in &report.files {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        match outcome {
            FileOutcome::Converted { entries } => {
                println!("   ✅ {name}: {entries} entries (original kept as .log.bak)");
            }
            FileOutcome::AlreadyMigrated => println!("   ⏭️  {name}: already migrated"),
            FileOutcome::Failed { reason } => println!("   ❌ {name}: {reason}"),
        }
    }

    println!();
    println!(
        "Converted: {}, skipped: {}, failed: {}",
        report.converted(),
        report.skipped(),
        report.failed()
    );
    Ok(())
}
