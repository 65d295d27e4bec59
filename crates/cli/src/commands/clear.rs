//! `movodoro clear`: delete today's history.

use chrono::Local;

use super::{Context, prompt, render};

pub fn run(ctx: &Context, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stats = ctx.today()?;

    print!("{}", render::banner(&["CLEAR TODAY'S HISTORY"]));
    println!();

    if stats.total_entries() == 0 {
        println!("No entries for today to clear.");
        return Ok(());
    }

    println!("This will delete today's log file with {} entries:", stats.total_entries());
    println!(
        "  - {} completed ({} minutes, {} RPE)",
        stats.completed.len(),
        stats.total_duration,
        stats.total_intensity
    );
    println!("  - {} skipped", stats.skipped.len());
    println!();

    if !yes && !prompt::confirm("Are you sure you want to clear today's history?")? {
        println!("Cancelled.");
        return Ok(());
    }

    ctx.ledger.clear_day(Local::now().date_naive())?;
    println!("✅ Cleared {} entries from today's history", stats.total_entries());
    Ok(())
}
