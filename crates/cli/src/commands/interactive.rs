//! Interactive mode: resume or pick a movo, then do it, skip it or save it for later.

use movodoro_core::constraint::Constraint;
use movodoro_engine::Selector;
use tracing::{debug, warn};

use super::{Context, done, get, prompt, render, skip};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Done,
    Skip,
    SkipDailies,
    Quit,
}

impl Choice {
    /// Parse a typed answer. `x` is only offered for daily-minimum movos.
    fn parse(input: &str, has_minimum: bool) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "d" => Some(Self::Done),
            "s" => Some(Self::Skip),
            "x" if has_minimum => Some(Self::SkipDailies),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = ctx.catalog()?;
    let subsets = ctx.subsets()?;
    let current = ctx.current();
    let mut selector = Selector::from_entropy();
    let mut skip_minimums = false;

    if let Some(name) = ctx.active_subset() {
        println!("🎯 Using subset: {name}\n");
    }

    loop {
        let saved = current.load().and_then(|code| catalog.get(&code));
        let item = match saved {
            Some(item) => {
                println!("📥 Resuming saved movo...");
                item
            }
            None => {
                let mut constraint = Constraint::new().skipping_priority(skip_minimums);
                if let Some(name) = ctx.active_subset() {
                    constraint = constraint.with_subset(name);
                }
                match get::draw(ctx, &catalog, &subsets, &constraint, &mut selector) {
                    Ok(selection) => {
                        if selection.recovery.active {
                            print!("\n{}", render::recovery_notice(&selection.recovery));
                        }
                        selection.item
                    }
                    Err(e) => {
                        println!("❌ {e}");
                        if let Some(hint) = get::hint(&e) {
                            println!("   {hint}");
                        }
                        return Err(e.into());
                    }
                }
            }
        };

        if let Err(e) = current.save(&item.code) {
            warn!(error = %e, "Could not save current movo");
        }

        print!("{}", render::item_card(item));
        println!();

        let has_minimum = item.is_everyday();
        match ask_choice(has_minimum)? {
            Choice::Done => {
                println!();
                done::complete(ctx, item, None, None)?;
                current.clear()?;
                return Ok(());
            }
            Choice::Skip => {
                skip::skip(ctx, item)?;
                current.clear()?;
                skip_minimums = false;
            }
            Choice::SkipDailies => {
                println!("\n⏭️  Skipping dailies for now...");
                current.clear()?;
                skip_minimums = true;
            }
            Choice::Quit => {
                println!("\n👋 Saved for later. Run 'movodoro' to resume.");
                return Ok(());
            }
        }
        debug!(skip_minimums, "Drawing next movo");
    }
}

fn ask_choice(has_minimum: bool) -> Result<Choice, Box<dyn std::error::Error>> {
    println!("What would you like to do?");
    println!("  [d] Done (log completion)");
    println!("  [s] Skip (try another movo)");
    if has_minimum {
        println!("  [x] Skip dailies (ignore min_per_day > 0 movos)");
    }
    println!("  [q] Quit (save for later)");
    println!();

    loop {
        let Some(answer) = prompt::ask("Choice: ")? else {
            return Ok(Choice::Quit);
        };
        match Choice::parse(&answer, has_minimum) {
            Some(choice) => return Ok(choice),
            None => println!("Invalid choice, please try again."),
        }
    }
}
