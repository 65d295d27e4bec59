//! `movodoro everyday`: daily-minimum movos and today's progress.

use movodoro_core::event::DayStats;
use movodoro_core::item::Item;
use movodoro_core::subset::Subset;

use super::{Context, render};

pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = ctx.catalog()?;
    let everyday: Vec<&Item> = catalog.everyday().collect();
    if everyday.is_empty() {
        println!("No movos with min_per_day requirement");
        return Ok(());
    }

    let active = ctx.active_subset();
    let subsets = ctx.subsets()?;
    let subset = active.and_then(|name| subsets.get(name));
    if let (Some(name), None) = (active, subset) {
        println!("⚠️  Unknown subset '{name}', showing all movos");
    }

    let heading = active.map(|name| format!("(Subset: {name})"));
    let mut lines = vec!["EVERY DAY MOVOS"];
    if let Some(h) = heading.as_deref() {
        lines.push(h);
    }
    print!("{}", render::banner(&lines));
    println!();

    let stats = ctx.today()?;
    let progress = progress(&everyday, subset, &stats);

    for p in &progress.shown {
        let status = if p.done >= p.item.min_per_day { "✅" } else { "❌" };
        println!("{status} {}", p.item.title);
        println!(
            "   Code: {} | RPE: {} | Duration: {}-{} min",
            p.item.code, p.item.intensity, p.item.duration_min, p.item.duration_max
        );
        if p.done > 0 {
            println!("   Completed {} of {} today", p.done, p.item.min_per_day);
        } else {
            println!("   Not yet done (0 of {} today)", p.item.min_per_day);
        }
        println!();
    }

    if progress.excluded > 0 {
        println!("⚠️  {} everyday movos excluded by active subset", progress.excluded);
        println!();
    }

    print!(
        "Summary: {}/{} everyday movos completed",
        progress.met(),
        progress.shown.len()
    );
    if subset.is_some() {
        print!(" (in subset)");
    }
    println!();
    Ok(())
}

struct ItemProgress<'a> {
    item: &'a Item,
    done: u32,
}

struct Progress<'a> {
    shown: Vec<ItemProgress<'a>>,
    excluded: usize,
}

impl Progress<'_> {
    fn met(&self) -> usize {
        self.shown.iter().filter(|p| p.done >= p.item.min_per_day).count()
    }
}

fn progress<'a>(items: &[&'a Item], subset: Option<&Subset>, stats: &DayStats) -> Progress<'a> {
    let mut out = Progress {
        shown: Vec::new(),
        excluded: 0,
    };
    for item in items.iter().copied() {
        if subset.is_some_and(|s| !s.contains(&item.code)) {
            out.excluded += 1;
            continue;
        }
        let done = u32::try_from(stats.completed_count(&item.code)).unwrap_or(u32::MAX);
        out.shown.push(ItemProgress { item, done });
    }
    out
}
