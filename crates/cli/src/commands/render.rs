//! Terminal rendering. Every function returns a String so output is testable.

use movodoro_catalog::Catalog;
use movodoro_core::event::{CompletionEvent, DayStats};
use movodoro_core::item::Item;
use movodoro_engine::{RECOVERY_MAX_INTENSITY, RecoveryOverride, Selection};

const RULE: &str = "═══════════════════════════════════════";

/// A boxed section heading.
pub fn banner(lines: &[&str]) -> String {
    let mut out = format!("{RULE}\n");
    for line in lines {
        out.push_str(&format!("  {line}\n"));
    }
    out.push_str(&format!("{RULE}\n"));
    out
}

/// Title, instructions and metadata of one item.
pub fn item_card(item: &Item) -> String {
    let mut out = format!("\n{}\n", banner(&[&item.title]));
    if !item.description.is_empty() {
        out.push_str(&format!("{}\n\n", item.description.trim_end()));
    }
    out.push_str(&format!(
        "⏱️  Duration: {}-{} minutes\n",
        item.duration_min, item.duration_max
    ));
    out.push_str(&format!("💪 RPE: {}/10\n", item.intensity));
    out.push_str(&format!("🏷️  Code: {}\n", item.code));
    if !item.tags.is_empty() {
        out.push_str(&format!("🔖 Tags: {}\n", item.tags.join(", ")));
    }
    out
}

pub fn recovery_notice(recovery: &RecoveryOverride) -> String {
    format!(
        "🔋 Recovery mode: {} / {} RPE used today, limiting to RPE ≤ {RECOVERY_MAX_INTENSITY}\n",
        recovery.cumulative_intensity, recovery.cap
    )
}

/// Why this item was drawn.
pub fn explain(selection: &Selection<'_>) -> String {
    let w = &selection.weight;
    let boosts = w.boosts();
    format!(
        "🎲 Drawn from {} candidate(s), weight {:.2} (base {:.2}{})\n",
        selection.candidates,
        w.total,
        w.base,
        if boosts.is_empty() {
            String::new()
        } else {
            format!("; boosts: {}", boosts.join(", "))
        }
    )
}

/// One-line summary of today's totals.
pub fn today_line(stats: &DayStats) -> String {
    format!(
        "📊 Today: {} movos, {} minutes, {} RPE\n",
        stats.completed.len(),
        stats.total_duration,
        stats.total_intensity
    )
}

/// ` | #tag, #tag, #daily` suffix used by detailed reports.
pub fn tag_suffix(item: &Item) -> String {
    let mut tags: Vec<String> = item.tags.iter().map(|t| format!("#{t}")).collect();
    if item.is_everyday() {
        tags.push("#daily".into());
    }
    if tags.is_empty() {
        String::new()
    } else {
        format!(" | {}", tags.join(", "))
    }
}

/// Options for [`day_report`].
pub struct ReportStyle<'a> {
    pub markdown: bool,
    /// Present in detailed mode; used to show titles and tags
    pub catalog: Option<&'a Catalog>,
    pub cap: u32,
}

/// The daily report, plain or markdown.
pub fn day_report(stats: &DayStats, style: &ReportStyle<'_>) -> String {
    let date = stats.date.format("%A, %B %-d, %Y").to_string();
    let md = style.markdown;
    let mut out = if md {
        format!("# Movodoro Report - {date}\n\n")
    } else {
        format!("{}\n", banner(&["TODAY'S MOVODORO REPORT", &date]))
    };

    let subsets = stats.subsets();
    if !subsets.is_empty() {
        out.push_str(if md { "**Active subset(s):**\n\n" } else { "Active subset(s):\n" });
        for s in &subsets {
            out.push_str(&format!("{}- {s}\n", if md { "" } else { "  " }));
        }
        out.push('\n');
    }

    if md {
        out.push_str("## Summary\n\n");
        out.push_str(&format!("- **Total movos:** {}\n", stats.completed.len()));
        out.push_str(&format!("- **Total duration:** {} minutes\n", stats.total_duration));
        out.push_str(&format!("- **Total RPE:** {} / {}\n\n", stats.total_intensity, style.cap));
    } else {
        out.push_str("📊 Summary:\n");
        out.push_str(&format!("   Total movos:     {}\n", stats.completed.len()));
        out.push_str(&format!("   Total duration:  {} minutes\n", stats.total_duration));
        out.push_str(&format!("   Total RPE:       {} / {}\n\n", stats.total_intensity, style.cap));
    }

    if !stats.completed.is_empty() {
        out.push_str(if md { "## Completed\n\n" } else { "✅ Completed:\n" });
        for e in &stats.completed {
            out.push_str(&report_line(e, style, true));
        }
        out.push('\n');
    }

    if !stats.skipped.is_empty() {
        out.push_str(if md { "## Skipped\n\n" } else { "⏭️  Skipped:\n" });
        for e in &stats.skipped {
            out.push_str(&report_line(e, style, false));
        }
        out.push('\n');
    }

    if stats.total_intensity >= style.cap {
        out.push_str(if md {
            "*Auto-recovery mode active (RPE limit reached)*\n"
        } else {
            "🔋 Auto-recovery mode active (RPE limit reached)\n"
        });
    }
    out
}

fn report_line(e: &CompletionEvent, style: &ReportStyle<'_>, completed: bool) -> String {
    let time = e.timestamp.format("%H:%M");
    let item = style.catalog.and_then(|c| c.get(&e.code));
    let md = style.markdown;

    let name = match (item, md) {
        (Some(i), true) => format!("{} [`{}`]", i.title, e.code),
        (Some(i), false) => format!("{} [{}]", i.title, e.code),
        (None, true) => format!("`{}`", e.code),
        (None, false) => e.code.clone(),
    };

    let details = if completed {
        let subset = e.subset.as_deref().map(|s| format!(", {s}")).unwrap_or_default();
        let unit = if md { " min" } else { "m" };
        let tags = item.map(tag_suffix).unwrap_or_default();
        format!(" ({}{unit}, RPE {}{subset}){tags}", e.duration, e.intensity)
    } else {
        String::new()
    };

    if md {
        format!("- **{time}** - {name}{details}\n")
    } else {
        format!("   {time} - {name}{details}\n")
    }
}
