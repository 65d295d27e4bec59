//! `movodoro done`: log a completion.

use chrono::Local;
use movodoro_core::error::Error;
use movodoro_core::event::{CompletionEvent, DayStats};
use movodoro_core::item::Item;
use tracing::warn;

use super::{Context, prompt, render};

pub fn run(
    ctx: &Context,
    code: Option<String>,
    duration: Option<u32>,
    rpe: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = ctx.catalog()?;
    let item = match ctx.resolve(&catalog, code) {
        Ok(item) => item,
        Err(e) => {
            println!("❌ {e}");
            return Err(e.into());
        }
    };

    complete(ctx, item, duration, rpe)?;

    let current = ctx.current();
    if current.load().as_deref() == Some(item.code.as_str()) {
        if let Err(e) = current.clear() {
            warn!(error = %e, "Could not clear current movo");
        }
    }
    Ok(())
}

/// Prompt for whatever is missing, log the completion and show today's totals.
pub(crate) fn complete(
    ctx: &Context,
    item: &Item,
    duration: Option<u32>,
    rpe: Option<u32>,
) -> Result<DayStats, Box<dyn std::error::Error>> {
    let duration = match duration {
        Some(d) => d,
        None => prompt::ask_number("How many minutes did you spend?", item.default_duration())?,
    };
    let rpe = match rpe {
        Some(r) => r,
        None => prompt::ask_number("How hard was it? RPE", item.intensity)?,
    };
    let rpe = check_rpe(rpe)?;

    let stats = ctx.record(CompletionEvent::completed(Local::now(), &item.code, duration, rpe))?;

    println!("✅ Marked '{}' as completed ({duration} minutes, RPE {rpe})", item.title);
    print!("{}", render::today_line(&stats));
    Ok(stats)
}

/// A logged RPE must lie on the 1-10 scale.
fn check_rpe(rpe: u32) -> movodoro_core::Result<u32> {
    if (1..=10).contains(&rpe) {
        Ok(rpe)
    } else {
        Err(Error::InvalidInput(format!("RPE must be between 1 and 10, got {rpe}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpe_on_scale_is_accepted() {
        assert_eq!(check_rpe(1).unwrap(), 1);
        assert_eq!(check_rpe(10).unwrap(), 10);
    }

    #[test]
    fn rpe_off_scale_is_rejected() {
        for rpe in [0, 11, u32::MAX] {
            let err = check_rpe(rpe).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
            assert!(err.to_string().contains("between 1 and 10"));
        }
    }
}
