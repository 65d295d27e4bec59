//! `movodoro skip`: log a skip.

use chrono::Local;
use movodoro_core::event::CompletionEvent;
use movodoro_core::item::Item;
use tracing::warn;

use super::Context;

pub fn run(ctx: &Context, code: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = ctx.catalog()?;
    let item = match ctx.resolve(&catalog, code) {
        Ok(item) => item,
        Err(e) => {
            println!("❌ {e}");
            return Err(e.into());
        }
    };

    skip(ctx, item)?;

    let current = ctx.current();
    if current.load().as_deref() == Some(item.code.as_str()) {
        if let Err(e) = current.clear() {
            warn!(error = %e, "Could not clear current movo");
        }
    }
    Ok(())
}

/// Log a skip of `item`. Skips carry no duration or effort.
pub(crate) fn skip(ctx: &Context, item: &Item) -> Result<(), Box<dyn std::error::Error>> {
    ctx.record(CompletionEvent::skipped(Local::now(), &item.code))?;
    println!("⏭️  Skipped '{}'", item.title);
    Ok(())
}
