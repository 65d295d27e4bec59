//! `movodoro report`: today's report, plain or markdown.

use clap::ValueEnum;

use super::Context;
use super::render::{ReportStyle, day_report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Period {
    Day,
    Today,
    Week,
    Month,
}

pub fn run(
    ctx: &Context,
    period: Period,
    markdown: bool,
    long: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match period {
        Period::Day | Period::Today => {}
        Period::Week => {
            println!("Week report - not yet implemented");
            return Ok(());
        }
        Period::Month => {
            println!("Month report - not yet implemented");
            return Ok(());
        }
    }

    let stats = ctx.today()?;
    let catalog = if long { Some(ctx.catalog()?) } else { None };
    let style = ReportStyle {
        markdown,
        catalog: catalog.as_ref(),
        cap: ctx.config.max_daily_intensity,
    };
    print!("{}", day_report(&stats, &style));
    Ok(())
}
