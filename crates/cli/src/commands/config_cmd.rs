//! `movodoro config`: show the resolved configuration and catalog health.

use movodoro_catalog::unknown_codes;
use movodoro_config::{AppConfig, ENV_MOVOS_DIR};

use super::{Context, render};

pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let config = &ctx.config;
    let movos_dir = config.movos_dir();

    print!("{}", render::banner(&["MOVODORO CONFIGURATION"]));
    println!();
    println!("Config file:      {}", existence(&config.config_path()));
    println!("Movos directory:  {}", movos_dir.display());
    println!("Logs directory:   {}", config.logs_dir().display());
    println!("Current file:     {}", config.current_path().display());
    println!("Max daily RPE:    {}", config.max_daily_intensity);
    if let Some(subset) = ctx.active_subset() {
        println!("Active subset:    {subset}");
    }
    println!();

    if !movos_dir.is_dir() {
        println!("⚠️  Movos directory does not exist: {}", movos_dir.display());
        println!();
        println!("To set a custom movos directory, use:");
        println!("  export {ENV_MOVOS_DIR}=/path/to/your/movos");
        println!();
        println!("Or start from this config.toml:");
        println!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let catalog = match ctx.catalog() {
        Ok(c) => c,
        Err(e) => {
            println!("❌ {e}");
            return Err(e.into());
        }
    };
    println!(
        "✅ Found {} movos ({} every day)",
        catalog.len(),
        catalog.everyday().count()
    );

    match ctx.subsets() {
        Ok(subsets) => {
            println!("✅ Found {} subsets", subsets.len());
            for (name, subset) in &subsets {
                let unknown = unknown_codes(subset, |code| catalog.get(code).is_some());
                if !unknown.is_empty() {
                    println!("   ⚠️  Subset '{name}' lists unknown codes: {}", unknown.join(", "));
                }
            }
            if let Some(active) = ctx.active_subset() {
                if !subsets.contains_key(active) {
                    println!("   ⚠️  Active subset '{active}' is not defined");
                }
            }
        }
        Err(e) => println!("⚠️  {e}"),
    }
    println!();
    Ok(())
}

fn existence(path: &std::path::Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    }
}
