//! `movodoro subsets`: list configured subsets.

use super::{Context, render};

pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let subsets = ctx.subsets()?;

    if subsets.is_empty() {
        println!("No subsets configured.");
        println!();
        println!("Create a subsets.yaml file in your movos directory:");
        println!("  {}", ctx.config.movos_dir().join("subsets.yaml").display());
        return Ok(());
    }

    print!("{}", render::banner(&["AVAILABLE SUBSETS"]));
    println!();

    for (name, subset) in &subsets {
        let marker = if ctx.active_subset() == Some(name.as_str()) { " (active)" } else { "" };
        println!("📦 {name}{marker}");
        if !subset.description.is_empty() {
            println!("   {}", subset.description);
        }
        println!("   {} movos", subset.codes.len());
        println!();
    }

    println!("Usage:");
    println!("  movodoro get --subset SUBSET_NAME");
    println!("  movodoro --subset SUBSET_NAME          # Interactive mode");
    println!("  export MOVODORO_ACTIVE_SUBSET=SUBSET_NAME");
    Ok(())
}
