//! Factor listing command implementation.

use factorlake_factors::registry::{available_categories, factors_by_category};

/// List available factors, optionally filtered by category.
pub(crate) fn list_factors(category: Option<&str>, verbose: bool) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Available Factors                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for cat in available_categories() {
        let cat_name = cat.to_string();
        if let Some(filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        let cat_factors = factors_by_category(&cat);
        if cat_factors.is_empty() {
            continue;
        }

        println!("{}: {}", cat_name, cat.description());
        println!("{}", "-".repeat(60));

        for info in cat_factors {
            if verbose {
                println!("  {:22} {}", info.name, info.description);
                println!("  {:22} column:    {}", "", info.column);
                println!("  {:22} direction: {}", "", info.direction);
                println!("  {:22} thesis:    {}", "", info.thesis);
                if !info.aliases.is_empty() {
                    println!("  {:22} aliases:   {}", "", info.aliases.join(", "));
                }
            } else {
                println!("  {:22} ({})", info.name, info.direction);
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for columns, theses and aliases.\n");
    }
}
