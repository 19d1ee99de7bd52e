//! Split command - extract quantity and name from an order line

use super::{print_json, Context};
use anyhow::Result;
use owo_colors::OwoColorize;

/// Run split command
pub fn run(ctx: &Context, text: &str) -> Result<()> {
    let matcher = ctx.matcher()?;
    let parsed = matcher.normalizer().split_quantity_and_name(text);

    if ctx.is_json() {
        return print_json(&parsed);
    }

    println!("{:<10} {}", "name".dimmed(), parsed.name);
    println!("{:<10} {}", "quantity".dimmed(), parsed.quantity);
    Ok(())
}
