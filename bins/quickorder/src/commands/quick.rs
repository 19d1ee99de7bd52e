//! Quick command - parse "<name> <quantity>" and look the item up

use super::{print_json, read_catalog, Context};
use anyhow::Result;
use owo_colors::OwoColorize;
use quickorder_cli::output::Status;
use quickorder_core::Error;
use quickorder_matcher::parse_quick_order;
use std::path::Path;

/// Run quick command
pub fn run(ctx: &Context, text: &str, catalog_path: &Path) -> Result<()> {
    let catalog = read_catalog(catalog_path)?;

    let Some(order) = parse_quick_order(text, &catalog) else {
        if ctx.is_json() {
            println!("null");
        }
        return Err(Error::no_match(text)
            .with_suggestion("Use \"<item name> <quantity>\", e.g. \"Egg 30\" or \"Cucumber 4pcs\"")
            .into());
    };

    if ctx.is_json() {
        return print_json(&order);
    }

    Status::success(&format!(
        "{} × {} {}",
        order.quantity,
        order.item.name.bold(),
        format!("[{}]", order.item.id).dimmed()
    ));
    Ok(())
}
