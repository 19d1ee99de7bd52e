//! Match command - find the catalog item closest to a name

use super::{print_json, read_catalog, Context};
use anyhow::Result;
use owo_colors::OwoColorize;
use quickorder_cli::output::{format_similarity, Status};
use quickorder_core::Error;
use std::path::Path;

/// Run match command
pub fn run(ctx: &Context, name: &str, catalog_path: &Path) -> Result<()> {
    let matcher = ctx.matcher()?;
    let catalog = read_catalog(catalog_path)?;

    let Some(outcome) = matcher.explain(name, &catalog) else {
        if ctx.is_json() {
            println!("null");
        }
        return Err(Error::no_match(name).into());
    };

    if ctx.is_json() {
        return print_json(&outcome);
    }

    let item = outcome.item;
    Status::success(&format!(
        "{} {} via {}",
        item.name.bold(),
        format!("[{}]", item.id).dimmed(),
        outcome.tier
    ));
    if let Some(score) = outcome.similarity {
        println!("  similarity {}", format_similarity(score));
    }
    if !item.category.is_empty() {
        println!("  category   {}", item.category);
    }
    if !item.supplier.is_empty() {
        println!("  supplier   {}", item.supplier);
    }
    Ok(())
}
