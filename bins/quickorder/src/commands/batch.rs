//! Batch command - match a pasted order list line by line

use super::{print_json, read_catalog, Context};
use anyhow::Result;
use owo_colors::OwoColorize;
use quickorder_cli::output::{format_count, format_duration, format_similarity, pad, Status};
use quickorder_cli::progress;
use quickorder_core::{Error, ErrorCode, ResultExt};
use quickorder_matcher::{match_order_lines, CatalogItem, OrderLineMatch};
use quickorder_telemetry::Timer;
use serde::Serialize;
use std::path::Path;

/// JSON output for batch
#[derive(Debug, Serialize)]
struct JsonBatchOutput<'a> {
    total: usize,
    matched: usize,
    lines: &'a [OrderLineMatch<'a, CatalogItem>],
}

/// Run batch command
pub fn run(ctx: &Context, input: &str, catalog_path: &Path, strict: bool) -> Result<()> {
    let matcher = ctx.matcher()?;
    let catalog = read_catalog(catalog_path)?;
    let text = read_input(input)?;

    let timer = Timer::start("batch");
    let spinner = (!ctx.is_json()).then(|| progress::spinner("Matching order lines..."));

    let results = match_order_lines(&text, &catalog, &matcher);
    let matched = results.iter().filter(|r| r.is_matched()).count();

    let elapsed = timer.stop();
    if let Some(pb) = &spinner {
        progress::finish_success(pb, &format_count(results.len(), "line", "lines"));
    }

    if ctx.is_json() {
        print_json(&JsonBatchOutput {
            total: results.len(),
            matched,
            lines: &results,
        })?;
    } else {
        print_table(&results);
        println!();
        Status::info(&format!(
            "{} of {} matched in {}",
            matched,
            format_count(results.len(), "line", "lines"),
            format_duration(elapsed)
        ));
    }

    let unmatched = results.len() - matched;
    if strict && unmatched > 0 {
        return Err(Error::new(
            ErrorCode::NoMatch,
            format!("{} without a catalog item", format_count(unmatched, "line", "lines")),
        )
        .into());
    }
    Ok(())
}

fn read_input(input: &str) -> Result<String, Error> {
    if input == "-" {
        return std::io::read_to_string(std::io::stdin())
            .map_err(Error::from)
            .context("Reading order lines from stdin");
    }

    let path = Path::new(input);
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }
    std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Reading order lines from {}", path.display()))
}

fn print_table(results: &[OrderLineMatch<'_, CatalogItem>]) {
    let name_width = results
        .iter()
        .map(|r| r.line.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    println!(
        "  {:>4}  {}  {:>5}  {}",
        "#".dimmed(),
        pad("Line", name_width).dimmed(),
        "Qty".dimmed(),
        "Item".dimmed()
    );
    println!("  {}", "─".repeat(name_width + 30).dimmed());

    for result in results {
        let item = match (result.item, result.tier) {
            (Some(item), Some(tier)) => {
                let score = result
                    .similarity
                    .map(|s| format!(" {}", format_similarity(s)))
                    .unwrap_or_default();
                format!("{} {}", item.name.green(), format!("({}{})", tier, score).dimmed())
            }
            _ => "no match".red().to_string(),
        };

        println!(
            "  {:>4}  {}  {:>5}  {}",
            result.line_number,
            pad(&result.line, name_width),
            result.quantity,
            item
        );
    }
}
