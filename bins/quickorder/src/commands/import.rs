//! Import command - convert legacy default data into a catalog

use super::{from_match_error, print_json, Context};
use anyhow::Result;
use quickorder_cli::output::{format_count, Status};
use quickorder_cli::progress;
use quickorder_core::{Error, ResultExt};
use quickorder_matcher::{import_default_data, IdStrategy};
use quickorder_telemetry::timed_span;
use std::path::Path;

/// Run import command
pub fn run(ctx: &Context, input: &Path, slug_ids: bool, output: Option<&Path>) -> Result<()> {
    timed_span!("import");

    if !input.exists() {
        return Err(Error::file_not_found(input).into());
    }

    let raw = std::fs::read_to_string(input)
        .map_err(Error::from)
        .context(format!("Reading {}", input.display()))?;
    let data: serde_json::Value = serde_json::from_str(&raw)
        .map_err(Error::from)
        .context(format!("Parsing {}", input.display()))?;

    let ids = if slug_ids { IdStrategy::Slug } else { IdStrategy::Random };
    let catalog = import_default_data(&data, ids)
        .map_err(from_match_error)
        .context(format!("Importing {}", input.display()))?;

    let Some(output) = output else {
        return print_json(&catalog);
    };

    let spinner = (!ctx.is_json()).then(|| progress::spinner("Writing catalog..."));
    let json = serde_json::to_string_pretty(&catalog)?;
    std::fs::write(output, json)
        .map_err(Error::from)
        .context(format!("Writing {}", output.display()))?;

    let summary = format!(
        "{}, {}, {}",
        format_count(catalog.items.len(), "item", "items"),
        format_count(catalog.categories.len(), "category", "categories"),
        format_count(catalog.suppliers.len(), "supplier", "suppliers")
    );

    if let Some(pb) = &spinner {
        progress::finish_success(pb, &format!("Wrote {}", output.display()));
    }

    if ctx.is_json() {
        print_json(&serde_json::json!({
            "output": output.display().to_string(),
            "items": catalog.items.len(),
            "categories": catalog.categories.len(),
            "suppliers": catalog.suppliers.len(),
        }))
    } else {
        Status::success(&format!("Imported {}", summary));
        Ok(())
    }
}
