//! Normalize command - print canonical item names

use super::{print_json, Context};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Normalized<'a> {
    input: &'a str,
    normalized: String,
}

/// Run normalize command
pub fn run(ctx: &Context, texts: &[String]) -> Result<()> {
    let matcher = ctx.matcher()?;
    let normalizer = matcher.normalizer();

    let results: Vec<Normalized> = texts
        .iter()
        .map(|text| Normalized {
            input: text,
            normalized: normalizer.normalize(text),
        })
        .collect();

    if ctx.is_json() {
        return print_json(&results);
    }

    for result in &results {
        println!("{}", result.normalized);
    }
    Ok(())
}
