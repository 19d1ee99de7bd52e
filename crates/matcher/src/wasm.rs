//! WASM bindings for the order entry screens.
//!
//! Catalogs cross the boundary as JSON strings. Malformed input yields
//! `"null"` rather than a panic.

use crate::catalog::{load_catalog, CatalogItem};
use wasm_bindgen::prelude::*;

/// Normalize an item name for comparison.
#[wasm_bindgen]
pub fn normalize_name(name: &str) -> String {
    crate::normalize(name)
}

/// Split an order line into name and quantity.
///
/// # Returns
/// JSON object with `name` and `quantity` fields
#[wasm_bindgen]
pub fn split_order_line(text: &str) -> String {
    let parsed = crate::split_quantity_and_name(text);
    serde_json::to_string(&parsed).unwrap_or_else(|_| "null".to_string())
}

/// Fuzzy-match a name against a catalog.
///
/// # Arguments
/// * `search` - Free-text item name
/// * `catalog_json` - JSON array of catalog items (or an export with `items`)
///
/// # Returns
/// JSON object with `item`, `index`, `tier` and, for the similarity tier,
/// `similarity` fields, or `"null"`
#[wasm_bindgen]
pub fn match_item(search: &str, catalog_json: &str) -> String {
    let Some(catalog) = parse_catalog(catalog_json) else {
        return "null".to_string();
    };

    match crate::explain_match(search, &catalog) {
        Some(outcome) => serde_json::to_string(&outcome).unwrap_or_else(|_| "null".to_string()),
        None => "null".to_string(),
    }
}

/// Parse a quick-order line against a catalog.
///
/// # Returns
/// JSON object with `item` and `quantity` fields, or `"null"`
#[wasm_bindgen]
pub fn quick_order(text: &str, catalog_json: &str) -> String {
    let Some(catalog) = parse_catalog(catalog_json) else {
        return "null".to_string();
    };

    match crate::parse_quick_order(text, &catalog) {
        Some(order) => serde_json::to_string(&order).unwrap_or_else(|_| "null".to_string()),
        None => "null".to_string(),
    }
}

fn parse_catalog(catalog_json: &str) -> Option<Vec<CatalogItem>> {
    load_catalog(catalog_json).ok()
}
