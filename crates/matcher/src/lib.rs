//! Order-line parsing and fuzzy catalog matching.
//!
//! This crate provides:
//! - Name normalization (units, stopwords, punctuation, plurals)
//! - Quantity/name splitting for free-text order lines
//! - Quick-order parsing with catalog lookup
//! - Tiered fuzzy matching with Levenshtein similarity
//! - Catalog loading and legacy default-data import
//! - Batch matching with optional parallelism
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use quickorder_matcher::{fuzzy_match, split_quantity_and_name, CatalogItem};
//!
//! let catalog = vec![
//!     CatalogItem::new("1", "Cucumber"),
//!     CatalogItem::new("2", "Coca-Cola Can"),
//! ];
//!
//! let line = split_quantity_and_name("Cucumber 4pcs");
//! let item = fuzzy_match(&line.name, &catalog).unwrap();
//! assert_eq!((item.id.as_str(), line.quantity), ("1", 4));
//! ```

pub mod batch;
mod catalog;
mod error;
mod fuzzy;
mod normalize;
mod quantity;
mod quick_order;

#[cfg(feature = "wasm")]
mod wasm;

pub use batch::{match_order_lines, OrderLineMatch};
pub use catalog::{
    import_default_data, load_catalog, slugify, CatalogEntry, CatalogItem, Category, IdStrategy,
    ImportedCatalog, Supplier,
};
pub use error::{MatchError, MatchErrorCode, Result};
pub use fuzzy::{
    explain_match, fuzzy_match, levenshtein_distance, similarity, CatalogMatcher, MatchOptions,
    MatchOutcome, MatchTier,
};
pub use normalize::{default_normalizer, normalize, TextNormalizer, Vocabulary, STOPWORDS, UNITS};
pub use quantity::{split_quantity_and_name, ParsedOrderLine, DEFAULT_QUANTITY};
pub use quick_order::{parse_quick_order, MatchResult, ORDER_LINE_UNITS};
