//! Catalog model, loading and legacy import.

use crate::error::{MatchError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Key of the header row in legacy default-data maps.
const HEADER_KEY: &str = "item";

const UNKNOWN_SUPPLIER: &str = "Unknown";

const DEFAULT_CATEGORY_EMOJI: &str = "📦";

/// Non-ASCII emoji code points. ASCII digits, `#` and `*` carry the Emoji
/// property too and are kept.
static EMOJI: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{Emoji}&&[^\x00-\x7F]]").unwrap());

/// Emoji plus the joiners and presentation selectors that glue them.
static EMOJI_SEQUENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[[\p{Emoji}&&[^\x00-\x7F]]\x{FE0F}\x{200D}]").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Anything that can be matched by name.
pub trait CatalogEntry {
    /// Display name used for matching.
    fn name(&self) -> &str;
}

impl CatalogEntry for str {
    fn name(&self) -> &str {
        self
    }
}

impl CatalogEntry for String {
    fn name(&self) -> &str {
        self
    }
}

impl<T: CatalogEntry + ?Sized> CatalogEntry for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// An orderable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique id
    pub id: String,
    /// Display name
    pub name: String,
    /// Category name
    #[serde(default)]
    pub category: String,
    /// Supplier name
    #[serde(default)]
    pub supplier: String,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogItem {
    /// Create an item with no category, supplier or tags.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            supplier: String::new(),
            tags: Vec::new(),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the supplier.
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    /// Set the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

impl CatalogEntry for CatalogItem {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Item category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub emoji: String,
}

/// Item supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
}

/// Result of a legacy import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedCatalog {
    pub items: Vec<CatalogItem>,
    pub categories: Vec<Category>,
    pub suppliers: Vec<Supplier>,
}

/// How imported entities get their ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Random UUID v4
    #[default]
    Random,
    /// Lowercased name with whitespace runs replaced by `-`
    Slug,
}

impl IdStrategy {
    fn id_for(self, name: &str) -> String {
        match self {
            IdStrategy::Random => uuid::Uuid::new_v4().to_string(),
            IdStrategy::Slug => slugify(name),
        }
    }
}

/// Lowercase and join whitespace-separated words with `-`.
pub fn slugify(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// Load catalog items from JSON.
///
/// Accepts a bare array of items, or an object whose `items` field is an
/// array or an id-keyed map. Keyed entries without an `id` take the key.
/// Item order follows the document.
///
/// # Errors
/// `JsonError` for malformed JSON or items, `CatalogImport` for other shapes.
pub fn load_catalog(json: &str) -> Result<Vec<CatalogItem>> {
    let document: Value = serde_json::from_str(json)?;

    match document {
        Value::Array(_) => Ok(serde_json::from_value(document)?),
        Value::Object(mut root) => match root.remove("items") {
            Some(items @ Value::Array(_)) => Ok(serde_json::from_value(items)?),
            Some(Value::Object(keyed)) => keyed
                .into_iter()
                .map(|(key, mut entry)| -> Result<CatalogItem> {
                    if let Value::Object(fields) = &mut entry {
                        fields.entry("id").or_insert(Value::String(key));
                    }
                    Ok(serde_json::from_value(entry)?)
                })
                .collect(),
            Some(_) => Err(MatchError::CatalogImport(
                "`items` must be an array or an object".to_string(),
            )),
            None => Err(MatchError::CatalogImport(
                "catalog object has no `items` field".to_string(),
            )),
        },
        _ => Err(MatchError::CatalogImport(
            "expected an array of items or an object with `items`".to_string(),
        )),
    }
}

/// Import the legacy default-data export.
///
/// The document is an array whose first element maps item name to a
/// category label (optionally carrying an emoji, e.g. `"🥬Vegetables"`) and
/// whose second element maps item name to supplier name. The `"item"` key is
/// a header row and is skipped. Categories and suppliers are de-duplicated
/// by name in first-seen order.
///
/// # Errors
/// `CatalogImport` if the category map is missing or a label is not a string.
pub fn import_default_data(data: &Value, ids: IdStrategy) -> Result<ImportedCatalog> {
    let category_map = data
        .get(0)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            MatchError::CatalogImport("element 0 must map item names to categories".to_string())
        })?;
    let supplier_map = data.get(1).and_then(Value::as_object);

    let mut catalog = ImportedCatalog::default();
    let mut seen_categories = HashSet::new();
    let mut seen_suppliers = HashSet::new();

    for (item_name, label) in category_map {
        if item_name == HEADER_KEY {
            continue;
        }

        let label = label.as_str().ok_or_else(|| {
            MatchError::CatalogImport(format!("category of {item_name:?} is not a string"))
        })?;
        let supplier = supplier_map
            .and_then(|m| m.get(item_name))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SUPPLIER);

        let (emoji, category_name) = split_category_label(label);

        if seen_categories.insert(category_name.clone()) {
            catalog.categories.push(Category {
                id: ids.id_for(&category_name),
                name: category_name.clone(),
                emoji,
            });
        }

        if seen_suppliers.insert(supplier.to_string()) {
            catalog.suppliers.push(Supplier {
                id: ids.id_for(supplier),
                name: supplier.to_string(),
            });
        }

        catalog.items.push(CatalogItem {
            id: ids.id_for(item_name),
            name: item_name.clone(),
            category: category_name,
            supplier: supplier.to_string(),
            tags: Vec::new(),
        });
    }

    tracing::debug!(
        items = catalog.items.len(),
        categories = catalog.categories.len(),
        suppliers = catalog.suppliers.len(),
        "imported legacy catalog"
    );

    Ok(catalog)
}

/// Split `"🥬Vegetables"` into `("🥬", "Vegetables")`.
fn split_category_label(label: &str) -> (String, String) {
    let emoji = EMOJI
        .find(label)
        .map_or(DEFAULT_CATEGORY_EMOJI, |m| m.as_str())
        .to_string();
    let name = EMOJI_SEQUENCE.replace_all(label, "").trim().to_string();
    (emoji, name)
}
