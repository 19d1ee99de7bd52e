//! Quick-order entry: "Cucumber 4pcs", "Egg - 30", "Box pasta 2 pcs".
//!
//! Stricter than [`split_quantity_and_name`](crate::split_quantity_and_name):
//! the number must come last, and the name is looked up by plain
//! case-insensitive comparison instead of the fuzzy tiers.

use crate::catalog::{CatalogEntry, CatalogItem};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Units accepted after the quantity of a quick order.
pub const ORDER_LINE_UNITS: &[&str] = &[
    "pcs", "kg", "g", "L", "l", "bt", "pk", "jar", "bag", "small", "big", "box", "can", "pack",
    "piece", "pieces",
];

/// `<name>` then spaces or a dash, `<digits>`, optional `<letters>`.
static QUICK_ORDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)(?:\s+|\s*-\s*)([0-9]+)(?:\s*([a-zA-Z]+))?$").unwrap());

/// A catalog item with the ordered quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a, T = CatalogItem> {
    /// Matched catalog entry
    pub item: &'a T,
    /// Ordered quantity
    pub quantity: u32,
}

/// Parse a quick-order line and look the name up in `catalog`.
///
/// Returns `None` when the line has no trailing number, the number does not
/// fit in `u32`, or no entry matches. Lookup is an exact case-insensitive
/// name match first, then the first entry whose name contains the search
/// term. A name reduced to nothing is contained in every entry.
///
/// # Example
/// ```
/// use quickorder_matcher::{parse_quick_order, CatalogItem};
///
/// let catalog = vec![CatalogItem::new("1", "Box Pasta"), CatalogItem::new("2", "Egg")];
///
/// let order = parse_quick_order("Box pasta 2pcs", &catalog).unwrap();
/// assert_eq!(order.item.id, "1");
/// assert_eq!(order.quantity, 2);
/// ```
pub fn parse_quick_order<'a, T: CatalogEntry>(
    text: &str,
    catalog: &'a [T],
) -> Option<MatchResult<'a, T>> {
    let caps = QUICK_ORDER.captures(text.trim())?;
    let quantity: u32 = caps[2].parse().ok()?;

    let mut name = caps[1].trim().to_string();
    if let Some(unit) = caps.get(3).map(|m| m.as_str()) {
        if is_order_line_unit(unit) {
            name = strip_trailing_word(&name, unit);
        }
    }
    for unit in ORDER_LINE_UNITS {
        name = strip_trailing_word(&name, unit);
    }

    let term = name.to_lowercase();

    let item = catalog
        .iter()
        .find(|entry| entry.name().to_lowercase() == term)
        .or_else(|| {
            catalog
                .iter()
                .find(|entry| entry.name().to_lowercase().contains(&term))
        })?;

    tracing::debug!(text, item = item.name(), quantity, "quick order");
    Some(MatchResult { item, quantity })
}

fn is_order_line_unit(word: &str) -> bool {
    ORDER_LINE_UNITS.iter().any(|u| u.eq_ignore_ascii_case(word))
}

/// Drop `word` from the end of `name` if it stands alone there
/// (case-insensitive, ASCII word boundary before it), then trim.
fn strip_trailing_word(name: &str, word: &str) -> String {
    if word.is_empty() || name.len() < word.len() {
        return name.trim().to_string();
    }

    let cut = name.len() - word.len();
    if !name.is_char_boundary(cut) || !name[cut..].eq_ignore_ascii_case(word) {
        return name.trim().to_string();
    }

    let at_boundary = match name[..cut].chars().next_back() {
        Some(c) => !(c.is_ascii_alphanumeric() || c == '_'),
        None => true,
    };

    if at_boundary {
        name[..cut].trim().to_string()
    } else {
        name.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("cuc", "Cucumber"),
            CatalogItem::new("egg", "Egg"),
            CatalogItem::new("pasta", "Box Pasta"),
            CatalogItem::new("pepper", "Bell pepper red"),
            CatalogItem::new("eggplant", "Eggplant"),
        ]
    }

    fn quick(text: &str) -> Option<(String, u32)> {
        let items = catalog();
        parse_quick_order(text, &items).map(|r| (r.item.id.clone(), r.quantity))
    }

    #[test]
    fn test_quantity_with_unit() {
        assert_eq!(quick("Cucumber 4pcs"), Some(("cuc".into(), 4)));
        assert_eq!(quick("Box pasta 2pcs"), Some(("pasta".into(), 2)));
        assert_eq!(quick("Cucumber 4 pcs"), Some(("cuc".into(), 4)));
    }

    #[test]
    fn test_plain_quantity() {
        assert_eq!(quick("Egg 30"), Some(("egg".into(), 30)));
        assert_eq!(quick("  egg   12 "), Some(("egg".into(), 12)));
    }

    #[test]
    fn test_dash_separator() {
        assert_eq!(quick("Egg - 30"), Some(("egg".into(), 30)));
        assert_eq!(quick("Egg-30"), Some(("egg".into(), 30)));
    }

    #[test]
    fn test_exact_before_contains() {
        // "egg" is contained in "Eggplant" but "Egg" is exact
        assert_eq!(quick("EGG 6"), Some(("egg".into(), 6)));
    }

    #[test]
    fn test_contains_fallback() {
        assert_eq!(quick("pepper 2"), Some(("pepper".into(), 2)));
        assert_eq!(quick("plant 1"), Some(("eggplant".into(), 1)));
    }

    #[test]
    fn test_trailing_unit_word_removed_from_name() {
        assert_eq!(quick("Cucumber box 3"), Some(("cuc".into(), 3)));
        assert_eq!(quick("Cucumber pieces 3 pieces"), Some(("cuc".into(), 3)));
    }

    #[test]
    fn test_requires_number() {
        assert_eq!(quick("Cucumber"), None);
        assert_eq!(quick("4"), None);
        assert_eq!(quick("Cucumber4"), None);
    }

    #[test]
    fn test_unknown_item() {
        assert_eq!(quick("Watermelon 2"), None);
    }

    #[test]
    fn test_empty_name_takes_first_item() {
        assert_eq!(quick("- 5"), Some(("cuc".into(), 5)));
        assert_eq!(quick("pcs 5"), Some(("cuc".into(), 5)));

        let names = ["Coke"];
        let order = parse_quick_order("pcs 5", &names).unwrap();
        assert_eq!((*order.item, order.quantity), ("Coke", 5));
    }

    #[test]
    fn test_overflow_is_no_number() {
        assert_eq!(quick("Egg 99999999999"), None);
    }

    #[test]
    fn test_strip_trailing_word() {
        assert_eq!(strip_trailing_word("Box pasta BOX", "box"), "Box pasta");
        assert_eq!(strip_trailing_word("Egg", "g"), "Egg");
        assert_eq!(strip_trailing_word("g", "g"), "");
        assert_eq!(strip_trailing_word("Crème-l", "l"), "Crème-");
    }

    #[test]
    fn test_works_with_plain_names() {
        let names = ["Coke", "Fanta"];
        let order = parse_quick_order("fanta 3", &names).unwrap();
        assert_eq!(*order.item, "Fanta");
    }
}
