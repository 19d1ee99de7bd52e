//! Batch matching of pasted order lists with optional parallelism.
//!
//! Each non-blank line is split into name and quantity, then the name is
//! fuzzy-matched against the catalog. Results keep input order.

use crate::catalog::CatalogEntry;
use crate::fuzzy::{CatalogMatcher, MatchTier};
use serde::Serialize;

/// Outcome for a single order line.
#[derive(Debug, Clone, Serialize)]
pub struct OrderLineMatch<'a, T> {
    /// 1-based line number in the input
    pub line_number: usize,
    /// The line as written, trimmed
    pub line: String,
    /// Residual item name after quantity extraction
    pub name: String,
    /// Parsed quantity
    pub quantity: u32,
    /// Matched entry, if any
    pub item: Option<&'a T>,
    /// Tier that produced the match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<MatchTier>,
    /// Similarity score for similarity-tier matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl<T> OrderLineMatch<'_, T> {
    /// Whether a catalog entry was found.
    pub fn is_matched(&self) -> bool {
        self.item.is_some()
    }
}

/// Match every non-blank line of `text` against `catalog`.
///
/// # Example
/// ```
/// use quickorder_matcher::{match_order_lines, CatalogItem, CatalogMatcher};
///
/// let catalog = vec![CatalogItem::new("1", "Cucumber"), CatalogItem::new("2", "Egg")];
/// let matcher = CatalogMatcher::default();
///
/// let results = match_order_lines("Cucumber 4pcs\n\nEgg 30\nDragonfruit 1", &catalog, &matcher);
/// assert_eq!(results.len(), 3);
/// assert_eq!(results[1].quantity, 30);
/// assert!(!results[2].is_matched());
/// ```
pub fn match_order_lines<'a, T>(
    text: &str,
    catalog: &'a [T],
    matcher: &CatalogMatcher,
) -> Vec<OrderLineMatch<'a, T>>
where
    T: CatalogEntry + Sync,
{
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        lines
            .par_iter()
            .map(|&(line_number, line)| match_single_line(line_number, line, catalog, matcher))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        lines
            .iter()
            .map(|&(line_number, line)| match_single_line(line_number, line, catalog, matcher))
            .collect()
    }
}

fn match_single_line<'a, T: CatalogEntry>(
    line_number: usize,
    line: &str,
    catalog: &'a [T],
    matcher: &CatalogMatcher,
) -> OrderLineMatch<'a, T> {
    let parsed = matcher.normalizer().split_quantity_and_name(line);
    let outcome = matcher.explain(&parsed.name, catalog);

    OrderLineMatch {
        line_number,
        line: line.to_string(),
        name: parsed.name,
        quantity: parsed.quantity,
        tier: outcome.as_ref().map(|o| o.tier),
        similarity: outcome.as_ref().and_then(|o| o.similarity),
        item: outcome.map(|o| o.item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogItem;

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("cuc", "Cucumber"),
            CatalogItem::new("egg", "Egg"),
            CatalogItem::new("coke", "Coca-Cola Can"),
        ]
    }

    #[test]
    fn test_match_order_lines_keeps_order() {
        let items = catalog();
        let matcher = CatalogMatcher::default();
        let text = "Egg 30\nCucumber 4pcs\n   \n4 cans coca cola\nunknown thing 2";

        let results = match_order_lines(text, &items, &matcher);

        let summary: Vec<_> = results
            .iter()
            .map(|r| (r.line_number, r.item.map(|i| i.id.as_str()), r.quantity))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, Some("egg"), 30),
                (2, Some("cuc"), 4),
                (4, Some("coke"), 4),
                (5, None, 2),
            ]
        );
        assert_eq!(results[2].tier, Some(MatchTier::Exact));
        assert!(!results[3].is_matched());
    }

    #[test]
    fn test_empty_input() {
        let items = catalog();
        assert!(match_order_lines("\n\n", &items, &CatalogMatcher::default()).is_empty());
    }

    #[test]
    fn test_serializes_matched_item() {
        let items = catalog();
        let results = match_order_lines("Egg 2", &items, &CatalogMatcher::default());
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json[0]["item"]["id"], "egg");
        assert_eq!(json[0]["tier"], "exact");
        assert!(json[0].get("similarity").is_none());
    }
}
