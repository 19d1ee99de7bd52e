//! Quantity/name splitting for free-text order lines.
//!
//! Accepts lines like "Cucumber 4pcs", "Egg 30", "4 cans coke" and
//! "Box pasta 2pcs". Patterns are tried in a fixed order and the first one
//! that yields a usable quantity wins.

use crate::normalize::{default_normalizer, TextNormalizer};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Quantity used when a line carries no number.
pub const DEFAULT_QUANTITY: u32 = 1;

/// `<name><digits> <letters>?` at the end.
static TRAILING_QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)([0-9]+)\s*([a-zA-Z]*)$").unwrap());

/// `<name><letters> <digits>` at the end.
static LETTERS_THEN_QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)([a-zA-Z]+)\s*([0-9]+)$").unwrap());

/// `<digits> <letters>? <name>` at the start.
static LEADING_QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\s*([a-zA-Z]*)\s+(.+)$").unwrap());

/// `<name> <digits>` at the end.
static SPACED_QUANTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s+([0-9]+)$").unwrap());

/// An order line split into item name and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOrderLine {
    /// Residual item name
    pub name: String,
    /// Parsed quantity, or [`DEFAULT_QUANTITY`]
    pub quantity: u32,
}

impl ParsedOrderLine {
    fn unparsed(text: &str) -> Self {
        Self {
            name: text.to_string(),
            quantity: DEFAULT_QUANTITY,
        }
    }
}

impl TextNormalizer {
    /// Split an order line into name and quantity.
    ///
    /// On a match the name has units removed, whitespace collapsed and is
    /// lowercased. Without a match the text comes back unchanged with
    /// quantity 1. A number too large for `u32` counts as no number.
    pub fn split_quantity_and_name(&self, text: &str) -> ParsedOrderLine {
        let line = text.trim();

        self.trailing_quantity(line)
            .or_else(|| self.letters_then_quantity(line))
            .or_else(|| self.leading_quantity(line))
            .or_else(|| self.spaced_quantity(line))
            .unwrap_or_else(|| ParsedOrderLine::unparsed(text))
    }

    fn trailing_quantity(&self, line: &str) -> Option<ParsedOrderLine> {
        let caps = TRAILING_QUANTITY.captures(line)?;
        let quantity = caps[2].parse().ok()?;
        Some(self.parsed(&caps[1], quantity))
    }

    fn letters_then_quantity(&self, line: &str) -> Option<ParsedOrderLine> {
        let caps = LETTERS_THEN_QUANTITY.captures(line)?;
        let quantity = caps[3].parse().ok()?;
        Some(self.parsed(&caps[1], quantity))
    }

    fn leading_quantity(&self, line: &str) -> Option<ParsedOrderLine> {
        let caps = LEADING_QUANTITY.captures(line)?;
        let quantity = caps[1].parse().ok()?;
        // Letters glued to the number are a unit or the first name word;
        // units disappear in `parsed` either way.
        let name = format!("{} {}", &caps[2], &caps[3]);
        Some(self.parsed(&name, quantity))
    }

    fn spaced_quantity(&self, line: &str) -> Option<ParsedOrderLine> {
        let caps = SPACED_QUANTITY.captures(line)?;
        let quantity = caps[2].parse().ok()?;
        Some(self.parsed(&caps[1], quantity))
    }

    fn parsed(&self, raw_name: &str, quantity: u32) -> ParsedOrderLine {
        ParsedOrderLine {
            name: self.strip_units(raw_name).to_lowercase(),
            quantity,
        }
    }
}

/// Split an order line with the built-in unit vocabulary.
///
/// # Example
/// ```
/// use quickorder_matcher::split_quantity_and_name;
///
/// let line = split_quantity_and_name("Cucumber 4pcs");
/// assert_eq!(line.name, "cucumber");
/// assert_eq!(line.quantity, 4);
/// ```
pub fn split_quantity_and_name(text: &str) -> ParsedOrderLine {
    default_normalizer().split_quantity_and_name(text)
}
