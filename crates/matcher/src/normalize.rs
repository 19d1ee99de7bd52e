//! Name normalization.
//!
//! Canonicalizes free-text item names so that "4 Cans of Coke", "coke" and
//! "Coke!" compare equal. The pipeline is fixed; only the unit and stopword
//! lists can be extended.

use crate::error::{MatchError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Unit words stripped from names before comparison.
pub const UNITS: &[&str] = &[
    "kg", "g", "l", "ml", "pc", "pcs", "can", "cans", "bt", "bottle", "bottles", "pk", "pack",
    "packs", "jar", "jars", "bag", "bags", "small", "big", "lb", "lbs", "oz",
];

/// Filler words stripped from names before comparison.
pub const STOPWORDS: &[&str] = &["for", "of", "the", "a", "an", "and", "to"];

/// Anything that is not an ASCII word character, whitespace or hyphen.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9A-Za-z_\s-]").unwrap());

/// A trailing "s" at an ASCII word boundary.
static PLURAL_S: Lazy<Regex> = Lazy::new(|| Regex::new(r"s(?-u:\b)").unwrap());

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s-]+").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static DEFAULT_NORMALIZER: Lazy<TextNormalizer> = Lazy::new(|| {
    TextNormalizer::new(Vocabulary::default()).expect("built-in vocabulary is valid")
});

/// Word lists removed by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Unit words ("kg", "pcs", ...)
    pub units: Vec<String>,
    /// Filler words ("of", "the", ...)
    pub stopwords: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            units: UNITS.iter().map(|s| s.to_string()).collect(),
            stopwords: STOPWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Vocabulary {
    /// Built-in lists extended with extra units and stopwords.
    ///
    /// Duplicates of built-in words are ignored.
    pub fn with_extra<U, S>(units: U, stopwords: S) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let mut vocabulary = Self::default();
        extend_unique(&mut vocabulary.units, units);
        extend_unique(&mut vocabulary.stopwords, stopwords);
        vocabulary
    }
}

fn extend_unique<I>(target: &mut Vec<String>, extra: I)
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    for word in extra {
        let word = word.into().trim().to_lowercase();
        if !target.contains(&word) {
            target.push(word);
        }
    }
}

/// Compiled normalizer for one vocabulary.
///
/// Cloning is cheap; the compiled patterns are shared.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    vocabulary: Vocabulary,
    /// Whole-word units only; used on order-line residual names.
    units: Regex,
    /// Whole-word units and stopwords in one alternation.
    noise: Regex,
}

impl TextNormalizer {
    /// Compile a normalizer for the given vocabulary.
    ///
    /// # Errors
    /// `InvalidVocabulary` if any word is empty or blank.
    pub fn new(vocabulary: Vocabulary) -> Result<Self> {
        let units = whole_word_pattern(&vocabulary.units)?;
        let all: Vec<String> = vocabulary
            .units
            .iter()
            .chain(vocabulary.stopwords.iter())
            .cloned()
            .collect();
        let noise = whole_word_pattern(&all)?;

        Ok(Self {
            vocabulary,
            units,
            noise,
        })
    }

    /// The vocabulary this normalizer was built from.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Normalize a name for comparison.
    ///
    /// Lowercases, removes units and stopwords, drops punctuation, strips a
    /// trailing "s" from every word and collapses whitespace and hyphens into
    /// single spaces. The result may be empty.
    ///
    /// # Example
    /// ```
    /// use quickorder_matcher::normalize;
    ///
    /// assert_eq!(normalize("Cans of Coke"), "coke");
    /// assert_eq!(normalize("Bell-Pepper (red)"), "bell pepper red");
    /// ```
    pub fn normalize(&self, name: &str) -> String {
        let lowered = name.trim().to_lowercase();
        let without_noise = self.noise.replace_all(&lowered, "");
        let cleaned = NON_WORD.replace_all(&without_noise, "");
        let singular = PLURAL_S.replace_all(&cleaned, "");
        SEPARATORS.replace_all(&singular, " ").trim().to_string()
    }

    /// Remove unit words (case-insensitive) and collapse whitespace.
    ///
    /// Unlike [`normalize`](Self::normalize) this keeps case, punctuation and
    /// stopwords.
    pub fn strip_units(&self, text: &str) -> String {
        let stripped = self.units.replace_all(text, "");
        collapse_whitespace(&stripped)
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        DEFAULT_NORMALIZER.clone()
    }
}

/// Build `\b(?:w1|w2|...)\b` with ASCII word boundaries, case-insensitive.
fn whole_word_pattern(words: &[String]) -> Result<Regex> {
    if let Some(blank) = words.iter().find(|w| w.trim().is_empty()) {
        return Err(MatchError::InvalidVocabulary(format!(
            "vocabulary words must not be blank (got {blank:?})"
        )));
    }

    let alternation = words
        .iter()
        .map(|w| regex::escape(w.trim()))
        .collect::<Vec<_>>()
        .join("|");

    Ok(Regex::new(&format!(r"(?i)(?-u:\b)(?:{alternation})(?-u:\b)"))?)
}

/// Replace whitespace runs with one space and trim.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Remove all whitespace.
pub(crate) fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// The normalizer for the built-in vocabulary.
pub fn default_normalizer() -> &'static TextNormalizer {
    &DEFAULT_NORMALIZER
}

/// Normalize a name with the built-in vocabulary.
pub fn normalize(name: &str) -> String {
    DEFAULT_NORMALIZER.normalize(name)
}
