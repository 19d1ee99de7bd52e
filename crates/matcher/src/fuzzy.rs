//! Tiered fuzzy matching of item names against a catalog.
//!
//! Tiers run in a fixed order and the first hit wins:
//!
//! 1. exact normalized name
//! 2. word overlap (either word set contains the other)
//! 3. substring, ignoring whitespace
//! 4. Levenshtein similarity above a length-dependent threshold
//! 5. substring fallback for searches longer than a few characters

use crate::catalog::CatalogEntry;
use crate::error::{MatchError, Result};
use crate::normalize::{compact, TextNormalizer};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Slack for threshold comparisons, so that 1 - 6/10 counts as 0.4.
const SIMILARITY_EPSILON: f64 = 1e-9;

static DEFAULT_MATCHER: Lazy<CatalogMatcher> = Lazy::new(CatalogMatcher::default);

/// Calculate Levenshtein edit distance between two strings.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 { return n; }
    if n == 0 { return m; }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity in `[0, 1]`: `1 - distance / max(len a, len b)`.
///
/// Returns `None` when both strings are empty.
pub fn similarity(a: &str, b: &str) -> Option<f64> {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return None;
    }
    Some(1.0 - levenshtein_distance(a, b) as f64 / max_len as f64)
}

/// Which tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchTier {
    /// Normalized names are equal
    Exact,
    /// One word set contains the other
    WordOverlap,
    /// One compacted name contains the other
    Substring,
    /// Levenshtein similarity above threshold
    Similarity,
    /// Late substring check for longer searches
    Fallback,
}

impl MatchTier {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::WordOverlap => "word-overlap",
            MatchTier::Substring => "substring",
            MatchTier::Similarity => "similarity",
            MatchTier::Fallback => "fallback",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables for the similarity and fallback tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Compacted length at which `long_threshold` applies
    pub long_name_len: usize,
    /// Minimum similarity for long names
    pub long_threshold: f64,
    /// Minimum similarity for short names
    pub short_threshold: f64,
    /// The fallback tier runs only for searches longer than this
    pub fallback_min_len: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            long_name_len: 8,
            long_threshold: 0.4,
            short_threshold: 0.5,
            fallback_min_len: 3,
        }
    }
}

impl MatchOptions {
    /// Check that thresholds lie in `[0, 1]` and lengths are positive.
    ///
    /// # Errors
    /// `InvalidOption` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("long_threshold", self.long_threshold),
            ("short_threshold", self.short_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MatchError::InvalidOption(format!(
                    "{field} must be between 0 and 1, got {value}"
                )));
            }
        }
        if self.long_name_len == 0 {
            return Err(MatchError::InvalidOption(
                "long_name_len must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Threshold for a pair whose longer compacted name has `max_len` chars.
    pub fn threshold_for(&self, max_len: usize) -> f64 {
        if max_len >= self.long_name_len {
            self.long_threshold
        } else {
            self.short_threshold
        }
    }
}

/// A match together with how it was found.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome<'a, T> {
    /// The matched entry
    pub item: &'a T,
    /// Position of the entry in the catalog
    pub index: usize,
    /// Tier that produced the match
    pub tier: MatchTier,
    /// Similarity score, set for the similarity tier only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

/// Normalized catalog name, computed once per call.
struct PreparedName {
    normalized: String,
    compacted: String,
}

impl PreparedName {
    fn new(normalized: String) -> Self {
        let compacted = compact(&normalized);
        Self { normalized, compacted }
    }

    fn words(&self) -> impl Iterator<Item = &str> {
        self.normalized.split(' ').filter(|w| !w.is_empty())
    }
}

/// Tiered catalog matcher.
#[derive(Debug, Clone, Default)]
pub struct CatalogMatcher {
    normalizer: TextNormalizer,
    options: MatchOptions,
}

impl CatalogMatcher {
    /// Create a matcher from a normalizer and options.
    ///
    /// # Errors
    /// `InvalidOption` if the options fail [`MatchOptions::validate`].
    pub fn new(normalizer: TextNormalizer, options: MatchOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { normalizer, options })
    }

    /// The normalizer used for search and catalog names.
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// The active options.
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Find the best catalog entry for `search`.
    pub fn find<'a, T: CatalogEntry>(&self, search: &str, catalog: &'a [T]) -> Option<&'a T> {
        self.explain(search, catalog).map(|outcome| outcome.item)
    }

    /// Find the best catalog entry for `search` and report the tier.
    ///
    /// Empty word sets and empty strings are not special-cased: a search or
    /// an entry that normalizes to nothing satisfies the overlap and
    /// substring tiers vacuously.
    pub fn explain<'a, T: CatalogEntry>(
        &self,
        search: &str,
        catalog: &'a [T],
    ) -> Option<MatchOutcome<'a, T>> {
        let query = PreparedName::new(self.normalizer.normalize(search));

        let names: Vec<PreparedName> = catalog
            .iter()
            .map(|entry| PreparedName::new(self.normalizer.normalize(entry.name())))
            .collect();

        let found = self
            .tier_exact(&query, &names)
            .or_else(|| self.tier_word_overlap(&query, &names))
            .or_else(|| self.tier_substring(&query, &names))
            .or_else(|| self.tier_similarity(&query, &names))
            .or_else(|| self.tier_fallback(&query, &names));

        match found {
            Some((index, tier, similarity)) => {
                let item = &catalog[index];
                debug!(search, item = item.name(), %tier, "catalog match");
                Some(MatchOutcome {
                    item,
                    index,
                    tier,
                    similarity,
                })
            }
            None => {
                debug!(search, normalized = %query.normalized, "no catalog match");
                None
            }
        }
    }

    fn tier_exact(&self, query: &PreparedName, names: &[PreparedName]) -> Option<Hit> {
        names
            .iter()
            .position(|name| name.normalized == query.normalized)
            .map(|index| (index, MatchTier::Exact, None))
    }

    fn tier_word_overlap(&self, query: &PreparedName, names: &[PreparedName]) -> Option<Hit> {
        let query_words: Vec<&str> = query.words().collect();

        names
            .iter()
            .position(|name| {
                let item_words: Vec<&str> = name.words().collect();
                query_words.iter().all(|w| item_words.contains(w))
                    || item_words.iter().all(|w| query_words.contains(w))
            })
            .map(|index| (index, MatchTier::WordOverlap, None))
    }

    fn tier_substring(&self, query: &PreparedName, names: &[PreparedName]) -> Option<Hit> {
        names
            .iter()
            .position(|name| {
                name.compacted.contains(&query.compacted)
                    || query.compacted.contains(&name.compacted)
            })
            .map(|index| (index, MatchTier::Substring, None))
    }

    fn tier_similarity(&self, query: &PreparedName, names: &[PreparedName]) -> Option<Hit> {
        let query_len = query.compacted.chars().count();
        let mut best: Option<(usize, f64)> = None;

        for (index, name) in names.iter().enumerate() {
            let max_len = query_len.max(name.compacted.chars().count());
            let Some(score) = similarity(&query.compacted, &name.compacted) else {
                continue;
            };
            let threshold = self.options.threshold_for(max_len);
            let best_score = best.map_or(0.0, |(_, s)| s);

            // Strict `>` keeps the earlier entry on ties.
            if score > best_score && score + SIMILARITY_EPSILON >= threshold {
                trace!(candidate = %name.normalized, score, "new best similarity");
                best = Some((index, score));
            }
        }

        best.map(|(index, score)| (index, MatchTier::Similarity, Some(score)))
    }

    fn tier_fallback(&self, query: &PreparedName, names: &[PreparedName]) -> Option<Hit> {
        if query.normalized.chars().count() <= self.options.fallback_min_len {
            return None;
        }
        names
            .iter()
            .position(|name| name.normalized.contains(&query.normalized))
            .map(|index| (index, MatchTier::Fallback, None))
    }
}

/// (catalog index, tier, similarity)
type Hit = (usize, MatchTier, Option<f64>);

/// Find the best catalog entry for `search` with default settings.
///
/// # Example
/// ```
/// use quickorder_matcher::{fuzzy_match, CatalogItem};
///
/// let catalog = vec![
///     CatalogItem::new("1", "Bell Pepper Red"),
///     CatalogItem::new("2", "Cucumber"),
/// ];
///
/// let item = fuzzy_match("red bell peppers", &catalog).unwrap();
/// assert_eq!(item.id, "1");
/// assert!(fuzzy_match("xyz123notfound", &catalog).is_none());
/// ```
pub fn fuzzy_match<'a, T: CatalogEntry>(search: &str, catalog: &'a [T]) -> Option<&'a T> {
    DEFAULT_MATCHER.find(search, catalog)
}

/// Like [`fuzzy_match`], also reporting the tier that matched.
pub fn explain_match<'a, T: CatalogEntry>(
    search: &str,
    catalog: &'a [T],
) -> Option<MatchOutcome<'a, T>> {
    DEFAULT_MATCHER.explain(search, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_of(search: &str, catalog: &[&str]) -> Option<(usize, MatchTier)> {
        explain_match(search, catalog).map(|o| (o.index, o.tier))
    }

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein_distance("hello", "hallo"), 1);
    }

    #[test]
    fn test_levenshtein_insert() {
        assert_eq!(levenshtein_distance("helo", "hello"), 1);
    }

    #[test]
    fn test_levenshtein_delete() {
        assert_eq!(levenshtein_distance("hello", "helo"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("abc", "abc"), Some(1.0));
        assert_eq!(similarity("", ""), None);
        assert_eq!(similarity("abcd", ""), Some(0.0));
    }

    #[test]
    fn test_exact_tier() {
        assert_eq!(tier_of("COKE", &["Coca-Cola Can", "Coke"]), Some((1, MatchTier::Exact)));
        assert_eq!(tier_of("4 cans of coke", &["4 Coke"]), Some((0, MatchTier::Exact)));
    }

    #[test]
    fn test_exact_beats_earlier_partial_matches() {
        let catalog = ["Coke Zero", "Diet Coke", "Coke"];
        assert_eq!(tier_of("coke", &catalog), Some((2, MatchTier::Exact)));
    }

    #[test]
    fn test_word_overlap_tier() {
        // search words inside item words
        assert_eq!(tier_of("red pepper", &["Bell Pepper Red"]), Some((0, MatchTier::WordOverlap)));
        // item words inside search words
        assert_eq!(
            tier_of("fresh cucumber please", &["Tomato", "Cucumber"]),
            Some((1, MatchTier::WordOverlap))
        );
    }

    #[test]
    fn test_substring_tier() {
        assert_eq!(tier_of("cocacola", &["Egg", "Coca-Cola Can"]), Some((1, MatchTier::Substring)));
        assert_eq!(tier_of("pepper", &["Peppermint tea"]), Some((0, MatchTier::Substring)));
    }

    #[test]
    fn test_similarity_tier() {
        let outcome = explain_match("cucmber", &["Tomato", "Cucumber"]).unwrap();
        assert_eq!(outcome.index, 1);
        assert_eq!(outcome.tier, MatchTier::Similarity);
        assert!((outcome.similarity.unwrap() - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_prefers_higher_score() {
        // "Bandanna" is one insertion away, "Banaa" two deletions
        let outcome = explain_match("bananna", &["Bandanna", "Banaa"]).unwrap();
        assert_eq!(outcome.tier, MatchTier::Similarity);
        assert_eq!(outcome.index, 0);
    }

    #[test]
    fn test_similarity_ties_keep_first() {
        // Both candidates are one substitution away
        let outcome = explain_match("mango", &["mangu", "mangi"]).unwrap();
        assert_eq!(outcome.tier, MatchTier::Similarity);
        assert_eq!(outcome.index, 0);
    }

    #[test]
    fn test_long_threshold_boundary_accepted() {
        // 10 chars, 6 substitutions: similarity exactly 0.4
        let outcome = explain_match("abcdefghij", &["abcdzzzzzz"]).unwrap();
        assert_eq!(outcome.tier, MatchTier::Similarity);
        assert!((outcome.similarity.unwrap() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_long_threshold_below_rejected() {
        // 10 chars, 7 substitutions: similarity 0.3
        assert!(explain_match("abcdefghij", &["abczzzzzzz"]).is_none());
    }

    #[test]
    fn test_short_threshold() {
        // 6 chars, 3 substitutions: 0.5 passes the short threshold
        assert_eq!(tier_of("abcdef", &["abczzz"]), Some((0, MatchTier::Similarity)));
        // 6 chars, 4 substitutions: 0.33 fails
        assert!(tier_of("abcdef", &["abzzzz"]).is_none());
    }

    #[test]
    fn test_custom_threshold_options() {
        let options = MatchOptions {
            short_threshold: 0.9,
            ..MatchOptions::default()
        };
        let matcher = CatalogMatcher::new(TextNormalizer::default(), options).unwrap();
        assert!(matcher.find("abcdef", &["abcdez"]).is_none());
        assert!(fuzzy_match("abcdef", &["abcdez"]).is_some());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = MatchOptions {
            long_threshold: 1.5,
            ..MatchOptions::default()
        };
        assert!(matches!(
            CatalogMatcher::new(TextNormalizer::default(), options),
            Err(MatchError::InvalidOption(_))
        ));

        let options = MatchOptions {
            long_name_len: 0,
            ..MatchOptions::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog: Vec<crate::CatalogItem> = Vec::new();
        assert!(fuzzy_match("xyz123notfound", &catalog).is_none());
    }

    #[test]
    fn test_empty_search_overlaps_first_item() {
        // No search words, so every item passes the word-overlap check
        assert_eq!(tier_of("", &["Coke"]), Some((0, MatchTier::WordOverlap)));
        assert_eq!(tier_of("!!!", &["Coke"]), Some((0, MatchTier::WordOverlap)));
        // Both sides normalize to "" and compare equal
        assert_eq!(tier_of("the big bag", &["Coke", "Big Bag"]), Some((1, MatchTier::Exact)));
    }

    #[test]
    fn test_noise_only_items_overlap_any_search() {
        assert_eq!(tier_of("coke", &["Big Bag", "Coke"]), Some((1, MatchTier::Exact)));
        assert_eq!(tier_of("zzzz", &["Big Bag"]), Some((0, MatchTier::WordOverlap)));
        assert_eq!(
            tier_of("cucmber", &["Big Bag", "Cucumber"]),
            Some((0, MatchTier::WordOverlap))
        );
    }

    #[test]
    fn test_fallback_tier_rules() {
        let options = MatchOptions::default();
        let matcher = CatalogMatcher::default();
        let query = PreparedName::new("cola".to_string());
        let names = vec![PreparedName::new("coca cola".to_string())];
        assert_eq!(
            matcher.tier_fallback(&query, &names),
            Some((0, MatchTier::Fallback, None))
        );

        let short = PreparedName::new("col".to_string());
        assert!(short.normalized.chars().count() <= options.fallback_min_len);
        assert_eq!(matcher.tier_fallback(&short, &names), None);
    }

    #[test]
    fn test_no_match() {
        assert!(fuzzy_match("xyz123notfound", &["Coke", "Egg"]).is_none());
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(MatchTier::WordOverlap.to_string(), "word-overlap");
        assert_eq!(
            serde_json::to_string(&MatchTier::WordOverlap).unwrap(),
            "\"word-overlap\""
        );
    }
}
