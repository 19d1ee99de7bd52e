//! Property tests for normalization, splitting and matching.

use proptest::prelude::*;
use quickorder_matcher::{
    fuzzy_match, levenshtein_distance, normalize, similarity, split_quantity_and_name, CatalogItem,
    UNITS,
};

/// Words without "s" so depluralization never creates a new vocabulary word.
fn name_words() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-rt-z]{1,8}", 1..5).prop_flat_map(|words| {
        let count = words.len();
        prop::collection::vec(prop::sample::select(vec![" ", "-", "  "]), count).prop_map(
            move |seps| {
                words
                    .iter()
                    .zip(seps)
                    .map(|(w, sep)| format!("{w}{sep}"))
                    .collect::<String>()
            },
        )
    })
}

fn item_name() -> impl Strategy<Value = String> {
    "[a-z]{3,10}".prop_filter("not a unit word", |name| !UNITS.contains(&name.as_str()))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(name in name_words()) {
        let once = normalize(&name);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_never_leaves_double_spaces(name in name_words()) {
        let normalized = normalize(&name);
        prop_assert!(!normalized.contains("  "));
        prop_assert_eq!(normalized.trim(), normalized.as_str());
    }

    #[test]
    fn levenshtein_identity_and_symmetry(a in "\\PC{0,12}", b in "\\PC{0,12}") {
        prop_assert_eq!(levenshtein_distance(&a, &a), 0);
        prop_assert_eq!(levenshtein_distance(&a, &b), levenshtein_distance(&b, &a));

        let longest = a.chars().count().max(b.chars().count());
        prop_assert!(levenshtein_distance(&a, &b) <= longest);
    }

    #[test]
    fn similarity_is_a_ratio(a in "[a-z ]{0,12}", b in "[a-z ]{0,12}") {
        match similarity(&a, &b) {
            Some(score) => prop_assert!((0.0..=1.0).contains(&score)),
            None => prop_assert!(a.is_empty() && b.is_empty()),
        }
    }

    #[test]
    fn normalized_twin_is_always_found(
        search in name_words(),
        decoys in prop::collection::vec("[a-z]{2,12}", 0..8),
    ) {
        prop_assume!(!normalize(&search).is_empty());

        let mut catalog: Vec<CatalogItem> = decoys
            .iter()
            .enumerate()
            .map(|(i, name)| CatalogItem::new(i.to_string(), name.clone()))
            .collect();
        catalog.push(CatalogItem::new("twin", search.to_uppercase()));

        let found = fuzzy_match(&search, &catalog);
        prop_assert!(found.is_some());
        prop_assert_eq!(normalize(&found.unwrap().name), normalize(&search));
    }

    #[test]
    fn empty_catalog_never_matches(search in "\\PC{0,20}") {
        let catalog: Vec<CatalogItem> = Vec::new();
        prop_assert!(fuzzy_match(&search, &catalog).is_none());
    }

    #[test]
    fn trailing_quantity_round_trips(name in item_name(), quantity in 1u32..100_000) {
        let parsed = split_quantity_and_name(&format!("{name} {quantity}"));
        prop_assert_eq!(parsed.name, name);
        prop_assert_eq!(parsed.quantity, quantity);
    }

    #[test]
    fn leading_quantity_with_unit_round_trips(name in item_name(), quantity in 1u32..100_000) {
        let parsed = split_quantity_and_name(&format!("{quantity}pcs {name}"));
        prop_assert_eq!(parsed.name, name);
        prop_assert_eq!(parsed.quantity, quantity);
    }

    #[test]
    fn bare_leading_quantity_leaves_empty_name(name in "[a-z]{1,10}", quantity in 0u32..100_000) {
        let parsed = split_quantity_and_name(&format!("{quantity} {name}"));
        prop_assert_eq!(parsed.name, "");
        prop_assert_eq!(parsed.quantity, quantity);
    }
}
