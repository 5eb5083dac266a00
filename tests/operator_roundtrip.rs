//! Round-trip property for the operator parser: re-serializing a parsed
//! query and parsing it again yields an operator-equivalent result.

use encore_search::core::query::parse_advanced_search;
use proptest::prelude::*;

/// Lowercase term safe for every operator position.
fn term() -> impl Strategy<Value = String> {
    "[a-z]{2,8}"
}

/// Phrase body without quotes.
fn phrase() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,2}"
}

prop_compose! {
    /// A syntactically well-formed operator query assembled from optional
    /// parts in every bucket.
    fn operator_query()(
        phrases in prop::collection::vec(phrase(), 0..2),
        includes in prop::collection::vec(term(), 0..3),
        excludes in prop::collection::vec(term(), 0..3),
        or_pair in prop::option::of((term(), term())),
        wildcards in prop::collection::vec(term(), 0..2),
        min_price in prop::option::of(1u32..500),
        max_price in prop::option::of(1u32..500),
        plain in prop::collection::vec(term(), 0..3),
    ) -> String {
        let mut parts: Vec<String> = Vec::new();
        for p in &phrases {
            parts.push(format!("\"{p}\""));
        }
        for t in &includes {
            parts.push(format!("+{t}"));
        }
        for t in &excludes {
            parts.push(format!("-{t}"));
        }
        if let Some((left, right)) = &or_pair {
            parts.push(format!("{left} OR {right}"));
        }
        for t in &wildcards {
            parts.push(format!("{t}*"));
        }
        if let Some(min) = min_price {
            parts.push(format!(">${min}"));
        }
        if let Some(max) = max_price {
            parts.push(format!("<${max}"));
        }
        parts.extend(plain.iter().cloned());
        parts.join(" ")
    }
}

proptest! {
    #[test]
    fn parse_serialize_parse_is_stable(input in operator_query()) {
        let first = parse_advanced_search(&input);
        let reparsed = parse_advanced_search(&first.to_query_string());
        prop_assert_eq!(first, reparsed);
    }

    #[test]
    fn parsing_never_panics_on_arbitrary_text(input in ".{0,80}") {
        let _ = parse_advanced_search(&input);
    }

    #[test]
    fn serialization_is_idempotent(input in operator_query()) {
        let parsed = parse_advanced_search(&input);
        let once = parsed.to_query_string();
        let twice = parse_advanced_search(&once).to_query_string();
        prop_assert_eq!(once, twice);
    }
}
