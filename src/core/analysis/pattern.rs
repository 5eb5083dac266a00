//! Search Pattern Classification
//!
//! Assigns one coarse search-pattern label per query via an ordered rule
//! table: six groups of regexes evaluated first-match-wins, with group order
//! as the tie-break priority. Rules are data, not control flow, so each
//! group is testable on its own. Queries matching no rule fall back to
//! token-count heuristics.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Coarse classification of search intent shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPattern {
    /// The querier knows the specific creator they want ("Wyclef Jean")
    KnownItem,
    /// Open-ended browsing ("show me comedians")
    Exploratory,
    /// Attribute-rich description of a wanted creator
    Descriptive,
    /// Heading for a place in the product, not a creator
    Navigational,
    /// Ready to book or buy
    Transactional,
    /// Question answering ("how does booking work")
    Informational,
}

/// One rule group: a pattern label plus the regexes that select it.
/// `on_original` rules run against the raw trimmed text so capitalization
/// survives; the rest run against the cleaned lowercase text.
pub struct PatternRule {
    pub pattern: SearchPattern,
    pub on_original: bool,
    pub regexes: Vec<Regex>,
}

fn rule(pattern: SearchPattern, on_original: bool, sources: &[&str]) -> PatternRule {
    PatternRule {
        pattern,
        on_original,
        regexes: sources
            .iter()
            .map(|s| Regex::new(s).expect("pattern rule regex"))
            .collect(),
    }
}

/// Ordered rule table. Group order is the priority: known_item is checked
/// first, informational last.
pub static PATTERN_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        rule(
            SearchPattern::KnownItem,
            true,
            &[
                // Two or more capitalized words and nothing else: a person name
                r"^[A-Z][a-z'’]+(?:\s+[A-Z][\w'’.-]+)+$",
                // Creator handle
                r"^@\w+$",
            ],
        ),
        rule(
            SearchPattern::Exploratory,
            false,
            &[
                r"^(?:find|browse|discover|explore|show me|any|some)\b",
                r"\b(?:recommend|recommendations|suggestions?|ideas)\b",
            ],
        ),
        rule(
            SearchPattern::Descriptive,
            false,
            &[
                r"\b(?:who can|that can|with|speaking|speaks)\b",
                r"\b(?:for my|for a|for our)\b",
            ],
        ),
        rule(
            SearchPattern::Navigational,
            false,
            &[
                r"^(?:home|settings|profile|favorites|bookings|cart|help center)$",
                r"^my\s+(?:bookings|orders|favorites|account|requests)$",
            ],
        ),
        rule(
            SearchPattern::Transactional,
            false,
            &[r"\b(?:book|hire|buy|order|purchase|checkout|pay|request a)\b"],
        ),
        rule(
            SearchPattern::Informational,
            false,
            &[r"^(?:how|what|why|when|where|who|can i|do you)\b", r"\?\s*$"],
        ),
    ]
});

/// Classify a query. `original` is trimmed raw text, `cleaned` is the
/// lowercase normalized form, `tokens` are the cleaned words.
pub fn classify_pattern(original: &str, cleaned: &str, tokens: &[String]) -> SearchPattern {
    for rule in PATTERN_RULES.iter() {
        let text = if rule.on_original { original } else { cleaned };
        if rule.regexes.iter().any(|r| r.is_match(text)) {
            return rule.pattern;
        }
    }
    fallback_pattern(original, tokens)
}

/// Token-count heuristics for queries no rule matched.
fn fallback_pattern(original: &str, tokens: &[String]) -> SearchPattern {
    let original_words: Vec<&str> = original.split_whitespace().collect();
    let capitalized = original_words
        .iter()
        .filter(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
        .count();

    match tokens.len() {
        1 => SearchPattern::Exploratory,
        2 if capitalized == 2 => SearchPattern::KnownItem,
        n if n > 4 => SearchPattern::Descriptive,
        _ => SearchPattern::Exploratory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> SearchPattern {
        let cleaned = text.trim().to_lowercase();
        let tokens: Vec<String> = cleaned.split_whitespace().map(String::from).collect();
        classify_pattern(text.trim(), &cleaned, &tokens)
    }

    #[test]
    fn test_person_name_is_known_item() {
        assert_eq!(classify("Wyclef Jean"), SearchPattern::KnownItem);
        assert_eq!(classify("Michael Brun"), SearchPattern::KnownItem);
    }

    #[test]
    fn test_handle_is_known_item() {
        assert_eq!(classify("@wyclef"), SearchPattern::KnownItem);
    }

    #[test]
    fn test_browse_verbs_are_exploratory() {
        assert_eq!(classify("show me comedians"), SearchPattern::Exploratory);
        assert_eq!(classify("browse musicians"), SearchPattern::Exploratory);
    }

    #[test]
    fn test_attribute_description_is_descriptive() {
        assert_eq!(
            classify("singer who can do kreyol ballads"),
            SearchPattern::Descriptive
        );
        assert_eq!(
            classify("comedian for my office party"),
            SearchPattern::Descriptive
        );
    }

    #[test]
    fn test_navigation_targets() {
        assert_eq!(classify("my bookings"), SearchPattern::Navigational);
        assert_eq!(classify("settings"), SearchPattern::Navigational);
    }

    #[test]
    fn test_booking_verbs_are_transactional() {
        assert_eq!(classify("book a dj"), SearchPattern::Transactional);
        assert_eq!(classify("hire wedding singer"), SearchPattern::Transactional);
    }

    #[test]
    fn test_questions_are_informational() {
        assert_eq!(classify("how does booking work"), SearchPattern::Informational);
        assert_eq!(classify("refund policy?"), SearchPattern::Informational);
    }

    #[test]
    fn test_group_order_breaks_ties() {
        // "discover" (exploratory) appears with "book" (transactional):
        // exploratory is the earlier group, so it wins
        assert_eq!(classify("discover and book djs"), SearchPattern::Exploratory);
    }

    #[test]
    fn test_fallback_single_token() {
        assert_eq!(classify("zouk"), SearchPattern::Exploratory);
    }

    #[test]
    fn test_fallback_long_query_is_descriptive() {
        assert_eq!(
            classify("energetic kompa band playing weddings near miami"),
            SearchPattern::Descriptive
        );
    }

    #[test]
    fn test_deterministic() {
        let a = classify("verified musicians under $100");
        let b = classify("verified musicians under $100");
        assert_eq!(a, b);
    }
}
