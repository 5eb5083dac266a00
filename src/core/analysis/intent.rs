//! Intent Level Classification
//!
//! Estimates urgency/commitment independent of the search pattern. Four
//! ordered marker groups evaluated first-match-wins; queries matching no
//! marker fall back to a static pattern-to-intent mapping.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::pattern::SearchPattern;

/// Urgency/commitment estimate, independent of pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLevel {
    High,
    Medium,
    Low,
    Discovery,
}

/// One marker group: an intent label plus the regexes that select it.
pub struct IntentMarker {
    pub intent: IntentLevel,
    pub regexes: Vec<Regex>,
}

fn marker(intent: IntentLevel, sources: &[&str]) -> IntentMarker {
    IntentMarker {
        intent,
        regexes: sources
            .iter()
            .map(|s| Regex::new(s).expect("intent marker regex"))
            .collect(),
    }
}

/// Ordered marker table: high, discovery, medium, low.
pub static INTENT_MARKERS: Lazy<Vec<IntentMarker>> = Lazy::new(|| {
    vec![
        marker(
            IntentLevel::High,
            &[r"\b(?:asap|urgent(?:ly)?|immediately|right now|today|tonight|need)\b"],
        ),
        marker(
            IntentLevel::Discovery,
            &[r"\b(?:browse|discover|explore|just looking|show me|inspiration|ideas)\b"],
        ),
        marker(
            IntentLevel::Medium,
            &[r"\b(?:looking for|want|would like|hire|for my|planning)\b"],
        ),
        marker(
            IntentLevel::Low,
            &[r"^(?:how|what|why|when|where)\b", r"\b(?:info|information|learn about)\b"],
        ),
    ]
});

/// Fallback when no marker matches: pattern implies intent.
fn intent_for_pattern(pattern: SearchPattern) -> IntentLevel {
    match pattern {
        SearchPattern::KnownItem => IntentLevel::High,
        SearchPattern::Transactional => IntentLevel::High,
        SearchPattern::Navigational => IntentLevel::Medium,
        SearchPattern::Descriptive => IntentLevel::Medium,
        SearchPattern::Exploratory => IntentLevel::Discovery,
        SearchPattern::Informational => IntentLevel::Low,
    }
}

/// Classify intent from cleaned text, with the pattern as fallback signal.
pub fn classify_intent(cleaned: &str, pattern: SearchPattern) -> IntentLevel {
    for marker in INTENT_MARKERS.iter() {
        if marker.regexes.iter().any(|r| r.is_match(cleaned)) {
            return marker.intent;
        }
    }
    intent_for_pattern(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("need a dj tonight", IntentLevel::High)]
    #[case("urgent birthday shoutout", IntentLevel::High)]
    #[case("just looking around", IntentLevel::Discovery)]
    #[case("looking for a kompa band", IntentLevel::Medium)]
    #[case("what is a video shoutout", IntentLevel::Low)]
    fn test_marker_groups(#[case] text: &str, #[case] expected: IntentLevel) {
        assert_eq!(classify_intent(text, SearchPattern::Exploratory), expected);
    }

    #[test]
    fn test_high_outranks_later_groups() {
        // "today" (high) and "browse" (discovery) both present; the high
        // group is checked first
        assert_eq!(
            classify_intent("browse djs for today", SearchPattern::Exploratory),
            IntentLevel::High
        );
    }

    #[rstest]
    #[case(SearchPattern::KnownItem, IntentLevel::High)]
    #[case(SearchPattern::Transactional, IntentLevel::High)]
    #[case(SearchPattern::Navigational, IntentLevel::Medium)]
    #[case(SearchPattern::Descriptive, IntentLevel::Medium)]
    #[case(SearchPattern::Exploratory, IntentLevel::Discovery)]
    #[case(SearchPattern::Informational, IntentLevel::Low)]
    fn test_pattern_fallback(#[case] pattern: SearchPattern, #[case] expected: IntentLevel) {
        assert_eq!(classify_intent("wyclef jean", pattern), expected);
    }
}
