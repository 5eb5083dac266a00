//! Entity Extraction
//!
//! Scans cleaned lowercase text for domain entities: creator categories,
//! price ranges, urgency markers, dates, locations, languages, and
//! qualifiers. Each entity type is an independent global regex scan with no
//! session state; extraction order is irrelevant.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::query::FilterPatch;

// ============================================================================
// Types
// ============================================================================

/// Entities detected in a query. A field is `None` when nothing matched;
/// a present field always holds at least one entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEntities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// `[min, max]` in dollars. A single detected amount is treated as an
    /// upper bound: "under $100" and "$100" both yield `[0, 100]`. The
    /// extractor does not distinguish "no lower bound" from "lower bound
    /// zero"; callers needing that distinction use the operator-level
    /// [`crate::core::query::PriceBound`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifiers: Option<Vec<String>>,
}

impl ExtractedEntities {
    /// Number of detected entity fields, used by confidence scoring.
    pub fn detected_field_count(&self) -> usize {
        [
            self.categories.is_some(),
            self.price_range.is_some(),
            self.urgency.is_some(),
            self.dates.is_some(),
            self.locations.is_some(),
            self.languages.is_some(),
            self.qualifiers.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.detected_field_count() == 0
    }

    /// Derive the marketplace filter fields these entities imply.
    pub fn to_filter_patch(&self) -> FilterPatch {
        FilterPatch {
            categories: self.categories.clone().unwrap_or_default(),
            price_min: self.price_range.map(|(min, _)| min),
            price_max: self.price_range.map(|(_, max)| max),
            languages: self.languages.clone().unwrap_or_default(),
            verified_only: self
                .qualifiers
                .as_ref()
                .is_some_and(|q| q.iter().any(|s| s == "verified")),
            ..FilterPatch::default()
        }
    }
}

// ============================================================================
// Pattern tables
// ============================================================================

/// Creator categories on the marketplace, matched with optional plural.
static CATEGORY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(musicians?|singers?|rappers?|bands?|djs?|comedians?|actors?|athletes?|dancers?|chefs?|artists?|painters?|influencers?|models?|magicians?|poets?|speakers?)\b",
    )
    .expect("category regex")
});

/// One combined price pattern capturing one or two numeric groups.
/// Two groups → explicit range; one group → `[0, value]`.
static PRICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\$?(\d+(?:\.\d+)?)\s*(?:-|to)\s*\$(\d+(?:\.\d+)?)",
        r"|(?:under|below|less than|up to|cheaper than)\s+\$?(\d+(?:\.\d+)?)",
        r"|\$(\d+(?:\.\d+)?)",
    ))
    .expect("price regex")
});

static URGENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(asap|urgent(?:ly)?|immediately|right now|today|tonight|this week)\b")
        .expect("urgency regex")
});

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(today|tonight|tomorrow|this weekend|next week|monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    )
    .expect("date regex")
});

static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(haiti|port-au-prince|cap-haitien|jacmel|miami|new york|brooklyn|boston|montreal|paris|atlanta|orlando)\b",
    )
    .expect("location regex")
});

static LANGUAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(english|french|creole|kreyol|spanish|anglais|francais|espanol)\b")
        .expect("language regex")
});

static QUALIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(verified|popular|famous|top|best|cheap|affordable|premium|new|trending|local|available)\b",
    )
    .expect("qualifier regex")
});

// ============================================================================
// Extraction
// ============================================================================

/// Extract all entities from cleaned lowercase text.
pub fn extract_entities(cleaned: &str) -> ExtractedEntities {
    ExtractedEntities {
        categories: scan_categories(cleaned),
        price_range: scan_price(cleaned),
        urgency: scan(&URGENCY, cleaned),
        dates: scan(&DATE, cleaned),
        locations: scan(&LOCATION, cleaned),
        languages: scan(&LANGUAGE, cleaned),
        qualifiers: scan(&QUALIFIER, cleaned),
    }
}

/// Global scan producing a deduplicated set, `None` when nothing matched.
fn scan(pattern: &Regex, text: &str) -> Option<Vec<String>> {
    let mut found: Vec<String> = Vec::new();
    for m in pattern.find_iter(text) {
        let value = m.as_str().to_string();
        if !found.contains(&value) {
            found.push(value);
        }
    }
    if found.is_empty() {
        None
    } else {
        Some(found)
    }
}

/// Categories are singularized by stripping a trailing `s` so that
/// "musicians" and "musician" land on the same filter value.
fn scan_categories(text: &str) -> Option<Vec<String>> {
    let mut found: Vec<String> = Vec::new();
    for m in CATEGORY.find_iter(text) {
        let singular = m.as_str().strip_suffix('s').unwrap_or(m.as_str()).to_string();
        if !found.contains(&singular) {
            found.push(singular);
        }
    }
    if found.is_empty() {
        None
    } else {
        Some(found)
    }
}

/// Collect captured numeric groups from the first price match, in group
/// order. Two numbers form an explicit `[min, max]`; one number is an upper
/// bound `[0, value]` by design.
fn scan_price(text: &str) -> Option<(f64, f64)> {
    let caps = PRICE.captures(text)?;
    let amounts: Vec<f64> = (1..caps.len())
        .filter_map(|i| caps.get(i))
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    match amounts.as_slice() {
        [min, max, ..] => Some((*min, *max)),
        [value] => Some((0.0, *value)),
        [] => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_singularized() {
        let entities = extract_entities("musicians under $100");
        assert_eq!(entities.categories, Some(vec!["musician".to_string()]));
    }

    #[test]
    fn test_category_dedup_across_forms() {
        let entities = extract_entities("musician and musicians");
        assert_eq!(entities.categories, Some(vec!["musician".to_string()]));
    }

    #[test]
    fn test_single_amount_is_upper_bound() {
        let entities = extract_entities("musicians under $100");
        assert_eq!(entities.price_range, Some((0.0, 100.0)));
    }

    #[test]
    fn test_bare_dollar_amount_is_upper_bound() {
        let entities = extract_entities("comedian $50");
        assert_eq!(entities.price_range, Some((0.0, 50.0)));
    }

    #[test]
    fn test_explicit_range() {
        let entities = extract_entities("singers $50 to $150");
        assert_eq!(entities.price_range, Some((50.0, 150.0)));
    }

    #[test]
    fn test_dash_range() {
        let entities = extract_entities("djs 25-$75");
        assert_eq!(entities.price_range, Some((25.0, 75.0)));
    }

    #[test]
    fn test_urgency_and_dates_overlap_is_fine() {
        let entities = extract_entities("comedian today");
        assert_eq!(entities.urgency, Some(vec!["today".to_string()]));
        assert_eq!(entities.dates, Some(vec!["today".to_string()]));
    }

    #[test]
    fn test_locations_and_languages() {
        let entities = extract_entities("kreyol speaking comedian in miami");
        assert_eq!(entities.languages, Some(vec!["kreyol".to_string()]));
        assert_eq!(entities.locations, Some(vec!["miami".to_string()]));
    }

    #[test]
    fn test_qualifiers() {
        let entities = extract_entities("best affordable verified singers");
        assert_eq!(
            entities.qualifiers,
            Some(vec![
                "best".to_string(),
                "affordable".to_string(),
                "verified".to_string()
            ])
        );
    }

    #[test]
    fn test_no_entities() {
        let entities = extract_entities("hello there");
        assert!(entities.is_empty());
        assert_eq!(entities.detected_field_count(), 0);
    }

    #[test]
    fn test_field_count() {
        let entities = extract_entities("verified musicians under $100 in miami");
        // categories, price, locations, qualifiers
        assert_eq!(entities.detected_field_count(), 4);
    }
}
