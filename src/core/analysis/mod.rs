//! Query Analysis
//!
//! Orchestrates the full understanding flow for a raw query:
//! 1. Normalize input (trim, collapse whitespace, lowercase)
//! 2. Extract entities, detect language
//! 3. Classify pattern and intent, score confidence
//! 4. Select a response strategy and derive a filter patch
//!
//! Every function here is total over the string domain: malformed, empty, or
//! unintelligible input yields a low-confidence default classification, never
//! an error.

pub mod entities;
pub mod intent;
pub mod language;
pub mod pattern;
pub mod strategy;

use serde::{Deserialize, Serialize};

use crate::core::query::FilterPatch;
pub use entities::{extract_entities, ExtractedEntities};
pub use intent::{classify_intent, IntentLevel};
pub use language::{detect_language, LanguageDetection, LanguageLabel};
pub use pattern::{classify_pattern, SearchPattern};
pub use strategy::{
    select_strategy, ComponentName, ComponentParams, ResponseStrategy, StrategyComponent,
    StrategyPriority, StrategyType,
};

// ============================================================================
// Confidence scoring
// ============================================================================

/// Base confidence before pattern floors and adjustments.
const CONFIDENCE_BASE: f32 = 0.5;

/// Per-pattern confidence floors.
const CONFIDENCE_FLOORS: &[(SearchPattern, f32)] = &[
    (SearchPattern::KnownItem, 0.9),
    (SearchPattern::Transactional, 0.8),
    (SearchPattern::Navigational, 0.95),
    (SearchPattern::Descriptive, 0.7),
    (SearchPattern::Exploratory, 0.6),
    (SearchPattern::Informational, 0.7),
];

/// Clamp bounds for the final score.
const CONFIDENCE_MIN: f32 = 0.1;
const CONFIDENCE_MAX: f32 = 0.95;

/// Score classification confidence: base 0.5 raised to the pattern floor,
/// +0.1 per detected entity field, -0.2 for single-token queries, +0.1 for
/// queries longer than five tokens, clamped to [0.1, 0.95].
pub fn score_confidence(
    pattern: SearchPattern,
    entities: &ExtractedEntities,
    token_count: usize,
) -> f32 {
    let floor = CONFIDENCE_FLOORS
        .iter()
        .find(|(p, _)| *p == pattern)
        .map(|(_, f)| *f)
        .unwrap_or(CONFIDENCE_BASE);

    let mut score = CONFIDENCE_BASE.max(floor);
    score += entities.detected_field_count() as f32 * 0.1;
    if token_count == 1 {
        score -= 0.2;
    }
    if token_count > 5 {
        score += 0.1;
    }
    score.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX)
}

// ============================================================================
// SearchQuery
// ============================================================================

/// Full classification result for one query. Immutable once built; consumed
/// by the response-rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub original: String,
    pub cleaned: String,
    pub tokens: Vec<String>,
    pub language: LanguageLabel,
    pub pattern: SearchPattern,
    pub intent: IntentLevel,
    /// Classification confidence in [0, 1]; 0 for empty input.
    pub confidence: f32,
    pub entities: ExtractedEntities,
    pub filter_patch: FilterPatch,
    pub strategy: ResponseStrategy,
}

/// Normalize: trim, collapse whitespace runs, lowercase.
fn clean(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Analyze a raw query into a [`SearchQuery`].
///
/// Empty or whitespace-only input yields the default classification:
/// exploratory pattern, discovery intent, confidence 0.
pub fn analyze_search(raw: &str) -> SearchQuery {
    let original = raw.trim().to_string();
    let cleaned = clean(raw);
    let tokens: Vec<String> = cleaned.split_whitespace().map(String::from).collect();

    if tokens.is_empty() {
        let entities = ExtractedEntities::default();
        let strategy = select_strategy(
            SearchPattern::Exploratory,
            IntentLevel::Discovery,
            &entities,
        );
        return SearchQuery {
            original,
            cleaned,
            tokens,
            language: LanguageLabel::Unknown,
            pattern: SearchPattern::Exploratory,
            intent: IntentLevel::Discovery,
            confidence: 0.0,
            entities,
            filter_patch: FilterPatch::default(),
            strategy,
        };
    }

    let entities = extract_entities(&cleaned);
    let detection = detect_language(&cleaned);
    let pattern = classify_pattern(&original, &cleaned, &tokens);
    let intent = classify_intent(&cleaned, pattern);
    let confidence = score_confidence(pattern, &entities, tokens.len());
    let strategy = select_strategy(pattern, intent, &entities);
    let filter_patch = entities.to_filter_patch();

    log::debug!(
        "Analyzed {:?}: pattern={pattern:?} intent={intent:?} language={:?} confidence={confidence:.2}",
        original,
        detection.label,
    );

    SearchQuery {
        original,
        cleaned,
        tokens,
        language: detection.label,
        pattern,
        intent,
        confidence,
        entities,
        filter_patch,
        strategy,
    }
}
