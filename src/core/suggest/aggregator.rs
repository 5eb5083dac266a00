//! Suggestion Aggregation
//!
//! Merges candidates from every source into one ranked, deduplicated batch.
//! Sources run in a fixed invocation order; the final ordering is by
//! descending score with a stable sort, so equal scores keep their
//! generation order. A typo correction, when present, is prepended at the
//! top score so it always surfaces first.

use std::collections::HashSet;

use super::sources::{
    command_suggestions, instant_suggestions, predictive_suggestions, recent_suggestions,
    smart_filter_suggestions, taxonomy_suggestions, trending_suggestions, PredictiveProvider,
    Suggestion, SuggestionContext, SuggestionMeta, SuggestionSource, SCORE_CORRECTION,
    SCORE_SYNONYM,
};
use super::synonyms::SynonymMap;
use super::typo::TypoCorrector;

// ============================================================================
// Constants
// ============================================================================

/// Hard cap on generated suggestions per batch.
pub const MAX_SUGGESTIONS: usize = 20;

/// How many of those the UI actually displays.
pub const MAX_DISPLAYED: usize = 8;

// ============================================================================
// Aggregator
// ============================================================================

/// Multi-source suggestion generator.
pub struct SuggestionAggregator {
    typo_corrector: TypoCorrector,
    synonyms: SynonymMap,
    synonyms_enabled: bool,
}

impl Default for SuggestionAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionAggregator {
    /// Aggregator with the built-in dictionary and synonym tables.
    pub fn new() -> Self {
        Self::with_components(TypoCorrector::new(), SynonymMap::marketplace_defaults())
    }

    /// Aggregator with explicit components.
    pub fn with_components(typo_corrector: TypoCorrector, synonyms: SynonymMap) -> Self {
        Self {
            typo_corrector,
            synonyms,
            synonyms_enabled: true,
        }
    }

    /// Aggregator tuned from configuration.
    pub fn from_config(config: &crate::config::SearchConfig) -> Self {
        let mut synonyms = SynonymMap::marketplace_defaults();
        synonyms.set_max_expansions(config.synonyms.max_expansions);
        Self {
            typo_corrector: TypoCorrector::from_config(&config.typo),
            synonyms,
            synonyms_enabled: config.synonyms.enabled,
        }
    }

    /// Generate a ranked suggestion batch.
    ///
    /// Source invocation order: commands → recent + trending (empty focus
    /// only) → instant prefix matches → taxonomy → smart filter →
    /// predictive (additive; failures or absence reduce the list, never
    /// abort it). The typo
    /// correction is prepended afterward, synonym expansions appended, then
    /// the batch is stable-sorted by descending score, deduplicated by id,
    /// and capped at [`MAX_SUGGESTIONS`].
    pub async fn generate(
        &self,
        input: &str,
        is_empty_focus: bool,
        context: &SuggestionContext,
        predictive: Option<&dyn PredictiveProvider>,
    ) -> Vec<Suggestion> {
        let trimmed = input.trim();
        let mut batch: Vec<Suggestion> = Vec::new();

        if trimmed.starts_with('/') {
            batch.extend(command_suggestions(trimmed));
        }

        if is_empty_focus && trimmed.is_empty() {
            batch.extend(recent_suggestions(context));
            batch.extend(trending_suggestions(context));
        }

        if !trimmed.is_empty() && !trimmed.starts_with('/') {
            batch.extend(instant_suggestions(trimmed, context));
            batch.extend(taxonomy_suggestions(trimmed, context));
            batch.extend(smart_filter_suggestions(trimmed));
            if let Some(provider) = predictive {
                batch.extend(predictive_suggestions(trimmed, provider).await);
            }
        }

        // Correction first, synonym expansions last
        if let Some(correction) = self.typo_corrector.correct(trimmed) {
            batch.insert(0, correction_suggestion(&correction));
        }
        if self.synonyms_enabled {
            batch.extend(self.synonym_suggestions(trimmed));
        }

        rank(batch)
    }

    /// Synonym-expansion suggestions: each known term in the input spawns
    /// variants with the term replaced.
    fn synonym_suggestions(&self, input: &str) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();
        for term in input.split_whitespace() {
            for replacement in self.synonyms.expand_term(term) {
                let text = input.replace(term, &replacement);
                suggestions.push(Suggestion {
                    id: format!("synonym:{term}:{replacement}"),
                    text,
                    source: SuggestionSource::Synonym,
                    score: SCORE_SYNONYM,
                    meta: SuggestionMeta::Synonym {
                        term: term.to_string(),
                        replacement,
                    },
                });
            }
        }
        suggestions
    }
}

fn correction_suggestion(correction: &super::typo::TypoCorrection) -> Suggestion {
    Suggestion {
        id: format!("correction:{}", correction.corrected),
        text: correction.corrected.clone(),
        source: SuggestionSource::Correction,
        score: SCORE_CORRECTION,
        meta: SuggestionMeta::Correction {
            original: correction.original.clone(),
            confidence: correction.confidence,
        },
    }
}

/// Stable sort by descending score, dedup by id keeping the best-ranked
/// occurrence, cap the batch.
fn rank(mut batch: Vec<Suggestion>) -> Vec<Suggestion> {
    batch.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut seen: HashSet<String> = HashSet::new();
    batch.retain(|s| seen.insert(s.id.clone()));
    batch.truncate(MAX_SUGGESTIONS);
    batch
}
