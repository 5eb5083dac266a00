//! Suggestion Sources
//!
//! Independent generators contributing autocomplete candidates: slash
//! commands, recent searches, trending queries, instant prefix matches over
//! the creator index, taxonomy categories, entity-driven smart filters, and
//! asynchronous predictive completions. Each source is a standalone function
//! so it can be tested on its own before the aggregator merges anything.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::analysis::extract_entities;
use crate::core::query::FilterPatch;
use crate::error::{Result, SearchError};

// ============================================================================
// Constants - Source Scores
// ============================================================================

/// Typo corrections always surface first.
pub const SCORE_CORRECTION: f32 = 110.0;
pub const SCORE_COMMAND: f32 = 100.0;
pub const SCORE_INSTANT: f32 = 95.0;
pub const SCORE_RECENT: f32 = 90.0;
pub const SCORE_TRENDING: f32 = 85.0;
pub const SCORE_TAXONOMY: f32 = 75.0;
pub const SCORE_SMART_FILTER: f32 = 70.0;
pub const SCORE_PREDICTIVE: f32 = 65.0;
pub const SCORE_SYNONYM: f32 = 50.0;

/// Per-source result caps.
const MAX_RECENT: usize = 5;
const MAX_TRENDING: usize = 5;
const MAX_INSTANT: usize = 6;
const MAX_TAXONOMY: usize = 4;

/// Predictive completions only run once the input has some signal.
pub const MIN_PREDICTIVE_LENGTH: usize = 2;

/// Commands offered on the browse surface.
const COMMANDS: &[(&str, &str)] = &[
    ("/help", "Show search tips"),
    ("/trending", "What everyone is booking"),
    ("/categories", "Browse all categories"),
    ("/random", "Surprise me with a creator"),
    ("/clear", "Clear recent searches"),
];

// ============================================================================
// Types
// ============================================================================

/// Which generator produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Command,
    Recent,
    Trending,
    Instant,
    Taxonomy,
    SmartFilter,
    Predictive,
    Correction,
    Synonym,
}

/// Source-specific payload, tagged per source kind instead of an open
/// metadata map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SuggestionMeta {
    Command { description: String },
    Recent { position: usize },
    Trending { rank: usize },
    Instant { name: String },
    Taxonomy { category: String },
    SmartFilter { patch: FilterPatch },
    Predictive,
    Correction { original: String, confidence: f32 },
    Synonym { term: String, replacement: String },
}

/// One autocomplete candidate. Created fresh per keystroke batch, never
/// mutated, superseded entirely by the next batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub text: String,
    pub source: SuggestionSource,
    pub score: f32,
    pub meta: SuggestionMeta,
}

impl Suggestion {
    fn new(
        id_prefix: &str,
        text: impl Into<String>,
        source: SuggestionSource,
        score: f32,
        meta: SuggestionMeta,
    ) -> Self {
        let text = text.into();
        Self {
            id: format!("{id_prefix}:{}", slug(&text)),
            text,
            source,
            score,
            meta,
        }
    }
}

fn slug(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

/// Read-only context tables supplied by external collaborators (history
/// store, analytics store, creator index).
#[derive(Debug, Clone, Default)]
pub struct SuggestionContext {
    pub recent_searches: Vec<String>,
    pub trending: Vec<String>,
    pub indexed_names: Vec<String>,
    pub taxonomy: Vec<String>,
}

// ============================================================================
// Sources
// ============================================================================

/// Slash commands matching the typed prefix. Only runs when the input
/// starts with `/`.
pub fn command_suggestions(input: &str) -> Vec<Suggestion> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Vec::new();
    }
    let prefix = trimmed.to_lowercase();
    COMMANDS
        .iter()
        .filter(|(name, _)| name.starts_with(&prefix))
        .map(|(name, description)| {
            Suggestion::new(
                "command",
                *name,
                SuggestionSource::Command,
                SCORE_COMMAND,
                SuggestionMeta::Command {
                    description: (*description).to_string(),
                },
            )
        })
        .collect()
}

/// Most recent searches, newest first. Empty-focus only.
pub fn recent_suggestions(context: &SuggestionContext) -> Vec<Suggestion> {
    context
        .recent_searches
        .iter()
        .take(MAX_RECENT)
        .enumerate()
        .map(|(position, text)| {
            Suggestion::new(
                "recent",
                text.clone(),
                SuggestionSource::Recent,
                SCORE_RECENT,
                SuggestionMeta::Recent { position },
            )
        })
        .collect()
}

/// Trending queries from the analytics snapshot. Empty-focus only.
pub fn trending_suggestions(context: &SuggestionContext) -> Vec<Suggestion> {
    context
        .trending
        .iter()
        .take(MAX_TRENDING)
        .enumerate()
        .map(|(rank, text)| {
            Suggestion::new(
                "trending",
                text.clone(),
                SuggestionSource::Trending,
                SCORE_TRENDING,
                SuggestionMeta::Trending { rank },
            )
        })
        .collect()
}

/// Case-insensitive prefix matches over the indexed creator names.
pub fn instant_suggestions(input: &str, context: &SuggestionContext) -> Vec<Suggestion> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    context
        .indexed_names
        .iter()
        .filter(|name| name.to_lowercase().starts_with(&needle))
        .take(MAX_INSTANT)
        .map(|name| {
            Suggestion::new(
                "instant",
                name.clone(),
                SuggestionSource::Instant,
                SCORE_INSTANT,
                SuggestionMeta::Instant { name: name.clone() },
            )
        })
        .collect()
}

/// Taxonomy categories containing the typed text.
pub fn taxonomy_suggestions(input: &str, context: &SuggestionContext) -> Vec<Suggestion> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    context
        .taxonomy
        .iter()
        .filter(|category| category.to_lowercase().contains(&needle))
        .take(MAX_TAXONOMY)
        .map(|category| {
            Suggestion::new(
                "taxonomy",
                format!("Browse {category}"),
                SuggestionSource::Taxonomy,
                SCORE_TAXONOMY,
                SuggestionMeta::Taxonomy {
                    category: category.clone(),
                },
            )
        })
        .collect()
}

/// Smart-filter suggestion: when the typed text carries enough entity
/// signal (a category plus at least one more field), offer to apply the
/// implied filters directly.
pub fn smart_filter_suggestions(input: &str) -> Vec<Suggestion> {
    let cleaned = input.trim().to_lowercase();
    if cleaned.is_empty() {
        return Vec::new();
    }
    let entities = extract_entities(&cleaned);
    let Some(categories) = entities.categories.clone() else {
        return Vec::new();
    };
    if entities.detected_field_count() < 2 {
        return Vec::new();
    }

    let mut label = categories.join(", ");
    if let Some((_, max)) = entities.price_range {
        label.push_str(&format!(" under ${max}"));
    }
    if let Some(locations) = &entities.locations {
        label.push_str(&format!(" in {}", locations.join(", ")));
    }

    vec![Suggestion::new(
        "smart-filter",
        format!("Filter: {label}"),
        SuggestionSource::SmartFilter,
        SCORE_SMART_FILTER,
        SuggestionMeta::SmartFilter {
            patch: entities.to_filter_patch(),
        },
    )]
}

// ============================================================================
// Predictive completions
// ============================================================================

/// External completion capability. The real implementation awaits a remote
/// predictor; tests substitute a synchronous stub.
#[async_trait]
pub trait PredictiveProvider: Send + Sync {
    async fn complete(&self, input: &str) -> Result<Vec<String>>;
}

/// Canned completion templates appended to the typed input.
const PREDICTIVE_TEMPLATES: &[&str] = &["for a birthday", "near me", "under $100"];

/// Stub provider emulating a latency-bound external predictor: completes
/// the input against canned templates after a configurable delay.
pub struct SimulatedPredictiveProvider {
    delay: std::time::Duration,
}

impl SimulatedPredictiveProvider {
    pub fn new(delay: std::time::Duration) -> Self {
        Self { delay }
    }

    /// Instant variant for tests.
    pub fn instant() -> Self {
        Self::new(std::time::Duration::ZERO)
    }
}

#[async_trait]
impl PredictiveProvider for SimulatedPredictiveProvider {
    async fn complete(&self, input: &str) -> Result<Vec<String>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let input = input.trim();
        if input.is_empty() {
            return Err(SearchError::Predictive("empty input".to_string()));
        }
        Ok(PREDICTIVE_TEMPLATES
            .iter()
            .map(|template| format!("{input} {template}"))
            .collect())
    }
}

/// Predictive completions for sufficiently long input. Provider failures
/// are caught here: the rest of the batch must not be aborted by the one
/// asynchronous source.
pub async fn predictive_suggestions(
    input: &str,
    provider: &dyn PredictiveProvider,
) -> Vec<Suggestion> {
    let trimmed = input.trim();
    if trimmed.chars().count() < MIN_PREDICTIVE_LENGTH {
        return Vec::new();
    }
    match provider.complete(trimmed).await {
        Ok(completions) => completions
            .into_iter()
            .map(|text| {
                Suggestion::new(
                    "predictive",
                    text,
                    SuggestionSource::Predictive,
                    SCORE_PREDICTIVE,
                    SuggestionMeta::Predictive,
                )
            })
            .collect(),
        Err(e) => {
            log::warn!("Predictive provider failed, continuing without it: {e}");
            Vec::new()
        }
    }
}
