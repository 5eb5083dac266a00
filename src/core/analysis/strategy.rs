//! Response Strategy Selection
//!
//! Maps (pattern, intent, entities) to a weighted list of named response
//! components plus a priority tag. Pure table dispatch: identical inputs
//! always produce an identical strategy, so strategies are equality-testable.
//! Component weights are relative emphasis, not probabilities; they need not
//! sum to 1.

use serde::{Deserialize, Serialize};

use super::entities::ExtractedEntities;
use super::intent::IntentLevel;
use super::pattern::SearchPattern;

// ============================================================================
// Types
// ============================================================================

/// Overall shape of the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    DirectLookup,
    Exploration,
    FilteredBrowse,
    Navigation,
    Conversion,
    Answer,
}

/// How soon the response surface should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyPriority {
    Immediate,
    High,
    Normal,
    Relaxed,
}

/// Named presentation components the UI can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentName {
    DirectMatch,
    SimilarCreators,
    CategoryGrid,
    TrendingCarousel,
    FilterPanel,
    ResultList,
    PriceComparison,
    FaqPanel,
    NavShortcuts,
    BookingCta,
}

/// Per-component parameters, tagged by what each component needs. Using a
/// closed enum instead of an open metadata map keeps field names checked at
/// compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ComponentParams {
    None,
    Categories { names: Vec<String> },
    Price { min: f64, max: f64 },
}

/// One weighted component in a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComponent {
    pub name: ComponentName,
    /// Relative weight in [0, 1].
    pub weight: f32,
    pub params: ComponentParams,
}

/// A chosen response strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseStrategy {
    pub strategy: StrategyType,
    pub priority: StrategyPriority,
    pub components: Vec<StrategyComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Box<ResponseStrategy>>,
}

// ============================================================================
// Selection
// ============================================================================

fn component(name: ComponentName, weight: f32) -> StrategyComponent {
    StrategyComponent {
        name,
        weight,
        params: ComponentParams::None,
    }
}

fn category_params(entities: &ExtractedEntities) -> ComponentParams {
    match &entities.categories {
        Some(names) => ComponentParams::Categories {
            names: names.clone(),
        },
        None => ComponentParams::None,
    }
}

fn price_params(entities: &ExtractedEntities) -> ComponentParams {
    match entities.price_range {
        Some((min, max)) => ComponentParams::Price { min, max },
        None => ComponentParams::None,
    }
}

/// Priority for patterns that are not rendered immediately: scales with
/// intent level.
fn priority_for_intent(intent: IntentLevel) -> StrategyPriority {
    match intent {
        IntentLevel::High => StrategyPriority::High,
        IntentLevel::Medium | IntentLevel::Discovery => StrategyPriority::Normal,
        IntentLevel::Low => StrategyPriority::Relaxed,
    }
}

/// Select the response strategy for an analyzed query. Pure function of its
/// inputs; no randomness, no external state.
pub fn select_strategy(
    pattern: SearchPattern,
    intent: IntentLevel,
    entities: &ExtractedEntities,
) -> ResponseStrategy {
    match pattern {
        SearchPattern::KnownItem => ResponseStrategy {
            strategy: StrategyType::DirectLookup,
            priority: StrategyPriority::Immediate,
            components: vec![
                component(ComponentName::DirectMatch, 0.8),
                component(ComponentName::SimilarCreators, 0.2),
            ],
            // When the direct lookup comes up empty, widen to a result list
            fallback: Some(Box::new(ResponseStrategy {
                strategy: StrategyType::Exploration,
                priority: priority_for_intent(intent),
                components: vec![
                    component(ComponentName::ResultList, 0.6),
                    component(ComponentName::SimilarCreators, 0.4),
                ],
                fallback: None,
            })),
        },
        SearchPattern::Navigational => ResponseStrategy {
            strategy: StrategyType::Navigation,
            priority: StrategyPriority::Immediate,
            components: vec![
                component(ComponentName::NavShortcuts, 0.9),
                component(ComponentName::DirectMatch, 0.1),
            ],
            fallback: None,
        },
        SearchPattern::Transactional => ResponseStrategy {
            strategy: StrategyType::Conversion,
            priority: priority_for_intent(intent),
            components: vec![
                component(ComponentName::BookingCta, 0.5),
                component(ComponentName::DirectMatch, 0.3),
                StrategyComponent {
                    name: ComponentName::PriceComparison,
                    weight: 0.2,
                    params: price_params(entities),
                },
            ],
            fallback: None,
        },
        SearchPattern::Descriptive => ResponseStrategy {
            strategy: StrategyType::FilteredBrowse,
            priority: priority_for_intent(intent),
            components: vec![
                StrategyComponent {
                    name: ComponentName::FilterPanel,
                    weight: 0.5,
                    params: price_params(entities),
                },
                component(ComponentName::ResultList, 0.4),
                component(ComponentName::SimilarCreators, 0.1),
            ],
            fallback: None,
        },
        SearchPattern::Exploratory => ResponseStrategy {
            strategy: StrategyType::Exploration,
            priority: priority_for_intent(intent),
            components: vec![
                StrategyComponent {
                    name: ComponentName::CategoryGrid,
                    weight: 0.5,
                    params: category_params(entities),
                },
                component(ComponentName::TrendingCarousel, 0.3),
                component(ComponentName::ResultList, 0.2),
            ],
            fallback: None,
        },
        SearchPattern::Informational => ResponseStrategy {
            strategy: StrategyType::Answer,
            priority: priority_for_intent(intent),
            components: vec![
                component(ComponentName::FaqPanel, 0.7),
                component(ComponentName::ResultList, 0.3),
            ],
            fallback: None,
        },
    }
}
