//! End-to-end tests for the three public entry points: operator parsing,
//! query analysis, and suggestion generation.

use std::time::{Duration, Instant};

use encore_search::core::analysis::{analyze_search, IntentLevel, SearchPattern};
use encore_search::core::query::{parse_advanced_search, PriceBound};
use encore_search::core::suggest::{
    generate_suggestions, SuggestionCache, SuggestionContext, SuggestionSource, TypoCorrector,
    MAX_SUGGESTIONS,
};

fn marketplace_context() -> SuggestionContext {
    SuggestionContext {
        recent_searches: vec!["kompa bands".to_string(), "wedding singers".to_string()],
        trending: vec!["birthday shoutout".to_string(), "graduation message".to_string()],
        indexed_names: vec![
            "Wyclef Jean".to_string(),
            "Michael Brun".to_string(),
            "Rutshelle Guillaume".to_string(),
        ],
        taxonomy: vec![
            "Musicians".to_string(),
            "Comedians".to_string(),
            "Athletes".to_string(),
        ],
    }
}

#[test]
fn operator_query_parses_every_bucket() {
    let q = parse_advanced_search("\"birthday message\" +verified -adult price OR range <$100");
    assert_eq!(q.exact_phrases, vec!["birthday message"]);
    assert_eq!(q.include_terms, vec!["verified"]);
    assert_eq!(q.exclude_terms, vec!["adult"]);
    assert_eq!(q.or_groups, vec![("price".to_string(), "range".to_string())]);
    assert_eq!(
        q.price_filter,
        Some(PriceBound {
            min: None,
            max: Some(100.0)
        })
    );
}

#[test]
fn known_creator_name_is_a_confident_known_item() {
    let query = analyze_search("Wyclef Jean");
    assert_eq!(query.pattern, SearchPattern::KnownItem);
    assert!(matches!(
        query.intent,
        IntentLevel::High | IntentLevel::Medium
    ));
    assert!(query.confidence >= 0.8);
}

#[test]
fn category_and_price_entities_reach_the_filter_patch() {
    let query = analyze_search("musicians under $100");
    assert_eq!(query.entities.price_range, Some((0.0, 100.0)));
    assert!(query
        .entities
        .categories
        .as_ref()
        .is_some_and(|c| c.iter().any(|s| s == "musician")));
    assert_eq!(query.filter_patch.price_max, Some(100.0));
}

#[test]
fn classification_is_deterministic() {
    for input in ["book a dj tonight", "mwen bezwen yon chantè", ""] {
        let a = analyze_search(input);
        let b = analyze_search(input);
        assert_eq!(a, b, "analysis must be stable for {input:?}");
    }
}

#[test]
fn typo_corrector_contract() {
    let corrector = TypoCorrector::new();

    let exact = corrector.correct("msicians").expect("exact hit");
    assert_eq!(exact.corrected, "musicians");
    assert!((exact.confidence - 0.9).abs() < f32::EPSILON);

    // Distance 2 from "musicians", not in the dictionary verbatim
    let fuzzy = corrector.correct("musicianzz").expect("fuzzy hit");
    assert_eq!(fuzzy.corrected, "musicians");
    assert!((fuzzy.confidence - 0.7).abs() < f32::EPSILON);
}

#[tokio::test]
async fn suggestion_batch_is_capped_and_unique() {
    let mut context = marketplace_context();
    for i in 0..50 {
        context.indexed_names.push(format!("Band {i}"));
        context.taxonomy.push(format!("Bands {i}"));
    }
    let batch = generate_suggestions("band", false, &context).await;
    assert!(batch.len() <= MAX_SUGGESTIONS);
    let ids: std::collections::HashSet<_> = batch.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids.len(), batch.len());
}

#[tokio::test]
async fn empty_focus_surfaces_history_and_trending() {
    let batch = generate_suggestions("", true, &marketplace_context()).await;
    assert!(batch.iter().any(|s| s.source == SuggestionSource::Recent));
    assert!(batch.iter().any(|s| s.source == SuggestionSource::Trending));
}

#[tokio::test]
async fn entity_rich_input_offers_a_smart_filter() {
    let batch = generate_suggestions("musicians under $100", false, &marketplace_context()).await;
    let smart = batch
        .iter()
        .find(|s| s.source == SuggestionSource::SmartFilter)
        .expect("smart filter suggestion");
    assert!(smart.text.starts_with("Filter:"));
}

#[tokio::test]
async fn misspelled_input_puts_the_correction_first() {
    let batch = generate_suggestions("msicians", false, &marketplace_context()).await;
    assert_eq!(batch[0].source, SuggestionSource::Correction);
    assert_eq!(batch[0].text, "musicians");
}

#[test]
fn cache_honors_the_five_minute_ttl() {
    let mut cache = SuggestionCache::new();
    let start = Instant::now();
    cache.put_at("wyclef", false, Vec::new(), start);

    assert!(cache
        .get_at("wyclef", false, start + Duration::from_secs(299))
        .is_some());
    assert!(cache
        .get_at("wyclef", false, start + Duration::from_secs(300))
        .is_none());
}
