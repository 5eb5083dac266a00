//! Suggestion Engine
//!
//! Multi-source autocomplete generation with typo correction, synonym
//! expansion, score-based ranking, a TTL cache, and debounced invocation.

pub mod aggregator;
pub mod cache;
pub mod debounce;
pub mod sources;
pub mod synonyms;
pub mod typo;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;

pub use aggregator::{SuggestionAggregator, MAX_DISPLAYED, MAX_SUGGESTIONS};
pub use cache::{CacheStats, SuggestionCache};
pub use debounce::DebounceScheduler;
pub use sources::{
    PredictiveProvider, SimulatedPredictiveProvider, Suggestion, SuggestionContext,
    SuggestionMeta, SuggestionSource,
};
pub use synonyms::SynonymMap;
pub use typo::{corrections_summary, TypoCorrection, TypoCorrector};

/// Generate a ranked suggestion batch with the built-in aggregator and no
/// predictive provider. Stateless convenience wrapper around
/// [`SuggestionAggregator::generate`]; callers wanting caching, prediction,
/// and stale-run protection use [`SuggestionPipeline`].
pub async fn generate_suggestions(
    input: &str,
    is_empty_focus: bool,
    context: &SuggestionContext,
) -> Vec<Suggestion> {
    SuggestionAggregator::new()
        .generate(input, is_empty_focus, context, None)
        .await
}

// ============================================================================
// Pipeline
// ============================================================================

/// Suggestion pipeline owning the cache and the stale-run guard.
///
/// The debounce scheduler keeps invocations to one per settled keystroke
/// burst, but the predictive source can suspend mid-run. Every run takes a
/// fresh number from a monotonically increasing sequence; after the
/// predictive await, a run whose number is no longer current drops its batch
/// instead of overwriting a later run's result.
pub struct SuggestionPipeline {
    aggregator: SuggestionAggregator,
    cache: Mutex<SuggestionCache>,
    predictive: Option<Box<dyn PredictiveProvider>>,
    sequence: AtomicU64,
}

impl Default for SuggestionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionPipeline {
    /// Pipeline with the built-in aggregator, a fresh cache, and no
    /// predictive provider.
    pub fn new() -> Self {
        Self::with_components(SuggestionAggregator::new(), SuggestionCache::new())
    }

    /// Pipeline with explicit components.
    pub fn with_components(aggregator: SuggestionAggregator, cache: SuggestionCache) -> Self {
        Self {
            aggregator,
            cache: Mutex::new(cache),
            predictive: None,
            sequence: AtomicU64::new(0),
        }
    }

    /// Pipeline tuned from configuration.
    pub fn from_config(config: &crate::config::SearchConfig) -> Self {
        Self::with_components(
            SuggestionAggregator::from_config(config),
            SuggestionCache::with_capacity_and_ttl(
                config.suggest.cache_capacity,
                Duration::from_secs(config.suggest.cache_ttl_secs),
            ),
        )
    }

    /// Attach a predictive completion provider.
    pub fn with_predictive(mut self, provider: Box<dyn PredictiveProvider>) -> Self {
        self.predictive = Some(provider);
        self
    }

    /// Run the pipeline for one (debounced) keystroke.
    ///
    /// Returns `None` when a later run superseded this one while it was
    /// awaiting the predictive source; the stale batch must not be applied.
    pub async fn run(
        &self,
        input: &str,
        is_empty_focus: bool,
        context: &SuggestionContext,
    ) -> Option<Vec<Suggestion>> {
        let my_sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(cached) = self.cache.lock().await.get(input, is_empty_focus) {
            return Some(cached);
        }

        let batch = self
            .aggregator
            .generate(input, is_empty_focus, context, self.predictive.as_deref())
            .await;

        // Compare-and-drop: a fresh run started while we were suspended
        if self.sequence.load(Ordering::SeqCst) != my_sequence {
            log::debug!("Dropping stale suggestion batch for {input:?}");
            return None;
        }

        self.cache
            .lock()
            .await
            .put(input, is_empty_focus, batch.clone());
        Some(batch)
    }

    /// Mark every in-flight run stale without starting a new one.
    pub fn invalidate_inflight(&self) {
        self.sequence.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn context() -> SuggestionContext {
        SuggestionContext {
            indexed_names: vec!["Wyclef Jean".to_string()],
            taxonomy: vec!["Musicians".to_string()],
            ..SuggestionContext::default()
        }
    }

    #[tokio::test]
    async fn test_run_populates_cache() {
        let pipeline = SuggestionPipeline::new();
        let first = pipeline.run("wyclef", false, &context()).await.unwrap();
        let second = pipeline.run("wyclef", false, &context()).await.unwrap();
        assert_eq!(first, second);
        let stats = pipeline.cache_stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_run_is_dropped() {
        let provider = SimulatedPredictiveProvider::new(Duration::from_millis(100));
        let pipeline = Arc::new(SuggestionPipeline::new().with_predictive(Box::new(provider)));

        // First run suspends at the predictive await
        let stale = {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move { pipeline.run("kompa band", false, &context()).await })
        };
        tokio::task::yield_now().await;

        // Second run takes over the sequence and completes
        let fresh = pipeline.run("wyclef jean", false, &context()).await;
        assert!(fresh.is_some());

        // The first run's batch must be dropped, not applied
        assert_eq!(stale.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalidate_marks_next_batch_stale() {
        let pipeline = SuggestionPipeline::new();
        // No run in flight: invalidation must not poison future runs
        pipeline.invalidate_inflight();
        assert!(pipeline.run("wyclef", false, &context()).await.is_some());
    }

    #[tokio::test]
    async fn test_pipeline_from_config() {
        let config = crate::config::SearchConfig::default();
        let pipeline = SuggestionPipeline::from_config(&config);
        assert!(pipeline.run("wyclef", false, &context()).await.is_some());
    }

    #[tokio::test]
    async fn test_generate_suggestions_entry_point() {
        let batch = generate_suggestions("wyclef", false, &context()).await;
        assert!(!batch.is_empty());
        assert!(batch.len() <= MAX_SUGGESTIONS);
    }
}
