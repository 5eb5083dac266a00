//! Suggestion Cache
//!
//! Short-lived memoization of suggestion batches keyed by
//! `(normalized input, empty-focus flag)`. Entries carry an absolute expiry
//! and are never served past it; expired entries are discarded lazily on the
//! next lookup rather than by a background sweeper. The backing store is an
//! LRU map, which also bounds total growth.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde::{Deserialize, Serialize};

use super::sources::Suggestion;

// ============================================================================
// Constants
// ============================================================================

/// Default entry time-to-live: 5 minutes.
pub const CACHE_TTL_SECONDS: u64 = 300;

/// Default capacity of the backing LRU store.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

// ============================================================================
// Types
// ============================================================================

type CacheKey = (String, bool);

/// A cached suggestion batch with its expiry.
#[derive(Debug, Clone)]
struct CacheEntry {
    suggestions: Vec<Suggestion>,
    created_at: Instant,
    expires_at: Instant,
}

/// Hit/miss counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Misses caused specifically by a present-but-expired entry
    pub expired: u64,
}

/// TTL cache for suggestion batches. Owned explicitly by the pipeline and
/// passed in by the caller; there is no ambient module state, so tests get
/// a fresh cache per construction.
pub struct SuggestionCache {
    entries: LruCache<CacheKey, CacheEntry>,
    ttl: Duration,
    stats: CacheStats,
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionCache {
    /// Cache with default capacity and TTL.
    pub fn new() -> Self {
        Self::with_capacity_and_ttl(
            DEFAULT_CACHE_CAPACITY,
            Duration::from_secs(CACHE_TTL_SECONDS),
        )
    }

    /// Cache with explicit capacity and TTL.
    pub fn with_capacity_and_ttl(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1");
        Self {
            entries: LruCache::new(capacity),
            ttl,
            stats: CacheStats::default(),
        }
    }

    /// Look up a batch. A hit requires the entry to not have expired.
    pub fn get(&mut self, input: &str, is_empty_focus: bool) -> Option<Vec<Suggestion>> {
        self.get_at(input, is_empty_focus, Instant::now())
    }

    /// Look up a batch against an explicit clock, for tests.
    pub fn get_at(
        &mut self,
        input: &str,
        is_empty_focus: bool,
        now: Instant,
    ) -> Option<Vec<Suggestion>> {
        let key = Self::key(input, is_empty_focus);
        match self.entries.get(&key) {
            Some(entry) if now < entry.expires_at => {
                self.stats.hits += 1;
                Some(entry.suggestions.clone())
            }
            Some(_) => {
                // Expired: treated as a miss and discarded lazily
                self.entries.pop(&key);
                self.stats.misses += 1;
                self.stats.expired += 1;
                log::debug!("Suggestion cache entry expired for {key:?}");
                None
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Store a batch, stamping expiry at `now + ttl`.
    pub fn put(&mut self, input: &str, is_empty_focus: bool, suggestions: Vec<Suggestion>) {
        self.put_at(input, is_empty_focus, suggestions, Instant::now());
    }

    /// Store a batch against an explicit clock, for tests.
    pub fn put_at(
        &mut self,
        input: &str,
        is_empty_focus: bool,
        suggestions: Vec<Suggestion>,
        now: Instant,
    ) {
        let entry = CacheEntry {
            suggestions,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.entries.put(Self::key(input, is_empty_focus), entry);
    }

    /// Age of a cached entry, if present (expired or not).
    pub fn entry_age(&self, input: &str, is_empty_focus: bool, now: Instant) -> Option<Duration> {
        self.entries
            .peek(&Self::key(input, is_empty_focus))
            .map(|entry| now.duration_since(entry.created_at))
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    fn key(input: &str, is_empty_focus: bool) -> CacheKey {
        (input.trim().to_lowercase(), is_empty_focus)
    }
}
