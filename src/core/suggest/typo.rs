//! Typo Correction
//!
//! Spelling correction for search input against a known-term dictionary.
//! An exact dictionary hit is a high-confidence correction; otherwise the
//! input is compared to every dictionary key with the classic
//! dynamic-programming Levenshtein distance (unit insert/delete/substitute
//! costs, no early-exit shortcuts) and the first key within the distance
//! cutoff wins.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strsim::levenshtein;

// ============================================================================
// Constants
// ============================================================================

/// Maximum edit distance for a fuzzy hit. Empirical constant carried from
/// the source design; not re-derived.
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Inputs at or below this length are never fuzzy-matched.
pub const MIN_FUZZY_LENGTH: usize = 3;

/// Confidence for an exact dictionary hit.
pub const EXACT_CONFIDENCE: f32 = 0.9;

/// Confidence for a fuzzy hit within [`MAX_EDIT_DISTANCE`].
pub const FUZZY_CONFIDENCE: f32 = 0.7;

// ============================================================================
// Types
// ============================================================================

/// A correction made to query input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypoCorrection {
    /// Original input as typed
    pub original: String,
    /// Corrected term
    pub corrected: String,
    /// Edit distance between input and the dictionary key that matched
    pub edit_distance: usize,
    /// Correction confidence in [0, 1]
    pub confidence: f32,
}

/// Spelling corrector over an insertion-ordered dictionary.
///
/// The dictionary maps known misspellings and canonical terms to their
/// corrected form. Iteration order is insertion order, and the fuzzy path
/// returns the first qualifying entry: deterministic, though not guaranteed
/// to be the globally closest match.
pub struct TypoCorrector {
    dictionary: IndexMap<String, String>,
    /// Words that should never be corrected
    protected_words: HashSet<String>,
    enabled: bool,
    max_edit_distance: usize,
    min_fuzzy_length: usize,
}

/// Built-in dictionary for the marketplace vocabulary: common misspellings
/// first, then canonical terms anchoring the fuzzy path.
const DEFAULT_DICTIONARY: &[(&str, &str)] = &[
    // Misspellings
    ("msicians", "musicians"),
    ("musican", "musician"),
    ("comdian", "comedian"),
    ("comedien", "comedian"),
    ("athelete", "athlete"),
    ("atheletes", "athletes"),
    ("birhday", "birthday"),
    ("birthdy", "birthday"),
    ("shoutot", "shoutout"),
    ("konpa", "kompa"),
    ("influencr", "influencer"),
    // Canonical terms
    ("musicians", "musicians"),
    ("musician", "musician"),
    ("comedians", "comedians"),
    ("comedian", "comedian"),
    ("athletes", "athletes"),
    ("singers", "singers"),
    ("dancers", "dancers"),
    ("birthday", "birthday"),
    ("shoutout", "shoutout"),
    ("wedding", "wedding"),
    ("kompa", "kompa"),
    ("zouk", "zouk"),
];

impl Default for TypoCorrector {
    fn default() -> Self {
        Self::new()
    }
}

impl TypoCorrector {
    /// Corrector with the built-in marketplace dictionary.
    pub fn new() -> Self {
        Self::with_dictionary(
            DEFAULT_DICTIONARY
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    /// Corrector over an explicit dictionary. Entry order is significant:
    /// the fuzzy path returns the first qualifying entry.
    pub fn with_dictionary(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            dictionary: entries.into_iter().collect(),
            protected_words: HashSet::new(),
            enabled: true,
            max_edit_distance: MAX_EDIT_DISTANCE,
            min_fuzzy_length: MIN_FUZZY_LENGTH,
        }
    }

    /// Corrector with the built-in dictionary, tuned from configuration.
    pub fn from_config(config: &crate::config::TypoConfig) -> Self {
        let mut corrector = Self::new();
        corrector.enabled = config.enabled;
        corrector.max_edit_distance = config.max_edit_distance;
        corrector.min_fuzzy_length = config.min_fuzzy_length;
        for word in &config.protected_words {
            corrector.add_protected_word(word);
        }
        corrector
    }

    /// Override the fuzzy distance cutoff.
    pub fn with_max_edit_distance(mut self, distance: usize) -> Self {
        self.max_edit_distance = distance;
        self
    }

    /// Add a word that should never be corrected.
    pub fn add_protected_word(&mut self, word: &str) {
        self.protected_words.insert(word.to_lowercase());
    }

    /// Check if a word is protected from correction.
    pub fn is_protected(&self, word: &str) -> bool {
        self.protected_words.contains(&word.to_lowercase())
    }

    /// Correct input if it needs correction.
    ///
    /// Returns `None` when the input is protected, already correct, too
    /// short for fuzzy matching, or has no dictionary entry within the
    /// distance cutoff.
    pub fn correct(&self, input: &str) -> Option<TypoCorrection> {
        if !self.enabled {
            return None;
        }
        let normalized = input.trim().to_lowercase();
        if normalized.is_empty() || self.is_protected(&normalized) {
            return None;
        }

        // Exact dictionary hit
        if let Some(corrected) = self.dictionary.get(&normalized) {
            if *corrected == normalized {
                return None; // already the canonical form
            }
            return Some(TypoCorrection {
                original: input.to_string(),
                corrected: corrected.clone(),
                edit_distance: levenshtein(&normalized, corrected),
                confidence: EXACT_CONFIDENCE,
            });
        }

        // Fuzzy path: full DP distance against every key, in entry order
        if normalized.chars().count() <= self.min_fuzzy_length {
            return None;
        }
        for (key, corrected) in &self.dictionary {
            let distance = levenshtein(&normalized, key);
            if distance <= self.max_edit_distance && *corrected != normalized {
                return Some(TypoCorrection {
                    original: input.to_string(),
                    corrected: corrected.clone(),
                    edit_distance: distance,
                    confidence: FUZZY_CONFIDENCE,
                });
            }
        }

        None
    }
}

/// Human-readable summary of corrections, for UI feedback.
pub fn corrections_summary(corrections: &[TypoCorrection]) -> Option<String> {
    if corrections.is_empty() {
        return None;
    }
    let parts: Vec<String> = corrections
        .iter()
        .map(|c| format!("{} → {}", c.original, c.corrected))
        .collect();
    Some(parts.join(", "))
}
