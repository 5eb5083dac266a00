//! Language Detection
//!
//! Scores query text against per-language lexical patterns, common-word
//! translations, and cultural terms. This is pattern lookup, not
//! probabilistic language identification: the marketplace audience mixes
//! English, French, and Haitian Creole freely, and a "mixed" label is a
//! first-class outcome.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Score for a lexical pattern hit.
const LEXICAL_WEIGHT: f32 = 1.0;

/// Score for a common-word translation hit.
const COMMON_WORD_WEIGHT: f32 = 0.5;

/// Score for a cultural-term hit.
const CULTURAL_WEIGHT: f32 = 1.5;

/// If the leading language holds less than this share of the total score
/// while another language also scored, the query is labeled mixed.
/// Empirical constant carried from the source design; not re-derived.
pub const MIXED_SHARE_THRESHOLD: f32 = 0.6;

/// Confidence ceiling.
const MAX_CONFIDENCE: f32 = 0.95;

// ============================================================================
// Types
// ============================================================================

/// Detected language label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageLabel {
    English,
    French,
    Kreyol,
    Mixed,
    Unknown,
}

/// Detection result with its confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDetection {
    pub label: LanguageLabel,
    pub confidence: f32,
}

/// Per-language scoring tables.
struct LanguageProfile {
    label: LanguageLabel,
    lexical: Vec<Regex>,
    common_words: &'static [&'static str],
    cultural: &'static [&'static str],
}

fn profile(
    label: LanguageLabel,
    lexical: &[&str],
    common_words: &'static [&'static str],
    cultural: &'static [&'static str],
) -> LanguageProfile {
    LanguageProfile {
        label,
        lexical: lexical
            .iter()
            .map(|s| Regex::new(s).expect("lexical pattern"))
            .collect(),
        common_words,
        cultural,
    }
}

/// Canonical enumeration order: English, French, Kreyol. Ties on the
/// maximum score resolve to the earliest profile, keeping detection
/// deterministic.
static PROFILES: Lazy<Vec<LanguageProfile>> = Lazy::new(|| {
    vec![
        profile(
            LanguageLabel::English,
            &[r"\w+ing\b", r"\b\w+tion\b", r"\bthe\s+\w+"],
            &[
                "the", "and", "for", "with", "who", "can", "me", "my", "best", "near", "under",
                "from",
            ],
            &["shoutout", "birthday", "wedding", "party", "graduation"],
        ),
        profile(
            LanguageLabel::French,
            &[r"\b\w+eur\b", r"\b\w+aise?\b", r"\bqui\s+\w+"],
            &[
                "le", "la", "les", "un", "une", "des", "pour", "avec", "qui", "mon", "ma", "je",
                "cherche",
            ],
            &["anniversaire", "fête", "mariage", "chanteur", "humoriste"],
        ),
        profile(
            LanguageLabel::Kreyol,
            &[r"\bm\s?ap\b", r"\bk?ap\s+\w+", r"\b\w+è\b"],
            &[
                "mwen", "ou", "nou", "yo", "ak", "pou", "nan", "ki", "yon", "bezwen", "vle",
                "chache",
            ],
            &["konpa", "kompa", "zouk", "kanaval", "ayiti", "fèt", "rara"],
        ),
    ]
});

// ============================================================================
// Detection
// ============================================================================

/// Detect the dominant language of cleaned lowercase text.
///
/// Scoring per language: +1 per lexical pattern that matches, +0.5 per
/// common-word hit, +1.5 per cultural-term hit. A zero maximum yields
/// `Unknown` at confidence 0; a leader below [`MIXED_SHARE_THRESHOLD`] of
/// the total (with another nonzero language) yields `Mixed`. Confidence is
/// `min(0.95, max_score / word_count + 0.3)`.
pub fn detect_language(cleaned: &str) -> LanguageDetection {
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.is_empty() {
        return LanguageDetection {
            label: LanguageLabel::Unknown,
            confidence: 0.0,
        };
    }

    let scores: Vec<(LanguageLabel, f32)> = PROFILES
        .iter()
        .map(|p| (p.label, score_profile(p, cleaned, &words)))
        .collect();

    let total: f32 = scores.iter().map(|(_, s)| s).sum();
    // Earliest profile wins ties: strict comparison keeps the first maximum
    let (leader, max_score) = scores
        .iter()
        .copied()
        .fold((LanguageLabel::Unknown, 0.0_f32), |acc, item| {
            if item.1 > acc.1 {
                item
            } else {
                acc
            }
        });

    if max_score == 0.0 {
        return LanguageDetection {
            label: LanguageLabel::Unknown,
            confidence: 0.0,
        };
    }

    let nonzero = scores.iter().filter(|(_, s)| *s > 0.0).count();
    let label = if nonzero > 1 && max_score / total < MIXED_SHARE_THRESHOLD {
        LanguageLabel::Mixed
    } else {
        leader
    };

    let confidence = (max_score / words.len() as f32 + 0.3).min(MAX_CONFIDENCE);
    LanguageDetection { label, confidence }
}

fn score_profile(profile: &LanguageProfile, text: &str, words: &[&str]) -> f32 {
    let lexical_hits = profile.lexical.iter().filter(|r| r.is_match(text)).count();
    let common_hits = words
        .iter()
        .filter(|w| profile.common_words.contains(*w))
        .count();
    let cultural_hits = profile
        .cultural
        .iter()
        .filter(|term| text.contains(*term))
        .count();

    lexical_hits as f32 * LEXICAL_WEIGHT
        + common_hits as f32 * COMMON_WORD_WEIGHT
        + cultural_hits as f32 * CULTURAL_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english() {
        let detection = detect_language("the best wedding singers for my party");
        assert_eq!(detection.label, LanguageLabel::English);
        assert!(detection.confidence > 0.3);
    }

    #[test]
    fn test_kreyol() {
        let detection = detect_language("mwen bezwen yon chantè konpa pou fèt mwen");
        assert_eq!(detection.label, LanguageLabel::Kreyol);
    }

    #[test]
    fn test_french() {
        let detection = detect_language("je cherche un chanteur pour mon anniversaire");
        assert_eq!(detection.label, LanguageLabel::French);
    }

    #[test]
    fn test_unknown_scores_zero() {
        let detection = detect_language("zzz qqq");
        assert_eq!(detection.label, LanguageLabel::Unknown);
        assert_eq!(detection.confidence, 0.0);
    }

    #[test]
    fn test_empty_is_unknown() {
        let detection = detect_language("");
        assert_eq!(detection.label, LanguageLabel::Unknown);
        assert_eq!(detection.confidence, 0.0);
    }

    #[test]
    fn test_mixed_when_no_clear_leader() {
        // English common words alongside Kreyol cultural terms
        let detection = detect_language("the best konpa band for mwen");
        assert_eq!(detection.label, LanguageLabel::Mixed);
    }

    #[test]
    fn test_confidence_is_capped() {
        let detection = detect_language("konpa zouk kanaval ayiti rara");
        assert!(detection.confidence <= MAX_CONFIDENCE);
    }

    #[test]
    fn test_deterministic() {
        let a = detect_language("mwen vle the best konpa band");
        let b = detect_language("mwen vle the best konpa band");
        assert_eq!(a, b);
    }
}
