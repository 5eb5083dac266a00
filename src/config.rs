use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::suggest::cache::{CACHE_TTL_SECONDS, DEFAULT_CACHE_CAPACITY};
use crate::core::suggest::debounce::DEFAULT_DEBOUNCE_MS;
use crate::core::suggest::synonyms::DEFAULT_MAX_EXPANSIONS;
use crate::core::suggest::typo::{MAX_EDIT_DISTANCE, MIN_FUZZY_LENGTH};

/// UI locale. Selects placeholder text and which language tables the UI
/// advertises; it does not change any algorithm's control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "ht-HT")]
    HtHt,
}

impl Locale {
    /// Search box placeholder for this locale.
    pub fn placeholder_text(&self) -> &'static str {
        match self {
            Locale::EnUs => "Search creators, categories, or try \"birthday message\"...",
            Locale::FrFr => "Rechercher des créateurs, des catégories...",
            Locale::HtHt => "Chèche kreyatè, kategori...",
        }
    }
}

/// Top-level search configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    pub locale: Locale,
    pub suggest: SuggestConfig,
    pub typo: TypoConfig,
    pub synonyms: SynonymConfig,
}

/// Suggestion pipeline tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Debounce window for keystroke-driven suggestion runs, in milliseconds.
    pub debounce_ms: u64,
    /// Suggestion cache time-to-live in seconds.
    pub cache_ttl_secs: u64,
    /// Maximum number of cached suggestion batches.
    pub cache_capacity: usize,
}

/// Typo correction tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypoConfig {
    pub enabled: bool,
    /// Maximum Levenshtein distance for a fuzzy dictionary hit.
    pub max_edit_distance: usize,
    /// Inputs at or below this length are never fuzzy-matched.
    pub min_fuzzy_length: usize,
    /// Words that should never be corrected.
    pub protected_words: Vec<String>,
}

/// Synonym expansion tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynonymConfig {
    pub enabled: bool,
    /// Maximum expansions emitted per matched term.
    pub max_expansions: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            cache_ttl_secs: CACHE_TTL_SECONDS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Default for TypoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_edit_distance: MAX_EDIT_DISTANCE,
            min_fuzzy_length: MIN_FUZZY_LENGTH,
            protected_words: Vec::new(),
        }
    }
}

impl Default for SynonymConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

impl SearchConfig {
    /// Load configuration from `~/.config/encore-search/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} — using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {} — using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("encore-search").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.suggest.debounce_ms, 150);
        assert_eq!(config.suggest.cache_ttl_secs, 300);
        assert!(config.typo.enabled);
        assert_eq!(config.typo.max_edit_distance, 2);
    }

    #[test]
    fn test_locale_placeholders_differ() {
        assert_ne!(
            Locale::EnUs.placeholder_text(),
            Locale::HtHt.placeholder_text()
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SearchConfig =
            toml::from_str("locale = \"ht-HT\"\n[suggest]\ndebounce_ms = 200\n").unwrap();
        assert_eq!(config.locale, Locale::HtHt);
        assert_eq!(config.suggest.debounce_ms, 200);
        // Untouched sections keep defaults
        assert_eq!(config.suggest.cache_ttl_secs, 300);
        assert!(config.synonyms.enabled);
    }

    #[test]
    fn test_garbage_toml_is_an_error() {
        let parsed: Result<SearchConfig, _> = toml::from_str("locale = 42");
        assert!(parsed.is_err());
    }
}
