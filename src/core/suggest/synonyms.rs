//! Synonym and Cultural Expansion
//!
//! Expands query terms with synonyms and cross-language cultural
//! equivalents to widen suggestion recall. Groups are either multi-way
//! (every member expands to every other member) or one-way (a source term
//! expands to targets without the reverse).

use indexmap::IndexMap;

// ============================================================================
// Constants - Default Expansion Tables
// ============================================================================

/// Maximum expansions emitted per matched term.
pub const DEFAULT_MAX_EXPANSIONS: usize = 3;

/// Multi-way synonym groups for marketplace vocabulary.
const SYNONYM_GROUPS: &[&[&str]] = &[
    &["musician", "artist", "performer"],
    &["musicians", "artists", "performers"],
    &["comedian", "comic"],
    &["singer", "vocalist"],
    &["cheap", "affordable", "budget"],
    &["famous", "celebrity", "popular"],
    &["party", "celebration", "event"],
    &["shoutout", "greeting", "message"],
];

/// One-way cultural expansions: Kreyol and French terms widen to their
/// English marketplace equivalents.
const CULTURAL_EXPANSIONS: &[(&str, &[&str])] = &[
    ("mizik", &["music", "musician"]),
    ("chante", &["sing", "singer"]),
    ("chantè", &["singer"]),
    ("komedyen", &["comedian"]),
    ("fèt", &["party", "celebration"]),
    ("fet", &["party"]),
    ("dans", &["dance", "dancer"]),
    ("anniversaire", &["birthday"]),
    ("chanteur", &["singer"]),
    ("humoriste", &["comedian"]),
    ("fête", &["party"]),
];

// ============================================================================
// Synonym Map
// ============================================================================

/// Synonym lookup table with bounded expansion.
#[derive(Debug, Clone)]
pub struct SynonymMap {
    /// term → expansion targets, insertion-ordered
    entries: IndexMap<String, Vec<String>>,
    max_expansions: usize,
}

impl Default for SynonymMap {
    fn default() -> Self {
        Self::marketplace_defaults()
    }
}

impl SynonymMap {
    /// Empty map with the given expansion cap.
    pub fn new(max_expansions: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            max_expansions,
        }
    }

    /// Map preloaded with the built-in marketplace synonym groups and
    /// cultural expansions.
    pub fn marketplace_defaults() -> Self {
        let mut map = Self::new(DEFAULT_MAX_EXPANSIONS);
        for group in SYNONYM_GROUPS {
            map.add_multi_way(group);
        }
        for (source, targets) in CULTURAL_EXPANSIONS {
            map.add_one_way(source, targets);
        }
        map
    }

    /// Change the expansion cap.
    pub fn set_max_expansions(&mut self, max_expansions: usize) {
        self.max_expansions = max_expansions;
    }

    /// Add a multi-way group: every member expands to every other member.
    pub fn add_multi_way(&mut self, terms: &[&str]) {
        for term in terms {
            let others: Vec<String> = terms
                .iter()
                .filter(|t| *t != term)
                .map(|t| t.to_string())
                .collect();
            self.entries
                .entry(term.to_lowercase())
                .or_default()
                .extend(others);
        }
    }

    /// Add a one-way expansion from `source` to `targets`.
    pub fn add_one_way(&mut self, source: &str, targets: &[&str]) {
        self.entries
            .entry(source.to_lowercase())
            .or_default()
            .extend(targets.iter().map(|t| t.to_string()));
    }

    /// Merge another map's entries into this one.
    pub fn merge(&mut self, other: &SynonymMap) {
        for (term, targets) in &other.entries {
            self.entries
                .entry(term.clone())
                .or_default()
                .extend(targets.iter().cloned());
        }
    }

    /// Expansions for a single term, capped and deduplicated.
    pub fn expand_term(&self, term: &str) -> Vec<String> {
        let mut expansions: Vec<String> = Vec::new();
        if let Some(targets) = self.entries.get(&term.to_lowercase()) {
            for target in targets {
                if !expansions.contains(target) && target != term {
                    expansions.push(target.clone());
                }
                if expansions.len() >= self.max_expansions {
                    break;
                }
            }
        }
        expansions
    }

    /// True when the map knows the term.
    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(&term.to_lowercase())
    }
}
