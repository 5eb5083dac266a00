//! Advanced Search Parser
//!
//! Consumes the tokenizer's output and assembles a structured [`ParsedQuery`]:
//! exact phrases, include/exclude terms, OR groups, wildcards, price bounds,
//! slash commands, and the plain-text remainder. Parsing is total: malformed
//! fragments are dropped, never reported as errors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::tokenizer::{tokenize, Token, TokenKind};

// ============================================================================
// Types
// ============================================================================

/// A price constraint parsed from `<$N` / `>$N` operators.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBound {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Known slash commands on the browse surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandKind {
    Help,
    Trending,
    Categories,
    Random,
    Clear,
    /// Anything else; kept verbatim so callers can decide what to do.
    Unknown(String),
}

impl CommandKind {
    fn from_name(name: &str) -> Self {
        match name {
            "help" => CommandKind::Help,
            "trending" => CommandKind::Trending,
            "categories" => CommandKind::Categories,
            "random" => CommandKind::Random,
            "clear" => CommandKind::Clear,
            other => CommandKind::Unknown(other.to_string()),
        }
    }

    /// Canonical command name as typed after the slash.
    pub fn name(&self) -> &str {
        match self {
            CommandKind::Help => "help",
            CommandKind::Trending => "trending",
            CommandKind::Categories => "categories",
            CommandKind::Random => "random",
            CommandKind::Clear => "clear",
            CommandKind::Unknown(name) => name,
        }
    }
}

/// A parsed slash command with its optional argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlashCommand {
    pub kind: CommandKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
}

/// Marketplace filter fields derived from a parsed or analyzed query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPatch {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub include_tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub exclude_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub verified_only: bool,
}

impl FilterPatch {
    /// True when the patch would not change any filter.
    pub fn is_empty(&self) -> bool {
        self == &FilterPatch::default()
    }
}

/// Structured form of an operator query. Every input token lands in exactly
/// one bucket or the plain-text remainder; a leading slash command
/// short-circuits everything else.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub exact_phrases: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub include_terms: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub exclude_terms: Vec<String>,
    /// Ordered two-term OR groups, e.g. `price OR range` → `("price", "range")`.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub or_groups: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub wildcards: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_filter: Option<PriceBound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<SlashCommand>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub plain_text: String,
}

// ============================================================================
// Price bound parsing
// ============================================================================

/// `<$N` sets an upper bound.
static PRICE_MAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<\$?(\d+(?:\.\d+)?)$").expect("price max regex"));

/// `>$N` sets a lower bound.
static PRICE_MIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^>\$?(\d+(?:\.\d+)?)$").expect("price min regex"));

/// Leading slash command, shared shape with the tokenizer's check.
static COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/(?P<name>\w+)(?:\s+(?P<arg>\S.*))?$").expect("command regex"));

// ============================================================================
// Parser
// ============================================================================

/// Parse operator syntax into a [`ParsedQuery`].
///
/// A leading `/command` is checked first; when present the returned query
/// contains only the command, and all other operators are discarded.
pub fn parse_advanced_search(raw: &str) -> ParsedQuery {
    let trimmed = raw.trim();
    let mut query = ParsedQuery::default();

    if let Some(caps) = COMMAND.captures(trimmed) {
        query.command = Some(SlashCommand {
            kind: CommandKind::from_name(&caps["name"].to_lowercase()),
            argument: caps.name("arg").map(|m| m.as_str().to_string()),
        });
        return query;
    }

    let mut plain_words: Vec<String> = Vec::new();
    // Left side of an OR group awaiting its right-hand term
    let mut open_or: Option<String> = None;

    for token in tokenize(trimmed) {
        match token.kind {
            TokenKind::ExactPhrase => push_unique(&mut query.exact_phrases, token.value),
            TokenKind::Include => push_unique(&mut query.include_terms, token.value),
            TokenKind::Exclude => push_unique(&mut query.exclude_terms, token.value),
            TokenKind::Wildcard => push_unique(&mut query.wildcards, token.value),
            TokenKind::PriceBound => apply_price_token(&mut query, &token),
            TokenKind::Or => {
                // The group opens on the word scanned just before the OR
                match plain_words.pop() {
                    Some(left) => open_or = Some(left),
                    None => log::debug!("Dropped OR with no left-hand term"),
                }
            }
            TokenKind::Text => match open_or.take() {
                Some(left) => query.or_groups.push((left, token.value)),
                None => plain_words.push(token.value),
            },
            TokenKind::Command => {
                // Commands only count at the start of the input; the
                // tokenizer never emits one elsewhere
                log::debug!("Dropped non-leading command token {:?}", token.value);
            }
        }
    }

    query.plain_text = plain_words.join(" ");
    query
}

fn push_unique(bucket: &mut Vec<String>, value: String) {
    if !bucket.contains(&value) {
        bucket.push(value);
    }
}

/// Apply a `PriceBound` token. The two bound regexes are mutually exclusive;
/// the first that matches wins and sets exactly one bound.
fn apply_price_token(query: &mut ParsedQuery, token: &Token) {
    let bound = query.price_filter.get_or_insert_with(PriceBound::default);
    if let Some(caps) = PRICE_MAX.captures(&token.value) {
        bound.max = caps[1].parse().ok();
    } else if let Some(caps) = PRICE_MIN.captures(&token.value) {
        bound.min = caps[1].parse().ok();
    } else {
        log::debug!("Dropped malformed price token {:?}", token.value);
    }
}

// ============================================================================
// Round-trip serialization
// ============================================================================

impl ParsedQuery {
    /// Re-serialize to operator syntax. Re-parsing the result yields an
    /// operator-equivalent query; whitespace is normalized, not preserved.
    pub fn to_query_string(&self) -> String {
        if let Some(ref command) = self.command {
            return match command.argument {
                Some(ref arg) => format!("/{} {arg}", command.kind.name()),
                None => format!("/{}", command.kind.name()),
            };
        }

        let mut parts: Vec<String> = Vec::new();
        for phrase in &self.exact_phrases {
            parts.push(format!("\"{phrase}\""));
        }
        for term in &self.include_terms {
            parts.push(format!("+{term}"));
        }
        for term in &self.exclude_terms {
            parts.push(format!("-{term}"));
        }
        for (left, right) in &self.or_groups {
            parts.push(format!("{left} OR {right}"));
        }
        for stem in &self.wildcards {
            parts.push(format!("{stem}*"));
        }
        if let Some(bound) = self.price_filter {
            if let Some(min) = bound.min {
                parts.push(format!(">${min}"));
            }
            if let Some(max) = bound.max {
                parts.push(format!("<${max}"));
            }
        }
        if !self.plain_text.is_empty() {
            parts.push(self.plain_text.clone());
        }
        parts.join(" ")
    }

    /// Derive the marketplace filter fields this query implies.
    pub fn to_filter_patch(&self) -> FilterPatch {
        FilterPatch {
            include_tags: self.include_terms.clone(),
            exclude_tags: self.exclude_terms.clone(),
            price_min: self.price_filter.and_then(|b| b.min),
            price_max: self.price_filter.and_then(|b| b.max),
            verified_only: self.include_terms.iter().any(|t| t == "verified"),
            ..FilterPatch::default()
        }
    }

    /// True for a query with no operators, no command, and no text.
    pub fn is_empty(&self) -> bool {
        self == &ParsedQuery::default()
    }
}
