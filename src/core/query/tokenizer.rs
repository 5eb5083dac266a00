//! Query Tokenizer
//!
//! Splits raw search input into typed tokens: quoted phrases, include/exclude
//! markers, wildcards, price bounds, OR pairs, slash commands, and plain
//! words. A single combined scanner regex is applied left to right; at each
//! position the first matching alternative wins, so operator forms always
//! take priority over plain words and no two tokens overlap.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    /// Quoted exact phrase: `"birthday message"`
    ExactPhrase,
    /// Required term: `+verified`
    Include,
    /// Excluded term: `-adult`
    Exclude,
    /// Prefix wildcard: `music*` (trailing `*` stripped from the value)
    Wildcard,
    /// Price bound: `<$100` or `>$25`
    PriceBound,
    /// The `OR` connective between two words
    Or,
    /// Slash command at the start of the input: `/trending`
    Command,
    /// Plain word
    Text,
}

/// One scanned token. `value` is the operator payload (phrase body, term,
/// command name); `original` is the exact source span it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub original: String,
}

impl Token {
    fn new(kind: TokenKind, value: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            original: original.into(),
        }
    }
}

/// Combined scanner. Alternative order is the operator priority:
/// exact phrase > include > exclude > wildcard > price > OR pair > word.
static SCANNER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#""(?P<phrase>[^"]*)""#,
        r"|\+(?P<include>\w[\w'-]*)",
        r"|-(?P<exclude>\w[\w'-]*)",
        r"|(?P<wildcard>\w[\w'-]*)\*",
        r"|(?P<price>[<>]\$?\d+(?:\.\d+)?)",
        r"|(?P<or_left>\w[\w'-]*)\s+OR\s+(?P<or_right>\w[\w'-]*)",
        r"|(?P<word>\w[\w'-]*)",
    ))
    .expect("scanner regex must compile")
});

/// Leading slash command: `/name` plus an optional argument.
static COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/(?P<name>\w+)(?:\s+(?P<arg>\S.*))?$").expect("command regex"));

/// Tokenize raw input into an ordered token sequence.
///
/// A leading `/command` produces a single `Command` token and nothing else.
/// Malformed operator fragments (a lone `+`, a dangling quote) match no
/// alternative and are skipped without error.
pub fn tokenize(raw: &str) -> Vec<Token> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Some(caps) = COMMAND.captures(trimmed) {
        let name = &caps["name"];
        return vec![Token::new(TokenKind::Command, name.to_lowercase(), trimmed)];
    }

    let mut tokens = Vec::new();
    let mut scanned_to = 0;
    for caps in SCANNER.captures_iter(trimmed) {
        let whole = caps.get(0).expect("capture 0 always present");
        let gap = trimmed[scanned_to..whole.start()].trim();
        if !gap.is_empty() {
            log::debug!("Skipped unparsable query fragment: {gap:?}");
        }
        scanned_to = whole.end();

        if let Some(m) = caps.name("phrase") {
            tokens.push(Token::new(TokenKind::ExactPhrase, m.as_str(), whole.as_str()));
        } else if let Some(m) = caps.name("include") {
            tokens.push(Token::new(TokenKind::Include, m.as_str(), whole.as_str()));
        } else if let Some(m) = caps.name("exclude") {
            tokens.push(Token::new(TokenKind::Exclude, m.as_str(), whole.as_str()));
        } else if let Some(m) = caps.name("wildcard") {
            // Trailing `*` stripped from the value, kept in the original
            tokens.push(Token::new(TokenKind::Wildcard, m.as_str(), whole.as_str()));
        } else if let Some(m) = caps.name("price") {
            tokens.push(Token::new(TokenKind::PriceBound, m.as_str(), whole.as_str()));
        } else if let (Some(left), Some(right)) = (caps.name("or_left"), caps.name("or_right")) {
            // `word OR word` expands to a Text / Or / Text triple
            tokens.push(Token::new(TokenKind::Text, left.as_str(), left.as_str()));
            tokens.push(Token::new(TokenKind::Or, "OR", "OR"));
            tokens.push(Token::new(TokenKind::Text, right.as_str(), right.as_str()));
        } else if let Some(m) = caps.name("word") {
            tokens.push(Token::new(TokenKind::Text, m.as_str(), whole.as_str()));
        }
    }

    let tail = trimmed[scanned_to..].trim();
    if !tail.is_empty() {
        log::debug!("Skipped unparsable query tail: {tail:?}");
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_plain_words() {
        let tokens = tokenize("haitian musicians");
        assert_eq!(kinds(&tokens), vec![TokenKind::Text, TokenKind::Text]);
        assert_eq!(tokens[0].value, "haitian");
        assert_eq!(tokens[1].value, "musicians");
    }

    #[test]
    fn test_exact_phrase() {
        let tokens = tokenize("\"birthday message\" comedians");
        assert_eq!(tokens[0].kind, TokenKind::ExactPhrase);
        assert_eq!(tokens[0].value, "birthday message");
        assert_eq!(tokens[0].original, "\"birthday message\"");
        assert_eq!(tokens[1].kind, TokenKind::Text);
    }

    #[test]
    fn test_include_exclude() {
        let tokens = tokenize("+verified -adult");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Include, TokenKind::Exclude]
        );
        assert_eq!(tokens[0].value, "verified");
        assert_eq!(tokens[1].value, "adult");
    }

    #[test]
    fn test_wildcard_strips_star() {
        let tokens = tokenize("music*");
        assert_eq!(tokens[0].kind, TokenKind::Wildcard);
        assert_eq!(tokens[0].value, "music");
        assert_eq!(tokens[0].original, "music*");
    }

    #[test]
    fn test_price_bounds() {
        let tokens = tokenize("<$100 >$25");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::PriceBound, TokenKind::PriceBound]
        );
        assert_eq!(tokens[0].value, "<$100");
        assert_eq!(tokens[1].value, ">$25");
    }

    #[test]
    fn test_or_pair_expands_to_triple() {
        let tokens = tokenize("price OR range");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Text, TokenKind::Or, TokenKind::Text]
        );
        assert_eq!(tokens[0].value, "price");
        assert_eq!(tokens[2].value, "range");
    }

    #[test]
    fn test_leading_command() {
        let tokens = tokenize("/trending musicians");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Command);
        assert_eq!(tokens[0].value, "trending");
    }

    #[test]
    fn test_slash_mid_query_is_not_a_command() {
        let tokens = tokenize("rock / roll");
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Text));
    }

    #[test]
    fn test_lone_operator_chars_are_skipped() {
        let tokens = tokenize("+ - music");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, "music");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_mixed_operator_query() {
        let tokens = tokenize("\"birthday message\" +verified -adult price OR range <$100");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::ExactPhrase,
                TokenKind::Include,
                TokenKind::Exclude,
                TokenKind::Text,
                TokenKind::Or,
                TokenKind::Text,
                TokenKind::PriceBound,
            ]
        );
    }

    #[test]
    fn test_hyphenated_word_is_one_token() {
        let tokens = tokenize("port-au-prince");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(tokens[0].value, "port-au-prince");
    }
}
