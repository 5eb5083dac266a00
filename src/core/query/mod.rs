//! Operator Query Parsing
//!
//! Tokenizer and structured parser for the advanced search syntax
//! (quoted phrases, `+`/`-` terms, wildcards, price bounds, `OR` groups,
//! slash commands).

pub mod parser;
pub mod tokenizer;

pub use parser::{
    parse_advanced_search, CommandKind, FilterPatch, ParsedQuery, PriceBound, SlashCommand,
};
pub use tokenizer::{tokenize, Token, TokenKind};
