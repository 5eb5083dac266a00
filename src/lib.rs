/// Encore Search - query understanding and suggestions for the Encore
/// creator marketplace.
///
/// Pure function library: parses operator syntax into structured queries,
/// classifies search pattern and intent, extracts entities, and generates
/// ranked autocomplete suggestions. Rendering, history persistence, and
/// analytics are external collaborators.

pub mod config;
pub mod core;
pub mod error;

pub use config::{Locale, SearchConfig};
pub use error::{Result, SearchError};
pub use self::core::analysis::{
    analyze_search, IntentLevel, LanguageLabel, SearchPattern, SearchQuery,
};
pub use self::core::query::{parse_advanced_search, FilterPatch, ParsedQuery};
pub use self::core::suggest::{
    generate_suggestions, DebounceScheduler, Suggestion, SuggestionCache, SuggestionContext,
    SuggestionPipeline,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
