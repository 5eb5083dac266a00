//! Error Types
//!
//! Error handling for the search core. Query analysis itself is total over
//! the string domain and never fails; these errors cover the edges that can:
//! configuration loading, synonym table parsing, and the external predictive
//! provider.

use thiserror::Error;

/// Search core errors
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Synonym table error: {0}")]
    SynonymTable(String),

    #[error("Predictive provider error: {0}")]
    Predictive(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for search core operations
pub type Result<T> = std::result::Result<T, SearchError>;
