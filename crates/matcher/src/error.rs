//! Error types for the matcher crate.
//!
//! Matching itself never fails: a miss is `None`. These errors come from
//! building a matcher from configuration and from loading catalogs.

use thiserror::Error;

/// Result type alias for matcher operations.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors that can occur while configuring a matcher or loading a catalog.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A vocabulary word is empty or blank
    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    /// A similarity threshold or length option is out of range
    #[error("Invalid match option: {0}")]
    InvalidOption(String),

    /// Catalog data has an unexpected shape
    #[error("Catalog import error: {0}")]
    CatalogImport(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Pattern compilation error
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Error code for integration with quickorder-core error handling.
/// Range: 11xxx for matcher errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchErrorCode {
    /// Invalid vocabulary word
    InvalidVocabulary = 11001,
    /// Option out of range
    InvalidOption = 11002,
    /// Catalog shape error
    CatalogImport = 11003,
    /// JSON parsing error
    JsonParsing = 11004,
    /// Pattern compilation error
    Pattern = 11005,
}

impl MatchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> MatchErrorCode {
        match self {
            MatchError::InvalidVocabulary(_) => MatchErrorCode::InvalidVocabulary,
            MatchError::InvalidOption(_) => MatchErrorCode::InvalidOption,
            MatchError::CatalogImport(_) => MatchErrorCode::CatalogImport,
            MatchError::JsonError(_) => MatchErrorCode::JsonParsing,
            MatchError::Pattern(_) => MatchErrorCode::Pattern,
        }
    }
}
