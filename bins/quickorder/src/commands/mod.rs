//! CLI command implementations

pub mod batch;
pub mod find;
pub mod import;
pub mod normalize;
pub mod quick;
pub mod split;

use clap::ValueEnum;
use quickorder_core::{config::Config, Error, ErrorCode, ResultExt};
use quickorder_matcher::{
    load_catalog, CatalogItem, CatalogMatcher, MatchError, MatchOptions, TextNormalizer,
    Vocabulary,
};
use serde::Serialize;
use std::path::Path;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// State shared by every command
pub struct Context {
    pub format: OutputFormat,
    pub config: Config,
}

impl Context {
    pub fn new(format: OutputFormat, config: Config) -> Self {
        Self { format, config }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Build a matcher from the loaded configuration
    pub fn matcher(&self) -> Result<CatalogMatcher, Error> {
        let schema = &self.config.schema;

        let vocabulary = Vocabulary::with_extra(
            schema.vocabulary.extra_units.iter().cloned(),
            schema.vocabulary.extra_stopwords.iter().cloned(),
        );
        let normalizer = TextNormalizer::new(vocabulary).map_err(from_match_error)?;

        let options = MatchOptions {
            long_name_len: schema.matching.long_name_len,
            long_threshold: schema.matching.long_threshold,
            short_threshold: schema.matching.short_threshold,
            fallback_min_len: schema.matching.fallback_min_len,
        };

        CatalogMatcher::new(normalizer, options).map_err(from_match_error)
    }
}

/// Read and parse a catalog file; an empty catalog is an error
pub fn read_catalog(path: &Path) -> Result<Vec<CatalogItem>, Error> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    let json = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Reading catalog {}", path.display()))?;

    let items = load_catalog(&json)
        .map_err(from_match_error)
        .context(format!("Loading catalog {}", path.display()))?;

    if items.is_empty() {
        return Err(Error::empty_catalog(path));
    }

    tracing::debug!(path = %path.display(), items = items.len(), "catalog loaded");
    Ok(items)
}

/// Map a matcher error onto the coded error type
pub fn from_match_error(err: MatchError) -> Error {
    let message = err.to_string();
    let coded = match &err {
        MatchError::InvalidVocabulary(_) | MatchError::Pattern(_) => {
            Error::new(ErrorCode::InvalidVocabulary, message)
        }
        MatchError::InvalidOption(_) => Error::config_validation(message),
        MatchError::CatalogImport(_) => Error::catalog_import(message),
        MatchError::JsonError(_) => Error::new(ErrorCode::CatalogParseError, message),
    };
    coded.with_source(err)
}

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_error_codes() {
        let err = from_match_error(MatchError::CatalogImport("bad".into()));
        assert_eq!(err.code, ErrorCode::CatalogImportError);
        assert!(err.suggestion.is_some_and(|s| s.contains("JSON array")));

        let err = from_match_error(MatchError::InvalidOption("bad".into()));
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
        assert!(err.source.is_some());
    }

    #[test]
    fn test_matcher_uses_extra_vocabulary() {
        let mut config = Config::defaults();
        config.schema.vocabulary.extra_units = vec!["tray".to_string()];
        let ctx = Context::new(OutputFormat::Text, config);

        let matcher = ctx.matcher().unwrap();
        assert_eq!(matcher.normalizer().normalize("2 tray of eggs"), "2 egg");
    }
}
