//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub vocabulary: VocabularyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check value ranges that TOML types alone cannot express
    pub fn validate(&self) -> Result<()> {
        self.matching.validate()?;
        self.vocabulary.validate()?;
        self.logging.validate()
    }
}

/// Fuzzy matching thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Names at least this long (in characters) use `long_threshold`
    #[serde(default = "default_long_name_len")]
    pub long_name_len: usize,

    /// Minimum similarity for long names
    #[serde(default = "default_long_threshold")]
    pub long_threshold: f64,

    /// Minimum similarity for short names
    #[serde(default = "default_short_threshold")]
    pub short_threshold: f64,

    /// Shortest search that may use the first-word fallback
    #[serde(default = "default_fallback_min_len")]
    pub fallback_min_len: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            long_name_len: default_long_name_len(),
            long_threshold: default_long_threshold(),
            short_threshold: default_short_threshold(),
            fallback_min_len: default_fallback_min_len(),
        }
    }
}

impl MatchingConfig {
    fn validate(&self) -> Result<()> {
        if self.long_name_len == 0 {
            return Err(Error::config_validation(
                "matching.long_name_len must be greater than 0",
            ));
        }
        for (key, value) in [
            ("long_threshold", self.long_threshold),
            ("short_threshold", self.short_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config_validation(format!(
                    "matching.{} must be within [0, 1], got {}",
                    key, value
                )));
            }
        }
        Ok(())
    }
}

fn default_long_name_len() -> usize {
    8
}

fn default_long_threshold() -> f64 {
    0.4
}

fn default_short_threshold() -> f64 {
    0.5
}

fn default_fallback_min_len() -> usize {
    3
}

/// Words added to the built-in unit and stopword lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VocabularyConfig {
    #[serde(default)]
    pub extra_units: Vec<String>,

    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

impl VocabularyConfig {
    fn validate(&self) -> Result<()> {
        let blank = self
            .extra_units
            .iter()
            .chain(&self.extra_stopwords)
            .any(|w| w.trim().is_empty());
        if blank {
            return Err(Error::config_validation("vocabulary words must not be blank"));
        }
        Ok(())
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
        if !LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(Error::config_validation(format!(
                "logging.level must be one of {}, got {:?}",
                LEVELS.join(", "),
                self.level
            )));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
