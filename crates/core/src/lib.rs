//! Shared foundations for the quickorder tools
//!
//! This crate provides:
//!
//! - **Error handling**: coded errors with context, recovery suggestions and exit codes
//! - **Configuration**: TOML-based configuration with validation
//!
//! # Example
//!
//! ```rust,no_run
//! use quickorder_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("short names need {:.0}% similarity", config.schema.matching.short_threshold * 100.0);
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, LoggingConfig, MatchingConfig, VocabularyConfig};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
