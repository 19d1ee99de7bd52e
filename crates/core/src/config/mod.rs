//! Configuration loading and schema definitions
//!
//! Matching thresholds, vocabulary extensions and log settings.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
