//! Terminal helpers for the quickorder command line
//!
//! - Status messages and coded error reports
//! - Column padding and score formatting
//! - Progress indicators

#![warn(missing_docs)]

pub mod output;
pub mod progress;
