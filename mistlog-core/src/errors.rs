//! errors.rs - Custom error types for the mistlog-core library.
//!
//! Extraction itself never fails; these errors cover loading and compiling
//! the rule table.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

use crate::field::FieldName;

/// This enum represents all possible error types in the `mistlog-core` library.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MistlogError {
    #[error("Failed to compile pattern #{1} for field '{0}': {2}")]
    RuleCompilationError(FieldName, usize, regex::Error),

    #[error("Field '{0}': pattern #{1} length ({2}) exceeds maximum allowed ({3})")]
    PatternLengthExceeded(FieldName, usize, usize, usize),

    #[error("Field '{0}': pattern #{1} defines {2} capture groups; at most one is allowed")]
    TooManyCaptureGroups(FieldName, usize, usize),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
