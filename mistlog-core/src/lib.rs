// mistlog-core/src/lib.rs
//! # Mistlog Core Library
//!
//! `mistlog-core` provides the platform-independent logic for turning pasted
//! exam-review text into a structured mistake record. It defines the rule
//! table (an ordered list of regex patterns per field), compiles it, and
//! implements a pluggable `ExtractionEngine` trait that walks each field's
//! pattern chain and keeps the first match.
//!
//! The library is pure and stateless. It does no I/O besides reading an
//! optional rules file; persisting records is left to the caller.
//!
//! ## Modules
//!
//! * `field`: The `FieldName` enum, which is also the log's column schema.
//! * `config`: Defines `FieldRule`s and `ExtractionConfig`, loaded from YAML.
//! * `rules`: Compiles and caches the rule table.
//! * `engine`: Defines the `ExtractionEngine` trait.
//! * `engines`: Contains the `RegexEngine` implementation.
//! * `normalizers`: Per-field clean-up of raw matches (Result casing, Time Spent).
//! * `validators`: Decides whether a record is usable.
//! * `sanitizer`: Flattens free text for single-line CSV storage.
//! * `record`: `ExtractedRecord` and its translation into a log row.
//! * `annotation`: Error types, notes and timestamps supplied at save time.
//! * `headless`: One-shot parse-and-validate helpers.
//!
//! ## Usage Example
//!
//! ```rust
//! use mistlog_core::{ExtractionConfig, ExtractionEngine, FieldName, RegexEngine, is_valid_record};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let engine = RegexEngine::new(ExtractionConfig::load_default_rules()?)?;
//!
//!     let pasted = "Ethics: Level II\nQuestion 1 of 1\nYour result is incorrect.\n";
//!     let record = engine.extract(pasted);
//!
//!     assert!(is_valid_record(record.as_ref()));
//!     let record = record.unwrap();
//!     assert_eq!(record.get(FieldName::Result), "Incorrect");
//!     assert_eq!(record.get(FieldName::QuestionNumber), "1 of 1");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Extraction, validation and sanitization never fail. Loading and compiling
//! rules return `anyhow::Result`, with `MistlogError` for compilation errors.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod annotation;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod field;
pub mod headless;
pub mod normalizers;
pub mod record;
pub mod rules;
pub mod sanitizer;
pub mod validators;

/// Re-exports the rule table configuration types.
pub use config::{merge_rules, validate_rules, ExtractionConfig, FieldRule, MAX_PATTERN_LENGTH};

/// Re-exports the custom error type for clear error reporting.
pub use errors::MistlogError;

/// Re-exports the field schema.
pub use field::FieldName;

/// Re-exports the engine trait and its regex implementation.
pub use engine::{ExtractionEngine, FieldTrace};
pub use engines::regex_engine::RegexEngine;

/// Re-exports record, annotation and validation helpers.
pub use annotation::{clean_error_type, format_timestamp, Annotation, ErrorType, TIMESTAMP_FORMAT};
pub use record::{log_preview, ExtractedRecord, LogRow, COLUMN_COUNT};
pub use sanitizer::sanitize;
pub use validators::{is_valid_record, missing_mandatory_fields};

/// Re-exports types and functions for one-shot, non-interactive use.
pub use headless::{headless_parse_string, parse_with_engine, ParseOutcome};

pub use rules::compiler::{compile_rules, CompiledFieldRule, CompiledPattern, CompiledRules};
