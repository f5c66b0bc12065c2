// File: mistlog-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for using the core engine in headless mode (non-UI).
//! Provides a one-shot parse-and-validate call for callers that do not want
//! to manage an engine themselves.

use anyhow::Result;

use crate::config::ExtractionConfig;
use crate::engine::ExtractionEngine;
use crate::engines::regex_engine::RegexEngine;
use crate::record::ExtractedRecord;
use crate::field::FieldName;
use crate::validators::{is_valid_record, missing_mandatory_fields};

/// What a one-shot parse produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The text was empty or whitespace only.
    NoInput,
    /// A usable record.
    Valid(ExtractedRecord),
    /// Mandatory fields are blank. The record is kept for inspection.
    Invalid {
        record: ExtractedRecord,
        missing: Vec<FieldName>,
    },
}

impl ParseOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ParseOutcome::Valid(_))
    }

    /// Classifies an already extracted record.
    pub fn from_record(record: ExtractedRecord) -> Self {
        if is_valid_record(Some(&record)) {
            return ParseOutcome::Valid(record);
        }
        let missing = missing_mandatory_fields(&record);
        ParseOutcome::Invalid { record, missing }
    }

    /// The extracted record, valid or not.
    pub fn record(&self) -> Option<&ExtractedRecord> {
        match self {
            ParseOutcome::NoInput => None,
            ParseOutcome::Valid(record) | ParseOutcome::Invalid { record, .. } => Some(record),
        }
    }
}

/// Runs extraction and validation with an existing engine.
pub fn parse_with_engine(engine: &dyn ExtractionEngine, content: &str) -> ParseOutcome {
    engine.extract(content).map_or(ParseOutcome::NoInput, ParseOutcome::from_record)
}

/// Extracts and validates `content` in a single call.
///
/// # Arguments
///
/// * `config` - The merged ExtractionConfig (defaults + optional user overrides).
/// * `content` - The pasted text.
pub fn headless_parse_string(config: ExtractionConfig, content: &str) -> Result<ParseOutcome> {
    let engine = RegexEngine::new(config)?;
    Ok(parse_with_engine(&engine, content))
}
