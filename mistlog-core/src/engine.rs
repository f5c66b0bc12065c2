// mistlog-core/src/engine.rs
//! Defines the core ExtractionEngine trait.
//!
//! The `ExtractionEngine` trait decouples the CLI from the way fields are
//! located in pasted text. Implementations are pure: extraction has no side
//! effects and never fails. Absence of a match is reported as an empty value,
//! not as an error.
//!
//! License: MIT OR APACHE 2.0

use crate::config::ExtractionConfig;
use crate::field::FieldName;
use crate::record::ExtractedRecord;
use crate::rules::compiler::CompiledRules;

/// Which pattern, if any, produced a field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTrace {
    pub field: FieldName,
    /// Index of the winning pattern in the field's list; `None` if all failed.
    pub matched_pattern: Option<usize>,
    /// The trimmed match before normalization.
    pub raw_value: String,
}

/// A trait that defines the core functionality of an extraction engine.
pub trait ExtractionEngine: Send + Sync {
    /// Extracts a record from raw pasted text.
    ///
    /// Returns `None` when the text is empty or whitespace only. Otherwise the
    /// record holds one entry per field of the rule table, empty when unmatched.
    fn extract(&self, raw_text: &str) -> Option<ExtractedRecord>;

    /// Like [`ExtractionEngine::extract`], but also reports which pattern
    /// matched for each field so a failed parse can be diagnosed.
    fn extract_with_trace(&self, raw_text: &str) -> Option<(ExtractedRecord, Vec<FieldTrace>)>;

    /// Returns a reference to the `CompiledRules` used by the engine.
    fn compiled_rules(&self) -> &CompiledRules;

    /// Returns a reference to the engine's configuration.
    fn get_rules(&self) -> &ExtractionConfig;
}
