//! Provides the record produced by one extraction and its translation into a
//! log row.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::annotation::{clean_error_type, format_timestamp, Annotation};
use crate::field::FieldName;
use crate::sanitizer::sanitize;

/// Number of columns in a log row.
pub const COLUMN_COUNT: usize = FieldName::ALL.len();

/// One row of the mistake log, in column order.
pub type LogRow = [String; COLUMN_COUNT];

/// Longest prefix of a value shown in debug logs.
const LOG_PREVIEW_CHARS: usize = 40;

/// The field map produced for one parse call.
///
/// Every field of the rule table that produced it is present, holding `""`
/// when nothing matched. Lookups of any other field also yield `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedRecord {
    values: BTreeMap<FieldName, String>,
}

impl ExtractedRecord {
    /// A record with every given field present and empty.
    pub fn with_fields<I: IntoIterator<Item = FieldName>>(fields: I) -> Self {
        Self {
            values: fields.into_iter().map(|f| (f, String::new())).collect(),
        }
    }

    /// The value of `field`, or `""` when absent.
    pub fn get(&self, field: FieldName) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Whether `field` is present in the map, empty or not.
    pub fn contains(&self, field: FieldName) -> bool {
        self.values.contains_key(&field)
    }

    /// True when the field is absent or only whitespace.
    pub fn is_blank(&self, field: FieldName) -> bool {
        self.get(field).trim().is_empty()
    }

    /// Present fields and their values, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Attaches the caller's error type, notes and save time.
    ///
    /// The error type is stored without its decorative icon.
    pub fn finalize(mut self, annotation: Annotation) -> Self {
        self.set(FieldName::ErrorType, clean_error_type(annotation.error_type.label()));
        self.set(FieldName::Notes, annotation.notes);
        self.set(FieldName::Timestamp, format_timestamp(&annotation.timestamp));
        debug!(
            "Record finalized as '{}' at {}.",
            self.get(FieldName::ErrorType),
            self.get(FieldName::Timestamp)
        );
        self
    }

    /// All ten columns in log order, flattened for CSV storage.
    ///
    /// Every column except Timestamp goes through [`sanitize`]; missing fields
    /// become empty cells.
    pub fn to_log_row(&self) -> LogRow {
        FieldName::ALL.map(|field| match field {
            FieldName::Timestamp => self.get(field).to_string(),
            _ => sanitize(self.get(field)),
        })
    }

    /// Pretty JSON keyed by column label, for inspection.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl FromIterator<(FieldName, String)> for ExtractedRecord {
    fn from_iter<T: IntoIterator<Item = (FieldName, String)>>(iter: T) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

/// Truncates a value for log output so question text never floods the log.
pub fn log_preview(value: &str) -> String {
    let mut chars = value.chars();
    let preview: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}... [{} chars]", preview, value.chars().count())
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::ErrorType;
    use chrono::NaiveDate;

    fn sample() -> ExtractedRecord {
        let mut record = ExtractedRecord::with_fields(FieldName::ALL.iter().copied().filter(|f| f.is_extractable()));
        record.set(FieldName::Category, "Ethics: Level II");
        record.set(FieldName::Result, "Incorrect");
        record.set(FieldName::QuestionText, "Did Smith\nviolate   the Standards?");
        record
    }

    #[test]
    fn missing_fields_read_as_empty() {
        let record = sample();
        assert!(!record.contains(FieldName::Notes));
        assert_eq!(record.get(FieldName::Notes), "");
        assert!(record.contains(FieldName::DifficultyLevel));
        assert_eq!(record.get(FieldName::DifficultyLevel), "");
        assert!(record.is_blank(FieldName::DifficultyLevel));
    }

    #[test]
    fn finalize_then_row_is_in_column_order() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap();
        let annotation = Annotation {
            error_type: ErrorType::WrongFormula,
            notes: "  check\r\nduration  ".to_string(),
            timestamp: at,
        };
        let row = sample().finalize(annotation).to_log_row();
        assert_eq!(row[0], "Ethics: Level II");
        assert_eq!(row[1], "");
        assert_eq!(row[2], "Incorrect");
        assert_eq!(row[3], "Did Smith violate the Standards?");
        assert_eq!(row[4], "Wrong formula/concept");
        assert_eq!(row[8], "check duration");
        assert_eq!(row[9], "2025-01-02 03:04:05");
    }

    #[test]
    fn json_uses_column_labels() {
        let json = sample().to_json_pretty().unwrap();
        assert!(json.contains("\"Question Text\""));
        let back: ExtractedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn preview_truncates_long_values() {
        assert_eq!(log_preview("short"), "short");
        let long = "x".repeat(100);
        assert_eq!(log_preview(&long), format!("{}... [100 chars]", "x".repeat(40)));
    }
}
