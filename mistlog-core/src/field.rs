//! field.rs - The fixed set of named fields a mistake record carries.
//!
//! `FieldName` doubles as the column schema of the persisted log: its
//! declaration order is the column order, and its label is the column header.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One named attribute of a mistake record.
///
/// The derived `Ord` follows declaration order, which is the log's column
/// order, so a `BTreeMap<FieldName, _>` iterates in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldName {
    #[serde(rename = "Category")]
    Category,
    #[serde(rename = "Question Number")]
    QuestionNumber,
    #[serde(rename = "Result")]
    Result,
    #[serde(rename = "Question Text")]
    QuestionText,
    #[serde(rename = "Error Type")]
    ErrorType,
    #[serde(rename = "Confidence Level")]
    ConfidenceLevel,
    #[serde(rename = "Time Spent")]
    TimeSpent,
    #[serde(rename = "Difficulty Level")]
    DifficultyLevel,
    #[serde(rename = "Notes")]
    Notes,
    #[serde(rename = "Timestamp")]
    Timestamp,
}

impl FieldName {
    /// Every field, in log column order.
    pub const ALL: [FieldName; 10] = [
        FieldName::Category,
        FieldName::QuestionNumber,
        FieldName::Result,
        FieldName::QuestionText,
        FieldName::ErrorType,
        FieldName::ConfidenceLevel,
        FieldName::TimeSpent,
        FieldName::DifficultyLevel,
        FieldName::Notes,
        FieldName::Timestamp,
    ];

    /// Fields that must be non-blank for a record to be usable.
    pub const MANDATORY: [FieldName; 2] = [FieldName::Category, FieldName::Result];

    /// The column header used in the log file.
    pub fn label(self) -> &'static str {
        match self {
            FieldName::Category => "Category",
            FieldName::QuestionNumber => "Question Number",
            FieldName::Result => "Result",
            FieldName::QuestionText => "Question Text",
            FieldName::ErrorType => "Error Type",
            FieldName::ConfidenceLevel => "Confidence Level",
            FieldName::TimeSpent => "Time Spent",
            FieldName::DifficultyLevel => "Difficulty Level",
            FieldName::Notes => "Notes",
            FieldName::Timestamp => "Timestamp",
        }
    }

    /// Whether the extractor may produce this field.
    ///
    /// Error Type, Notes and Timestamp are supplied by the caller at save time.
    pub fn is_extractable(self) -> bool {
        !matches!(self, FieldName::ErrorType | FieldName::Notes | FieldName::Timestamp)
    }

    /// Zero-based column position in the log.
    pub fn column_index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not a known field label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldNameError(pub String);

impl fmt::Display for ParseFieldNameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unknown field '{}'; expected one of: ", self.0)?;
        let labels: Vec<&str> = FieldName::ALL.iter().map(|f| f.label()).collect();
        write!(f, "{}.", labels.join(", "))
    }
}

impl std::error::Error for ParseFieldNameError {}

impl FromStr for FieldName {
    type Err = ParseFieldNameError;

    /// Parses a column label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FieldName::ALL
            .iter()
            .copied()
            .find(|f| f.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseFieldNameError(s.to_string()))
    }
}
