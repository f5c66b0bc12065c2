//! annotation.rs - Caller-supplied data attached to a record at save time.
//!
//! The extractor never fills Error Type, Notes or Timestamp. The user picks an
//! error type and may add notes; the timestamp is taken when the row is saved.
//!
//! License: MIT OR APACHE 2.0

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `strftime` format of the Timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Decorative icons shown in front of error type labels in the UI.
const ERROR_TYPE_ICONS: [&str; 4] = ["❌ ", "🔄 ", "⚠️ ", "❓ "];

/// Why a question was missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "Misread the question")]
    MisreadQuestion,
    #[serde(rename = "Wrong formula/concept")]
    WrongFormula,
    #[serde(rename = "Calculation error")]
    CalculationError,
    #[serde(rename = "Uncertain")]
    Uncertain,
}

impl ErrorType {
    pub const ALL: [ErrorType; 4] = [
        ErrorType::MisreadQuestion,
        ErrorType::WrongFormula,
        ErrorType::CalculationError,
        ErrorType::Uncertain,
    ];

    /// The label stored in the log.
    pub fn label(self) -> &'static str {
        match self {
            ErrorType::MisreadQuestion => "Misread the question",
            ErrorType::WrongFormula => "Wrong formula/concept",
            ErrorType::CalculationError => "Calculation error",
            ErrorType::Uncertain => "Uncertain",
        }
    }

    /// Short name accepted on the command line.
    pub fn alias(self) -> &'static str {
        match self {
            ErrorType::MisreadQuestion => "misread",
            ErrorType::WrongFormula => "formula",
            ErrorType::CalculationError => "calculation",
            ErrorType::Uncertain => "uncertain",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ErrorType::MisreadQuestion => ERROR_TYPE_ICONS[0],
            ErrorType::WrongFormula => ERROR_TYPE_ICONS[1],
            ErrorType::CalculationError => ERROR_TYPE_ICONS[2],
            ErrorType::Uncertain => ERROR_TYPE_ICONS[3],
        }
    }

    /// The label with its icon, for display only.
    pub fn display_label(self) -> String {
        format!("{}{}", self.icon(), self.label())
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error type for parsing an unknown error type string.
#[derive(Debug, Clone)]
pub struct ParseErrorTypeError(pub String);

impl fmt::Display for ParseErrorTypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let aliases: Vec<&str> = ErrorType::ALL.iter().map(|e| e.alias()).collect();
        write!(
            f,
            "Invalid error type '{}'; expected one of: {} (or the full label).",
            self.0,
            aliases.join(", ")
        )
    }
}

impl std::error::Error for ParseErrorTypeError {}

impl FromStr for ErrorType {
    type Err = ParseErrorTypeError;

    /// Accepts the stored label, the icon label, or the short alias, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = clean_error_type(s);
        let wanted = cleaned.trim();
        ErrorType::ALL
            .iter()
            .copied()
            .find(|e| e.label().eq_ignore_ascii_case(wanted) || e.alias().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseErrorTypeError(s.to_string()))
    }
}

/// Removes the decorative icon prefixes from an error type label.
///
/// Used on anything headed for the log, including rows imported from older
/// files that stored the icon.
pub fn clean_error_type(error_type: &str) -> String {
    ERROR_TYPE_ICONS
        .iter()
        .fold(error_type.to_string(), |acc, icon| acc.replace(icon, ""))
}

/// Formats a save time the way the Timestamp column stores it.
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Everything the caller adds to an extracted record before it is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub error_type: ErrorType,
    pub notes: String,
    pub timestamp: NaiveDateTime,
}

impl Annotation {
    /// An annotation stamped with the current local time.
    pub fn now(error_type: ErrorType, notes: impl Into<String>) -> Self {
        Self {
            error_type,
            notes: notes.into(),
            timestamp: Local::now().naive_local(),
        }
    }
}
