// File: mistlog-core/src/validators.rs
//! Decides whether an extracted record is usable.
//!
//! Only Category and Result are mandatory. Question Number and Question Text
//! are informative but a record without them is still accepted, since the
//! user can fill the gaps by hand later.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::field::FieldName;
use crate::record::ExtractedRecord;

/// Returns `true` when a record exists and its mandatory fields are non-blank.
pub fn is_valid_record(record: Option<&ExtractedRecord>) -> bool {
    let Some(record) = record else {
        debug!("No record to validate.");
        return false;
    };

    let missing = missing_mandatory_fields(record);
    if !missing.is_empty() {
        debug!("Record rejected; blank mandatory fields: {:?}", missing);
        return false;
    }

    if record.is_blank(FieldName::QuestionNumber) && record.is_blank(FieldName::QuestionText) {
        debug!("Record accepted without question number or text.");
    }
    true
}

/// Lists the mandatory fields that are absent or blank, in column order.
pub fn missing_mandatory_fields(record: &ExtractedRecord) -> Vec<FieldName> {
    FieldName::MANDATORY
        .iter()
        .copied()
        .filter(|field| record.is_blank(*field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, result: &str) -> ExtractedRecord {
        let mut r = ExtractedRecord::with_fields(FieldName::ALL.iter().copied().filter(|f| f.is_extractable()));
        r.set(FieldName::Category, category);
        r.set(FieldName::Result, result);
        r
    }

    #[test]
    fn none_is_invalid() {
        assert!(!is_valid_record(None));
    }

    #[test]
    fn category_and_result_suffice() {
        assert!(is_valid_record(Some(&record("Ethics: Level II", "Correct"))));
    }

    #[test]
    fn blank_category_is_rejected_even_with_question_text() {
        let mut r = record("", "Correct");
        r.set(FieldName::QuestionText, "A long and well formed question about ethics and standards? ".repeat(5));
        r.set(FieldName::QuestionNumber, "1 of 1");
        assert!(!is_valid_record(Some(&r)));
        assert_eq!(missing_mandatory_fields(&r), vec![FieldName::Category]);
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let r = record("  \n", "\t");
        assert!(!is_valid_record(Some(&r)));
        assert_eq!(missing_mandatory_fields(&r), vec![FieldName::Category, FieldName::Result]);
    }

    #[test]
    fn absent_fields_count_as_blank() {
        let r = ExtractedRecord::default();
        assert!(!is_valid_record(Some(&r)));
    }
}
