// mistlog-core/src/engines/regex_engine.rs
//! An `ExtractionEngine` implementation that walks an ordered chain of
//! regular expressions per field and keeps the first hit.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::{debug, trace};
use std::sync::Arc;

use crate::config::ExtractionConfig;
use crate::engine::{ExtractionEngine, FieldTrace};
use crate::normalizers::normalize_field;
use crate::record::{log_preview, ExtractedRecord};
use crate::rules::compiler::{get_or_compile_rules, CompiledFieldRule, CompiledRules};

#[derive(Debug)]
pub struct RegexEngine {
    compiled_rules: Arc<CompiledRules>,
    config: ExtractionConfig,
}

impl RegexEngine {
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile field rules for RegexEngine")?;

        Ok(Self { compiled_rules, config })
    }

    /// An engine over the embedded default rule table.
    pub fn with_default_rules() -> Result<Self> {
        Self::new(ExtractionConfig::load_default_rules()?)
    }

    /// Runs one field's pattern chain against the whole text.
    ///
    /// Returns the index of the first matching pattern and its trimmed value:
    /// capture group 1 when the pattern has one, the whole match otherwise.
    fn first_match(rule: &CompiledFieldRule, text: &str) -> Option<(usize, String)> {
        for pattern in &rule.patterns {
            let Some(caps) = pattern.regex.captures(text) else {
                trace!("Field '{}': pattern #{} did not match.", rule.field, pattern.index);
                continue;
            };
            let value = if pattern.has_capture_group() {
                caps.get(1).map_or("", |m| m.as_str())
            } else {
                caps.get(0).map_or("", |m| m.as_str())
            };
            return Some((pattern.index, value.trim().to_string()));
        }
        None
    }

    fn run(&self, raw_text: &str) -> Option<(ExtractedRecord, Vec<FieldTrace>)> {
        if raw_text.trim().is_empty() {
            debug!("Input is empty; nothing to parse.");
            return None;
        }

        let mut record = ExtractedRecord::with_fields(self.compiled_rules.fields());
        let mut traces = Vec::with_capacity(self.compiled_rules.rules.len());

        for rule in &self.compiled_rules.rules {
            match Self::first_match(rule, raw_text) {
                Some((index, raw_value)) => {
                    let value = normalize_field(rule.field, &raw_value);
                    debug!(
                        "Field '{}' matched pattern #{}: {}",
                        rule.field,
                        index,
                        log_preview(&value)
                    );
                    record.set(rule.field, value);
                    traces.push(FieldTrace { field: rule.field, matched_pattern: Some(index), raw_value });
                }
                None => {
                    debug!("Field '{}' matched no pattern.", rule.field);
                    traces.push(FieldTrace { field: rule.field, matched_pattern: None, raw_value: String::new() });
                }
            }
        }

        Some((record, traces))
    }
}

impl ExtractionEngine for RegexEngine {
    fn extract(&self, raw_text: &str) -> Option<ExtractedRecord> {
        self.run(raw_text).map(|(record, _)| record)
    }

    fn extract_with_trace(&self, raw_text: &str) -> Option<(ExtractedRecord, Vec<FieldTrace>)> {
        self.run(raw_text)
    }

    fn compiled_rules(&self) -> &CompiledRules { &self.compiled_rules }
    fn get_rules(&self) -> &ExtractionConfig { &self.config }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldRule;
    use crate::field::FieldName;

    const REVIEW_SCREEN: &str = "Done Practicing\n\
        Question 1 of 1\n\
        Your result is correct.\n\
        Ethical and Professional Standards: Level II\n\
        Question\n\
        Smith, a portfolio manager, trades ahead of client orders. Did Smith violate the Standards?\n\
        A.\n\
        No\n\
        B.\n\
        Yes\n\
        Solution\n\
        B is correct.\n\
        Confidence Level: High\n\
        Time Spent:\n\
        This Question:01:36\n\
        Difficulty Level: Medium\n";

    fn engine() -> RegexEngine {
        RegexEngine::with_default_rules().unwrap()
    }

    #[test]
    fn whitespace_only_input_yields_no_record() {
        let engine = engine();
        assert!(engine.extract("").is_none());
        assert!(engine.extract("   ").is_none());
        assert!(engine.extract("\n\t\r\n").is_none());
    }

    #[test]
    fn extracts_review_screen() {
        let record = engine().extract(REVIEW_SCREEN).unwrap();
        assert_eq!(record.get(FieldName::Category), "Ethical and Professional Standards: Level II");
        assert_eq!(record.get(FieldName::QuestionNumber), "1 of 1");
        assert_eq!(record.get(FieldName::Result), "Correct");
        assert_eq!(
            record.get(FieldName::QuestionText),
            "Smith, a portfolio manager, trades ahead of client orders. Did Smith violate the Standards?"
        );
        assert_eq!(record.get(FieldName::ConfidenceLevel), "High");
        assert_eq!(record.get(FieldName::TimeSpent), "1 mins 36 secs");
        assert_eq!(record.get(FieldName::DifficultyLevel), "Medium");
    }

    #[test]
    fn every_rule_field_is_present_even_when_unmatched() {
        let record = engine().extract("nothing useful here").unwrap();
        for field in FieldName::ALL.iter().filter(|f| f.is_extractable()) {
            assert!(record.contains(*field), "{} missing", field);
        }
        assert_eq!(record.get(FieldName::QuestionNumber), "");
        assert_eq!(record.get(FieldName::Result), "");
        assert!(!record.contains(FieldName::Notes));
    }

    #[test]
    fn first_listed_pattern_wins() {
        let config = ExtractionConfig {
            rules: vec![FieldRule::new(FieldName::Result, [r"second (\w+)", r"first (\w+)"])],
        };
        let engine = RegexEngine::new(config).unwrap();
        let (record, traces) = engine.extract_with_trace("first alpha, second beta").unwrap();
        assert_eq!(record.get(FieldName::Result), "Beta");
        assert_eq!(traces[0].matched_pattern, Some(0));
        assert_eq!(traces[0].raw_value, "beta");
    }

    #[test]
    fn pattern_without_group_uses_whole_match() {
        let record = engine().extract("Application of the Code and Standards: Level II\nYour result is Incorrect.").unwrap();
        assert_eq!(record.get(FieldName::Category), "Application of the Code and Standards: Level II");
        assert_eq!(record.get(FieldName::Result), "Incorrect");
    }

    #[test]
    fn matching_is_case_insensitive_and_spans_lines() {
        let record = engine().extract("intro\nQUESTION\nWhich rate\napplies?\nA. 5%\n").unwrap();
        assert_eq!(record.get(FieldName::QuestionText), "Which rate\napplies?");
    }

    #[test]
    fn time_in_seconds_and_total_forms() {
        let engine = engine();
        let record = engine.extract("Time Spent: 3 secs\n").unwrap();
        assert_eq!(record.get(FieldName::TimeSpent), "3 secs");
        let record = engine.extract("Total: 00:03\nThis Question:01:36").unwrap();
        assert_eq!(record.get(FieldName::TimeSpent), "3 secs");
    }

    #[test]
    fn trace_reports_unmatched_fields() {
        let (_, traces) = engine().extract_with_trace("Your result is Correct.").unwrap();
        let difficulty = traces.iter().find(|t| t.field == FieldName::DifficultyLevel).unwrap();
        assert_eq!(difficulty.matched_pattern, None);
        let result = traces.iter().find(|t| t.field == FieldName::Result).unwrap();
        assert_eq!(result.matched_pattern, Some(0));
    }
}
