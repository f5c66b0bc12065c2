//! Configuration management for `mistlog-core`.
//!
//! This module defines the rule table: for every extractable field, an ordered
//! list of regex patterns. It handles deserialization of YAML rule files and
//! provides utilities for loading, merging, and validating them.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::field::FieldName;
use crate::rules::compiler::compile_pattern;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

fn default_true() -> bool {
    true
}

/// The ordered candidate patterns for one field.
///
/// Patterns are tried in listed order and the first match wins. The order is
/// fixed once the rule is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct FieldRule {
    /// The field this rule fills.
    pub field: FieldName,
    /// Human-readable description of what the rule targets.
    #[serde(default)]
    pub description: Option<String>,
    /// Regex patterns, highest precedence first. Each may define at most one capture group.
    pub patterns: Vec<String>,
    /// Match letters regardless of case.
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries.
    #[serde(default = "default_true")]
    pub multiline: bool,
    /// `.` also matches line terminators.
    #[serde(default = "default_true")]
    pub dot_matches_new_line: bool,
}

impl FieldRule {
    /// Builds a rule with the default flags (case-insensitive, multi-line, dot-all).
    pub fn new<I, S>(field: FieldName, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field,
            description: None,
            patterns: patterns.into_iter().map(Into::into).collect(),
            case_insensitive: true,
            multiline: true,
            dot_matches_new_line: true,
        }
    }
}

/// Represents the top-level rule table configuration.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// One entry per extractable field.
    pub rules: Vec<FieldRule>,
}

impl ExtractionConfig {
    /// Loads field rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        let config: ExtractionConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse rules file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} field rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the default rule table from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: ExtractionConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default rules")?;

        debug!("Loaded {} default field rules.", config.rules.len());
        Ok(config)
    }

    /// Returns the rule for `field`, if the table has one.
    pub fn rule_for(&self, field: FieldName) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// The fields this table covers, in rule order.
    pub fn fields(&self) -> Vec<FieldName> {
        self.rules.iter().map(|r| r.field).collect()
    }
}

/// Merges user-defined field rules with defaults.
///
/// A user rule replaces the default rule for the same field wholesale; its
/// pattern list is not appended to the default one. The result is ordered by
/// column order.
pub fn merge_rules(
    default_config: ExtractionConfig,
    user_config: Option<ExtractionConfig>,
) -> ExtractionConfig {
    debug!("merge_rules called. Initial default rules count: {}", default_config.rules.len());

    let mut final_rules_map: BTreeMap<FieldName, FieldRule> = default_config
        .rules
        .into_iter()
        .map(|rule| (rule.field, rule))
        .collect();

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
        for user_rule in user_cfg.rules {
            debug!("Overriding patterns for field '{}'.", user_rule.field);
            final_rules_map.insert(user_rule.field, user_rule);
        }
    }

    let final_rules: Vec<FieldRule> = final_rules_map.into_values().collect();
    debug!("Final total rules after merge: {}", final_rules.len());

    ExtractionConfig { rules: final_rules }
}

/// Validates rule integrity: target field, duplicates, and that every pattern
/// compiles with its rule's flags, fits `MAX_PATTERN_LENGTH` and has at most
/// one capture group.
pub fn validate_rules(rules: &[FieldRule]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if !rule.field.is_extractable() {
            errors.push(format!(
                "Field '{}' is filled in at save time and cannot have extraction rules.",
                rule.field
            ));
        }
        if !seen.insert(rule.field) {
            errors.push(format!("Duplicate rule for field '{}'.", rule.field));
        }
        if rule.patterns.is_empty() {
            errors.push(format!("Field '{}' has no patterns.", rule.field));
        }

        for (index, pattern) in rule.patterns.iter().enumerate() {
            if pattern.is_empty() {
                errors.push(format!("Field '{}': pattern #{} is empty.", rule.field, index));
                continue;
            }
            if let Err(e) = compile_pattern(rule, index, pattern) {
                errors.push(e.to_string());
            }
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Rule validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}
