//! compiler.rs - Manages the compilation and caching of field rules.
//!
//! This module converts an `ExtractionConfig` into `CompiledRules`. Compiled
//! tables are immutable once built and are shared through a global cache keyed
//! by a hash of the configuration, so the default table is compiled once per
//! process.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{ExtractionConfig, FieldRule, MAX_PATTERN_LENGTH};
use crate::errors::MistlogError;
use crate::field::FieldName;

/// A single compiled pattern of a field rule.
#[derive(Debug)]
pub struct CompiledPattern {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// Position of this pattern in its rule's list.
    pub index: usize,
}

impl CompiledPattern {
    /// Whether the value comes from capture group 1 rather than the whole match.
    pub fn has_capture_group(&self) -> bool {
        self.regex.captures_len() > 1
    }
}

/// The compiled, ordered pattern chain for one field.
#[derive(Debug)]
pub struct CompiledFieldRule {
    pub field: FieldName,
    /// Patterns in precedence order.
    pub patterns: Vec<CompiledPattern>,
}

/// The compiled rule table, one chain per extractable field.
#[derive(Debug)]
pub struct CompiledRules {
    pub rules: Vec<CompiledFieldRule>,
}

impl CompiledRules {
    /// The fields covered by this table.
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.rules.iter().map(|r| r.field)
    }
}

lazy_static! {
    /// A thread-safe, global cache for compiled rule tables.
    /// The key is a hash of the `ExtractionConfig`.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<CompiledRules>>> = RwLock::new(HashMap::new());
}

/// Hashes the `ExtractionConfig` to create a stable key for the cache.
///
/// Rules are sorted by field first; pattern order inside a rule is part of the key.
fn hash_config(config: &ExtractionConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    let mut rules_to_hash = config.rules.clone();
    rules_to_hash.sort_by_key(|r| r.field);
    rules_to_hash.hash(&mut hasher);
    hasher.finish()
}

/// Compiles one pattern with its rule's flags, enforcing the length and
/// capture-group limits.
pub(crate) fn compile_pattern(rule: &FieldRule, index: usize, pattern: &str) -> Result<CompiledPattern, MistlogError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(MistlogError::PatternLengthExceeded(
            rule.field,
            index,
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(rule.case_insensitive)
        .multi_line(rule.multiline)
        .dot_matches_new_line(rule.dot_matches_new_line)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|e| MistlogError::RuleCompilationError(rule.field, index, e))?;

    // captures_len counts the implicit whole-match group.
    let groups = regex.captures_len() - 1;
    if groups > 1 {
        return Err(MistlogError::TooManyCaptureGroups(rule.field, index, groups));
    }

    Ok(CompiledPattern { regex, index })
}

/// Compiles a list of `FieldRule`s into `CompiledRules`.
/// This is the low-level function that performs the actual regex compilation.
pub fn compile_rules(rules_to_compile: &[FieldRule]) -> Result<CompiledRules, MistlogError> {
    debug!("Starting compilation of {} field rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::with_capacity(rules_to_compile.len());
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        let mut patterns = Vec::with_capacity(rule.patterns.len());
        for (index, pattern) in rule.patterns.iter().enumerate() {
            match compile_pattern(rule, index, pattern) {
                Ok(compiled) => patterns.push(compiled),
                Err(e) => compilation_errors.push(e),
            }
        }
        log::debug!(
            target: "mistlog_core::rules",
            "Field '{}' compiled with {} pattern(s).",
            rule.field,
            patterns.len()
        );
        compiled_rules.push(CompiledFieldRule { field: rule.field, patterns });
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(MistlogError::Fatal(format!(
            "Failed to compile {} pattern(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!("Finished compiling rules. Total fields compiled: {}.", compiled_rules.len());
        Ok(CompiledRules { rules: compiled_rules })
    }
}

/// Gets a `CompiledRules` instance from the cache or compiles it if not found.
pub fn get_or_compile_rules(config: &ExtractionConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_RULES_CACHE
            .read()
            .map_err(|_| anyhow!("Compiled rules cache lock is poisoned"))?;
        if let Some(rules) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", cache_key);
            return Ok(Arc::clone(rules));
        }
    }

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled_arc = Arc::new(compile_rules(&config.rules)?);

    let mut cache = COMPILED_RULES_CACHE
        .write()
        .map_err(|_| anyhow!("Compiled rules cache lock is poisoned"))?;
    // Another thread may have won the race; keep whichever landed first.
    let entry = cache.entry(cache_key).or_insert_with(|| Arc::clone(&compiled_arc));

    debug!("Compiled rules cached for key: {}", cache_key);
    Ok(Arc::clone(entry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_default_table() {
        let config = ExtractionConfig::load_default_rules().unwrap();
        let compiled = compile_rules(&config.rules).unwrap();
        assert_eq!(compiled.rules.len(), config.rules.len());
        let category = &compiled.rules[0];
        assert_eq!(category.field, FieldName::Category);
        assert!(!category.patterns[0].has_capture_group());
        assert!(category.patterns[1].has_capture_group());
        assert!(category.patterns.iter().enumerate().all(|(i, p)| p.index == i));
    }

    #[test]
    fn rejects_more_than_one_capture_group() {
        let rules = vec![FieldRule::new(FieldName::Result, [r"(Your) result is (\w+)"])];
        let err = compile_rules(&rules).unwrap_err().to_string();
        assert!(err.contains("defines 2 capture groups"), "{}", err);
    }

    #[test]
    fn non_capturing_groups_do_not_count() {
        let rules = vec![FieldRule::new(FieldName::Result, [r"(?:Your) result is (\w+)(?:\.|$)"])];
        let compiled = compile_rules(&rules).unwrap();
        assert!(compiled.rules[0].patterns[0].has_capture_group());
    }

    #[test]
    fn rejects_overlong_patterns() {
        let long = "a".repeat(MAX_PATTERN_LENGTH + 1);
        let rules = vec![FieldRule::new(FieldName::Notes, [long])];
        let err = compile_rules(&rules).unwrap_err().to_string();
        assert!(err.contains("exceeds maximum allowed"));
    }

    #[test]
    fn cache_returns_shared_table() {
        let config = ExtractionConfig::load_default_rules().unwrap();
        let a = get_or_compile_rules(&config).unwrap();
        let b = get_or_compile_rules(&config).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
