// mistlog/src/commands/mod.rs
//! Subcommand implementations.
//!
//! Data (records, tables, JSON) goes to the writer handed in by the caller,
//! normally stdout. Status messages go to stderr through [`Ui`].

pub mod history;
pub mod parse;
pub mod record;
pub mod transfer;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;
use std::io;
use std::path::Path;

use mistlog_core::{merge_rules, ExtractionConfig, RegexEngine};

use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing success messages to stderr.
pub fn success_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Theme and verbosity shared by every command.
#[derive(Debug, Clone)]
pub struct Ui {
    pub theme: ThemeMap,
    pub quiet: bool,
    /// Whether tables written to the data writer may carry colors.
    pub colors: bool,
    /// Whether text written straight to stderr, such as prompts, may carry colors.
    pub stderr_colors: bool,
}

impl Ui {
    pub fn new(theme: ThemeMap, quiet: bool) -> Self {
        Self { theme, quiet, colors: io::stdout().is_terminal(), stderr_colors: io::stderr().is_terminal() }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            info_msg(msg, &self.theme);
        }
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            success_msg(msg, &self.theme);
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        warn_msg(msg, &self.theme);
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        error_msg(msg, &self.theme);
    }
}

/// Builds the extraction engine from the built-in rules, with `rules_file`
/// replacing the patterns of any field it lists.
pub fn build_engine(rules_file: Option<&Path>) -> Result<RegexEngine> {
    let defaults = ExtractionConfig::load_default_rules()?;
    let config = match rules_file {
        Some(path) => {
            let user = ExtractionConfig::load_from_file(path)?;
            info!("Loaded {} custom rule(s) from {}", user.rules.len(), path.display());
            merge_rules(defaults, Some(user))
        }
        None => defaults,
    };
    RegexEngine::new(config).context("Failed to build the extraction engine")
}
