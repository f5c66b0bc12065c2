// mistlog/src/cli.rs
//! This file defines the command-line interface (CLI) for the mistlog application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default location of the mistake log, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "mistake_log.csv";

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "mistlog",
    author = "Obscura Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log the exam questions you got wrong",
    long_about = "Mistlog reads a pasted question review screen, extracts the category, result, question text, time spent and related fields with an ordered set of regex rules, and appends them with your error type and notes to a CSV mistake log.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the mistlog crates to DEBUG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Explicitly disable debug logging, even if RUST_LOG is set to DEBUG
    #[arg(long = "disable-debug", global = true, help = "Disable debug logging, overriding RUST_LOG.")]
    pub disable_debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The CSV mistake log to read and write.
    #[arg(
        long = "log-file",
        value_name = "FILE",
        env = "MISTLOG_LOG_FILE",
        default_value = DEFAULT_LOG_FILE,
        global = true,
        help = "Path of the CSV mistake log."
    )]
    pub log_file: PathBuf,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `mistlog` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extracts fields from pasted text and shows the result without saving.
    #[command(about = "Extract fields from pasted text and show them without saving.")]
    Parse(ParseCommand),

    /// Extracts, annotates and appends a record to the mistake log.
    #[command(about = "Extract a record, annotate it and append it to the mistake log.")]
    Log(LogCommand),

    /// Shows the most recent log entries, newest first.
    #[command(about = "Show the most recent log entries, newest first.")]
    List {
        /// How many entries to show.
        #[arg(long, short = 'n', default_value_t = 10, help = "Number of recent entries to show.")]
        limit: usize,
    },

    /// Removes entries by their row index.
    #[command(about = "Delete log entries by row index (as shown by `list`).")]
    Delete {
        /// 0-based row indices.
        #[arg(value_name = "ROW", required = true, num_args = 1.., help = "Row indices to delete.")]
        rows: Vec<usize>,

        /// Proceed without a confirmation prompt.
        #[arg(long, short = 'y', help = "Delete without a confirmation prompt.")]
        yes: bool,
    },

    /// Merges older log files into the current log.
    #[command(about = "Merge one or more older log files into the current log.")]
    Import {
        /// Log files to merge.
        #[arg(value_name = "FILE", required = true, num_args = 1.., help = "CSV log files to merge.")]
        files: Vec<PathBuf>,
    },

    /// Writes a cleaned copy of the log.
    #[command(about = "Write a cleaned copy of the log for download or sharing.")]
    Export {
        /// Destination file. Defaults to `mistake_log_MMDD.csv`.
        #[arg(long, short = 'o', value_name = "FILE", help = "Write the export to this file instead of mistake_log_MMDD.csv.")]
        output: Option<PathBuf>,
    },

    /// Lists the accepted error types.
    #[command(about = "List the accepted error types and their short names.")]
    ErrorTypes,
}

/// Where the pasted text comes from, shared by `parse` and `log`.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input: Option<PathBuf>,

    /// Read the pasted text from the system clipboard.
    #[arg(long = "from-clipboard", short = 'c', conflicts_with = "input", help = "Read input from the system clipboard.")]
    pub from_clipboard: bool,

    /// Path to a custom rules file (YAML).
    #[arg(long = "rules", value_name = "FILE", help = "Path to a custom extraction rules file (YAML).")]
    pub rules: Option<PathBuf>,
}

/// Arguments for the `parse` command.
#[derive(Parser, Debug)]
pub struct ParseCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the record as JSON.
    #[arg(long, help = "Print the extracted record as JSON.")]
    pub json: bool,

    /// Show which pattern matched each field.
    #[arg(long, help = "Show which rule pattern produced each field.")]
    pub explain: bool,
}

/// Arguments for the `log` command.
#[derive(Parser, Debug)]
pub struct LogCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Why the question was missed.
    #[arg(long = "error-type", short = 'e', value_name = "TYPE", help = "Error type: misread, formula, calculation, uncertain, or a full label.")]
    pub error_type: mistlog_core::ErrorType,

    /// Free-text notes.
    #[arg(long, short = 'n', default_value = "", help = "Notes to store with the entry.")]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use mistlog_core::ErrorType;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn log_accepts_aliases() {
        let cli = Cli::try_parse_from(["mistlog", "log", "-e", "formula", "--notes", "NPV sign"]).unwrap();
        match cli.command {
            Commands::Log(cmd) => {
                assert_eq!(cmd.error_type, ErrorType::WrongFormula);
                assert_eq!(cmd.notes, "NPV sign");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn delete_requires_rows() {
        assert!(Cli::try_parse_from(["mistlog", "delete"]).is_err());
        let cli = Cli::try_parse_from(["mistlog", "delete", "0", "3", "--yes"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete { ref rows, yes: true } if rows == &vec![0, 3]));
    }
}
