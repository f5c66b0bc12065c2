// mistlog/src/main.rs
//! Mistlog entry point.
//!
//! Parses the command line, sets up logging and the color theme, and
//! dispatches to the subcommand. Exit status is 0 on success, 1 when a record
//! could not be extracted or saved, and 2 on any other error.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::process::ExitCode;

use mistlog::cli::{Cli, Commands};
use mistlog::commands::{self, build_engine, history, parse, record, transfer, Ui};
use mistlog::logger;
use mistlog::ui::theme::{build_theme_map, ThemeStyle};
use mistlog::utils::input::read_input;
use mistlog::MistakeLog;
use mistlog_core::Annotation;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug, cli.disable_debug));

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            commands::error_msg(format!("{:#}", e), &ThemeStyle::default_theme_map());
            ExitCode::from(2)
        }
    }
}

fn status(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let theme = build_theme_map(cli.theme.as_ref()).context("Theme error")?;
    let ui = Ui::new(theme, cli.quiet);
    let store = MistakeLog::new(cli.log_file);
    let mut stdout = io::stdout().lock();

    let code = match cli.command {
        Commands::Parse(cmd) => {
            let engine = build_engine(cmd.input.rules.as_deref())?;
            let opts = parse::ParseOptions { input: read_input(&cmd.input)?, json: cmd.json, explain: cmd.explain };
            status(parse::run_parse(&engine, &opts, &ui, &mut stdout)?.is_valid())
        }
        Commands::Log(cmd) => {
            let engine = build_engine(cmd.input.rules.as_deref())?;
            let input = read_input(&cmd.input)?;
            let annotation = Annotation::now(cmd.error_type, cmd.notes);
            status(record::run_log(&engine, &input, annotation, &store, &ui, &mut stdout)?)
        }
        Commands::List { limit } => {
            history::run_list(&store, limit, &ui, &mut stdout)?;
            ExitCode::SUCCESS
        }
        Commands::Delete { rows, yes } => {
            history::run_delete(&store, &rows, yes, &ui, &mut io::stdin().lock(), &mut io::stderr())?;
            ExitCode::SUCCESS
        }
        Commands::Import { files } => {
            transfer::run_import(&store, &files, &ui)?;
            ExitCode::SUCCESS
        }
        Commands::Export { output } => {
            transfer::run_export(&store, output.as_deref(), &ui)?;
            ExitCode::SUCCESS
        }
        Commands::ErrorTypes => {
            record::run_error_types(&mut stdout)?;
            ExitCode::SUCCESS
        }
    };
    Ok(code)
}
