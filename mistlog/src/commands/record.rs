// mistlog/src/commands/record.rs
//! `mistlog log` and `mistlog error-types`.

use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Write;

use mistlog_core::{log_preview, parse_with_engine, Annotation, ErrorType, ExtractionEngine, FieldName, ParseOutcome};

use super::Ui;
use crate::ui::record_view;
use crate::utils::log_store::MistakeLog;

/// Extracts a record, annotates it and appends it to `store`.
///
/// Returns `true` when a row was saved. An invalid record is written to `out`
/// for inspection and nothing is saved.
pub fn run_log<W: Write>(
    engine: &dyn ExtractionEngine,
    input: &str,
    annotation: Annotation,
    store: &MistakeLog,
    ui: &Ui,
    out: &mut W,
) -> Result<bool> {
    info!("Starting log operation.");
    let record = match parse_with_engine(engine, input) {
        ParseOutcome::NoInput => {
            ui.warn("Nothing to log: the input is empty.");
            return Ok(false);
        }
        ParseOutcome::Invalid { record, missing } => {
            writeln!(out, "{}", record_view::render_record(&record, &missing, &ui.theme, ui.colors))?;
            let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
            ui.error(format!(
                "Could not extract a usable record (missing: {}). Nothing was saved.",
                labels.join(", ")
            ));
            return Ok(false);
        }
        ParseOutcome::Valid(record) => record,
    };

    let record = record.finalize(annotation);
    debug!("Saving question: {}", log_preview(record.get(FieldName::QuestionText)));
    store
        .append(&record.to_log_row())
        .with_context(|| format!("Failed to append to {}", store.path().display()))?;

    ui.success(format!(
        "Saved: {} | {} | {} ({})",
        record.get(FieldName::Category),
        record.get(FieldName::QuestionNumber),
        record.get(FieldName::Result),
        record.get(FieldName::ErrorType),
    ));
    Ok(true)
}

/// Lists the accepted error types: short name, then the label stored in the log.
pub fn run_error_types<W: Write>(out: &mut W) -> Result<()> {
    for error_type in ErrorType::ALL {
        writeln!(out, "{:<12} {}", error_type.alias(), error_type.display_label())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use mistlog_core::RegexEngine;
    use tempfile::tempdir;

    fn ui() -> Ui {
        Ui { theme: ThemeStyle::default_theme_map(), quiet: true, colors: false, stderr_colors: false }
    }

    #[test]
    fn valid_record_is_appended() {
        let dir = tempdir().unwrap();
        let store = MistakeLog::new(dir.path().join("log.csv"));
        let engine = RegexEngine::with_default_rules().unwrap();
        let mut out = Vec::new();

        let saved = run_log(
            &engine,
            "Fixed Income: Level II\nQuestion 4 of 9\nYour result is incorrect.\n",
            Annotation::now(ErrorType::CalculationError, "duration\nconvexity"),
            &store,
            &ui(),
            &mut out,
        )
        .unwrap();

        assert!(saved);
        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][FieldName::Category.column_index()], "Fixed Income: Level II");
        assert_eq!(rows[0][FieldName::ErrorType.column_index()], "Calculation error");
        assert_eq!(rows[0][FieldName::Notes.column_index()], "duration convexity");
    }

    #[test]
    fn invalid_record_is_shown_and_not_saved() {
        let dir = tempdir().unwrap();
        let store = MistakeLog::new(dir.path().join("log.csv"));
        let engine = RegexEngine::with_default_rules().unwrap();
        let mut out = Vec::new();

        let saved = run_log(&engine, "Question 2 of 5", Annotation::now(ErrorType::Uncertain, ""), &store, &ui(), &mut out).unwrap();

        assert!(!saved);
        assert!(!store.path().exists());
        assert!(String::from_utf8(out).unwrap().contains("2 of 5"));
    }

    #[test]
    fn error_types_list_aliases() {
        let mut out = Vec::new();
        run_error_types(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("formula"));
        assert!(text.contains("Wrong formula/concept"));
    }
}
