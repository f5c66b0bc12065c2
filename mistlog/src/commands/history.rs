// mistlog/src/commands/history.rs
//! `mistlog list` and `mistlog delete`.

use anyhow::{Context, Result};
use log::info;
use std::io::{BufRead, Write};

use super::Ui;
use crate::ui::{output_format, record_view};
use crate::utils::log_store::{DeleteReport, MistakeLog};

/// Writes the newest `limit` entries, newest first, followed by the total count.
pub fn run_list<W: Write>(store: &MistakeLog, limit: usize, ui: &Ui, out: &mut W) -> Result<()> {
    let rows = store
        .read_all()
        .with_context(|| format!("Failed to read {}", store.path().display()))?;
    if rows.is_empty() {
        ui.info("The mistake log is empty.");
        return Ok(());
    }

    let recent: Vec<_> = rows.iter().enumerate().rev().take(limit).collect();
    writeln!(out, "{}", record_view::render_history(&recent, &ui.theme, ui.colors))?;
    writeln!(out, "Showing {} of {} entries (newest first).", recent.len(), rows.len())?;
    Ok(())
}

/// Deletes rows by index after confirmation, unless `yes` is set.
///
/// The prompt goes to `prompt_out` and the answer is read from `confirm`; the
/// binary passes stderr and stdin.
pub fn run_delete<R: BufRead, P: Write>(
    store: &MistakeLog,
    rows: &[usize],
    yes: bool,
    ui: &Ui,
    confirm: &mut R,
    prompt_out: &mut P,
) -> Result<DeleteReport> {
    info!("Starting delete operation for rows {:?}.", rows);
    if !yes {
        let prompt = format!("Delete {} entr{}? (y/N): ", rows.len(), if rows.len() == 1 { "y" } else { "ies" });
        output_format::print_prompt(prompt_out, &prompt, &ui.theme, ui.stderr_colors)?;
        let mut answer = String::new();
        confirm.read_line(&mut answer).context("Failed to read confirmation input.")?;
        if answer.trim().to_lowercase() != "y" {
            ui.info("Nothing deleted.");
            return Ok(DeleteReport::default());
        }
    }

    let report = store
        .delete_rows(rows)
        .with_context(|| format!("Failed to update {}", store.path().display()))?;
    for index in &report.out_of_range {
        ui.warn(format!("Row {} does not exist; skipped.", index));
    }
    if !report.removed.is_empty() {
        ui.success(format!("Deleted {} entr{}.", report.removed.len(), if report.removed.len() == 1 { "y" } else { "ies" }));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use mistlog_core::{FieldName, LogRow};
    use tempfile::tempdir;

    fn ui() -> Ui {
        Ui { theme: ThemeStyle::default_theme_map(), quiet: true, colors: false, stderr_colors: false }
    }

    fn seeded(dir: &std::path::Path, n: usize) -> MistakeLog {
        let store = MistakeLog::new(dir.join("log.csv"));
        let rows: Vec<LogRow> = (0..n)
            .map(|i| {
                let mut row: LogRow = Default::default();
                row[FieldName::Category.column_index()] = format!("Topic {}", i);
                row[FieldName::Timestamp.column_index()] = format!("2024-05-01 09:00:0{}", i);
                row
            })
            .collect();
        store.write_all(&rows).unwrap();
        store
    }

    #[test]
    fn list_is_newest_first_and_limited() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), 4);
        let mut out = Vec::new();
        run_list(&store, 2, &ui(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let newest = text.find("Topic 3").unwrap();
        let older = text.find("Topic 2").unwrap();
        assert!(newest < older);
        assert!(!text.contains("Topic 1"));
        assert!(text.contains("Showing 2 of 4 entries"));
    }

    #[test]
    fn declined_confirmation_keeps_rows() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), 2);
        let report = run_delete(&store, &[0], false, &ui(), &mut "n\n".as_bytes(), &mut Vec::new()).unwrap();
        assert!(report.removed.is_empty());
        assert_eq!(store.read_all().unwrap().len(), 2);
    }

    #[test]
    fn confirmed_delete_reports_out_of_range() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), 3);
        let report = run_delete(&store, &[1, 7], false, &ui(), &mut "y\n".as_bytes(), &mut Vec::new()).unwrap();
        assert_eq!(report.removed, vec![1]);
        assert_eq!(report.out_of_range, vec![7]);
        let left: Vec<String> = store.read_all().unwrap().iter().map(|r| r[0].clone()).collect();
        assert_eq!(left, vec!["Topic 0".to_string(), "Topic 2".to_string()]);
    }

    #[test]
    fn prompt_colors_follow_stderr_not_stdout() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), 1);
        let ui = Ui { colors: true, stderr_colors: false, ..ui() };
        let mut prompt = Vec::new();
        run_delete(&store, &[0], false, &ui, &mut "n\n".as_bytes(), &mut prompt).unwrap();
        assert_eq!(String::from_utf8(prompt).unwrap(), "Delete 1 entry? (y/N): ");

        let ui = Ui { colors: false, stderr_colors: true, ..ui };
        let mut prompt = Vec::new();
        run_delete(&store, &[0], false, &ui, &mut "n\n".as_bytes(), &mut prompt).unwrap();
        assert!(String::from_utf8(prompt).unwrap().contains("\x1b["));
    }
}
