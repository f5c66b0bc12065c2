// mistlog/src/commands/transfer.rs
//! `mistlog import` and `mistlog export`.

use anyhow::{Context, Result};
use chrono::Local;
use log::info;
use std::path::{Path, PathBuf};

use super::Ui;
use crate::utils::log_store::{MergeReport, MistakeLog};

/// File name used by `export` when no output path is given, e.g. `mistake_log_0315.csv`.
pub fn default_export_name() -> PathBuf {
    PathBuf::from(format!("mistake_log_{}.csv", Local::now().format("%m%d")))
}

/// Merges `files` into the current log.
pub fn run_import(store: &MistakeLog, files: &[PathBuf], ui: &Ui) -> Result<MergeReport> {
    info!("Starting import of {} file(s).", files.len());
    let report = store
        .merge_from(files)
        .with_context(|| format!("Failed to merge into {}", store.path().display()))?;
    ui.success(format!(
        "Merged {} file(s): {} row(s) read, {} entr{} in the log.",
        report.files_merged,
        report.rows_imported,
        report.total_rows,
        if report.total_rows == 1 { "y" } else { "ies" }
    ));
    Ok(report)
}

/// Writes a cleaned copy of the log and returns where it went.
///
/// Returns `None` when there is nothing to export.
pub fn run_export(store: &MistakeLog, output: Option<&Path>, ui: &Ui) -> Result<Option<PathBuf>> {
    let rows = store
        .read_all()
        .with_context(|| format!("Failed to read {}", store.path().display()))?;
    if rows.is_empty() {
        ui.warn("No entries to export.");
        return Ok(None);
    }

    let dest = output.map(Path::to_path_buf).unwrap_or_else(default_export_name);
    let count = store
        .export_to(&dest)
        .with_context(|| format!("Failed to export to {}", dest.display()))?;
    ui.success(format!("Exported {} row(s) to {}", count, dest.display()));
    Ok(Some(dest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_export_name_has_month_and_day() {
        let name = default_export_name().to_string_lossy().into_owned();
        assert!(name.starts_with("mistake_log_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "mistake_log_0101.csv".len());
    }
}
