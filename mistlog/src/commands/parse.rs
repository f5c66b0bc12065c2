// mistlog/src/commands/parse.rs
//! `mistlog parse`: show what the rules extract, without saving anything.

use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::json;
use std::io::Write;

use mistlog_core::{ExtractionEngine, FieldName, FieldTrace, ParseOutcome};

use super::Ui;
use crate::ui::record_view;

/// Options for the `parse` command.
pub struct ParseOptions {
    pub input: String,
    pub json: bool,
    pub explain: bool,
}

/// Extracts and validates the input, writes the record to `out`, and returns the outcome.
pub fn run_parse<W: Write>(engine: &dyn ExtractionEngine, opts: &ParseOptions, ui: &Ui, out: &mut W) -> Result<ParseOutcome> {
    info!("Starting parse operation.");
    let Some((record, traces)) = engine.extract_with_trace(&opts.input) else {
        ui.warn("Nothing to parse: the input is empty.");
        return Ok(ParseOutcome::NoInput);
    };
    let outcome = ParseOutcome::from_record(record);
    let missing: &[FieldName] = match &outcome {
        ParseOutcome::Invalid { missing, .. } => missing,
        _ => &[],
    };
    let Some(record) = outcome.record() else {
        return Ok(outcome);
    };
    debug!("Parsed {} field(s), {} mandatory missing", record.len(), missing.len());

    if opts.json {
        let mut doc = json!({
            "valid": outcome.is_valid(),
            "missing": missing.iter().map(|f| f.label()).collect::<Vec<_>>(),
            "record": record,
        });
        if opts.explain {
            doc["trace"] = trace_json(&traces);
        }
        let text = serde_json::to_string_pretty(&doc).context("Failed to serialize record")?;
        writeln!(out, "{}", text)?;
    } else {
        writeln!(out, "{}", record_view::render_record(record, missing, &ui.theme, ui.colors))?;
        if opts.explain {
            writeln!(out, "{}", record_view::render_trace(&traces, &ui.theme, ui.colors))?;
        }
    }

    if missing.is_empty() {
        ui.success("Record is valid.");
    } else {
        let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
        ui.warn(format!("Record is not valid; missing: {}", labels.join(", ")));
    }
    Ok(outcome)
}

/// `pattern` is the 0-based position in the rule, as in the `--explain` table.
fn trace_json(traces: &[FieldTrace]) -> serde_json::Value {
    traces
        .iter()
        .map(|t| {
            json!({
                "field": t.field.label(),
                "pattern": t.matched_pattern,
                "raw": t.raw_value,
            })
        })
        .collect()
}
