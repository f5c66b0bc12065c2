//! Table rendering for extracted records, pattern traces and log history.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use owo_colors::AnsiColors;

use mistlog_core::{ExtractedRecord, FieldName, FieldTrace, LogRow};

use super::theme::{ThemeEntry, ThemeMap};

/// Placeholder shown for a mandatory field that came out empty.
pub const MISSING_MARKER: &str = "(missing)";

/// Log columns shown by `list`; the rest stay in the file.
const HISTORY_COLUMNS: [FieldName; 7] = [
    FieldName::Timestamp,
    FieldName::Category,
    FieldName::QuestionNumber,
    FieldName::Result,
    FieldName::ErrorType,
    FieldName::TimeSpent,
    FieldName::Notes,
];

fn table_color(entry: ThemeEntry, theme: &ThemeMap) -> Option<Color> {
    let ansi = theme.get(&entry)?.fg.as_ref()?.to_ansi_color();
    Some(match ansi {
        AnsiColors::Black => Color::Black,
        AnsiColors::Red => Color::DarkRed,
        AnsiColors::Green => Color::DarkGreen,
        AnsiColors::Yellow => Color::DarkYellow,
        AnsiColors::Blue => Color::DarkBlue,
        AnsiColors::Magenta => Color::DarkMagenta,
        AnsiColors::Cyan => Color::DarkCyan,
        AnsiColors::White => Color::Grey,
        AnsiColors::BrightBlack => Color::DarkGrey,
        AnsiColors::BrightRed => Color::Red,
        AnsiColors::BrightGreen => Color::Green,
        AnsiColors::BrightYellow => Color::Yellow,
        AnsiColors::BrightBlue => Color::Blue,
        AnsiColors::BrightMagenta => Color::Magenta,
        AnsiColors::BrightCyan => Color::Cyan,
        AnsiColors::BrightWhite => Color::White,
        _ => Color::Reset,
    })
}

fn styled(text: impl Into<String>, entry: ThemeEntry, theme: &ThemeMap) -> Cell {
    let cell = Cell::new(text.into());
    match table_color(entry, theme) {
        Some(color) => cell.fg(color),
        None => cell,
    }
}

fn new_table(header: &[&str], theme: &ThemeMap, enable_colors: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| styled(*h, ThemeEntry::Header, theme)));
    if enable_colors {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table
}

/// Renders a record as a two-column Field / Value table.
///
/// Fields listed in `missing` are shown with a marker instead of an empty cell.
pub fn render_record(record: &ExtractedRecord, missing: &[FieldName], theme: &ThemeMap, enable_colors: bool) -> String {
    let mut table = new_table(&["Field", "Value"], theme, enable_colors);
    for (field, value) in record.iter() {
        let value_cell = if missing.contains(&field) {
            styled(MISSING_MARKER, ThemeEntry::MissingField, theme)
        } else {
            styled(value, ThemeEntry::FieldValue, theme)
        };
        table.add_row(vec![styled(field.label(), ThemeEntry::FieldName, theme), value_cell]);
    }
    table.to_string()
}

/// Renders which pattern produced each field, by its 0-based position in the rule.
pub fn render_trace(traces: &[FieldTrace], theme: &ThemeMap, enable_colors: bool) -> String {
    let mut table = new_table(&["Field", "Pattern", "Raw match"], theme, enable_colors);
    for trace in traces {
        let pattern = match trace.matched_pattern {
            Some(index) => styled(format!("#{}", index), ThemeEntry::FieldValue, theme),
            None => styled("no match", ThemeEntry::MissingField, theme),
        };
        table.add_row(vec![
            styled(trace.field.label(), ThemeEntry::FieldName, theme),
            pattern,
            styled(trace.raw_value.as_str(), ThemeEntry::FieldValue, theme),
        ]);
    }
    table.to_string()
}

/// Renders log rows with their row indices.
pub fn render_history(rows: &[(usize, &LogRow)], theme: &ThemeMap, enable_colors: bool) -> String {
    let mut header = vec!["#"];
    header.extend(HISTORY_COLUMNS.iter().map(|f| f.label()));
    let mut table = new_table(&header, theme, enable_colors);
    for (index, row) in rows {
        let mut cells = vec![styled(index.to_string(), ThemeEntry::FieldName, theme)];
        cells.extend(
            HISTORY_COLUMNS
                .iter()
                .map(|f| styled(row[f.column_index()].as_str(), ThemeEntry::FieldValue, theme)),
        );
        table.add_row(cells);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn record_table_marks_missing_fields() {
        let theme = ThemeStyle::default_theme_map();
        let record: ExtractedRecord = [
            (FieldName::Category, String::new()),
            (FieldName::Result, "Correct".to_string()),
        ]
        .into_iter()
        .collect();
        let out = render_record(&record, &[FieldName::Category], &theme, false);
        assert!(out.contains("Category"));
        assert!(out.contains(MISSING_MARKER));
        assert!(out.contains("Correct"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn trace_table_uses_rule_positions() {
        let theme = ThemeStyle::default_theme_map();
        let traces = vec![
            FieldTrace { field: FieldName::Result, matched_pattern: Some(0), raw_value: "correct".into() },
            FieldTrace { field: FieldName::Category, matched_pattern: Some(3), raw_value: "Ethics".into() },
            FieldTrace { field: FieldName::TimeSpent, matched_pattern: None, raw_value: String::new() },
        ];
        let out = render_trace(&traces, &theme, false);
        assert!(out.contains("#0"));
        assert!(out.contains("#3"));
        assert!(!out.contains("#1") && !out.contains("#4"));
        assert!(out.contains("no match"));
    }

    #[test]
    fn history_shows_indices() {
        let theme = ThemeStyle::default_theme_map();
        let mut row: LogRow = Default::default();
        row[FieldName::Category.column_index()] = "Ethics".into();
        let out = render_history(&[(4, &row)], &theme, false);
        assert!(out.contains('4'));
        assert!(out.contains("Ethics"));
        assert!(out.contains("Error Type"));
    }
}
