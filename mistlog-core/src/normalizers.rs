// File: mistlog-core/src/normalizers.rs
//! Field-specific normalization applied to raw pattern matches.
//!
//! These functions are total: input they cannot interpret is returned as-is,
//! since a partially formatted value is more useful than none.
//!
//! License: MIT OR APACHE 2.0

use crate::field::FieldName;

/// Upper bound (inclusive) for the minutes part of an `MM:SS` time.
pub const MAX_MINUTES: i64 = 999;

/// Applies the normalization registered for `field` to an already trimmed value.
pub fn normalize_field(field: FieldName, raw: &str) -> String {
    match field {
        FieldName::Result => normalize_result(raw),
        FieldName::TimeSpent => normalize_time_spent(raw),
        _ => raw.to_string(),
    }
}

/// Capitalizes the first character and lowercases the rest.
///
/// `"correct"` becomes `"Correct"`, `"INCORRECT"` becomes `"Incorrect"`.
pub fn normalize_result(raw: &str) -> String {
    let mut chars = raw.chars();
    let Some(first) = chars.next() else { return String::new(); };
    first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect()
}

/// Converts an `MM:SS` time into a human-readable duration.
///
/// Values that already mention seconds are kept. `"00:03"` becomes `"3 secs"`
/// and `"01:36"` becomes `"1 mins 36 secs"`. Anything that does not parse as
/// exactly two integer parts within range comes back unchanged.
pub fn normalize_time_spent(raw: &str) -> String {
    if raw.to_lowercase().contains("sec") || !raw.contains(':') {
        return raw.to_string();
    }

    match parse_minutes_seconds(raw) {
        Some((0, seconds)) => format!("{} secs", seconds),
        Some((minutes, seconds)) => format!("{} mins {} secs", minutes, seconds),
        None => raw.to_string(),
    }
}

fn parse_minutes_seconds(raw: &str) -> Option<(i64, i64)> {
    let mut parts = raw.split(':');
    let (Some(minutes), Some(seconds), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };

    let minutes = minutes.trim().parse::<i64>().ok()?;
    let seconds = seconds.trim().parse::<i64>().ok()?;

    if (0..=MAX_MINUTES).contains(&minutes) && (0..=59).contains(&seconds) {
        Some((minutes, seconds))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_is_title_cased() {
        assert_eq!(normalize_result("correct"), "Correct");
        assert_eq!(normalize_result("INCORRECT"), "Incorrect");
        assert_eq!(normalize_result("b"), "B");
        assert_eq!(normalize_result(""), "");
    }

    #[test]
    fn time_in_minutes_and_seconds() {
        assert_eq!(normalize_time_spent("00:03"), "3 secs");
        assert_eq!(normalize_time_spent("01:36"), "1 mins 36 secs");
        assert_eq!(normalize_time_spent("999:59"), "999 mins 59 secs");
    }

    #[test]
    fn time_already_in_seconds_is_kept() {
        assert_eq!(normalize_time_spent("3 secs"), "3 secs");
        assert_eq!(normalize_time_spent("1 SEC"), "1 SEC");
        assert_eq!(normalize_time_spent("00:05 secs"), "00:05 secs");
    }

    #[test]
    fn unparseable_time_falls_back_to_raw() {
        assert_eq!(normalize_time_spent("abc:def"), "abc:def");
        assert_eq!(normalize_time_spent("01:02:03"), "01:02:03");
        assert_eq!(normalize_time_spent("00:60"), "00:60");
        assert_eq!(normalize_time_spent("1000:00"), "1000:00");
        assert_eq!(normalize_time_spent("-1:30"), "-1:30");
        assert_eq!(normalize_time_spent("2 minutes"), "2 minutes");
    }

    #[test]
    fn other_fields_pass_through() {
        assert_eq!(normalize_field(FieldName::Category, "ethics"), "ethics");
        assert_eq!(normalize_field(FieldName::Result, "correct"), "Correct");
        assert_eq!(normalize_field(FieldName::TimeSpent, "00:41"), "41 secs");
    }
}
