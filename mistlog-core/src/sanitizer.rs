//! Flattens free text so it can be stored in a single CSV cell.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_TERMINATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("static regex"));
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Replaces line terminators with spaces, collapses whitespace runs and trims.
///
/// The result never contains a line break, so `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let single_line = LINE_TERMINATORS.replace_all(value, " ");
    WHITESPACE_RUNS.replace_all(&single_line, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_newlines_and_whitespace() {
        assert_eq!(sanitize("  A\r\nB\n\nC\rD\t\tE  "), "A B C D E");
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize(" \n\t "), "");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "plain",
            "two  spaces",
            "line one\nline two",
            "\u{a0}non-breaking\u{a0} space",
            "Question\r\n\r\n  Which of the following?\n A. lower",
        ];
        for s in samples {
            let once = sanitize(s);
            assert_eq!(sanitize(&once), once);
            assert!(!once.contains('\n') && !once.contains('\r'));
        }
    }
}
