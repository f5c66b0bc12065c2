//! Themed one-line status messages.
//!
//! Every helper writes a single line to the given writer. Colors are only
//! applied when `enable_colors` is true, so redirected output stays plain.

use std::io::{self, Write};

use super::theme::{paint, ThemeEntry, ThemeMap};

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint(&format!("{}{}", prefix, msg), entry, theme, enable_colors))
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "", msg, ThemeEntry::Info, theme, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "", msg, ThemeEntry::Success, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "Warning: ", msg, ThemeEntry::Warn, theme, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "Error: ", msg, ThemeEntry::Error, theme, enable_colors)
}

/// Writes a prompt without a trailing newline and flushes it.
pub fn print_prompt<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    write!(writer, "{}", paint(msg, ThemeEntry::Prompt, theme, enable_colors))?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn prefixes_and_plain_output() {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_warn_message(&mut out, "row 7 does not exist", &theme, false).unwrap();
        print_error_message(&mut out, "Category is empty", &theme, false).unwrap();
        print_info_message(&mut out, "done", &theme, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Warning: row 7 does not exist\nError: Category is empty\ndone\n"
        );
    }
}
