//! Module for managing the application's command-line interface (CLI) theme.
//!
//! This module defines the structure for theme configuration, allowing users
//! to customize the colors of various output elements. It supports 16-color
//! ANSI named colors for foreground styling and loads themes from YAML files.

use anyhow::{Context, Result};
use owo_colors::{AnsiColors, OwoColorize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Style for prominent headers or section titles.
    Header,
    /// Style for successful operation messages.
    Success,
    /// Style for general informational messages.
    Info,
    /// Style for warning messages.
    Warn,
    /// Style for error messages.
    Error,
    /// Style for field names in record and history tables.
    FieldName,
    /// Style for extracted field values.
    FieldValue,
    /// Style for mandatory fields that came out empty.
    MissingField,
    /// Style for user prompts or confirmation questions.
    Prompt,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 9] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::FieldName,
        ThemeEntry::FieldValue,
        ThemeEntry::MissingField,
        ThemeEntry::Prompt,
    ];
}

/// Represents an ANSI color that can be used in the theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// A named ANSI color (e.g., "red", "brightgreen").
    Named(String),
}

/// Error type for parsing an invalid `ThemeColor` string.
#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white" |
            "brightblack" | "brightred" | "brightgreen" | "brightyellow" | "brightblue" |
            "brightmagenta" | "brightcyan" | "brightwhite" => Ok(ThemeColor::Named(lower)),
            _ => Err(ParseThemeColorError),
        }
    }
}

impl ThemeColor {
    fn named(name: &str) -> Self {
        ThemeColor::Named(name.to_string())
    }

    /// Converts the `ThemeColor` into its corresponding `owo_colors::AnsiColors`.
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self {
            ThemeColor::Named(name) => match name.to_lowercase().as_str() {
                "black" => AnsiColors::Black,
                "red" => AnsiColors::Red,
                "green" => AnsiColors::Green,
                "yellow" => AnsiColors::Yellow,
                "blue" => AnsiColors::Blue,
                "magenta" => AnsiColors::Magenta,
                "cyan" => AnsiColors::Cyan,
                "white" => AnsiColors::White,
                "brightblack" => AnsiColors::BrightBlack,
                "brightred" => AnsiColors::BrightRed,
                "brightgreen" => AnsiColors::BrightGreen,
                "brightyellow" => AnsiColors::BrightYellow,
                "brightblue" => AnsiColors::BrightBlue,
                "brightmagenta" => AnsiColors::BrightMagenta,
                "brightcyan" => AnsiColors::BrightCyan,
                "brightwhite" => AnsiColors::BrightWhite,
                _ => AnsiColors::White,
            },
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    /// An optional `ThemeColor` to apply as the foreground color.
    pub fg: Option<ThemeColor>,
}

/// Loads a theme configuration from a YAML file or returns the default theme.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    if let Some(path) = theme_path {
        ThemeStyle::load_from_file(path)
    } else {
        Ok(ThemeStyle::default_theme_map())
    }
}

/// Applies the theme color of `entry` to `text` when color is enabled.
pub fn paint(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) if enable_colors => text.color(color.to_ansi_color()).to_string(),
        _ => text.to_string(),
    }
}

impl ThemeStyle {
    /// Loads a theme from a YAML file on disk; entries it leaves out keep their default color.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        for (entry, style) in &custom {
            if let Some(ThemeColor::Named(name)) = &style.fg {
                name.parse::<ThemeColor>()
                    .with_context(|| format!("Invalid color for '{:?}' in theme file {}", entry, path.display()))?;
            }
        }

        let mut theme = Self::default_theme_map();
        theme.extend(custom);
        Ok(theme)
    }

    /// Returns a default theme map with predefined color mappings.
    pub fn default_theme_map() -> ThemeMap {
        let mut default_theme = HashMap::new();
        default_theme.insert(ThemeEntry::Header, ThemeStyle { fg: Some(ThemeColor::named("cyan")) });
        default_theme.insert(ThemeEntry::Success, ThemeStyle { fg: Some(ThemeColor::named("green")) });
        default_theme.insert(ThemeEntry::Warn, ThemeStyle { fg: Some(ThemeColor::named("yellow")) });
        default_theme.insert(ThemeEntry::Error, ThemeStyle { fg: Some(ThemeColor::named("red")) });
        default_theme.insert(ThemeEntry::MissingField, ThemeStyle { fg: Some(ThemeColor::named("brightred")) });
        default_theme.insert(ThemeEntry::FieldName, ThemeStyle { fg: Some(ThemeColor::named("brightblue")) });

        for entry in ThemeEntry::ALL {
            default_theme.entry(entry).or_insert_with(|| ThemeStyle { fg: Some(ThemeColor::named("white")) });
        }
        default_theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_named_colors() {
        assert!("red".parse::<ThemeColor>().is_ok());
        assert!("BrightGreen".parse::<ThemeColor>().is_ok());
        assert!("unknown".parse::<ThemeColor>().is_err());
    }

    #[test]
    fn to_ansi_color_roundtrip() {
        let tc: ThemeColor = "blue".parse().unwrap();
        assert_eq!(tc.to_ansi_color(), AnsiColors::Blue);
        let tc: ThemeColor = "brightmagenta".parse().unwrap();
        assert_eq!(tc.to_ansi_color(), AnsiColors::BrightMagenta);
    }

    #[test]
    fn default_theme_covers_every_entry() {
        let theme = ThemeStyle::default_theme_map();
        for entry in ThemeEntry::ALL {
            assert!(theme.contains_key(&entry), "{:?}", entry);
        }
    }

    #[test]
    fn theme_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "success:\n  fg: magenta\nmissing_field:\n  fg: yellow").unwrap();
        let theme = ThemeStyle::load_from_file(file.path()).unwrap();
        assert_eq!(theme[&ThemeEntry::Success].fg, Some(ThemeColor::named("magenta")));
        assert_eq!(theme[&ThemeEntry::Error].fg, Some(ThemeColor::named("red")));
    }

    #[test]
    fn theme_file_rejects_unknown_colors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "header:\n  fg: mauve").unwrap();
        assert!(ThemeStyle::load_from_file(file.path()).is_err());
    }

    #[test]
    fn paint_is_plain_without_colors() {
        let theme = ThemeStyle::default_theme_map();
        assert_eq!(paint("ok", ThemeEntry::Success, &theme, false), "ok");
        assert_ne!(paint("ok", ThemeEntry::Success, &theme, true), "ok");
    }
}
