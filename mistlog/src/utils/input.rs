// mistlog/src/utils/input.rs
//! Resolves where the pasted review text comes from.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::cli::InputArgs;
use crate::utils::clipboard::read_from_clipboard;

/// Reads the input text from a file, the clipboard, or stdin, in that order of preference.
pub fn read_input(args: &InputArgs) -> Result<String> {
    if let Some(path) = &args.input {
        return read_file(path);
    }
    if args.from_clipboard {
        let text = read_from_clipboard()?;
        debug!("Read {} bytes from the clipboard", text.len());
        return Ok(text);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
    debug!("Read {} bytes from stdin", buffer.len());
    Ok(buffer)
}

fn read_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read input file {}", path.display()))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_file_input_lossily() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Ethics: Level II\n\xFFYour result is Correct.").unwrap();
        let args = InputArgs { input: Some(file.path().to_path_buf()), from_clipboard: false, rules: None };
        let text = read_input(&args).unwrap();
        assert!(text.starts_with("Ethics: Level II\n"));
        assert!(text.ends_with("Your result is Correct."));
    }

    #[test]
    fn missing_file_is_an_error() {
        let args = InputArgs { input: Some("/nonexistent/review.txt".into()), from_clipboard: false, rules: None };
        let err = read_input(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read input file"));
    }
}
