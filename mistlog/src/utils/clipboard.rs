// mistlog/src/utils/clipboard.rs
//! System clipboard access, compiled in with the `clipboard` feature.

use anyhow::Result;

/// Reads the current text content of the system clipboard.
#[cfg(feature = "clipboard")]
pub fn read_from_clipboard() -> Result<String> {
    use anyhow::Context;

    let mut clipboard = arboard::Clipboard::new().context("Failed to access the system clipboard")?;
    clipboard.get_text().context("Clipboard does not contain text")
}

#[cfg(not(feature = "clipboard"))]
pub fn read_from_clipboard() -> Result<String> {
    anyhow::bail!("Clipboard support is not compiled in; rebuild with the `clipboard` feature")
}
