//! Copying results to the system clipboard.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Put the current result on the system clipboard.
pub fn copy_result(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("failed to access the clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("failed to copy the result to the clipboard")
}
