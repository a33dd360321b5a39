//! System clipboard access.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Writes `text` to the system clipboard.
///
/// # Errors
///
/// Fails when no clipboard is available (for example on a headless machine)
/// or the write is rejected.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to write to clipboard")?;
    Ok(())
}
