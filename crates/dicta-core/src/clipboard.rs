//! Clipboard output: rich-text notes and plain-text transcripts.

use anyhow::{Context, Result};
use arboard::Clipboard;
use std::io::Write;
use std::process::{Command, Stdio};

/// Check if running inside a Flatpak sandbox
fn is_flatpak() -> bool {
    std::path::Path::new("/.flatpak-info").exists()
}

/// Copy via bundled wl-copy.
///
/// GNOME/Mutter does not implement the wlr-data-control Wayland protocol
/// that arboard's wayland-data-control feature requires, so inside Flatpak
/// we shell out to wl-copy instead.
fn copy_via_wl_copy(content: &str, mime: Option<&str>) -> Result<()> {
    let mut command = Command::new("wl-copy");
    if let Some(mime) = mime {
        command.arg("-t").arg(mime);
    }

    let mut child = command
        .stdin(Stdio::piped())
        .spawn()
        .context("Failed to spawn wl-copy")?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(content.as_bytes())
            .context("Failed to write to wl-copy")?;
    }

    let status = child.wait().context("Failed to wait for wl-copy")?;
    if !status.success() {
        anyhow::bail!("wl-copy exited with non-zero status");
    }

    Ok(())
}

/// Copy plain text to the clipboard.
pub fn copy_text(text: &str) -> Result<()> {
    if is_flatpak() {
        return copy_via_wl_copy(text, None);
    }

    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to copy text to clipboard")?;

    Ok(())
}

/// Copy a rich-text note: HTML with a plain-text alternate for paste
/// targets that don't accept markup.
pub fn copy_rich(html: &str, plain: &str) -> Result<()> {
    if is_flatpak() {
        return copy_via_wl_copy(html, Some("text/html"));
    }

    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_html(html, Some(plain))
        .context("Failed to copy note to clipboard")?;

    Ok(())
}
