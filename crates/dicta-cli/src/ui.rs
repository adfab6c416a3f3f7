//! Terminal output and prompt helpers.
//!
//! All prompts share one dialoguer theme; all status lines share the same
//! glyph vocabulary so the workflow reads as a single conversation.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Editor, Input, Password, Select, theme::ColorfulTheme};

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Arrow-key selection from a list.
pub fn select<T: std::fmt::Display>(
    prompt: &str,
    items: &[T],
    default: Option<usize>,
) -> Result<usize> {
    let theme = theme();
    let mut select = Select::with_theme(&theme).with_prompt(prompt).items(items);
    if let Some(idx) = default {
        select = select.default(idx);
    }
    Ok(select.interact()?)
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::with_theme(&theme())
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

pub fn input(prompt: &str, default: Option<&str>) -> Result<String> {
    let theme = theme();
    let mut input = Input::with_theme(&theme).with_prompt(prompt);
    if let Some(d) = default {
        input = input.default(d.to_string());
    }
    Ok(input.interact_text()?)
}

/// Hidden input for API keys.
pub fn password(prompt: &str) -> Result<String> {
    Ok(Password::with_theme(&theme())
        .with_prompt(prompt)
        .interact()?)
}

/// Open text in `$EDITOR`. Returns None when the user aborts the edit.
pub fn edit_in_editor(text: &str, extension: &str) -> Result<Option<String>> {
    Ok(Editor::new()
        .extension(&format!(".{extension}"))
        .edit(text)?)
}

pub fn header(text: &str) {
    println!();
    println!("{}", style(text).bold().cyan());
    println!();
}

/// Transient workflow status, e.g. "Transcribing...".
pub fn status(text: &str) {
    println!("{} {}", style("●").cyan(), text);
}

pub fn success(text: &str) {
    println!("{} {}", style("✓").green().bold(), text);
}

pub fn error(text: &str) {
    eprintln!("{} {}", style("✗").red().bold(), text);
}

pub fn info(text: &str) {
    println!("{} {}", style("ℹ").blue(), text);
}

/// Dim a secondary detail, e.g. timestamps in history listings.
pub fn dim(text: &str) -> String {
    style(text).dim().to_string()
}
