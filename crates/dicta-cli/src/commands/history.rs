//! Browse and manage stored sessions.

use anyhow::{Context, Result};
use chrono::Local;

use dicta_core::{HistoryEntry, HistoryStore, SessionPhase};

use crate::args::HistoryCommand;
use crate::ui;

pub fn run(command: Option<HistoryCommand>) -> Result<()> {
    match command.unwrap_or(HistoryCommand::List) {
        HistoryCommand::List => list(),
        HistoryCommand::Show { id } => show(&id),
        HistoryCommand::Copy { id } => copy(&id),
        HistoryCommand::Delete { id } => delete(&id),
        HistoryCommand::Clear { yes } => clear(yes),
    }
}

fn list() -> Result<()> {
    let store = HistoryStore::open()?;
    if store.entries().is_empty() {
        ui::info("No sessions recorded yet. Run: dicta");
        return Ok(());
    }

    for entry in store.entries() {
        println!(
            "{}  {}  {:<16}  {}",
            entry.id,
            ui::dim(
                &entry
                    .created_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            ),
            entry.phase.as_str(),
            preview(&entry.transcript, 56)
        );
    }

    Ok(())
}

fn show(id: &str) -> Result<()> {
    let store = HistoryStore::open()?;
    let entry = find(&store, id)?;

    ui::header(&format!(
        "{} — {}",
        entry.id,
        entry.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    ));
    println!("provider:  {}", entry.provider);
    if let Some(ref generator) = entry.generator {
        println!("generator: {generator}");
    }
    println!("phase:     {}", entry.phase.as_str());
    println!();
    println!("--- transcript ---");
    println!("{}", entry.transcript);

    if let Some(ref note) = entry.note_markdown {
        println!();
        println!("--- note ---");
        println!("{note}");
    } else {
        println!();
        ui::info(&format!(
            "No note was generated. Retry with: dicta note --from {}",
            entry.id
        ));
    }

    Ok(())
}

fn copy(id: &str) -> Result<()> {
    let store = HistoryStore::open()?;
    let entry = find(&store, id)?;

    match (&entry.note_html, &entry.note_markdown) {
        (Some(html), Some(markdown)) => {
            dicta_core::copy_rich(html, markdown)?;
            ui::success("Note copied to clipboard (rich text)");
        }
        _ => {
            debug_assert_eq!(entry.phase, SessionPhase::TranscriptReady);
            dicta_core::copy_text(&entry.transcript)?;
            ui::success("No note stored; transcript copied instead");
        }
    }

    Ok(())
}

fn delete(id: &str) -> Result<()> {
    let mut store = HistoryStore::open()?;
    let entry_id = find(&store, id)?.id.clone();
    store.delete(&entry_id)?;
    ui::success(&format!("Deleted {entry_id}"));
    Ok(())
}

fn clear(yes: bool) -> Result<()> {
    let mut store = HistoryStore::open()?;
    let count = store.entries().len();
    if count == 0 {
        ui::info("History is already empty");
        return Ok(());
    }

    if !yes && !ui::confirm(&format!("Delete all {count} sessions?"), false)? {
        return Ok(());
    }

    store.clear()?;
    ui::success("History cleared");
    Ok(())
}

fn find<'a>(store: &'a HistoryStore, id: &str) -> Result<&'a HistoryEntry> {
    store
        .get(id)
        .with_context(|| format!("No history entry matching id: {id}"))
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let truncated: String = flat.chars().take(max_chars).collect();
        format!("{truncated}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_flattens_and_truncates() {
        assert_eq!(preview("short  text\nhere", 56), "short text here");
        let long = "word ".repeat(40);
        let p = preview(&long, 10);
        assert_eq!(p.chars().count(), 11);
        assert!(p.ends_with('…'));
    }
}
