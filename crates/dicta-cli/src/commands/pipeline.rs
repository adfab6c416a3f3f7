//! Shared workflow tail: transcript → note → clipboard → history.
//!
//! `record`, `transcribe` and `note` all converge here once a session holds
//! a transcript. A note-generation failure still records the transcript in
//! history (phase transcript-ready) so the session can be resumed with
//! `dicta note --from <id>`.

use anyhow::Result;

use dicta_core::{
    HistoryEntry, HistoryStore, Session, SessionPhase, Settings, generate_note,
    markdown_to_html, resolve_note_request,
};

use crate::args::NoteOptions;
use crate::ui;

/// Run note generation and delivery for a session in TranscriptReady.
///
/// Returns the history entry id under which the session was stored.
pub async fn generate_and_deliver(
    session: &mut Session,
    settings: &Settings,
    opts: &NoteOptions,
) -> Result<String> {
    debug_assert_eq!(session.phase(), SessionPhase::TranscriptReady);

    let request = resolve_note_request(
        settings,
        opts.template.as_deref(),
        opts.prompt.as_deref(),
    )?;

    if let Some(ref template) = request.template {
        ui::status(&format!("Generating note (template: {})...", template.name));
    } else {
        ui::status("Generating note...");
    }

    session
        .begin_generating()
        .map_err(anyhow::Error::from)?;

    let transcript = session
        .transcript()
        .expect("TranscriptReady session has a transcript")
        .to_string();

    let markdown = match generate_note(&transcript, &request).await {
        Ok(markdown) => markdown,
        Err(e) => {
            // Keep the transcript: the user already spoke it once.
            session.fail_generation();
            let entry = history_entry(session, settings, None);
            let id = entry.id.clone();
            if let Err(save_err) = record_history(entry) {
                ui::error(&format!("Could not save transcript to history: {save_err:#}"));
            } else {
                ui::info(&format!(
                    "Transcript saved. Retry with: dicta note --from {id}"
                ));
            }
            return Err(e);
        }
    };

    let mut markdown = markdown;
    if opts.edit_note {
        if let Some(edited) = ui::edit_in_editor(&markdown, "md")? {
            markdown = edited;
        }
    }

    let html = markdown_to_html(&markdown);
    session
        .set_note(markdown.clone(), html.clone())
        .map_err(anyhow::Error::from)?;

    if settings.ui.auto_copy && !opts.no_copy {
        match dicta_core::copy_rich(&html, &markdown) {
            Ok(()) => ui::success("Note copied to clipboard (rich text)"),
            // Clipboard loss is recoverable via `dicta history copy`
            Err(e) => ui::error(&format!("Clipboard copy failed: {e:#}")),
        }
    }

    println!();
    println!("{markdown}");
    println!();

    let entry = history_entry(session, settings, Some(&request.generator.to_string()));
    let id = entry.id.clone();
    record_history(entry)?;
    ui::success(&format!("Session saved to history ({id})"));

    Ok(id)
}

fn history_entry(
    session: &Session,
    settings: &Settings,
    generator: Option<&str>,
) -> HistoryEntry {
    HistoryEntry::new(
        session.transcript().unwrap_or_default().to_string(),
        session.note_markdown().map(|s| s.to_string()),
        session.note_html().map(|s| s.to_string()),
        session.phase(),
        settings.transcription.provider.to_string(),
        generator.map(|g| g.to_string()),
    )
}

fn record_history(entry: HistoryEntry) -> Result<()> {
    let mut store = HistoryStore::open()?;
    store.record(entry)
}
