//! Generate a note from an existing transcript, without recording.

use anyhow::{Context, Result};
use std::io::Read;

use dicta_core::{HistoryStore, Session, Settings};

use crate::args::NoteArgs;
use crate::ui;

pub async fn run(args: NoteArgs) -> Result<()> {
    let settings = Settings::load();

    let transcript = if args.stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read transcript from stdin")?;
        buf.trim().to_string()
    } else if let Some(ref id) = args.from {
        let store = HistoryStore::open()?;
        let entry = store
            .get(id)
            .with_context(|| format!("No history entry matching id: {id}"))?;
        ui::info(&format!(
            "Using transcript from {} ({})",
            entry.id,
            entry.created_at.format("%Y-%m-%d %H:%M")
        ));
        entry.transcript.clone()
    } else {
        anyhow::bail!("Provide a transcript with --from <history id> or --stdin");
    };

    if transcript.is_empty() {
        anyhow::bail!("Transcript is empty");
    }

    let mut session = Session::from_transcript(transcript);
    crate::commands::pipeline::generate_and_deliver(&mut session, &settings, &args.note).await?;
    Ok(())
}
