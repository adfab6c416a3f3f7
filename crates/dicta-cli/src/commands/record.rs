//! The default workflow: record, transcribe, edit, generate, copy.

use anyhow::Result;
use std::sync::Arc;

use dicta_core::{
    AudioRecorder, Session, Settings, TranscriptionStage, transcribe_audio,
};

use crate::app::{self, load_transcription_config};
use crate::args::RecordArgs;
use crate::ui;

pub async fn run(args: RecordArgs) -> Result<()> {
    let settings = Settings::load();
    settings.validate()?;
    let config = load_transcription_config(&settings, args.language.as_deref())?;

    let device = args
        .device
        .as_deref()
        .or(settings.ui.microphone_device.as_deref());

    let mut session = Session::new();
    let mut recorder = AudioRecorder::new();

    session.begin_recording().map_err(anyhow::Error::from)?;
    if let Err(e) = recorder.start(device) {
        session.fail_capture();
        return Err(e);
    }

    ui::status("Recording... press Enter to stop");
    app::wait_for_enter()?;

    let recording = match recorder.stop() {
        Ok(recording) => recording,
        Err(e) => {
            session.fail_capture();
            return Err(e);
        }
    };

    ui::info(&format!("Captured {:.1}s of audio", recording.duration_secs()));

    session.begin_transcribing().map_err(anyhow::Error::from)?;
    let progress: dicta_core::ProgressFn = Arc::new(|stage| match stage {
        TranscriptionStage::Uploading => ui::status("Uploading audio..."),
        TranscriptionStage::Transcribing => ui::status("Transcribing..."),
    });

    let transcript = match transcribe_audio(
        &config.provider,
        &config.api_key,
        &recording,
        config.language.as_deref(),
        Some(progress),
    )
    .await
    {
        Ok(transcript) => transcript,
        Err(e) => {
            // Nothing worth keeping: return to idle, surface the error.
            session.fail_capture();
            return Err(e);
        }
    };

    session
        .set_transcript(transcript)
        .map_err(anyhow::Error::from)?;

    if !args.no_edit {
        review_transcript(&mut session)?;
    }

    crate::commands::pipeline::generate_and_deliver(&mut session, &settings, &args.note).await?;
    Ok(())
}

/// Offer the transcript for review in `$EDITOR`.
pub fn review_transcript(session: &mut Session) -> Result<()> {
    let transcript = session
        .transcript()
        .expect("session holds a transcript")
        .to_string();

    println!();
    println!("{transcript}");
    println!();

    if !ui::confirm("Edit the transcript before generating the note?", false)? {
        return Ok(());
    }

    match ui::edit_in_editor(&transcript, "txt")? {
        Some(edited) => {
            session
                .edit_transcript(edited.trim().to_string())
                .map_err(anyhow::Error::from)?;
            ui::success("Transcript updated");
        }
        None => ui::info("Edit aborted, keeping the original transcript"),
    }

    Ok(())
}
