//! Workflow over an existing WAV recording instead of the microphone.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use dicta_core::{RecordingData, Session, Settings, TranscriptionStage, transcribe_audio};

use crate::app::load_transcription_config;
use crate::args::TranscribeArgs;
use crate::ui;

pub async fn run(args: TranscribeArgs) -> Result<()> {
    let settings = Settings::load();
    settings.validate()?;
    let config = load_transcription_config(&settings, args.language.as_deref())?;

    let recording = read_wav(&args.file)?;
    ui::info(&format!(
        "Loaded {:.1}s of audio from {}",
        recording.duration_secs(),
        args.file.display()
    ));

    let progress: dicta_core::ProgressFn = Arc::new(|stage| match stage {
        TranscriptionStage::Uploading => ui::status("Uploading audio..."),
        TranscriptionStage::Transcribing => ui::status("Transcribing..."),
    });

    let transcript = transcribe_audio(
        &config.provider,
        &config.api_key,
        &recording,
        config.language.as_deref(),
        Some(progress),
    )
    .await?;

    let mut session = Session::from_transcript(transcript);

    if !args.no_edit {
        crate::commands::record::review_transcript(&mut session)?;
    }

    crate::commands::pipeline::generate_and_deliver(&mut session, &settings, &args.note).await?;
    Ok(())
}

/// Read a WAV file into mono f32 samples at its native rate.
fn read_wav(path: &Path) -> Result<RecordingData> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    if extension.as_deref() != Some("wav") {
        anyhow::bail!("Unsupported audio format. Currently supported: WAV");
    }

    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read float samples")?,
        hound::SampleFormat::Int => {
            let max_val = (1u32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to read int samples")?
        }
    };

    // Average interleaved channels down to mono
    let samples = if spec.channels > 1 {
        let channels = spec.channels as usize;
        samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok(RecordingData {
        samples,
        sample_rate: spec.sample_rate,
    })
}
