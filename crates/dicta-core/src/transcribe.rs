//! Transcription orchestration: WAV-encode a recording and send it to the
//! configured provider. One request in flight per workflow step.

use anyhow::{Context, Result};

use crate::audio::{RecordingData, encode_wav};
use crate::config::TranscriptionProvider;
use crate::http::get_http_client;
use crate::provider::{ProgressFn, TranscriptionRequest, registry};

/// Transcribe a finished recording.
///
/// Rejects empty recordings before any network call.
pub async fn transcribe_audio(
    provider: &TranscriptionProvider,
    api_key: &str,
    recording: &RecordingData,
    language: Option<&str>,
    progress: Option<ProgressFn>,
) -> Result<String> {
    if recording.is_empty() {
        anyhow::bail!("Recording contains no audio");
    }

    crate::verbose!(
        "Transcribing {:.1}s of audio via {}",
        recording.duration_secs(),
        provider.display_name()
    );

    let audio_data = encode_wav(recording).context("Failed to encode recording")?;

    let request = TranscriptionRequest {
        audio_data,
        language: language.map(|s| s.to_string()),
        filename: "consultation.wav".to_string(),
        mime_type: "audio/wav".to_string(),
        progress,
    };

    let client = get_http_client()?;
    let backend = registry().get_by_kind(provider)?;

    let result = backend
        .transcribe_async(client, api_key, request)
        .await
        .with_context(|| format!("{} transcription failed", provider.display_name()))?;

    Ok(result.text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_recording_is_rejected_without_network() {
        let recording = RecordingData {
            samples: Vec::new(),
            sample_rate: 16_000,
        };
        let err = transcribe_audio(
            &TranscriptionProvider::OpenAI,
            "sk-test",
            &recording,
            None,
            None,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("no audio"));
    }
}
