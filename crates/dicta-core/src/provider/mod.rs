//! Transcription provider abstraction and registry.
//!
//! Every supported provider speaks the OpenAI-compatible multipart
//! transcription format; each backend only contributes its endpoint URL and
//! model name on top of the shared implementation in `base`.

mod base;
mod groq;
mod mistral;
mod openai;

pub(crate) use base::{openai_compatible_transcribe_async, openai_compatible_transcribe_sync};
pub use groq::GroqProvider;
pub use mistral::MistralProvider;
pub use openai::OpenAIProvider;

use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::config::TranscriptionProvider;

/// Request timeout for transcription uploads.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Progress stages reported while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionStage {
    /// Audio is being uploaded to the provider
    Uploading,
    /// Upload finished, waiting for the transcript
    Transcribing,
}

/// Progress callback invoked as the request moves between stages.
pub type ProgressFn = Arc<dyn Fn(TranscriptionStage) + Send + Sync>;

/// A single transcription request.
#[derive(Clone)]
pub struct TranscriptionRequest {
    /// Encoded audio bytes (WAV)
    pub audio_data: Vec<u8>,
    /// Optional ISO 639-1 language hint
    pub language: Option<String>,
    /// Upload filename, e.g. `consultation.wav`
    pub filename: String,
    /// MIME type of the audio payload
    pub mime_type: String,
    /// Optional progress reporting
    pub progress: Option<ProgressFn>,
}

impl TranscriptionRequest {
    /// Build a WAV upload request with no language hint or progress callback.
    pub fn wav(audio_data: Vec<u8>) -> Self {
        Self {
            audio_data,
            language: None,
            filename: "consultation.wav".to_string(),
            mime_type: "audio/wav".to_string(),
            progress: None,
        }
    }

    pub(crate) fn report(&self, stage: TranscriptionStage) {
        if let Some(ref progress) = self.progress {
            progress(stage);
        }
    }
}

/// The transcript returned by a provider.
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    pub text: String,
}

/// A transcription backend.
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn display_name(&self) -> &'static str;

    /// Blocking transcription, for call sites without a runtime.
    fn transcribe_sync(
        &self,
        api_key: &str,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResult>;

    /// Async transcription over the shared pooled client.
    async fn transcribe_async(
        &self,
        client: &reqwest::Client,
        api_key: &str,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResult>;
}

/// Maps provider identifiers to backend implementations.
pub struct ProviderRegistry {
    backends: Vec<(TranscriptionProvider, Box<dyn TranscriptionBackend>)>,
}

impl ProviderRegistry {
    fn new() -> Self {
        Self {
            backends: vec![
                (TranscriptionProvider::OpenAI, Box::new(OpenAIProvider)),
                (TranscriptionProvider::Groq, Box::new(GroqProvider)),
                (TranscriptionProvider::Mistral, Box::new(MistralProvider)),
            ],
        }
    }

    /// Look up the backend for a provider kind.
    pub fn get_by_kind(&self, kind: &TranscriptionProvider) -> Result<&dyn TranscriptionBackend> {
        self.backends
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, b)| b.as_ref())
            .ok_or_else(|| anyhow::anyhow!("No backend registered for provider: {kind}"))
    }
}

static REGISTRY: Lazy<ProviderRegistry> = Lazy::new(ProviderRegistry::new);

/// The process-wide provider registry.
pub fn registry() -> &'static ProviderRegistry {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_provider() {
        for kind in TranscriptionProvider::all() {
            let backend = registry().get_by_kind(kind).unwrap();
            assert_eq!(backend.name(), kind.as_str());
        }
    }
}
