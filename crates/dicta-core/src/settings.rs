//! Persisted user settings.
//!
//! One flat JSON record at `<config>/dicta/settings.json`. Loading never
//! fails: a missing or corrupt file falls back to defaults. API keys in the
//! file take priority; environment variables are the fallback so `.env`
//! users never have to run setup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::config::TranscriptionProvider;
use crate::note::NoteGenerator;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub transcription: TranscriptionSettings,

    #[serde(default)]
    pub note: NoteSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Transcription provider and credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TranscriptionSettings {
    #[serde(default)]
    pub provider: TranscriptionProvider,

    /// API keys by provider identifier ("openai", "groq", "mistral")
    #[serde(default)]
    pub api_keys: HashMap<String, String>,

    /// Optional ISO 639-1 language hint sent with every request
    #[serde(default)]
    pub language: Option<String>,
}

/// Note generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteSettings {
    #[serde(default)]
    pub generator: NoteGenerator,

    /// Model override (None = generator default)
    #[serde(default)]
    pub model: Option<String>,

    /// Custom instruction prompt (None = built-in SOAP prompt)
    #[serde(default)]
    pub prompt: Option<String>,

    /// Default template name ("none" disables template injection)
    #[serde(default)]
    pub template: Option<String>,

    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
}

fn default_ollama_url() -> String {
    crate::note::DEFAULT_OLLAMA_URL.to_string()
}

impl Default for NoteSettings {
    fn default() -> Self {
        Self {
            generator: NoteGenerator::default(),
            model: None,
            prompt: None,
            template: Some("soap".to_string()),
            ollama_url: default_ollama_url(),
        }
    }
}

/// Workflow behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Selected microphone device name (None = system default)
    #[serde(default)]
    pub microphone_device: Option<String>,

    /// Copy the finished note to the clipboard automatically
    #[serde(default = "default_true")]
    pub auto_copy: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            microphone_device: None,
            auto_copy: true,
        }
    }
}

impl Settings {
    /// Settings file path (`<config>/dicta/settings.json`).
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dicta").join("settings.json"))
    }

    /// Load settings, falling back to defaults on any problem.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|json| serde_json::from_str(&json).map_err(anyhow::Error::from))
        {
            Ok(settings) => settings,
            Err(e) => {
                crate::verbose!("Failed to load settings, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Save settings, creating the config directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("Cannot determine config directory")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {parent:?}"))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {path:?}"))?;
        Ok(())
    }

    /// API key for a transcription provider: settings first, then env var.
    pub fn api_key_for(&self, provider: &TranscriptionProvider) -> Option<String> {
        self.transcription
            .api_keys
            .get(provider.as_str())
            .cloned()
            .or_else(|| std::env::var(provider.api_key_env_var()).ok())
    }

    /// Whether a key for this provider is stored in settings (not just env).
    pub fn has_configured_api_key(&self, provider: &TranscriptionProvider) -> bool {
        self.transcription.api_keys.contains_key(provider.as_str())
    }

    pub fn set_api_key(&mut self, provider: &TranscriptionProvider, key: String) {
        self.transcription
            .api_keys
            .insert(provider.as_str().to_string(), key);
    }

    /// API key for the note generator. The generators share credentials with
    /// the same-named transcription providers; Ollama has none.
    pub fn note_api_key(&self) -> Option<String> {
        match self.note.generator {
            NoteGenerator::Ollama => None,
            NoteGenerator::OpenAI => self.api_key_for(&TranscriptionProvider::OpenAI),
            NoteGenerator::Mistral => self.api_key_for(&TranscriptionProvider::Mistral),
        }
    }

    /// Check that the active provider and generator can run a workflow.
    pub fn validate(&self) -> Result<()> {
        if self.api_key_for(&self.transcription.provider).is_none() {
            anyhow::bail!(
                "{} API key not configured. Run: dicta setup",
                self.transcription.provider.display_name()
            );
        }
        if self.note.generator.requires_api_key() && self.note_api_key().is_none() {
            anyhow::bail!(
                "{} API key not configured for note generation. Run: dicta setup",
                self.note.generator.display_name()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = Settings::default();
        assert_eq!(settings.transcription.provider, TranscriptionProvider::OpenAI);
        assert_eq!(settings.note.generator, NoteGenerator::OpenAI);
        assert_eq!(settings.note.template.as_deref(), Some("soap"));
        assert!(settings.ui.auto_copy);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let mut settings = Settings::default();
        settings.set_api_key(&TranscriptionProvider::Groq, "gsk_test".to_string());
        settings.transcription.language = Some("en".to_string());
        settings.note.prompt = Some("Summarize.".to_string());

        let json = serde_json::to_string_pretty(&settings).unwrap();
        let loaded: Settings = serde_json::from_str(&json).unwrap();

        assert_eq!(
            loaded.transcription.api_keys.get("groq").map(String::as_str),
            Some("gsk_test")
        );
        assert_eq!(loaded.transcription.language.as_deref(), Some("en"));
        assert_eq!(loaded.note.prompt.as_deref(), Some("Summarize."));
    }

    #[test]
    fn empty_json_deserializes_to_defaults() {
        let loaded: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(loaded.note.ollama_url, crate::note::DEFAULT_OLLAMA_URL);
        assert!(loaded.ui.auto_copy);
    }

    #[test]
    fn stored_key_beats_environment() {
        let mut settings = Settings::default();
        settings.set_api_key(&TranscriptionProvider::Mistral, "stored".to_string());
        assert_eq!(
            settings.api_key_for(&TranscriptionProvider::Mistral).as_deref(),
            Some("stored")
        );
        assert!(settings.has_configured_api_key(&TranscriptionProvider::Mistral));
        assert!(!settings.has_configured_api_key(&TranscriptionProvider::Groq));
    }

    #[test]
    fn validate_requires_provider_key() {
        let settings = Settings::default();
        // No key in settings; only passes when the env var happens to be set
        if std::env::var("OPENAI_API_KEY").is_err() {
            assert!(settings.validate().is_err());
        }
    }
}
