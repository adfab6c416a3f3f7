//! Shared runtime helpers for the workflow commands.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::Write;

use dicta_core::{Settings, TranscriptionProvider};

/// Resolved transcription configuration for one workflow run.
pub struct TranscriptionConfig {
    pub provider: TranscriptionProvider,
    pub api_key: String,
    pub language: Option<String>,
}

/// Resolve provider, key and language from settings plus CLI overrides.
pub fn load_transcription_config(
    settings: &Settings,
    language_override: Option<&str>,
) -> Result<TranscriptionConfig> {
    let provider = settings.transcription.provider.clone();

    let api_key = settings.api_key_for(&provider).ok_or_else(|| {
        anyhow::anyhow!(
            "No {} API key configured.\n\
             Set it with: dicta config --{}-api-key YOUR_KEY\n\
             or set the {} environment variable, or run: dicta setup",
            provider.display_name(),
            provider.as_str(),
            provider.api_key_env_var()
        )
    })?;

    let language = language_override
        .map(|l| l.to_string())
        .or_else(|| settings.transcription.language.clone());

    Ok(TranscriptionConfig {
        provider,
        api_key,
        language,
    })
}

/// Block until the user presses Enter, without echoing keystrokes.
pub fn wait_for_enter() -> Result<()> {
    std::io::stdout().flush()?;

    enable_raw_mode()?;

    loop {
        if let Event::Key(key_event) = event::read()? {
            if key_event.code == KeyCode::Enter {
                break;
            }
        }
    }

    disable_raw_mode()?;

    Ok(())
}
