//! Interactive setup wizard.
//!
//! Walks through transcription provider, note generator, microphone and
//! default template, then saves once at the end.

use anyhow::{Result, anyhow};

use dicta_core::{
    NoteGenerator, Settings, TranscriptionProvider, list_input_devices, list_templates,
};

use crate::ui;

pub fn run() -> Result<()> {
    ui::header("dicta setup");

    let mut settings = Settings::load();

    choose_transcription(&mut settings)?;
    choose_generator(&mut settings)?;
    choose_microphone(&mut settings)?;
    choose_template(&mut settings)?;

    settings.save()?;
    println!();
    ui::success("Configuration saved. Run 'dicta' to record a consultation.");

    Ok(())
}

fn choose_transcription(settings: &mut Settings) -> Result<()> {
    let providers = TranscriptionProvider::all();

    let items: Vec<String> = providers
        .iter()
        .map(|provider| {
            let marker = if settings.has_configured_api_key(provider) {
                " [configured]"
            } else if settings.api_key_for(provider).is_some() {
                " [from environment]"
            } else {
                ""
            };
            format!("{}{}", provider.display_name(), marker)
        })
        .collect();

    let default = providers
        .iter()
        .position(|p| *p == settings.transcription.provider);
    let choice = ui::select("Transcription provider?", &items, default)?;
    let provider = providers[choice].clone();

    ensure_api_key(settings, &provider)?;
    settings.transcription.provider = provider;

    Ok(())
}

fn ensure_api_key(settings: &mut Settings, provider: &TranscriptionProvider) -> Result<()> {
    if let Some(existing) = settings.api_key_for(provider) {
        let keep = ui::confirm(
            &format!("Keep the current {} key?", provider.display_name()),
            true,
        )?;
        if keep {
            // Promote an env-only key into settings so later runs don't
            // depend on the environment
            if !settings.has_configured_api_key(provider) {
                settings.set_api_key(provider, existing);
                ui::info("API key saved to settings");
            }
            return Ok(());
        }
    }

    let key = prompt_and_validate_key(provider)?;
    settings.set_api_key(provider, key);
    Ok(())
}

/// Prompt for an API key until it passes the provider's format check.
fn prompt_and_validate_key(provider: &TranscriptionProvider) -> Result<String> {
    loop {
        let api_key = ui::password(&format!("{} API key", provider.display_name()))?;

        let validation = match provider {
            TranscriptionProvider::OpenAI => {
                if !api_key.starts_with("sk-") {
                    Err(anyhow!("Invalid OpenAI key format. Keys start with 'sk-'"))
                } else {
                    Ok(())
                }
            }
            TranscriptionProvider::Groq => {
                if !api_key.starts_with("gsk_") {
                    Err(anyhow!("Invalid Groq key format. Keys start with 'gsk_'"))
                } else {
                    Ok(())
                }
            }
            _ => {
                if api_key.len() < 20 {
                    Err(anyhow!("API key seems too short"))
                } else {
                    Ok(())
                }
            }
        };

        match validation {
            Ok(()) => return Ok(api_key),
            Err(e) => ui::error(&e.to_string()),
        }
    }
}

fn choose_generator(settings: &mut Settings) -> Result<()> {
    let generators = NoteGenerator::all();

    let items: Vec<String> = generators
        .iter()
        .map(|g| match g {
            NoteGenerator::OpenAI => "OpenAI - cloud, shares the OpenAI key".to_string(),
            NoteGenerator::Mistral => "Mistral - cloud, shares the Mistral key".to_string(),
            NoteGenerator::Ollama => "Ollama - local models, no API key".to_string(),
        })
        .collect();

    let default = generators.iter().position(|g| *g == settings.note.generator);
    let choice = ui::select("Note generator?", &items, default)?;
    let generator = generators[choice].clone();

    match generator {
        NoteGenerator::OpenAI => ensure_api_key(settings, &TranscriptionProvider::OpenAI)?,
        NoteGenerator::Mistral => ensure_api_key(settings, &TranscriptionProvider::Mistral)?,
        NoteGenerator::Ollama => {
            let url = ui::input("Ollama server URL", Some(&settings.note.ollama_url))?;
            settings.note.ollama_url = url;
        }
    }

    settings.note.generator = generator;
    Ok(())
}

fn choose_microphone(settings: &mut Settings) -> Result<()> {
    let devices = match list_input_devices() {
        Ok(devices) => devices,
        Err(e) => {
            ui::error(&format!("Could not list microphones: {e}"));
            return Ok(());
        }
    };

    let mut items = vec!["System default".to_string()];
    items.extend(devices.iter().map(|d| {
        if d.is_default {
            format!("{} [system default]", d.name)
        } else {
            d.name.clone()
        }
    }));

    let default = settings
        .ui
        .microphone_device
        .as_deref()
        .and_then(|name| devices.iter().position(|d| d.name == name))
        .map(|idx| idx + 1)
        .unwrap_or(0);

    let choice = ui::select("Microphone?", &items, Some(default))?;
    settings.ui.microphone_device = if choice == 0 {
        None
    } else {
        Some(devices[choice - 1].name.clone())
    };

    Ok(())
}

fn choose_template(settings: &mut Settings) -> Result<()> {
    let templates = list_templates()?;

    let mut items = vec!["No template".to_string()];
    items.extend(templates.iter().map(|t| t.name.clone()));

    let default = settings
        .note
        .template
        .as_deref()
        .and_then(|name| templates.iter().position(|t| t.name == name))
        .map(|idx| idx + 1)
        .unwrap_or(0);

    let choice = ui::select("Default note template?", &items, Some(default))?;
    settings.note.template = if choice == 0 {
        Some("none".to_string())
    } else {
        Some(templates[choice - 1].name.clone())
    };

    Ok(())
}
