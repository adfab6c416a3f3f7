//! Non-interactive settings changes.

use anyhow::Result;

use dicta_core::{NoteGenerator, Settings, TranscriptionProvider, load_template};

use crate::args::ConfigArgs;
use crate::ui;

pub fn run(args: ConfigArgs) -> Result<()> {
    let mut settings = Settings::load();

    if args.show {
        print_settings(&settings);
        return Ok(());
    }

    let mut changed = false;

    if let Some(ref provider) = args.provider {
        settings.transcription.provider = provider.parse::<TranscriptionProvider>()
            .map_err(anyhow::Error::msg)?;
        changed = true;
    }

    if let Some(ref generator) = args.generator {
        settings.note.generator = generator.parse::<NoteGenerator>()
            .map_err(anyhow::Error::msg)?;
        changed = true;
    }

    if let Some(key) = args.openai_api_key {
        settings.set_api_key(&TranscriptionProvider::OpenAI, key);
        changed = true;
    }
    if let Some(key) = args.groq_api_key {
        settings.set_api_key(&TranscriptionProvider::Groq, key);
        changed = true;
    }
    if let Some(key) = args.mistral_api_key {
        settings.set_api_key(&TranscriptionProvider::Mistral, key);
        changed = true;
    }

    if let Some(url) = args.ollama_url {
        settings.note.ollama_url = url;
        changed = true;
    }

    if let Some(model) = args.model {
        settings.note.model = if model == "default" { None } else { Some(model) };
        changed = true;
    }

    if let Some(prompt) = args.note_prompt {
        settings.note.prompt = if prompt == "default" { None } else { Some(prompt) };
        changed = true;
    }

    if let Some(template) = args.template {
        if template != "none" {
            // Fail now rather than mid-workflow
            load_template(&template)?;
        }
        settings.note.template = Some(template);
        changed = true;
    }

    if let Some(device) = args.device {
        settings.ui.microphone_device = if device == "default" { None } else { Some(device) };
        changed = true;
    }

    if let Some(language) = args.language {
        settings.transcription.language =
            if language == "auto" { None } else { Some(language) };
        changed = true;
    }

    if let Some(auto_copy) = args.auto_copy {
        settings.ui.auto_copy = auto_copy;
        changed = true;
    }

    if !changed {
        print_settings(&settings);
        return Ok(());
    }

    settings.save()?;
    ui::success("Settings saved");
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("provider:    {}", settings.transcription.provider);
    println!(
        "language:    {}",
        settings.transcription.language.as_deref().unwrap_or("auto")
    );
    println!("generator:   {}", settings.note.generator);
    println!(
        "model:       {}",
        settings.note.model.as_deref().unwrap_or("default")
    );
    println!(
        "template:    {}",
        settings.note.template.as_deref().unwrap_or("none")
    );
    println!(
        "prompt:      {}",
        if settings.note.prompt.is_some() { "custom" } else { "default (SOAP)" }
    );
    println!("ollama url:  {}", settings.note.ollama_url);
    println!(
        "microphone:  {}",
        settings.ui.microphone_device.as_deref().unwrap_or("system default")
    );
    println!("auto copy:   {}", settings.ui.auto_copy);

    let keys: Vec<&str> = TranscriptionProvider::all()
        .iter()
        .filter(|p| settings.has_configured_api_key(p))
        .map(|p| p.as_str())
        .collect();
    println!(
        "api keys:    {}",
        if keys.is_empty() { "none stored".to_string() } else { keys.join(", ") }
    );
}
