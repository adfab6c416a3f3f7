//! LLM-based structured note generation.
//!
//! The edited transcript is sent to a chat-completions API together with an
//! instruction prompt and, optionally, a template block that biases the
//! output structure. The result is a Markdown note (SOAP by default).
//!
//! # Supported generators
//!
//! - **OpenAI** - GPT models via chat completions
//! - **Mistral** - Mistral models via chat completions
//! - **Ollama** - local models (server URL instead of an API key)

pub mod template;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::http::get_http_client;
use crate::settings::Settings;
use template::NoteTemplate;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const MISTRAL_CHAT_URL: &str = "https://api.mistral.ai/v1/chat/completions";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

const DEFAULT_OPENAI_MODEL: &str = "gpt-5-mini";
const DEFAULT_MISTRAL_MODEL: &str = "mistral-small-latest";

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

/// Default instruction prompt: a clinical SOAP note.
pub const DEFAULT_NOTE_PROMPT: &str = "You are a clinical documentation assistant. \
Turn the consultation transcript into a structured SOAP note in Markdown with the \
headings Subjective, Objective, Assessment and Plan. \
Only include information stated in the transcript; never invent findings. \
Use concise clinical language and bullet points where natural. \
Output only the note, no commentary.";

/// Available note generators (LLM chat backends)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum NoteGenerator {
    #[default]
    OpenAI,
    Mistral,
    Ollama,
}

impl NoteGenerator {
    /// Cloud generators need an API key; Ollama needs a server URL.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, NoteGenerator::OpenAI | NoteGenerator::Mistral)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NoteGenerator::OpenAI => "OpenAI",
            NoteGenerator::Mistral => "Mistral",
            NoteGenerator::Ollama => "Ollama",
        }
    }

    pub fn all() -> &'static [NoteGenerator] {
        &[
            NoteGenerator::OpenAI,
            NoteGenerator::Mistral,
            NoteGenerator::Ollama,
        ]
    }
}

impl fmt::Display for NoteGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteGenerator::OpenAI => write!(f, "openai"),
            NoteGenerator::Mistral => write!(f, "mistral"),
            NoteGenerator::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for NoteGenerator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(NoteGenerator::OpenAI),
            "mistral" => Ok(NoteGenerator::Mistral),
            "ollama" => Ok(NoteGenerator::Ollama),
            _ => Err(format!(
                "Unknown note generator: {}. Use 'openai', 'mistral', or 'ollama'",
                s
            )),
        }
    }
}

/// Everything needed to run one note generation.
#[derive(Debug, Clone)]
pub struct NoteRequest {
    /// Which chat backend to use
    pub generator: NoteGenerator,
    /// API key (OpenAI/Mistral) or server URL (Ollama)
    pub api_key_or_url: String,
    /// Model override (falls back to the generator default)
    pub model: Option<String>,
    /// Instruction prompt
    pub prompt: String,
    /// Optional structure template injected into the system prompt
    pub template: Option<NoteTemplate>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

/// Compose the system prompt from the instruction prompt and template.
fn build_system_prompt(prompt: &str, template: Option<&NoteTemplate>) -> String {
    match template {
        Some(t) => format!(
            "{prompt}\n\nFollow the structure of this example template:\n\n{}",
            t.body.trim()
        ),
        None => prompt.to_string(),
    }
}

/// Generate a structured Markdown note from a transcript.
pub async fn generate_note(transcript: &str, request: &NoteRequest) -> Result<String> {
    if transcript.trim().is_empty() {
        anyhow::bail!("Transcript is empty");
    }

    let system_prompt = build_system_prompt(&request.prompt, request.template.as_ref());

    crate::verbose!(
        "Generating note via {} ({})",
        request.generator.display_name(),
        request.model.as_deref().unwrap_or("default model")
    );

    match request.generator {
        NoteGenerator::OpenAI => {
            chat_completion(
                OPENAI_CHAT_URL,
                &request.api_key_or_url,
                request.model.as_deref().unwrap_or(DEFAULT_OPENAI_MODEL),
                &system_prompt,
                transcript,
            )
            .await
        }
        NoteGenerator::Mistral => {
            chat_completion(
                MISTRAL_CHAT_URL,
                &request.api_key_or_url,
                request.model.as_deref().unwrap_or(DEFAULT_MISTRAL_MODEL),
                &system_prompt,
                transcript,
            )
            .await
        }
        NoteGenerator::Ollama => {
            ollama_chat(
                &request.api_key_or_url,
                request.model.as_deref().unwrap_or(DEFAULT_OLLAMA_MODEL),
                &system_prompt,
                transcript,
            )
            .await
        }
    }
}

async fn chat_completion(
    api_url: &str,
    api_key: &str,
    model: &str,
    system_prompt: &str,
    transcript: &str,
) -> Result<String> {
    let client = get_http_client()?;
    let response = client
        .post(api_url)
        .header("Authorization", format!("Bearer {}", api_key))
        .json(&serde_json::json!({
            "model": model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": transcript}
            ]
        }))
        .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await?;
        return Err(anyhow!("Note generation failed ({status}): {error_text}"));
    }

    let chat_response: ChatResponse = response.json().await?;
    chat_response
        .choices
        .first()
        .map(|c| c.message.content.trim().to_string())
        .ok_or_else(|| anyhow!("No response from model"))
}

async fn ollama_chat(
    server_url: &str,
    model: &str,
    system_prompt: &str,
    transcript: &str,
) -> Result<String> {
    let base_url = if server_url.is_empty() {
        DEFAULT_OLLAMA_URL
    } else {
        server_url
    };
    let url = format!("{}/api/chat", base_url.trim_end_matches('/'));

    let client = get_http_client()?;
    let response = client
        .post(&url)
        .json(&serde_json::json!({
            "model": model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": transcript}
            ],
            "stream": false
        }))
        // Local models can be slow to first token
        .timeout(std::time::Duration::from_secs(120))
        .send()
        .await
        .map_err(|e| {
            if e.is_connect() {
                anyhow!(
                    "Cannot connect to Ollama at {}. Is Ollama running? Start with: ollama serve",
                    base_url
                )
            } else {
                anyhow!("Ollama request failed: {}", e)
            }
        })?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(anyhow!("Ollama note generation failed: {}", error_text));
    }

    let ollama_response: OllamaResponse = response.json().await?;
    Ok(ollama_response.message.content.trim().to_string())
}

/// Resolve a note request from settings plus optional per-run overrides.
///
/// Validates that the configured generator has its API key or server URL
/// before any network call is made.
pub fn resolve_note_request(
    settings: &Settings,
    template_override: Option<&str>,
    prompt_override: Option<&str>,
) -> Result<NoteRequest> {
    let generator = settings.note.generator.clone();

    let prompt = prompt_override
        .map(|p| p.to_string())
        .or_else(|| settings.note.prompt.clone())
        .unwrap_or_else(|| DEFAULT_NOTE_PROMPT.to_string());

    // Template priority: per-run override > configured default > none
    let template_name = template_override
        .map(|t| t.to_string())
        .or_else(|| settings.note.template.clone());
    let template = match template_name.as_deref() {
        Some("none") | None => None,
        Some(name) => Some(template::load_template(name)?),
    };

    let api_key_or_url = match generator {
        NoteGenerator::Ollama => settings.note.ollama_url.clone(),
        NoteGenerator::OpenAI | NoteGenerator::Mistral => settings
            .note_api_key()
            .ok_or_else(|| {
                anyhow!(
                    "{} API key not configured. Run: dicta setup",
                    generator.display_name()
                )
            })?,
    };

    Ok(NoteRequest {
        generator,
        api_key_or_url,
        model: settings.note.model.clone(),
        prompt,
        template,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_without_template_is_the_instruction() {
        let prompt = build_system_prompt("Write a note.", None);
        assert_eq!(prompt, "Write a note.");
    }

    #[test]
    fn system_prompt_injects_template_body() {
        let template = NoteTemplate {
            name: "soap".to_string(),
            body: "## Subjective\n## Objective\n".to_string(),
        };
        let prompt = build_system_prompt("Write a note.", Some(&template));
        assert!(prompt.starts_with("Write a note."));
        assert!(prompt.contains("## Subjective"));
        assert!(!prompt.ends_with('\n'));
    }

    #[tokio::test]
    async fn empty_transcript_is_rejected_without_network() {
        let request = NoteRequest {
            generator: NoteGenerator::OpenAI,
            api_key_or_url: "sk-test".to_string(),
            model: None,
            prompt: DEFAULT_NOTE_PROMPT.to_string(),
            template: None,
        };
        assert!(generate_note("   ", &request).await.is_err());
    }

    #[test]
    fn generator_round_trips_through_str() {
        for generator in NoteGenerator::all() {
            let parsed: NoteGenerator = generator.to_string().parse().unwrap();
            assert_eq!(&parsed, generator);
        }
    }
}
