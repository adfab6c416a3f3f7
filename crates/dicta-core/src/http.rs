//! Shared HTTP client for all API calls.
//!
//! A single pooled client keeps TLS sessions warm across the transcription
//! and note-generation requests of one workflow.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;

static CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Get the process-wide reqwest client, building it on first use.
pub fn get_http_client() -> Result<&'static reqwest::Client> {
    if let Some(client) = CLIENT.get() {
        return Ok(client);
    }

    let client = reqwest::Client::builder()
        .build()
        .context("Failed to create HTTP client")?;

    // A concurrent first caller may have won the race; either client is fine.
    let _ = CLIENT.set(client);
    Ok(CLIENT.get().expect("client initialized above"))
}
