//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dicta",
    version,
    about = "Dictated consultation notes: record, transcribe, structure, copy",
    long_about = "Records a consultation from the microphone, transcribes it through a \
cloud speech API, lets you edit the transcript in $EDITOR, generates a structured \
Markdown note (SOAP by default) through an LLM, and copies it to the clipboard as \
rich text. Running dicta with no subcommand starts a recording."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print diagnostic output
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record a consultation and run the full workflow (default)
    Record(RecordArgs),

    /// Run the workflow on an existing WAV recording
    Transcribe(TranscribeArgs),

    /// Generate a note from an existing transcript
    Note(NoteArgs),

    /// Browse and manage past sessions
    History {
        #[command(subcommand)]
        command: Option<HistoryCommand>,
    },

    /// List and inspect note templates
    Templates {
        #[command(subcommand)]
        command: Option<TemplatesCommand>,
    },

    /// Read or change settings without the wizard
    Config(ConfigArgs),

    /// Interactive setup wizard
    Setup,

    /// List audio input devices
    Devices,
}

#[derive(Args, Default)]
pub struct RecordArgs {
    #[command(flatten)]
    pub note: NoteOptions,

    /// Microphone device name (default: configured or system default)
    #[arg(long)]
    pub device: Option<String>,

    /// Language hint for transcription (ISO 639-1, e.g. "en")
    #[arg(long)]
    pub language: Option<String>,

    /// Skip the $EDITOR review of the transcript
    #[arg(long)]
    pub no_edit: bool,
}

#[derive(Args)]
pub struct TranscribeArgs {
    /// WAV file to transcribe
    pub file: PathBuf,

    #[command(flatten)]
    pub note: NoteOptions,

    /// Language hint for transcription (ISO 639-1, e.g. "en")
    #[arg(long)]
    pub language: Option<String>,

    /// Skip the $EDITOR review of the transcript
    #[arg(long)]
    pub no_edit: bool,
}

#[derive(Args)]
pub struct NoteArgs {
    /// History entry id to take the transcript from
    #[arg(long, conflicts_with = "stdin")]
    pub from: Option<String>,

    /// Read the transcript from standard input
    #[arg(long)]
    pub stdin: bool,

    #[command(flatten)]
    pub note: NoteOptions,
}

/// Options shared by every command that generates a note.
#[derive(Args, Default)]
pub struct NoteOptions {
    /// Template name, or "none" to disable template injection
    #[arg(long)]
    pub template: Option<String>,

    /// Instruction prompt override
    #[arg(long)]
    pub prompt: Option<String>,

    /// Review the note in $EDITOR before copying
    #[arg(long)]
    pub edit_note: bool,

    /// Don't copy the note to the clipboard
    #[arg(long)]
    pub no_copy: bool,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List stored sessions, newest first (default)
    List,
    /// Print one session in full
    Show { id: String },
    /// Re-copy a stored note to the clipboard
    Copy { id: String },
    /// Delete one session
    Delete { id: String },
    /// Delete all sessions
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TemplatesCommand {
    /// List available templates (default)
    List,
    /// Print a template body
    Show { name: String },
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Print the current settings and exit
    #[arg(long)]
    pub show: bool,

    /// Transcription provider (openai, groq, mistral)
    #[arg(long)]
    pub provider: Option<String>,

    /// Note generator (openai, mistral, ollama)
    #[arg(long)]
    pub generator: Option<String>,

    /// OpenAI API key
    #[arg(long, value_name = "KEY")]
    pub openai_api_key: Option<String>,

    /// Groq API key
    #[arg(long, value_name = "KEY")]
    pub groq_api_key: Option<String>,

    /// Mistral API key
    #[arg(long, value_name = "KEY")]
    pub mistral_api_key: Option<String>,

    /// Ollama server URL
    #[arg(long, value_name = "URL")]
    pub ollama_url: Option<String>,

    /// Note generation model override ("default" to clear)
    #[arg(long)]
    pub model: Option<String>,

    /// Instruction prompt ("default" to restore the built-in SOAP prompt)
    #[arg(long)]
    pub note_prompt: Option<String>,

    /// Default template name ("none" to disable)
    #[arg(long)]
    pub template: Option<String>,

    /// Microphone device name ("default" to clear)
    #[arg(long)]
    pub device: Option<String>,

    /// Language hint ("auto" to clear)
    #[arg(long)]
    pub language: Option<String>,

    /// Auto-copy the note to the clipboard (true/false)
    #[arg(long)]
    pub auto_copy: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
