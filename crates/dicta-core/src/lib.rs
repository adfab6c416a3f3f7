pub mod audio;
pub mod clipboard;
pub mod config;
pub mod history;
pub mod http;
pub mod markdown;
pub mod note;
pub mod provider;
pub mod session;
pub mod settings;
pub mod transcribe;
pub mod verbose;

pub use audio::{AudioRecorder, RecordingData, encode_wav, list_input_devices};
pub use clipboard::{copy_rich, copy_text};
pub use config::TranscriptionProvider;
pub use history::{HISTORY_CAP, HistoryEntry, HistoryStore};
pub use markdown::markdown_to_html;
pub use note::{
    DEFAULT_NOTE_PROMPT, NoteGenerator, NoteRequest, generate_note, resolve_note_request,
};
pub use note::template::{NoteTemplate, list_templates, load_template};
pub use provider::{
    ProgressFn, TranscriptionBackend, TranscriptionRequest, TranscriptionResult,
    TranscriptionStage, registry,
};
pub use session::{Session, SessionError, SessionPhase};
pub use settings::Settings;
pub use transcribe::transcribe_audio;
pub use verbose::set_verbose;
