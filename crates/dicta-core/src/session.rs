//! Workflow session state machine.
//!
//! One consultation moves linearly through
//! Idle → Recording → Transcribing → TranscriptReady → Generating → NoteReady.
//! There is no failure phase: an error during recording or transcription
//! returns the session to Idle, an error during note generation returns it
//! to TranscriptReady with the transcript intact.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Phase of the consultation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionPhase {
    Idle,
    Recording,
    Transcribing,
    TranscriptReady,
    Generating,
    NoteReady,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Recording => "recording",
            SessionPhase::Transcribing => "transcribing",
            SessionPhase::TranscriptReady => "transcript-ready",
            SessionPhase::Generating => "generating",
            SessionPhase::NoteReady => "note-ready",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("invalid transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: SessionPhase,
        to: SessionPhase,
    },
}

/// A consultation session: phase plus the artifacts produced so far.
#[derive(Debug, Clone, Default)]
pub struct Session {
    phase: SessionPhase,
    transcript: Option<String>,
    note_markdown: Option<String>,
    note_html: Option<String>,
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Idle
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session from a stored transcript (e.g. `dicta note --from`).
    pub fn from_transcript(transcript: impl Into<String>) -> Self {
        Self {
            phase: SessionPhase::TranscriptReady,
            transcript: Some(transcript.into()),
            note_markdown: None,
            note_html: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    pub fn note_markdown(&self) -> Option<&str> {
        self.note_markdown.as_deref()
    }

    pub fn note_html(&self) -> Option<&str> {
        self.note_html.as_deref()
    }

    fn transition(&mut self, from: SessionPhase, to: SessionPhase) -> Result<(), SessionError> {
        if self.phase != from {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }

    pub fn begin_recording(&mut self) -> Result<(), SessionError> {
        self.transition(SessionPhase::Idle, SessionPhase::Recording)
    }

    pub fn begin_transcribing(&mut self) -> Result<(), SessionError> {
        self.transition(SessionPhase::Recording, SessionPhase::Transcribing)
    }

    /// Store the transcript and move to TranscriptReady.
    pub fn set_transcript(&mut self, transcript: impl Into<String>) -> Result<(), SessionError> {
        self.transition(SessionPhase::Transcribing, SessionPhase::TranscriptReady)?;
        self.transcript = Some(transcript.into());
        Ok(())
    }

    /// Replace the transcript with the user's edited version.
    pub fn edit_transcript(&mut self, transcript: impl Into<String>) -> Result<(), SessionError> {
        if self.phase != SessionPhase::TranscriptReady {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                to: SessionPhase::TranscriptReady,
            });
        }
        self.transcript = Some(transcript.into());
        Ok(())
    }

    pub fn begin_generating(&mut self) -> Result<(), SessionError> {
        self.transition(SessionPhase::TranscriptReady, SessionPhase::Generating)
    }

    /// Store the generated note (Markdown + rendered HTML), move to NoteReady.
    pub fn set_note(
        &mut self,
        markdown: impl Into<String>,
        html: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.transition(SessionPhase::Generating, SessionPhase::NoteReady)?;
        self.note_markdown = Some(markdown.into());
        self.note_html = Some(html.into());
        Ok(())
    }

    /// Recording or transcription failed: back to Idle, artifacts dropped.
    pub fn fail_capture(&mut self) {
        self.phase = SessionPhase::Idle;
        self.transcript = None;
    }

    /// Note generation failed: back to TranscriptReady, transcript kept.
    pub fn fail_generation(&mut self) {
        self.phase = SessionPhase::TranscriptReady;
        self.note_markdown = None;
        self.note_html = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_transcript() -> Session {
        let mut session = Session::new();
        session.begin_recording().unwrap();
        session.begin_transcribing().unwrap();
        session.set_transcript("patient reports cough").unwrap();
        session
    }

    #[test]
    fn full_workflow_reaches_note_ready() {
        let mut session = session_with_transcript();
        session.begin_generating().unwrap();
        session.set_note("## Subjective\n- cough", "<h2>Subjective</h2>").unwrap();

        assert_eq!(session.phase(), SessionPhase::NoteReady);
        assert_eq!(session.transcript(), Some("patient reports cough"));
        assert!(session.note_markdown().unwrap().contains("Subjective"));
    }

    #[test]
    fn cannot_generate_before_transcript() {
        let mut session = Session::new();
        let err = session.begin_generating().unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                from: SessionPhase::Idle,
                to: SessionPhase::Generating,
            }
        );
    }

    #[test]
    fn cannot_record_twice() {
        let mut session = Session::new();
        session.begin_recording().unwrap();
        assert!(session.begin_recording().is_err());
    }

    #[test]
    fn edit_replaces_transcript_in_place() {
        let mut session = session_with_transcript();
        session.edit_transcript("patient reports dry cough").unwrap();
        assert_eq!(session.phase(), SessionPhase::TranscriptReady);
        assert_eq!(session.transcript(), Some("patient reports dry cough"));
    }

    #[test]
    fn edit_outside_transcript_ready_is_rejected() {
        let mut session = Session::new();
        assert!(session.edit_transcript("nope").is_err());
    }

    #[test]
    fn generation_failure_keeps_transcript() {
        let mut session = session_with_transcript();
        session.begin_generating().unwrap();
        session.fail_generation();

        assert_eq!(session.phase(), SessionPhase::TranscriptReady);
        assert_eq!(session.transcript(), Some("patient reports cough"));
        // The transcript survives, so generation can be retried
        assert!(session.begin_generating().is_ok());
    }

    #[test]
    fn capture_failure_resets_to_idle() {
        let mut session = Session::new();
        session.begin_recording().unwrap();
        session.fail_capture();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.begin_recording().is_ok());
    }

    #[test]
    fn phase_serializes_kebab_case() {
        let json = serde_json::to_string(&SessionPhase::TranscriptReady).unwrap();
        assert_eq!(json, "\"transcript-ready\"");
    }
}
