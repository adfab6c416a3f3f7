//! Bounded session history.
//!
//! Finished (and half-finished) sessions are kept in one JSON file under the
//! platform data directory, newest first, capped at `HISTORY_CAP` entries.
//! A corrupt file degrades to an empty history rather than an error.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::session::SessionPhase;

/// Maximum number of retained entries.
pub const HISTORY_CAP: usize = 50;

/// One recorded session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub transcript: String,
    /// Generated note, absent when the session stopped at the transcript
    #[serde(default)]
    pub note_markdown: Option<String>,
    #[serde(default)]
    pub note_html: Option<String>,
    /// Terminal phase of the session (TranscriptReady or NoteReady)
    pub phase: SessionPhase,
    /// Transcription provider identifier
    pub provider: String,
    /// Note generator identifier, absent when no note was generated
    #[serde(default)]
    pub generator: Option<String>,
}

impl HistoryEntry {
    /// Build an entry stamped with a fresh id and the current time.
    pub fn new(
        transcript: String,
        note_markdown: Option<String>,
        note_html: Option<String>,
        phase: SessionPhase,
        provider: String,
        generator: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string()[..8].to_string(),
            created_at: Utc::now(),
            transcript,
            note_markdown,
            note_html,
            phase,
            provider,
            generator,
        }
    }
}

/// File-backed history store.
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Default history file path (`<data>/dicta/history.json`).
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join("dicta").join("history.json"))
            .context("Cannot determine data directory")
    }

    /// Open the store at the default location.
    pub fn open() -> Result<Self> {
        Ok(Self::open_at(Self::default_path()?))
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::read_entries(&path);
        Self { path, entries }
    }

    fn read_entries(path: &Path) -> Vec<HistoryEntry> {
        if !path.exists() {
            return Vec::new();
        }
        match fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|json| serde_json::from_str(&json).map_err(anyhow::Error::from))
        {
            Ok(entries) => entries,
            Err(e) => {
                crate::verbose!("Failed to read history, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Look up an entry by id, accepting unique id prefixes.
    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        let mut matches = self.entries.iter().filter(|e| e.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(entry), None) => Some(entry),
            _ => None,
        }
    }

    /// Prepend an entry, enforce the cap, persist.
    pub fn record(&mut self, entry: HistoryEntry) -> Result<()> {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAP);
        self.save()
    }

    /// Remove one entry by id. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// Drop all entries.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {parent:?}"))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {:?}", self.path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(transcript: &str) -> HistoryEntry {
        HistoryEntry::new(
            transcript.to_string(),
            Some("## Note".to_string()),
            Some("<h2>Note</h2>".to_string()),
            SessionPhase::NoteReady,
            "openai".to_string(),
            Some("openai".to_string()),
        )
    }

    #[test]
    fn newest_entry_is_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = HistoryStore::open_at(dir.path().join("history.json"));

        store.record(entry("first")).unwrap();
        store.record(entry("second")).unwrap();

        assert_eq!(store.entries()[0].transcript, "second");
        assert_eq!(store.entries()[1].transcript, "first");
    }

    #[test]
    fn cap_is_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = HistoryStore::open_at(dir.path().join("history.json"));

        for i in 0..(HISTORY_CAP + 10) {
            store.record(entry(&format!("t{i}"))).unwrap();
        }

        assert_eq!(store.entries().len(), HISTORY_CAP);
        // The newest survives the cap, the oldest were dropped
        assert_eq!(store.entries()[0].transcript, format!("t{}", HISTORY_CAP + 9));
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let id = {
            let mut store = HistoryStore::open_at(&path);
            let e = entry("persisted");
            let id = e.id.clone();
            store.record(e).unwrap();
            id
        };

        let store = HistoryStore::open_at(&path);
        assert_eq!(store.entries().len(), 1);
        let found = store.get(&id).unwrap();
        assert_eq!(found.transcript, "persisted");
        assert_eq!(found.phase, SessionPhase::NoteReady);
    }

    #[test]
    fn id_prefix_lookup_requires_uniqueness() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = HistoryStore::open_at(dir.path().join("history.json"));

        let mut a = entry("a");
        a.id = "abc12345".to_string();
        let mut b = entry("b");
        b.id = "abd67890".to_string();
        store.record(a).unwrap();
        store.record(b).unwrap();

        assert!(store.get("abc").is_some());
        // "ab" matches both entries
        assert!(store.get("ab").is_none());
        assert!(store.get("zzz").is_none());
    }

    #[test]
    fn delete_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = HistoryStore::open_at(dir.path().join("history.json"));

        let e = entry("deleted");
        let id = e.id.clone();
        store.record(e).unwrap();
        store.record(entry("kept")).unwrap();

        assert!(store.delete(&id).unwrap());
        assert!(!store.delete(&id).unwrap());
        assert_eq!(store.entries().len(), 1);

        store.clear().unwrap();
        assert!(store.entries().is_empty());
    }

    #[test]
    fn corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{not json").unwrap();

        let store = HistoryStore::open_at(&path);
        assert!(store.entries().is_empty());
    }
}
