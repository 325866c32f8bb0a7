//! Session persistence.
//!
//! Sessions are opaque blobs to the rest of the core: the store only reads
//! and writes whole [`Session`] values. [`FileSessionStore`] keeps one pretty
//! JSON file per session, named `<id>.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::Session;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid session data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("session not found: {0}")]
    NotFound(String),

    #[error("invalid session id: {0:?}")]
    InvalidId(String),
}

/// Listing entry; avoids handing out full event vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub name: String,
    pub started_at: i64,
    pub ended_at: Option<i64>,
    pub event_count: usize,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            name: session.name.clone(),
            started_at: session.started_at,
            ended_at: session.ended_at,
            event_count: session.events.len(),
        }
    }
}

pub trait SessionStore {
    fn load(&self, id: &str) -> Result<Session, StorageError>;

    fn save(&self, session: &Session) -> Result<(), StorageError>;

    /// All stored sessions, newest first.
    fn list(&self) -> Result<Vec<SessionSummary>, StorageError>;

    fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// Write a session to an arbitrary path.
    fn export(&self, id: &str, path: &Path) -> Result<(), StorageError>;

    /// Read a session file from an arbitrary path and add it to the store.
    fn import(&self, path: &Path) -> Result<Session, StorageError>;
}

/// `<data dir>/pedtrack/sessions`
pub fn default_sessions_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pedtrack")
        .join("sessions")
}

pub struct FileSessionStore {
    sessions_dir: PathBuf,
}

impl FileSessionStore {
    /// Store in the default sessions directory.
    pub fn new() -> Self {
        Self::with_dir(default_sessions_dir())
    }

    /// Store in a custom directory (useful for testing).
    pub fn with_dir(sessions_dir: impl Into<PathBuf>) -> Self {
        Self {
            sessions_dir: sessions_dir.into(),
        }
    }

    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    fn session_path(&self, id: &str) -> Result<PathBuf, StorageError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidId(id.to_string()));
        }
        Ok(self.sessions_dir.join(format!("{id}.json")))
    }

    fn read_session(path: &Path) -> Result<Session, StorageError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn write_session(path: &Path, session: &Session) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(session)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, id: &str) -> Result<Session, StorageError> {
        let path = self.session_path(id)?;
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Self::read_session(&path)
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        let path = self.session_path(&session.id)?;
        fs::create_dir_all(&self.sessions_dir)?;
        Self::write_session(&path, session)?;
        tracing::debug!(id = %session.id, events = session.events.len(), "Session saved");
        Ok(())
    }

    fn list(&self) -> Result<Vec<SessionSummary>, StorageError> {
        if !self.sessions_dir.exists() {
            return Ok(Vec::new());
        }

        let mut summaries = Vec::new();
        for entry in fs::read_dir(&self.sessions_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match Self::read_session(&path) {
                Ok(session) => summaries.push(SessionSummary::from(&session)),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable session file"),
            }
        }

        summaries.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(summaries)
    }

    fn delete(&self, id: &str) -> Result<(), StorageError> {
        let path = self.session_path(id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(id = %id, "Session deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn export(&self, id: &str, path: &Path) -> Result<(), StorageError> {
        let session = self.load(id)?;
        fs::write(path, serde_json::to_string_pretty(&session)?)?;
        Ok(())
    }

    fn import(&self, path: &Path) -> Result<Session, StorageError> {
        let session = Self::read_session(path)?;
        self.save(&session)?;
        tracing::info!(id = %session.id, path = %path.display(), "Session imported");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::loadout::StandardCostModel;

    fn sample(name: &str, started_at: i64) -> Session {
        let mut session = Session::new(name, 0.05);
        session.started_at = started_at;
        let event = classify("2025-03-01 10:00:00 [System] [] You inflicted 10.0 points of damage").unwrap();
        session.add_event(event, None, &StandardCostModel);
        session
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::with_dir(dir.path().join("sessions"));
        let session = sample("first", 1);

        store.save(&session).unwrap();
        assert!(dir.path().join("sessions").join(format!("{}.json", session.id)).exists());
        assert_eq!(store.load(&session.id).unwrap(), session);
    }

    #[test]
    fn test_list_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::with_dir(dir.path());
        store.save(&sample("old", 100)).unwrap();
        store.save(&sample("new", 200)).unwrap();
        std::fs::write(dir.path().join("garbage.json"), "not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let list = store.list().unwrap();
        let names: Vec<&str> = list.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["new", "old"]);
        assert_eq!(list[0].event_count, 1);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::with_dir(dir.path().join("nope"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::with_dir(dir.path());
        let session = sample("gone", 1);
        store.save(&session).unwrap();

        store.delete(&session.id).unwrap();
        assert!(matches!(store.load(&session.id), Err(StorageError::NotFound(_))));
        assert!(matches!(store.delete(&session.id), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_export_import() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let source = FileSessionStore::with_dir(src.path());
        let target = FileSessionStore::with_dir(dst.path().join("sessions"));
        let session = sample("moved", 1);
        source.save(&session).unwrap();

        let file = src.path().join("export.json");
        source.export(&session.id, &file).unwrap();
        let imported = target.import(&file).unwrap();
        assert_eq!(imported, session);
        assert_eq!(target.load(&session.id).unwrap(), session);
    }

    #[test]
    fn test_rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::with_dir(dir.path());
        assert!(matches!(store.load("../etc/passwd"), Err(StorageError::InvalidId(_))));
        assert!(matches!(store.delete(""), Err(StorageError::InvalidId(_))));
    }
}
