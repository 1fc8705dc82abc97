//! Local session records: user, library, recent searches.
//!
//! Three small JSON files under one root directory (default `.cache/`),
//! each loaded independently at startup and rewritten wholesale on every
//! mutation. A record that fails to parse is treated as absent; nothing
//! here is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use super::track::Track;

const USER_FILE: &str = "user.json";
const LIBRARY_FILE: &str = "library.json";
const SEARCH_HISTORY_FILE: &str = "search_history.json";

/// Upper bound on remembered recent searches.
pub const RECENT_SEARCH_LIMIT: usize = 5;

/// The signed-in user, token included (the backend trusts the client).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub token: String,
}

/// A named track list owned by the user.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<Track>,
}

/// Liked songs and playlists, persisted as one record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LibraryRecord {
    pub liked: Vec<Track>,
    pub playlists: Vec<Playlist>,
}

/// File-backed session store.
#[derive(Clone, Debug)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    fn load_or_default<T: Default + for<'de> Deserialize<'de>>(&self, file: &str) -> T {
        match self.read_record(&self.path(file)) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::debug!(file, error = %e, "Stored record unreadable, using defaults");
                T::default()
            }
        }
    }

    fn read_record<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write_record<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        let content = serde_json::to_string(value)?;
        fs::write(self.path(file), content)?;
        Ok(())
    }

    pub fn load_user(&self) -> Option<UserProfile> {
        self.load_or_default::<Option<UserProfile>>(USER_FILE)
    }

    pub fn save_user(&self, user: &UserProfile) -> Result<()> {
        self.write_record(USER_FILE, &Some(user))
    }

    pub fn load_library(&self) -> LibraryRecord {
        self.load_or_default(LIBRARY_FILE)
    }

    pub fn save_library(&self, record: &LibraryRecord) -> Result<()> {
        self.write_record(LIBRARY_FILE, record)
    }

    pub fn load_search_history(&self) -> Vec<String> {
        self.load_or_default(SEARCH_HISTORY_FILE)
    }

    /// Push a query to the front of the history, deduplicated, bounded to
    /// [`RECENT_SEARCH_LIMIT`], and persist the result.
    pub fn record_search(&self, history: &mut Vec<String>, query: &str) {
        history.retain(|q| q != query);
        history.insert(0, query.to_string());
        history.truncate(RECENT_SEARCH_LIMIT);
        if let Err(e) = self.write_record(SEARCH_HISTORY_FILE, history) {
            tracing::warn!(error = %e, "Could not persist search history");
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(".cache")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::TrackKind;

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn missing_records_yield_defaults() {
        let (_dir, store) = store();
        assert!(store.load_user().is_none());
        assert!(store.load_library().liked.is_empty());
        assert!(store.load_search_history().is_empty());
    }

    #[test]
    fn corrupt_record_falls_back_to_defaults() {
        let (dir, store) = store();
        fs::write(dir.path().join(LIBRARY_FILE), "{not json").unwrap();
        fs::write(dir.path().join(USER_FILE), "[]").unwrap();
        assert!(store.load_library().liked.is_empty());
        assert!(store.load_user().is_none());
    }

    #[test]
    fn library_round_trips() {
        let (_dir, store) = store();
        let record = LibraryRecord {
            liked: vec![Track {
                id: "a".into(),
                title: "A".into(),
                artist: "B".into(),
                cover: String::new(),
                source: "https://media.example/a".into(),
                kind: TrackKind::Audio { duration_secs: 60.0 },
            }],
            playlists: vec![Playlist {
                id: "p1".into(),
                name: "Morning".into(),
                tracks: vec![],
            }],
        };
        store.save_library(&record).unwrap();
        let loaded = store.load_library();
        assert_eq!(loaded.liked.len(), 1);
        assert_eq!(loaded.liked[0].id, "a");
        assert_eq!(loaded.playlists[0].name, "Morning");
    }

    #[test]
    fn search_history_is_bounded_and_deduplicated() {
        let (_dir, store) = store();
        let mut history = Vec::new();
        for q in ["one", "two", "three", "four", "five", "six"] {
            store.record_search(&mut history, q);
        }
        assert_eq!(history.len(), RECENT_SEARCH_LIMIT);
        assert_eq!(history[0], "six");
        assert!(!history.contains(&"one".to_string()));

        store.record_search(&mut history, "three");
        assert_eq!(history[0], "three");
        assert_eq!(history.iter().filter(|q| *q == "three").count(), 1);

        // Reload sees the same list.
        assert_eq!(store.load_search_history(), history);
    }
}
