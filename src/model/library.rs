//! Liked songs and playlists, independent of playback

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{PlayerError, Result};
use super::backend::BackendClient;
use super::session::{LibraryRecord, SessionStore, UserProfile};
use super::track::Track;

/// The user's library. Mutations are optimistic: the local record is
/// updated and persisted first, then synced to the backend fire-and-forget.
/// A failed sync is logged and never rolled back.
#[derive(Clone)]
pub struct LibraryStore {
    backend: BackendClient,
    store: SessionStore,
    record: Arc<RwLock<LibraryRecord>>,
    user: Arc<RwLock<Option<UserProfile>>>,
}

impl LibraryStore {
    pub fn new(backend: BackendClient, store: SessionStore) -> Self {
        let record = store.load_library();
        tracing::debug!(
            liked = record.liked.len(),
            playlists = record.playlists.len(),
            "Library loaded"
        );
        Self {
            backend,
            store,
            record: Arc::new(RwLock::new(record)),
            user: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_user(&self, user: Option<UserProfile>) {
        *self.user.write().await = user;
    }

    pub async fn is_signed_in(&self) -> bool {
        self.user.read().await.is_some()
    }

    pub async fn liked(&self) -> Vec<Track> {
        self.record.read().await.liked.clone()
    }

    pub async fn is_liked(&self, track_id: &str) -> bool {
        self.record.read().await.liked.iter().any(|t| t.id == track_id)
    }

    /// Add or remove a like by id, first match wins. Returns the new liked
    /// state. Signed-out callers get [`PlayerError::SignedOut`], which the
    /// controller turns into a prompt rather than an error screen.
    pub async fn toggle_like(&self, track: &Track) -> Result<bool> {
        if !self.is_signed_in().await {
            return Err(PlayerError::SignedOut);
        }

        let now_liked = {
            let mut record = self.record.write().await;
            if let Some(pos) = record.liked.iter().position(|t| t.id == track.id) {
                record.liked.remove(pos);
                false
            } else {
                record.liked.push(track.clone());
                true
            }
        };

        self.persist().await;

        // Best-effort sync; drift between backend and local record is
        // accepted and only observable in the logs.
        let backend = self.backend.clone();
        let track_id = track.id.clone();
        tokio::spawn(async move {
            if let Err(e) = backend.sync_like(&track_id, now_liked).await {
                tracing::warn!(track_id, liked = now_liked, error = %e, "Like sync failed");
            }
        });

        tracing::info!(track_id = %track.id, liked = now_liked, "Like toggled");
        Ok(now_liked)
    }

    async fn persist(&self) {
        let record = self.record.read().await.clone();
        if let Err(e) = self.store.save_library(&record) {
            tracing::warn!(error = %e, "Could not persist library record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::TrackKind;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: id.to_uppercase(),
            artist: "Artist".to_string(),
            cover: String::new(),
            source: format!("https://media.example/{id}"),
            kind: TrackKind::Audio { duration_secs: 60.0 },
        }
    }

    fn library(dir: &tempfile::TempDir) -> LibraryStore {
        LibraryStore::new(
            BackendClient::new("http://127.0.0.1:0"),
            SessionStore::new(dir.path()),
        )
    }

    #[tokio::test]
    async fn signed_out_toggle_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let lib = library(&dir);
        let err = lib.toggle_like(&track("a")).await.unwrap_err();
        assert!(matches!(err, PlayerError::SignedOut));
        assert!(!lib.is_liked("a").await);
    }

    #[tokio::test]
    async fn toggle_is_optimistic_and_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let lib = library(&dir);
        lib.set_user(Some(UserProfile {
            id: "u1".into(),
            display_name: "User".into(),
            token: "tok".into(),
        }))
        .await;

        assert!(lib.toggle_like(&track("a")).await.unwrap());
        assert!(lib.is_liked("a").await);

        // A fresh store over the same directory sees the like even though
        // the backend sync could not have succeeded.
        let reloaded = library(&dir);
        assert!(reloaded.is_liked("a").await);

        assert!(!lib.toggle_like(&track("a")).await.unwrap());
        assert!(!lib.is_liked("a").await);
    }
}
