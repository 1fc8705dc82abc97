//! Remote backend client: search, continuations, sign-in, library sync

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{PlayerError, Result};
use super::session::UserProfile;
use super::track::{ContentKind, Track, TrackKind};

pub const DEFAULT_BASE_URL: &str = "https://api.tunewave.dev";
pub const SEARCH_LIMIT: usize = 40;

/// Wire shape of a playable item as the backend returns it.
#[derive(Debug, Deserialize)]
struct TrackDto {
    id: String,
    title: String,
    artist: String,
    #[serde(default)]
    cover: String,
    #[serde(rename = "streamUrl")]
    stream_url: String,
    #[serde(default)]
    live: bool,
    #[serde(default, rename = "durationSec")]
    duration_sec: f64,
}

impl From<TrackDto> for Track {
    fn from(dto: TrackDto) -> Self {
        let kind = if dto.live {
            TrackKind::LiveVideo
        } else {
            TrackKind::Audio { duration_secs: dto.duration_sec }
        };
        Track {
            id: dto.id,
            title: dto.title,
            artist: dto.artist,
            cover: dto.cover,
            source: dto.stream_url,
            kind,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    id: String,
    #[serde(rename = "displayName")]
    display_name: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct LikeSync<'a> {
    #[serde(rename = "trackId")]
    track_id: &'a str,
    liked: bool,
}

/// HTTP client for the streaming backend. Cheap to clone; the bearer token
/// is shared so a sign-in is visible to every clone.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Base URL from `TUNEWAVE_BACKEND`, falling back to the default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("TUNEWAVE_BACKEND").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        let mut request = self.http.get(format!("{}{}", self.base_url, path)).query(query);
        if let Some(token) = self.token.read().await.as_deref() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlayerError::BackendStatus(status.as_u16()));
        }
        Ok(response)
    }

    /// Text search. The content kind is a routing hint for the backend and
    /// nothing more.
    pub async fn search(&self, query: &str, kind: ContentKind, limit: usize) -> Result<Vec<Track>> {
        tracing::debug!(query, kind = kind.as_str(), "API: search");
        let limit = limit.to_string();
        let response = self
            .get("/v1/search", &[("q", query), ("type", kind.as_str()), ("limit", &limit)])
            .await?;
        let hits: Vec<TrackDto> = response.json().await?;
        tracing::info!(query, count = hits.len(), "Search completed");
        Ok(hits.into_iter().map(Track::from).collect())
    }

    /// Continuation suggestions for a finished or finishing track.
    pub async fn similar(&self, track: &Track, limit: usize) -> Result<Vec<Track>> {
        tracing::debug!(track_id = %track.id, "API: similar");
        let limit = limit.to_string();
        let response = self
            .get("/v1/similar", &[("trackId", track.id.as_str()), ("limit", &limit)])
            .await?;
        let hits: Vec<TrackDto> = response.json().await?;
        Ok(hits.into_iter().map(Track::from).collect())
    }

    /// Client-trusted sign-in: the backend hands back a profile and token
    /// for whatever handle we present.
    pub async fn login(&self, handle: &str) -> Result<UserProfile> {
        tracing::debug!(handle, "API: login");
        let response = self
            .http
            .post(format!("{}/v1/auth/login", self.base_url))
            .json(&serde_json::json!({ "handle": handle }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlayerError::BackendStatus(status.as_u16()));
        }
        let login: LoginResponse = response.json().await?;
        self.set_token(Some(login.token.clone())).await;
        Ok(UserProfile {
            id: login.id,
            display_name: login.display_name,
            token: login.token,
        })
    }

    /// Push one like/unlike to the backend. Callers treat this as
    /// best-effort; failures are theirs to log.
    pub async fn sync_like(&self, track_id: &str, liked: bool) -> Result<()> {
        let mut request = self
            .http
            .put(format!("{}/v1/library/likes", self.base_url))
            .json(&LikeSync { track_id, liked });
        if let Some(token) = self.token.read().await.as_deref() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlayerError::BackendStatus(status.as_u16()));
        }
        Ok(())
    }
}
