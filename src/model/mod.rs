//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (enums, UI state, etc.)
//! - `track`: Playable tracks and content kinds
//! - `queue`: The playback queue and its cursor
//! - `playback`: Playback status (intent, confirmations, progress timing)
//! - `content`: Content view data (search results, liked songs, the queue view)
//! - `session`: File-backed session records (user, library, searches)
//! - `library`: Liked songs and playlists
//! - `backend`: Streaming backend HTTP client
//! - `app_model`: Main application model with state management methods

mod app_model;
mod backend;
mod content;
mod library;
mod playback;
mod queue;
mod session;
mod track;
mod types;

// Re-export all public types for convenient access
pub use types::{ActiveSection, BrowseEntry, UiState};

pub use track::{ContentKind, Track, TrackKind};

pub use queue::PlayQueue;

pub use playback::{
    PREFETCH_WINDOW_SECS, PlayState, PlaybackSnapshot, PlaybackStatus, ProgressTiming,
};

pub use content::{ContentState, ContentView};

pub use session::{LibraryRecord, Playlist, RECENT_SEARCH_LIMIT, SessionStore, UserProfile};

pub use library::LibraryStore;

pub use backend::{BackendClient, DEFAULT_BASE_URL, SEARCH_LIMIT};

pub use app_model::AppModel;
