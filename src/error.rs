//! Structured error types shared across the application.
//!
//! The model layer returns [`PlayerError`] so callers can tell backend,
//! engine and storage failures apart; the binary seams in `main` stay on
//! `anyhow::Result`.

/// Result alias used throughout the model and controller layers.
pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// A request to the remote backend failed (search, auth, library sync).
    #[error("backend request failed: {0}")]
    Backend(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend rejected request: {0}")]
    BackendStatus(u16),

    /// Reading or writing a session record failed.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A persisted record did not parse.
    #[error("corrupt stored state: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// An operation that needs an authenticated user was called signed out.
    #[error("not signed in")]
    SignedOut,
}
