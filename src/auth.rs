//! Session establishment against the client-trusted backend.
//!
//! The backend hands out a profile and token for any handle, so "signing in"
//! is either reusing the stored user record or exchanging the handle from
//! `TUNEWAVE_USER` for a fresh one. No user means the app still runs, just
//! without library writes.

use crate::model::{BackendClient, SessionStore, UserProfile};

const USER_HANDLE_ENV: &str = "TUNEWAVE_USER";

/// Resolve the session user, preferring the stored record over a fresh
/// login. Returns `None` when neither source yields a user; backend
/// failures degrade to signed-out rather than aborting startup.
pub async fn establish_session(store: &SessionStore, backend: &BackendClient) -> Option<UserProfile> {
    if let Some(user) = store.load_user() {
        tracing::info!(user_id = %user.id, "Reusing stored session");
        backend.set_token(Some(user.token.clone())).await;
        return Some(user);
    }

    let handle = match std::env::var(USER_HANDLE_ENV) {
        Ok(handle) if !handle.is_empty() => handle,
        _ => {
            tracing::info!("No stored session and no {USER_HANDLE_ENV} set, starting signed out");
            return None;
        }
    };

    match backend.login(&handle).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Signed in");
            if let Err(e) = store.save_user(&user) {
                tracing::warn!(error = %e, "Could not persist user record");
            }
            Some(user)
        }
        Err(e) => {
            tracing::warn!(handle, error = %e, "Sign-in failed, starting signed out");
            None
        }
    }
}
