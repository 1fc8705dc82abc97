//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and the playback engine, and manages the
//! queue. It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `transport`: Queue and transport control methods
//! - `navigation`: Search/browse/library navigation
//! - `engine_events`: Playback engine event listener
//! - `autoplay`: Continuation worker fed by queue notices

mod autoplay;
mod engine_events;
mod input;
mod navigation;
mod transport;

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::sync::mpsc;

use crate::engine::EngineHandle;
use crate::error::PlayerError;
use crate::model::{AppModel, Track};

pub use autoplay::start_autoplay_worker;

/// Notices about the queue running out, delivered to every subscriber.
#[derive(Clone, Debug)]
pub enum QueueNotice {
    /// The last queued track is inside its end window; `Track` is that track.
    ApproachingEnd(Track),
    /// The last queued track finished with nothing left to advance to.
    QueueEnded(Track),
}

#[derive(Clone)]
pub struct PlayerController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) engine: EngineHandle,
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<QueueNotice>>>>,
}

impl PlayerController {
    pub fn new(model: Arc<AppModel>, engine: EngineHandle) -> Self {
        Self {
            model,
            engine,
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a queue notice listener. Every subscriber gets every notice;
    /// a dropped receiver is pruned on the next send.
    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<QueueNotice> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().await.push(tx);
        rx
    }

    pub(crate) async fn notify(&self, notice: QueueNotice) {
        let mut subscribers = self.subscribers.lock().await;
        subscribers.retain(|tx| tx.send(notice.clone()).is_ok());
    }

    pub(crate) fn format_error(error: &PlayerError) -> String {
        match error {
            PlayerError::SignedOut => "Sign in to save songs to your library.".to_string(),
            PlayerError::BackendStatus(401) => {
                "Session expired. Please restart the app.".to_string()
            }
            PlayerError::BackendStatus(429) => "Rate limited. Please wait a moment.".to_string(),
            PlayerError::BackendStatus(status) => format!("Backend error ({status})."),
            PlayerError::Backend(_) => "Could not reach the backend. Check your connection.".to_string(),
            other => format!("Error: {other}"),
        }
    }
}
