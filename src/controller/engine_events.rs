//! Playback engine event listener

use crate::engine::{EngineEvent, EngineEventChannel, EngineState};

use super::PlayerController;

impl PlayerController {
    /// Spawn the task that drains engine notifications and reconciles them
    /// into the model. Engine-side errors are logged and stop the local
    /// playing flags; they never surface as user-facing errors.
    pub fn start_engine_event_listener(&self, mut events: EngineEventChannel) {
        let controller = self.clone();
        tracing::info!("Starting engine event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if controller.model.should_quit().await {
                    tracing::debug!("Engine event listener shutting down");
                    break;
                }

                match event {
                    EngineEvent::StateChanged { state } => {
                        tracing::debug!(?state, "EngineEvent::StateChanged");
                        controller.model.confirm_engine_state(state).await;
                        if state == EngineState::Ended {
                            controller.handle_track_ended().await;
                        }
                    }
                    EngineEvent::Progress { played_seconds, duration_seconds } => {
                        tracing::trace!(played_seconds, duration_seconds, "EngineEvent::Progress");
                        controller.model.learn_duration(duration_seconds).await;
                        controller.handle_progress(played_seconds).await;
                    }
                    EngineEvent::TrackError { message } => {
                        tracing::error!(message, "Engine reported a playback error");
                        controller.model.mark_engine_error().await;
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use crate::engine::{EngineEvent, EngineHandle, EngineState};
    use crate::model::{
        AppModel, BackendClient, LibraryStore, PlayState, SessionStore, Track, TrackKind,
    };

    use super::super::PlayerController;

    fn controller(dir: &tempfile::TempDir) -> PlayerController {
        let store = SessionStore::new(dir.path());
        let backend = BackendClient::new("http://127.0.0.1:0");
        let library = LibraryStore::new(backend.clone(), store.clone());
        let model = Arc::new(AppModel::new(backend, library, store));
        let (engine, _commands) = EngineHandle::channel();
        PlayerController::new(model, engine)
    }

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: id.to_uppercase(),
            artist: "Artist".to_string(),
            cover: String::new(),
            source: format!("https://media.example/{id}"),
            kind: TrackKind::Audio { duration_secs: 120.0 },
        }
    }

    #[tokio::test]
    async fn ended_event_marks_single_track_queue_done() {
        let dir = tempfile::tempdir().unwrap();
        let controller = controller(&dir);
        controller.play_track(&track("a")).await;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        controller.start_engine_event_listener(events_rx);

        events_tx.send(EngineEvent::StateChanged { state: EngineState::Playing }).unwrap();
        events_tx
            .send(EngineEvent::Progress { played_seconds: 119.0, duration_seconds: 120.0 })
            .unwrap();
        events_tx.send(EngineEvent::StateChanged { state: EngineState::Ended }).unwrap();

        // Give the listener task a chance to drain.
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert_eq!(controller.model.play_state().await, PlayState::Ended);
    }

    #[tokio::test]
    async fn progress_reports_teach_an_unknown_duration() {
        let dir = tempfile::tempdir().unwrap();
        let controller = controller(&dir);
        let unknown = Track {
            kind: TrackKind::Audio { duration_secs: 0.0 },
            ..track("a")
        };
        controller.play_track(&unknown).await;
        assert_eq!(controller.model.playback_snapshot().await.duration_secs, 0.0);

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        controller.start_engine_event_listener(events_rx);

        events_tx
            .send(EngineEvent::Progress { played_seconds: 1.0, duration_seconds: 300.0 })
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert_eq!(controller.model.playback_snapshot().await.duration_secs, 300.0);
    }

    #[tokio::test]
    async fn track_error_stops_playback_without_ui_error() {
        let dir = tempfile::tempdir().unwrap();
        let controller = controller(&dir);
        controller.play_track(&track("a")).await;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        controller.start_engine_event_listener(events_rx);

        events_tx
            .send(EngineEvent::TrackError { message: "codec unsupported".to_string() })
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert!(!controller.model.is_playing().await);
        assert!(!controller.model.has_error().await);
    }
}
