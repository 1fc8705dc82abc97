//! Queue and transport control methods
//!
//! Every method here follows the same shape: mutate the model optimistically,
//! relay the matching command to the engine fire-and-forget, and let the
//! engine event listener reconcile later.

use crate::engine::EngineCommand;
use crate::model::Track;

use super::{PlayerController, QueueNotice};

/// Step size for the volume keys, in percent.
pub const VOLUME_STEP: u8 = 5;

/// Step size for the seek keys, in seconds.
pub const SEEK_STEP_SECS: f64 = 5.0;

impl PlayerController {
    /// Play a single track, collapsing the queue to just that track.
    pub async fn play_track(&self, track: &Track) {
        self.play_track_with_queue(track, None).await;
    }

    /// Play `track` in the context of `queue`. When a queue is given it
    /// replaces the current one and the cursor lands on the first item with
    /// the track's id, or on the head if the id is absent.
    pub async fn play_track_with_queue(&self, track: &Track, queue: Option<Vec<Track>>) {
        tracing::info!(track_id = %track.id, title = %track.title, "Playing track");
        self.model.replace_queue(track, queue).await;
        if let Some(current) = self.model.current_track().await {
            self.load_and_play(current).await;
        }
    }

    /// Jump the cursor to a queue index. Out-of-range indices are ignored;
    /// selecting the current index restarts the track.
    pub async fn play_index(&self, index: usize) {
        if let Some(track) = self.model.select_queue_index(index).await {
            tracing::debug!(index, track_id = %track.id, "Playing queue index");
            self.load_and_play(track).await;
        } else {
            tracing::debug!(index, "Ignoring out-of-range queue index");
        }
    }

    /// Advance to the next queued track. At the end of the queue the cursor
    /// and playback stay put, but the queue-ended notice is raised so
    /// continuation listeners can top the queue up.
    pub async fn play_next(&self) {
        if let Some(track) = self.model.advance_queue().await {
            tracing::debug!(track_id = %track.id, "Advanced to next track");
            self.load_and_play(track).await;
        } else if let Some(current) = self.model.current_track().await {
            tracing::debug!("No next track, reporting queue end");
            self.notify(QueueNotice::QueueEnded(current)).await;
        }
    }

    /// Go back to the previous queued track, if there is one. No wraparound.
    pub async fn play_prev(&self) {
        if let Some(track) = self.model.retreat_queue().await {
            tracing::debug!(track_id = %track.id, "Went back to previous track");
            self.load_and_play(track).await;
        }
    }

    /// Append a track to the queue and immediately jump to it.
    pub async fn append_and_play(&self, track: Track) {
        let index = self.model.append_track(track).await;
        self.play_index(index).await;
    }

    /// Append a track without touching the cursor or current playback.
    pub async fn add_to_queue(&self, track: Track) {
        let track_id = track.id.clone();
        let index = self.model.append_track(track).await;
        tracing::info!(track_id = %track_id, index, "Added to queue");
        self.refresh_queue_if_visible().await;
    }

    pub async fn toggle_playback(&self) {
        if self.model.current_track().await.is_none() {
            return;
        }
        let state = self.model.toggle_intent().await;
        tracing::debug!(?state, "Toggling playback");
        if self.model.is_playing().await {
            self.engine.send(EngineCommand::Play);
        } else {
            self.engine.send(EngineCommand::Pause);
        }
    }

    /// Seek to an absolute position. Live tracks have no timeline, so the
    /// request is dropped without an error.
    pub async fn seek_to(&self, seconds: f64) {
        let Some(track) = self.model.current_track().await else {
            return;
        };
        if !track.is_seekable() {
            tracing::debug!(track_id = %track.id, "Ignoring seek on live track");
            return;
        }
        let clamped = self.model.seek_status_to(seconds).await;
        self.engine.send(EngineCommand::SeekTo { seconds: clamped });
    }

    pub async fn seek_forward(&self) {
        let position = self.model.playback_snapshot().await.progress_secs;
        self.seek_to(position + SEEK_STEP_SECS).await;
    }

    pub async fn seek_backward(&self) {
        let position = self.model.playback_snapshot().await.progress_secs;
        self.seek_to(position - SEEK_STEP_SECS).await;
    }

    pub async fn volume_up(&self) {
        let volume = self.model.volume().await.saturating_add(VOLUME_STEP).min(100);
        self.set_volume(volume).await;
    }

    pub async fn volume_down(&self) {
        let volume = self.model.volume().await.saturating_sub(VOLUME_STEP);
        self.set_volume(volume).await;
    }

    pub async fn set_volume(&self, percent: u8) {
        let percent = percent.min(100);
        self.model.set_volume(percent).await;
        self.engine.send(EngineCommand::SetVolume { percent });
        tracing::debug!(percent, "Volume changed");
    }

    /// Engine progress report. Updates timing and fires the one-shot
    /// approaching-end notice when the last queued track enters its end
    /// window.
    pub(crate) async fn handle_progress(&self, played_secs: f64) {
        self.model.update_progress(played_secs).await;
        if let Some(track) = self.model.take_prefetch_shot().await {
            tracing::info!(track_id = %track.id, "Queue approaching its end");
            self.notify(QueueNotice::ApproachingEnd(track)).await;
        }
    }

    /// The engine finished the current track: advance, or report the queue
    /// as ended when there is nothing left.
    pub(crate) async fn handle_track_ended(&self) {
        if self.model.queue_has_next().await {
            self.play_next().await;
            return;
        }
        let Some(track) = self.model.current_track().await else {
            return;
        };
        tracing::info!(track_id = %track.id, "Queue ended");
        self.model.mark_ended().await;
        self.notify(QueueNotice::QueueEnded(track)).await;
    }

    async fn load_and_play(&self, track: Track) {
        self.engine.send(EngineCommand::Load { track });
        self.engine.send(EngineCommand::Play);
        self.refresh_queue_if_visible().await;
    }

    /// Keep the queue view in sync with queue mutations.
    pub(crate) async fn refresh_queue_if_visible(&self) {
        if self.model.is_queue_view_visible().await {
            let (items, position) = self.model.queue_snapshot().await;
            self.model.set_queue_view(items, position).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use crate::engine::{EngineCommand, EngineHandle};
    use crate::model::{
        AppModel, BackendClient, LibraryStore, PlayState, SessionStore, Track, TrackKind,
    };

    use super::super::{PlayerController, QueueNotice};

    fn track(id: &str, duration_secs: f64) -> Track {
        Track {
            id: id.to_string(),
            title: id.to_uppercase(),
            artist: "Artist".to_string(),
            cover: String::new(),
            source: format!("https://media.example/{id}"),
            kind: TrackKind::Audio { duration_secs },
        }
    }

    fn live_track(id: &str) -> Track {
        Track {
            kind: TrackKind::LiveVideo,
            ..track(id, 0.0)
        }
    }

    fn controller(
        dir: &tempfile::TempDir,
    ) -> (PlayerController, mpsc::UnboundedReceiver<EngineCommand>) {
        let store = SessionStore::new(dir.path());
        let backend = BackendClient::new("http://127.0.0.1:0");
        let library = LibraryStore::new(backend.clone(), store.clone());
        let model = Arc::new(AppModel::new(backend, library, store));
        let (engine, commands) = EngineHandle::channel();
        (PlayerController::new(model, engine), commands)
    }

    fn drain(commands: &mut mpsc::UnboundedReceiver<EngineCommand>) -> Vec<EngineCommand> {
        let mut out = Vec::new();
        while let Ok(command) = commands.try_recv() {
            out.push(command);
        }
        out
    }

    #[tokio::test]
    async fn playing_into_empty_queue_yields_single_track() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, mut commands) = controller(&dir);

        controller.play_track(&track("x", 120.0)).await;

        let (items, position) = controller.model.queue_snapshot().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "x");
        assert_eq!(position, 0);
        assert!(controller.model.is_playing().await);

        let sent = drain(&mut commands);
        assert!(matches!(sent[0], EngineCommand::Load { ref track } if track.id == "x"));
        assert!(matches!(sent[1], EngineCommand::Play));
    }

    #[tokio::test]
    async fn queue_replacement_lands_on_requested_track() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, _commands) = controller(&dir);

        let queue = vec![track("a", 60.0), track("b", 60.0), track("c", 60.0)];
        controller.play_track_with_queue(&track("b", 60.0), Some(queue)).await;

        let (items, position) = controller.model.queue_snapshot().await;
        assert_eq!(items.len(), 3);
        assert_eq!(position, 1);
        assert_eq!(controller.model.current_track().await.unwrap().id, "b");
    }

    #[tokio::test]
    async fn absent_track_falls_back_to_queue_head() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, _commands) = controller(&dir);

        let queue = vec![track("a", 60.0), track("b", 60.0)];
        controller.play_track_with_queue(&track("zzz", 60.0), Some(queue)).await;

        let (_, position) = controller.model.queue_snapshot().await;
        assert_eq!(position, 0);
        assert_eq!(controller.model.current_track().await.unwrap().id, "a");
    }

    #[tokio::test]
    async fn next_stops_at_queue_end_and_reports_it() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, mut commands) = controller(&dir);
        let mut notices = controller.subscribe().await;

        let queue = vec![track("a", 60.0), track("b", 60.0), track("c", 60.0)];
        controller.play_track_with_queue(&track("a", 60.0), Some(queue)).await;
        drain(&mut commands);

        controller.play_next().await;
        controller.play_next().await;
        assert_eq!(controller.model.current_track().await.unwrap().id, "c");
        assert_eq!(drain(&mut commands).len(), 4);
        assert!(notices.try_recv().is_err());

        // Third advance has nowhere to go: cursor pinned, no commands, one
        // queue-ended notice carrying the final track.
        controller.play_next().await;
        assert_eq!(controller.model.queue_snapshot().await.1, 2);
        assert!(drain(&mut commands).is_empty());
        let notice = notices.try_recv().unwrap();
        assert!(matches!(notice, QueueNotice::QueueEnded(ref t) if t.id == "c"));
        assert!(notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn prev_stops_at_queue_head() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, _commands) = controller(&dir);

        let queue = vec![track("a", 60.0), track("b", 60.0)];
        controller.play_track_with_queue(&track("a", 60.0), Some(queue)).await;
        controller.play_prev().await;
        assert_eq!(controller.model.queue_snapshot().await.1, 0);
    }

    #[tokio::test]
    async fn out_of_range_index_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, mut commands) = controller(&dir);

        controller.play_track(&track("a", 60.0)).await;
        drain(&mut commands);

        controller.play_index(7).await;
        assert_eq!(controller.model.queue_snapshot().await.1, 0);
        assert!(drain(&mut commands).is_empty());
    }

    #[tokio::test]
    async fn add_to_queue_leaves_cursor_alone() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, _commands) = controller(&dir);

        controller.play_track(&track("a", 60.0)).await;
        controller.add_to_queue(track("b", 60.0)).await;

        let (items, position) = controller.model.queue_snapshot().await;
        assert_eq!(items.len(), 2);
        assert_eq!(position, 0);
    }

    #[tokio::test]
    async fn toggle_relays_play_and_pause() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, mut commands) = controller(&dir);

        controller.play_track(&track("a", 60.0)).await;
        drain(&mut commands);

        controller.toggle_playback().await;
        assert!(!controller.model.is_playing().await);
        assert!(matches!(drain(&mut commands).as_slice(), [EngineCommand::Pause]));

        controller.toggle_playback().await;
        assert!(controller.model.is_playing().await);
        assert!(matches!(drain(&mut commands).as_slice(), [EngineCommand::Play]));
    }

    #[tokio::test]
    async fn toggle_without_a_track_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, mut commands) = controller(&dir);

        controller.toggle_playback().await;
        assert_eq!(controller.model.play_state().await, PlayState::Idle);
        assert!(drain(&mut commands).is_empty());
    }

    #[tokio::test]
    async fn seek_is_clamped_and_relayed() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, mut commands) = controller(&dir);

        controller.play_track(&track("a", 100.0)).await;
        drain(&mut commands);

        controller.seek_to(500.0).await;
        let sent = drain(&mut commands);
        assert!(matches!(sent.as_slice(), [EngineCommand::SeekTo { seconds }] if *seconds == 100.0));
    }

    #[tokio::test]
    async fn live_tracks_refuse_seeks_silently() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, mut commands) = controller(&dir);

        controller.play_track(&live_track("stream")).await;
        drain(&mut commands);

        controller.seek_to(30.0).await;
        assert!(drain(&mut commands).is_empty());
        assert!(!controller.model.has_error().await);
    }

    #[tokio::test]
    async fn volume_steps_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, mut commands) = controller(&dir);

        for _ in 0..10 {
            controller.volume_up().await;
        }
        assert_eq!(controller.model.volume().await, 100);

        for _ in 0..30 {
            controller.volume_down().await;
        }
        assert_eq!(controller.model.volume().await, 0);

        let sent = drain(&mut commands);
        assert!(sent.iter().all(|c| matches!(c, EngineCommand::SetVolume { percent } if *percent <= 100)));
    }

    #[tokio::test]
    async fn approaching_end_fires_once_per_track() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, _commands) = controller(&dir);
        let mut notices = controller.subscribe().await;

        controller.play_track(&track("a", 100.0)).await;

        controller.handle_progress(80.0).await;
        assert!(notices.try_recv().is_err());

        controller.handle_progress(90.0).await;
        let notice = notices.try_recv().unwrap();
        assert!(matches!(notice, QueueNotice::ApproachingEnd(ref t) if t.id == "a"));

        // Still inside the window, but the shot is spent.
        controller.handle_progress(92.0).await;
        assert!(notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn no_prefetch_when_more_tracks_remain() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, _commands) = controller(&dir);
        let mut notices = controller.subscribe().await;

        let queue = vec![track("a", 100.0), track("b", 100.0)];
        controller.play_track_with_queue(&track("a", 100.0), Some(queue)).await;

        controller.handle_progress(95.0).await;
        assert!(notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn ended_track_advances_the_queue() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, mut commands) = controller(&dir);

        let queue = vec![track("a", 60.0), track("b", 60.0)];
        controller.play_track_with_queue(&track("a", 60.0), Some(queue)).await;
        drain(&mut commands);

        controller.handle_track_ended().await;
        assert_eq!(controller.model.current_track().await.unwrap().id, "b");
        let sent = drain(&mut commands);
        assert!(matches!(sent[0], EngineCommand::Load { ref track } if track.id == "b"));
    }

    #[tokio::test]
    async fn queue_end_is_reported_not_advanced() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, mut commands) = controller(&dir);
        let mut notices = controller.subscribe().await;

        controller.play_track(&track("a", 60.0)).await;
        drain(&mut commands);

        controller.handle_track_ended().await;
        assert_eq!(controller.model.play_state().await, PlayState::Ended);
        assert!(drain(&mut commands).is_empty());
        let notice = notices.try_recv().unwrap();
        assert!(matches!(notice, QueueNotice::QueueEnded(ref t) if t.id == "a"));
    }

    #[tokio::test]
    async fn every_subscriber_sees_notices() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, _commands) = controller(&dir);
        let mut first = controller.subscribe().await;
        let mut second = controller.subscribe().await;

        controller.play_track(&track("a", 60.0)).await;
        controller.handle_track_ended().await;

        assert!(matches!(first.try_recv().unwrap(), QueueNotice::QueueEnded(_)));
        assert!(matches!(second.try_recv().unwrap(), QueueNotice::QueueEnded(_)));

        // A dropped receiver is pruned without disturbing the others.
        drop(first);
        controller.play_track(&track("b", 60.0)).await;
        controller.handle_track_ended().await;
        assert!(matches!(second.try_recv().unwrap(), QueueNotice::QueueEnded(_)));
    }
}
