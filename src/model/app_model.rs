//! Main application model with state management
//!
//! All mutable playback and UI state lives here behind async accessors, so
//! the controller, the engine event listener and the render loop share one
//! source of truth. Everything is accessed from the UI task plus short
//! background spawns; the mutexes are about `Arc` sharing, not contention.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::engine::EngineState;
use super::backend::BackendClient;
use super::content::{ContentState, ContentView};
use super::library::LibraryStore;
use super::playback::{PlayState, PlaybackSnapshot, PlaybackStatus, PREFETCH_WINDOW_SECS};
use super::queue::PlayQueue;
use super::session::SessionStore;
use super::track::{ContentKind, Track};
use super::types::{ActiveSection, UiState};

pub struct AppModel {
    pub backend: BackendClient,
    pub library: LibraryStore,
    store: SessionStore,
    queue: Arc<Mutex<PlayQueue>>,
    status: Arc<Mutex<PlaybackStatus>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(backend: BackendClient, library: LibraryStore, store: SessionStore) -> Self {
        let mut ui_state = UiState::default();
        ui_state.recent_searches = store.load_search_history();
        Self {
            backend,
            library,
            store,
            queue: Arc::new(Mutex::new(PlayQueue::new())),
            status: Arc::new(Mutex::new(PlaybackStatus::default())),
            ui_state: Arc::new(Mutex::new(ui_state)),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Queue & playback
    // ========================================================================

    /// Replace the queue for a fresh `play_track`, or collapse it to the
    /// single given track when no queue is supplied. Also resets status for
    /// the new track.
    pub async fn replace_queue(&self, track: &Track, queue: Option<Vec<Track>>) {
        let mut q = self.queue.lock().await;
        match queue {
            Some(items) => q.replace_with(items, track),
            None => q.single(track.clone()),
        }
        let current = q.current().cloned();
        drop(q);

        // replace_with may have landed on a different item than `track`
        // when the id was absent from the new queue.
        if let Some(current) = current {
            self.status.lock().await.begin_track(&current);
        }
    }

    /// Point the cursor at `index` and reset status for that track.
    /// Returns the selected track, or `None` when the index is out of range.
    pub async fn select_queue_index(&self, index: usize) -> Option<Track> {
        let mut q = self.queue.lock().await;
        if !q.set_position(index) {
            return None;
        }
        let track = q.current().cloned();
        drop(q);

        if let Some(track) = &track {
            self.status.lock().await.begin_track(track);
        }
        track
    }

    /// Append a track, returning its queue index.
    pub async fn append_track(&self, track: Track) -> usize {
        self.queue.lock().await.append(track)
    }

    pub async fn extend_queue(&self, tracks: Vec<Track>) {
        self.queue.lock().await.extend(tracks);
    }

    pub async fn queue_snapshot(&self) -> (Vec<Track>, i32) {
        let q = self.queue.lock().await;
        (q.items().to_vec(), q.position())
    }

    pub async fn current_track(&self) -> Option<Track> {
        self.queue.lock().await.current().cloned()
    }

    pub async fn queue_has_next(&self) -> bool {
        self.queue.lock().await.has_next()
    }

    /// Step to the next queued track and reset status for it. `None` at the
    /// end of the queue.
    pub async fn advance_queue(&self) -> Option<Track> {
        let mut q = self.queue.lock().await;
        let track = q.advance().cloned();
        drop(q);

        if let Some(track) = &track {
            self.status.lock().await.begin_track(track);
        }
        track
    }

    /// Step to the previous queued track. `None` at the head.
    pub async fn retreat_queue(&self) -> Option<Track> {
        let mut q = self.queue.lock().await;
        let track = q.retreat().cloned();
        drop(q);

        if let Some(track) = &track {
            self.status.lock().await.begin_track(track);
        }
        track
    }

    pub async fn toggle_intent(&self) -> PlayState {
        self.status.lock().await.toggle()
    }

    pub async fn confirm_engine_state(&self, state: EngineState) {
        self.status.lock().await.confirm(state);
    }

    pub async fn learn_duration(&self, duration_secs: f64) {
        self.status.lock().await.learn_duration(duration_secs);
    }

    pub async fn update_progress(&self, played_secs: f64) {
        self.status.lock().await.update_progress(played_secs);
    }

    pub async fn seek_status_to(&self, seconds: f64) -> f64 {
        let mut status = self.status.lock().await;
        status.seek_to(seconds);
        status.progress_secs()
    }

    pub async fn set_volume(&self, volume: u8) {
        self.status.lock().await.volume = volume.min(100);
    }

    pub async fn volume(&self) -> u8 {
        self.status.lock().await.volume
    }

    pub async fn mark_ended(&self) {
        self.status.lock().await.mark_ended();
    }

    pub async fn mark_engine_error(&self) {
        self.status.lock().await.mark_engine_error();
    }

    pub async fn is_playing(&self) -> bool {
        self.status.lock().await.is_playing()
    }

    pub async fn play_state(&self) -> PlayState {
        self.status.lock().await.intended
    }

    /// One-shot prefetch check, evaluated on every progress report: fires
    /// only inside the end window, only on the last queued track, and only
    /// while the per-track shot is still armed.
    pub async fn take_prefetch_shot(&self) -> Option<Track> {
        let q = self.queue.lock().await;
        if !q.is_last() {
            return None;
        }
        let current = q.current()?.clone();
        drop(q);

        let mut status = self.status.lock().await;
        let remaining = status.remaining_secs()?;
        if remaining > 0.0 && remaining < PREFETCH_WINDOW_SECS && status.disarm_prefetch() {
            Some(current)
        } else {
            None
        }
    }

    pub async fn playback_snapshot(&self) -> PlaybackSnapshot {
        let track = self.current_track().await;
        let status = self.status.lock().await;
        PlaybackSnapshot {
            track,
            is_playing: status.is_playing(),
            buffering: status.buffering,
            progress_secs: status.progress_secs(),
            duration_secs: status.duration_secs(),
            volume: status.volume,
        }
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn append_to_search(&self, c: char) {
        self.ui_state.lock().await.search_query.push(c);
    }

    pub async fn backspace_search(&self) {
        self.ui_state.lock().await.search_query.pop();
    }

    pub async fn clear_search(&self) {
        self.ui_state.lock().await.search_query.clear();
    }

    pub async fn set_search_kind(&self, kind: ContentKind) {
        self.ui_state.lock().await.search_kind = kind;
    }

    pub async fn set_user_name(&self, name: Option<String>) {
        self.ui_state.lock().await.user_name = name;
    }

    /// Remember a query in the bounded recent-search history and persist it.
    pub async fn record_recent_search(&self, query: &str) {
        let mut state = self.ui_state.lock().await;
        let mut history = state.recent_searches.clone();
        self.store.record_search(&mut history, query);
        state.recent_searches = history;
        state.recent_selected = 0;
    }

    pub async fn browse_move(&self, down: bool) {
        let mut state = self.ui_state.lock().await;
        match state.active_section {
            ActiveSection::Browse => {
                let last = super::types::BrowseEntry::ALL.len() - 1;
                if down && state.browse_selected < last {
                    state.browse_selected += 1;
                } else if !down && state.browse_selected > 0 {
                    state.browse_selected -= 1;
                }
            }
            ActiveSection::Recent => {
                let last = state.recent_searches.len().saturating_sub(1);
                if down && state.recent_selected < last {
                    state.recent_selected += 1;
                } else if !down && state.recent_selected > 0 {
                    state.recent_selected -= 1;
                }
            }
            _ => {}
        }
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp
            && timestamp.elapsed().as_secs() > 5
        {
            state.error_message = None;
            state.error_timestamp = None;
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Content state
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn set_content_loading(&self, loading: bool) {
        self.content_state.lock().await.is_loading = loading;
    }

    pub async fn set_search_results(&self, kind: ContentKind, query: String, tracks: Vec<Track>) {
        let mut state = self.content_state.lock().await;
        state.view = ContentView::SearchResults { kind, query, tracks, selected_index: 0 };
        state.is_loading = false;
    }

    pub async fn set_liked_songs(&self, tracks: Vec<Track>) {
        let mut state = self.content_state.lock().await;
        state.view = ContentView::LikedSongs { tracks, selected_index: 0 };
        state.is_loading = false;
    }

    pub async fn set_queue_view(&self, items: Vec<Track>, position: i32) {
        let mut state = self.content_state.lock().await;
        let selected_index = position.max(0) as usize;
        state.view = ContentView::Queue { items, position, selected_index };
        state.is_loading = false;
    }

    pub async fn is_queue_view_visible(&self) -> bool {
        matches!(self.content_state.lock().await.view, ContentView::Queue { .. })
    }

    pub async fn content_move_up(&self) {
        self.content_state.lock().await.move_up();
    }

    pub async fn content_move_down(&self) {
        self.content_state.lock().await.move_down();
    }

    pub async fn selected_content_track(&self) -> Option<Track> {
        self.content_state.lock().await.selected_track()
    }

    /// The highlighted queue index, when the queue view is showing.
    pub async fn selected_queue_index(&self) -> Option<usize> {
        self.content_state.lock().await.selected_queue_index()
    }

    pub async fn visible_tracks(&self) -> Vec<Track> {
        self.content_state.lock().await.visible_tracks()
    }
}
