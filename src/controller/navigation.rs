//! Navigation-related controller methods (search, browse, library)

use crate::model::{ActiveSection, BrowseEntry, SEARCH_LIMIT};

use super::PlayerController;

impl PlayerController {
    pub async fn perform_search(&self, query: &str) {
        tracing::debug!(query, "Performing search");
        self.model.set_content_loading(true).await;
        self.model.record_recent_search(query).await;

        let kind = self.model.get_ui_state().await.search_kind;
        match self.model.backend.search(query, kind, SEARCH_LIMIT).await {
            Ok(tracks) => {
                tracing::info!(query, count = tracks.len(), "Search completed successfully");
                self.model.set_search_results(kind, query.to_string(), tracks).await;
                // Switch to MainContent section to show results
                self.model.set_active_section(ActiveSection::MainContent).await;
            }
            Err(e) => {
                tracing::error!(query, error = %e, "Search failed");
                self.model.set_content_loading(false).await;
                self.model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    /// Re-run a remembered query from the Recent section.
    pub async fn search_recent(&self) {
        let ui_state = self.model.get_ui_state().await;
        let Some(query) = ui_state.recent_searches.get(ui_state.recent_selected).cloned() else {
            return;
        };
        self.perform_search(&query).await;
    }

    /// Act on the highlighted Browse entry: content kinds retarget the next
    /// search, the library entry opens liked songs.
    pub async fn activate_browse_entry(&self) {
        let selected = self.model.get_ui_state().await.browse_selected;
        match BrowseEntry::ALL[selected.min(BrowseEntry::ALL.len() - 1)] {
            BrowseEntry::Kind(kind) => {
                tracing::debug!(kind = kind.as_str(), "Search retargeted");
                self.model.set_search_kind(kind).await;
                self.model.set_active_section(ActiveSection::Search).await;
            }
            BrowseEntry::LikedSongs => self.show_liked_songs().await,
        }
    }

    pub async fn show_liked_songs(&self) {
        let liked = self.model.library.liked().await;
        tracing::debug!(count = liked.len(), "Opening liked songs");
        self.model.set_liked_songs(liked).await;
        self.model.set_active_section(ActiveSection::MainContent).await;
    }

    /// Show the playback queue in the main content area.
    pub async fn show_queue(&self) {
        let (items, position) = self.model.queue_snapshot().await;
        self.model.set_queue_view(items, position).await;
        self.model.set_active_section(ActiveSection::MainContent).await;
    }

    /// Like or unlike the highlighted track.
    pub async fn toggle_like_selected(&self) {
        let Some(track) = self.model.selected_content_track().await else {
            return;
        };
        match self.model.library.toggle_like(&track).await {
            Ok(liked) => {
                tracing::debug!(track_id = %track.id, liked, "Like toggled from UI");
            }
            Err(e) => {
                self.model.set_error(Self::format_error(&e)).await;
            }
        }
    }
}
