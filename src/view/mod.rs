//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Main layout structure (top bar, sidebar)
//! - `content`: Main content area rendering
//! - `transport`: Transport bar rendering
//! - `overlays`: Modal overlays (error, help)

mod content;
mod layout;
mod overlays;
mod transport;
mod utils;

use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::model::{ContentState, PlaybackSnapshot, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        playback: &PlaybackSnapshot,
        ui_state: &UiState,
        content_state: &ContentState,
        liked_ids: &HashSet<String>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + account
                Constraint::Min(0),    // Main content (sidebar + content)
                Constraint::Length(3), // Transport bar
            ])
            .split(frame.area());

        // Top bar: Search + Account
        layout::render_top_bar(frame, chunks[0], ui_state);

        // Middle: Sidebar (Browse + Recent) and Main Content
        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30), // Sidebar
                Constraint::Percentage(70), // Main content
            ])
            .split(chunks[1]);

        layout::render_sidebar(frame, main_chunks[0], ui_state);

        let current_playing_id = playback.track.as_ref().map(|t| t.id.as_str());
        content::render_main_content(
            frame,
            main_chunks[1],
            ui_state,
            content_state,
            current_playing_id,
            liked_ids,
        );

        // Bottom: Transport bar with track info and progress
        transport::render_transport_bar(frame, chunks[2], playback);

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
