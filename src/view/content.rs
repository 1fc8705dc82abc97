//! Main content area rendering (search results, liked songs, the queue)

use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
};

use crate::model::{ActiveSection, ContentState, ContentView, Track, UiState};

use super::utils::{calculate_num_width, format_duration, render_scrollable_list, truncate_string};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    current_playing_id: Option<&str>,
    liked_ids: &HashSet<String>,
) {
    let is_focused = ui_state.active_section == ActiveSection::MainContent;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    if content_state.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Content ")
                    .border_style(border_style),
            );
        frame.render_widget(loading, area);
        return;
    }

    match &content_state.view {
        ContentView::Empty => {
            let content = Paragraph::new(
                "Type in search and press Enter to find something to play\n\nUse Tab to navigate between sections\nUse ↑/↓ to select items\nPress Enter to play\nPress h for all keys",
            )
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
            frame.render_widget(content, area);
        }
        ContentView::SearchResults { kind, query, tracks, selected_index } => {
            let title = format!(" {}: \"{}\" ({}) ", kind.label(), query, tracks.len());
            render_track_list(
                frame,
                area,
                &title,
                tracks,
                *selected_index,
                None,
                is_focused,
                current_playing_id,
                liked_ids,
                border_style,
            );
        }
        ContentView::LikedSongs { tracks, selected_index } => {
            let title = format!(" Liked Songs ({}) ", tracks.len());
            render_track_list(
                frame,
                area,
                &title,
                tracks,
                *selected_index,
                None,
                is_focused,
                current_playing_id,
                liked_ids,
                border_style,
            );
        }
        ContentView::Queue { items, position, selected_index } => {
            let title = format!(" Queue ({}) ", items.len());
            let cursor = usize::try_from(*position).ok();
            render_track_list(
                frame,
                area,
                &title,
                items,
                *selected_index,
                cursor,
                is_focused,
                current_playing_id,
                liked_ids,
                border_style,
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_track_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    tracks: &[Track],
    selected_index: usize,
    queue_cursor: Option<usize>,
    is_focused: bool,
    current_playing_id: Option<&str>,
    liked_ids: &HashSet<String>,
    border_style: Style,
) {
    if tracks.is_empty() {
        let empty = Paragraph::new("Nothing here yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title.to_string())
                    .border_style(border_style),
            );
        frame.render_widget(empty, area);
        return;
    }

    let num_width = calculate_num_width(tracks.len());
    let content_width = area.width.saturating_sub(2) as usize;
    let duration_width = 6;
    let fixed = 1 + num_width + 3 + 2 + 3 + 3 + duration_width;
    let remaining = content_width.saturating_sub(fixed);
    let title_width = (remaining * 55) / 100;
    let artist_width = remaining.saturating_sub(title_width);

    let items: Vec<ListItem> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_current = queue_cursor == Some(i)
                || (queue_cursor.is_none() && current_playing_id == Some(track.id.as_str()));
            let marker = if is_current { "▶" } else { " " };
            let liked = if liked_ids.contains(&track.id) { "♥" } else { " " };
            let duration = if track.is_live() {
                "LIVE".to_string()
            } else {
                track.duration_secs().map(format_duration).unwrap_or_default()
            };

            let text = format!(
                " {:>num_width$}  {} {}  {}  {}  {:>duration_width$}",
                i + 1,
                marker,
                liked,
                truncate_string(&track.title, title_width),
                truncate_string(&track.artist, artist_width),
                duration,
            );

            let style = if i == selected_index && is_focused {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else if is_current {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == selected_index {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(border_style);

    render_scrollable_list(frame, area, items, selected_index, block);
}
