//! Transport bar rendering

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::model::PlaybackSnapshot;

use super::utils::format_duration;

pub fn render_transport_bar(frame: &mut Frame, area: Rect, playback: &PlaybackSnapshot) {
    // No current track: no transport controls at all, just the empty frame.
    let Some(track) = &playback.track else {
        let empty = Paragraph::new(" Nothing playing")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let status_text = if playback.buffering {
        format!(" ⏳ {} | {}", track.title, track.artist)
    } else if playback.is_playing {
        format!(" ▶ {} | {}", track.title, track.artist)
    } else {
        format!(" ⏸ {} | {}", track.title, track.artist)
    };

    let volume_text = format!(" Vol: {}% ", playback.volume);

    // Live feeds have no timeline to draw.
    let (label, ratio) = if track.is_live() {
        ("LIVE".to_string(), 1.0)
    } else {
        let label = format!(
            "{} / {}",
            format_duration(playback.progress_secs),
            format_duration(playback.duration_secs)
        );
        let ratio = if playback.duration_secs > 0.0 {
            (playback.progress_secs / playback.duration_secs).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (label, ratio)
    };

    let gauge_color = if track.is_live() { Color::Red } else { Color::Green };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ", status_text))
                .title_bottom(Line::from(volume_text).right_aligned()),
        )
        .gauge_style(Style::default().fg(gauge_color))
        .ratio(ratio)
        .label(label);

    frame.render_widget(gauge, area);
}
