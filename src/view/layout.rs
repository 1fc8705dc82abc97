//! Layout rendering (top bar, sidebar, main area structure)

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
};

use crate::model::{ActiveSection, BrowseEntry, UiState};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(25), // Account
        ])
        .split(area);

    let search_style = if ui_state.active_section == ActiveSection::Search {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_query.is_empty() {
        "Type to search..."
    } else {
        &ui_state.search_query
    };

    let search_title = format!(" Search ({}) ", ui_state.search_kind.label());
    let search = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(search_title)
            .padding(Padding::horizontal(1))
            .border_style(if ui_state.active_section == ActiveSection::Search {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(search, chunks[0]);

    let account_text = match &ui_state.user_name {
        Some(name) => format!("♪ {}", name),
        None => "♪ Signed out".to_string(),
    };
    let account = Paragraph::new(account_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Account "));
    frame.render_widget(account, chunks[1]);
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Browse (5 entries + 2 borderlines)
            Constraint::Min(0),    // Recent searches (fills remaining space)
        ])
        .split(area);

    let browse_items: Vec<ListItem> = BrowseEntry::ALL
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == ui_state.browse_selected
                && ui_state.active_section == ActiveSection::Browse
            {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == ui_state.browse_selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(entry.label()).style(style)
        })
        .collect();

    let browse_border_style = if ui_state.active_section == ActiveSection::Browse {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let browse = List::new(browse_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Browse ")
            .padding(Padding::horizontal(1))
            .border_style(browse_border_style),
    );
    frame.render_widget(browse, chunks[0]);

    let recent_items: Vec<ListItem> = ui_state
        .recent_searches
        .iter()
        .enumerate()
        .map(|(i, query)| {
            let style = if i == ui_state.recent_selected
                && ui_state.active_section == ActiveSection::Recent
            {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(query.as_str()).style(style)
        })
        .collect();

    let recent_border_style = if ui_state.active_section == ActiveSection::Recent {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let recent = List::new(recent_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Recent Searches ")
            .padding(Padding::horizontal(1))
            .border_style(recent_border_style),
    );
    frame.render_widget(recent, chunks[1]);
}
