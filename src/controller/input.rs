//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;

use super::PlayerController;

impl PlayerController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Handle error message first (blocks all other interactions)
        if self.model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if self.model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    self.model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        let ui_state = self.model.get_ui_state().await;

        // Handle search input when in search section
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        self.model.cycle_section_backward().await;
                    } else {
                        self.model.cycle_section_forward().await;
                    }
                    return Ok(());
                }
                KeyCode::Enter => {
                    let query = ui_state.search_query.clone();
                    if !query.is_empty() {
                        self.perform_search(&query).await;
                    }
                    return Ok(());
                }
                KeyCode::Esc => {
                    self.model.clear_search().await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    self.model.backspace_search().await;
                    return Ok(());
                }
                KeyCode::Char(c) => {
                    // Q still quits even in search mode when Ctrl is pressed
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        self.model.set_should_quit(true).await;
                        return Ok(());
                    }
                    self.model.append_to_search(c).await;
                    return Ok(());
                }
                _ => {}
            }
        }

        match ui_state.active_section {
            ActiveSection::MainContent => match key.code {
                KeyCode::Up => {
                    self.model.content_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    self.model.content_move_down().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    // In the queue view jump the cursor; elsewhere play the
                    // highlighted track in the context of the list around it.
                    if let Some(index) = self.model.selected_queue_index().await {
                        self.play_index(index).await;
                    } else if let Some(track) = self.model.selected_content_track().await {
                        let queue = self.model.visible_tracks().await;
                        self.play_track_with_queue(&track, Some(queue)).await;
                    }
                    return Ok(());
                }
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    if let Some(track) = self.model.selected_content_track().await {
                        self.add_to_queue(track).await;
                    }
                    return Ok(());
                }
                KeyCode::Char('x') | KeyCode::Char('X') => {
                    self.toggle_like_selected().await;
                    return Ok(());
                }
                _ => {}
            },
            ActiveSection::Browse => match key.code {
                KeyCode::Up => {
                    self.model.browse_move(false).await;
                    return Ok(());
                }
                KeyCode::Down => {
                    self.model.browse_move(true).await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    self.activate_browse_entry().await;
                    return Ok(());
                }
                _ => {}
            },
            ActiveSection::Recent => match key.code {
                KeyCode::Up => {
                    self.model.browse_move(false).await;
                    return Ok(());
                }
                KeyCode::Down => {
                    self.model.browse_move(true).await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    self.search_recent().await;
                    return Ok(());
                }
                _ => {}
            },
            ActiveSection::Search => {}
        }

        // Global keys outside the search box
        match key.code {
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.model.cycle_section_backward().await;
                } else {
                    self.model.cycle_section_forward().await;
                }
            }
            KeyCode::BackTab => self.model.cycle_section_backward().await,
            KeyCode::Char(' ') => self.toggle_playback().await,
            KeyCode::Char('n') | KeyCode::Char('N') => self.play_next().await,
            KeyCode::Char('p') | KeyCode::Char('P') => self.play_prev().await,
            KeyCode::Char('+') | KeyCode::Char('=') => self.volume_up().await,
            KeyCode::Char('-') => self.volume_down().await,
            KeyCode::Left => self.seek_backward().await,
            KeyCode::Right => self.seek_forward().await,
            KeyCode::Char('u') | KeyCode::Char('U') => self.show_queue().await,
            KeyCode::Char('h') | KeyCode::Char('H') => self.model.show_help_popup().await,
            KeyCode::Char('q') | KeyCode::Char('Q') => self.model.set_should_quit(true).await,
            _ => {}
        }

        Ok(())
    }
}
