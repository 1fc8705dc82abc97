//! Content view state for the main area

use super::track::{ContentKind, Track};

/// What the main content area is currently showing
#[derive(Clone, Debug, Default)]
pub enum ContentView {
    #[default]
    Empty,
    SearchResults {
        kind: ContentKind,
        query: String,
        tracks: Vec<Track>,
        selected_index: usize,
    },
    LikedSongs {
        tracks: Vec<Track>,
        selected_index: usize,
    },
    /// The local playback queue with the cursor position.
    Queue {
        items: Vec<Track>,
        position: i32,
        selected_index: usize,
    },
}

/// State for the main content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ContentView,
    pub is_loading: bool,
}

impl ContentState {
    /// Tracks and selection of the current view, when it lists tracks.
    fn tracks(&self) -> Option<(&Vec<Track>, usize)> {
        match &self.view {
            ContentView::SearchResults { tracks, selected_index, .. }
            | ContentView::LikedSongs { tracks, selected_index } => {
                Some((tracks, *selected_index))
            }
            ContentView::Queue { items, selected_index, .. } => Some((items, *selected_index)),
            ContentView::Empty => None,
        }
    }

    pub fn selected_track(&self) -> Option<Track> {
        let (tracks, selected) = self.tracks()?;
        tracks.get(selected).cloned()
    }

    /// All tracks of the current view, used as the replacement queue when
    /// one of them is played.
    pub fn visible_tracks(&self) -> Vec<Track> {
        self.tracks().map(|(tracks, _)| tracks.clone()).unwrap_or_default()
    }

    pub fn selected_queue_index(&self) -> Option<usize> {
        match &self.view {
            ContentView::Queue { selected_index, .. } => Some(*selected_index),
            _ => None,
        }
    }

    pub fn move_up(&mut self) {
        if let Some(idx) = self.selected_index_mut()
            && *idx > 0
        {
            *idx -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let last = self
            .tracks()
            .map(|(tracks, _)| tracks.len().saturating_sub(1))
            .unwrap_or(0);
        if let Some(idx) = self.selected_index_mut()
            && *idx < last
        {
            *idx += 1;
        }
    }

    fn selected_index_mut(&mut self) -> Option<&mut usize> {
        match &mut self.view {
            ContentView::SearchResults { selected_index, .. }
            | ContentView::LikedSongs { selected_index, .. }
            | ContentView::Queue { selected_index, .. } => Some(selected_index),
            ContentView::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::TrackKind;

    fn tracks(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track {
                id: format!("t{i}"),
                title: format!("Track {i}"),
                artist: "Artist".to_string(),
                cover: String::new(),
                source: format!("https://media.example/t{i}"),
                kind: TrackKind::Audio { duration_secs: 90.0 },
            })
            .collect()
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = ContentState {
            view: ContentView::LikedSongs { tracks: tracks(2), selected_index: 0 },
            is_loading: false,
        };
        state.move_up();
        assert_eq!(state.selected_track().unwrap().id, "t0");
        state.move_down();
        state.move_down();
        assert_eq!(state.selected_track().unwrap().id, "t1");
    }

    #[test]
    fn empty_view_has_no_selection() {
        let mut state = ContentState::default();
        state.move_down();
        assert!(state.selected_track().is_none());
        assert!(state.visible_tracks().is_empty());
    }
}
