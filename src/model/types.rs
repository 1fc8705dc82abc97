//! Core UI state types

use std::time::Instant;

use super::track::ContentKind;

/// Which section of the UI is currently focused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Search,
    Browse,
    Recent,
    MainContent,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Browse,
            ActiveSection::Browse => ActiveSection::Recent,
            ActiveSection::Recent => ActiveSection::MainContent,
            ActiveSection::MainContent => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::MainContent,
            ActiveSection::Browse => ActiveSection::Search,
            ActiveSection::Recent => ActiveSection::Browse,
            ActiveSection::MainContent => ActiveSection::Recent,
        }
    }
}

/// Entries in the Browse sidebar: the four content routes plus the library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowseEntry {
    Kind(ContentKind),
    LikedSongs,
}

impl BrowseEntry {
    pub fn label(self) -> &'static str {
        match self {
            BrowseEntry::Kind(kind) => kind.label(),
            BrowseEntry::LikedSongs => "Liked Songs",
        }
    }

    pub const ALL: [BrowseEntry; 5] = [
        BrowseEntry::Kind(ContentKind::Music),
        BrowseEntry::Kind(ContentKind::Podcast),
        BrowseEntry::Kind(ContentKind::Stories),
        BrowseEntry::Kind(ContentKind::Live),
        BrowseEntry::LikedSongs,
    ];
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    /// Routing hint for the next search.
    pub search_kind: ContentKind,
    pub browse_selected: usize,
    pub recent_searches: Vec<String>,
    pub recent_selected: usize,
    pub user_name: Option<String>,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            search_query: String::new(),
            search_kind: ContentKind::Music,
            browse_selected: 0,
            recent_searches: Vec::new(),
            recent_selected: 0,
            user_name: None,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}
