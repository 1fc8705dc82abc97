//! Playable track values and content routing hints

use serde::{Deserialize, Serialize};

/// What a track actually is. Transport capabilities (seeking, a known
/// duration) are answered by the variant rather than by flag checks at
/// every call site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TrackKind {
    /// A finite media item. `duration_secs` of 0.0 means the engine has not
    /// reported a duration yet.
    Audio { duration_secs: f64 },
    /// A continuous live feed: no seeking, no meaningful duration.
    LiveVideo,
}

/// A playable item as returned by the backend or loaded from the library.
/// Immutable once fetched; `id` doubles as the media-source key and the
/// queue-membership key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub cover: String,
    /// Media source locator handed to the engine on `Load`.
    pub source: String,
    pub kind: TrackKind,
}

impl Track {
    pub fn is_live(&self) -> bool {
        matches!(self.kind, TrackKind::LiveVideo)
    }

    /// Whether seek commands make sense for this track.
    pub fn is_seekable(&self) -> bool {
        !self.is_live()
    }

    /// Known duration in seconds, if any.
    pub fn duration_secs(&self) -> Option<f64> {
        match self.kind {
            TrackKind::Audio { duration_secs } if duration_secs > 0.0 => Some(duration_secs),
            _ => None,
        }
    }
}

/// Content type hint sent alongside a search query. Selects backend routing
/// only; the controller never branches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ContentKind {
    #[default]
    Music,
    Podcast,
    Stories,
    Live,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Music => "music",
            ContentKind::Podcast => "podcast",
            ContentKind::Stories => "stories",
            ContentKind::Live => "live",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Music => "Music",
            ContentKind::Podcast => "Podcasts",
            ContentKind::Stories => "Stories",
            ContentKind::Live => "Live News",
        }
    }
}
