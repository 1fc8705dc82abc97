//! Ordered playback queue with current-position tracking

use super::track::Track;

/// The playback queue. Insertion order is playback order.
///
/// `position` is `-1` while nothing has been selected; whenever it is
/// non-negative it indexes a valid item, so `-1 <= position < items.len()`
/// holds across every operation.
#[derive(Clone, Debug, Default)]
pub struct PlayQueue {
    items: Vec<Track>,
    position: i32,
}

impl PlayQueue {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            position: -1,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Track] {
        &self.items
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    /// The track under the cursor, if any.
    pub fn current(&self) -> Option<&Track> {
        if self.position >= 0 {
            self.items.get(self.position as usize)
        } else {
            None
        }
    }

    /// Step the cursor forward, returning the new current track. Does
    /// nothing at the end of the queue.
    pub fn advance(&mut self) -> Option<&Track> {
        if self.has_next() {
            self.position += 1;
            self.current()
        } else {
            None
        }
    }

    /// Step the cursor backward. No wraparound.
    pub fn retreat(&mut self) -> Option<&Track> {
        if self.has_prev() {
            self.position -= 1;
            self.current()
        } else {
            None
        }
    }

    /// Replace the whole queue and point the cursor at `track`, located by
    /// first match on id. Falls back to index 0 when the track is not in
    /// the new queue.
    pub fn replace_with(&mut self, items: Vec<Track>, track: &Track) {
        self.items = items;
        self.position = self
            .items
            .iter()
            .position(|t| t.id == track.id)
            .map(|i| i as i32)
            .unwrap_or(0);
        if self.items.is_empty() {
            self.position = -1;
        }
    }

    /// Collapse the queue to a single track.
    pub fn single(&mut self, track: Track) {
        self.items = vec![track];
        self.position = 0;
    }

    /// Move the cursor to `index`. Out-of-range indices are ignored.
    pub fn set_position(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.position = index as i32;
            true
        } else {
            false
        }
    }

    /// Append a track and return its index.
    pub fn append(&mut self, track: Track) -> usize {
        self.items.push(track);
        self.items.len() - 1
    }

    pub fn extend(&mut self, tracks: Vec<Track>) {
        self.items.extend(tracks);
    }

    pub fn has_next(&self) -> bool {
        self.position >= 0 && (self.position as usize) < self.items.len().saturating_sub(1)
    }

    pub fn has_prev(&self) -> bool {
        self.position > 0
    }

    /// Whether the cursor sits on the final item.
    pub fn is_last(&self) -> bool {
        self.position >= 0 && self.position as usize == self.items.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::TrackKind;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Track {id}"),
            artist: "Artist".to_string(),
            cover: String::new(),
            source: format!("https://media.example/{id}"),
            kind: TrackKind::Audio { duration_secs: 180.0 },
        }
    }

    #[test]
    fn empty_queue_has_no_current() {
        let q = PlayQueue::new();
        assert_eq!(q.position(), -1);
        assert!(q.current().is_none());
        assert!(!q.has_next());
        assert!(!q.has_prev());
    }

    #[test]
    fn replace_with_locates_track_by_id() {
        let mut q = PlayQueue::new();
        q.replace_with(vec![track("a"), track("b"), track("c")], &track("b"));
        assert_eq!(q.position(), 1);
        assert_eq!(q.current().unwrap().id, "b");
    }

    #[test]
    fn replace_with_defaults_to_zero_when_absent() {
        let mut q = PlayQueue::new();
        q.replace_with(vec![track("a"), track("b")], &track("zz"));
        assert_eq!(q.position(), 0);
        assert_eq!(q.current().unwrap().id, "a");
    }

    #[test]
    fn replace_with_first_match_on_duplicate_ids() {
        let mut q = PlayQueue::new();
        q.replace_with(vec![track("a"), track("b"), track("b")], &track("b"));
        assert_eq!(q.position(), 1);
    }

    #[test]
    fn single_resets_to_one_element() {
        let mut q = PlayQueue::new();
        q.replace_with(vec![track("a"), track("b")], &track("b"));
        q.single(track("x"));
        assert_eq!(q.len(), 1);
        assert_eq!(q.position(), 0);
        assert_eq!(q.current().unwrap().id, "x");
    }

    #[test]
    fn advance_and_retreat_stop_at_the_edges() {
        let mut q = PlayQueue::new();
        assert!(q.advance().is_none());
        q.replace_with(vec![track("a"), track("b")], &track("a"));
        assert!(q.retreat().is_none());
        assert_eq!(q.advance().unwrap().id, "b");
        assert!(q.advance().is_none());
        assert_eq!(q.position(), 1);
        assert_eq!(q.retreat().unwrap().id, "a");
        assert!(q.retreat().is_none());
        assert_eq!(q.position(), 0);
    }

    #[test]
    fn set_position_rejects_out_of_range() {
        let mut q = PlayQueue::new();
        q.replace_with(vec![track("a"), track("b")], &track("a"));
        assert!(!q.set_position(2));
        assert_eq!(q.position(), 0);
        assert!(q.set_position(1));
        assert_eq!(q.position(), 1);
    }

    #[test]
    fn cursor_invariant_holds_through_mutations() {
        let mut q = PlayQueue::new();
        let check = |q: &PlayQueue| {
            assert!(q.position() >= -1 && q.position() < q.len() as i32);
            if q.position() >= 0 {
                assert_eq!(q.current().unwrap().id, q.items()[q.position() as usize].id);
            }
        };
        check(&q);
        q.single(track("a"));
        check(&q);
        q.append(track("b"));
        check(&q);
        q.set_position(1);
        check(&q);
        q.extend(vec![track("c"), track("d")]);
        check(&q);
        q.set_position(99);
        check(&q);
    }

    #[test]
    fn append_reports_new_index_and_keeps_cursor() {
        let mut q = PlayQueue::new();
        q.single(track("a"));
        let idx = q.append(track("b"));
        assert_eq!(idx, 1);
        assert_eq!(q.position(), 0);
        assert!(q.has_next());
        assert!(!q.is_last());
        q.set_position(idx);
        assert!(q.is_last());
    }
}
