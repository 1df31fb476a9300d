use crate::audio::track::{Track, TrackId};

/// Ordered playlist backing the previous/next commands. Movement stops at
/// either end; the queue never wraps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Queue {
    pub tracks: Vec<Track>,
    pub current_track_index: usize,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, tracks: Vec<Track>, start_index: usize) -> Option<Track> {
        if tracks.is_empty() || start_index >= tracks.len() {
            return None;
        }

        self.tracks = tracks;
        self.current_track_index = start_index;
        self.current().cloned()
    }

    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current_track_index)
    }

    pub fn next(&mut self) -> Option<Track> {
        if self.is_last() {
            return None;
        }

        self.current_track_index += 1;
        self.current().cloned()
    }

    pub fn previous(&mut self) -> Option<Track> {
        if self.is_first() {
            return None;
        }

        self.current_track_index -= 1;
        self.current().cloned()
    }

    pub fn select(&mut self, id: &TrackId) -> Option<Track> {
        let index = self.tracks.iter().position(|t| &t.id == id)?;
        self.current_track_index = index;
        self.current().cloned()
    }

    pub fn is_first(&self) -> bool {
        self.tracks.is_empty() || self.current_track_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.tracks.is_empty() || self.current_track_index + 1 >= self.tracks.len()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
