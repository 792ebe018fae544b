//! Ordered playlist
//!
//! Plain data structure: insertion order is playback order, entries are
//! unique by video id and by display key. Timing and metadata lookup live in
//! [`PlaylistOrchestrator`](crate::PlaylistOrchestrator).

use tubecast_core::{DisplayKey, Track, VideoId};

/// User-ordered queue of tracks
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    entries: Vec<Track>,
}

impl Playlist {
    /// Create new empty playlist
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append at the tail
    ///
    /// Returns false (and leaves the playlist untouched) if the id or the
    /// display key is already present.
    pub fn push(&mut self, track: Track) -> bool {
        if self.contains(&track.id) || self.position_of_key(&track.display_key).is_some() {
            return false;
        }
        self.entries.push(track);
        true
    }

    pub fn contains(&self, id: &VideoId) -> bool {
        self.position(id).is_some()
    }

    /// Index of the entry for `id`
    pub fn position(&self, id: &VideoId) -> Option<usize> {
        self.entries.iter().position(|t| &t.id == id)
    }

    /// Index of the entry with `key`
    pub fn position_of_key(&self, key: &DisplayKey) -> Option<usize> {
        self.entries.iter().position(|t| &t.display_key == key)
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.entries.get(index)
    }

    /// Get track by id
    pub fn find(&self, id: &VideoId) -> Option<&Track> {
        self.entries.iter().find(|t| &t.id == id)
    }

    /// Remove the entry with `key`, wherever it currently sits
    pub fn remove_by_key(&mut self, key: &DisplayKey) -> Option<Track> {
        let index = self.position_of_key(key)?;
        Some(self.entries.remove(index))
    }

    /// Move the entry at `from` to `to`, shifting the ones in between
    ///
    /// Returns false for equal or out-of-range indices.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.entries.len();
        if from == to || from >= len || to >= len {
            return false;
        }
        let track = self.entries.remove(from);
        self.entries.insert(to, track);
        true
    }

    /// Track to play after `current` finishes
    ///
    /// - `current` present and not last: the following entry
    /// - `current` is last: nothing (no looping)
    /// - `current` not in the playlist: the first entry
    /// - empty playlist: nothing
    pub fn next_after(&self, current: &VideoId) -> Option<&Track> {
        match self.position(current) {
            Some(index) => self.entries.get(index + 1),
            None => self.entries.first(),
        }
    }

    /// Total number of tracks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.entries.iter()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: char) -> VideoId {
        VideoId::parse(std::iter::repeat(n).take(11).collect::<String>()).unwrap()
    }

    fn track(n: char) -> Track {
        Track::new(id(n))
    }

    fn ids(playlist: &Playlist) -> String {
        playlist
            .iter()
            .map(|t| t.id.as_str().chars().next().unwrap())
            .collect()
    }

    fn abc() -> Playlist {
        let mut playlist = Playlist::new();
        for n in ['A', 'B', 'C'] {
            assert!(playlist.push(track(n)));
        }
        playlist
    }

    #[test]
    fn create_empty_playlist() {
        let playlist = Playlist::new();
        assert_eq!(playlist.len(), 0);
        assert!(playlist.is_empty());
    }

    #[test]
    fn push_rejects_duplicate_ids() {
        let mut playlist = Playlist::new();
        assert!(playlist.push(track('A')));
        assert!(!playlist.push(track('A')));
        assert_eq!(playlist.len(), 1);
    }

    #[test]
    fn push_rejects_duplicate_display_keys() {
        let mut playlist = Playlist::new();
        let first = track('A');
        let mut second = track('B');
        second.display_key = first.display_key.clone();

        assert!(playlist.push(first));
        assert!(!playlist.push(second));
    }

    #[test]
    fn reorder_first_to_last() {
        let mut playlist = abc();
        assert!(playlist.reorder(0, 2));
        assert_eq!(ids(&playlist), "BCA");
    }

    #[test]
    fn reorder_last_to_first() {
        let mut playlist = abc();
        assert!(playlist.reorder(2, 0));
        assert_eq!(ids(&playlist), "CAB");
    }

    #[test]
    fn reorder_noops() {
        let mut playlist = abc();
        assert!(!playlist.reorder(1, 1));
        assert!(!playlist.reorder(0, 3));
        assert!(!playlist.reorder(5, 0));
        assert_eq!(ids(&playlist), "ABC");
    }

    #[test]
    fn next_after_policy() {
        let playlist = abc();
        assert_eq!(playlist.next_after(&id('B')).map(|t| t.id.clone()), Some(id('C')));
        assert_eq!(playlist.next_after(&id('C')), None);
        assert_eq!(playlist.next_after(&id('Z')).map(|t| t.id.clone()), Some(id('A')));
        assert_eq!(Playlist::new().next_after(&id('A')), None);
    }

    #[test]
    fn remove_by_key_follows_moves() {
        let mut playlist = abc();
        let key = playlist.get(0).unwrap().display_key.clone();
        playlist.reorder(0, 2);

        let removed = playlist.remove_by_key(&key).unwrap();
        assert_eq!(removed.id, id('A'));
        assert_eq!(ids(&playlist), "BC");
        assert!(playlist.remove_by_key(&key).is_none());
    }
}
