//! Circular cursor over the loaded tracks.

use crate::error::{Error, Result};
use crate::library::Track;

#[derive(Debug, Clone)]
pub struct PlaylistCursor {
    tracks: Vec<Track>,
    index: usize,
}

impl PlaylistCursor {
    /// Start at the first track. An empty list is rejected.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(Error::EmptyPlaylist);
        }
        Ok(Self { tracks, index: 0 })
    }

    pub fn current(&self) -> &Track {
        &self.tracks[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// The position and track `advance` would move to, without moving.
    pub fn peek_next(&self) -> (usize, &Track) {
        let next = (self.index + 1) % self.tracks.len();
        (next, &self.tracks[next])
    }

    /// Move to the next track, wrapping after the last one.
    pub fn advance(&mut self) -> &Track {
        self.index = (self.index + 1) % self.tracks.len();
        &self.tracks[self.index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(names: &[&str]) -> Vec<Track> {
        names
            .iter()
            .map(|n| Track::new(format!("/music/{n}.mp3"), *n))
            .collect()
    }

    #[test]
    fn empty_playlist_is_rejected() {
        assert!(matches!(PlaylistCursor::new(Vec::new()), Err(Error::EmptyPlaylist)));
    }

    #[test]
    fn starts_at_first_track() {
        let cursor = PlaylistCursor::new(tracks(&["A", "B"])).unwrap();
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.current().display_name, "A");
    }

    #[test]
    fn advance_wraps_after_last_track() {
        let mut cursor = PlaylistCursor::new(tracks(&["A", "B", "C"])).unwrap();
        assert_eq!(cursor.advance().display_name, "B");
        assert_eq!(cursor.advance().display_name, "C");
        assert_eq!(cursor.advance().display_name, "A");
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn advancing_len_times_returns_to_start() {
        for n in 1..=7 {
            let names: Vec<String> = (0..n).map(|i| format!("t{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut cursor = PlaylistCursor::new(tracks(&refs)).unwrap();
            for start in 0..n {
                assert_eq!(cursor.index(), start);
                for _ in 0..n {
                    cursor.advance();
                }
                assert_eq!(cursor.index(), start, "playlist of {n}");
                cursor.advance();
            }
        }
    }

    #[test]
    fn peek_next_does_not_move() {
        let cursor = PlaylistCursor::new(tracks(&["A", "B"])).unwrap();
        let (idx, track) = cursor.peek_next();
        assert_eq!(idx, 1);
        assert_eq!(track.display_name, "B");
        assert_eq!(cursor.index(), 0);

        let single = PlaylistCursor::new(tracks(&["solo"])).unwrap();
        assert_eq!(single.peek_next().0, 0);
    }
}
