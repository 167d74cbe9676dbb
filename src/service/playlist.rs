//! An ordered, named collection of owned tracks.

use crate::track::Track;
use core::fmt;
use tracing::debug;

/// A named playlist that owns its tracks.
///
/// `Clone` produces an independent deep copy: every track (including any loaded
/// waveform and beatgrid) is duplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    name: String,
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a track, taking ownership of it.
    pub fn add_track(&mut self, track: Track) {
        debug!(playlist = %self.name, title = track.title(), "added track");
        self.tracks.push(track);
    }

    /// Removes the first track with this title. A missing title is a no-op.
    pub fn remove_track(&mut self, title: &str) -> Option<Track> {
        let idx = self.tracks.iter().position(|t| t.title() == title)?;
        Some(self.tracks.remove(idx))
    }

    pub fn find_track(&self, title: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.title() == title)
    }

    pub fn find_track_mut(&mut self, title: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.title() == title)
    }

    /// Sum of all track durations, in seconds.
    pub fn total_duration(&self) -> u64 {
        self.tracks
            .iter()
            .map(|t| u64::from(t.duration_seconds()))
            .sum()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.tracks.iter().map(Track::title).collect()
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = core::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Playlist: {} ({} tracks)", self.name, self.tracks.len())?;
        for (pos, track) in self.tracks.iter().enumerate() {
            writeln!(f, "  {}. {}", pos + 1, track)?;
        }
        writeln!(f, "Total duration: {} seconds", self.total_duration())
    }
}
