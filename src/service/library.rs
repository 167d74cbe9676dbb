//! The DJ library: master copies of every track plus the current playlist.
//!
//! Master tracks are never handed out by value. Loading a playlist deep-clones
//! each referenced master, then loads and analyzes the clone, so playlists never
//! alias library storage.

use crate::config::{PlaylistSpec, TrackInfo};
use crate::error::{CloneError, ConfigError};
use crate::handle::Owned;
use crate::resource::Resource;
use crate::service::playlist::Playlist;
use crate::track::Track;
use core::fmt;
use tracing::{error, info, warn};

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Owns the master track library and the currently loaded playlist.
#[derive(Debug, Default)]
pub struct DjLibrary {
    library: Vec<Track>,
    index: HashMap<String, usize>,
    playlist: Playlist,
}

impl DjLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the library with tracks built from `tracks`.
    ///
    /// Every entry is validated before anything is replaced, so a failed build
    /// leaves the previous library intact. Returns the number of tracks built.
    pub fn build_library(&mut self, tracks: &[TrackInfo]) -> Result<usize, ConfigError> {
        let mut library = Vec::with_capacity(tracks.len());
        let mut index = HashMap::with_capacity(tracks.len());

        for info in tracks {
            let track = info.to_track()?;
            if index.insert(track.title().to_string(), library.len()).is_some() {
                return Err(ConfigError::DuplicateTitle {
                    title: track.title().to_string(),
                });
            }
            info!(track = %track, "created library track");
            library.push(track);
        }

        self.library = library;
        self.index = index;
        info!(tracks = self.library.len(), "track library built");
        Ok(self.library.len())
    }

    /// Builds a playlist named `name` from 1-based library indices and makes it current.
    ///
    /// Indices outside `1..=library_len()` are reported and skipped. Each valid index
    /// contributes a loaded, analyzed deep copy of the master track; a track that fails
    /// to clone is reported and skipped. Returns the number of tracks added.
    pub fn load_playlist_from_indices(&mut self, name: &str, indices: &[i64]) -> usize {
        self.load_playlist_with(name, indices, Track::try_clone_owned)
    }

    fn load_playlist_with<F>(&mut self, name: &str, indices: &[i64], clone: F) -> usize
    where
        F: Fn(&Track) -> Result<Owned<Track>, CloneError>,
    {
        info!(playlist = name, "loading playlist");
        let mut playlist = Playlist::new(name);

        for &index in indices {
            let Some(master) = self.track_at(index) else {
                warn!(index, playlist = name, "invalid track index");
                continue;
            };
            match clone(master) {
                Ok(clone) => {
                    if let Some(mut track) = clone.into_inner() {
                        track.prepare();
                        playlist.add_track(*track);
                    }
                }
                Err(err) => {
                    error!(error = %err, playlist = name, "skipping track");
                }
            }
        }

        let added = playlist.len();
        self.playlist = playlist;
        info!(playlist = name, tracks = added, "playlist loaded");
        added
    }

    /// Loads a configured playlist. See [`load_playlist_from_indices`](Self::load_playlist_from_indices).
    pub fn load_playlist(&mut self, spec: &PlaylistSpec) -> usize {
        self.load_playlist_from_indices(&spec.name, &spec.tracks)
    }

    /// Looks up a track in the current playlist.
    pub fn find_track(&self, title: &str) -> Option<&Track> {
        self.playlist.find_track(title)
    }

    /// Looks up a master track by title.
    pub fn library_track(&self, title: &str) -> Option<&Track> {
        self.index.get(title).and_then(|&idx| self.library.get(idx))
    }

    /// Titles of the current playlist, in order.
    pub fn track_titles(&self) -> Vec<String> {
        self.playlist.iter().map(|t| t.title().to_string()).collect()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn playlist_mut(&mut self) -> &mut Playlist {
        &mut self.playlist
    }

    pub fn library(&self) -> &[Track] {
        &self.library
    }

    pub fn library_len(&self) -> usize {
        self.library.len()
    }

    fn track_at(&self, index: i64) -> Option<&Track> {
        let pos = usize::try_from(index).ok()?.checked_sub(1)?;
        self.library.get(pos)
    }
}

impl fmt::Display for DjLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== DJ Library Playlist: {} ===", self.playlist.name())?;
        if self.playlist.is_empty() {
            return writeln!(f, "[INFO] Playlist is empty.");
        }
        write!(f, "{}", self.playlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackKind;

    fn info(kind: TrackKind, title: &str, bpm: u32) -> TrackInfo {
        TrackInfo {
            kind,
            title: title.to_string(),
            artists: vec!["Ada".to_string()],
            duration_seconds: 2,
            bpm,
            bitrate: None,
            has_id3_tags: None,
            sample_rate: None,
            bit_depth: None,
        }
    }

    fn library() -> DjLibrary {
        let mut library = DjLibrary::new();
        let built = library
            .build_library(&[
                info(TrackKind::Mp3, "One", 120),
                info(TrackKind::Wav, "Two", 124),
                info(TrackKind::Mp3, "Three", 128),
            ])
            .unwrap();
        assert_eq!(built, 3);
        library
    }

    #[test]
    fn test_build_library() {
        let library = library();
        assert_eq!(library.library_len(), 3);
        assert_eq!(library.library_track("Two").map(Track::bpm), Some(124));
        assert!(library.library_track("Four").is_none());
        assert!(library.playlist().is_empty());
    }

    #[test]
    fn test_build_library_rejects_duplicates_and_keeps_previous() {
        let mut library = library();
        let err = library
            .build_library(&[info(TrackKind::Mp3, "A", 1), info(TrackKind::Wav, "A", 2)])
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateTitle { title: "A".into() });
        assert_eq!(library.library_len(), 3);
        assert!(library.library_track("One").is_some());
    }

    #[test]
    fn test_load_playlist_skips_tracks_that_fail_to_clone() {
        let mut library = library();
        let added = library.load_playlist_with("set", &[1, 2, 3], |master| {
            if master.title() == "Two" {
                let mut buf: Vec<u8> = Vec::new();
                return Err(CloneError {
                    title: master.title().to_string(),
                    source: buf.try_reserve_exact(usize::MAX).unwrap_err(),
                });
            }
            master.try_clone_owned()
        });
        assert_eq!(added, 2);
        assert_eq!(library.track_titles(), vec!["One", "Three"]);
        assert!(library.playlist().iter().all(Track::is_analyzed));
    }

    #[test]
    fn test_build_library_rejects_oversized_duration() {
        let mut library = library();
        let mut long = info(TrackKind::Wav, "Endless", 120);
        long.duration_seconds = u32::MAX;
        assert!(matches!(
            library.build_library(&[long]),
            Err(ConfigError::InvalidTrack {
                field: "duration_seconds",
                ..
            })
        ));
        assert_eq!(library.library_len(), 3);
    }

    #[test]
    fn test_load_playlist_skips_invalid_indices() {
        let mut library = library();
        let added = library.load_playlist_from_indices("set", &[0, 1, 4, -2, 3, 1]);
        assert_eq!(added, 3);
        assert_eq!(library.track_titles(), vec!["One", "Three", "One"]);
        assert_eq!(library.playlist().name(), "set");
    }

    #[test]
    fn test_playlist_tracks_are_prepared_copies() {
        let mut library = library();
        library.load_playlist_from_indices("set", &[2]);

        let loaded = library.find_track("Two").unwrap();
        assert!(loaded.is_loaded());
        assert!(loaded.is_analyzed());

        let master = library.library_track("Two").unwrap();
        assert!(!master.is_loaded());

        library.playlist_mut().find_track_mut("Two").unwrap().set_bpm(99);
        assert_eq!(library.library_track("Two").unwrap().bpm(), 124);
    }

    #[test]
    fn test_load_playlist_replaces_current() {
        let mut library = library();
        library.load_playlist(&PlaylistSpec {
            name: "first".into(),
            tracks: vec![1],
        });
        library.load_playlist_from_indices("second", &[2, 3]);
        assert_eq!(library.track_titles(), vec!["Two", "Three"]);
        assert!(library.find_track("One").is_none());
    }

    #[test]
    fn test_display() {
        let mut library = library();
        assert_eq!(
            library.to_string(),
            "=== DJ Library Playlist:  ===\n[INFO] Playlist is empty.\n"
        );
        library.load_playlist_from_indices("set", &[1]);
        let text = library.to_string();
        assert!(text.starts_with("=== DJ Library Playlist: set ===\nPlaylist: set (1 tracks)\n"));
        assert!(text.ends_with("Total duration: 2 seconds\n"));
    }
}
