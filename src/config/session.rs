//! Session configuration: the track library, playlists, and service settings.
//!
//! These types only describe the data. Reading them from a file or the environment
//! is left to the embedding application (the `dj-session` binary uses the `config`
//! crate for that).
//!
//! File format (TOML):
//!
//! ```toml
//! [controller]
//! cache_size = 3
//!
//! [mixer]
//! auto_sync = true
//! bpm_tolerance = 4
//!
//! [[library]]
//! type = "MP3"
//! title = "Night Bus"
//! artists = ["Ada"]
//! duration_seconds = 212
//! bpm = 124
//! bitrate = 320
//!
//! [[library]]
//! type = "WAV"
//! title = "Harbor Lights"
//! artists = ["Ben"]
//! duration_seconds = 305
//! bpm = 122
//! sample_rate = 48000
//! bit_depth = 24
//!
//! [[playlists]]
//! name = "warmup"
//! tracks = [1, 2, 1]
//! ```

use crate::error::ConfigError;
use crate::track::{Track, MAX_BPM, MAX_DURATION_SECONDS};
use core::num::NonZeroUsize;
use serde::Deserialize;

const DEFAULT_CACHE_SIZE: usize = 4;
const DEFAULT_BITRATE: u32 = 320;
const DEFAULT_SAMPLE_RATE: u32 = 44_100;
const DEFAULT_BIT_DEPTH: u16 = 16;
const VALID_BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];

/// Top-level session settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub controller: ControllerSettings,
    pub mixer: MixerSettings,
    /// Master copies of every track available to the session.
    pub library: Vec<TrackInfo>,
    /// Named playlists referencing library tracks by 1-based index.
    pub playlists: Vec<PlaylistSpec>,
}

impl SessionConfig {
    /// Finds a playlist definition by exact name.
    pub fn playlist(&self, name: &str) -> Result<&PlaylistSpec, ConfigError> {
        self.playlists
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ConfigError::PlaylistNotFound {
                name: name.to_string(),
            })
    }

    /// The controller cache size as a non-zero capacity.
    pub fn cache_capacity(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.controller.cache_size).ok_or(ConfigError::ZeroCacheSize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Number of hot tracks the controller cache holds.
    pub cache_size: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MixerSettings {
    /// Match an incoming track's tempo to the active deck when they are too far apart.
    pub auto_sync: bool,
    /// Largest BPM difference that still counts as mixable.
    pub bpm_tolerance: u32,
}

/// Encoding of a library track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TrackKind {
    #[serde(rename = "MP3", alias = "mp3")]
    Mp3,
    #[serde(rename = "WAV", alias = "wav")]
    Wav,
}

/// One library entry as it appears in the configuration.
///
/// Format fields that do not apply to `kind` are ignored; missing ones fall back to
/// 320 kbps with ID3 tags for MP3 and 44.1 kHz / 16 bit for WAV.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackInfo {
    #[serde(rename = "type")]
    pub kind: TrackKind,
    pub title: String,
    #[serde(default)]
    pub artists: Vec<String>,
    pub duration_seconds: u32,
    pub bpm: u32,
    #[serde(default)]
    pub bitrate: Option<u32>,
    #[serde(default)]
    pub has_id3_tags: Option<bool>,
    #[serde(default)]
    pub sample_rate: Option<u32>,
    #[serde(default)]
    pub bit_depth: Option<u16>,
}

impl TrackInfo {
    /// Validates the entry and builds the corresponding track.
    pub fn to_track(&self) -> Result<Track, ConfigError> {
        if self.title.trim().is_empty() {
            return Err(self.invalid("title", "must not be empty"));
        }
        if self.duration_seconds > MAX_DURATION_SECONDS {
            return Err(self.invalid(
                "duration_seconds",
                &format!("must be at most {}", MAX_DURATION_SECONDS),
            ));
        }
        if self.bpm > MAX_BPM {
            return Err(self.invalid("bpm", &format!("must be at most {}", MAX_BPM)));
        }
        let track = match self.kind {
            TrackKind::Mp3 => {
                let bitrate = self.bitrate.unwrap_or(DEFAULT_BITRATE);
                if bitrate == 0 {
                    return Err(self.invalid("bitrate", "must be positive"));
                }
                Track::mp3(
                    self.title.clone(),
                    self.artists.clone(),
                    self.duration_seconds,
                    self.bpm,
                    bitrate,
                    self.has_id3_tags.unwrap_or(true),
                )
            }
            TrackKind::Wav => {
                let sample_rate = self.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE);
                if sample_rate == 0 {
                    return Err(self.invalid("sample_rate", "must be positive"));
                }
                let bit_depth = self.bit_depth.unwrap_or(DEFAULT_BIT_DEPTH);
                if !VALID_BIT_DEPTHS.contains(&bit_depth) {
                    return Err(self.invalid("bit_depth", "must be one of 8, 16, 24, 32"));
                }
                Track::wav(
                    self.title.clone(),
                    self.artists.clone(),
                    self.duration_seconds,
                    self.bpm,
                    sample_rate,
                    bit_depth,
                )
            }
        };
        Ok(track)
    }

    fn invalid(&self, field: &'static str, reason: &str) -> ConfigError {
        ConfigError::InvalidTrack {
            title: self.title.clone(),
            field,
            reason: reason.to_string(),
        }
    }
}

/// A playlist definition: a name and 1-based indices into the library.
///
/// Indices are signed so that out-of-range values (including zero and negatives)
/// survive parsing and can be reported and skipped when the playlist is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaylistSpec {
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<i64>,
}
