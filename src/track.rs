//! Audio Track Model
//!
//! A [`Track`] is the resource the DJ services pass around and the cache owns. All
//! tracks share a title, artist list, duration and tempo; the encoding specific
//! fields live in the closed [`TrackFormat`] enum (compressed MP3 or uncompressed
//! WAV), and format-dependent behavior dispatches on it with `match`.
//!
//! # Payload
//!
//! Audio data is simulated. [`Track::load`] fills a waveform buffer with a
//! deterministic stand-in signal and [`Track::analyze_beatgrid`] derives beat
//! positions from the tempo. Both buffers are deep-copied whenever a track is cloned
//! into the cache, a playlist or a deck.
//!
//! ```
//! use deck_cache::{Resource, Track};
//!
//! let original = Track::mp3("Night Bus", vec!["Ada".into()], 180, 124, 320, true);
//! let mut copy = original.try_clone_owned().unwrap();
//! copy.get_mut().unwrap().set_bpm(130);
//!
//! assert_eq!(original.bpm(), 124);
//! assert_eq!(copy.get().unwrap().bpm(), 130);
//! ```

use crate::error::CloneError;
use crate::handle::Owned;
use crate::resource::Resource;
use core::f64::consts::PI;
use core::fmt;
use std::collections::TryReserveError;
use tracing::trace;

/// Waveform resolution for compressed tracks (one sample per 10 ms).
const MP3_SAMPLES_PER_SECOND: usize = 100;

/// Waveform resolution for uncompressed tracks (one sample per 5 ms).
const WAV_SAMPLES_PER_SECOND: usize = 200;

/// Longest duration, in seconds, that [`Track::load`] and [`Track::analyze_beatgrid`]
/// build buffers for. Longer tracks are analyzed over their first 24 hours only.
pub const MAX_DURATION_SECONDS: u32 = 24 * 60 * 60;

/// Highest tempo the beat grid resolves. Faster tempos are analyzed at this rate.
pub const MAX_BPM: u32 = 999;

/// Bitrate that earns a compressed track the full quality score.
const MP3_REFERENCE_BITRATE: f64 = 320.0;

/// Encoding-specific attributes of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFormat {
    /// Compressed MP3 audio.
    Mp3 {
        /// Bitrate in kbps.
        bitrate: u32,
        /// Whether the file carries ID3 metadata tags.
        has_id3_tags: bool,
    },
    /// Uncompressed WAV audio.
    Wav {
        /// Sample rate in Hz.
        sample_rate: u32,
        /// Bits per sample.
        bit_depth: u16,
    },
}

impl TrackFormat {
    /// Short label used in listings: `"MP3"` or `"WAV"`.
    pub fn label(&self) -> &'static str {
        match self {
            TrackFormat::Mp3 { .. } => "MP3",
            TrackFormat::Wav { .. } => "WAV",
        }
    }

    fn samples_per_second(&self) -> usize {
        match self {
            TrackFormat::Mp3 { .. } => MP3_SAMPLES_PER_SECOND,
            TrackFormat::Wav { .. } => WAV_SAMPLES_PER_SECOND,
        }
    }
}

/// An audio track with a simulated waveform and beat grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    title: String,
    artists: Vec<String>,
    duration_seconds: u32,
    bpm: u32,
    format: TrackFormat,
    waveform: Option<Vec<f64>>,
    beatgrid: Option<Vec<f64>>,
}

impl Track {
    /// Creates a track with the given format. Nothing is loaded yet.
    pub fn new(
        title: impl Into<String>,
        artists: Vec<String>,
        duration_seconds: u32,
        bpm: u32,
        format: TrackFormat,
    ) -> Self {
        Self {
            title: title.into(),
            artists,
            duration_seconds,
            bpm,
            format,
            waveform: None,
            beatgrid: None,
        }
    }

    pub fn mp3(
        title: impl Into<String>,
        artists: Vec<String>,
        duration_seconds: u32,
        bpm: u32,
        bitrate: u32,
        has_id3_tags: bool,
    ) -> Self {
        Self::new(
            title,
            artists,
            duration_seconds,
            bpm,
            TrackFormat::Mp3 {
                bitrate,
                has_id3_tags,
            },
        )
    }

    pub fn wav(
        title: impl Into<String>,
        artists: Vec<String>,
        duration_seconds: u32,
        bpm: u32,
        sample_rate: u32,
        bit_depth: u16,
    ) -> Self {
        Self::new(
            title,
            artists,
            duration_seconds,
            bpm,
            TrackFormat::Wav {
                sample_rate,
                bit_depth,
            },
        )
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    #[inline]
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    #[inline]
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    #[inline]
    pub fn set_bpm(&mut self, bpm: u32) {
        self.bpm = bpm;
    }

    #[inline]
    pub fn format(&self) -> TrackFormat {
        self.format
    }

    /// The loaded waveform, or `None` before [`load`](Self::load).
    pub fn waveform(&self) -> Option<&[f64]> {
        self.waveform.as_deref()
    }

    /// Mutable access to the loaded waveform.
    pub fn waveform_mut(&mut self) -> Option<&mut [f64]> {
        self.waveform.as_deref_mut()
    }

    /// Beat positions in seconds, or `None` before [`analyze_beatgrid`](Self::analyze_beatgrid).
    pub fn beatgrid(&self) -> Option<&[f64]> {
        self.beatgrid.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.waveform.is_some()
    }

    pub fn is_analyzed(&self) -> bool {
        self.beatgrid.is_some()
    }

    /// Fills the waveform buffer with a stand-in signal. Does nothing if already loaded.
    pub fn load(&mut self) {
        if self.waveform.is_some() {
            return;
        }
        let rate = self.format.samples_per_second();
        let samples = self.duration_seconds.min(MAX_DURATION_SECONDS) as usize * rate;
        let beat_hz = f64::from(self.bpm) / 60.0;
        let waveform = (0..samples)
            .map(|i| {
                let t = i as f64 / rate as f64;
                (2.0 * PI * beat_hz * t).sin()
            })
            .collect::<Vec<_>>();
        trace!(title = %self.title, samples, "waveform loaded");
        self.waveform = Some(waveform);
    }

    /// Computes beat positions (in seconds) from the tempo, one every `60 / bpm`
    /// seconds up to the track duration. A zero tempo yields an empty grid.
    ///
    /// Duration and tempo are capped at [`MAX_DURATION_SECONDS`] and [`MAX_BPM`].
    pub fn analyze_beatgrid(&mut self) {
        let duration = f64::from(self.duration_seconds.min(MAX_DURATION_SECONDS));
        let beats = if self.bpm == 0 {
            Vec::new()
        } else {
            let interval = 60.0 / f64::from(self.bpm.min(MAX_BPM));
            let count = (duration / interval).floor() as usize;
            (0..=count)
                .map(|beat| beat as f64 * interval)
                .filter(|&pos| pos <= duration)
                .collect()
        };
        trace!(title = %self.title, beats = beats.len(), "beatgrid analyzed");
        self.beatgrid = Some(beats);
    }

    /// A 0-100 quality rating derived from the encoding parameters.
    pub fn quality_score(&self) -> f64 {
        match self.format {
            TrackFormat::Mp3 {
                bitrate,
                has_id3_tags,
            } => {
                let mut score = f64::from(bitrate) / MP3_REFERENCE_BITRATE * 100.0;
                if has_id3_tags {
                    score += 5.0;
                }
                score.min(100.0)
            }
            TrackFormat::Wav {
                sample_rate,
                bit_depth,
            } => {
                let score =
                    f64::from(sample_rate) / 44_100.0 * 50.0 + f64::from(bit_depth) / 16.0 * 50.0;
                score.min(100.0)
            }
        }
    }
}

fn copy_buffer(buffer: Option<&Vec<f64>>) -> Result<Option<Vec<f64>>, TryReserveError> {
    let Some(source) = buffer else {
        return Ok(None);
    };
    let mut copy = Vec::new();
    copy.try_reserve_exact(source.len())?;
    copy.extend_from_slice(source);
    Ok(Some(copy))
}

impl Resource for Track {
    #[inline]
    fn key(&self) -> &str {
        &self.title
    }

    fn try_clone_owned(&self) -> Result<Owned<Self>, CloneError> {
        let to_clone_error = |source| CloneError {
            title: self.title.clone(),
            source,
        };
        let waveform = copy_buffer(self.waveform.as_ref()).map_err(to_clone_error)?;
        let beatgrid = copy_buffer(self.beatgrid.as_ref()).map_err(to_clone_error)?;
        Ok(Owned::new(Track {
            title: self.title.clone(),
            artists: self.artists.clone(),
            duration_seconds: self.duration_seconds,
            bpm: self.bpm,
            format: self.format,
            waveform,
            beatgrid,
        }))
    }

    fn prepare(&mut self) {
        self.load();
        self.analyze_beatgrid();
    }

    fn payload_bytes(&self) -> u64 {
        let samples = self.waveform.as_ref().map_or(0, Vec::len)
            + self.beatgrid.as_ref().map_or(0, Vec::len);
        (samples * core::mem::size_of::<f64>()) as u64
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} by {} ({}s, {} BPM, ",
            self.format.label(),
            self.title,
            self.artists.join(", "),
            self.duration_seconds,
            self.bpm
        )?;
        match self.format {
            TrackFormat::Mp3 { bitrate, .. } => write!(f, "{}kbps)", bitrate),
            TrackFormat::Wav {
                sample_rate,
                bit_depth,
            } => write!(f, "{}Hz/{}bit)", sample_rate, bit_depth),
        }
    }
}
