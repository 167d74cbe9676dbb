//! A DJ session: library, controller cache and mixer wired together.

use anyhow::{Context, Result};
use core::fmt;
use core::num::NonZeroUsize;
use deck_cache::config::{PlaylistSpec, SessionConfig};
use deck_cache::service::{DjController, DjLibrary, LoadOutcome, MixingEngine};
use deck_cache::Track;
use tracing::{info, warn};

/// Counters collected while a playlist is played.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionStats {
    pub tracks_processed: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub cache_evictions: usize,
    pub clone_failures: usize,
    pub deck_loads: usize,
    pub deck_load_failures: usize,
    pub transitions: usize,
}

impl SessionStats {
    /// Folds one controller outcome into the counters.
    pub fn record(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Hit => self.cache_hits += 1,
            LoadOutcome::Inserted => self.cache_misses += 1,
            LoadOutcome::Evicted => {
                self.cache_misses += 1;
                self.cache_evictions += 1;
            }
            LoadOutcome::CloneFailed => self.clone_failures += 1,
        }
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Session Summary ===")?;
        writeln!(f, "Tracks processed: {}", self.tracks_processed)?;
        writeln!(f, "Cache hits: {}", self.cache_hits)?;
        writeln!(f, "Cache misses: {}", self.cache_misses)?;
        writeln!(f, "Cache evictions: {}", self.cache_evictions)?;
        writeln!(f, "Clone failures: {}", self.clone_failures)?;
        writeln!(f, "Deck loads: {}", self.deck_loads)?;
        writeln!(f, "Deck load failures: {}", self.deck_load_failures)?;
        writeln!(f, "Deck transitions: {}", self.transitions)
    }
}

/// Owns every service of a running session.
#[derive(Debug)]
pub struct DjSession {
    config: SessionConfig,
    library: DjLibrary,
    controller: DjController<Track>,
    mixer: MixingEngine,
    stats: SessionStats,
}

impl DjSession {
    /// Builds the library and services described by `config`.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let cache_size = config.cache_capacity()?;
        Self::with_cache_size(config, cache_size)
    }

    /// Like [`new`](Self::new), overriding the configured cache size.
    pub fn with_cache_size(config: SessionConfig, cache_size: NonZeroUsize) -> Result<Self> {
        let mut library = DjLibrary::new();
        library
            .build_library(&config.library)
            .context("failed to build track library")?;
        let mixer = MixingEngine::with_settings(&config.mixer);
        info!(
            cache_size = cache_size.get(),
            auto_sync = mixer.auto_sync(),
            bpm_tolerance = mixer.bpm_tolerance(),
            "session initialized"
        );

        Ok(Self {
            config,
            library,
            controller: DjController::new(cache_size),
            mixer,
            stats: SessionStats::default(),
        })
    }

    /// Plays a playlist: each track goes through the controller cache, then onto a deck.
    ///
    /// `playlist` selects a configured playlist by name. Without one the first configured
    /// playlist is used, or the whole library in order if none are configured.
    pub fn run(&mut self, playlist: Option<&str>) -> Result<&SessionStats> {
        let spec = self.select_playlist(playlist)?;
        let loaded = self.library.load_playlist(&spec);
        info!(playlist = %spec.name, tracks = loaded, "starting session");

        for title in self.library.track_titles() {
            let Some(track) = self.library.find_track(&title) else {
                continue;
            };
            self.stats.tracks_processed += 1;

            let outcome = self.controller.load_track_to_cache(track)?;
            info!(title = %title, outcome = %outcome, "controller load");
            self.stats.record(outcome);
            if outcome == LoadOutcome::CloneFailed {
                continue;
            }

            let Some(cached) = self.controller.get_track_from_cache(&title) else {
                warn!(title = %title, "track missing from cache after load");
                continue;
            };
            let had_active = matches!(self.mixer.deck(self.mixer.active_deck()), Ok(Some(_)));
            match self.mixer.load_track_to_deck(cached) {
                Ok(deck) => {
                    self.stats.deck_loads += 1;
                    if had_active {
                        self.stats.transitions += 1;
                    }
                    info!(title = %title, deck, "now playing");
                }
                Err(err) => {
                    self.stats.deck_load_failures += 1;
                    warn!(title = %title, error = %err, "deck load failed");
                }
            }
        }

        Ok(&self.stats)
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn library(&self) -> &DjLibrary {
        &self.library
    }

    pub fn controller(&self) -> &DjController<Track> {
        &self.controller
    }

    pub fn mixer(&self) -> &MixingEngine {
        &self.mixer
    }

    /// Cache and deck status, framed for terminal output.
    pub fn status_report(&self) -> String {
        format!(
            "\n=== Cache Status ===\n{}====================\n\n=== Deck Status ===\n{}===================\n",
            self.controller.cache_status(),
            self.mixer.status()
        )
    }

    fn select_playlist(&self, name: Option<&str>) -> Result<PlaylistSpec> {
        if let Some(name) = name {
            return Ok(self.config.playlist(name)?.clone());
        }
        if let Some(first) = self.config.playlists.first() {
            return Ok(first.clone());
        }
        let count = i64::try_from(self.library.library_len())?;
        Ok(PlaylistSpec {
            name: "library".to_string(),
            tracks: (1..=count).collect(),
        })
    }
}
