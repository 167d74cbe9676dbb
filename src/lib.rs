#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Ownership Model
//!
//! ```text
//!   library (master)      controller cache            mixer
//!  ┌───────────────┐  clone  ┌──────────────┐  clone  ┌────────┐
//!  │ Vec<Track>    │ ──────▶ │ LruCache     │ ──────▶ │ deck 0 │
//!  │               │         │ [CacheSlot]  │         │ deck 1 │
//!  └───────────────┘         └──────────────┘         └────────┘
//! ```
//!
//! Each arrow is a deep copy produced by [`Resource::try_clone_owned`]. A copy is
//! held by exactly one [`Owned`] handle, so dropping a slot or a deck frees exactly
//! that copy and nothing else.
//!
//! ## Quick Reference
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Owned`] | Single-owner handle; move-only, may be empty |
//! | [`Track`] | MP3 or WAV track with optional waveform and beatgrid buffers |
//! | [`LruCache`] | Fixed slot array with access-counter recency |
//! | [`ConcurrentLruCache`] | `LruCache` behind a mutex (feature `concurrent`) |
//! | [`service::DjController`] | Cache of prepared track copies |
//! | [`service::MixingEngine`] | Two-deck player with BPM sync |
//! | [`service::DjLibrary`] | Master library and playlist loading |
//!
//! ## Code Examples
//!
//! ### LRU Cache
//!
//! ```rust
//! use deck_cache::{LruCache, Owned, Resource, Track};
//! use deck_cache::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache = LruCache::init(config);
//!
//! let master = Track::wav("Harbor Lights", vec!["Ben".into()], 305, 122, 48_000, 24);
//! let copy = master.try_clone_owned().unwrap();
//! assert_eq!(cache.put(copy), Ok(false));
//!
//! let cached = cache.get("Harbor Lights").unwrap();
//! assert_eq!(cached.bpm(), 122);
//! ```
//!
//! ### Controller and Mixer
//!
//! ```rust
//! use deck_cache::service::{DjController, LoadOutcome, MixingEngine};
//! use deck_cache::Track;
//! use core::num::NonZeroUsize;
//!
//! let track = Track::mp3("Night Bus", vec!["Ada".into()], 4, 124, 320, true);
//!
//! let mut controller = DjController::new(NonZeroUsize::new(3).unwrap());
//! assert_eq!(controller.load_track_to_cache(&track), Ok(LoadOutcome::Inserted));
//! assert_eq!(controller.load_track_to_cache(&track), Ok(LoadOutcome::Hit));
//!
//! let mut mixer = MixingEngine::new();
//! let cached = controller.get_track_from_cache("Night Bus").unwrap();
//! assert_eq!(mixer.load_track_to_deck(cached), Ok(0));
//! ```
//!
//! ## Modules
//!
//! - [`handle`]: The single-owner handle
//! - [`track`]: Tracks and their deep-clone contract
//! - [`lru`]: The slot-array LRU cache
//! - [`service`]: Library, controller and mixer
//! - [`config`]: Configuration structures
//! - [`metrics`]: Metrics collection for cache monitoring
//! - [`concurrent`]: Thread-safe cache wrapper (requires `concurrent` feature)

/// Error types for every fallible operation in the crate.
pub mod error;

/// Move-only, single-owner handle over a heap-allocated resource.
pub mod handle;

/// The contract a cached resource fulfils: a key and a fallible deep clone.
pub mod resource;

/// Audio tracks (MP3 and WAV) with optional waveform and beatgrid buffers.
pub mod track;

/// One cell of the cache's backing array.
pub mod slot;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used entry when
/// the capacity is reached.
pub mod lru;

/// Cache and session configuration structures.
pub mod config;

/// Cache metrics system.
///
/// Provides a BTreeMap-based metrics reporting interface shared by the cache,
/// its concurrent wrapper, and the controller.
pub mod metrics;

/// DJ services: library, controller, mixer and playlists.
pub mod service;

/// Concurrent cache implementation.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use error::{CacheError, CloneError, ConfigError, HandleError, MixerError};
pub use handle::Owned;
pub use lru::{CacheStatus, LruCache, SlotStatus};
pub use resource::Resource;
pub use slot::CacheSlot;
pub use track::{Track, TrackFormat, MAX_BPM, MAX_DURATION_SECONDS};

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;
