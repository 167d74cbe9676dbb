//! Configuration Module
//!
//! Configuration structs are plain structs with public fields. Cache capacities are
//! `NonZeroUsize`, and session settings deserialize straight from TOML.
//!
//! | Config | Used By | Description |
//! |--------|---------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Slot count of the cache |
//! | `SessionConfig` | [`DjLibrary`](crate::service::DjLibrary), [`DjController`](crate::service::DjController), [`MixingEngine`](crate::service::MixingEngine) | Library, playlists and service settings |
//!
//! # Examples
//!
//! ```
//! use deck_cache::config::LruCacheConfig;
//! use deck_cache::{LruCache, Track};
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(4).unwrap(),
//! };
//! let cache: LruCache<Track> = LruCache::init(config);
//! assert!(cache.is_empty());
//! ```

pub mod lru;
pub mod session;

pub use lru::LruCacheConfig;
pub use session::{
    ControllerSettings, MixerSettings, PlaylistSpec, SessionConfig, TrackInfo, TrackKind,
};
