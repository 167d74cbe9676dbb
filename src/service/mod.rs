//! DJ services built on top of the cache.
//!
//! | Service | Owns | Role |
//! |---------|------|------|
//! | [`DjLibrary`] | master tracks, current [`Playlist`] | builds the library from configuration and loads playlists as prepared copies |
//! | [`DjController`] | an [`LruCache`](crate::LruCache) | keeps prepared copies of recently played tracks hot |
//! | [`MixingEngine`] | two decks | plays a prepared copy on the inactive deck, then switches |
//!
//! Every hand-off between services is a deep clone; no two services ever share a
//! track's buffers.

pub mod controller;
pub mod library;
pub mod mixer;
pub mod playlist;

pub use controller::{DjController, LoadOutcome};
pub use library::DjLibrary;
pub use mixer::{DeckStatus, MixingEngine, DECK_COUNT};
pub use playlist::Playlist;
