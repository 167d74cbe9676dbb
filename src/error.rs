//! Error types for cache, handle, track and service operations.
//!
//! Cache misses are not errors: lookups return `Option`. The enums here cover
//! caller misuse (an empty handle handed to [`LruCache::put`](crate::LruCache::put)),
//! recoverable clone failures, and invalid configuration input.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors raised when dereferencing an [`Owned`](crate::Owned) handle.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum HandleError {
    /// The handle does not own a resource.
    #[error("Dereferenced an empty ownership handle")]
    Empty,
}

/// Errors raised by cache mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    /// `put` was called with a handle that owns nothing. The cache is left untouched.
    #[error("Cannot insert an empty handle into the cache")]
    EmptyHandle,

    /// No empty slot was found after making room. Indicates a broken slot invariant.
    #[error("No free slot in a cache of capacity {capacity} after eviction")]
    NoFreeSlot { capacity: usize },
}

/// A deep copy of a resource could not be produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Track '{title}' failed to clone: {source}")]
pub struct CloneError {
    /// Title of the resource that failed to clone.
    pub title: String,
    /// Allocation failure reported while copying the resource's buffers.
    #[source]
    pub source: TryReserveError,
}

/// Errors raised by the mixing engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MixerError {
    #[error(transparent)]
    Clone(#[from] CloneError),

    #[error("Deck {deck} is out of range")]
    InvalidDeck { deck: usize },
}

/// Errors raised while turning configuration into library state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field} on track '{title}': {reason}")]
    InvalidTrack {
        title: String,
        field: &'static str,
        reason: String,
    },

    #[error("Duplicate track title in library: '{title}'")]
    DuplicateTitle { title: String },

    #[error("Playlist not found: '{name}'")]
    PlaylistNotFound { name: String },

    #[error("Cache size must be at least 1")]
    ZeroCacheSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::EmptyHandle.to_string(),
            "Cannot insert an empty handle into the cache"
        );
        assert_eq!(
            HandleError::Empty.to_string(),
            "Dereferenced an empty ownership handle"
        );
        let err = ConfigError::PlaylistNotFound {
            name: "warmup".to_string(),
        };
        assert_eq!(err.to_string(), "Playlist not found: 'warmup'");
    }

    #[test]
    fn test_clone_error_wraps_into_mixer_error() {
        let source = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let err = CloneError {
            title: "Strobe".to_string(),
            source,
        };
        let mixer: MixerError = err.clone().into();
        assert_eq!(mixer, MixerError::Clone(err));
        assert!(mixer.to_string().starts_with("Track 'Strobe' failed to clone"));
    }
}
