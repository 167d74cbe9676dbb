//! Configuration for the slot-array LRU cache.
//!
//! The cache is bounded by entry count only. Each entry is one slot in a fixed-length
//! array, so `capacity` is also the number of slots allocated up front.
//!
//! # Examples
//!
//! ```
//! use deck_cache::config::LruCacheConfig;
//! use deck_cache::{LruCache, Track};
//! use core::num::NonZeroUsize;
//!
//! // A controller with room for eight hot tracks
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(8).unwrap(),
//! };
//! let cache: LruCache<Track> = LruCache::init(config);
//! assert_eq!(cache.cap().get(), 8);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an [`LruCache`](crate::LruCache).
///
/// # Fields
///
/// - `capacity`: Number of slots, and therefore the maximum number of entries.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of resources the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Builds a config from a raw entry count, rejecting zero.
    pub fn with_capacity(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity).map(|capacity| Self { capacity })
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_config_creation() {
        let config = LruCacheConfig {
            capacity: NonZeroUsize::new(1000).unwrap(),
        };
        assert_eq!(config.capacity.get(), 1000);
    }

    #[test]
    fn test_lru_config_with_capacity() {
        assert_eq!(LruCacheConfig::with_capacity(0), None);
        let config = LruCacheConfig::with_capacity(3).unwrap();
        assert_eq!(config.capacity.get(), 3);
    }
}
