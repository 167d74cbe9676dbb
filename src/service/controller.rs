//! The DJ controller: a hot cache of prepared tracks.
//!
//! The controller never stores the caller's track. On a miss it deep-clones the
//! track, prepares the clone (load + beatgrid analysis) and moves it into its
//! [`LruCache`].

use crate::error::CacheError;
use crate::lru::{CacheStatus, LruCache};
use crate::metrics::CacheMetrics;
use crate::resource::Resource;
use core::fmt;
use core::num::NonZeroUsize;
use std::collections::BTreeMap;
use tracing::{debug, error};

/// Result of [`DjController::load_track_to_cache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadOutcome {
    /// The track was not cached; a prepared copy was stored without eviction.
    Inserted,
    /// The track was already cached and is now the most recently used entry.
    Hit,
    /// A prepared copy was stored after evicting the least recently used entry.
    Evicted,
    /// The track could not be cloned. The cache is unchanged.
    CloneFailed,
}

impl LoadOutcome {
    /// Numeric status code: `1` hit, `0` inserted, `-1` evicted, `-2` clone failure.
    pub fn code(self) -> i32 {
        match self {
            LoadOutcome::Hit => 1,
            LoadOutcome::Inserted => 0,
            LoadOutcome::Evicted => -1,
            LoadOutcome::CloneFailed => -2,
        }
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadOutcome::Inserted => "inserted",
            LoadOutcome::Hit => "hit",
            LoadOutcome::Evicted => "evicted",
            LoadOutcome::CloneFailed => "clone failed",
        };
        f.write_str(label)
    }
}

/// Caches prepared copies of the tracks a DJ is about to play.
pub struct DjController<T> {
    cache: LruCache<T>,
}

impl<T: Resource> DjController<T> {
    pub fn new(cache_size: NonZeroUsize) -> Self {
        Self {
            cache: LruCache::new(cache_size),
        }
    }

    /// Makes `track` available in the cache.
    ///
    /// A cached title is only refreshed. Otherwise the track is cloned, the clone
    /// is prepared and inserted, evicting the LRU entry if the cache is full.
    ///
    /// # Errors
    ///
    /// Propagates [`CacheError`] from the insert, which only happens if the clone
    /// produced an empty handle.
    pub fn load_track_to_cache(&mut self, track: &T) -> Result<LoadOutcome, CacheError> {
        if self.cache.get(track.key()).is_some() {
            debug!(title = track.key(), "cache hit");
            return Ok(LoadOutcome::Hit);
        }
        self.cache.record_miss();

        let mut clone = match track.try_clone_owned() {
            Ok(clone) => clone,
            Err(err) => {
                error!(error = %err, "track failed to clone");
                return Ok(LoadOutcome::CloneFailed);
            }
        };
        if let Ok(resource) = clone.get_mut() {
            resource.prepare();
        }

        let evicted = self.cache.put(clone)?;
        debug!(title = track.key(), evicted, "cache miss, stored prepared copy");
        Ok(if evicted {
            LoadOutcome::Evicted
        } else {
            LoadOutcome::Inserted
        })
    }

    /// Returns the cached copy of `title`, marking it most recently used.
    pub fn get_track_from_cache(&mut self, title: &str) -> Option<&T> {
        self.cache.get(title)
    }

    pub fn get_track_from_cache_mut(&mut self, title: &str) -> Option<&mut T> {
        self.cache.get_mut(title)
    }

    /// Resizes the cache. Shrinking evicts least recently used tracks first.
    pub fn set_cache_size(&mut self, cache_size: NonZeroUsize) {
        self.cache.set_capacity(cache_size);
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.cache.status()
    }

    pub fn cache(&self) -> &LruCache<T> {
        &self.cache
    }
}

impl<T: Resource> CacheMetrics for DjController<T> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.cache.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.cache.metrics().algorithm_name()
    }
}

impl<T> fmt::Debug for DjController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DjController")
            .field("cache", &self.cache)
            .finish()
    }
}
