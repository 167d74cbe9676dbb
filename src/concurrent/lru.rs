//! Concurrent LRU Cache Implementation
//!
//! A thread-safe [`LruCache`] behind a single `parking_lot::Mutex`. Recency is
//! global across all threads, exactly as in the single-threaded cache.
//!
//! ```text
//! ┌───────────────────────────────────────┐
//! │          ConcurrentLruCache           │
//! │  ┌─────────────────────────────────┐  │
//! │  │              Mutex              │  │
//! │  │  ┌───────────────────────────┐  │  │
//! │  │  │   LruCache (slot array)   │  │  │
//! │  │  └───────────────────────────┘  │  │
//! │  └─────────────────────────────────┘  │
//! └───────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use deck_cache::{ConcurrentLruCache, Owned, Track};
//! use core::num::NonZeroUsize;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLruCache::new(NonZeroUsize::new(8).unwrap()));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|i| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             let title = format!("deck-{}", i);
//!             cache.put(Owned::new(Track::mp3(&title, vec![], 60, 120, 320, true))).unwrap();
//!             cache.get_with(&title, |track| track.bpm())
//!         })
//!     })
//!     .collect();
//!
//! for h in handles {
//!     assert_eq!(h.join().unwrap(), Some(120));
//! }
//! assert_eq!(cache.len(), 4);
//! ```

use crate::config::LruCacheConfig;
use crate::error::CacheError;
use crate::handle::Owned;
use crate::lru::{CacheStatus, LruCache};
use crate::metrics::CacheMetrics;
use crate::resource::Resource;
use core::num::NonZeroUsize;
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// A thread-safe LRU cache of exclusively owned resources.
///
/// Resources never leave the cache by reference. Use [`get_with`](Self::get_with)
/// or [`peek_with`](Self::peek_with) to read from a cached resource while the
/// lock is held, or [`remove`](Self::remove) to take ownership of it.
pub struct ConcurrentLruCache<T> {
    inner: Mutex<LruCache<T>>,
}

impl<T: Resource> ConcurrentLruCache<T> {
    pub fn new(cap: NonZeroUsize) -> Self {
        Self::init(LruCacheConfig { capacity: cap })
    }

    pub fn init(config: LruCacheConfig) -> Self {
        Self::from_cache(LruCache::init(config))
    }

    /// Wraps an existing cache, keeping its entries and access clock.
    pub fn from_cache(cache: LruCache<T>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    pub fn cap(&self) -> NonZeroUsize {
        self.inner.lock().cap()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Pure existence check; does not touch recency.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Looks up `key`, marks it most recently used and applies `f` to it.
    ///
    /// The lock is held while `f` runs, so keep it short.
    pub fn get_with<F, R>(&self, key: &str, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Like [`get_with`](Self::get_with), with mutable access to the resource.
    pub fn get_mut_with<F, R>(&self, key: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.lock().get_mut(key).map(f)
    }

    /// Applies `f` to the cached resource without touching recency or metrics.
    pub fn peek_with<F, R>(&self, key: &str, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock().peek(key).map(f)
    }

    /// Inserts the handle's resource. See [`LruCache::put`].
    pub fn put(&self, handle: Owned<T>) -> Result<bool, CacheError> {
        self.inner.lock().put(handle)
    }

    pub fn remove(&self, key: &str) -> Option<Owned<T>> {
        self.inner.lock().remove(key)
    }

    pub fn evict_lru(&self) -> bool {
        self.inner.lock().evict_lru()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn set_capacity(&self, capacity: NonZeroUsize) {
        self.inner.lock().set_capacity(capacity);
    }

    pub fn access_counter(&self) -> u64 {
        self.inner.lock().access_counter()
    }

    /// Records a cache miss for metrics tracking.
    pub fn record_miss(&self) {
        self.inner.lock().record_miss();
    }

    pub fn status(&self) -> CacheStatus {
        self.inner.lock().status()
    }

    /// Unwraps the inner cache.
    pub fn into_inner(self) -> LruCache<T> {
        self.inner.into_inner()
    }
}

impl<T: Resource> CacheMetrics for ConcurrentLruCache<T> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<T> core::fmt::Debug for ConcurrentLruCache<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f
                .debug_struct("ConcurrentLruCache")
                .field("inner", &*cache)
                .finish(),
            None => f
                .debug_struct("ConcurrentLruCache")
                .field("inner", &"<locked>")
                .finish_non_exhaustive(),
        }
    }
}
