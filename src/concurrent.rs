//! Concurrent Cache Implementations
//!
//! This module provides a thread-safe wrapper around [`LruCache`](crate::LruCache),
//! available with the `concurrent` feature.
//!
//! # Why One Lock?
//!
//! The slot-array cache keeps a single logical access clock, and eviction picks the
//! globally oldest stamp. Sharding the slots across segments would turn that into a
//! per-segment approximation. The cache is also small (a controller holds a handful
//! of tracks), so the whole cache sits behind one `parking_lot::Mutex`.
//!
//! Every `get` mutates recency, so an `RwLock` would buy nothing: all operations
//! need exclusive access anyway.
//!
//! # Borrowed Access
//!
//! Cached resources are exclusively owned by the cache and are never cloned out.
//! Reads go through closures that run while the lock is held:
//!
//! ```rust,ignore
//! let bpm = cache.get_with("Night Bus", |track| track.bpm());
//! ```

mod lru;

pub use self::lru::ConcurrentLruCache;
