//! Cache Metrics System
//!
//! Provides BTreeMap-based metrics reporting. Caches track their counters in
//! [`CoreCacheMetrics`] and expose them through the common [`CacheMetrics`] trait.
//!
//! # Why BTreeMap over HashMap?
//!
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Session summaries and tests compare cleanly
//! - **Better debugging**: Consistent output makes logs more readable
//!
//! # What Counts as a Request
//!
//! A hit is recorded by every successful `get`. Misses are recorded explicitly through
//! `record_miss`, because a lookup that finds nothing has no side effects on the cache
//! itself; the caller decides whether the absence was a real request.

use std::collections::BTreeMap;

pub mod lru;

pub use lru::LruCacheMetrics;

/// Common counters tracked by the cache.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups made against the cache (hits + recorded misses)
    pub requests: u64,

    /// Number of lookups that found their entry
    pub cache_hits: u64,

    /// Number of resources stored into a free slot
    pub insertions: u64,

    /// Number of puts whose title was already cached, refreshing recency only
    pub refreshes: u64,

    /// Number of resources dropped to make room (including capacity shrinks)
    pub evictions: u64,

    /// Total payload bytes handed out by cache hits
    pub bytes_served_from_cache: u64,

    /// Total payload bytes stored into the cache
    pub bytes_written_to_cache: u64,

    /// Payload bytes currently held by the cache
    pub cache_size_bytes: u64,

    /// Number of slots, used for utilization
    pub capacity: u64,

    /// Number of occupied slots
    pub entries: u64,
}

impl CoreCacheMetrics {
    /// Creates metrics for a cache with `capacity` slots.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Records a cache hit serving `object_size` payload bytes.
    pub fn record_hit(&mut self, object_size: u64) {
        self.requests += 1;
        self.cache_hits += 1;
        self.bytes_served_from_cache += object_size;
    }

    /// Records a lookup that did not find its entry.
    ///
    /// Cache misses are calculated as (requests - cache_hits).
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a resource being stored into a free slot.
    pub fn record_insertion(&mut self, object_size: u64) {
        self.insertions += 1;
        self.entries += 1;
        self.cache_size_bytes += object_size;
        self.bytes_written_to_cache += object_size;
    }

    /// Records a put that only refreshed an existing entry's recency.
    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    /// Records an entry being dropped from the cache.
    pub fn record_eviction(&mut self, evicted_size: u64) {
        self.evictions += 1;
        self.record_removal(evicted_size);
    }

    /// Records an entry leaving the cache without counting as an eviction.
    pub fn record_removal(&mut self, removed_size: u64) {
        debug_assert!(removed_size <= self.cache_size_bytes);
        self.entries = self.entries.saturating_sub(1);
        self.cache_size_bytes = self.cache_size_bytes.saturating_sub(removed_size);
    }

    /// Records a cached entry's payload changing from `old_size` to `new_size` bytes.
    pub fn record_size_change(&mut self, old_size: u64, new_size: u64) {
        debug_assert!(old_size <= self.cache_size_bytes);
        self.cache_size_bytes = self.cache_size_bytes.saturating_sub(old_size) + new_size;
    }

    /// Records every entry being dropped at once.
    pub fn record_clear(&mut self) {
        self.entries = 0;
        self.cache_size_bytes = 0;
    }

    /// Records a change in slot count.
    pub fn record_capacity(&mut self, capacity: u64) {
        self.capacity = capacity;
    }

    /// Hit rate between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Miss rate between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of slots occupied, between 0.0 and 1.0
    pub fn cache_utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.entries as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        // Basic counters
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("refreshes".to_string(), self.refreshes as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert(
            "cache_misses".to_string(),
            (self.requests - self.cache_hits) as f64,
        );

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        // Bytes
        metrics.insert(
            "bytes_served_from_cache".to_string(),
            self.bytes_served_from_cache as f64,
        );
        metrics.insert(
            "bytes_written_to_cache".to_string(),
            self.bytes_written_to_cache as f64,
        );
        metrics.insert("cache_size_bytes".to_string(), self.cache_size_bytes as f64);

        // Occupancy
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("entries".to_string(), self.entries as f64);
        metrics.insert("cache_utilization".to_string(), self.cache_utilization());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Uniform interface for retrieving metrics from a cache.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs, keys sorted alphabetically.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification (e.g. "LRU").
    fn algorithm_name(&self) -> &'static str;
}
