//! LRU Cache Metrics
//!
//! Metrics specific to the slot-array LRU cache.

use super::{CacheMetrics, CoreCacheMetrics};
use std::collections::BTreeMap;

/// LRU-specific metrics (extends CoreCacheMetrics)
///
/// Besides the core counters, the LRU cache reports its logical access clock so
/// that recency values in status dumps can be read against it.
#[derive(Debug, Clone, PartialEq)]
pub struct LruCacheMetrics {
    /// Core metrics common to all caches
    pub core: CoreCacheMetrics,
    /// Current value of the cache's access counter
    pub access_counter: u64,
}

impl LruCacheMetrics {
    /// Creates metrics for a cache with `capacity` slots.
    pub fn new(capacity: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(capacity),
            access_counter: 0,
        }
    }

    /// Converts LRU metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("access_counter".to_string(), self.access_counter as f64);
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    /// "LRU" - identifying this as a Least Recently Used cache
    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
