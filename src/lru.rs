//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides a fixed-capacity LRU cache over exclusively owned resources.
//! Entries live in a fixed-length array of [`CacheSlot`]s; each slot owns its resource
//! through an [`Owned`] handle and carries the logical time of its last access.
//!
//! # Algorithm
//!
//! Recency is tracked with a per-cache access counter rather than a linked list.
//! The counter increments on every `get` hit and every successful `put`, and the
//! touched slot is stamped with the new value. The least recently used entry is the
//! occupied slot with the smallest stamp; ties go to the lowest slot index.
//!
//! ```text
//!  slot:        0        1        2
//!            ┌──────┐ ┌──────┐ ┌──────┐
//!  title     │  A   │ │  B   │ │  C   │      put A, B, C   -> stamps 1, 2, 3
//!  stamp     │  4   │ │  2   │ │  3   │      get A         -> A restamped 4
//!            └──────┘ └──────┘ └──────┘
//!                        ▲
//!                        └── LRU: put D evicts B and stores D in slot 1 (stamp 5)
//! ```
//!
//! # Put Semantics
//!
//! - An empty handle is rejected with [`CacheError::EmptyHandle`]; nothing changes.
//! - A resource whose key is already cached only refreshes the existing entry's
//!   recency. The stored payload is kept and the incoming resource is dropped.
//! - Otherwise, a full cache evicts its LRU entry, and the resource is stored in the
//!   first empty slot.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: contains, get, put, evict: O(n) slot scans
//! - **Space Complexity**: one slot per unit of capacity, allocated up front
//!
//! The cache is meant for a small number of large resources (a controller's hot
//! tracks), where a linear scan over a handful of slots is cheaper than a hash map.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access use
//! [`ConcurrentLruCache`](crate::ConcurrentLruCache) (feature `concurrent`), which
//! guards the whole cache with one lock.

use crate::config::LruCacheConfig;
use crate::error::CacheError;
use crate::handle::Owned;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use crate::resource::Resource;
use crate::slot::CacheSlot;
use core::fmt;
use core::num::NonZeroUsize;
use std::collections::BTreeMap;
use tracing::debug;

/// A fixed-capacity, access-ordered cache of exclusively owned resources.
///
/// # Examples
///
/// ```
/// use deck_cache::{LruCache, Owned, Track};
/// use core::num::NonZeroUsize;
///
/// let track = |title: &str| Owned::new(Track::mp3(title, vec![], 180, 120, 320, true));
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// assert_eq!(cache.put(track("A")), Ok(false));
/// assert_eq!(cache.put(track("B")), Ok(false));
///
/// // Accessing an entry makes it the most recently used
/// assert!(cache.get("A").is_some());
///
/// // Inserting beyond capacity evicts the least recently used entry
/// assert_eq!(cache.put(track("C")), Ok(true));
/// assert!(!cache.contains("B"));
/// assert!(cache.contains("A"));
/// assert!(cache.contains("C"));
/// ```
pub struct LruCache<T> {
    config: LruCacheConfig,
    slots: Vec<CacheSlot<T>>,
    access_counter: u64,
    metrics: LruCacheMetrics,
}

impl<T: Resource> LruCache<T> {
    /// Creates a cache with `cap` empty slots.
    pub fn new(cap: NonZeroUsize) -> Self {
        Self::init(LruCacheConfig { capacity: cap })
    }

    /// Creates a cache from a configuration.
    pub fn init(config: LruCacheConfig) -> Self {
        let cap = config.capacity.get();
        LruCache {
            config,
            slots: (0..cap).map(|_| CacheSlot::new()).collect(),
            access_counter: 0,
            metrics: LruCacheMetrics::new(cap as u64),
        }
    }

    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_occupied()).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| !slot.is_occupied())
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(CacheSlot::is_occupied)
    }

    /// Current value of the logical access clock.
    #[inline]
    pub fn access_counter(&self) -> u64 {
        self.access_counter
    }

    #[inline]
    pub fn metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Read-only view of the backing slots, in slot order.
    #[inline]
    pub fn slots(&self) -> &[CacheSlot<T>] {
        &self.slots
    }

    /// Returns `true` if a resource with this key is cached. Does not touch recency.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.find_slot(key).is_some()
    }

    /// Returns the cached resource and marks it most recently used.
    ///
    /// A miss returns `None` and has no side effects.
    pub fn get(&mut self, key: &str) -> Option<&T> {
        let idx = self.find_slot(key)?;
        let timestamp = self.tick();
        let object_size = self.recharge(idx);
        self.metrics.core.record_hit(object_size);
        self.slots[idx].access(timestamp)
    }

    /// Like [`get`](Self::get), returning a mutable view.
    ///
    /// A payload resized through the view is re-measured the next time the entry is
    /// accessed or removed.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        let idx = self.find_slot(key)?;
        let timestamp = self.tick();
        let object_size = self.recharge(idx);
        self.metrics.core.record_hit(object_size);
        self.slots[idx].access_mut(timestamp)
    }

    /// Returns the cached resource without touching recency or metrics.
    pub fn peek(&self, key: &str) -> Option<&T> {
        self.find_slot(key).and_then(|idx| self.slots[idx].peek())
    }

    /// Records a lookup that the caller resolved outside the cache.
    #[inline]
    pub fn record_miss(&mut self) {
        self.metrics.core.record_miss();
    }

    /// Inserts the resource owned by `handle`, returning whether an entry was evicted.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::EmptyHandle`] if `handle` owns nothing. The cache is
    /// unchanged in that case.
    pub fn put(&mut self, handle: Owned<T>) -> Result<bool, CacheError> {
        let incoming = handle.get().map_err(|_| CacheError::EmptyHandle)?;

        if let Some(idx) = self.find_slot(incoming.key()) {
            // Same title already cached: refresh recency, keep the stored payload.
            let timestamp = self.tick();
            self.recharge(idx);
            self.slots[idx].access(timestamp);
            self.metrics.core.record_refresh();
            debug!(
                title = incoming.key(),
                slot = idx,
                access = timestamp,
                "refreshed cached entry"
            );
            return Ok(false);
        }

        let object_size = incoming.payload_bytes();
        let evicted = self.is_full() && self.evict_lru();

        let idx = self
            .find_empty_slot()
            .ok_or_else(|| CacheError::NoFreeSlot {
                capacity: self.slots.len(),
            })?;
        let timestamp = self.tick();
        debug!(
            title = incoming.key(),
            slot = idx,
            access = timestamp,
            evicted,
            "stored entry"
        );
        self.slots[idx].store(handle, timestamp);
        self.slots[idx].charge(object_size);
        self.metrics.core.record_insertion(object_size);
        Ok(evicted)
    }

    /// Removes the entry with this key and hands its resource back to the caller.
    ///
    /// Removal is not counted as an eviction and does not advance the access counter.
    pub fn remove(&mut self, key: &str) -> Option<Owned<T>> {
        let idx = self.find_slot(key)?;
        let object_size = self.recharge(idx);
        let handle = self.slots[idx].take();
        self.metrics.core.record_removal(object_size);
        Some(handle)
    }

    /// Drops the least recently used entry. Returns `false` if the cache is empty.
    pub fn evict_lru(&mut self) -> bool {
        let Some(idx) = self.find_lru_slot() else {
            return false;
        };
        let object_size = self.recharge(idx);
        let evicted = self.slots[idx].take();
        if let Some(resource) = evicted.view() {
            debug!(
                title = resource.key(),
                slot = idx,
                "evicted least recently used entry"
            );
            self.metrics.core.record_eviction(object_size);
        }
        true
    }

    /// Drops every cached resource. The access counter keeps running.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
        self.metrics.core.record_clear();
    }

    /// Resizes the cache to `capacity` slots.
    ///
    /// Growing appends empty slots. Shrinking first evicts least recently used entries
    /// until the survivors fit, then moves the survivors to the front of the slot
    /// array (keeping their relative order) and truncates it. Recency stamps are
    /// preserved, so eviction order after a resize is unchanged.
    pub fn set_capacity(&mut self, capacity: NonZeroUsize) {
        let new_cap = capacity.get();
        let old_cap = self.slots.len();
        if new_cap == old_cap {
            return;
        }

        if new_cap < old_cap {
            while self.len() > new_cap {
                if !self.evict_lru() {
                    break;
                }
            }
            self.slots.retain(CacheSlot::is_occupied);
        }
        self.slots.resize_with(new_cap, CacheSlot::new);

        self.config.capacity = capacity;
        self.metrics.core.record_capacity(new_cap as u64);
        debug!(from = old_cap, to = new_cap, "cache capacity changed");
    }

    /// Index of the occupied slot holding `key`.
    pub fn find_slot(&self, key: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.peek().is_some_and(|resource| resource.key() == key))
    }

    /// Index of the occupied slot with the oldest access stamp; the lowest index wins ties.
    pub fn find_lru_slot(&self) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.last_access().map(|stamp| (idx, stamp)))
            .min_by_key(|&(_, stamp)| stamp)
            .map(|(idx, _)| idx)
    }

    /// Index of the first empty slot.
    pub fn find_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(|slot| !slot.is_occupied())
    }

    /// Iterates over cached resources in slot order without touching recency.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().filter_map(CacheSlot::peek)
    }

    /// Snapshot of every slot for diagnostics. Does not touch recency.
    pub fn status(&self) -> CacheStatus {
        let slots = self
            .slots
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotStatus {
                index,
                title: slot.peek().map(|resource| resource.key().to_string()),
                last_access: slot.last_access(),
            })
            .collect::<Vec<_>>();
        CacheStatus {
            capacity: self.slots.len(),
            used: slots.iter().filter(|slot| slot.title.is_some()).count(),
            access_counter: self.access_counter,
            slots,
        }
    }

    /// Re-measures slot `idx`, moves the size metric by the difference, and returns
    /// the bytes now charged to it.
    fn recharge(&mut self, idx: usize) -> u64 {
        let slot = &mut self.slots[idx];
        let current = slot.peek().map_or(0, Resource::payload_bytes);
        let charged = slot.charged_bytes();
        if current != charged {
            slot.charge(current);
            self.metrics.core.record_size_change(charged, current);
        }
        current
    }

    fn tick(&mut self) -> u64 {
        self.access_counter += 1;
        self.metrics.access_counter = self.access_counter;
        self.access_counter
    }
}

impl<T> fmt::Debug for LruCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("slots", &self.slots)
            .field("access_counter", &self.access_counter)
            .finish()
    }
}

impl<T: Resource> CacheMetrics for LruCache<T> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

/// State of one slot in a [`CacheStatus`] dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStatus {
    pub index: usize,
    /// Key of the cached resource, `None` for an empty slot.
    pub title: Option<String>,
    pub last_access: Option<u64>,
}

/// Read-only dump of a cache's slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    pub capacity: usize,
    pub used: usize,
    pub access_counter: u64,
    pub slots: Vec<SlotStatus>,
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[LRUCache] Status: {}/{} slots used",
            self.used, self.capacity
        )?;
        for slot in &self.slots {
            match (&slot.title, slot.last_access) {
                (Some(title), Some(stamp)) => writeln!(
                    f,
                    "  Slot {}: {} (last access: {})",
                    slot.index, title, stamp
                )?,
                _ => writeln!(f, "  Slot {}: [EMPTY]", slot.index)?,
            }
        }
        Ok(())
    }
}
