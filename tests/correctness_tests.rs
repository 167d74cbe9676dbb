//! Correctness Tests for the LRU Cache
//!
//! This module validates the fundamental correctness of the slot-array LRU cache
//! using simple, predictable access patterns. Each test explicitly validates
//! which specific title gets evicted when a put causes an eviction.
//!
//! ## Test Strategy
//! - Small cache sizes (1-4 slots) for predictable behavior
//! - Simple, deterministic access patterns
//! - Explicit checks for which title was evicted after each put

use deck_cache::config::LruCacheConfig;
use deck_cache::{CacheError, LruCache, Owned, Track};
use std::num::NonZeroUsize;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Helper to create an LruCache with the given capacity
fn make_lru(cap: usize) -> LruCache<Track> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config)
}

fn track(title: &str) -> Owned<Track> {
    Owned::new(Track::mp3(title, vec!["Artist".into()], 180, 120, 320, true))
}

fn assert_unique_titles(cache: &LruCache<Track>) {
    let mut titles: Vec<&str> = cache.iter().map(Track::title).collect();
    let total = titles.len();
    titles.sort_unstable();
    titles.dedup();
    assert_eq!(titles.len(), total, "duplicate titles cached");
}

// ============================================================================
// LRU CORRECTNESS
// ============================================================================
// LRU evicts the Least Recently Used entry.
// Correctness criteria:
// 1. Most recently accessed entries stay in cache
// 2. The entry with the oldest access stamp is evicted first
// 3. Re-putting a cached title refreshes it without replacing it

#[test]
fn test_lru_evicts_least_recently_used() {
    let mut cache = make_lru(3);

    assert_eq!(cache.put(track("A")), Ok(false));
    assert_eq!(cache.put(track("B")), Ok(false));
    assert_eq!(cache.put(track("C")), Ok(false));

    // Access A to make it recently used
    assert!(cache.get("A").is_some());

    // Insert D - B should be evicted (least recently used)
    assert_eq!(cache.put(track("D")), Ok(true));
    assert!(!cache.contains("B"), "B should be evicted");
    assert!(cache.contains("A"));
    assert!(cache.contains("C"));
    assert!(cache.contains("D"));
}

#[test]
fn test_lru_update_does_not_replace() {
    let mut cache = make_lru(3);
    for title in ["A", "B", "C"] {
        cache.put(track(title)).unwrap();
    }
    cache.get("A");
    cache.put(track("D")).unwrap();

    // C is cached already: refresh only
    let len = cache.len();
    assert_eq!(cache.put(track("C")), Ok(false));
    assert_eq!(cache.len(), len);

    // A is now the oldest
    assert_eq!(cache.put(track("E")), Ok(true));
    assert!(!cache.contains("A"), "A should be evicted");
    assert!(cache.contains("C"));
    assert!(cache.contains("D"));
    assert!(cache.contains("E"));
}

#[test]
fn test_lru_update_keeps_stored_payload() {
    let mut cache = make_lru(2);
    cache.put(track("A")).unwrap();

    let mut replacement = Track::wav("A", vec![], 10, 90, 48_000, 24);
    replacement.load();
    cache.put(Owned::new(replacement)).unwrap();

    let stored = cache.peek("A").unwrap();
    assert_eq!(stored.bpm(), 120);
    assert_eq!(stored.format().label(), "MP3");
    assert!(!stored.is_loaded());
}

#[test]
fn test_lru_capacity_one() {
    let mut cache = make_lru(1);
    assert_eq!(cache.put(track("X")), Ok(false));
    assert_eq!(cache.put(track("Y")), Ok(true));
    assert!(!cache.contains("X"));
    assert!(cache.contains("Y"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_lru_empty_handle_rejected() {
    let mut cache = make_lru(2);
    cache.put(track("A")).unwrap();
    let counter = cache.access_counter();

    assert_eq!(cache.put(Owned::empty()), Err(CacheError::EmptyHandle));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.access_counter(), counter);
    assert!(cache.contains("A"));
}

#[test]
fn test_lru_capacity_and_uniqueness_invariants() {
    let mut cache = make_lru(4);
    let titles = ["A", "B", "C", "A", "D", "E", "B", "B", "F", "C", "G", "A"];
    for (i, title) in titles.iter().enumerate() {
        cache.put(track(title)).unwrap();
        if i % 3 == 0 {
            cache.get(titles[i / 2]);
        }
        assert!(cache.len() <= cache.cap().get());
        assert_unique_titles(&cache);
    }
    assert!(cache.is_full());
}

#[test]
fn test_lru_miss_has_no_side_effects() {
    let mut cache = make_lru(2);
    cache.put(track("A")).unwrap();
    let before = cache.status();
    assert!(cache.get("missing").is_none());
    assert!(!cache.contains("missing"));
    assert_eq!(cache.status(), before);
}

#[test]
fn test_lru_counter_is_monotonic() {
    let mut cache = make_lru(2);
    let mut last = cache.access_counter();
    let ops: [(&str, bool); 8] = [
        ("A", true),
        ("B", true),
        ("A", false),
        ("C", true),
        ("Z", false),
        ("C", true),
        ("B", false),
        ("D", true),
    ];
    for (title, is_put) in ops {
        if is_put {
            cache.put(track(title)).unwrap();
        } else {
            cache.get(title);
        }
        let now = cache.access_counter();
        assert!(now >= last);
        last = now;
    }
    // every put plus the one get hit on "A"
    assert_eq!(last, 6);
}

#[test]
fn test_lru_first_empty_slot_is_used() {
    let mut cache = make_lru(3);
    for title in ["A", "B", "C"] {
        cache.put(track(title)).unwrap();
    }
    cache.remove("A");
    cache.remove("C");
    cache.put(track("D")).unwrap();
    assert_eq!(cache.find_slot("D"), Some(0));
}

// ============================================================================
// RESIZING
// ============================================================================

#[test]
fn test_lru_shrink_evicts_oldest_first() {
    let mut cache = make_lru(4);
    for title in ["A", "B", "C", "D"] {
        cache.put(track(title)).unwrap();
    }
    cache.get("B");
    cache.set_capacity(NonZeroUsize::new(2).unwrap());

    assert_eq!(cache.cap().get(), 2);
    assert_eq!(cache.len(), 2);
    assert!(cache.contains("B"));
    assert!(cache.contains("D"));
    assert!(!cache.contains("A"));
    assert!(!cache.contains("C"));
}

#[test]
fn test_lru_grow_then_fill() {
    let mut cache = make_lru(1);
    cache.put(track("A")).unwrap();
    cache.set_capacity(NonZeroUsize::new(3).unwrap());
    assert_eq!(cache.put(track("B")), Ok(false));
    assert_eq!(cache.put(track("C")), Ok(false));
    assert_eq!(cache.put(track("D")), Ok(true));
    assert!(!cache.contains("A"));
}

#[test]
fn test_lru_clear_keeps_counter() {
    let mut cache = make_lru(2);
    cache.put(track("A")).unwrap();
    cache.put(track("B")).unwrap();
    let counter = cache.access_counter();
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.access_counter(), counter);
    assert!(!cache.evict_lru());
}
