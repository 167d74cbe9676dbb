//! Concurrent Cache Benchmarks
//!
//! Benchmarks for measuring the mutex-wrapped cache under different thread counts
//! and access patterns.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use deck_cache::{ConcurrentLruCache, Owned, Track};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

const CACHE_SIZE: usize = 256;
const OPS_PER_THREAD: usize = 1_000;

fn track(i: usize) -> Owned<Track> {
    Owned::new(Track::mp3(format!("track-{}", i), vec![], 30, 120, 320, false))
}

fn populated() -> Arc<ConcurrentLruCache<Track>> {
    let cache = ConcurrentLruCache::new(NonZeroUsize::new(CACHE_SIZE).unwrap());
    for i in 0..CACHE_SIZE {
        cache.put(track(i)).unwrap();
    }
    Arc::new(cache)
}

/// Benchmark concurrent reads of cached titles
fn concurrent_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Reads");
    let titles: Arc<Vec<String>> = Arc::new((0..CACHE_SIZE).map(|i| format!("track-{}", i)).collect());

    for threads in [1usize, 2, 4, 8] {
        group.throughput(Throughput::Elements((threads * OPS_PER_THREAD) as u64));
        let cache = populated();

        group.bench_with_input(BenchmarkId::new("LRU", threads), &threads, |b, &threads| {
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let cache = Arc::clone(&cache);
                        let titles = Arc::clone(&titles);
                        thread::spawn(move || {
                            for i in 0..OPS_PER_THREAD {
                                let title = &titles[(i * 7 + t) % CACHE_SIZE];
                                black_box(cache.get_with(title, Track::bpm));
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

/// Benchmark a mixed workload: mostly reads, misses inserted
fn concurrent_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Mixed");

    for threads in [2usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * OPS_PER_THREAD) as u64));
        let cache = populated();

        group.bench_with_input(BenchmarkId::new("LRU", threads), &threads, |b, &threads| {
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let cache = Arc::clone(&cache);
                        thread::spawn(move || {
                            for i in 0..OPS_PER_THREAD {
                                let key = (i * 13 + t) % (CACHE_SIZE * 2);
                                let title = format!("track-{}", key);
                                if cache.get_with(&title, |_| ()).is_none() {
                                    cache.record_miss();
                                    let _ = cache.put(track(key));
                                }
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, concurrent_reads, concurrent_mixed);
criterion_main!(benches);
