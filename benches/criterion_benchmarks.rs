use core::num::NonZeroUsize;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use deck_cache::config::LruCacheConfig;
use deck_cache::service::{DjController, MixingEngine};
use deck_cache::{LruCache, Owned, Resource, Track};

fn make_lru(cap: usize) -> LruCache<Track> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config)
}

fn track(i: usize) -> Track {
    Track::mp3(format!("track-{}", i), vec!["Ada".to_string()], 30, 120, 320, true)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const CACHE_SIZE: usize = 64;
    let mut group = c.benchmark_group("Cache Operations");

    // LRU benchmarks
    {
        let mut cache = make_lru(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(Owned::new(track(i))).unwrap();
        }
        let titles: Vec<String> = (0..CACHE_SIZE * 2).map(|i| format!("track-{}", i)).collect();

        group.bench_function("LRU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&titles[i % CACHE_SIZE]));
                }
            });
        });

        group.bench_function("LRU get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&titles[CACHE_SIZE + i % CACHE_SIZE]));
                }
            });
        });

        group.bench_function("LRU put", |b| {
            b.iter_batched(
                || Owned::new(track(CACHE_SIZE + 1)),
                |handle| black_box(cache.put(handle)),
                BatchSize::SmallInput,
            );
        });
    }

    // Deep clone cost of a prepared track
    {
        let mut prepared = track(0);
        prepared.prepare();

        group.bench_function("Track deep clone", |b| {
            b.iter(|| black_box(prepared.try_clone_owned()));
        });
    }

    // Controller and mixer
    {
        let masters: Vec<Track> = (0..16).map(track).collect();

        group.bench_function("Controller cycle", |b| {
            b.iter(|| {
                let mut controller = DjController::new(NonZeroUsize::new(4).unwrap());
                let mut mixer = MixingEngine::new();
                for master in &masters {
                    let _ = controller.load_track_to_cache(master);
                    if let Some(cached) = controller.get_track_from_cache(master.title()) {
                        black_box(mixer.load_track_to_deck(cached)).ok();
                    }
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
