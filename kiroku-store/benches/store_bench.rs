//! Log Store Benchmarks
//!
//! Run with: cargo bench --package kiroku-store

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::Rng;

use kiroku_core::{Metrics, StoreConfig};
use kiroku_store::LogStore;

fn bench_store(records: u32) -> LogStore {
    let store = LogStore::new(
        StoreConfig {
            max_keys: records + 1,
            log_capacity: records * 32,
        },
        Metrics::new(),
    )
    .unwrap();
    for i in 0..records {
        store.append(format!("payload-{i:08}-suffix").as_bytes()).unwrap();
    }
    store
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    group.throughput(Throughput::Elements(1));

    for payload_len in [16usize, 64, 256] {
        let payload = vec![b'k'; payload_len];
        group.bench_function(format!("len_{payload_len}"), |bencher| {
            let store = LogStore::new(
                StoreConfig {
                    max_keys: 1 << 24,
                    log_capacity: 1 << 30,
                },
                Metrics::new(),
            )
            .unwrap();
            bencher.iter(|| {
                let _ = black_box(store.append(black_box(&payload)));
            })
        });
    }

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let store = bench_store(100_000);
    let mut rng = rand::thread_rng();

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));
    group.bench_function("random_key", |bencher| {
        bencher.iter(|| {
            let key = rng.gen_range(0..100_000u32);
            black_box(store.get(black_box(key))).unwrap();
        })
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let store = bench_store(100_000);

    let mut group = c.benchmark_group("search");
    group.bench_function("unique_hit", |bencher| {
        bencher.iter(|| black_box(store.search(black_box(b"payload-00042017"))))
    });
    group.bench_function("miss", |bencher| {
        bencher.iter(|| black_box(store.search(black_box(b"no-such-substring"))))
    });
    group.finish();
}

criterion_group!(benches, bench_append, bench_get, bench_search);
criterion_main!(benches);
