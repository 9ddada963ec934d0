//! # Pool Acquire/Release Benchmark
//!
//! Measures the hot path a stage hits every frame: acquire from a warm
//! pool, release, repeat. Also measures the linear scan at its worst, when
//! the only free entry of a kind sits at the end of the list.
//!
//! Run with: `cargo bench --package barrage_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use barrage_core::{FnPrototypes, InstanceTemplate, Pool, TemplateRegistry};
use barrage_shared::{BulletKind, Vec2};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn warm_pool(per_kind: usize) -> Pool<FnPrototypes<fn(&InstanceTemplate) -> u64>> {
    fn build(_: &InstanceTemplate) -> u64 {
        0
    }

    let registry = TemplateRegistry::from_templates(
        BulletKind::ALL
            .iter()
            .map(|&kind| InstanceTemplate::new(kind, format!("bullets/{kind}"), per_kind)),
    )
    .expect("valid templates");
    let pool = Pool::new(registry, FnPrototypes::new(build as fn(&InstanceTemplate) -> u64));
    pool.prewarm().expect("first prewarm");
    pool
}

/// Benchmark: acquire + release of the first free entry.
fn bench_acquire_release(c: &mut Criterion) {
    let pool = warm_pool(64);
    c.bench_function("acquire_release_warm", |b| {
        b.iter(|| {
            let handle = pool
                .acquire(black_box(Vec2::new(0.0, 4.0)), BulletKind::Hamon)
                .expect("registered kind");
            pool.release(handle)
        });
    });
}

/// Benchmark: acquire when every earlier entry is busy.
fn bench_worst_case_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("worst_case_scan");

    for per_kind in [8, 32, 128] {
        let pool = warm_pool(per_kind);
        // Occupy everything except the last TopRight entry.
        for &kind in &BulletKind::ALL {
            let busy = if kind == BulletKind::TopRight { per_kind - 1 } else { per_kind };
            for _ in 0..busy {
                pool.acquire(Vec2::ZERO, kind).expect("registered kind");
            }
        }

        group.bench_with_input(BenchmarkId::from_parameter(per_kind), &pool, |b, pool| {
            b.iter(|| {
                let handle = pool
                    .acquire(Vec2::ZERO, black_box(BulletKind::TopRight))
                    .expect("registered kind");
                pool.release(handle)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_acquire_release, bench_worst_case_scan);
criterion_main!(benches);
