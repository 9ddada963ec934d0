//! Integration tests for the reuse pool's observable contract.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use barrage_core::{
    exit_channel, EventBus, InstanceTemplate, Pool, PoolError, PrototypeSource, TemplateRegistry,
};
use barrage_shared::{BulletKind, PoolEvent, Vec2};

/// Counts how many instances were ever built.
#[derive(Default)]
struct CountingPrototypes {
    built: AtomicUsize,
}

impl PrototypeSource for CountingPrototypes {
    type Instance = (BulletKind, usize);

    fn produce(&self, template: &InstanceTemplate) -> Self::Instance {
        (template.kind, self.built.fetch_add(1, Ordering::Relaxed))
    }
}

fn registry(templates: &[(BulletKind, usize)]) -> TemplateRegistry {
    TemplateRegistry::from_templates(
        templates
            .iter()
            .map(|&(kind, max)| InstanceTemplate::new(kind, format!("bullets/{kind}"), max)),
    )
    .unwrap()
}

#[test]
fn test_prewarm_count_per_kind() {
    let templates = [
        (BulletKind::Hamon, 3),
        (BulletKind::SLeftERight, 5),
        (BulletKind::TopRight, 0),
    ];
    let pool = Pool::new(registry(&templates), CountingPrototypes::default());
    pool.prewarm().unwrap();

    for (kind, max) in templates {
        assert_eq!(pool.count_of(kind), max);
        assert_eq!(pool.inactive_count(kind), max);
        assert_eq!(pool.active_count(kind), 0);
    }
}

#[test]
fn test_n_plus_one_acquisitions_grow_by_one() {
    let (sender, receiver) = EventBus::create_pair(64);
    let source = Arc::new(CountingPrototypes::default());
    let pool = Pool::new(registry(&[(BulletKind::Hamon, 4)]), Arc::clone(&source))
        .with_events(sender);
    pool.prewarm().unwrap();
    receiver.drain();

    for _ in 0..5 {
        pool.acquire(Vec2::ZERO, BulletKind::Hamon).unwrap();
    }

    assert_eq!(pool.len(), 5);
    assert_eq!(source.built.load(Ordering::Relaxed), 5);
    let exhausted: Vec<_> = receiver
        .drain()
        .into_iter()
        .filter(|e| matches!(e, PoolEvent::Exhausted { .. }))
        .collect();
    assert_eq!(exhausted.len(), 1);
}

#[test]
fn test_acquire_release_acquire_reuses() {
    let pool = Pool::new(registry(&[(BulletKind::Hamon, 1)]), CountingPrototypes::default());
    pool.prewarm().unwrap();

    let first = pool.acquire(Vec2::new(0.0, 1.0), BulletKind::Hamon).unwrap();
    pool.release(first);
    let second = pool.acquire(Vec2::new(0.0, 2.0), BulletKind::Hamon).unwrap();

    assert_eq!(first.index(), second.index());
    assert_eq!(pool.entry(second).unwrap().activations, 2);
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.stats().grown, 0);
}

#[test]
fn test_release_twice_matches_release_once() {
    let pool = Pool::new(registry(&[(BulletKind::TopLeft, 3)]), CountingPrototypes::default());
    pool.prewarm().unwrap();
    let a = pool.acquire(Vec2::ZERO, BulletKind::TopLeft).unwrap();
    let _b = pool.acquire(Vec2::ZERO, BulletKind::TopLeft).unwrap();

    pool.release(a);
    let once = pool.inactive_count(BulletKind::TopLeft);
    pool.release(a);
    assert_eq!(pool.inactive_count(BulletKind::TopLeft), once);
}

#[test]
fn test_concurrent_acquisitions_never_alias() {
    let threads = 8;
    let per_thread = 50;
    let pool = Arc::new(Pool::new(
        registry(&[(BulletKind::Hamon, 64)]),
        CountingPrototypes::default(),
    ));
    pool.prewarm().unwrap();

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                (0..per_thread)
                    .map(|_| pool.acquire(Vec2::ZERO, BulletKind::Hamon).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for h in handles {
        for handle in h.join().unwrap() {
            assert!(seen.insert(handle.index()), "entry {} handed out twice", handle.index());
        }
    }

    assert_eq!(seen.len(), threads * per_thread);
    assert_eq!(pool.len(), threads * per_thread);
    assert_eq!(pool.stats().grown, threads * per_thread - 64);
}

#[test]
fn test_concurrent_acquire_release_keeps_counts_consistent() {
    let pool = Arc::new(Pool::new(
        registry(&[(BulletKind::SDownEUp, 4)]),
        CountingPrototypes::default(),
    ));
    pool.prewarm().unwrap();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for _ in 0..1000 {
                    let handle = pool.acquire(Vec2::ZERO, BulletKind::SDownEUp).unwrap();
                    assert!(pool.release(handle));
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    // Four workers holding at most one entry each never exhaust four entries.
    assert_eq!(pool.len(), 4);
    assert_eq!(pool.stats().active, 0);
}

#[test]
fn test_region_exits_release_entries() {
    let pool = Pool::new(registry(&[(BulletKind::BottomLeft, 3)]), CountingPrototypes::default());
    pool.prewarm().unwrap();
    let (exit, exits) = exit_channel();

    let a = pool.acquire(Vec2::ZERO, BulletKind::BottomLeft).unwrap();
    let b = pool.acquire(Vec2::ZERO, BulletKind::BottomLeft).unwrap();
    assert!(exit.exit(a));
    assert!(exit.exit(b));
    assert!(exit.exit(a)); // duplicate exit for the same bullet

    assert_eq!(exits.pending_count(), 3);
    assert_eq!(pool.drain_exits(&exits), 2);
    assert_eq!(exits.pending_count(), 0);
    assert_eq!(pool.inactive_count(BulletKind::BottomLeft), 3);
}

#[test]
fn test_indexed_acquire_out_of_range() {
    let locations = [
        ("a".to_string(), Vec2::new(0.0, 0.0)),
        ("b".to_string(), Vec2::new(1.0, 0.0)),
        ("c".to_string(), Vec2::new(2.0, 0.0)),
    ]
    .into_iter()
    .collect();
    let pool = Pool::new(registry(&[(BulletKind::Hamon, 3)]), CountingPrototypes::default())
        .with_locations(locations);
    pool.prewarm().unwrap();

    assert_eq!(
        pool.acquire_at(5, BulletKind::Hamon),
        Err(PoolError::IndexOutOfRange { index: 5, len: 3 })
    );
    assert_eq!(pool.stats().active, 0);
    assert_eq!(pool.len(), 3);
}
