//! Concurrency tests: mutation cycles racing with connects,
//! disconnects and snapshot reads must never corrupt the catalog.

use std::sync::Arc;

use pricefeed::broadcast::Broadcaster;
use pricefeed::store::{seed_items, SharedItemStore};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deltas_sum_exactly() {
    let store = SharedItemStore::with_seed_items();

    // Each task applies a known delta to a known item; the final
    // prices must equal seed plus the exact per-item delta sums.
    let deltas: [i64; 3] = [-1, 0, 1];
    let rounds = 100usize;

    let mut handles = Vec::new();
    for k in 0..rounds * 3 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.apply_delta(k % 3, deltas[k % 3]);
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let snapshot = store.snapshot();
    for (item, seed) in snapshot.iter().zip(seed_items().iter()) {
        let expected = seed.price + deltas[(item.id - 1) as usize] * rounds as i64;
        assert_eq!(item.id, seed.id);
        assert_eq!(item.name, seed.name);
        assert_eq!(item.price, expected, "lost update on item {}", item.id);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_random_mutations_never_tear() {
    let store = SharedItemStore::with_seed_items();
    let cycles = 200usize;
    let seed_total: i64 = seed_items().iter().map(|i| i.price).sum();

    let mut handles = Vec::new();
    for _ in 0..cycles {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let snapshot = store.mutate_one();
            // Every observed snapshot is internally consistent.
            assert_eq!(snapshot.len(), 3);
            for (item, seed) in snapshot.iter().zip(seed_items().iter()) {
                assert_eq!(item.id, seed.id);
                assert_eq!(item.name, seed.name);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // Each cycle moves the total by at most one unit.
    let total: i64 = store.snapshot().iter().map(|i| i.price).sum();
    assert!((total - seed_total).unsigned_abs() as usize <= cycles);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_connects_and_disconnects_race_with_publishes() {
    let store = SharedItemStore::with_seed_items();
    let broadcaster = Arc::new(Broadcaster::new());

    let mut handles = Vec::new();
    for k in 0..50 {
        let store = store.clone();
        let broadcaster = Arc::clone(&broadcaster);
        handles.push(tokio::spawn(async move {
            let mut sub = broadcaster.connect(&store.snapshot());
            let initial = sub.rx.recv().await.unwrap();
            assert!(initial.contains("\"type\":\"update\""));
            if k % 2 == 0 {
                broadcaster.disconnect(sub.id);
            } else {
                // Receiver dropped without a clean disconnect; the
                // next publish prunes it.
                drop(sub);
            }
        }));
    }
    for _ in 0..50 {
        let store = store.clone();
        let broadcaster = Arc::clone(&broadcaster);
        handles.push(tokio::spawn(async move {
            broadcaster.publish(&store.mutate_one());
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // One more publish sweeps any subscriber whose receiver is gone.
    broadcaster.publish(&store.snapshot());
    assert_eq!(broadcaster.subscriber_count(), 0);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 3);
    for (item, seed) in snapshot.iter().zip(seed_items().iter()) {
        assert_eq!(item.id, seed.id);
        assert_eq!(item.name, seed.name);
    }
}
