//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache store's counting and eviction rules over
//! arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 16;

fn ttl_store(max_entries: usize) -> CacheStore<u32> {
    CacheStore::new(max_entries, Some(Duration::from_secs(300)))
}

// == Strategies ==
#[derive(Debug, Clone)]
enum CacheOp {
    Insert { id: i64, value: u32 },
    Get { id: i64 },
    Remove { id: i64 },
}

fn id_strategy() -> impl Strategy<Value = i64> {
    0_i64..32
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (id_strategy(), any::<u32>()).prop_map(|(id, value)| CacheOp::Insert { id, value }),
        id_strategy().prop_map(|id| CacheOp::Get { id }),
        id_strategy().prop_map(|id| CacheOp::Remove { id }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every get is exactly one hit or one miss, and nothing else moves the counters.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut store = ttl_store(TEST_MAX_ENTRIES);
        let mut expected_hits = 0_u64;
        let mut expected_misses = 0_u64;

        for op in ops {
            match op {
                CacheOp::Insert { id, value } => {
                    store.insert(id, value, None);
                }
                CacheOp::Get { id } => match store.get(id) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Remove { id } => {
                    store.remove(id);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
    }

    // The store never holds more than its bound, and each eviction is counted.
    #[test]
    fn prop_capacity_enforcement(
        max_entries in 1_usize..10,
        ids in prop::collection::vec(id_strategy(), 1..60)
    ) {
        let mut store = ttl_store(max_entries);
        let mut evictions = 0_u64;

        for id in ids {
            if store.insert(id, 0, None).is_some() {
                evictions += 1;
            }
            prop_assert!(store.len() <= max_entries);
        }

        prop_assert_eq!(store.stats().evictions, evictions);
    }

    // Filling the store with distinct ids evicts them in insertion order.
    #[test]
    fn prop_lru_eviction_order(
        ids in prop::collection::hash_set(id_strategy(), 2..12)
    ) {
        let ids: Vec<i64> = ids.into_iter().collect();
        let capacity = ids.len() - 1;
        let mut store = ttl_store(capacity);

        for id in &ids[..capacity] {
            store.insert(*id, 0, None);
        }

        let evicted = store.insert(ids[capacity], 0, None);
        prop_assert_eq!(evicted, Some(ids[0]));
        prop_assert!(!store.contains(ids[0]));
    }

    // A get protects an entry from being the next one evicted.
    #[test]
    fn prop_lru_access_tracking(
        ids in prop::collection::hash_set(id_strategy(), 3..12)
    ) {
        let ids: Vec<i64> = ids.into_iter().collect();
        let capacity = ids.len() - 1;
        let mut store = ttl_store(capacity);

        for id in &ids[..capacity] {
            store.insert(*id, 0, None);
        }
        store.get(ids[0]);

        let evicted = store.insert(ids[capacity], 0, None);
        prop_assert_eq!(evicted, Some(ids[1]));

        let live: HashSet<i64> = ids.iter().copied().filter(|id| store.contains(*id)).collect();
        prop_assert!(live.contains(&ids[0]));
        prop_assert_eq!(live.len(), capacity);
    }
}
