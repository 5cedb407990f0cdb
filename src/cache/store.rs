//! Cache Store Module
//!
//! HashMap storage keyed by record id, combined with LRU tracking and TTL
//! expiration. Backs both the second-level object cache (no TTL) and the local
//! partition of the distributed map (TTL per entry).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore<V> {
    entries: HashMap<i64, CacheEntry<V>>,
    lru: LruTracker,
    stats: CacheStats,
    max_entries: usize,
    /// TTL applied when `insert` gets none, None = entries never expire
    default_ttl: Option<Duration>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a store holding at most `max_entries` values (minimum one).
    pub fn new(max_entries: usize, default_ttl: Option<Duration>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            default_ttl,
        }
    }

    // == Insert ==
    /// Stores `value` under `id`, overwriting and resetting the TTL of any
    /// existing entry.
    ///
    /// When the store is full the least recently used entry is evicted first;
    /// its id is returned.
    pub fn insert(&mut self, id: i64, value: V, ttl: Option<Duration>) -> Option<i64> {
        let mut evicted = None;

        if !self.entries.contains_key(&id) && self.entries.len() >= self.max_entries {
            if let Some(oldest) = self.lru.evict_oldest() {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
                evicted = Some(oldest);
            }
        }

        let ttl = ttl.or(self.default_ttl);
        self.entries.insert(id, CacheEntry::new(value, ttl));
        self.lru.touch(id);

        evicted
    }

    // == Get ==
    /// Returns a clone of the live value for `id`, counting a hit or a miss.
    ///
    /// An expired entry is dropped on the spot and counts as a miss.
    pub fn get(&mut self, id: i64) -> Option<V> {
        let now = Instant::now();

        let expired = self
            .entries
            .get(&id)
            .is_some_and(|entry| entry.is_expired_at(now));
        if expired {
            self.drop_entry(id);
            self.stats.record_expirations(1);
        }

        let live = self.entries.get(&id).map(|entry| entry.value.clone());
        self.stats.record_lookup(live.is_some());
        if live.is_some() {
            self.lru.touch(id);
        }
        live
    }

    // == Contains ==
    /// Inspects presence of a live entry without touching stats or LRU order.
    pub fn contains(&self, id: i64) -> bool {
        self.entries
            .get(&id)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Remove ==
    /// Removes `id`, returning whether an entry was present.
    pub fn remove(&mut self, id: i64) -> bool {
        self.drop_entry(id)
    }

    // == Clear ==
    /// Drops every entry, returning how many were held.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        count
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<i64> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            self.drop_entry(*id);
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn drop_entry(&mut self, id: i64) -> bool {
        let existed = self.entries.remove(&id).is_some();
        if existed {
            self.lru.remove(id);
        }
        existed
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn ttl_store(max_entries: usize) -> CacheStore<String> {
        CacheStore::new(max_entries, Some(Duration::from_secs(60)))
    }

    #[test]
    fn test_store_insert_and_get() {
        let mut store = ttl_store(10);

        assert_eq!(store.insert(1, "one".to_string(), None), None);
        assert_eq!(store.get(1).as_deref(), Some("one"));
        assert_eq!(store.len(), 1);

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_store_get_missing_counts_miss() {
        let mut store = ttl_store(10);

        assert_eq!(store.get(99), None);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_overwrite_keeps_single_entry() {
        let mut store = ttl_store(10);

        store.insert(1, "old".to_string(), None);
        store.insert(1, "new".to_string(), None);

        assert_eq!(store.get(1).as_deref(), Some("new"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_remove() {
        let mut store = ttl_store(10);
        store.insert(1, "one".to_string(), None);

        assert!(store.remove(1));
        assert!(!store.remove(1));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = ttl_store(10);
        store.insert(1, "short".to_string(), Some(Duration::from_secs(1)));

        assert!(store.contains(1));

        sleep(Duration::from_millis(1100));

        assert!(!store.contains(1));
        assert_eq!(store.get(1), None);
        assert!(store.is_empty(), "expired entry is dropped on read");

        let stats = store.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_store_without_default_ttl_never_expires() {
        let mut store: CacheStore<u32> = CacheStore::new(10, None);
        store.insert(1, 10, None);

        assert_eq!(store.cleanup_expired(), 0);
        assert!(store.contains(1));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = ttl_store(3);

        store.insert(1, "a".to_string(), None);
        store.insert(2, "b".to_string(), None);
        store.insert(3, "c".to_string(), None);

        // 1 becomes most recently used, so 2 is the oldest
        store.get(1);

        assert_eq!(store.insert(4, "d".to_string(), None), Some(2));
        assert_eq!(store.len(), 3);
        assert!(!store.contains(2));
        assert!(store.contains(1));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_contains_does_not_touch_stats() {
        let mut store = ttl_store(10);
        store.insert(1, "a".to_string(), None);

        assert!(store.contains(1));
        assert!(!store.contains(2));

        let stats = store.stats();
        assert_eq!(stats.hits + stats.misses, 0);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = ttl_store(10);
        store.insert(1, "short".to_string(), Some(Duration::from_millis(50)));
        store.insert(2, "long".to_string(), None);

        sleep(Duration::from_millis(100));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.contains(2));
    }

    #[test]
    fn test_store_clear() {
        let mut store = ttl_store(10);
        store.insert(1, "a".to_string(), None);
        store.insert(2, "b".to_string(), None);

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.insert(3, "c".to_string(), None), None);
    }
}
