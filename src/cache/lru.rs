//! LRU Tracker Module
//!
//! Least Recently Used ordering of record ids for size-bounded eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks access order of ids.
///
/// Front = most recently used, back = least recently used. Caches in this crate
/// hold a handful of records, so linear removal is fine.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: VecDeque<i64>,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks an id as most recently used.
    pub fn touch(&mut self, id: i64) {
        self.remove(id);
        self.order.push_front(id);
    }

    // == Remove ==
    pub fn remove(&mut self, id: i64) {
        self.order.retain(|tracked| *tracked != id);
    }

    // == Evict Oldest ==
    /// Pops the least recently used id, None if nothing is tracked.
    pub fn evict_oldest(&mut self) -> Option<i64> {
        self.order.pop_back()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn test_lru_evicts_in_insertion_order() {
        let mut lru = LruTracker::new();
        lru.touch(1);
        lru.touch(2);
        lru.touch(3);

        assert_eq!(lru.evict_oldest(), Some(1));
        assert_eq!(lru.evict_oldest(), Some(2));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_touch_moves_to_front() {
        let mut lru = LruTracker::new();
        lru.touch(1);
        lru.touch(2);
        lru.touch(3);

        lru.touch(1);

        assert_eq!(lru.evict_oldest(), Some(2));
        assert_eq!(lru.evict_oldest(), Some(3));
        assert_eq!(lru.evict_oldest(), Some(1));
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_touch_same_id_tracks_once() {
        let mut lru = LruTracker::new();
        lru.touch(5);
        lru.touch(5);
        lru.touch(5);

        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_remove_and_clear() {
        let mut lru = LruTracker::new();
        lru.touch(1);
        lru.touch(2);

        lru.remove(1);
        lru.remove(42);
        assert_eq!(lru.len(), 1);

        lru.clear();
        assert!(lru.is_empty());
    }
}
