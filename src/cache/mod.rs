//! Cache Module
//!
//! Id-keyed in-memory caching with TTL expiration and LRU eviction, plus the
//! two adapters the benchmark reads through: the second-level object cache and
//! the cluster-wide distributed map.

mod distributed;
mod entry;
mod lru;
mod object;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use distributed::{ClusterMembers, DistributedMap};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use object::ObjectCacheAdapter;
pub use stats::CacheStats;
pub use store::CacheStore;
