//! In-memory record store
//!
//! Origin rows are kept serialized, the way a database hands back bytes, so
//! every origin read pays for decoding. Hydrated records live in an LRU-bounded
//! second-level cache in front of the origin.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::error::{BenchError, Result};
use crate::models::Record;
use crate::store::RecordStore;

// == Memory Record Store ==
#[derive(Debug)]
pub struct MemoryRecordStore {
    /// Persisted rows keyed by id
    origin: RwLock<HashMap<i64, Vec<u8>>>,
    /// Second-level cache of hydrated records, entries never expire
    second_level: RwLock<CacheStore<Record>>,
}

impl MemoryRecordStore {
    pub fn new(second_level_max_entries: usize) -> Self {
        Self {
            origin: RwLock::new(HashMap::new()),
            second_level: RwLock::new(CacheStore::new(second_level_max_entries, None)),
        }
    }

    async fn load_from_origin(&self, id: i64) -> Result<Option<Record>> {
        let origin = self.origin.read().await;
        origin.get(&id).map(|row| decode_row(row)).transpose()
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Record>> {
        if let Some(cached) = self.second_level.write().await.get(id) {
            return Ok(Some(cached));
        }

        let loaded = self.load_from_origin(id).await?;
        if let Some(record) = &loaded {
            self.second_level.write().await.insert(id, record.clone(), None);
        }
        Ok(loaded)
    }

    async fn find_bypassing_cache(&self, id: i64) -> Result<Option<Record>> {
        let loaded = self.load_from_origin(id).await?;

        let mut second_level = self.second_level.write().await;
        match &loaded {
            Some(record) => {
                second_level.insert(id, record.clone(), None);
            }
            None => {
                second_level.remove(id);
            }
        }
        Ok(loaded)
    }

    async fn save(&self, record: Record) -> Result<Record> {
        let row = serde_json::to_vec(&record)
            .map_err(|e| BenchError::Internal(format!("encoding record {}: {}", record.id, e)))?;
        self.origin.write().await.insert(record.id, row);

        // write-through: a cached copy never outlives the row it mirrors
        let mut second_level = self.second_level.write().await;
        if second_level.contains(record.id) {
            second_level.insert(record.id, record.clone(), None);
        }

        debug!(id = record.id, "record saved");
        Ok(record)
    }

    async fn exists(&self, id: i64) -> bool {
        self.origin.read().await.contains_key(&id)
    }

    async fn count(&self) -> usize {
        self.origin.read().await.len()
    }

    async fn cache_contains(&self, id: i64) -> bool {
        self.second_level.read().await.contains(id)
    }

    async fn cache_evict(&self, id: i64) {
        self.second_level.write().await.remove(id);
    }

    async fn cache_evict_all(&self) {
        self.second_level.write().await.clear();
    }

    async fn cache_stats(&self) -> CacheStats {
        self.second_level.read().await.stats()
    }
}

fn decode_row(row: &[u8]) -> Result<Record> {
    serde_json::from_slice(row).map_err(|e| BenchError::Internal(format!("decoding row: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> MemoryRecordStore {
        let store = MemoryRecordStore::default();
        store.save(Record::fixture()).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_find_by_id_populates_second_level() {
        let store = seeded().await;
        assert!(!store.cache_contains(1).await);

        let found = store.find_by_id(1).await.unwrap();
        assert_eq!(found, Some(Record::fixture()));
        assert!(store.cache_contains(1).await);

        // second read is served from the cache
        store.find_by_id(1).await.unwrap();
        let stats = store.cache_stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_find_missing_record() {
        let store = MemoryRecordStore::default();

        assert_eq!(store.find_by_id(42).await.unwrap(), None);
        assert_eq!(store.find_bypassing_cache(42).await.unwrap(), None);
        assert!(!store.cache_contains(42).await);
    }

    #[tokio::test]
    async fn test_bypass_read_refreshes_cache() {
        let store = seeded().await;

        let found = store.find_bypassing_cache(1).await.unwrap();
        assert_eq!(found, Some(Record::fixture()));
        assert!(store.cache_contains(1).await);

        // bypass reads never count as cache lookups
        let stats = store.cache_stats().await;
        assert_eq!(stats.hits + stats.misses, 0);
    }

    #[tokio::test]
    async fn test_update_email_evicts_second_level_entry() {
        let store = seeded().await;
        store.find_by_id(1).await.unwrap();
        assert!(store.cache_contains(1).await);

        let updated = store.update_email(1, "changed@example.com").await.unwrap();
        assert_eq!(updated.email, "changed@example.com");
        assert!(!store.cache_contains(1).await);

        let reread = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(reread.email, "changed@example.com");
    }

    #[tokio::test]
    async fn test_update_email_missing_record() {
        let store = MemoryRecordStore::default();

        let err = store.update_email(9, "x@example.com").await.unwrap_err();
        assert!(matches!(err, BenchError::RecordNotFound(9)));
    }

    #[tokio::test]
    async fn test_save_is_upsert() {
        let store = seeded().await;
        store.save(Record::fixture()).await.unwrap();
        store.save(Record::new(2, "Customer-2", "c2@example.com")).await.unwrap();

        assert_eq!(store.count().await, 2);
        assert!(store.exists(1).await);
        assert!(store.exists(2).await);
    }

    #[tokio::test]
    async fn test_cache_evict_all() {
        let store = seeded().await;
        store.save(Record::new(2, "Customer-2", "c2@example.com")).await.unwrap();
        store.find_by_id(1).await.unwrap();
        store.find_by_id(2).await.unwrap();

        store.cache_evict_all().await;

        assert!(!store.cache_contains(1).await);
        assert!(!store.cache_contains(2).await);
        assert_eq!(store.count().await, 2, "origin rows are untouched");
    }
}
