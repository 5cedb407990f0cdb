//! Record Store Module
//!
//! The authoritative record store the benchmark reads from, with its
//! transparent second-level cache.

mod memory;

use async_trait::async_trait;

use crate::cache::CacheStats;
use crate::error::{BenchError, Result};
use crate::models::Record;

pub use memory::MemoryRecordStore;

// == Record Store ==
/// Lookup and update of records by id.
///
/// `find_by_id` reads through the second-level cache and populates it on a
/// miss; `find_bypassing_cache` always goes to the origin and refreshes the
/// cached copy. The `cache_*` methods inspect and evict that cache directly.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Record>>;

    async fn find_bypassing_cache(&self, id: i64) -> Result<Option<Record>>;

    /// Inserts or replaces the record with the same id.
    async fn save(&self, record: Record) -> Result<Record>;

    async fn exists(&self, id: i64) -> bool;

    /// Number of records held by the origin.
    async fn count(&self) -> usize;

    async fn cache_contains(&self, id: i64) -> bool;

    async fn cache_evict(&self, id: i64);

    async fn cache_evict_all(&self);

    async fn cache_stats(&self) -> CacheStats;

    // == Update Email ==
    /// Changes the email of an existing record and drops its second-level
    /// cache entry, so the next read on this node fetches the new value.
    async fn update_email(&self, id: i64, email: &str) -> Result<Record> {
        let mut record = self
            .find_by_id(id)
            .await?
            .ok_or(BenchError::RecordNotFound(id))?;

        record.email = email.to_string();
        let saved = self.save(record).await?;
        self.cache_evict(id).await;

        Ok(saved)
    }
}
