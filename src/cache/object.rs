//! Second-level object cache adapter
//!
//! The store caches hydrated records on its own; this adapter only inspects and
//! evicts that state and never holds data itself.

use std::sync::Arc;

use crate::store::RecordStore;

#[derive(Clone)]
pub struct ObjectCacheAdapter {
    store: Arc<dyn RecordStore>,
}

impl ObjectCacheAdapter {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Whether the store currently holds a cached copy of `id`.
    pub async fn contains(&self, id: i64) -> bool {
        self.store.cache_contains(id).await
    }

    pub async fn evict(&self, id: i64) {
        self.store.cache_evict(id).await;
    }

    pub async fn evict_all(&self) {
        self.store.cache_evict_all().await;
    }
}
