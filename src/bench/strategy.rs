//! Read strategies
//!
//! One [`ReadStrategy`] per benchmark mode. A strategy issues its reads strictly
//! in sequence against the fixture record and accounts every cache lookup in a
//! [`ReadTally`] owned by the current run.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{DistributedMap, ObjectCacheAdapter};
use crate::error::{BenchError, Result};
use crate::models::{Mode, Record};
use crate::store::RecordStore;

// == Read Context ==
/// Everything a strategy reads through.
#[derive(Clone)]
pub struct ReadContext {
    pub store: Arc<dyn RecordStore>,
    pub object_cache: ObjectCacheAdapter,
    pub shared_map: Arc<DistributedMap>,
    /// Id every read targets
    pub record_id: i64,
}

impl ReadContext {
    pub fn new(store: Arc<dyn RecordStore>, shared_map: Arc<DistributedMap>, record_id: i64) -> Self {
        Self {
            object_cache: ObjectCacheAdapter::new(store.clone()),
            store,
            shared_map,
            record_id,
        }
    }

    /// Plain read through the store and whatever caching it applies.
    async fn read_through(&self) -> Result<Record> {
        self.store
            .find_by_id(self.record_id)
            .await?
            .ok_or(BenchError::RecordNotFound(self.record_id))
    }

    /// Origin read that skips and then refreshes the store's own cache.
    async fn read_origin(&self) -> Result<Record> {
        self.store
            .find_bypassing_cache(self.record_id)
            .await?
            .ok_or(BenchError::RecordNotFound(self.record_id))
    }
}

// == Read Tally ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Hit,
    Miss,
}

/// Hit/miss accounting of a single run, in read order.
#[derive(Debug, Default)]
pub struct ReadTally {
    hits: u64,
    misses: u64,
    lookups: Vec<Lookup>,
}

impl ReadTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
            self.lookups.push(Lookup::Hit);
        } else {
            self.misses += 1;
            self.lookups.push(Lookup::Miss);
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn lookups(&self) -> &[Lookup] {
        &self.lookups
    }
}

// == Read Strategy ==
#[async_trait]
pub trait ReadStrategy: Send + Sync {
    fn mode(&self) -> Mode;

    /// Performs `count` reads of the context's record, recording lookups in `tally`.
    async fn execute_reads(&self, ctx: &ReadContext, count: u64, tally: &mut ReadTally)
        -> Result<()>;
}

/// Builds the strategy for `mode`; `distributed_ttl` is in seconds.
pub fn strategy_for(mode: Mode, distributed_ttl: u64) -> Box<dyn ReadStrategy> {
    match mode {
        Mode::NoCache => Box::new(NoCache),
        Mode::SecondLevelCache => Box::new(SecondLevelCache),
        Mode::DistributedMap => Box::new(DistributedTtlCache::new(distributed_ttl)),
    }
}

// == No Cache ==
/// Every read is a cold fetch: the cached copy is evicted right before it.
/// Nothing is counted.
pub struct NoCache;

#[async_trait]
impl ReadStrategy for NoCache {
    fn mode(&self) -> Mode {
        Mode::NoCache
    }

    async fn execute_reads(&self, ctx: &ReadContext, count: u64, _tally: &mut ReadTally) -> Result<()> {
        for _ in 0..count {
            ctx.object_cache.evict(ctx.record_id).await;
            ctx.read_through().await?;
        }
        Ok(())
    }
}

// == Second Level Cache ==
/// Starts cold once, then lets the store's cache warm up on its own. A read is
/// a hit when the record was already cached just before it.
pub struct SecondLevelCache;

#[async_trait]
impl ReadStrategy for SecondLevelCache {
    fn mode(&self) -> Mode {
        Mode::SecondLevelCache
    }

    async fn execute_reads(&self, ctx: &ReadContext, count: u64, tally: &mut ReadTally) -> Result<()> {
        ctx.object_cache.evict(ctx.record_id).await;

        for _ in 0..count {
            tally.record(ctx.object_cache.contains(ctx.record_id).await);
            ctx.read_through().await?;
        }
        Ok(())
    }
}

// == Distributed TTL Cache ==
/// Reads through the shared map with a short TTL. Misses fetch from the
/// origin, never from the local cache, and repopulate the map.
///
/// Before the read at index `count / 2` the strategy waits 1.1x the TTL, so the
/// shared entry expires mid-run: miss, hits, miss, hits.
pub struct DistributedTtlCache {
    ttl_seconds: u64,
}

impl DistributedTtlCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self { ttl_seconds }
    }

    pub fn expiry_pause(&self) -> Duration {
        Duration::from_millis(self.ttl_seconds.saturating_mul(1100))
    }

    /// Waits until any entry written so far has expired. Not cancellable.
    async fn outlive_ttl(&self) {
        let pause = self.expiry_pause();
        debug!(pause_ms = pause.as_millis() as u64, "waiting out shared entry TTL");
        tokio::time::sleep(pause).await;
    }
}

#[async_trait]
impl ReadStrategy for DistributedTtlCache {
    fn mode(&self) -> Mode {
        Mode::DistributedMap
    }

    async fn execute_reads(&self, ctx: &ReadContext, count: u64, tally: &mut ReadTally) -> Result<()> {
        let id = ctx.record_id;
        ctx.shared_map.delete(id).await?;

        let midpoint = count / 2;
        for index in 0..count {
            if index == midpoint {
                self.outlive_ttl().await;
            }

            let hit = ctx.shared_map.get(id).await?.is_some();
            tally.record(hit);

            if !hit {
                let fresh = ctx.read_origin().await?;
                ctx.shared_map.put(id, fresh, self.ttl_seconds).await?;
            }
        }
        Ok(())
    }
}
