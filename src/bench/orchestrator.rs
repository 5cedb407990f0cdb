//! Benchmark orchestrator
//!
//! Runs every mode on this node and on the peer, then folds the six results
//! into one report. Any failure aborts the whole run; there is no partial
//! report.

use tokio::sync::Mutex;
use tracing::{error, info};

use crate::bench::{LocalBenchmarkRunner, RemoteBenchmarkClient};
use crate::error::Result;
use crate::models::{BenchmarkResult, Mode, ModeResult, Record};

pub struct BenchmarkOrchestrator {
    runner: LocalBenchmarkRunner,
    remote: RemoteBenchmarkClient,
    peer_url: String,
    /// Reads per mode on each node in a full run
    reads: u64,
    /// Serializes fixture creation between concurrent requests
    fixture_guard: Mutex<()>,
}

impl BenchmarkOrchestrator {
    pub fn new(
        runner: LocalBenchmarkRunner,
        remote: RemoteBenchmarkClient,
        peer_url: impl Into<String>,
        reads: u64,
    ) -> Self {
        Self {
            runner,
            remote,
            peer_url: peer_url.into(),
            reads,
            fixture_guard: Mutex::new(()),
        }
    }

    pub fn node_id(&self) -> &str {
        self.runner.node_id()
    }

    pub fn default_reads(&self) -> u64 {
        self.reads
    }

    // == Ensure Fixture ==
    /// Creates the fixture record unless it already exists. Returns whether it
    /// was created by this call.
    pub async fn ensure_fixture(&self) -> Result<bool> {
        let context = self.runner.context();
        let _guard = self.fixture_guard.lock().await;

        if context.store.exists(context.record_id).await {
            return Ok(false);
        }

        let fixture = Record {
            id: context.record_id,
            ..Record::fixture()
        };
        context.store.save(fixture).await?;
        info!(node = %self.node_id(), id = context.record_id, "created fixture record for benchmark");
        Ok(true)
    }

    // == Run Single Mode ==
    /// One local run, without the peer. This is what the peer executes when
    /// asked remotely.
    pub async fn run_single_mode(&self, mode: Mode, reads: u64) -> Result<ModeResult> {
        self.ensure_fixture().await?;
        self.runner.run(mode, reads).await
    }

    // == Run Full Benchmark ==
    /// For each mode in order: run locally, then the same mode and read count on
    /// the peer. Sums local and remote times per mode.
    pub async fn run_full_benchmark(&self) -> Result<BenchmarkResult> {
        self.ensure_fixture().await?;

        let mut runs = Vec::with_capacity(Mode::ALL.len() * 2);
        for mode in Mode::ALL {
            let local = self.runner.run(mode, self.reads).await?;
            let remote = self
                .remote
                .invoke_remote(&self.peer_url, mode, self.reads)
                .await
                .inspect_err(|err| {
                    error!(node = %self.node_id(), %mode, peer = %self.peer_url, error = %err, "aborting benchmark");
                })?;

            runs.push(local);
            runs.push(remote);
        }

        let result = BenchmarkResult::aggregate(runs);
        info!(
            node = %self.node_id(),
            no_cache_ms = result.no_cache_ms,
            second_level_cache_ms = result.second_level_cache_ms,
            distributed_cache_ms = result.distributed_cache_ms,
            ttl_hits = result.ttl_effect.hits,
            ttl_misses = result.ttl_effect.misses,
            "benchmark finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::bench::ReadContext;
    use crate::cache::{ClusterMembers, DistributedMap};
    use crate::error::BenchError;
    use crate::models::FIXTURE_ID;
    use crate::store::{MemoryRecordStore, RecordStore};

    fn orchestrator(store: Arc<dyn RecordStore>, peer_url: &str) -> BenchmarkOrchestrator {
        let map = DistributedMap::new(
            ClusterMembers::standalone("node-1"),
            100,
            Duration::from_secs(60),
            Duration::from_secs(1),
        )
        .unwrap();
        let runner =
            LocalBenchmarkRunner::new(ReadContext::new(store, Arc::new(map), FIXTURE_ID), "node-1", 1);
        let remote = RemoteBenchmarkClient::new("node-1", Duration::from_secs(2)).unwrap();
        BenchmarkOrchestrator::new(runner, remote, peer_url, 20)
    }

    #[tokio::test]
    async fn test_ensure_fixture_is_idempotent() {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::default());
        let orchestrator = orchestrator(store.clone(), "http://127.0.0.1:1");

        assert!(orchestrator.ensure_fixture().await.unwrap());
        assert!(!orchestrator.ensure_fixture().await.unwrap());

        assert_eq!(store.count().await, 1);
        assert_eq!(store.find_by_id(FIXTURE_ID).await.unwrap(), Some(Record::fixture()));
    }

    #[tokio::test]
    async fn test_ensure_fixture_keeps_existing_record() {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::default());
        store
            .save(Record::new(FIXTURE_ID, "Customer-1", "moved@example.com"))
            .await
            .unwrap();
        let orchestrator = orchestrator(store.clone(), "http://127.0.0.1:1");

        assert!(!orchestrator.ensure_fixture().await.unwrap());
        let kept = store.find_by_id(FIXTURE_ID).await.unwrap().unwrap();
        assert_eq!(kept.email, "moved@example.com");
    }

    #[tokio::test]
    async fn test_run_single_mode_creates_fixture() {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::default());
        let orchestrator = orchestrator(store.clone(), "http://127.0.0.1:1");

        let result = orchestrator.run_single_mode(Mode::SecondLevelCache, 5).await.unwrap();

        assert_eq!(result.hits + result.misses, 5);
        assert!(store.exists(FIXTURE_ID).await);
    }

    #[tokio::test]
    async fn test_full_benchmark_aborts_when_peer_is_down() {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::default());
        let orchestrator = orchestrator(store, "http://127.0.0.1:1");

        let err = orchestrator.run_full_benchmark().await.unwrap_err();
        assert!(matches!(err, BenchError::RemoteBenchmarkUnavailable(_)));
    }
}
