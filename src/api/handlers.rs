//! API Handlers
//!
//! HTTP request handlers for the benchmark, customer and cluster map endpoints.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::bench::{
    BenchmarkOrchestrator, LocalBenchmarkRunner, ReadContext, RemoteBenchmarkClient,
};
use crate::cache::{ClusterMembers, DistributedMap};
use crate::config::Config;
use crate::error::{BenchError, Result};
use crate::models::{
    BenchmarkResult, CacheStatus, CustomerResponse, HealthResponse, LocalBenchmarkQuery,
    MapPutRequest, Mode, ModeResult, Record, StatsResponse, UpdateEmailRequest, FIXTURE_ID,
};
use crate::store::{MemoryRecordStore, RecordStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub node_id: Arc<str>,
    pub store: Arc<dyn RecordStore>,
    pub shared_map: Arc<DistributedMap>,
    pub orchestrator: Arc<BenchmarkOrchestrator>,
}

impl AppState {
    /// Wires a node from already built parts.
    pub fn new(
        store: Arc<dyn RecordStore>,
        shared_map: Arc<DistributedMap>,
        orchestrator: BenchmarkOrchestrator,
    ) -> Self {
        Self {
            node_id: Arc::from(orchestrator.node_id()),
            store,
            shared_map,
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Creates a node from configuration: an empty record store, the map
    /// partition shared with the configured peer, and the benchmark engine.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new(config.l2_max_entries));

        let members =
            ClusterMembers::with_peer(&config.node_id, &config.peer_node_id, &config.peer_url);
        let shared_map = Arc::new(DistributedMap::new(
            members,
            config.map_max_entries,
            Duration::from_secs(config.map_default_ttl),
            Duration::from_secs(config.map_timeout),
        )?);

        let context = ReadContext::new(store.clone(), shared_map.clone(), FIXTURE_ID);
        let runner = LocalBenchmarkRunner::new(context, &config.node_id, config.distributed_ttl);
        let remote = RemoteBenchmarkClient::new(&config.node_id, config.remote_timeout())?;
        let orchestrator =
            BenchmarkOrchestrator::new(runner, remote, &config.peer_url, config.benchmark_reads);

        Ok(Self::new(store, shared_map, orchestrator))
    }
}

// == Benchmark ==

/// Handler for GET /benchmark
///
/// Runs all modes on this node and the peer and returns the combined report.
pub async fn benchmark_handler(State(state): State<AppState>) -> Result<Json<BenchmarkResult>> {
    let orchestrator = state.orchestrator.clone();
    let result = run_detached(async move { orchestrator.run_full_benchmark().await }).await?;
    Ok(Json(result))
}

/// Handler for GET /benchmark/local?mode=&reads=
///
/// Runs one mode on this node only. This is the endpoint the peer calls.
pub async fn local_benchmark_handler(
    State(state): State<AppState>,
    Query(query): Query<LocalBenchmarkQuery>,
) -> Result<Json<ModeResult>> {
    let mode: Mode = query.mode.parse().inspect_err(|err| {
        warn!(node = %state.node_id, mode = %query.mode, error = %err, "rejected local benchmark request");
    })?;
    let reads = query
        .reads
        .unwrap_or_else(|| state.orchestrator.default_reads());

    let orchestrator = state.orchestrator.clone();
    let result = run_detached(async move { orchestrator.run_single_mode(mode, reads).await }).await?;
    Ok(Json(result))
}

/// Runs a benchmark on its own task so a caller hanging up does not cut a run
/// short halfway through its reads.
async fn run_detached<T, F>(run: F) -> Result<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(run)
        .await
        .map_err(|e| BenchError::Internal(format!("benchmark task failed: {}", e)))?
}

// == Customer ==

/// Handler for GET /customer/:id
///
/// Reports whether the second-level cache held the record before the read.
pub async fn get_customer_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerResponse>> {
    let cache_status = if state.store.cache_contains(id).await {
        CacheStatus::CacheHit
    } else {
        CacheStatus::CacheMiss
    };

    let Some(record) = state.store.find_by_id(id).await? else {
        warn!(node = %state.node_id, ?cache_status, id, "customer not found");
        return Err(BenchError::RecordNotFound(id));
    };

    info!(node = %state.node_id, ?cache_status, id, "customer read");
    Ok(Json(CustomerResponse::new(record, cache_status, &*state.node_id)))
}

/// Handler for PUT /customer/:id
///
/// Updates the email and evicts the record from this node's second-level cache.
pub async fn update_customer_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateEmailRequest>,
) -> Result<Json<CustomerResponse>> {
    if let Some(error_msg) = req.validate() {
        warn!(node = %state.node_id, id, reason = %error_msg, "rejected customer update");
        return Err(BenchError::InvalidRequest(error_msg));
    }

    let updated = state
        .store
        .update_email(id, req.email.trim())
        .await
        .inspect_err(|err| warn!(node = %state.node_id, id, error = %err, "customer update failed"))?;

    info!(node = %state.node_id, id, "cache-evict after email update");
    Ok(Json(CustomerResponse::new(
        updated,
        CacheStatus::Updated,
        &*state.node_id,
    )))
}

// == Cluster Map ==
// Partition operations for the member that does not own the key.

/// Handler for GET /cluster/map/:id
pub async fn map_get_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Record>> {
    state
        .shared_map
        .local_get(id)
        .await
        .map(Json)
        .ok_or(BenchError::RecordNotFound(id))
}

/// Handler for PUT /cluster/map/:id
pub async fn map_put_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<MapPutRequest>,
) -> Result<StatusCode> {
    if req.record.id != id {
        warn!(node = %state.node_id, id, record_id = req.record.id, "rejected map put for mismatched key");
        return Err(BenchError::InvalidRequest(format!(
            "record id {} does not match key {}",
            req.record.id, id
        )));
    }

    state.shared_map.local_put(id, req.record, req.ttl_seconds).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /cluster/map/:id
pub async fn map_delete_handler(State(state): State<AppState>, Path(id): Path<i64>) -> StatusCode {
    state.shared_map.local_delete(id).await;
    StatusCode::NO_CONTENT
}

// == Node ==

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        node_id: state.node_id.to_string(),
        second_level_cache: state.store.cache_stats().await.into(),
        distributed_map: state.shared_map.partition_stats().await.into(),
    })
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(&*state.node_id))
}
