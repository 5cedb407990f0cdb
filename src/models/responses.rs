//! Response DTOs for the benchmark node API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::models::Record;

/// Second-level cache state observed by a customer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheStatus {
    CacheHit,
    CacheMiss,
    Updated,
}

/// Response body of `GET /customer/:id` and `PUT /customer/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub cache_status: CacheStatus,
    pub node_id: String,
}

impl CustomerResponse {
    pub fn new(record: Record, cache_status: CacheStatus, node_id: impl Into<String>) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            cache_status,
            node_id: node_id.into(),
        }
    }
}

/// Counters of one cache layer as reported by `GET /stats`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body of `GET /stats`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub node_id: String,
    pub second_level_cache: CacheStatsResponse,
    /// The partition of the distributed map owned by this node
    pub distributed_map: CacheStatsResponse,
}

/// Response body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy(node_id: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            node_id: node_id.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
