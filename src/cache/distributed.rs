//! Distributed map adapter
//!
//! A cluster-wide record map partitioned across the two members. Each member
//! owns the keys that hash to it and keeps them in a local TTL + LRU bounded
//! partition; keys owned by the peer are read and written through the peer's
//! `/cluster/map/:id` endpoints, so both nodes observe the same logical entry.
//! There is no cross-node locking: a delete racing a put is benchmark noise.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{BenchError, Result};
use crate::models::{MapPutRequest, Record};

// == Cluster Members ==
#[derive(Debug, Clone)]
struct Peer {
    node_id: String,
    base_url: String,
}

/// The local node and its single statically configured peer.
#[derive(Debug, Clone)]
pub struct ClusterMembers {
    local_id: String,
    peer: Option<Peer>,
}

enum Owner<'a> {
    Local,
    Remote(&'a Peer),
}

impl ClusterMembers {
    /// A cluster of one: every key is owned locally.
    pub fn standalone(local_id: impl Into<String>) -> Self {
        Self {
            local_id: local_id.into(),
            peer: None,
        }
    }

    pub fn with_peer(
        local_id: impl Into<String>,
        peer_id: impl Into<String>,
        peer_url: impl Into<String>,
    ) -> Self {
        Self {
            local_id: local_id.into(),
            peer: Some(Peer {
                node_id: peer_id.into(),
                base_url: peer_url.into().trim_end_matches('/').to_string(),
            }),
        }
    }

    /// Whether this node holds the partition for `id`.
    pub fn is_local(&self, id: i64) -> bool {
        matches!(self.owner_of(id), Owner::Local)
    }

    // Both members sort the same two ids, so they agree on every owner.
    fn owner_of(&self, id: i64) -> Owner<'_> {
        let Some(peer) = &self.peer else {
            return Owner::Local;
        };
        if peer.node_id == self.local_id {
            return Owner::Local;
        }

        let mut ids = [self.local_id.as_str(), peer.node_id.as_str()];
        ids.sort_unstable();
        let index = id.rem_euclid(ids.len() as i64) as usize;

        if ids[index] == self.local_id {
            Owner::Local
        } else {
            Owner::Remote(peer)
        }
    }
}

// == Distributed Map ==
pub struct DistributedMap {
    members: ClusterMembers,
    partition: Arc<RwLock<CacheStore<Record>>>,
    client: reqwest::Client,
}

impl DistributedMap {
    /// Creates the adapter with a local partition of at most `max_entries`
    /// records, each expiring after `default_ttl` unless a put says otherwise.
    pub fn new(
        members: ClusterMembers,
        max_entries: usize,
        default_ttl: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| BenchError::Internal(format!("building map client: {}", e)))?;

        Ok(Self {
            members,
            partition: Arc::new(RwLock::new(CacheStore::new(max_entries, Some(default_ttl)))),
            client,
        })
    }

    /// Shared handle on the local partition, for the expiry cleanup task.
    pub fn partition(&self) -> Arc<RwLock<CacheStore<Record>>> {
        self.partition.clone()
    }

    // == Get ==
    pub async fn get(&self, id: i64) -> Result<Option<Record>> {
        match self.members.owner_of(id) {
            Owner::Local => Ok(self.local_get(id).await),
            Owner::Remote(peer) => {
                let url = entry_url(peer, id);
                let response = self.client.get(&url).send().await.map_err(|e| self.unavailable(&url, e))?;

                match response.status() {
                    StatusCode::NOT_FOUND => Ok(None),
                    status if status.is_success() => response
                        .json::<Record>()
                        .await
                        .map(Some)
                        .map_err(|e| self.unavailable(&url, e)),
                    status => Err(self.rejected(&url, status)),
                }
            }
        }
    }

    // == Put ==
    pub async fn put(&self, id: i64, record: Record, ttl_seconds: u64) -> Result<()> {
        match self.members.owner_of(id) {
            Owner::Local => {
                self.local_put(id, record, ttl_seconds).await;
                Ok(())
            }
            Owner::Remote(peer) => {
                let url = entry_url(peer, id);
                let body = MapPutRequest {
                    record,
                    ttl_seconds,
                };
                let response = self
                    .client
                    .put(&url)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| self.unavailable(&url, e))?;

                if response.status().is_success() {
                    Ok(())
                } else {
                    Err(self.rejected(&url, response.status()))
                }
            }
        }
    }

    // == Delete ==
    pub async fn delete(&self, id: i64) -> Result<()> {
        match self.members.owner_of(id) {
            Owner::Local => {
                self.local_delete(id).await;
                Ok(())
            }
            Owner::Remote(peer) => {
                let url = entry_url(peer, id);
                let response = self.client.delete(&url).send().await.map_err(|e| self.unavailable(&url, e))?;

                let status = response.status();
                if status.is_success() || status == StatusCode::NOT_FOUND {
                    Ok(())
                } else {
                    Err(self.rejected(&url, status))
                }
            }
        }
    }

    // == Local Partition ==
    // Used by the cluster endpoints; never forwards, whoever owns the key.

    pub async fn local_get(&self, id: i64) -> Option<Record> {
        self.partition.write().await.get(id)
    }

    pub async fn local_put(&self, id: i64, record: Record, ttl_seconds: u64) {
        let evicted = self
            .partition
            .write()
            .await
            .insert(id, record, Some(Duration::from_secs(ttl_seconds)));

        if let Some(evicted) = evicted {
            debug!(evicted, "map partition full, evicted least recently used entry");
        }
    }

    pub async fn local_delete(&self, id: i64) -> bool {
        self.partition.write().await.remove(id)
    }

    pub async fn partition_stats(&self) -> CacheStats {
        self.partition.read().await.stats()
    }

    fn unavailable(&self, url: &str, err: reqwest::Error) -> BenchError {
        warn!(node = %self.members.local_id, url, error = %err, "map partition owner unreachable");
        BenchError::ClusterUnavailable(format!("{}: {}", url, err))
    }

    fn rejected(&self, url: &str, status: StatusCode) -> BenchError {
        warn!(node = %self.members.local_id, url, %status, "map partition owner rejected request");
        BenchError::ClusterUnavailable(format!("{} answered {}", url, status))
    }
}

fn entry_url(peer: &Peer, id: i64) -> String {
    format!("{}/cluster/map/{}", peer.base_url, id)
}
