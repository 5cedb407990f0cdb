//! Configuration Module
//!
//! Loads node configuration from environment variables. Peer addressing is
//! static: each node knows exactly one peer.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Port of the first node in the default two-node layout.
const FIRST_NODE_PORT: u16 = 8081;
/// Port of the second node in the default two-node layout.
const SECOND_NODE_PORT: u16 = 8082;
/// Largest accepted distributed TTL in seconds. A run sleeps 1.1x this once.
pub const MAX_DISTRIBUTED_TTL: u64 = 3600;

/// Node configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity used to tag results and log lines
    pub node_id: String,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the peer node
    pub peer_url: String,
    /// Identity of the peer node, used to split the distributed map
    pub peer_node_id: String,
    /// Reads per mode in a full benchmark
    pub benchmark_reads: u64,
    /// TTL in seconds of entries the distributed read strategy writes
    pub distributed_ttl: u64,
    /// Size bound of this node's distributed map partition
    pub map_max_entries: usize,
    /// TTL in seconds for map entries written without one
    pub map_default_ttl: u64,
    /// Timeout in seconds of a single request to the peer's map partition
    pub map_timeout: u64,
    /// Size bound of the second-level object cache
    pub l2_max_entries: usize,
    /// Timeout in seconds of a remote single-mode benchmark call
    pub remote_timeout: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8081)
    /// - `NODE_ID` - node identity (default: `node-1` on 8081, else `node-2`)
    /// - `PEER_URL` - peer base URL (default: the other of 8081/8082 on localhost)
    /// - `PEER_NODE_ID` - peer identity (default: the other of `node-1`/`node-2`)
    /// - `BENCHMARK_READS` - reads per mode (default: 5000)
    /// - `DISTRIBUTED_TTL` - distributed entry TTL in seconds, clamped to
    ///   1..=3600 (default: 1)
    /// - `MAP_MAX_ENTRIES` - map partition size bound (default: 100)
    /// - `MAP_DEFAULT_TTL` - map default TTL in seconds (default: 60)
    /// - `MAP_TIMEOUT` - peer map request timeout in seconds (default: 5)
    /// - `L2_MAX_ENTRIES` - second-level cache size bound (default: 1000)
    /// - `REMOTE_TIMEOUT` - remote benchmark timeout in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - cleanup frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let server_port = env_or("SERVER_PORT", FIRST_NODE_PORT);
        let defaults = Self::for_port(server_port);

        Self {
            node_id: env::var("NODE_ID").unwrap_or(defaults.node_id),
            server_port,
            peer_url: env::var("PEER_URL").unwrap_or(defaults.peer_url),
            peer_node_id: env::var("PEER_NODE_ID").unwrap_or(defaults.peer_node_id),
            benchmark_reads: env_or("BENCHMARK_READS", defaults.benchmark_reads),
            distributed_ttl: env_or("DISTRIBUTED_TTL", defaults.distributed_ttl)
                .clamp(1, MAX_DISTRIBUTED_TTL),
            map_max_entries: env_or("MAP_MAX_ENTRIES", defaults.map_max_entries),
            map_default_ttl: env_or("MAP_DEFAULT_TTL", defaults.map_default_ttl),
            map_timeout: env_or("MAP_TIMEOUT", defaults.map_timeout),
            l2_max_entries: env_or("L2_MAX_ENTRIES", defaults.l2_max_entries),
            remote_timeout: env_or("REMOTE_TIMEOUT", defaults.remote_timeout),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }

    /// Defaults for a node listening on `server_port` in the two-node layout:
    /// the node on 8081 is `node-1` and pairs with 8082, any other port is
    /// `node-2` and pairs with 8081.
    pub fn for_port(server_port: u16) -> Self {
        let (node_id, peer_node_id, peer_port) = if server_port == FIRST_NODE_PORT {
            ("node-1", "node-2", SECOND_NODE_PORT)
        } else {
            ("node-2", "node-1", FIRST_NODE_PORT)
        };

        Self {
            node_id: node_id.to_string(),
            server_port,
            peer_url: format!("http://localhost:{}", peer_port),
            peer_node_id: peer_node_id.to_string(),
            benchmark_reads: 5000,
            distributed_ttl: 1,
            map_max_entries: 100,
            map_default_ttl: 60,
            map_timeout: 5,
            l2_max_entries: 1000,
            remote_timeout: 300,
            cleanup_interval: 1,
        }
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_port(FIRST_NODE_PORT)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
