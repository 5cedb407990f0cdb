//! Cache Bench - two-node cache strategy latency benchmark
//!
//! Times reads of one record with no cache, with a per-process second-level
//! cache, and through a TTL-bounded map shared by both nodes, then combines the
//! numbers of both nodes into one report.

pub mod api;
pub mod bench;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

#[cfg(test)]
mod test_support;

pub use api::AppState;
pub use config::Config;
pub use error::{BenchError, Result};
pub use tasks::spawn_cleanup_task;
