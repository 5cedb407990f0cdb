//! Request DTOs for the benchmark node API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::{Deserialize, Serialize};

use crate::models::Record;

/// Query string of `GET /benchmark/local`.
///
/// `mode` stays a raw string so an unknown value surfaces as an
/// `UnsupportedMode` error rather than a generic extractor rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalBenchmarkQuery {
    pub mode: String,
    /// Number of reads, the node's configured count when absent
    #[serde(default)]
    pub reads: Option<u64>,
}

/// Body of `PUT /customer/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmailRequest {
    pub email: String,
}

impl UpdateEmailRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let email = self.email.trim();
        if email.is_empty() {
            return Some("Email cannot be empty".to_string());
        }
        if !email.contains('@') {
            return Some(format!("Email '{}' is not an address", email));
        }
        None
    }
}

/// Body of `PUT /cluster/map/:id`, sent by the member that does not own the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPutRequest {
    pub record: Record,
    pub ttl_seconds: u64,
}
