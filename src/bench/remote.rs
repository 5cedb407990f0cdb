//! Remote benchmark client
//!
//! Runs a single mode on the peer through its `/benchmark/local` endpoint. One
//! attempt per call: an outage is reported, not retried.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{BenchError, Result};
use crate::models::{ErrorResponse, Mode, ModeResult};

pub struct RemoteBenchmarkClient {
    client: reqwest::Client,
    /// Node issuing the calls, for log lines
    node_id: String,
}

impl RemoteBenchmarkClient {
    /// `timeout` bounds the whole remote run, connect to last byte.
    pub fn new(node_id: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BenchError::Internal(format!("building benchmark client: {}", e)))?;

        Ok(Self {
            client,
            node_id: node_id.into(),
        })
    }

    // == Invoke Remote ==
    pub async fn invoke_remote(&self, peer_url: &str, mode: Mode, reads: u64) -> Result<ModeResult> {
        let url = format!(
            "{}/benchmark/local?mode={}&reads={}",
            peer_url.trim_end_matches('/'),
            mode,
            reads
        );
        debug!(node = %self.node_id, %url, "invoking remote benchmark");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.unavailable(&url, e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.unavailable(&url, e.to_string()))?;

        if !status.is_success() {
            let reason = serde_json::from_slice::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(self.unavailable(&url, format!("peer answered {}: {}", status, reason)));
        }
        if body.is_empty() {
            return Err(self.unavailable(&url, "empty response body".to_string()));
        }

        let result: ModeResult = serde_json::from_slice(&body)
            .map_err(|e| self.unavailable(&url, format!("invalid payload: {}", e)))?;
        if result.mode != mode {
            return Err(self.unavailable(
                &url,
                format!("peer ran {} instead of {}", result.mode, mode),
            ));
        }

        Ok(result)
    }

    fn unavailable(&self, url: &str, reason: String) -> BenchError {
        warn!(node = %self.node_id, url, %reason, "remote benchmark unavailable");
        BenchError::RemoteBenchmarkUnavailable(format!("{}: {}", url, reason))
    }
}
