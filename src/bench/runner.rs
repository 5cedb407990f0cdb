//! Local benchmark runner
//!
//! Runs one mode on this node and times the read loop.

use std::time::Instant;

use tracing::{error, info};

use crate::bench::strategy::{strategy_for, ReadContext, ReadTally};
use crate::error::{BenchError, Result};
use crate::models::{Mode, ModeResult};

pub struct LocalBenchmarkRunner {
    context: ReadContext,
    node_id: String,
    /// TTL in seconds used by the distributed strategy
    distributed_ttl: u64,
}

impl LocalBenchmarkRunner {
    pub fn new(context: ReadContext, node_id: impl Into<String>, distributed_ttl: u64) -> Self {
        Self {
            context,
            node_id: node_id.into(),
            distributed_ttl,
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn context(&self) -> &ReadContext {
        &self.context
    }

    // == Run ==
    /// Performs `reads` sequential reads in `mode` and reports elapsed time and
    /// hit/miss counts, tagged with this node's id.
    ///
    /// Only the read loop is timed. A missing record aborts the run.
    pub async fn run(&self, mode: Mode, reads: u64) -> Result<ModeResult> {
        if reads == 0 {
            error!(node = %self.node_id, %mode, "rejected benchmark run without reads");
            return Err(BenchError::InvalidRequest(
                "reads must be greater than zero".to_string(),
            ));
        }

        let strategy = strategy_for(mode, self.distributed_ttl);
        let mut tally = ReadTally::new();

        let started = Instant::now();
        if let Err(err) = strategy.execute_reads(&self.context, reads, &mut tally).await {
            error!(node = %self.node_id, %mode, reads, error = %err, "local benchmark failed");
            return Err(err);
        }
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let result = ModeResult {
            mode,
            elapsed_ms,
            hits: tally.hits(),
            misses: tally.misses(),
            node_id: self.node_id.clone(),
        };

        info!(
            node = %self.node_id,
            %mode,
            reads,
            elapsed_ms,
            hits = result.hits,
            misses = result.misses,
            "local benchmark finished"
        );
        Ok(result)
    }
}
