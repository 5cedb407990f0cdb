//! Benchmark value objects exchanged between nodes and returned to callers.
//!
//! Field names are camelCase on the wire and modes are SCREAMING_SNAKE_CASE, so
//! a node's `ModeResult` deserializes unchanged on its peer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BenchError;

// == Mode ==
/// Read strategy under benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    NoCache,
    #[serde(alias = "L2_CACHE")]
    SecondLevelCache,
    DistributedMap,
}

impl Mode {
    /// Order in which a full benchmark runs the modes.
    pub const ALL: [Mode; 3] = [Mode::NoCache, Mode::SecondLevelCache, Mode::DistributedMap];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::NoCache => "NO_CACHE",
            Mode::SecondLevelCache => "SECOND_LEVEL_CACHE",
            Mode::DistributedMap => "DISTRIBUTED_MAP",
        }
    }

    /// Whether runs in this mode count hits and misses.
    pub fn tracks_hits(&self) -> bool {
        !matches!(self, Mode::NoCache)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NO_CACHE" => Ok(Mode::NoCache),
            "SECOND_LEVEL_CACHE" | "L2_CACHE" => Ok(Mode::SecondLevelCache),
            "DISTRIBUTED_MAP" => Ok(Mode::DistributedMap),
            _ => Err(BenchError::UnsupportedMode(s.to_string())),
        }
    }
}

// == Mode Result ==
/// Outcome of one run of one mode on one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeResult {
    pub mode: Mode,
    pub elapsed_ms: u64,
    pub hits: u64,
    pub misses: u64,
    pub node_id: String,
}

// == TTL Effect ==
/// Combined DISTRIBUTED_MAP hit/miss counts of both nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlEffect {
    pub hits: u64,
    pub misses: u64,
}

// == Benchmark Result ==
/// Final two-node comparative report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    pub no_cache_ms: u64,
    pub second_level_cache_ms: u64,
    pub distributed_cache_ms: u64,
    pub ttl_effect: TtlEffect,
    /// Every per-node run the sums were built from
    pub runs: Vec<ModeResult>,
}

impl BenchmarkResult {
    /// Sums elapsed time per mode over all runs and folds the DISTRIBUTED_MAP
    /// counters into the TTL effect.
    pub fn aggregate(runs: Vec<ModeResult>) -> Self {
        let mut result = Self {
            no_cache_ms: 0,
            second_level_cache_ms: 0,
            distributed_cache_ms: 0,
            ttl_effect: TtlEffect::default(),
            runs: Vec::new(),
        };

        for run in &runs {
            match run.mode {
                Mode::NoCache => result.no_cache_ms += run.elapsed_ms,
                Mode::SecondLevelCache => result.second_level_cache_ms += run.elapsed_ms,
                Mode::DistributedMap => {
                    result.distributed_cache_ms += run.elapsed_ms;
                    result.ttl_effect.hits += run.hits;
                    result.ttl_effect.misses += run.misses;
                }
            }
        }

        result.runs = runs;
        result
    }

    /// Runs that contributed to the given mode's total.
    pub fn runs_for(&self, mode: Mode) -> impl Iterator<Item = &ModeResult> {
        self.runs.iter().filter(move |run| run.mode == mode)
    }
}
