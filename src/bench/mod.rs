//! Benchmark Module
//!
//! The three read strategies, the local runner that times them, the client
//! that runs them on the peer, and the orchestrator that combines both nodes.

mod orchestrator;
mod remote;
mod runner;
mod strategy;


pub use orchestrator::BenchmarkOrchestrator;
pub use remote::RemoteBenchmarkClient;
pub use runner::LocalBenchmarkRunner;
pub use strategy::{
    strategy_for, DistributedTtlCache, Lookup, NoCache, ReadContext, ReadStrategy, ReadTally,
    SecondLevelCache,
};
