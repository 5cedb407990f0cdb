//! Data model and request/response DTOs
//!
//! The record under benchmark, the benchmark value objects, and the bodies
//! serialized over HTTP between callers and nodes.

pub mod benchmark;
pub mod record;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use benchmark::{BenchmarkResult, Mode, ModeResult, TtlEffect};
pub use record::{Record, FIXTURE_ID};
pub use requests::{LocalBenchmarkQuery, MapPutRequest, UpdateEmailRequest};
pub use responses::{
    CacheStatsResponse, CacheStatus, CustomerResponse, ErrorResponse, HealthResponse,
    StatsResponse,
};
