//! API Module
//!
//! HTTP handlers and routing for the benchmark node.
//!
//! # Endpoints
//! - `GET /benchmark` - Full two-node benchmark report
//! - `GET /benchmark/local` - Single-mode run on this node
//! - `GET|PUT /customer/:id` - Record read and email update
//! - `GET|PUT|DELETE /cluster/map/:id` - Distributed map partition
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
