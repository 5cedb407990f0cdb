//! API Routes
//!
//! Configures the Axum router with every node endpoint.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    benchmark_handler, get_customer_handler, health_handler, local_benchmark_handler,
    map_delete_handler, map_get_handler, map_put_handler, stats_handler, update_customer_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /benchmark` - Full two-node benchmark
/// - `GET /benchmark/local?mode=&reads=` - Single mode on this node
/// - `GET /customer/:id` - Read a record, reporting second-level cache status
/// - `PUT /customer/:id` - Update a record's email
/// - `GET|PUT|DELETE /cluster/map/:id` - This node's distributed map partition
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/benchmark", get(benchmark_handler))
        .route("/benchmark/local", get(local_benchmark_handler))
        .route(
            "/customer/:id",
            get(get_customer_handler).put(update_customer_handler),
        )
        .route(
            "/cluster/map/:id",
            put(map_put_handler)
                .get(map_get_handler)
                .delete(map_delete_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
