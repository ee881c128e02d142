//! API Routes
//!
//! Configures the Axum router with all cache endpoints.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    entries_handler, get_handler, health_handler, put_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /cache/*key` - Store the request body under `key`
/// - `GET /cache/*key` - Retrieve the payload stored under `key`
/// - `GET /entries` - List current entries
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// `key` is a wildcard, so keys may contain `/` (full URLs included).
///
/// # Middleware
/// - Body limit: rejects payloads over `max_payload_size` with 413
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cache/*key", get(get_handler).put(put_handler))
        .route("/entries", get(entries_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(state.max_payload_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
