//! API Handlers
//!
//! HTTP request handlers for each cache endpoint.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::{Cache, StatsSnapshot};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{EntriesResponse, HealthResponse, StoredResponse};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Handle to the served cache; cloning shares the same store
    pub cache: Cache,
    /// Largest accepted payload in bytes
    pub max_payload_size: usize,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Cache) -> Self {
        Self {
            cache,
            max_payload_size: Config::default().max_payload_size,
        }
    }

    /// Creates the cache described by `config` and wraps it.
    ///
    /// Fails when called outside a Tokio runtime.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Cache::try_new(config.cache_config())?;
        Ok(Self {
            cache,
            max_payload_size: config.max_payload_size,
        })
    }
}

/// Handler for PUT /cache/*key
///
/// Stores the raw request body under `key`.
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    payload: Bytes,
) -> Result<Json<StoredResponse>> {
    if key.is_empty() {
        return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
    }

    let size = payload.len();
    state.cache.add(key.clone(), payload).await;

    Ok(Json(StoredResponse::new(key, size)))
}

/// Handler for GET /cache/*key
///
/// Returns the stored payload as `application/octet-stream`, or 404 on a miss.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response> {
    match state.cache.get(&key).await {
        Some(payload) => Ok((
            [(header::CONTENT_TYPE, "application/octet-stream")],
            payload,
        )
            .into_response()),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /entries
///
/// Lists the current entries without their payloads.
pub async fn entries_handler(State(state): State<AppState>) -> Json<EntriesResponse> {
    Json(EntriesResponse::new(state.cache.entries().await))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.cache.stats().await)
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.is_reaping()))
}
