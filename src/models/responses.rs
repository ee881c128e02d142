//! Response DTOs for the cache HTTP API
//!
//! Defines the JSON bodies returned by successful requests.

use serde::Serialize;

use crate::cache::EntrySnapshot;

/// Response body for PUT /cache/*key
#[derive(Debug, Clone, Serialize)]
pub struct StoredResponse {
    /// The key that was written
    pub key: String,
    /// Payload length in bytes
    pub size: usize,
}

impl StoredResponse {
    pub fn new(key: impl Into<String>, size: usize) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }
}

/// Response body for GET /entries
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    /// Number of entries listed
    pub count: usize,
    pub entries: Vec<EntrySnapshot>,
}

impl EntriesResponse {
    pub fn new(entries: Vec<EntrySnapshot>) -> Self {
        Self {
            count: entries.len(),
            entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Whether the reaper task is still sweeping
    pub reaping: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a HealthResponse stamped with the current time
    pub fn healthy(reaping: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            reaping,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
