//! Response models for the cache HTTP API
//!
//! Payloads travel as raw request and response bodies; only acknowledgements
//! and diagnostics are JSON.

pub mod responses;

pub use responses::{EntriesResponse, HealthResponse, StoredResponse};
