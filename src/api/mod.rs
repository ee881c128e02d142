//! API Module
//!
//! HTTP handlers and routing that expose one cache instance.
//!
//! # Endpoints
//! - `PUT /cache/*key` - Store a payload
//! - `GET /cache/*key` - Retrieve a payload
//! - `GET /entries` - Diagnostic listing of entries
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
