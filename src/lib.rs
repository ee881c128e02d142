//! reapcache - A short-lived in-memory byte cache
//!
//! Payloads are keyed by opaque strings and removed by a background reaper
//! once they are older than the configured TTL.
//!
//! ```ignore
//! let cache = Cache::new(Duration::from_secs(5));
//! cache.add("https://example.com/items?page=2", body).await;
//! if let Some(cached) = cache.get("https://example.com/items?page=2").await {
//!     // use cached payload
//! }
//! cache.shutdown().await?;
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheConfig};
pub use config::Config;
pub use error::CacheError;
