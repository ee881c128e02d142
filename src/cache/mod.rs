//! Cache Module
//!
//! Provides a short-lived in-memory byte cache whose stale entries are removed
//! by a background reaper.

mod entry;
mod handle;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::{Cache, CacheConfig, MIN_SWEEP_INTERVAL};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::{CacheStore, EntrySnapshot};
