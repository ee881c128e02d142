//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache instance.
//!
//! # Tasks
//! - Reaper: removes stale cache entries on a fixed period

mod reaper;

pub use reaper::spawn_reaper;
