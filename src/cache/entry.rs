//! Cache Entry Module
//!
//! Defines the structure for individual cache entries: a write instant and an
//! opaque byte payload.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// A single cached payload and the instant it was written.
///
/// Entries are never mutated in place. An overwrite replaces the whole entry,
/// which is what resets its age.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub payload: Bytes,
    /// When the entry was written (monotonic clock)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(payload: Bytes) -> Self {
        Self::with_instant(payload, Instant::now())
    }

    /// Creates an entry with an explicit write instant.
    pub fn with_instant(payload: Bytes, created_at: Instant) -> Self {
        Self {
            payload,
            created_at,
        }
    }

    // == Age ==
    /// Returns how long ago the entry was written, measured against `now`.
    ///
    /// Saturates to zero if `now` precedes the write instant, which happens
    /// when a sweep samples the clock just before a concurrent `add`.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Stale ==
    /// Checks whether the entry is older than `ttl` at `now`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` exactly is still
    /// fresh. Only a strictly greater age makes it stale.
    pub fn is_stale(&self, now: Instant, ttl: Duration) -> bool {
        self.age_at(now) > ttl
    }

    // == Size ==
    /// Returns the payload length in bytes.
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}
