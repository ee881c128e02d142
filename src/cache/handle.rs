//! Cache Handle Module
//!
//! The public entry point: owns the store, its statistics and the reaper task
//! that sweeps it.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::cache::{CacheStats, CacheStore, EntrySnapshot, StatsSnapshot};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper;

/// Smallest sweep period the reaper accepts.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

// == Cache Config ==
/// Expiration timing for a cache instance.
///
/// `ttl` is the age past which an entry is stale. `sweep_interval` is how
/// often the reaper looks. An entry can therefore live for up to
/// `ttl + sweep_interval` before it disappears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    ttl: Duration,
    sweep_interval: Duration,
}

impl CacheConfig {
    /// Creates a config that sweeps every half `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sweep_interval: (ttl / 2).max(MIN_SWEEP_INTERVAL),
        }
    }

    /// Creates a config where one `interval` is both the TTL and the sweep
    /// period.
    pub fn coupled(interval: Duration) -> Self {
        Self {
            ttl: interval,
            sweep_interval: interval.max(MIN_SWEEP_INTERVAL),
        }
    }

    /// Overrides the sweep period, clamped to [`MIN_SWEEP_INTERVAL`].
    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval.max(MIN_SWEEP_INTERVAL);
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }
}

// == Cache ==
/// A cloneable handle to one cache instance.
///
/// All clones share the same store and the same reaper. The reaper runs until
/// [`Cache::shutdown`] is called or the last handle is dropped.
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    store: Arc<RwLock<CacheStore>>,
    stats: Arc<CacheStats>,
    config: CacheConfig,
    token: CancellationToken,
    /// Cancelled by the reaper task itself when it goes away
    stopped: CancellationToken,
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl Cache {
    // == Constructors ==
    /// Creates a cache whose entries go stale after `interval` and starts its
    /// reaper.
    ///
    /// # Panics
    /// Panics if called from outside a Tokio runtime. Use [`Cache::try_new`]
    /// to get an error instead.
    pub fn new(interval: Duration) -> Self {
        Self::with_config(CacheConfig::new(interval))
    }

    /// Creates a cache with explicit timing and starts its reaper.
    ///
    /// # Panics
    /// Panics if called from outside a Tokio runtime.
    pub fn with_config(config: CacheConfig) -> Self {
        let store = Arc::new(RwLock::new(CacheStore::new()));
        let stats = Arc::new(CacheStats::new());
        let token = CancellationToken::new();
        let stopped = CancellationToken::new();
        let reaper = spawn_reaper(
            store.clone(),
            stats.clone(),
            config,
            token.clone(),
            stopped.clone(),
        );

        Self {
            inner: Arc::new(Inner {
                store,
                stats,
                config,
                token,
                stopped,
                reaper: Mutex::new(Some(reaper)),
            }),
        }
    }

    /// Like [`Cache::with_config`], but fails instead of panicking when no
    /// Tokio runtime is available.
    pub fn try_new(config: CacheConfig) -> Result<Self> {
        tokio::runtime::Handle::try_current().map_err(|_| CacheError::RuntimeUnavailable)?;
        Ok(Self::with_config(config))
    }

    // == Add ==
    /// Stores `payload` under `key`, replacing any previous entry and
    /// resetting its age.
    pub async fn add(&self, key: impl Into<String>, payload: impl Into<Bytes>) {
        let mut store = self.inner.store.write().await;
        store.add(key.into(), payload.into());
    }

    // == Get ==
    /// Returns the payload stored under `key`, or `None` on a miss.
    ///
    /// A lookup never extends an entry's lifetime and never evicts. An entry
    /// past its TTL is still returned until the reaper gets to it.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        let payload = self.inner.store.read().await.get(key);
        match payload {
            Some(_) => self.inner.stats.record_hit(),
            None => self.inner.stats.record_miss(),
        }
        payload
    }

    // == Introspection ==
    /// Lists the current entries, sorted by key. Diagnostic only.
    pub async fn entries(&self) -> Vec<EntrySnapshot> {
        self.inner.store.read().await.entries(Instant::now())
    }

    pub async fn len(&self) -> usize {
        self.inner.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.store.read().await.is_empty()
    }

    /// Returns current hit, miss and reap counters.
    pub async fn stats(&self) -> StatsSnapshot {
        let entries = self.len().await;
        self.inner.stats.snapshot(entries)
    }

    pub fn config(&self) -> CacheConfig {
        self.inner.config
    }

    // == Lifecycle ==
    /// Stops the reaper and waits for it to exit.
    ///
    /// The store stays usable afterwards, but nothing is evicted any more.
    /// Every caller, from any clone, returns only once the reaper is gone; a
    /// sweep already in progress finishes first. Only the call that observes
    /// the task's end reports a reaper failure as [`CacheError::Internal`].
    pub async fn shutdown(&self) -> Result<()> {
        self.inner.token.cancel();

        // Held across the join so concurrent callers queue behind it
        let mut reaper = self.inner.reaper.lock().await;
        if let Some(handle) = reaper.as_mut() {
            let joined = handle.await;
            *reaper = None;
            if let Err(err) = joined {
                error!("Reaper task ended abnormally: {}", err);
                return Err(CacheError::Internal(format!("reaper task failed: {}", err)));
            }
            debug!("Cache shut down");
        }
        Ok(())
    }

    /// Whether the reaper task is still alive, including mid-sweep after
    /// shutdown was requested.
    pub fn is_reaping(&self) -> bool {
        !self.inner.stopped.is_cancelled()
    }
}
