//! Reaper Task
//!
//! Background task that periodically removes stale cache entries until its
//! cancellation token fires.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::{CacheConfig, CacheStats, CacheStore};

/// Spawns the sweep loop for one cache instance.
///
/// Every `config.sweep_interval()` the task takes the store's write lock,
/// samples the clock once and removes each entry older than `config.ttl()`.
/// The first sweep happens one full period after spawning. Ticks missed
/// while the lock was contended are delayed rather than bunched.
///
/// The loop checks `token` between sweeps and returns as soon as it is
/// cancelled. A sweep already in progress always completes. `stopped` is
/// cancelled once the task is gone, whether it returned, panicked or was
/// aborted.
///
/// # Panics
/// Panics if called from outside a Tokio runtime.
pub fn spawn_reaper(
    store: Arc<RwLock<CacheStore>>,
    stats: Arc<CacheStats>,
    config: CacheConfig,
    token: CancellationToken,
    stopped: CancellationToken,
) -> JoinHandle<()> {
    let ttl = config.ttl();
    let period = config.sweep_interval();
    let stopped = stopped.drop_guard();

    tokio::spawn(async move {
        let _stopped = stopped;
        info!(
            "Starting reaper: ttl={}ms, sweep interval={}ms",
            ttl.as_millis(),
            period.as_millis()
        );

        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let removed = {
                let mut guard = store.write().await;
                guard.reap(Instant::now(), ttl)
            };
            stats.record_reaped(removed);

            if removed > 0 {
                info!("Reaper: removed {} stale entries", removed);
            } else {
                debug!("Reaper: no stale entries found");
            }
        }

        info!("Reaper stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::time::Duration;

    fn shared_store() -> (Arc<RwLock<CacheStore>>, Arc<CacheStats>) {
        (
            Arc::new(RwLock::new(CacheStore::new())),
            Arc::new(CacheStats::new()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_removes_stale_entries() {
        let (store, stats) = shared_store();
        store
            .write()
            .await
            .add("expire_soon".to_string(), Bytes::from_static(b"value"));

        let token = CancellationToken::new();
        let config = CacheConfig::coupled(Duration::from_millis(100));
        let handle = spawn_reaper(
            store.clone(),
            stats.clone(),
            config,
            token.clone(),
            CancellationToken::new(),
        );

        // Age is exactly the TTL at the first sweep, so the second one removes it
        time::sleep(Duration::from_millis(150)).await;
        assert!(store.read().await.get("expire_soon").is_some());

        time::sleep(Duration::from_millis(100)).await;
        assert!(store.read().await.get("expire_soon").is_none());
        assert_eq!(stats.snapshot(0).reaped, 1);

        token.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_preserves_fresh_entries() {
        let (store, stats) = shared_store();
        let token = CancellationToken::new();
        let config = CacheConfig::new(Duration::from_secs(3600));
        let handle = spawn_reaper(
            store.clone(),
            stats.clone(),
            config,
            token.clone(),
            CancellationToken::new(),
        );

        store
            .write()
            .await
            .add("long_lived".to_string(), Bytes::from_static(b"value"));

        // Several sweeps run, none of them old enough to matter
        time::sleep(Duration::from_secs(1800)).await;

        assert_eq!(
            store.read().await.get("long_lived"),
            Some(Bytes::from_static(b"value"))
        );
        assert_eq!(stats.snapshot(1).reaped, 0);

        token.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_stops_on_cancel() {
        let (store, stats) = shared_store();
        let token = CancellationToken::new();
        let config = CacheConfig::coupled(Duration::from_millis(100));
        let handle = spawn_reaper(
            store.clone(),
            stats,
            config,
            token.clone(),
            CancellationToken::new(),
        );

        token.cancel();
        handle.await.unwrap();

        // With the task gone nothing is swept any more
        store
            .write()
            .await
            .add("orphan".to_string(), Bytes::from_static(b"value"));
        time::sleep(Duration::from_secs(10)).await;
        assert!(store.read().await.get("orphan").is_some());
    }

    #[tokio::test]
    async fn test_reaper_cancelled_before_first_tick() {
        let (store, stats) = shared_store();
        let token = CancellationToken::new();
        token.cancel();

        let config = CacheConfig::new(Duration::from_secs(60));
        let handle = spawn_reaper(store, stats, config, token, CancellationToken::new());

        // Must not wait out the 30s sweep period
        time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("reaper should exit promptly")
            .unwrap();
    }

    #[tokio::test]
    async fn test_stopped_fires_when_task_ends() {
        let (store, stats) = shared_store();
        let token = CancellationToken::new();
        let stopped = CancellationToken::new();
        let config = CacheConfig::new(Duration::from_secs(60));
        let handle = spawn_reaper(store, stats, config, token.clone(), stopped.clone());

        assert!(!stopped.is_cancelled());
        token.cancel();
        handle.await.unwrap();
        assert!(stopped.is_cancelled());
    }

    #[tokio::test]
    async fn test_stopped_fires_when_task_aborted() {
        let (store, stats) = shared_store();
        let stopped = CancellationToken::new();
        let config = CacheConfig::new(Duration::from_secs(60));
        let handle = spawn_reaper(
            store,
            stats,
            config,
            CancellationToken::new(),
            stopped.clone(),
        );

        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
        assert!(stopped.is_cancelled());
    }
}
