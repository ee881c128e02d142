//! Cache Store Module
//!
//! The key to entry map. The store itself is not synchronized; the cache
//! handle wraps it in a reader/writer lock shared with the reaper.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use tokio::time::Instant;

use crate::cache::CacheEntry;

// == Cache Store ==
/// Key to payload storage. Entries are only ever added or replaced by `add`
/// and only ever removed by `reap`.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Inserts or overwrites the entry for `key`, stamping it with the current
    /// instant. An overwrite resets the entry's age.
    pub fn add(&mut self, key: String, payload: Bytes) {
        self.entries.insert(key, CacheEntry::new(payload));
    }

    // == Get ==
    /// Returns the payload stored under `key`, if any.
    ///
    /// Does not look at the entry's age. A stale entry that has not been
    /// swept yet is still returned.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.entries.get(key).map(|entry| entry.payload.clone())
    }

    // == Reap ==
    /// Removes every entry older than `ttl` at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn reap(&mut self, now: Instant, ttl: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(now, ttl));
        before - self.entries.len()
    }

    // == Entries ==
    /// Lists the current entries, sorted by key, for diagnostics.
    pub fn entries(&self, now: Instant) -> Vec<EntrySnapshot> {
        let mut snapshots: Vec<EntrySnapshot> = self
            .entries
            .iter()
            .map(|(key, entry)| EntrySnapshot {
                key: key.clone(),
                size: entry.size(),
                age_ms: entry.age_at(now).as_millis() as u64,
            })
            .collect();
        snapshots.sort_by(|a, b| a.key.cmp(&b.key));
        snapshots
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Entry Snapshot ==
/// Diagnostic view of a single entry. Carries no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    pub key: String,
    /// Payload length in bytes
    pub size: usize,
    /// Time since the entry was last written
    pub age_ms: u64,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn payload(value: &'static str) -> Bytes {
        Bytes::from_static(value.as_bytes())
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_add_and_get() {
        let mut store = CacheStore::new();

        store.add("key1".to_string(), payload("value1"));

        assert_eq!(store.get("key1"), Some(payload("value1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = CacheStore::new();
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new();

        store.add("key1".to_string(), payload("value1"));
        store.add("key1".to_string(), payload("value2"));

        assert_eq!(store.get("key1"), Some(payload("value2")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_empty_key_and_payload() {
        let mut store = CacheStore::new();

        store.add(String::new(), Bytes::new());

        assert_eq!(store.get(""), Some(Bytes::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_overwrite_resets_age() {
        let mut store = CacheStore::new();
        let ttl = Duration::from_millis(100);

        store.add("key1".to_string(), payload("value1"));
        tokio::time::advance(Duration::from_millis(80)).await;
        store.add("key1".to_string(), payload("value2"));
        tokio::time::advance(Duration::from_millis(80)).await;

        // 160ms since the first write, 80ms since the second
        assert_eq!(store.reap(Instant::now(), ttl), 0);
        assert_eq!(store.get("key1"), Some(payload("value2")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_reap_removes_only_stale() {
        let mut store = CacheStore::new();
        let ttl = Duration::from_millis(100);

        store.add("old".to_string(), payload("a"));
        tokio::time::advance(Duration::from_millis(60)).await;
        store.add("new".to_string(), payload("b"));
        tokio::time::advance(Duration::from_millis(60)).await;

        let removed = store.reap(Instant::now(), ttl);

        assert_eq!(removed, 1);
        assert_eq!(store.get("old"), None);
        assert_eq!(store.get("new"), Some(payload("b")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_does_not_evict_stale_entry() {
        let mut store = CacheStore::new();

        store.add("key1".to_string(), payload("value1"));
        tokio::time::advance(Duration::from_secs(3600)).await;

        assert_eq!(store.get("key1"), Some(payload("value1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_reap_empty() {
        let mut store = CacheStore::new();
        assert_eq!(store.reap(Instant::now(), Duration::ZERO), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_entries_snapshot() {
        let mut store = CacheStore::new();

        store.add("b".to_string(), payload("22"));
        tokio::time::advance(Duration::from_millis(40)).await;
        store.add("a".to_string(), payload("1"));

        let entries = store.entries(Instant::now());

        assert_eq!(
            entries,
            vec![
                EntrySnapshot {
                    key: "a".to_string(),
                    size: 1,
                    age_ms: 0,
                },
                EntrySnapshot {
                    key: "b".to_string(),
                    size: 2,
                    age_ms: 40,
                },
            ]
        );
    }
}
