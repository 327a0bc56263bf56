use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

struct CacheEntry {
    height: u64,
    fetched_at: Instant,
}

/// Per-network cache of the archive's reported chain height.
///
/// Height lookups back range-validity checks and get issued often, so a
/// short TTL keeps them off the wire. Concurrent callers may duplicate a
/// fetch inside the staleness window; the stored value never goes
/// backwards past the TTL.
pub struct HeightCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl HeightCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: Mutex::new(HashMap::new()) }
    }

    /// Returns the cached height for `network` if it is still fresh.
    pub async fn get(&self, network: &str) -> Option<u64> {
        let entries = self.entries.lock().await;
        entries
            .get(network)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.height)
    }

    pub async fn insert(&self, network: &str, height: u64) {
        let mut entries = self.entries.lock().await;
        entries.insert(network.to_string(), CacheEntry { height, fetched_at: Instant::now() });
    }
}
