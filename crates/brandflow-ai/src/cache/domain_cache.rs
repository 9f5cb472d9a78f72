//! TTL cache for domain availability results.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CacheEntry {
    available: bool,
    cached_at: Instant,
}

/// TTL-based domain availability cache.
///
/// Keys are normalized fully-qualified domain strings. An entry older than
/// the TTL behaves as absent and is removed on the read path, so stale data
/// never accumulates between lookups.
#[derive(Debug)]
pub struct DomainCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl DomainCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Get a cached availability result.
    ///
    /// Expired entries are purged here rather than on a timer; `get` takes
    /// the write lock for that reason.
    pub async fn get(&self, key: &str) -> Option<bool> {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.cached_at.elapsed() < self.ttl => Some(entry.available),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store an availability result with a fresh timestamp.
    pub async fn set(&self, key: impl Into<String>, available: bool) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.into(),
            CacheEntry {
                available,
                cached_at: Instant::now(),
            },
        );
    }

    /// Number of entries currently held, including not-yet-purged stale ones.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every expired entry.
    pub async fn purge_expired(&self) {
        let mut entries = self.entries.write().await;
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.cached_at.elapsed() < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_after_set_returns_stored_value() {
        let cache = DomainCache::new(Duration::from_secs(60));
        cache.set("lumina.com", false).await;
        cache.set("lumina.ai", true).await;

        assert_eq!(cache.get("lumina.com").await, Some(false));
        assert_eq!(cache.get("lumina.ai").await, Some(true));
        assert_eq!(cache.get("lumina.io").await, None);
    }

    #[tokio::test]
    async fn expired_entries_are_absent_and_removed() {
        let cache = DomainCache::new(Duration::from_millis(10));
        cache.set("lumina.com", true).await;
        assert_eq!(cache.len().await, 1);

        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(cache.get("lumina.com").await, None);
        // The read purged the stale entry.
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn purge_expired_drops_only_stale_entries() {
        let cache = DomainCache::new(Duration::from_millis(30));
        cache.set("old.com", true).await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.set("fresh.com", true).await;

        cache.purge_expired().await;
        assert_eq!(cache.get("fresh.com").await, Some(true));
        assert_eq!(cache.len().await, 1);
    }
}
