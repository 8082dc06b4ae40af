// src/infrastructure/cache/mod.rs
// Metric cache stores: in-process with per-entry expiry, or Redis

mod redis_store;

pub use redis_store::RedisMetricCache;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::repository::MetricCacheRepository;

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Expired entries read as absent and are dropped on the next write.
pub struct InMemoryMetricCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Clock,
}

impl InMemoryMetricCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Remove every expired entry, returning how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let now = (self.clock)();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}

impl Default for InMemoryMetricCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricCacheRepository for InMemoryMetricCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = (self.clock)();
        let entries = self.entries.read().await;

        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone()))
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        if ttl_seconds == 0 {
            return Err(CacheError::Write(format!("ttl for {} must be positive", key)));
        }
        let ttl = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| CacheError::Write(format!("ttl {}s out of range", ttl_seconds)))?;

        let now = (self.clock)();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn manual_clock() -> (Arc<AtomicI64>, Clock) {
        let seconds = Arc::new(AtomicI64::new(1_700_000_000));
        let handle = seconds.clone();
        let clock: Clock = Arc::new(move || {
            DateTime::from_timestamp(handle.load(Ordering::SeqCst), 0).unwrap()
        });
        (seconds, clock)
    }

    #[tokio::test]
    async fn returns_value_until_expiry() {
        let (seconds, clock) = manual_clock();
        let cache = InMemoryMetricCache::with_clock(clock);

        cache.set_with_expiry("stock:AAPL:D", "{}", 3600).await.unwrap();
        assert_eq!(cache.get("stock:AAPL:D").await.unwrap().as_deref(), Some("{}"));

        seconds.fetch_add(3599, Ordering::SeqCst);
        assert!(cache.get("stock:AAPL:D").await.unwrap().is_some());

        seconds.fetch_add(1, Ordering::SeqCst);
        assert!(cache.get("stock:AAPL:D").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn writes_replace_whole_entries() {
        let cache = InMemoryMetricCache::new();

        cache.set_with_expiry("k", "old", 60).await.unwrap();
        cache.set_with_expiry("k", "new", 60).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("new"));
        assert_eq!(cache.purge_expired().await, 0);
    }

    #[tokio::test]
    async fn purges_expired_entries() {
        let (seconds, clock) = manual_clock();
        let cache = InMemoryMetricCache::with_clock(clock);

        cache.set_with_expiry("short", "a", 10).await.unwrap();
        cache.set_with_expiry("long", "b", 1000).await.unwrap();
        seconds.fetch_add(11, Ordering::SeqCst);

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.purge_expired().await, 0);
        assert!(cache.get("short").await.unwrap().is_none());
        assert!(cache.get("long").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn zero_ttl_is_rejected() {
        let cache = InMemoryMetricCache::new();

        assert!(matches!(
            cache.set_with_expiry("k", "v", 0).await,
            Err(CacheError::Write(_))
        ));
        assert!(cache.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_key_is_absent() {
        let cache = InMemoryMetricCache::new();
        assert!(cache.get("nope").await.unwrap().is_none());
    }
}
