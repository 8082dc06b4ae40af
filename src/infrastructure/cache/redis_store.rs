// src/infrastructure/cache/redis_store.rs
// Redis-backed metric cache shared across scanner processes

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, RedisError};

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::repository::MetricCacheRepository;

/// Metric cache on a Redis server. Entries expire server-side via `SET .. EX`.
pub struct RedisMetricCache {
    connection: ConnectionManager,
}

impl RedisMetricCache {
    /// Open `url` (e.g. "redis://redis:6379/0") and establish the managed connection
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = Client::open(url).map_err(unavailable)?;
        let connection = ConnectionManager::new(client).await.map_err(unavailable)?;

        log::info!("Connected to Redis metric cache");
        Ok(Self { connection })
    }
}

fn unavailable(e: RedisError) -> CacheError {
    CacheError::Unavailable(e.to_string())
}

/// Lost or refused connections mean the store is down; anything else is the
/// server rejecting this particular write.
fn write_error(e: RedisError) -> CacheError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout() {
        unavailable(e)
    } else {
        CacheError::Write(e.to_string())
    }
}

#[async_trait]
impl MetricCacheRepository for RedisMetricCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut connection = self.connection.clone();

        redis::cmd("GET")
            .arg(key)
            .query_async::<_, Option<String>>(&mut connection)
            .await
            .map_err(unavailable)
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        if ttl_seconds == 0 {
            return Err(CacheError::Write(format!("ttl for {} must be positive", key)));
        }
        let mut connection = self.connection.clone();

        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl_seconds)
            .query_async::<_, ()>(&mut connection)
            .await
            .map_err(write_error)
    }
}
