// src/domain/repository/mod.rs
// Repository interfaces for the scan collaborators

use async_trait::async_trait;

use crate::domain::errors::{CacheResult, CandleSourceResult};
use crate::domain::model::{CandleResponse, Interval};

/// Upstream market-data provider
#[async_trait]
pub trait CandleRepository: Send + Sync {
    /// Fetch bars for `ticker` between two epoch-second bounds (inclusive).
    /// A provider-side "no data" answer is an `Ok` with a non-ok status.
    async fn fetch_candles(
        &self,
        ticker: &str,
        interval: Interval,
        from: i64,
        to: i64,
    ) -> CandleSourceResult<CandleResponse>;
}

/// Key-value store with per-entry expiry
#[async_trait]
pub trait MetricCacheRepository: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;
}

/// Cache key for a metric record of `ticker` at `interval`
pub fn metric_cache_key(ticker: &str, interval: Interval) -> String {
    format!("stock:{}:{}", ticker, interval)
}
