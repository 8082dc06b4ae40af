// src/application/usecase/scan_usecase.rs
// VWAP snapback scan use case

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};

use crate::analysis::{compute_metrics, SnapbackFilter};
use crate::application::dto::ApplicationError;
use crate::application::service::DemoSampleTable;
use crate::domain::errors::CandleSourceResult;
use crate::domain::model::{
    CandleSeries, CandleStatus, MetricRecord, ScanRequest, ScanResult, TickerResolution,
};
use crate::domain::repository::{metric_cache_key, CandleRepository, MetricCacheRepository};
use crate::domain::service::PacingService;

/// Days of history fetched per ticker
pub const LOOKBACK_DAYS: i64 = 30;

/// Freshness window of cached metric records
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Scan use case
#[async_trait]
pub trait ScanUseCase: Send + Sync {
    /// Resolve, filter and collect every requested ticker in order. The first
    /// hard upstream failure aborts the whole scan.
    async fn run_scan(&self, request: ScanRequest) -> Result<ScanResult, ApplicationError>;
}

/// `[now - LOOKBACK_DAYS, now]` in epoch seconds
pub fn lookback_window(now: DateTime<Utc>) -> (i64, i64) {
    let from = now - ChronoDuration::days(LOOKBACK_DAYS);
    (from.timestamp(), now.timestamp())
}

pub struct ScanProcessor {
    candle_repository: Arc<dyn CandleRepository>,
    metric_cache: Arc<dyn MetricCacheRepository>,
    pacer: Arc<dyn PacingService>,
    demo_samples: DemoSampleTable,
    cache_ttl_secs: u64,
}

impl ScanProcessor {
    pub fn new(
        candle_repository: Arc<dyn CandleRepository>,
        metric_cache: Arc<dyn MetricCacheRepository>,
        pacer: Arc<dyn PacingService>,
    ) -> Self {
        Self {
            candle_repository,
            metric_cache,
            pacer,
            demo_samples: DemoSampleTable::default(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }

    pub fn with_cache_ttl(mut self, ttl_secs: u64) -> Self {
        self.cache_ttl_secs = ttl_secs;
        self
    }

    pub fn with_demo_samples(mut self, demo_samples: DemoSampleTable) -> Self {
        self.demo_samples = demo_samples;
        self
    }

    async fn resolve(
        &self,
        ticker: &str,
        request: &ScanRequest,
    ) -> CandleSourceResult<TickerResolution> {
        if request.demo_mode {
            return Ok(match self.demo_samples.lookup(ticker) {
                Some(record) => TickerResolution::Resolved(record),
                None => TickerResolution::NoData,
            });
        }

        let key = metric_cache_key(ticker, request.interval);
        if let Some(record) = self.read_cache(&key).await {
            log::debug!("Cache hit for {}", key);
            return Ok(TickerResolution::Resolved(record));
        }

        self.pacer.pace(request.pacing_delay).await;

        let (from, to) = lookback_window(Utc::now());
        let response = self
            .candle_repository
            .fetch_candles(ticker, request.interval, from, to)
            .await?;

        if response.status != CandleStatus::Ok || response.candles.is_empty() {
            return Ok(TickerResolution::NoData);
        }

        let series = CandleSeries::new(ticker, response.candles)?;
        let record = match compute_metrics(&series) {
            Some(record) => record,
            None => return Ok(TickerResolution::NoData),
        };

        self.write_cache(&key, &record).await;
        Ok(TickerResolution::Resolved(record))
    }

    /// Unavailable stores and unreadable entries count as misses.
    async fn read_cache(&self, key: &str) -> Option<MetricRecord> {
        let cached = match self.metric_cache.get(key).await {
            Ok(cached) => cached?,
            Err(e) => {
                log::warn!("Cache read for {} failed, fetching instead: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&cached) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Discarding unreadable cache entry {}: {}", key, e);
                None
            }
        }
    }

    async fn write_cache(&self, key: &str, record: &MetricRecord) {
        let value = match serde_json::to_string(record) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to serialize metrics for {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self
            .metric_cache
            .set_with_expiry(key, &value, self.cache_ttl_secs)
            .await
        {
            log::warn!("Cache write for {} failed: {}", key, e);
        }
    }
}

#[async_trait]
impl ScanUseCase for ScanProcessor {
    async fn run_scan(&self, request: ScanRequest) -> Result<ScanResult, ApplicationError> {
        log::info!(
            "Scanning {} tickers at interval {} (demo: {}, pacing: {:?})",
            request.tickers.len(),
            request.interval,
            request.demo_mode,
            request.pacing_delay
        );

        let filter = SnapbackFilter::new(request.min_volume);
        let mut results = Vec::new();

        for ticker in &request.tickers {
            let resolution = self.resolve(ticker, &request).await.map_err(|source| {
                log::error!("Aborting scan at {}: {}", ticker, source);
                ApplicationError::Ticker {
                    ticker: ticker.clone(),
                    source,
                }
            })?;

            match resolution {
                TickerResolution::Resolved(record) => match filter.apply(record) {
                    Some(record) => results.push(record),
                    None => log::debug!("{} did not pass the snapback filter", ticker),
                },
                TickerResolution::NoData => log::debug!("No data for {}, skipping", ticker),
            }
        }

        log::info!(
            "Scan finished: {} of {} tickers matched",
            results.len(),
            request.tickers.len()
        );

        Ok(ScanResult { results })
    }
}
