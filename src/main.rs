// src/main.rs
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use vwap_scanner::adapter::{serve, ScanHandler};
use vwap_scanner::application::usecase::ScanProcessor;
use vwap_scanner::config::Config;
use vwap_scanner::domain::errors::AppResult;
use vwap_scanner::domain::repository::MetricCacheRepository;
use vwap_scanner::infrastructure::{
    HttpCandleRepository, InMemoryMetricCache, RedisMetricCache, TokioPacer,
};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    config.init_logging()?;

    log::info!("Starting vwap_scanner v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using candle provider at {}", config.provider.base_url);

    let candle_repository = Arc::new(HttpCandleRepository::new(
        &config.provider.base_url,
        config.provider.api_key.clone(),
    ));

    let (metric_cache, purge_task): (Arc<dyn MetricCacheRepository>, Option<JoinHandle<()>>) =
        match &config.cache.redis_url {
            Some(url) => (Arc::new(RedisMetricCache::connect(url).await?), None),
            None => {
                log::info!("REDIS_URL not set, caching metrics in process");
                let cache = Arc::new(InMemoryMetricCache::new());
                let purge = spawn_purge(cache.clone(), config.cache.ttl_secs);
                (cache, Some(purge))
            }
        };

    let processor = ScanProcessor::new(candle_repository, metric_cache, Arc::new(TokioPacer))
        .with_cache_ttl(config.cache.ttl_secs);

    let handler = Arc::new(ScanHandler::new(
        Arc::new(processor),
        config.server.scan_timeout(),
    ));

    let addr = config.server.socket_addr()?;
    serve(addr, handler, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for shutdown signal: {}", e);
        }
        log::info!("Shutting down...");
    })
    .await?;

    if let Some(task) = purge_task {
        task.abort();
    }
    log::info!("Shutdown complete. Goodbye!");
    Ok(())
}

// Expired entries are only dropped on write otherwise
fn spawn_purge(cache: Arc<InMemoryMetricCache>, ttl_secs: u64) -> JoinHandle<()> {
    let every = Duration::from_secs(ttl_secs.max(1));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let purged = cache.purge_expired().await;
            if purged > 0 {
                log::debug!("Purged {} expired cache entries", purged);
            }
        }
    })
}
