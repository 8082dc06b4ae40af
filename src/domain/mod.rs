// src/domain/mod.rs
pub mod errors;
pub mod model;
pub mod repository;
pub mod service;

// Re-export common types for convenience
pub use errors::{
    AnalysisError, AppError, AppResult, CacheError, CandleSourceError, MarketDataError,
};
pub use model::{
    Candle, CandleResponse, CandleSeries, CandleStatus, Interval, MetricRecord, ScanRequest,
    ScanResult, TickerResolution,
};
