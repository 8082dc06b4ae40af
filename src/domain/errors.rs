// src/domain/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(#[from] hyper::Error),
}

/// Failures talking to the upstream candle provider. Any of these aborts a scan.
#[derive(Error, Debug)]
pub enum CandleSourceError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Response(#[from] MarketDataError),
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Cache write rejected: {0}")]
    Write(String),
}

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Data parse error: {0}")]
    Parse(String),

    #[error("Unsupported interval: {0}")]
    UnsupportedInterval(String),

    #[error("Timestamps not strictly increasing at index {index}: {previous} -> {current}")]
    OutOfOrder {
        index: usize,
        previous: i64,
        current: i64,
    },
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Indicator calculation error: {0}")]
    IndicatorCalculation(String),

    #[error("Insufficient data for analysis: {0}")]
    InsufficientData(String),
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type CandleSourceResult<T> = Result<T, CandleSourceError>;
pub type CacheResult<T> = Result<T, CacheError>;
pub type MarketDataResult<T> = Result<T, MarketDataError>;
pub type AnalysisResult<T> = Result<T, AnalysisError>;
