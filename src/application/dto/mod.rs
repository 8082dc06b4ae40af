// src/application/dto/mod.rs
// Wire-level request/response types and the use-case error

pub mod parser;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::errors::CandleSourceError;
use crate::domain::model::{Interval, ScanRequest};

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Invalid scan request: {0}")]
    Validation(String),

    #[error("Error processing {ticker}: {source}")]
    Ticker {
        ticker: String,
        source: CandleSourceError,
    },

    #[error("Scan timed out after {0:?}")]
    Timeout(Duration),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Body of `POST /scan`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequestDto {
    pub tickers: Vec<String>,
    pub min_volume: u64,
    pub interval: String,
    #[serde(default)]
    pub demo_mode: bool,
    /// Milliseconds to wait before each upstream fetch
    #[serde(default)]
    pub pacing_delay: u64,
}

impl TryFrom<ScanRequestDto> for ScanRequest {
    type Error = ApplicationError;

    fn try_from(dto: ScanRequestDto) -> Result<Self, Self::Error> {
        if dto.tickers.is_empty() {
            return Err(ApplicationError::Validation(
                "tickers must not be empty".to_string(),
            ));
        }

        let tickers = dto
            .tickers
            .iter()
            .enumerate()
            .map(|(i, ticker)| {
                let ticker = ticker.trim();
                if ticker.is_empty() {
                    Err(ApplicationError::Validation(format!(
                        "ticker at position {} is blank",
                        i
                    )))
                } else {
                    Ok(ticker.to_uppercase())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let interval: Interval = dto
            .interval
            .parse()
            .map_err(|e| ApplicationError::Validation(format!("{}", e)))?;

        Ok(ScanRequest {
            tickers,
            min_volume: dto.min_volume,
            interval,
            demo_mode: dto.demo_mode,
            pacing_delay: Duration::from_millis(dto.pacing_delay),
        })
    }
}

/// Error body returned by the HTTP adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub detail: String,
}

/// Candle provider payload: parallel columns plus a status flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandlePayload {
    #[serde(rename = "s")]
    pub status: String,
    #[serde(rename = "t", default)]
    pub timestamps: Vec<i64>,
    #[serde(rename = "o", default)]
    pub open: Vec<f64>,
    #[serde(rename = "h", default)]
    pub high: Vec<f64>,
    #[serde(rename = "l", default)]
    pub low: Vec<f64>,
    #[serde(rename = "c", default)]
    pub close: Vec<f64>,
    #[serde(rename = "v", default)]
    pub volume: Vec<f64>,
}
