// src/domain/model/mod.rs
// Core domain models

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{MarketDataError, MarketDataResult};

/// Candle resolution, using the provider's resolution codes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1")]
    OneMinute,
    #[serde(rename = "5")]
    FiveMinutes,
    #[serde(rename = "15")]
    FifteenMinutes,
    #[serde(rename = "30")]
    ThirtyMinutes,
    #[serde(rename = "60")]
    OneHour,
    #[serde(rename = "D")]
    Daily,
    #[serde(rename = "W")]
    Weekly,
    #[serde(rename = "M")]
    Monthly,
}

impl Interval {
    pub const ALL: [Interval; 8] = [
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::ThirtyMinutes,
        Interval::OneHour,
        Interval::Daily,
        Interval::Weekly,
        Interval::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1",
            Interval::FiveMinutes => "5",
            Interval::FifteenMinutes => "15",
            Interval::ThirtyMinutes => "30",
            Interval::OneHour => "60",
            Interval::Daily => "D",
            Interval::Weekly => "W",
            Interval::Monthly => "M",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(interval) = Interval::ALL.iter().find(|i| i.as_str() == s) {
            return Ok(*interval);
        }

        // "1M" is not an alias, it reads as both minute and month
        match s {
            "1m" | "1min" => Ok(Interval::OneMinute),
            "5m" | "5min" => Ok(Interval::FiveMinutes),
            "15m" | "15min" => Ok(Interval::FifteenMinutes),
            "30m" | "30min" => Ok(Interval::ThirtyMinutes),
            "1h" | "1H" | "60m" => Ok(Interval::OneHour),
            "1d" | "1D" | "daily" => Ok(Interval::Daily),
            "1w" | "1W" | "weekly" => Ok(Interval::Weekly),
            "1mo" | "monthly" => Ok(Interval::Monthly),
            _ => Err(MarketDataError::UnsupportedInterval(s.to_string())),
        }
    }
}

/// One OHLCV bar, timestamp in epoch seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Time-ordered bars for one ticker. Timestamps are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    ticker: String,
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(ticker: &str, candles: Vec<Candle>) -> MarketDataResult<Self> {
        for (index, pair) in candles.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(MarketDataError::OutOfOrder {
                    index: index + 1,
                    previous: pair[0].timestamp,
                    current: pair[1].timestamp,
                });
            }
        }

        Ok(Self {
            ticker: ticker.to_string(),
            candles,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn close_prices(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}

/// Provider-reported status of a candle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleStatus {
    Ok,
    Error,
}

/// Raw answer of the candle source before validation
#[derive(Debug, Clone, PartialEq)]
pub struct CandleResponse {
    pub status: CandleStatus,
    pub candles: Vec<Candle>,
}

impl CandleResponse {
    pub fn ok(candles: Vec<Candle>) -> Self {
        Self {
            status: CandleStatus::Ok,
            candles,
        }
    }

    pub fn no_data() -> Self {
        Self {
            status: CandleStatus::Error,
            candles: Vec::new(),
        }
    }
}

/// Per-ticker metric snapshot. `price_vwap_pct` is only set once the record
/// passed the snapback filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub ticker: String,
    #[serde(rename = "avgVol30d")]
    pub avg_vol_30d: u64,
    pub last: f64,
    pub vwap: f64,
    #[serde(rename = "sma8Slope")]
    pub sma8_slope: f64,
    #[serde(
        rename = "priceVwapPct",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub price_vwap_pct: Option<f64>,
}

impl MetricRecord {
    pub fn with_price_vwap_pct(self, price_vwap_pct: f64) -> Self {
        Self {
            price_vwap_pct: Some(price_vwap_pct),
            ..self
        }
    }
}

/// Outcome of resolving one ticker. Hard failures travel in the surrounding `Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum TickerResolution {
    Resolved(MetricRecord),
    NoData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    /// Upper-cased, non-empty ticker symbols in caller order
    pub tickers: Vec<String>,
    pub min_volume: u64,
    pub interval: Interval,
    pub demo_mode: bool,
    pub pacing_delay: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub results: Vec<MetricRecord>,
}
