// src/analysis/filter.rs
// VWAP snapback screen

use crate::domain::model::MetricRecord;

/// Price has to sit this fraction above VWAP
pub const DEFAULT_VWAP_PREMIUM: f64 = 0.005;

/// Largest absolute SMA slope, in percentage points
pub const DEFAULT_MAX_ABS_SLOPE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapbackFilter {
    pub min_volume: u64,
    pub vwap_premium: f64,
    pub max_abs_slope: f64,
}

impl SnapbackFilter {
    pub fn new(min_volume: u64) -> Self {
        Self {
            min_volume,
            vwap_premium: DEFAULT_VWAP_PREMIUM,
            max_abs_slope: DEFAULT_MAX_ABS_SLOPE,
        }
    }

    /// A non-positive VWAP never passes.
    pub fn passes(&self, record: &MetricRecord) -> bool {
        record.vwap > 0.0
            && record.avg_vol_30d >= self.min_volume
            && record.last >= (1.0 + self.vwap_premium) * record.vwap
            && record.sma8_slope.abs() <= self.max_abs_slope
    }

    /// Returns the record enriched with its price/VWAP deviation if it passes.
    pub fn apply(&self, record: MetricRecord) -> Option<MetricRecord> {
        if !self.passes(&record) {
            return None;
        }

        let pct = price_vwap_pct(record.last, record.vwap);
        Some(record.with_price_vwap_pct(pct))
    }
}

/// Percentage distance of `last` from `vwap`
pub fn price_vwap_pct(last: f64, vwap: f64) -> f64 {
    (last - vwap) / vwap * 100.0
}
