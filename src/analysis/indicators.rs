use crate::domain::errors::{AnalysisError, AnalysisResult};
use ta::indicators::SimpleMovingAverage;
use ta::Next;

/// Simple Moving Average (SMA)
///
/// Returns one value per full window, so the output has
/// `prices.len() - period + 1` entries.
pub fn calculate_sma(prices: &[f64], period: usize) -> AnalysisResult<Vec<f64>> {
    if prices.len() < period {
        return Err(AnalysisError::InsufficientData(format!(
            "Not enough data for SMA calculation. Need at least {} points, got {}",
            period,
            prices.len()
        )));
    }

    let mut sma = SimpleMovingAverage::new(period)
        .map_err(|e| AnalysisError::IndicatorCalculation(format!("{:?}", e)))?;

    // Warm-up outputs average a partial window and are dropped
    let result = prices
        .iter()
        .map(|&price| sma.next(price))
        .skip(period - 1)
        .collect();

    Ok(result)
}

/// Volume Weighted Average Price over the whole slice
///
/// Falls back to the last price when no volume traded. Returns `None` for
/// empty or mismatched input.
pub fn calculate_vwap(prices: &[f64], volumes: &[f64]) -> Option<f64> {
    if prices.is_empty() || prices.len() != volumes.len() {
        return None;
    }

    let (weighted, total_volume) = prices
        .iter()
        .zip(volumes)
        .fold((0.0, 0.0), |(weighted, total), (price, volume)| {
            (weighted + price * volume, total + volume)
        });

    if total_volume == 0.0 {
        return prices.last().copied();
    }

    Some(weighted / total_volume)
}

/// Percentage change between the last two SMA values, relative to the latest
///
/// Needs `period + 1` prices. Anything shorter, or a zero latest average,
/// reports a flat slope of 0.
pub fn calculate_sma_slope(prices: &[f64], period: usize) -> f64 {
    if prices.len() < period + 1 {
        return 0.0;
    }

    let sma = match calculate_sma(prices, period) {
        Ok(values) => values,
        Err(e) => {
            log::debug!("SMA slope unavailable: {}", e);
            return 0.0;
        }
    };

    let current = sma[sma.len() - 1];
    let previous = sma[sma.len() - 2];

    if current == 0.0 {
        return 0.0;
    }

    (current - previous) / current * 100.0
}

/// Mean of the trailing `window` volumes (all of them when fewer exist)
pub fn trailing_average(values: &[f64], window: usize) -> f64 {
    let start = values.len().saturating_sub(window);
    let tail = &values[start..];

    if tail.is_empty() {
        return 0.0;
    }

    tail.iter().sum::<f64>() / tail.len() as f64
}
