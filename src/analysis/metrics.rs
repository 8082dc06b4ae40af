// src/analysis/metrics.rs
// Derives the per-ticker metric record from a candle series

use crate::analysis::indicators::{calculate_sma_slope, calculate_vwap, trailing_average};
use crate::domain::model::{CandleSeries, MetricRecord};

/// Bars in the short moving average
pub const SMA_PERIOD: usize = 8;

/// Minute bars in one regular trading session
pub const BARS_PER_SESSION: usize = 390;

/// Sessions the average volume is scaled to
pub const SESSIONS_PER_WINDOW: f64 = 30.0;

/// Compute the metric record for `series`, or `None` when it holds no bars.
pub fn compute_metrics(series: &CandleSeries) -> Option<MetricRecord> {
    let last = series.last()?.close;

    let closes = series.close_prices();
    let volumes = series.volumes();

    let vwap = calculate_vwap(&closes, &volumes).unwrap_or(last);
    let sma8_slope = calculate_sma_slope(&closes, SMA_PERIOD);
    let avg_volume = trailing_average(&volumes, BARS_PER_SESSION) * SESSIONS_PER_WINDOW;

    Some(MetricRecord {
        ticker: series.ticker().to_string(),
        avg_vol_30d: avg_volume.max(0.0).round() as u64,
        last,
        vwap,
        sma8_slope,
        price_vwap_pct: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Candle;

    fn series(bars: &[(f64, f64)]) -> CandleSeries {
        let candles = bars
            .iter()
            .enumerate()
            .map(|(i, &(close, volume))| Candle {
                timestamp: 1_700_000_000 + i as i64 * 60,
                open: close,
                high: close,
                low: close,
                close,
                volume,
            })
            .collect();

        CandleSeries::new("TEST", candles).unwrap()
    }

    #[test]
    fn empty_series_has_no_metrics() {
        let empty = CandleSeries::new("TEST", Vec::new()).unwrap();
        assert!(compute_metrics(&empty).is_none());
    }

    #[test]
    fn single_bar() {
        let record = compute_metrics(&series(&[(42.0, 1_000.0)])).unwrap();

        assert_eq!(record.ticker, "TEST");
        assert_eq!(record.last, 42.0);
        assert_eq!(record.vwap, 42.0);
        assert_eq!(record.sma8_slope, 0.0);
        assert_eq!(record.avg_vol_30d, 30_000);
        assert!(record.price_vwap_pct.is_none());
    }

    #[test]
    fn zero_volume_falls_back_to_last_close() {
        let record = compute_metrics(&series(&[(10.0, 0.0), (12.0, 0.0)])).unwrap();

        assert_eq!(record.vwap, 12.0);
        assert_eq!(record.avg_vol_30d, 0);
    }

    #[test]
    fn slope_uses_last_two_eight_bar_windows() {
        let bars: Vec<(f64, f64)> = (1..=10).map(|i| (f64::from(i), 10.0)).collect();
        let record = compute_metrics(&series(&bars)).unwrap();

        // windows 2..=9 -> 5.5 and 3..=10 -> 6.5
        let expected = (6.5 - 5.5) / 6.5 * 100.0;
        assert!((record.sma8_slope - expected).abs() < 1e-6);
        assert_eq!(record.last, 10.0);
    }

    #[test]
    fn average_volume_uses_trailing_session() {
        let mut bars = vec![(100.0, 1_000_000.0); 10];
        bars.extend(std::iter::repeat((100.0, 2.0)).take(BARS_PER_SESSION));

        let record = compute_metrics(&series(&bars)).unwrap();

        assert_eq!(record.avg_vol_30d, 60);
    }

    #[test]
    fn same_series_same_record() {
        let bars: Vec<(f64, f64)> = (0..50)
            .map(|i| (100.0 + f64::from(i % 7), 1_000.0 + f64::from(i)))
            .collect();
        let s = series(&bars);

        assert_eq!(compute_metrics(&s), compute_metrics(&s));
    }
}
