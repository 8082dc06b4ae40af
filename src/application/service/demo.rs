// src/application/service/demo.rs
// Built-in sample records served in demo mode

use crate::domain::model::MetricRecord;

/// Fixed metric records keyed by ticker
#[derive(Debug, Clone)]
pub struct DemoSampleTable {
    records: Vec<MetricRecord>,
}

impl DemoSampleTable {
    pub fn new(records: Vec<MetricRecord>) -> Self {
        Self { records }
    }

    /// Case-insensitive lookup
    pub fn lookup(&self, ticker: &str) -> Option<MetricRecord> {
        self.records
            .iter()
            .find(|record| record.ticker.eq_ignore_ascii_case(ticker))
            .cloned()
    }
}

impl Default for DemoSampleTable {
    fn default() -> Self {
        Self::new(vec![
            MetricRecord {
                ticker: "AAPL".to_string(),
                avg_vol_30d: 12_000_000,
                last: 150.25,
                vwap: 149.00,
                sma8_slope: 0.02,
                price_vwap_pct: None,
            },
            MetricRecord {
                ticker: "MSFT".to_string(),
                avg_vol_30d: 15_000_000,
                last: 305.10,
                vwap: 302.50,
                sma8_slope: 0.01,
                price_vwap_pct: None,
            },
        ])
    }
}
