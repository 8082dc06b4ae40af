pub mod filter;
pub mod indicators;
pub mod metrics;

pub use filter::SnapbackFilter;
pub use metrics::compute_metrics;
