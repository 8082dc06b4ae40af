pub mod cache;
pub mod market;
pub mod pacing;

pub use cache::{InMemoryMetricCache, RedisMetricCache};
pub use market::HttpCandleRepository;
pub use pacing::TokioPacer;
