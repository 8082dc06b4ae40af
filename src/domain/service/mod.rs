// src/domain/service/mod.rs
// Domain service interfaces

use std::time::Duration;

use async_trait::async_trait;

/// Suspends the caller before an upstream fetch
#[async_trait]
pub trait PacingService: Send + Sync {
    async fn pace(&self, delay: Duration);
}
