// src/infrastructure/pacing/mod.rs
// Sleep-based pacing before upstream fetches

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::service::PacingService;

/// Sleeps for the full delay on the calling task. Not shared between scans.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

#[async_trait]
impl PacingService for TokioPacer {
    async fn pace(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }

        log::trace!("Pacing upstream fetch for {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}
