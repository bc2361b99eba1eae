//! Background worker for periodic ticket promotion.

use std::{sync::Arc, time::Duration};

use tokio::time::MissedTickBehavior;
use tracing::info;

use super::services::PromotionScanner;

/// Runs [`PromotionScanner::scan_once`] on a fixed interval for the life of the process.
///
/// The first tick fires immediately, so a scan runs at startup. Each scan is awaited
/// before the next tick is taken, and ticks missed while scanning are skipped, so
/// scans never overlap.
pub async fn run_promotion_worker(scanner: Arc<PromotionScanner>, interval: Duration) {
    info!(
        interval_secs = interval.as_secs(),
        "Promotion worker background task started"
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let stats = scanner.scan_once().await;
        info!(
            promoted = stats.promoted,
            reindexed = stats.reindexed,
            skipped = stats.skipped,
            failed = stats.failed,
            "Promotion cycle completed"
        );
    }
}
