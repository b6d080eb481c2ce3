use std::sync::Arc;

use tokio::time::{Duration, interval};

use crate::normalize::NormalizerMetrics;

const REPORT_INTERVAL_SECS: u64 = 60 * 60;

/// Periodically reports how many image entries and records the normalizer
/// has dropped since startup. Drops are silent at request time; this keeps
/// them visible in the logs.
pub async fn start_metrics_report_task(metrics: Arc<NormalizerMetrics>) {
    let mut interval = interval(Duration::from_secs(REPORT_INTERVAL_SECS));

    loop {
        interval.tick().await;

        let snapshot = metrics.snapshot();
        if snapshot.images_dropped > 0 || snapshot.records_skipped > 0 {
            tracing::info!(
                images_dropped = snapshot.images_dropped,
                records_skipped = snapshot.records_skipped,
                "Normalizer drop counters"
            );
        }
    }
}
