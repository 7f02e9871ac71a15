use crate::AppState;
use aiseek_core::IngestReport;
use anyhow::Result;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Crawl one batch and publish a rebuilt index containing it.
///
/// Crawl I/O happens before any index lock is taken; the rebuild itself runs on
/// the blocking pool and becomes visible to readers in a single swap.
pub async fn refresh_once(state: &AppState) -> Result<IngestReport> {
    let next_id = state.service.snapshot().store.next_id();
    let batch = state.crawler.crawl(state.crawl_limit, next_id).await;
    let service = state.service.clone();
    let report = tokio::task::spawn_blocking(move || service.ingest(batch)).await?;
    let mut status = state.refresh_status.write();
    status.refreshes += 1;
    status.last_added = report.added;
    Ok(report)
}

/// Periodic re-crawl; the first run happens one full `period` after spawning.
pub fn spawn_refresh_loop(state: AppState, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match refresh_once(&state).await {
                Ok(report) => tracing::info!(added = report.added, num_docs = report.total_documents, "scheduled refresh complete"),
                Err(err) => tracing::error!(error = %format!("{err:#}"), "scheduled refresh failed"),
            }
        }
    })
}
