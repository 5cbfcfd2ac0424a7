//! Attack Detection Panel - Agent Entry Point
//!
//! Env-configured loop: poll the analysis backend, reconcile, and log
//! every committed state. A real deployment hangs a renderer off
//! `PollScheduler::subscribe()` instead of this log sink.

use threat_panel::constants;
use threat_panel::panel::fetch::{FetchConfig, SnapshotFetcher};
use threat_panel::panel::scheduler::{PanelConfig, PollScheduler};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting attack detection panel v{}...", constants::APP_VERSION);

    let fetch_config = FetchConfig::default();
    let panel_config = PanelConfig::default();
    log::info!("  Backend: {}", fetch_config.api_url);
    log::info!("  Poll interval: {}ms", panel_config.poll_interval_ms);

    let fetcher = SnapshotFetcher::new(fetch_config);

    // Informational probe; the poll loop starts either way
    match fetcher.health_check().await {
        Ok(health) => log::info!(
            "Analysis backend healthy: {} (source: {})",
            health.version.as_deref().unwrap_or("unknown"),
            health.data_source.as_deref().unwrap_or("unknown")
        ),
        Err(e) => log::warn!("Analysis backend not reachable: {}", e),
    }

    let mut scheduler = PollScheduler::new(panel_config, fetcher);
    let mut renderer_rx = scheduler.subscribe();
    scheduler.start();

    loop {
        tokio::select! {
            changed = renderer_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = renderer_rx.borrow_and_update().clone();
                log::info!(
                    "Panel state: threat={} confidence={:.1}% dataset={}",
                    state.threat_level,
                    state.confidence_score,
                    state.dataset_info.display_label()
                );
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutting down panel...");
                scheduler.stop();
                break;
            }
        }
    }
}
