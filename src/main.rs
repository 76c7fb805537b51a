use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use wids_extractor::{Collector, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wids_extractor=info".into()),
        )
        .init();

    info!("WIDS feature extractor starting...");

    let config = Arc::new(Config::from_env().context("Failed to load configuration")?);

    info!(
        kismet_url = %config.kismet_url,
        window_sec = config.kismet_window_sec,
        es_url = %config.es_url,
        index = %config.es_index,
        sensor_id = %config.sensor_id,
        sensor_site = %config.sensor_site,
        poll_interval_sec = config.poll_interval_sec,
        "Configuration loaded"
    );

    let collector = Collector::new(Arc::clone(&config))
        .context("Failed to initialize collector")?;
    let loop_handle = collector.start();

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c signal")?;
    info!("Shutdown signal received");

    loop_handle.abort();
    info!("WIDS feature extractor stopped");

    Ok(())
}
