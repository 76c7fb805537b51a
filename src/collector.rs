//! Poll-transform-deliver cycle driver.
//!
//! `run_cycle` does exactly one fetch → transform → deliver pass and
//! reports what happened as an explicit outcome type, so tests never have
//! to wait on real timers and logs can tell a fetch failure from a
//! delivery failure. `start` owns the interval and runs cycles forever:
//! every in-cycle error is recoverable by design, and the only sanctioned
//! stop is process shutdown.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::features::{build_feature_record, FeatureRecord, SensorIdentity};
use crate::kismet::{FieldAdapter, KismetClient};
use crate::sink::EsSink;

/// What one successful cycle did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Devices returned by the fetch.
    pub fetched: usize,
    /// Documents accepted by the sink.
    pub indexed: usize,
    /// Devices dropped for lacking a hardware address.
    pub dropped: usize,
}

/// Why a cycle failed. Either way the loop sleeps and tries again next
/// interval — there is no in-cycle retry.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("fetch failed: {0}")]
    Fetch(#[source] anyhow::Error),
    #[error("delivery failed: {0}")]
    Deliver(#[source] anyhow::Error),
}

/// Owns the collaborators and drives the poll cycle.
pub struct Collector {
    config: Arc<Config>,
    kismet: KismetClient,
    sink: EsSink,
    sensor: SensorIdentity,
}

impl Collector {
    pub fn new(config: Arc<Config>) -> anyhow::Result<Self> {
        let kismet = KismetClient::new(config.kismet_url.clone(), config.kismet_window_sec)?;
        let sink = EsSink::new(&config)?;
        let sensor = SensorIdentity {
            id: config.sensor_id.clone(),
            site: config.sensor_site.clone(),
        };
        Ok(Self {
            config,
            kismet,
            sink,
            sensor,
        })
    }

    /// Run exactly one poll-transform-deliver cycle.
    ///
    /// A device that fails the mandatory-attribute check is dropped and
    /// counted, never fatal. An empty batch skips delivery entirely.
    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        let cycle_time = Utc::now();

        let devices = self
            .kismet
            .fetch_devices()
            .await
            .map_err(CycleError::Fetch)?;

        // Layout comes from config when pinned, else is probed from the
        // first record of this fetch.
        let adapter = match self.config.kismet_schema {
            Some(layout) => FieldAdapter::new(layout),
            None => match devices.first() {
                Some(first) => FieldAdapter::detect(first),
                None => {
                    debug!("No devices in window this cycle");
                    return Ok(CycleReport::default());
                }
            },
        };

        let mut batch: Vec<FeatureRecord> = Vec::with_capacity(devices.len());
        for device in &devices {
            if let Some(record) = build_feature_record(device, &adapter, &self.sensor, cycle_time)
            {
                batch.push(record);
            }
        }
        let dropped = devices.len() - batch.len();

        let indexed = if batch.is_empty() {
            debug!(fetched = devices.len(), "No qualifying devices this cycle");
            0
        } else {
            self.sink
                .bulk_index(&batch)
                .await
                .map_err(CycleError::Deliver)?
        };

        Ok(CycleReport {
            fetched: devices.len(),
            indexed,
            dropped,
        })
    }

    /// Start the polling loop (non-blocking).
    ///
    /// Sleeps the full configured interval between cycles whether the
    /// previous cycle succeeded or failed; errors are logged at the cycle
    /// boundary and never terminate the task. Returns a JoinHandle the
    /// caller aborts on shutdown.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        let interval_secs = self.config.poll_interval_sec;

        tokio::spawn(async move {
            info!(
                kismet_url = %self.config.kismet_url,
                window_sec = self.config.kismet_window_sec,
                es_url = %self.config.es_url,
                index = %self.config.es_index,
                interval_secs = interval_secs,
                "Starting collection loop"
            );

            let mut ticker = interval(Duration::from_secs(interval_secs));
            // A slow cycle must not cause a burst of immediate ticks; the
            // next fetch always waits a full interval.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                match self.run_cycle().await {
                    Ok(report) => info!(
                        fetched = report.fetched,
                        indexed = report.indexed,
                        dropped = report.dropped,
                        "Cycle complete"
                    ),
                    Err(e) => error!(error = %e, "Cycle failed, will retry next interval"),
                }
            }
        })
    }
}
