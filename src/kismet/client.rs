//! HTTP client for the Kismet REST API.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Bound on a single device-list request. One slow poll must not hang the
/// process past its next scheduled cycle.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the Kismet device-inventory endpoint.
///
/// Fetches devices seen within a relative time window using the documented
/// `/devices/last-time/{timestamp}/devices.json` endpoint, where a negative
/// timestamp means "seconds before now".
pub struct KismetClient {
    http_client: Client,
    base_url: String,
    window_sec: u64,
}

impl KismetClient {
    /// Create a client for the given base URL and activity window.
    pub fn new(base_url: String, window_sec: u64) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("Failed to build Kismet HTTP client")?;
        Ok(Self {
            http_client,
            base_url,
            window_sec,
        })
    }

    /// Fetch devices active within the configured window.
    ///
    /// Returns the raw device objects — field resolution is the
    /// [`FieldAdapter`](crate::kismet::fields::FieldAdapter)'s job.
    pub async fn fetch_devices(&self) -> Result<Vec<Value>> {
        let url = format!(
            "{}/devices/last-time/-{}/devices.json",
            self.base_url, self.window_sec
        );

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .context("Failed to send device-list request to Kismet")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Kismet API error: {}", status));
        }

        let devices: Vec<Value> = response
            .json()
            .await
            .context("Failed to parse Kismet device list (expected a JSON array)")?;

        Ok(devices)
    }
}
