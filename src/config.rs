//! Process configuration.
//!
//! All knobs come from the environment, are read exactly once at startup,
//! and are immutable afterwards. Components take `&Config` so they stay
//! independently testable — there are no ambient env lookups past this
//! module.

use crate::kismet::fields::SchemaLayout;
use anyhow::{Context, Result};

/// Immutable process-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Kismet REST API base URL.
    pub kismet_url: String,
    /// Relative activity window for the device query, in seconds.
    pub kismet_window_sec: u64,
    /// Device-record field layout, or `None` to probe the first record.
    pub kismet_schema: Option<SchemaLayout>,

    /// Elasticsearch base URL.
    pub es_url: String,
    /// Destination index for feature documents.
    pub es_index: String,
    /// Optional basic-auth credentials.
    pub es_username: Option<String>,
    pub es_password: Option<String>,
    /// Optional ingest pipeline applied to every bulk action.
    pub es_pipeline: Option<String>,
    /// Verify the sink's TLS certificate. Disable only for lab
    /// self-signed deployments.
    pub es_verify_certs: bool,

    /// Identity of this collecting node, stamped on every document.
    pub sensor_id: String,
    pub sensor_site: String,

    /// Seconds to sleep between poll cycles.
    pub poll_interval_sec: u64,
}

impl Config {
    /// Build the configuration from environment variables.
    ///
    /// Unset variables take the defaults below; a variable that is set but
    /// unparsable is a startup error — the only fatal error class in the
    /// program.
    pub fn from_env() -> Result<Self> {
        let kismet_url = std::env::var("KISMET_URL")
            .unwrap_or_else(|_| "http://localhost:2501".to_string());

        let kismet_window_sec: u64 = std::env::var("KISMET_WINDOW_SEC")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("KISMET_WINDOW_SEC must be a whole number of seconds")?;

        let kismet_schema = match std::env::var("KISMET_SCHEMA")
            .unwrap_or_else(|_| "auto".to_string())
            .as_str()
        {
            "auto" => None,
            "nested" => Some(SchemaLayout::Nested),
            "flat" => Some(SchemaLayout::Flattened),
            other => anyhow::bail!(
                "KISMET_SCHEMA must be one of auto|nested|flat, got {:?}",
                other
            ),
        };

        let es_url =
            std::env::var("ES_URL").unwrap_or_else(|_| "http://localhost:9200".to_string());

        let es_index =
            std::env::var("ES_INDEX").unwrap_or_else(|_| "wids-wireless-features".to_string());

        let es_username = std::env::var("ES_USERNAME").ok();
        let es_password = std::env::var("ES_PASSWORD").ok();
        let es_pipeline = std::env::var("ES_PIPELINE").ok();

        let es_verify_certs: bool = std::env::var("ES_VERIFY_CERTS")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .context("ES_VERIFY_CERTS must be true or false")?;

        let sensor_id = match std::env::var("SENSOR_ID") {
            Ok(id) => id,
            Err(_) => hostname::get()
                .context("SENSOR_ID unset and hostname lookup failed")?
                .to_string_lossy()
                .into_owned(),
        };

        let sensor_site = std::env::var("SENSOR_SITE").unwrap_or_else(|_| "lab".to_string());

        let poll_interval_sec: u64 = std::env::var("POLL_INTERVAL_SEC")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("POLL_INTERVAL_SEC must be a whole number of seconds")?;
        // A zero period would panic the interval timer inside the loop task;
        // reject it here where fatal errors are allowed.
        if poll_interval_sec == 0 {
            anyhow::bail!("POLL_INTERVAL_SEC must be at least 1 second");
        }

        Ok(Self {
            kismet_url,
            kismet_window_sec,
            kismet_schema,
            es_url,
            es_index,
            es_username,
            es_password,
            es_pipeline,
            es_verify_certs,
            sensor_id,
            sensor_site,
            poll_interval_sec,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The collection loop relies on a non-zero interval; a zero value must
    // die at startup instead of killing the loop task later.
    #[test]
    fn test_zero_poll_interval_is_startup_error() {
        std::env::set_var("POLL_INTERVAL_SEC", "0");
        let result = Config::from_env();
        std::env::remove_var("POLL_INTERVAL_SEC");

        let err = result.unwrap_err();
        assert!(
            err.to_string().contains("POLL_INTERVAL_SEC"),
            "got: {}",
            err
        );
    }
}
