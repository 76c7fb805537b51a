//! Feature document construction.
//!
//! Maps one raw Kismet device record into the canonical per-BSSID feature
//! document indexed into Elasticsearch. Construction is all-or-nothing: a
//! device without a hardware address yields no document at all, and every
//! other attribute is independently optional.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::entropy::shannon_entropy;
use crate::kismet::{DeviceField, FieldAdapter};
use crate::timefmt::epoch_to_utc;

/// Static identity of the collecting node, stamped on every document.
#[derive(Debug, Clone)]
pub struct SensorIdentity {
    pub id: String,
    pub site: String,
}

/// One per-BSSID feature document.
///
/// Field names follow the index mapping (dotted ECS-style keys); optional
/// attributes are omitted from the serialized document rather than
/// emitted as nulls. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    /// Device last-seen time when the source reported one, else the
    /// collection cycle's start time.
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "sensor.id")]
    pub sensor_id: String,
    #[serde(rename = "sensor.site")]
    pub sensor_site: String,

    pub bssid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    pub ssid_entropy: f64,

    // Pass-through attributes: whatever type the source used is kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manuf: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phyname: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi_last: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi_mean: Option<f64>,

    pub client_count: u64,

    // Reserved for future deauth/probe tracking; nothing populates these
    // yet and they never serialize.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deauth_count_approx: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_req_count_approx: Option<u64>,
}

/// Build the feature document for one device, or `None` when the device
/// carries no hardware address (non-802.11 sources such as SDR captures).
///
/// `cycle_time` is the collection cycle's start instant; it is the
/// fallback for the document timestamp when the device has no usable
/// last-seen epoch.
pub fn build_feature_record(
    device: &Value,
    adapter: &FieldAdapter,
    sensor: &SensorIdentity,
    cycle_time: DateTime<Utc>,
) -> Option<FeatureRecord> {
    let bssid = adapter.string(device, DeviceField::MacAddr)?;

    let ssid = adapter.string(device, DeviceField::Name);
    let ssid_entropy = ssid.as_deref().map(shannon_entropy).unwrap_or(0.0);

    let first_time = adapter.resolve(device, DeviceField::FirstTime);
    let last_time = adapter.resolve(device, DeviceField::LastTime);

    let timestamp = match last_time {
        Some(v) => epoch_to_utc(Some(v), cycle_time),
        None => cycle_time,
    };

    Some(FeatureRecord {
        timestamp,
        sensor_id: sensor.id.clone(),
        sensor_site: sensor.site.clone(),
        bssid,
        ssid,
        ssid_entropy,
        manuf: adapter.raw(device, DeviceField::Manufacturer),
        channel: adapter.raw(device, DeviceField::Channel),
        phyname: adapter.raw(device, DeviceField::PhyName),
        first_seen: first_time.map(|v| epoch_to_utc(Some(v), cycle_time)),
        last_seen: last_time.map(|v| epoch_to_utc(Some(v), cycle_time)),
        rssi_last: adapter.number(device, DeviceField::SignalLast),
        rssi_min: adapter.number(device, DeviceField::SignalMin),
        rssi_max: adapter.number(device, DeviceField::SignalMax),
        rssi_mean: adapter.number(device, DeviceField::SignalAvg),
        client_count: adapter.integer(device, DeviceField::ClientCount).unwrap_or(0),
        deauth_count_approx: None,
        probe_req_count_approx: None,
    })
}
