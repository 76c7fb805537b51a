//! WIDS feature extractor - Kismet to Elasticsearch, no intermediary.
//!
//! Polls a Kismet sensor's REST API for recently-active wireless devices,
//! derives per-BSSID features (SSID entropy, RSSI statistics, channel,
//! client count), and bulk-indexes the resulting documents directly into
//! Elasticsearch. Designed to run unattended next to Kismet on a small
//! sensor node.
//!
//! # Architecture
//!
//! ```text
//! Kismet REST API (/devices/last-time/-N/devices.json)
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │       KismetClient                       │
//! │  - Fetch devices in activity window      │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │  FieldAdapter + feature builder          │
//! │  - Resolve nested / flattened layouts    │
//! │  - Skip devices without a BSSID          │
//! │  - SSID entropy, timestamp fallback      │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │       Collector                          │
//! │  - One cycle per poll interval           │
//! │  - Errors isolated at cycle boundary     │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │       EsSink                             │
//! │  - One _bulk request per batch           │
//! └─────────────────────────────────────────┘
//!          ↓
//!     Elasticsearch index
//! ```
//!
//! # Core Types
//!
//! - [`Config`] - Immutable process configuration from the environment
//! - [`FeatureRecord`] - Canonical per-BSSID feature document
//! - [`FieldAdapter`] - Layout-tolerant device field resolution
//! - [`Collector`] - Poll-transform-deliver cycle driver

pub mod collector;
pub mod config;
pub mod entropy;
pub mod features;
pub mod kismet;
pub mod sink;
pub mod timefmt;

// Re-export public types
pub use collector::{Collector, CycleError, CycleReport};
pub use config::Config;
pub use features::{build_feature_record, FeatureRecord, SensorIdentity};
pub use kismet::{DeviceField, FieldAdapter, KismetClient, SchemaLayout};
pub use sink::EsSink;
