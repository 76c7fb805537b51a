//! Upstream collaborator: the Kismet device-inventory API.

pub mod client;
pub mod fields;

pub use client::KismetClient;
pub use fields::{DeviceField, FieldAdapter, SchemaLayout};
