//! Device-record field resolution.
//!
//! Kismet has shipped two layouts for the device JSON: the classic nested
//! form, where everything hangs off a `"kismet.device.base"` sub-object
//! (with signal stats one level deeper under `"signal"`), and the
//! field-simplification form, where the same data arrives as a flat map of
//! dotted keys. The adapter hides that split behind logical attribute
//! names so the document builder never touches a raw key.
//!
//! Every attribute resolves to `Option<&Value>`; the hardware address is
//! the only one whose absence rejects a record, and that policy lives in
//! the builder, not here.

use serde_json::Value;

/// Logical device attributes the extractor cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceField {
    MacAddr,
    /// Display name. Resolution prefers the `name` key and silently falls
    /// back to `commonname` when it is absent.
    Name,
    Manufacturer,
    Channel,
    PhyName,
    FirstTime,
    LastTime,
    ClientCount,
    SignalLast,
    SignalMin,
    SignalMax,
    SignalAvg,
}

/// Which field layout a device record uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaLayout {
    /// `{"kismet.device.base": {"macaddr": ..., "signal": {...}}}`
    Nested,
    /// `{"kismet.device.base.macaddr": ..., "kismet.common.signal.last": ...}`
    Flattened,
}

/// Resolves logical attributes against one of the two known layouts.
#[derive(Clone, Copy, Debug)]
pub struct FieldAdapter {
    layout: SchemaLayout,
}

impl FieldAdapter {
    pub fn new(layout: SchemaLayout) -> Self {
        Self { layout }
    }

    /// Probe a record for its layout.
    ///
    /// A `"kismet.device.base"` key holding an object means the nested
    /// form; anything else is treated as flattened. Used once per fetch on
    /// the first record when no layout is configured.
    pub fn detect(device: &Value) -> Self {
        let nested = device
            .get("kismet.device.base")
            .map(Value::is_object)
            .unwrap_or(false);
        Self::new(if nested {
            SchemaLayout::Nested
        } else {
            SchemaLayout::Flattened
        })
    }

    pub fn layout(&self) -> SchemaLayout {
        self.layout
    }

    /// Resolve a logical attribute to its raw JSON value, if present.
    ///
    /// JSON `null` counts as absent — Kismet emits explicit nulls for
    /// fields it knows about but has no data for.
    pub fn resolve<'a>(&self, device: &'a Value, field: DeviceField) -> Option<&'a Value> {
        let value = match field {
            DeviceField::Name => self
                .base_field(device, "name")
                .or_else(|| self.base_field(device, "commonname")),
            DeviceField::MacAddr => self.base_field(device, "macaddr"),
            DeviceField::Manufacturer => self.base_field(device, "manuf"),
            DeviceField::Channel => self.base_field(device, "channel"),
            DeviceField::PhyName => self.base_field(device, "phyname"),
            DeviceField::FirstTime => self.base_field(device, "first_time"),
            DeviceField::LastTime => self.base_field(device, "last_time"),
            DeviceField::ClientCount => self.base_field(device, "num_clients"),
            DeviceField::SignalLast => self.signal_field(device, "last"),
            DeviceField::SignalMin => self.signal_field(device, "min"),
            DeviceField::SignalMax => self.signal_field(device, "max"),
            DeviceField::SignalAvg => self.signal_field(device, "avg"),
        };
        value.filter(|v| !v.is_null())
    }

    /// Resolve an attribute as a non-empty string.
    pub fn string(&self, device: &Value, field: DeviceField) -> Option<String> {
        self.resolve(device, field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Resolve an attribute as a float.
    pub fn number(&self, device: &Value, field: DeviceField) -> Option<f64> {
        self.resolve(device, field).and_then(Value::as_f64)
    }

    /// Resolve an attribute as a non-negative integer.
    pub fn integer(&self, device: &Value, field: DeviceField) -> Option<u64> {
        self.resolve(device, field).and_then(Value::as_u64)
    }

    /// Resolve an attribute as its raw JSON value, cloned.
    ///
    /// For pass-through fields (manufacturer, channel, phy) where the
    /// source's own typing must be preserved.
    pub fn raw(&self, device: &Value, field: DeviceField) -> Option<Value> {
        self.resolve(device, field).cloned()
    }

    fn base_field<'a>(&self, device: &'a Value, key: &str) -> Option<&'a Value> {
        match self.layout {
            SchemaLayout::Nested => device.get("kismet.device.base")?.get(key),
            SchemaLayout::Flattened => device.get(format!("kismet.device.base.{}", key)),
        }
    }

    fn signal_field<'a>(&self, device: &'a Value, key: &str) -> Option<&'a Value> {
        let full = format!("kismet.common.signal.{}", key);
        match self.layout {
            SchemaLayout::Nested => device
                .get("kismet.device.base")?
                .get("signal")?
                .get(full.as_str()),
            SchemaLayout::Flattened => device.get(full.as_str()),
        }
    }
}
