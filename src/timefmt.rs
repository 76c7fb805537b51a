//! Epoch timestamp normalization.
//!
//! Kismet reports `first_time` / `last_time` as Unix epoch seconds, but the
//! values arrive inside untyped JSON and are occasionally missing or
//! garbage. A malformed timestamp must never abort an otherwise-valid
//! device, so normalization falls back to a caller-supplied instant instead
//! of failing.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

/// Convert a possibly-missing epoch-seconds JSON value to a UTC timestamp.
///
/// Accepts JSON numbers and numeric strings (fractional seconds are kept).
/// Anything absent, non-numeric, non-finite, or outside chrono's
/// representable range yields `fallback`.
pub fn epoch_to_utc(value: Option<&Value>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    let secs = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match secs {
        Some(s) if s.is_finite() => {
            let whole = s.trunc();
            let nanos = ((s - whole) * 1e9) as u32;
            match Utc.timestamp_opt(whole as i64, nanos) {
                chrono::LocalResult::Single(dt) => dt,
                _ => fallback,
            }
        }
        _ => fallback,
    }
}
