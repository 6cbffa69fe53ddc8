use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Timestamp in epoch milliseconds
///
/// All pipeline arithmetic (window eviction, emission intervals, rate
/// denominators) is done on millisecond integers; `chrono` is only used
/// at the edges for human-readable output.
pub type TimestampMs = i64;

/// Accumulated weighted value - uses Decimal for precision
/// Unit: billions of quote currency (volume * price / 1e9)
pub type Metric = Decimal;

/// Symbol identifier for a listed equity
pub type Symbol = String;

/// Convert an epoch-millisecond timestamp to a UTC datetime for display.
///
/// Out-of-range values fall back to the epoch rather than panicking.
pub fn to_datetime(ts: TimestampMs) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ts).unwrap_or_default()
}
