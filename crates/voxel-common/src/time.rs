//! Time encoding for the cube's time axis.
//!
//! Time values are stored as a numeric offset in days from a fixed epoch,
//! matching the units attribute written to the NetCDF file. Any reader
//! applying the same epoch recovers calendar dates exactly.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Units string written to the `time` coordinate variable.
pub const TIME_UNITS: &str = "days since 1990-01-01 00:00";

/// Calendar attribute written alongside [`TIME_UNITS`].
pub const TIME_CALENDAR: &str = "standard";

/// The reference instant of [`TIME_UNITS`].
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap()
}

/// Days elapsed since the epoch (fractional for intra-day instants).
pub fn days_since_epoch(t: DateTime<Utc>) -> f64 {
    (t - epoch()).num_seconds() as f64 / 86_400.0
}

/// Inverse of [`days_since_epoch`], to second precision.
pub fn date_from_days(days: f64) -> DateTime<Utc> {
    epoch() + Duration::seconds((days * 86_400.0).round() as i64)
}
