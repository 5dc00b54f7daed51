use chrono::NaiveDateTime;

use crate::error::TrackingError;

const DATE_OBS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a FITS DATE-OBS value, e.g. `2023-01-25T01:10:21.2185211`.
///
/// The fractional seconds are dropped, not rounded, so every capture time is
/// bounded to whole-second precision.
pub fn parse_date_obs(date_obs: &str) -> Result<NaiveDateTime, TrackingError> {
    let trimmed = date_obs.trim();
    let whole_seconds = trimmed.split('.').next().unwrap_or(trimmed);
    NaiveDateTime::parse_from_str(whole_seconds, DATE_OBS_FORMAT)
        .map_err(|_| TrackingError::InvalidTimestamp(date_obs.to_string()))
}

/// Seconds from `first` to `last`, negative when `last` is earlier.
pub fn elapsed_seconds(first: &NaiveDateTime, last: &NaiveDateTime) -> f64 {
    (*last - *first).num_seconds() as f64
}
