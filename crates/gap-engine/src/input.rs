//! Parsing of caller-supplied dates, times of day, durations and zones.
//!
//! Every parser returns a typed `GapError::Invalid*` so a caller can reject
//! bad input before fetching anything.

use chrono::{Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::error::{GapError, Result};

/// Parse a calendar date.
///
/// Accepts `DD.MM.YY` (e.g. `12.03.24`) and ISO `YYYY-MM-DD`.
///
/// # Errors
/// Returns `GapError::InvalidDate` if neither format matches.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%d.%m.%y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map_err(|_| {
            GapError::InvalidDate(format!(
                "'{}' (expected DD.MM.YY or YYYY-MM-DD)",
                input
            ))
        })
}

/// Parse a time of day in `HH:MM` form (e.g. `08:00`, `23:30`).
///
/// # Errors
/// Returns `GapError::InvalidTime` on anything else.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| GapError::InvalidTime(format!("'{}' (expected HH:MM)", input)))
}

/// Parse a duration in `H:MM` form (e.g. `0:30`, `2:00`, `05:13`).
///
/// Minutes are not capped at 59, so `0:90` is ninety minutes.
///
/// # Errors
/// Returns `GapError::InvalidDuration` if either part is missing, non-numeric
/// or negative.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let invalid = || GapError::InvalidDuration(format!("'{}' (expected H:MM)", input));

    let (hours, minutes) = input.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;

    Ok(Duration::hours(i64::from(hours)) + Duration::minutes(i64::from(minutes)))
}

/// Parse an IANA timezone name (e.g. `Europe/Berlin`, `UTC`).
///
/// # Errors
/// Returns `GapError::InvalidTimezone` if the name is unknown.
pub fn parse_zone(input: &str) -> Result<Tz> {
    input
        .trim()
        .parse()
        .map_err(|_| GapError::InvalidTimezone(input.to_string()))
}
