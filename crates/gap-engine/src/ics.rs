//! Normalize iCalendar payloads into busy intervals.
//!
//! Only `VEVENT` components count as busy time. Timestamps are reduced to
//! naive wall-clock values in a single display zone:
//!
//! - UTC instants (`...Z`) are converted into the display zone.
//! - Floating and `TZID=`-qualified values are taken as written; no
//!   reconciliation between zones is attempted.
//! - Date-only values (all-day events) become midnight, so an all-day event
//!   covers its whole day (DTEND is exclusive).

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use icalendar::{Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, EventLike};
use tracing::debug;

use crate::error::{GapError, Result};
use crate::interval::BusyInterval;

fn to_local(value: DatePerhapsTime, zone: Tz) -> NaiveDateTime {
    match value {
        DatePerhapsTime::Date(date) => date.and_time(NaiveTime::MIN),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(date_time)) => date_time,
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(instant)) => {
            instant.with_timezone(&zone).naive_local()
        }
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, .. }) => date_time,
    }
}

/// End used when an event has no DTEND: one day for all-day events,
/// otherwise zero length.
fn implied_end(start: &DatePerhapsTime, start_local: NaiveDateTime) -> NaiveDateTime {
    match start {
        DatePerhapsTime::Date(_) => start_local + Duration::days(1),
        DatePerhapsTime::DateTime(_) => start_local,
    }
}

/// Extract busy intervals from an iCalendar payload.
///
/// Keeps events whose start date lies in `start_date..=end_date`. Events
/// without a start, or whose end precedes their start, are skipped.
///
/// # Errors
/// Returns `GapError::Calendar` if the payload is not an iCalendar object or
/// cannot be parsed.
pub fn busy_intervals(
    payload: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    zone: Tz,
) -> Result<Vec<BusyInterval>> {
    if !payload.contains("BEGIN:VCALENDAR") {
        return Err(GapError::Calendar("payload has no VCALENDAR".to_string()));
    }

    let calendar: Calendar = payload.parse().map_err(GapError::Calendar)?;

    let mut intervals = Vec::new();
    for component in calendar.components.iter() {
        let CalendarComponent::Event(event) = component else {
            continue;
        };

        let summary = event.get_summary();
        let Some(start_value) = event.get_start() else {
            debug!(summary, "skipping event without DTSTART");
            continue;
        };

        let start = to_local(start_value.clone(), zone);
        let end = match event.get_end() {
            Some(end_value) => to_local(end_value, zone),
            None => implied_end(&start_value, start),
        };

        if !(start_date <= start.date() && start.date() <= end_date) {
            continue;
        }

        let interval = match BusyInterval::new(start, end) {
            Ok(interval) => interval,
            Err(err) => {
                debug!(summary, %err, "skipping event");
                continue;
            }
        };

        intervals.push(match summary {
            Some(label) => interval.with_label(label),
            None => interval,
        });
    }

    debug!(count = intervals.len(), "normalized calendar payload");
    Ok(intervals)
}
