//! Busy/free interval types and the availability window query.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{GapError, Result};

/// One occupied span on a calendar.
///
/// Intervals carry no identity beyond their `(start, end)` pair. Two feeds
/// reporting the same meeting yield two overlapping intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Event summary from the source feed, for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl BusyInterval {
    /// Build an interval, rejecting `end < start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < start {
            return Err(GapError::InvertedInterval {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start,
            end,
            label: None,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A free span reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
}

impl FreeInterval {
    /// Build a free interval, deriving its length in minutes.
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// The query: which dates, which hours of each day, and how long a gap must be.
///
/// Both date bounds and both time-of-day bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub earliest_time: NaiveTime,
    pub latest_time: NaiveTime,
    pub min_length: Duration,
}

impl AvailabilityWindow {
    /// Window covering the whole day (00:00-23:59) on every date in range.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, min_length: Duration) -> Self {
        Self {
            start_date,
            end_date,
            earliest_time: NaiveTime::MIN,
            latest_time: NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN),
            min_length,
        }
    }

    pub fn with_daily_bounds(mut self, earliest_time: NaiveTime, latest_time: NaiveTime) -> Self {
        self.earliest_time = earliest_time;
        self.latest_time = latest_time;
        self
    }

    /// Check the window invariants.
    ///
    /// The engine itself accepts any window; callers validate before invoking it.
    ///
    /// # Errors
    /// Returns `GapError::InvalidWindow` if the date range or the daily bounds are
    /// inverted, or if `min_length` is not positive.
    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(GapError::InvalidWindow(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        if self.earliest_time > self.latest_time {
            return Err(GapError::InvalidWindow(format!(
                "earliest time {} is after latest time {}",
                self.earliest_time.format("%H:%M"),
                self.latest_time.format("%H:%M")
            )));
        }
        if self.min_length <= Duration::zero() {
            return Err(GapError::InvalidWindow(
                "minimum length must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// True if `date` lies within the inclusive date range.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Timestamp of the daily lower bound on `date`.
    pub fn day_open(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.earliest_time)
    }

    /// Timestamp of the daily upper bound on `date`.
    pub fn day_close(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.latest_time)
    }
}
