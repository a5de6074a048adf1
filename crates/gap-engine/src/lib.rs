//! # gap-engine
//!
//! Free-interval computation over busy calendar intervals.
//!
//! Given busy intervals collected from any number of calendars and an
//! availability window (date range, daily time-of-day bounds, minimum gap
//! length), the engine reports the gaps long enough to be useful. It is a pure
//! function with no I/O; fetching feeds is left to the caller.
//!
//! ## Modules
//!
//! - [`freebusy`] — busy intervals + window → ordered free intervals
//! - [`interval`] — `BusyInterval`, `FreeInterval`, `AvailabilityWindow`
//! - [`ics`] — iCalendar payload → busy intervals
//! - [`input`] — validated parsing of dates, times, durations and zones
//! - [`error`] — Error types

pub mod error;
pub mod freebusy;
pub mod ics;
pub mod input;
pub mod interval;

pub use error::GapError;
pub use freebusy::{
    find_first_free_interval, find_free_intervals, find_free_intervals_with, GapPolicy,
    OverlapPolicy, SpanPolicy,
};
pub use interval::{AvailabilityWindow, BusyInterval, FreeInterval};
