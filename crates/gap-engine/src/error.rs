//! Error types for gap-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GapError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid availability window: {0}")]
    InvalidWindow(String),

    #[error("Invalid interval: end {end} is before start {start}")]
    InvertedInterval { start: String, end: String },

    #[error("Calendar parse error: {0}")]
    Calendar(String),
}

pub type Result<T> = std::result::Result<T, GapError>;
