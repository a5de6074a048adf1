//! Validated run settings built from command-line arguments.
//!
//! Everything the caller typed is parsed and checked here, before any feed
//! is fetched.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use gap_engine::input::{parse_date, parse_duration, parse_time, parse_zone};
use gap_engine::{AvailabilityWindow, GapPolicy};

use crate::feed::FeedSource;
use crate::output::OutputFormat;
use crate::Cli;

#[derive(Debug)]
pub struct Settings {
    pub sources: Vec<FeedSource>,
    pub window: AvailabilityWindow,
    pub policy: GapPolicy,
    pub zone: Tz,
    pub timeout: Duration,
    pub format: OutputFormat,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let start_date = parse_date(&cli.start).context("Invalid --start")?;
        let end_date = parse_date(&cli.end).context("Invalid --end")?;
        let earliest = parse_time(&cli.earliest).context("Invalid --earliest")?;
        let latest = parse_time(&cli.latest).context("Invalid --latest")?;
        let min_length = parse_duration(&cli.min_length).context("Invalid --min-length")?;
        let zone = parse_zone(&cli.tz).context("Invalid --tz")?;

        let window = AvailabilityWindow::new(start_date, end_date, min_length)
            .with_daily_bounds(earliest, latest);
        window.validate()?;

        let mut policy = GapPolicy::default();
        if cli.merge_overlaps {
            policy = policy.merge_overlaps();
        }
        if cli.split_days {
            policy = policy.split_by_day();
        }

        if cli.timeout == 0 {
            anyhow::bail!("Invalid --timeout: must be at least 1 second");
        }

        Ok(Self {
            sources: cli.links.iter().map(|l| FeedSource::parse(l)).collect(),
            window,
            policy,
            zone,
            timeout: Duration::from_secs(cli.timeout),
            format: cli.format,
        })
    }
}
