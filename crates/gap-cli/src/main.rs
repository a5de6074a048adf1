//! `gapfinder` CLI: find free time across one or more iCalendar feeds.
//!
//! ## Usage
//!
//! ```sh
//! # Gaps of at least 30 minutes between 08:00 and 18:00 on 12 March 2024
//! gapfinder --links https://example.com/work.ics https://example.com/home.ics \
//!     --start 12.03.24 --end 12.03.24 --earliest 08:00 --latest 18:00 --min-length 0:30
//!
//! # Local files work too; merge overlapping meetings and split gaps per day
//! gapfinder --links ./work.ics --start 2024-03-11 --end 2024-03-15 \
//!     --min-length 1:00 --merge-overlaps --split-days
//!
//! # JSON output, UTC timestamps shown in Berlin time
//! gapfinder --links ./work.ics --start 12.03.24 --end 13.03.24 \
//!     --min-length 0:45 --tz Europe/Berlin --format json
//! ```
//!
//! Progress and diagnostics go to stderr (filter with `RUST_LOG`); results go
//! to stdout.

mod feed;
mod output;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use gap_engine::find_free_intervals_with;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::feed::FeedClient;
use crate::output::OutputFormat;
use crate::settings::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "gapfinder",
    version,
    about = "Load iCalendar feeds and find free intervals that match the given criteria"
)]
pub struct Cli {
    /// iCalendar feeds: http(s) URLs, file:// URLs or local paths
    #[arg(long, value_name = "URL", num_args = 1.., required = true)]
    links: Vec<String>,

    /// Earliest available time of day (HH:MM)
    #[arg(long, default_value = "00:00")]
    earliest: String,

    /// Latest available time of day (HH:MM)
    #[arg(long, default_value = "23:59")]
    latest: String,

    /// First date to search (DD.MM.YY or YYYY-MM-DD)
    #[arg(long)]
    start: String,

    /// Last date to search, inclusive (DD.MM.YY or YYYY-MM-DD)
    #[arg(long)]
    end: String,

    /// Minimum length of a free interval (H:MM)
    #[arg(long = "min-length", alias = "min_length")]
    min_length: String,

    /// Timezone that UTC timestamps are shown in (IANA name)
    #[arg(long, default_value = "UTC")]
    tz: String,

    /// Merge overlapping busy intervals before looking for gaps
    #[arg(long)]
    merge_overlaps: bool,

    /// Split gaps that span several days into one clipped gap per day
    #[arg(long)]
    split_days: bool,

    /// Per-feed request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Reject bad input before touching the network.
    let settings = Settings::from_cli(&cli)?;

    let client = FeedClient::new(settings.timeout).context("Failed to set up feed client")?;
    let (busy, summary) =
        feed::load_all(&client, &settings.sources, &settings.window, settings.zone).await;
    info!(
        "Loaded {} feeds, skipped {} ({} busy intervals)",
        summary.loaded,
        summary.skipped,
        busy.len()
    );

    let free = find_free_intervals_with(&busy, &settings.window, settings.policy);
    let rendered = output::render(&free, settings.format)?;
    print!("{}", rendered);

    Ok(())
}
