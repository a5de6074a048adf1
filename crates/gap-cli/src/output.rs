//! Rendering of free intervals for the terminal.

use anyhow::Result;
use clap::ValueEnum;
use gap_engine::FreeInterval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// JSON array of {start, end, duration_minutes}
    Json,
}

const NO_RESULTS: &str = "No free intervals found that match the criteria.";

pub fn render(free: &[FreeInterval], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(free)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(free)? + "\n"),
    }
}

fn render_text(free: &[FreeInterval]) -> String {
    if free.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }

    let mut out = String::from("Available free intervals:\n");
    for interval in free {
        out.push_str(&format!(
            "Start: {}, End: {}, Duration: {}\n",
            interval.start.format("%Y-%m-%d %H:%M:%S"),
            interval.end.format("%Y-%m-%d %H:%M:%S"),
            format_duration(interval.duration())
        ));
    }
    out
}

/// `H:MM:SS`, prefixed with `N day(s), ` once the span reaches a day.
pub fn format_duration(duration: chrono::Duration) -> String {
    let total = duration.num_seconds().max(0);
    let days = total / 86_400;
    let rem = total % 86_400;
    let clock = format!("{}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);
    match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    }
}
