//! Fetch iCalendar feeds and normalize them into busy intervals.
//!
//! Feeds are loaded concurrently. A feed that fails to load or parse is
//! logged and skipped; the remaining feeds still contribute.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;
use futures::future::join_all;
use gap_engine::ics::busy_intervals;
use gap_engine::{AvailabilityWindow, BusyInterval, GapError};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to fetch {url}. Status code: {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {feed}: {source}")]
    Parse {
        feed: String,
        #[source]
        source: GapError,
    },
}

/// Where a feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Http(String),
    File(PathBuf),
}

impl FeedSource {
    /// `http://` and `https://` locators are fetched over the network;
    /// `file://` locators and bare paths are read from disk.
    pub fn parse(locator: &str) -> Self {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            FeedSource::Http(locator.to_string())
        } else if let Some(path) = locator.strip_prefix("file://") {
            FeedSource::File(PathBuf::from(path))
        } else {
            FeedSource::File(PathBuf::from(locator))
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Http(url) => f.write_str(url),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads raw feed payloads.
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Load the raw payload of one feed.
    pub async fn load(&self, source: &FeedSource) -> Result<String, FeedError> {
        match source {
            FeedSource::Http(url) => {
                debug!("Fetching feed: {}", url);

                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| FeedError::Transport {
                        url: url.clone(),
                        message: e.to_string(),
                    })?;

                if !response.status().is_success() {
                    return Err(FeedError::Status {
                        url: url.clone(),
                        status: response.status().as_u16(),
                    });
                }

                response.text().await.map_err(|e| FeedError::Transport {
                    url: url.clone(),
                    message: e.to_string(),
                })
            }
            FeedSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FeedError::Io {
                        path: path.display().to_string(),
                        source,
                    })
            }
        }
    }
}

/// How many feeds contributed and how many were skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedSummary {
    pub loaded: usize,
    pub skipped: usize,
}

/// Load every feed and collect the busy intervals of those that succeed.
///
/// Intervals from different feeds are concatenated as-is; duplicates across
/// feeds are kept.
pub async fn load_all(
    client: &FeedClient,
    sources: &[FeedSource],
    window: &AvailabilityWindow,
    zone: Tz,
) -> (Vec<BusyInterval>, FeedSummary) {
    let (start_date, end_date) = (window.start_date, window.end_date);

    let results = join_all(sources.iter().map(|source| async move {
        info!("Loading iCalendar from: {}", source);
        let payload = client.load(source).await?;
        let intervals = busy_intervals(&payload, start_date, end_date, zone).map_err(|source_err| {
            FeedError::Parse {
                feed: source.to_string(),
                source: source_err,
            }
        })?;
        Ok::<_, FeedError>(intervals)
    }))
    .await;

    let mut busy = Vec::new();
    let mut summary = FeedSummary::default();
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(intervals) => {
                info!(
                    "Successfully loaded calendar from {} ({} events in range)",
                    source,
                    intervals.len()
                );
                summary.loaded += 1;
                busy.extend(intervals);
            }
            Err(err) => {
                warn!("Skipping feed {}: {}", source, err);
                summary.skipped += 1;
            }
        }
    }

    (busy, summary)
}
