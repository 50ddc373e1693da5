//! Calendar feed access.
//!
//! The report engine never talks to the network itself; it consumes a
//! batch of [`RawEvent`]s produced by a [`CalendarSource`]. Two sources
//! are provided: an HTTP client for a hosted calendar API and a file
//! source for offline runs and fixtures.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::ingest::RawEvent;

/// Errors that can occur while fetching calendar data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reporting window: a lookback period ending now.
#[derive(Debug, Clone, Copy)]
pub struct ReportWindow {
    pub lookback: Duration,
}

impl Default for ReportWindow {
    fn default() -> Self {
        Self {
            lookback: Duration::from_secs(7 * 24 * 3600),
        }
    }
}

impl ReportWindow {
    pub fn new(lookback: Duration) -> Self {
        Self { lookback }
    }

    /// Window bounds as RFC 3339 strings, anchored at `now`.
    pub fn bounds(&self, now: DateTime<Utc>) -> (String, String) {
        let from = now - chrono::Duration::seconds(self.lookback.as_secs() as i64);
        (from.to_rfc3339(), now.to_rfc3339())
    }
}

/// A provider of raw calendar events for a reporting window.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn fetch_events(&self, window: &ReportWindow) -> Result<Vec<RawEvent>, FetchError>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;
}

/// Response envelope from the calendar API.
#[derive(Debug, Deserialize)]
struct EventFeed {
    #[serde(default)]
    items: Vec<RawEvent>,
}

/// Configuration for the HTTP calendar source.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Events endpoint, e.g. the provider's `events` URL for a calendar.
    pub url: Url,

    /// Bearer token, if the endpoint needs one.
    pub token: Option<String>,

    pub timeout: Duration,

    pub max_results: u32,
}

impl HttpSourceConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            token: None,
            timeout: Duration::from_secs(30),
            max_results: 100,
        }
    }
}

/// Fetches events from a hosted calendar API.
///
/// Asks the server for single (expanded) events ordered by start time,
/// which is the ordering the report builder expects.
pub struct HttpCalendarSource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpCalendarSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl CalendarSource for HttpCalendarSource {
    async fn fetch_events(&self, window: &ReportWindow) -> Result<Vec<RawEvent>, FetchError> {
        let (time_min, time_max) = window.bounds(Utc::now());
        debug!("Fetching events from {} to {}", time_min, time_max);

        let mut request = self
            .client
            .get(self.config.url.clone())
            .query(&[
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ])
            .query(&[("maxResults", self.config.max_results)]);

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let feed: EventFeed = response.json().await?;
        info!("Fetched {} events from {}", feed.items.len(), self.config.url);
        Ok(feed.items)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Reads events from a JSON file on disk.
///
/// Accepts either the API envelope (`{"items": [...]}`) or a bare array
/// of events, so saved API responses and hand-written fixtures both work.
pub struct FileCalendarSource {
    path: PathBuf,
}

impl FileCalendarSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileFeed {
    Envelope(EventFeed),
    Bare(Vec<RawEvent>),
}

#[async_trait]
impl CalendarSource for FileCalendarSource {
    async fn fetch_events(&self, _window: &ReportWindow) -> Result<Vec<RawEvent>, FetchError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let feed: FileFeed = serde_json::from_str(&contents)?;
        let items = match feed {
            FileFeed::Envelope(envelope) => envelope.items,
            FileFeed::Bare(items) => items,
        };
        info!("Read {} events from {:?}", items.len(), self.path);
        Ok(items)
    }

    fn name(&self) -> &str {
        "file"
    }
}
