//! # Meeting Meter
//!
//! A meeting cost tracker: pulls calendar events, prices the time they
//! consume, and reports where the hours and money go.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (meetings, money, cost model, report)
//! - **ingest**: Raw calendar event parsing
//! - **fetch**: Calendar sources (HTTP endpoint or local file)
//! - **calculate**: Report computation
//! - **render**: Console, Slack, and HTML output
//! - **storage**: JSONL persistence for meetings and report history
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod ingest;
pub mod models;
pub mod render;
pub mod storage;
pub mod timefmt;

pub use models::*;

use std::time::Duration;

/// Parse a human-friendly lookback window (e.g., "7d", "12h", "30m").
/// A bare number reads as days.
pub fn parse_window(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Window must not be empty".to_string());
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('d') {
        (n, 86_400)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 3_600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        // Default to days
        (s, 86_400)
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| format!("Invalid window: {s:?} (expected e.g. \"7d\", \"12h\", \"30m\")"))?;
    Ok(Duration::from_secs(num * multiplier))
}
