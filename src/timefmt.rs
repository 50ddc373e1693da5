//! Time breakdown and pretty-printing.
//!
//! Converts second counts into day/hour/minute/second breakdowns and
//! human-readable strings, and renders frequency-slot keys for display.

use chrono::NaiveDateTime;

/// Format used for frequency-slot keys. Keys are rendered from
/// UTC-normalized timestamps, so lexicographic order matches
/// chronological order even across mixed-offset batches.
pub const SLOT_KEY_FORMAT: &str = "%Y-%m-%d %H:%M";

const SLOT_DISPLAY_FORMAT: &str = "%A, %b %d, %Y - %H:%M";

/// A duration split into days, hours, minutes and seconds.
///
/// Recovered-time deltas can be negative, so the sign is carried as a
/// single flag over the whole breakdown while the unit fields stay
/// magnitudes. `pretty` renders the flag as one leading minus sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBreakdown {
    pub negative: bool,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// Split a second count into a [`TimeBreakdown`].
///
/// Fractional seconds are truncated. Days are the outermost unit.
pub fn breakdown(total_seconds: f64) -> TimeBreakdown {
    let negative = total_seconds < 0.0;
    let mut remainder = total_seconds.abs() as u64;

    let seconds = remainder % 60;
    remainder /= 60;
    let minutes = remainder % 60;
    remainder /= 60;
    let hours = remainder % 24;
    let days = remainder / 24;

    TimeBreakdown {
        negative,
        days,
        hours,
        minutes,
        seconds,
    }
}

fn pluralize(value: u64, unit: &str) -> String {
    if value == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", value, unit)
    }
}

/// Render a breakdown as `"{d}, {h}, {m}, {s}"` with pluralized units.
pub fn pretty(b: &TimeBreakdown) -> String {
    let body = format!(
        "{}, {}, {}, {}",
        pluralize(b.days, "day"),
        pluralize(b.hours, "hour"),
        pluralize(b.minutes, "minute"),
        pluralize(b.seconds, "second"),
    );
    if b.negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Breakdown + pretty in one step.
pub fn format_seconds(total_seconds: f64) -> String {
    pretty(&breakdown(total_seconds))
}

/// Render a frequency-slot key as e.g. `"Tuesday, Apr 25, 2017 - 09:30"`.
///
/// Keys that do not parse are returned unchanged rather than dropped, so
/// a malformed key stays visible in the output.
pub fn pretty_slot(key: &str) -> String {
    match NaiveDateTime::parse_from_str(key, SLOT_KEY_FORMAT) {
        Ok(dt) => dt.format(SLOT_DISPLAY_FORMAT).to_string(),
        Err(_) => key.to_string(),
    }
}
