//! The derived meeting-cost report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Money;

/// Shown in the top-slot fields when there are fewer slots than ranks.
pub const EMPTY_SLOT_LABEL: &str = "Calendar empty";

/// Fully-derived aggregate for one reporting window.
///
/// Built once per run and never mutated. Raw numeric fields and
/// pre-rendered display strings are separate, so machine consumers
/// (tests, dashboards, the API) and text consumers (console, Slack,
/// HTML) pick what they need independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    // Counts
    pub meeting_count: u32,

    /// Number of distinct `(start, summary, duration)` triples. Broader
    /// than distinct start times: same start with a different title or
    /// duration is a different slot.
    pub distinct_slot_count: u32,

    // Totals
    pub weekly_cost_seconds: f64,
    pub weekly_cost_money: Money,
    pub yearly_cost_seconds: f64,
    pub yearly_cost_money: Money,

    /// Sum of plain meeting durations, unscaled by attendee count.
    pub total_duration_seconds: f64,

    // Averages. Cost averages divide by `distinct_slot_count`, the
    // duration average divides by `meeting_count`.
    pub avg_cost_seconds: f64,
    pub avg_cost_money: Money,
    pub avg_duration_seconds: f64,

    /// Share of the team's work week spent in meetings, rounded to 2
    /// decimal places.
    pub percent_time_in_meetings: f64,

    // Recovery deltas against the ideal meeting load. Negative when the
    // team is under the ideal load.
    pub weekly_time_recovered_seconds: f64,
    pub weekly_money_recovered: Money,
    pub yearly_time_recovered_seconds: f64,
    pub yearly_money_recovered: Money,

    // Ideal-load reference values, copied from the cost model so
    // renderers only ever need a Report.
    pub ideal_meeting_percent: f64,
    pub weekly_ideal_seconds: f64,
    pub weekly_ideal_cost: Money,
    pub yearly_ideal_seconds: f64,
    pub yearly_ideal_cost: Money,

    /// 15-minute slot occupancy, keyed by slot timestamp, ascending.
    pub frequency: BTreeMap<String, u32>,

    /// Top slots by occupancy, pretty-printed, at most 3 entries.
    pub top_meeting_slots: Vec<String>,

    // Display strings
    pub weekly_cost_time_readable: String,
    pub weekly_cost_money_readable: String,
    pub yearly_cost_time_readable: String,
    pub yearly_cost_money_readable: String,
    pub avg_cost_time_readable: String,
    pub avg_cost_money_readable: String,
    pub avg_duration_readable: String,
    pub percent_time_readable: String,
    pub weekly_time_recovered_readable: String,
    pub weekly_money_recovered_readable: String,
    pub yearly_time_recovered_readable: String,
    pub yearly_money_recovered_readable: String,
    pub weekly_ideal_time_readable: String,
    pub weekly_ideal_cost_readable: String,
    pub yearly_ideal_time_readable: String,
    pub yearly_ideal_cost_readable: String,
    pub top_slot_1: String,
    pub top_slot_2: String,
    pub top_slot_3: String,
    pub frequency_keys_readable: Vec<String>,
}

impl Report {
    /// The three ranked slot fields, padded with [`EMPTY_SLOT_LABEL`].
    pub fn top_slots(&self) -> [&str; 3] {
        [&self.top_slot_1, &self.top_slot_2, &self.top_slot_3]
    }
}
