//! Report derivation engine.
//!
//! Turns a batch of meetings plus a cost model into a fully-derived
//! [`Report`]: cost totals, weekly/yearly projections, recovered-time
//! estimates, the 15-minute frequency histogram and the top meeting
//! slots. Single synchronous pass, no side effects.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, Utc};
use tracing::warn;

use crate::ingest::{self, RawEvent};
use crate::models::{
    AttendeePolicy, CostModel, Meeting, MeetingError, Money, Report, EMPTY_SLOT_LABEL,
};
use crate::timefmt::{self, SLOT_KEY_FORMAT};

/// Width of a frequency-histogram slot.
const SLOT_MINUTES: i64 = 15;

/// How many top meeting slots the report ranks.
const TOP_SLOT_COUNT: usize = 3;

/// What to do when an individual calendar record is invalid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Skip the offending record, log it, and report on the valid subset.
    #[default]
    Skip,

    /// Fail the whole run on the first invalid record.
    Abort,
}

/// Outcome of a full parse-and-build run.
#[derive(Debug)]
pub struct ReportRun {
    pub report: Report,

    /// The meetings the report was built over, in batch order.
    pub meetings: Vec<Meeting>,

    /// Per-record errors for records that were skipped. Empty under
    /// [`ErrorPolicy::Abort`] (the run fails instead).
    pub skipped: Vec<MeetingError>,
}

/// Parse raw calendar records and build the report over the valid subset.
pub fn build_report(
    records: &[RawEvent],
    model: &CostModel,
    policy: ErrorPolicy,
    attendees: AttendeePolicy,
) -> Result<ReportRun, MeetingError> {
    let mut meetings = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let sequence = i as u32 + 1;
        match ingest::parse_event(sequence, record, attendees) {
            Ok(meeting) => meetings.push(meeting),
            Err(err) => match policy {
                ErrorPolicy::Skip => {
                    warn!("Skipping record {}: {}", sequence, err);
                    skipped.push(err);
                }
                ErrorPolicy::Abort => return Err(err),
            },
        }
    }

    let report = build(&meetings, model);
    Ok(ReportRun {
        report,
        meetings,
        skipped,
    })
}

/// Build a report from already-validated meetings.
///
/// Accumulation is a left-to-right fold in batch order, so repeated
/// builds over the same inputs produce bit-identical results.
pub fn build(meetings: &[Meeting], model: &CostModel) -> Report {
    let mut weekly_cost_seconds = 0.0;
    let mut weekly_cost_money = Money::zero(model.currency);
    let mut total_duration_seconds = 0.0;
    let mut distinct_slots: HashSet<String> = HashSet::new();
    let mut frequency: BTreeMap<String, u32> = BTreeMap::new();

    for meeting in meetings {
        weekly_cost_seconds += meeting.cost_in_seconds();
        weekly_cost_money += meeting.cost_in_money(model);
        total_duration_seconds += meeting.duration_seconds();
        distinct_slots.insert(meeting.slot_key());

        // Walk the meeting's [start, end) interval in 15-minute steps
        // from its literal start time. The cursor is normalized to UTC
        // so meetings at the same instant share a slot key regardless
        // of the offset they were recorded in. Zero-duration meetings
        // touch no slots.
        let mut cursor = meeting.start.with_timezone(&Utc);
        let end = meeting.end.with_timezone(&Utc);
        while cursor < end {
            let key = cursor.format(SLOT_KEY_FORMAT).to_string();
            *frequency.entry(key).or_default() += 1;
            cursor += Duration::minutes(SLOT_MINUTES);
        }
    }

    let meeting_count = meetings.len() as u32;
    let distinct_slot_count = distinct_slots.len() as u32;

    let yearly_cost_seconds = weekly_cost_seconds * model.work_weeks_per_year;
    let yearly_cost_money = weekly_cost_money.scale(model.work_weeks_per_year);

    let percent_time_in_meetings =
        round2(weekly_cost_seconds / model.person_seconds_per_week * 100.0);

    let overage_fraction = (percent_time_in_meetings - model.ideal_meeting_percent) / 100.0;
    let weekly_time_recovered_seconds = overage_fraction * model.person_seconds_per_week;
    let weekly_money_recovered = Money::from_major(
        overage_fraction * model.cost_per_second * model.person_seconds_per_week,
        model.currency,
    );
    let yearly_time_recovered_seconds = overage_fraction * model.person_seconds_per_year;
    let yearly_money_recovered = weekly_money_recovered.scale(model.work_weeks_per_year);

    // Cost averages divide by the distinct-slot count, the duration
    // average by the meeting count. Intentional asymmetry, kept as-is.
    let (avg_cost_seconds, avg_cost_money) = if distinct_slot_count > 0 {
        (
            weekly_cost_seconds / distinct_slot_count as f64,
            Money::from_major(
                weekly_cost_money.as_major() / distinct_slot_count as f64,
                model.currency,
            ),
        )
    } else {
        (0.0, Money::zero(model.currency))
    };
    let avg_duration_seconds = if meeting_count > 0 {
        total_duration_seconds / meeting_count as f64
    } else {
        0.0
    };

    let top_meeting_slots = top_slots(&frequency);
    let [top_slot_1, top_slot_2, top_slot_3] = padded_top_slots(&top_meeting_slots);

    let frequency_keys_readable = frequency.keys().map(|k| timefmt::pretty_slot(k)).collect();

    Report {
        meeting_count,
        distinct_slot_count,
        weekly_cost_seconds,
        weekly_cost_money,
        yearly_cost_seconds,
        yearly_cost_money,
        total_duration_seconds,
        avg_cost_seconds,
        avg_cost_money,
        avg_duration_seconds,
        percent_time_in_meetings,
        weekly_time_recovered_seconds,
        weekly_money_recovered,
        yearly_time_recovered_seconds,
        yearly_money_recovered,
        ideal_meeting_percent: model.ideal_meeting_percent,
        weekly_ideal_seconds: model.ideal_seconds_per_week,
        weekly_ideal_cost: model.ideal_cost_per_week,
        yearly_ideal_seconds: model.ideal_seconds_per_year,
        yearly_ideal_cost: model.ideal_cost_per_year,
        weekly_cost_time_readable: timefmt::format_seconds(weekly_cost_seconds),
        weekly_cost_money_readable: weekly_cost_money.to_string(),
        yearly_cost_time_readable: timefmt::format_seconds(yearly_cost_seconds),
        yearly_cost_money_readable: yearly_cost_money.to_string(),
        avg_cost_time_readable: timefmt::format_seconds(avg_cost_seconds),
        avg_cost_money_readable: avg_cost_money.to_string(),
        avg_duration_readable: timefmt::format_seconds(avg_duration_seconds),
        percent_time_readable: format!("{}%", percent_time_in_meetings),
        weekly_time_recovered_readable: timefmt::format_seconds(weekly_time_recovered_seconds),
        weekly_money_recovered_readable: weekly_money_recovered.to_string(),
        yearly_time_recovered_readable: timefmt::format_seconds(yearly_time_recovered_seconds),
        yearly_money_recovered_readable: yearly_money_recovered.to_string(),
        weekly_ideal_time_readable: timefmt::format_seconds(model.ideal_seconds_per_week),
        weekly_ideal_cost_readable: model.ideal_cost_per_week.to_string(),
        yearly_ideal_time_readable: timefmt::format_seconds(model.ideal_seconds_per_year),
        yearly_ideal_cost_readable: model.ideal_cost_per_year.to_string(),
        top_slot_1,
        top_slot_2,
        top_slot_3,
        frequency,
        top_meeting_slots,
        frequency_keys_readable,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rank frequency slots by occupancy, descending. The map iterates in
/// key order and the sort is stable, so ties resolve to the earlier slot.
fn top_slots(frequency: &BTreeMap<String, u32>) -> Vec<String> {
    let mut ranked: Vec<(&String, u32)> = frequency.iter().map(|(k, v)| (k, *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(TOP_SLOT_COUNT)
        .map(|(key, _)| timefmt::pretty_slot(key))
        .collect()
}

fn padded_top_slots(slots: &[String]) -> [String; 3] {
    let get = |i: usize| {
        slots
            .get(i)
            .cloned()
            .unwrap_or_else(|| EMPTY_SLOT_LABEL.to_string())
    };
    [get(0), get(1), get(2)]
}
