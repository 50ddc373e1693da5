//! Meeting value type.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CostModel, Money};

/// Placeholder used when a calendar record carries no summary.
pub const NO_SUMMARY: &str = "No summary given";

/// Per-meeting errors. Each variant identifies the offending record by
/// its 1-based sequence number so callers can report or skip it.
#[derive(Debug, Error)]
pub enum MeetingError {
    #[error("Meeting {sequence} ends before it starts ({start} > {end})")]
    InvalidInterval {
        sequence: u32,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },

    #[error("Meeting {sequence} is missing required field `{field}`")]
    Malformed { sequence: u32, field: &'static str },

    #[error("Meeting {sequence} has unparseable timestamp {value:?}: {source}")]
    InvalidTimestamp {
        sequence: u32,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl MeetingError {
    /// Sequence number of the record this error refers to.
    pub fn sequence(&self) -> u32 {
        match self {
            MeetingError::InvalidInterval { sequence, .. } => *sequence,
            MeetingError::Malformed { sequence, .. } => *sequence,
            MeetingError::InvalidTimestamp { sequence, .. } => *sequence,
        }
    }
}

/// How an attendee list translates into an attendee count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendeePolicy {
    /// Every meeting counts as one attendee, whether or not the record
    /// carries an attendee list. Matches the single-calendar setup.
    #[default]
    AlwaysOne,

    /// Count the attendee list (minimum 1). For shared/team calendars.
    CountList,
}

impl AttendeePolicy {
    /// Resolve an optional attendee-list length into a count.
    pub fn resolve(&self, attendee_list_len: Option<usize>) -> u32 {
        match (self, attendee_list_len) {
            (AttendeePolicy::CountList, Some(n)) => (n as u32).max(1),
            _ => 1,
        }
    }
}

/// One calendar event, immutable once constructed.
///
/// Costs are not stored; they are recomputed on demand from the meeting's
/// own duration and attendee count plus a supplied [`CostModel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    /// 1-based position in the input batch.
    pub sequence_number: u32,

    pub summary: String,

    pub start: DateTime<FixedOffset>,

    pub end: DateTime<FixedOffset>,

    /// At least 1. "Just me" when the record has no attendee list.
    pub attendee_count: u32,
}

impl Meeting {
    /// Create a meeting. Fails if `end < start`; zero-duration meetings
    /// are valid and cost zero.
    pub fn new(
        sequence_number: u32,
        summary: Option<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        attendee_list_len: Option<usize>,
        policy: AttendeePolicy,
    ) -> Result<Self, MeetingError> {
        if end < start {
            return Err(MeetingError::InvalidInterval {
                sequence: sequence_number,
                start,
                end,
            });
        }

        Ok(Self {
            sequence_number,
            summary: summary.unwrap_or_else(|| NO_SUMMARY.to_string()),
            start,
            end,
            attendee_count: policy.resolve(attendee_list_len),
        })
    }

    pub fn duration_seconds(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64
    }

    /// Person-seconds: duration scaled by attendee count.
    pub fn cost_in_seconds(&self) -> f64 {
        self.duration_seconds() * self.attendee_count as f64
    }

    pub fn cost_in_money(&self, model: &CostModel) -> Money {
        Money::from_major(
            self.cost_in_seconds() * model.cost_per_second,
            model.currency,
        )
    }

    /// Key identifying this meeting's slot for distinct-slot counting:
    /// same start, same summary, same duration collapse into one slot.
    pub fn slot_key(&self) -> String {
        format!(
            "{} {} {}",
            self.start.to_rfc3339(),
            self.summary,
            (self.end - self.start).num_seconds()
        )
    }
}
