//! Raw calendar records and their conversion into [`Meeting`] values.
//!
//! The wire shape mirrors the calendar API's event resource: `start` and
//! `end` carry either a `dateTime` (RFC 3339) or, for all-day events, a
//! bare `date`. The caller is trusted to supply a complete, time-ordered
//! batch for the reporting window.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{AttendeePolicy, Meeting, MeetingError};

/// One event as delivered by the calendar feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,
}

/// Start/end marker: timed events carry `dateTime`, all-day events `date`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventTime {
    #[serde(rename = "dateTime", default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attendee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "responseStatus", default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<String>,
}

/// Convert one raw record into a [`Meeting`].
///
/// `sequence` is the record's 1-based position in the batch and is
/// carried into any error so the caller can identify the offender.
pub fn parse_event(
    sequence: u32,
    record: &RawEvent,
    attendees: AttendeePolicy,
) -> Result<Meeting, MeetingError> {
    let start = record
        .start
        .as_ref()
        .ok_or(MeetingError::Malformed {
            sequence,
            field: "start",
        })
        .and_then(|t| parse_time(sequence, t, "start"))?;
    let end = record
        .end
        .as_ref()
        .ok_or(MeetingError::Malformed {
            sequence,
            field: "end",
        })
        .and_then(|t| parse_time(sequence, t, "end"))?;

    Meeting::new(
        sequence,
        record.summary.clone(),
        start,
        end,
        record.attendees.as_ref().map(|a| a.len()),
        attendees,
    )
}

/// Resolve an [`EventTime`] into a concrete timestamp.
///
/// All-day events span the literal date boundary: the `date` marker
/// becomes midnight UTC of that day.
fn parse_time(
    sequence: u32,
    time: &EventTime,
    field: &'static str,
) -> Result<DateTime<FixedOffset>, MeetingError> {
    if let Some(dt) = &time.date_time {
        return DateTime::parse_from_rfc3339(dt).map_err(|source| MeetingError::InvalidTimestamp {
            sequence,
            value: dt.clone(),
            source,
        });
    }

    if let Some(date) = &time.date {
        let day: NaiveDate =
            date.parse()
                .map_err(|source| MeetingError::InvalidTimestamp {
                    sequence,
                    value: date.clone(),
                    source,
                })?;
        let midnight = day.and_time(chrono::NaiveTime::MIN);
        return Ok(midnight.and_utc().fixed_offset());
    }

    Err(MeetingError::Malformed { sequence, field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(summary: &str, start: &str, end: &str) -> RawEvent {
        RawEvent {
            summary: Some(summary.to_string()),
            start: Some(EventTime {
                date_time: Some(start.to_string()),
                date: None,
            }),
            end: Some(EventTime {
                date_time: Some(end.to_string()),
                date: None,
            }),
            attendees: None,
        }
    }

    #[test]
    fn test_parse_timed_event() {
        let record = timed(
            "Standup",
            "2017-04-25T09:30:00+00:00",
            "2017-04-25T10:00:00+00:00",
        );

        let meeting = parse_event(1, &record, AttendeePolicy::default()).unwrap();

        assert_eq!(meeting.sequence_number, 1);
        assert_eq!(meeting.summary, "Standup");
        assert_eq!(meeting.duration_seconds(), 1800.0);
    }

    #[test]
    fn test_parse_preserves_offset() {
        let record = timed(
            "Offset",
            "2017-04-25T09:30:00-04:00",
            "2017-04-25T10:00:00-04:00",
        );

        let meeting = parse_event(1, &record, AttendeePolicy::default()).unwrap();
        assert_eq!(meeting.start.to_rfc3339(), "2017-04-25T09:30:00-04:00");
    }

    #[test]
    fn test_parse_all_day_event_spans_date_boundary() {
        let record = RawEvent {
            summary: Some("Offsite".to_string()),
            start: Some(EventTime {
                date_time: None,
                date: Some("2017-04-25".to_string()),
            }),
            end: Some(EventTime {
                date_time: None,
                date: Some("2017-04-26".to_string()),
            }),
            attendees: None,
        };

        let meeting = parse_event(1, &record, AttendeePolicy::default()).unwrap();
        assert_eq!(meeting.duration_seconds(), 86_400.0);
    }

    #[test]
    fn test_missing_start_is_malformed() {
        let record = RawEvent {
            summary: Some("No start".to_string()),
            start: None,
            end: Some(EventTime {
                date_time: Some("2017-04-25T10:00:00+00:00".to_string()),
                date: None,
            }),
            attendees: None,
        };

        let err = parse_event(4, &record, AttendeePolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            MeetingError::Malformed {
                sequence: 4,
                field: "start"
            }
        ));
    }

    #[test]
    fn test_empty_time_marker_is_malformed() {
        let record = RawEvent {
            summary: None,
            start: Some(EventTime::default()),
            end: Some(EventTime {
                date_time: Some("2017-04-25T10:00:00+00:00".to_string()),
                date: None,
            }),
            attendees: None,
        };

        let err = parse_event(2, &record, AttendeePolicy::default()).unwrap_err();
        assert_eq!(err.sequence(), 2);
    }

    #[test]
    fn test_bad_timestamp_reported() {
        let record = timed("Bad", "not-a-time", "2017-04-25T10:00:00+00:00");

        let err = parse_event(7, &record, AttendeePolicy::default()).unwrap_err();
        assert!(matches!(err, MeetingError::InvalidTimestamp { sequence: 7, .. }));
    }

    #[test]
    fn test_attendee_list_respects_policy() {
        let mut record = timed(
            "Team call",
            "2017-04-25T09:00:00+00:00",
            "2017-04-25T10:00:00+00:00",
        );
        record.attendees = Some(vec![Attendee::default(), Attendee::default()]);

        let one = parse_event(1, &record, AttendeePolicy::AlwaysOne).unwrap();
        assert_eq!(one.attendee_count, 1);

        let counted = parse_event(1, &record, AttendeePolicy::CountList).unwrap();
        assert_eq!(counted.attendee_count, 2);
    }

    #[test]
    fn test_json_wire_shape() {
        let json = r#"{
            "summary": "Standup",
            "start": {"dateTime": "2017-04-25T09:30:00+00:00"},
            "end": {"dateTime": "2017-04-25T10:00:00+00:00"},
            "attendees": [{"email": "a@example.com", "responseStatus": "accepted"}]
        }"#;

        let record: RawEvent = serde_json::from_str(json).unwrap();
        assert_eq!(record.attendees.as_ref().unwrap().len(), 1);

        let meeting = parse_event(1, &record, AttendeePolicy::default()).unwrap();
        assert_eq!(meeting.summary, "Standup");
    }
}
