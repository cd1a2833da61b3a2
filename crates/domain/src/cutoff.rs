use crate::event::EventStatus;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Reminders are sent when the cutoff is at most this far ahead
pub const REMINDER_WINDOW_MILLIS: i64 = 1000 * 60 * 60 * 24;

const NAIVE_DATETIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Which `Event` field the effective cutoff was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutoffSource {
    ApplicationDeadline,
    EventDate,
}

impl CutoffSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ApplicationDeadline => "Application Deadline",
            Self::EventDate => "Event Date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveCutoff {
    /// Timestamp in millis
    pub timestamp: i64,
    pub source: CutoffSource,
}

impl EffectiveCutoff {
    /// Strictly before `now`, a cutoff exactly at `now` has not elapsed yet
    pub fn has_elapsed(&self, now: i64) -> bool {
        self.timestamp < now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cutoff {
    At(EffectiveCutoff),
    /// Neither an application deadline nor an event date could be read
    Missing,
    Cancelled,
}

/// Resolves the moment that decides both when an event becomes `past` and
/// when its reminders are due: the application deadline if it is set,
/// otherwise the event date.
///
/// A deadline that cannot be parsed is treated as absent.
pub fn effective_cutoff(
    application_deadline: Option<&str>,
    event_date: &str,
    status: EventStatus,
) -> Cutoff {
    if status == EventStatus::Cancelled {
        return Cutoff::Cancelled;
    }

    if let Some(timestamp) = application_deadline.and_then(parse_timestamp) {
        return Cutoff::At(EffectiveCutoff {
            timestamp,
            source: CutoffSource::ApplicationDeadline,
        });
    }

    match parse_timestamp(event_date) {
        Some(timestamp) => Cutoff::At(EffectiveCutoff {
            timestamp,
            source: CutoffSource::EventDate,
        }),
        None => Cutoff::Missing,
    }
}

/// Parses the date formats accepted for event dates and deadlines into millis.
///
/// Plain dates resolve to midnight UTC and date-times without offset are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.timestamp_millis());
    }

    for format in NAIVE_DATETIME_FORMATS.iter() {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&datetime).timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| Utc.from_utc_datetime(&datetime).timestamp_millis())
}

/// Formats a timestamp in millis like `Monday, March 10, 2025`
pub fn format_date(timestamp: i64) -> String {
    match Utc.timestamp_millis_opt(timestamp).single() {
        Some(datetime) => datetime.format("%A, %B %-d, %Y").to_string(),
        None => "TBA".into(),
    }
}

/// Inclusive timespan in which a cutoff makes a reminder due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindow {
    start_ts: i64,
    end_ts: i64,
}

impl ReminderWindow {
    pub fn starting_at(now: i64) -> Self {
        Self {
            start_ts: now,
            end_ts: now + REMINDER_WINDOW_MILLIS,
        }
    }

    pub fn start(&self) -> i64 {
        self.start_ts
    }

    pub fn end(&self) -> i64 {
        self.end_ts
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.start_ts <= timestamp && timestamp <= self.end_ts
    }
}
