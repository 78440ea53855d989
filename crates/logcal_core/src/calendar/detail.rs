//! Selected-day detail panel.
//!
//! # Responsibility
//! - List the selected day's events in file-block order.
//! - Format time values for display without ever failing.

use crate::model::event::{date_key, EventMap};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};

/// Short time format used by the panel (`03:19 PM`).
pub const SHORT_TIME_FORMAT: &str = "%I:%M %p";

const OFFSET_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One row of the detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEntry {
    /// Short local time, or the raw time text when it is not a timestamp.
    pub time_display: String,
    pub raw_time: String,
    pub notes: String,
}

/// Events of the selected date plus the file the open action targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub date: chrono::NaiveDate,
    /// `YYYY-MM-DD.md`, resolved against the log folder by the caller.
    pub file_name: String,
    pub entries: Vec<DetailEntry>,
}

impl DetailPanel {
    /// Builds the panel with times shown in the local time zone.
    pub fn build(date: chrono::NaiveDate, events: &EventMap) -> Self {
        Self::build_in(date, events, &Local)
    }

    /// Builds the panel with times converted into `tz`.
    pub fn build_in<Tz>(date: chrono::NaiveDate, events: &EventMap, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let entries = events
            .events_on(date)
            .iter()
            .map(|record| DetailEntry {
                time_display: format_time_display_in(&record.time, tz),
                raw_time: record.time.clone(),
                notes: record.notes.clone(),
            })
            .collect();

        Self {
            date,
            file_name: format!("{}.md", date_key(date)),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Formats a raw time value as a short local time, falling back to the raw
/// text when it does not parse.
pub fn format_time_display(raw: &str) -> String {
    format_time_display_in(raw, &Local)
}

/// Same as [`format_time_display`] with an explicit display zone.
///
/// Offset-less timestamps are read as wall-clock time in `tz`.
pub fn format_time_display_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let trimmed = raw.trim();
    if let Some(instant) = parse_offset_timestamp(trimmed) {
        return instant
            .with_timezone(tz)
            .format(SHORT_TIME_FORMAT)
            .to_string();
    }
    if let Some(naive) = parse_naive_timestamp(trimmed) {
        return naive.format(SHORT_TIME_FORMAT).to_string();
    }
    raw.to_string()
}

fn parse_offset_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok().or_else(|| {
        OFFSET_TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(value, format).ok())
    })
}

fn parse_naive_timestamp(value: &str) -> Option<NaiveDateTime> {
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
