//! Event record and date-keyed event map.
//!
//! # Responsibility
//! - Define the record extracted from one `---`-delimited log block.
//! - Group records by the `YYYY-MM-DD` key of the file they came from.
//!
//! # Invariants
//! - Map keys always match `^\d{4}-\d{2}-\d{2}$`.
//! - A key is present only when at least one record exists for it.
//! - Records under one key keep file-block order.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date key regex"));

/// Date key format shared by filenames and map keys.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// One logged occurrence parsed out of a daily log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Free-form time value, ideally an ISO-8601 timestamp. Kept verbatim.
    pub time: String,
    /// Notes text with one layer of surrounding quotes removed.
    pub notes: String,
    /// `YYYY-MM-DD` taken from the source filename.
    pub original_date: String,
}

/// Returns whether `value` has the `YYYY-MM-DD` key shape.
///
/// Only the shape is checked; `2026-02-30` is still a valid key.
pub fn is_date_key(value: &str) -> bool {
    DATE_KEY_RE.is_match(value)
}

/// Formats a calendar date as its map key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Date-keyed collection of event records, rebuilt on every reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventMap {
    entries: BTreeMap<String, Vec<EventRecord>>,
}

impl EventMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the records of one file under its date key.
    ///
    /// Empty record lists and malformed keys are ignored so the map never
    /// carries a key without events.
    pub fn insert_day(&mut self, key: impl Into<String>, records: Vec<EventRecord>) {
        let key = key.into();
        if records.is_empty() || !is_date_key(&key) {
            return;
        }
        self.entries.entry(key).or_default().extend(records);
    }

    /// Records for one date in file-block order.
    pub fn events_on(&self, date: NaiveDate) -> &[EventRecord] {
        self.events_for_key(&date_key(date))
    }

    pub fn events_for_key(&self, key: &str) -> &[EventRecord] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn event_count(&self, date: NaiveDate) -> usize {
        self.events_on(date).len()
    }

    pub fn total_events(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Sorted date keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
