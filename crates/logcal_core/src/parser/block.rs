//! Block splitter and field extractor for daily log files.
//!
//! # Responsibility
//! - Split file content on `---` separator lines into trimmed blocks.
//! - Extract `time` / `notes` fields from one block, line by line.
//!
//! # Invariants
//! - Empty blocks never reach the extractor.
//! - A block becomes a record only when it carries a non-empty time.
//! - Time values are kept verbatim apart from redundant `time:` labels.

use crate::model::event::EventRecord;
use once_cell::sync::Lazy;
use regex::Regex;

// Labels may sit anywhere in the line (`- time:`, `> notes:`, `**time:**`).
static TIME_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)time:(?:\*\*|__)?\s*(.*)$").expect("valid time line regex")
});
static NOTES_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)notes:(?:\*\*|__)?\s*(.*)$").expect("valid notes line regex")
});
static REPEATED_TIME_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:time:\s*)+").expect("valid time label regex"));

const BLOCK_SEPARATOR: &str = "---";

/// Why a block produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `time:` line in the block.
    MissingTime,
    /// A `time:` line exists but its value is empty.
    EmptyTime,
}

/// Tagged result of extracting one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Record(EventRecord),
    Skipped(SkipReason),
}

/// Classification of one block line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldLine<'a> {
    Time(&'a str),
    Notes(&'a str),
    Other,
}

/// Fields collected while walking one block.
#[derive(Debug, Default)]
struct BlockFields {
    time: Option<String>,
    notes: Option<String>,
}

impl BlockFields {
    fn accept(mut self, line: FieldLine<'_>) -> Self {
        match line {
            FieldLine::Time(raw) => self.time = Some(strip_time_labels(raw)),
            FieldLine::Notes(raw) => self.notes = Some(strip_one_quote_layer(raw).to_string()),
            FieldLine::Other => {}
        }
        self
    }

    fn finish(self, date_key: &str) -> BlockOutcome {
        match self.time {
            None => BlockOutcome::Skipped(SkipReason::MissingTime),
            Some(time) if time.is_empty() => BlockOutcome::Skipped(SkipReason::EmptyTime),
            Some(time) => BlockOutcome::Record(EventRecord {
                time,
                notes: self.notes.unwrap_or_default(),
                original_date: date_key.to_string(),
            }),
        }
    }
}

/// Splits content into trimmed, non-empty blocks.
///
/// A separator is a line whose trimmed text is exactly `---`, so CRLF files
/// and indented separators split the same way.
pub fn split_blocks(content: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = 0usize;
    let mut offset = 0usize;

    for line in content.split_inclusive('\n') {
        if line.trim() == BLOCK_SEPARATOR {
            blocks.push(&content[start..offset]);
            start = offset + line.len();
        }
        offset += line.len();
    }
    blocks.push(&content[start..]);

    blocks
        .into_iter()
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Extracts one block into a record or a skip reason.
///
/// A line carrying a `time:` label counts as the time line even when it also
/// mentions `notes:`. Later labels of the same kind replace earlier ones.
pub fn extract_block(block: &str, date_key: &str) -> BlockOutcome {
    block
        .lines()
        .map(classify_line)
        .fold(BlockFields::default(), BlockFields::accept)
        .finish(date_key)
}

/// Runs splitter and extractor over full file content.
pub fn parse_blocks(content: &str, date_key: &str) -> Vec<BlockOutcome> {
    split_blocks(content)
        .into_iter()
        .map(|block| extract_block(block, date_key))
        .collect()
}

/// Returns the records of one file in block order.
pub fn parse_log_file(date_key: &str, content: &str) -> Vec<EventRecord> {
    parse_blocks(content, date_key)
        .into_iter()
        .filter_map(|outcome| match outcome {
            BlockOutcome::Record(record) => Some(record),
            BlockOutcome::Skipped(_) => None,
        })
        .collect()
}

fn classify_line(line: &str) -> FieldLine<'_> {
    if let Some(value) = TIME_LINE_RE.captures(line).and_then(|caps| caps.get(1)) {
        return FieldLine::Time(value.as_str());
    }
    if let Some(value) = NOTES_LINE_RE.captures(line).and_then(|caps| caps.get(1)) {
        return FieldLine::Notes(value.as_str());
    }
    FieldLine::Other
}

fn strip_time_labels(raw: &str) -> String {
    REPEATED_TIME_LABEL_RE
        .replace(raw.trim(), "")
        .trim()
        .to_string()
}

fn strip_one_quote_layer(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed)
}
