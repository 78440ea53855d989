//! Folder loader: log folder -> event map.
//!
//! # Responsibility
//! - Validate the configured folder and list qualifying daily files.
//! - Parse each file and assemble the date-keyed event map.
//! - Emit metadata-only diagnostics for the load.
//!
//! # Invariants
//! - Only `YYYY-MM-DD.md` files contribute entries.
//! - One unreadable file never fails the whole load.
//! - The map is rebuilt from scratch on every call.

use crate::model::event::{is_date_key, EventMap};
use crate::parser::block::{parse_blocks, BlockOutcome};
use crate::store::{EntryKind, LogStore};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

const LOG_FILE_EXTENSION: &str = "md";

/// Options controlling loader diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Emits per-file and per-block skip diagnostics.
    pub debug_mode: bool,
}

/// Counters collected during one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub files_unreadable: usize,
    pub blocks_skipped: usize,
}

/// Successful load result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub events: EventMap,
    pub stats: LoadStats,
}

/// Folder-level load failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Nothing exists at the configured path.
    FolderNotFound(PathBuf),
    /// The configured path exists but is a file.
    NotADirectory(PathBuf),
    /// The folder exists but could not be listed.
    ListFailed { path: PathBuf, message: String },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FolderNotFound(path) => {
                write!(f, "Log folder not found: {}", path.display())
            }
            Self::NotADirectory(path) => {
                write!(f, "Log folder path is not a folder: {}", path.display())
            }
            Self::ListFailed { path, message } => {
                write!(f, "Failed to list log folder {}: {message}", path.display())
            }
        }
    }
}

impl Error for LoadError {}

/// Returns the date key when `file_name` is a daily log file name.
pub fn is_log_file_name(file_name: &str) -> Option<&str> {
    let stem = file_name.strip_suffix(LOG_FILE_EXTENSION)?.strip_suffix('.')?;
    is_date_key(stem).then_some(stem)
}

/// Loads every daily log file in `folder` into a fresh event map.
///
/// # Errors
/// - `FolderNotFound` when the path resolves to nothing.
/// - `NotADirectory` when the path resolves to a file.
/// - `ListFailed` when the folder cannot be listed.
pub fn load_event_map(
    store: &impl LogStore,
    folder: &Path,
    options: ParseOptions,
) -> Result<LoadReport, LoadError> {
    let started_at = Instant::now();

    match store.entry_kind(folder) {
        Some(EntryKind::Folder) => {}
        Some(EntryKind::File) => return Err(LoadError::NotADirectory(folder.to_path_buf())),
        None => return Err(LoadError::FolderNotFound(folder.to_path_buf())),
    }

    let children = store
        .list_children(folder)
        .map_err(|err| LoadError::ListFailed {
            path: folder.to_path_buf(),
            message: err.to_string(),
        })?;

    let mut events = EventMap::new();
    let mut stats = LoadStats::default();

    for child in children {
        stats.files_scanned += 1;

        let Some(date_key) = child
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(is_log_file_name)
            .map(str::to_string)
        else {
            stats.files_skipped += 1;
            if options.debug_mode {
                debug!(
                    "event=log_file_skip module=parser status=skip reason=name_mismatch path={}",
                    child.display()
                );
            }
            continue;
        };

        if store.entry_kind(&child) != Some(EntryKind::File) {
            stats.files_skipped += 1;
            continue;
        }

        let content = match store.read_text(&child) {
            Ok(content) => content,
            Err(err) => {
                stats.files_unreadable += 1;
                warn!(
                    "event=log_file_read module=parser status=error path={} error={}",
                    child.display(),
                    err
                );
                continue;
            }
        };

        let mut records = Vec::new();
        for (index, outcome) in parse_blocks(&content, &date_key).into_iter().enumerate() {
            match outcome {
                BlockOutcome::Record(record) => records.push(record),
                BlockOutcome::Skipped(reason) => {
                    stats.blocks_skipped += 1;
                    if options.debug_mode {
                        debug!(
                            "event=log_block_skip module=parser status=skip date={} block={} reason={:?}",
                            date_key, index, reason
                        );
                    }
                }
            }
        }
        events.insert_day(date_key, records);
    }

    info!(
        "event=log_load module=parser status=ok folder={} files={} skipped={} unreadable={} days={} events={} duration_ms={}",
        folder.display(),
        stats.files_scanned,
        stats.files_skipped,
        stats.files_unreadable,
        events.len(),
        events.total_events(),
        started_at.elapsed().as_millis()
    );

    Ok(LoadReport { events, stats })
}
