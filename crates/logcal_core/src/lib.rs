//! Core logic for the dated-log calendar.
//! Reads `YYYY-MM-DD.md` log files, parses event blocks and projects them
//! into a month calendar with a selected-day detail panel.

pub mod calendar;
pub mod logging;
pub mod model;
pub mod parser;
pub mod settings;
pub mod store;
pub mod view;
pub mod watch;

pub use calendar::detail::{format_time_display, DetailEntry, DetailPanel};
pub use calendar::grid::{DayCell, GridCell, MonthGrid};
pub use calendar::state::{CalendarAction, CalendarState};
pub use logging::{init_logging, init_logging_for_settings, level_for_settings, logging_status};
pub use model::event::{date_key, EventMap, EventRecord};
pub use parser::block::{parse_blocks, parse_log_file, BlockOutcome, SkipReason};
pub use parser::folder::{
    is_log_file_name, load_event_map, LoadError, LoadReport, LoadStats, ParseOptions,
};
pub use settings::{load_settings, save_settings, Settings, SettingsError};
pub use store::fs_store::FsLogStore;
pub use store::{EntryKind, LogStore};
pub use view::{CalendarView, OpenOutcome, RenderModel};
pub use watch::{ChangeKind, ChangeNotice, LogFolderWatcher, ReloadCoalescer, WatchError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
