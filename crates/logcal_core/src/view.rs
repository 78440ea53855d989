//! Calendar view controller.
//!
//! # Responsibility
//! - Own settings, the storage collaborator and the calendar state.
//! - Run full reloads and route change notices into them.
//! - Produce the render model the host draws.
//!
//! # Invariants
//! - State changes only through `CalendarState::apply`.
//! - Every reload replaces the event map wholesale.
//! - Open-file failures are logged and never surfaced as errors.

use crate::calendar::detail::DetailPanel;
use crate::calendar::grid::MonthGrid;
use crate::calendar::state::{CalendarAction, CalendarState};
use crate::model::event::date_key;
use crate::parser::folder::{load_event_map, LoadError, LoadStats, ParseOptions};
use crate::settings::Settings;
use crate::store::{EntryKind, LogStore};
use crate::watch::ChangeNotice;
use chrono::NaiveDate;
use log::{debug, error, warn};
use std::path::{Path, PathBuf};

/// What the host should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderModel {
    /// Persistent message shown instead of the grid.
    Error { message: String },
    Calendar {
        title: String,
        grid: MonthGrid,
        detail: Option<DetailPanel>,
    },
}

/// Result of the detail panel's open-file action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened(PathBuf),
    Missing(PathBuf),
    Failed(PathBuf),
    NoSelection,
}

/// Side-panel calendar bound to one log folder.
pub struct CalendarView<S: LogStore> {
    store: S,
    settings: Settings,
    state: CalendarState,
}

impl<S: LogStore> CalendarView<S> {
    /// Creates a view without loading anything yet.
    pub fn new(store: S, settings: Settings, today: NaiveDate) -> Self {
        Self {
            store,
            settings,
            state: CalendarState::new(today),
        }
    }

    /// Creates a view and performs the initial load.
    ///
    /// A failed load leaves the view in its error state.
    pub fn mount(store: S, settings: Settings, today: NaiveDate) -> Self {
        let mut view = Self::new(store, settings, today);
        let _ = view.reload();
        view
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn folder(&self) -> PathBuf {
        self.settings.logs_folder_path()
    }

    /// Re-scans the log folder and replaces the event map.
    pub fn reload(&mut self) -> Result<LoadStats, LoadError> {
        let folder = self.folder();
        let options = ParseOptions {
            debug_mode: self.settings.debug_mode,
        };

        match load_event_map(&self.store, &folder, options) {
            Ok(report) => {
                self.dispatch(CalendarAction::LoadSucceeded(report.events));
                Ok(report.stats)
            }
            Err(err) => {
                warn!(
                    "event=calendar_reload module=view status=error folder={} error={}",
                    folder.display(),
                    err
                );
                self.dispatch(CalendarAction::LoadFailed(err.clone()));
                Err(err)
            }
        }
    }

    /// Reloads once when any notice touches the currently configured folder.
    ///
    /// Notice paths and the folder are both resolved through the store, so a
    /// vault-relative notice matches an absolute folder setting.
    /// Returns whether a reload ran.
    pub fn handle_changes(&mut self, notices: &[ChangeNotice]) -> bool {
        let folder = self.store.resolve(&self.folder());
        let relevant = notices
            .iter()
            .filter(|notice| self.touches_folder(notice, &folder))
            .count();
        if relevant == 0 {
            return false;
        }
        if self.settings.debug_mode {
            debug!(
                "event=calendar_invalidate module=view status=ok notices={} relevant={}",
                notices.len(),
                relevant
            );
        }
        let _ = self.reload();
        true
    }

    /// Replaces settings and reloads from the (possibly new) folder.
    pub fn update_settings(&mut self, settings: Settings) -> Result<LoadStats, LoadError> {
        self.settings = settings;
        self.reload()
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.dispatch(CalendarAction::DateSelected(date));
    }

    pub fn change_month(&mut self, delta: i32) {
        self.dispatch(CalendarAction::MonthChanged(delta));
    }

    pub fn jump_to_today(&mut self, today: NaiveDate) {
        self.dispatch(CalendarAction::JumpToToday(today));
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.dispatch(CalendarAction::TodayChanged(today));
    }

    /// Asks the store to open the selected day's log file.
    pub fn open_selected_file(&self) -> OpenOutcome {
        let Some(date) = self.state.selected else {
            return OpenOutcome::NoSelection;
        };
        let path = self.folder().join(format!("{}.md", date_key(date)));

        if self.store.entry_kind(&path) != Some(EntryKind::File) {
            error!(
                "event=log_file_open module=view status=error reason=not_found path={}",
                path.display()
            );
            return OpenOutcome::Missing(path);
        }

        match self.store.open_file(&path) {
            Ok(()) => OpenOutcome::Opened(path),
            Err(err) => {
                error!(
                    "event=log_file_open module=view status=error path={} error={}",
                    path.display(),
                    err
                );
                OpenOutcome::Failed(path)
            }
        }
    }

    pub fn render(&self) -> RenderModel {
        if let Some(err) = &self.state.error {
            return RenderModel::Error {
                message: err.to_string(),
            };
        }
        let grid = self.state.grid();
        RenderModel::Calendar {
            title: grid.title(),
            grid,
            detail: self.state.detail(),
        }
    }

    fn touches_folder(&self, notice: &ChangeNotice, folder: &Path) -> bool {
        ChangeNotice::new(notice.kind, self.store.resolve(&notice.path)).is_under(folder)
    }

    fn dispatch(&mut self, action: CalendarAction) {
        self.state = self.state.apply(action);
    }
}
