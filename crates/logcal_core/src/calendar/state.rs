//! Immutable calendar UI state and its reducer.
//!
//! # Responsibility
//! - Hold displayed month, selection, event map and load error.
//! - Apply load/navigation/selection actions as pure transitions.
//!
//! # Invariants
//! - `month` is always the first day of a month.
//! - A failed load always clears the event map.
//! - A successful load always clears the error.

use crate::calendar::detail::DetailPanel;
use crate::calendar::grid::{first_of_month, shift_month, MonthGrid};
use crate::model::event::EventMap;
use crate::parser::folder::LoadError;
use chrono::NaiveDate;

/// State transition inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarAction {
    LoadSucceeded(EventMap),
    LoadFailed(LoadError),
    MonthChanged(i32),
    DateSelected(NaiveDate),
    JumpToToday(NaiveDate),
    /// Advances the real-world date used for today/future flags.
    TodayChanged(NaiveDate),
}

/// Snapshot of everything the calendar renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub month: NaiveDate,
    pub selected: Option<NaiveDate>,
    pub events: EventMap,
    pub error: Option<LoadError>,
    pub today: NaiveDate,
}

impl CalendarState {
    /// Initial state: today's month, nothing selected, nothing loaded.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: first_of_month(today),
            selected: None,
            events: EventMap::new(),
            error: None,
            today,
        }
    }

    /// Returns the state after `action`.
    pub fn apply(&self, action: CalendarAction) -> Self {
        let mut next = self.clone();
        match action {
            CalendarAction::LoadSucceeded(events) => {
                next.events = events;
                next.error = None;
            }
            CalendarAction::LoadFailed(error) => {
                next.events = EventMap::new();
                next.error = Some(error);
            }
            CalendarAction::MonthChanged(delta) => {
                next.month = shift_month(self.month, delta);
            }
            CalendarAction::DateSelected(date) => {
                next.selected = Some(date);
            }
            CalendarAction::JumpToToday(today) => {
                next.today = today;
                next.month = first_of_month(today);
                next.selected = Some(today);
            }
            CalendarAction::TodayChanged(today) => {
                next.today = today;
            }
        }
        next
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::build(self.month, &self.events, self.today, self.selected)
    }

    /// Detail panel for the selected date, if any.
    pub fn detail(&self) -> Option<DetailPanel> {
        self.selected
            .map(|date| DetailPanel::build(date, &self.events))
    }
}
