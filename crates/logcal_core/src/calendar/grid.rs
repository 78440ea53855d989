//! Month grid projection.
//!
//! # Responsibility
//! - Lay out one month as 7-column weeks starting on Sunday.
//! - Attach per-day event counts and today/future/selected flags.
//!
//! # Invariants
//! - Leading blanks equal the weekday offset of the 1st.
//! - Cell count is always a multiple of 7.
//! - `is_future` compares calendar dates only, so today is never future.

use crate::model::event::EventMap;
use chrono::{Datelike, Months, NaiveDate};
use std::fmt::{Display, Formatter};

/// Column headings in grid order.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One populated day in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub event_count: usize,
    pub is_today: bool,
    pub is_future: bool,
    pub is_selected: bool,
}

/// Grid cell: padding or a day of the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            Self::Day(cell) => Some(cell),
            Self::Blank => None,
        }
    }
}

/// Render-ready month layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// First day of the displayed month.
    pub month: NaiveDate,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    /// Builds the grid for the month containing `month`.
    pub fn build(
        month: NaiveDate,
        events: &EventMap,
        today: NaiveDate,
        selected: Option<NaiveDate>,
    ) -> Self {
        let first = first_of_month(month);
        let leading = first.weekday().num_days_from_sunday() as usize;
        let days = days_in_month(first);

        let mut cells = vec![GridCell::Blank; leading];
        cells.extend(first.iter_days().take(days as usize).map(|date| {
            GridCell::Day(DayCell {
                date,
                day: date.day(),
                event_count: events.event_count(date),
                is_today: date == today,
                is_future: date > today,
                is_selected: selected == Some(date),
            })
        }));
        while cells.len() % 7 != 0 {
            cells.push(GridCell::Blank);
        }

        Self {
            month: first,
            cells,
        }
    }

    /// `February 2026` style heading.
    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.cells
            .iter()
            .filter_map(GridCell::as_day)
            .find(|cell| cell.day == day)
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, GridCell::Blank))
            .count()
    }
}

impl Display for MonthGrid {
    /// Plain-text month view: `[14]` marks today, `*` the selection and
    /// `(n)` the event count.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title())?;
        let header = WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{label:^8}"))
            .collect::<String>();
        writeln!(f, "{}", header.trim_end())?;

        for week in self.weeks() {
            let line = week
                .iter()
                .map(|cell| match cell {
                    GridCell::Blank => format!("{:8}", ""),
                    GridCell::Day(day) => format!("{:<8}", day_label(day)),
                })
                .collect::<String>();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

fn day_label(cell: &DayCell) -> String {
    let mut label = if cell.is_today {
        format!("[{}]", cell.day)
    } else {
        cell.day.to_string()
    };
    if cell.is_selected {
        label.push('*');
    }
    if cell.event_count > 0 {
        label.push_str(&format!("({})", cell.event_count));
    }
    label
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shifts a month anchor by `delta` months, clamping at chrono's range.
pub fn shift_month(month: NaiveDate, delta: i32) -> NaiveDate {
    let first = first_of_month(month);
    let step = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        first.checked_add_months(step)
    } else {
        first.checked_sub_months(step)
    };
    shifted.unwrap_or(first)
}

fn days_in_month(first: NaiveDate) -> u32 {
    shift_month(first, 1)
        .pred_opt()
        .filter(|last| last.month() == first.month())
        .map(|last| last.day())
        .unwrap_or(31)
}
