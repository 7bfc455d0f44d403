//! Month grid builder.
//!
//! Lays a month out as complete seven-day rows, padded with neighbouring
//! month dates at both ends, and records every event covering each day.
//!
//! # Example
//! ```
//! use calgrid::{build_month_grid, CalendarConfig, Event, EventStore};
//! use chrono::NaiveDate;
//!
//! let mut events = EventStore::new();
//! events.push(Event::new("2024-02-14", "2024-02-16").unwrap().masked(true));
//!
//! let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
//! let now = feb.and_hms_opt(12, 0, 0).unwrap();
//! let grid = build_month_grid(feb, &CalendarConfig::default(), &events, now);
//!
//! assert_eq!(grid.rows.len(), 5);
//! assert_eq!(grid.leading_padding(), 4);
//! assert_eq!(grid.trailing_padding(), 2);
//! let day = |d| grid.day(NaiveDate::from_ymd_opt(2024, 2, d).unwrap()).unwrap();
//! assert!(day(14).has_class("mask-start"));
//! assert!(day(15).has_class("mask"));
//! assert!(day(16).has_class("mask-end"));
//! ```

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::config::CalendarConfig;
use crate::date::{days_in_month, first_of_month, DAYS_IN_WEEK};
use crate::event::EventStore;
use crate::grid::{Cell, EventDisplay, MonthGrid, SpanPosition, WeekRow};
use crate::matcher::{find_events, MatchMode};

/// Build the grid for the month containing `date`.
///
/// `now` decides which cell is flagged as today.
pub fn build_month_grid(
    date: NaiveDate,
    config: &CalendarConfig,
    events: &EventStore,
    now: NaiveDateTime,
) -> MonthGrid {
    let first = first_of_month(date);
    let days = days_in_month(first);
    let starting_day = config.starting_day();
    let leading = starting_day.column_of(first.weekday());

    debug!(month = %first, days, leading, events = events.len(), "building month grid");

    let mut rows = Vec::with_capacity(6);
    let mut current: Vec<Cell> = (1..=leading)
        .rev()
        .map(|back| Cell::padding(first - Duration::days(back as i64)))
        .collect();

    for offset in 0..days {
        let day = first + Duration::days(i64::from(offset));

        // Rows break on the configured first weekday, never on a cell count.
        if day.weekday() == starting_day.weekday() && !current.is_empty() {
            rows.push(WeekRow::new(std::mem::take(&mut current)));
        }

        let mut cell = Cell::day(day);
        cell.is_today = day == now.date();

        let midnight = day.and_time(NaiveTime::MIN);
        for (id, event) in find_events(events, midnight, midnight, MatchMode::Month) {
            let Some(position) = SpanPosition::classify(day, event) else {
                continue;
            };
            let display = if position.is_start() {
                EventDisplay::Summary
            } else {
                EventDisplay::Hidden
            };
            cell.place(id, event, position, display);
        }
        current.push(cell);
    }

    let after_month = first + Duration::days(i64::from(days));
    let trailing = (DAYS_IN_WEEK - current.len() % DAYS_IN_WEEK) % DAYS_IN_WEEK;
    current.extend((0..trailing).map(|i| Cell::padding(after_month + Duration::days(i as i64))));
    rows.push(WeekRow::new(current));

    MonthGrid { month: first, rows }
}
