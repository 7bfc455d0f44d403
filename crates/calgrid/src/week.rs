//! Week grid builder.
//!
//! Rows are time slots, columns the seven days of the week containing the
//! queried date. An event that covers several cells shows its summary in the
//! first one (row-major) and a blank placeholder in the rest, so it reads as
//! one block.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use tracing::debug;

use crate::config::CalendarConfig;
use crate::date::{week_start, DAYS_IN_WEEK};
use crate::event::EventStore;
use crate::grid::{Cell, EventDisplay, SlotRow, SpanPosition, WeekGrid};
use crate::matcher::{find_events, MatchMode};

/// Build the grid for the week containing `date`.
///
/// `now` flags the cells sharing its date and hour as today.
pub fn build_week_grid(
    date: NaiveDate,
    config: &CalendarConfig,
    events: &EventStore,
    now: NaiveDateTime,
) -> WeekGrid {
    let first_day = week_start(date, config.starting_day());
    let days: Vec<NaiveDate> = (0..DAYS_IN_WEEK)
        .map(|i| first_day + Duration::days(i as i64))
        .collect();
    let interval = Duration::minutes(i64::from(config.interval_minutes()));
    let slots = config.time_slots();

    debug!(
        week_start = %first_day,
        slots = slots.len(),
        events = events.len(),
        "building week grid"
    );

    // Events whose summary has already been placed in this grid.
    let mut labelled = HashSet::new();
    let mut rows = Vec::with_capacity(slots.len());

    for slot in slots {
        let mut cells = Vec::with_capacity(DAYS_IN_WEEK);
        for &day in &days {
            let mut cell = Cell::day(day);
            cell.is_today = day == now.date() && slot.start.hour() == now.hour();

            let from = day.and_time(slot.start);
            for (id, event) in find_events(events, from, from + interval, MatchMode::Week) {
                // A slot crossing midnight can touch an event that starts the
                // next day; that event belongs to the next column.
                let Some(position) = SpanPosition::classify(day, event) else {
                    continue;
                };
                let display = if labelled.insert(id) {
                    EventDisplay::Summary
                } else {
                    EventDisplay::Placeholder
                };
                cell.place(id, event, position, display);
            }
            cells.push(cell);
        }
        rows.push(SlotRow { slot, cells });
    }

    WeekGrid {
        week_start: first_day,
        days,
        rows,
    }
}
