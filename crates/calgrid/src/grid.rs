//! Intermediate grid model shared by the month and week builders.
//!
//! Builders produce these values; the renderer only reads them. Nothing here
//! knows about markup.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;

use crate::date::DAYS_IN_WEEK;
use crate::event::{Event, EventId};

/// Where a cell's date sits within an event's day span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanPosition {
    /// The event's first day (and not its last).
    Start,
    /// Strictly between the first and last day.
    Middle,
    /// The event's last day (and not its first).
    End,
    /// The event starts and ends on this day.
    Single,
}

impl SpanPosition {
    /// Classify `date` against the event's start and end days. `None` when
    /// the date lies outside the span or the event ends before it starts.
    pub fn classify(date: NaiveDate, event: &Event) -> Option<Self> {
        let (first, last) = (event.start_date(), event.end_date());
        if event.end() < event.start() || date < first || date > last {
            return None;
        }
        Some(match (date == first, date == last) {
            (true, true) => SpanPosition::Single,
            (true, false) => SpanPosition::Start,
            (false, true) => SpanPosition::End,
            (false, false) => SpanPosition::Middle,
        })
    }

    pub fn is_start(self) -> bool {
        matches!(self, SpanPosition::Start | SpanPosition::Single)
    }

    pub fn is_end(self) -> bool {
        matches!(self, SpanPosition::End | SpanPosition::Single)
    }

    /// The mask class for this position. Single-day spans use the start
    /// class.
    pub fn mask_class(self) -> &'static str {
        match self {
            SpanPosition::Start | SpanPosition::Single => "mask-start",
            SpanPosition::Middle => "mask",
            SpanPosition::End => "mask-end",
        }
    }
}

/// What the renderer draws for an event in a given cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventDisplay {
    /// The event's summary text.
    Summary,
    /// An empty box continuing a summary drawn in an earlier cell.
    Placeholder,
    /// Nothing; the event only contributes classes.
    Hidden,
}

/// One event's presence in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellEvent {
    pub id: EventId,
    pub position: SpanPosition,
    pub display: EventDisplay,
}

/// A single day cell (a day column of a time slot in week view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub is_padding: bool,
    pub is_today: bool,
    pub events: Vec<CellEvent>,
    pub classes: Vec<String>,
}

impl Cell {
    pub(crate) fn day(date: NaiveDate) -> Self {
        Self {
            date,
            weekday: date.weekday(),
            is_padding: false,
            is_today: false,
            events: Vec::new(),
            classes: Vec::new(),
        }
    }

    /// Filler cell outside the displayed month. It keeps its real date so
    /// the weekday is right for styling.
    pub(crate) fn padding(date: NaiveDate) -> Self {
        Self {
            is_padding: true,
            ..Self::day(date)
        }
    }

    /// Record `event` in this cell and apply its span classes.
    pub(crate) fn place(
        &mut self,
        id: EventId,
        event: &Event,
        position: SpanPosition,
        display: EventDisplay,
    ) {
        if event.is_masked() {
            self.add_class(position.mask_class());
        }
        if position.is_start() {
            for class in event.classes() {
                self.add_class(class);
            }
        }
        self.events.push(CellEvent {
            id,
            position,
            display,
        });
    }

    fn add_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// This cell's entry for `id`, if the event touches it.
    pub fn event(&self, id: EventId) -> Option<&CellEvent> {
        self.events.iter().find(|e| e.id == id)
    }
}

/// Seven consecutive cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeekRow {
    cells: Vec<Cell>,
}

impl WeekRow {
    pub(crate) fn new(cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), DAYS_IN_WEEK, "a week row holds seven cells");
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// A month laid out as complete weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    /// First day of the displayed month.
    pub month: NaiveDate,
    pub rows: Vec<WeekRow>,
}

impl MonthGrid {
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().flat_map(|row| row.cells().iter())
    }

    /// The non-padding cell for `date`.
    pub fn day(&self, date: NaiveDate) -> Option<&Cell> {
        self.cells().find(|c| !c.is_padding && c.date == date)
    }

    pub fn leading_padding(&self) -> usize {
        self.cells().take_while(|c| c.is_padding).count()
    }

    pub fn trailing_padding(&self) -> usize {
        self.rows
            .last()
            .map_or(0, |row| row.cells().iter().rev().take_while(|c| c.is_padding).count())
    }
}

/// A half-open time-of-day range `[start, start + interval)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// A time slot across the seven days of a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotRow {
    pub slot: TimeSlot,
    pub cells: Vec<Cell>,
}

/// A week laid out as time-slot rows by day columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekGrid {
    pub week_start: NaiveDate,
    pub days: Vec<NaiveDate>,
    pub rows: Vec<SlotRow>,
}

impl WeekGrid {
    pub fn cells(&self) -> impl Iterator<Item = (&TimeSlot, &Cell)> + '_ {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter().map(move |cell| (&row.slot, cell)))
    }

    /// The cell for `date` in the row whose slot starts at `start`.
    pub fn cell(&self, date: NaiveDate, start: NaiveTime) -> Option<&Cell> {
        self.rows
            .iter()
            .find(|row| row.slot.start == start)
            .and_then(|row| row.cells.iter().find(|c| c.date == date))
    }
}
