//! Events and the insertion-ordered event store.
//!
//! An [`Event`] is a time range with display hints: a summary, a "mask" flag
//! that greys out the span, CSS classes for the cells on its start day and CSS
//! classes for the box its summary is drawn in. Events are immutable once
//! built; the store only ever appends or clears.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::DateInput;
use crate::error::{CalendarError, Result};

/// A time-ranged calendar entry.
///
/// `start <= end` is assumed, not checked. An inverted range never lands in
/// a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    start: NaiveDateTime,
    end: NaiveDateTime,
    summary: String,
    mask: bool,
    classes: Vec<String>,
    box_classes: Vec<String>,
}

impl Event {
    /// Build an event from two date inputs (text or structured).
    ///
    /// # Errors
    /// Returns `CalendarError::DateParse` if either input cannot be parsed.
    ///
    /// # Example
    /// ```
    /// use calgrid::Event;
    ///
    /// let event = Event::new("2024-02-14 09:00", "2024-02-14 10:30")
    ///     .unwrap()
    ///     .with_summary("Standup")
    ///     .with_classes(["team", "daily"]);
    /// assert_eq!(event.summary(), "Standup");
    /// assert_eq!(event.classes(), ["team", "daily"]);
    /// ```
    pub fn new(start: impl Into<DateInput>, end: impl Into<DateInput>) -> Result<Self> {
        let start = start.into().resolve()?;
        let end = end.into().resolve()?;
        Ok(Self::from_range(start, end))
    }

    /// Build an event from already-resolved instants.
    pub fn from_range(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            summary: String::new(),
            mask: false,
            classes: Vec::new(),
            box_classes: Vec::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn masked(mut self, mask: bool) -> Self {
        self.mask = mask;
        self
    }

    /// Classes added to every cell on the event's start day.
    /// Whitespace-separated entries are split; duplicates are dropped.
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_classes(&mut self.classes, classes);
        self
    }

    /// Classes added to the box that holds the event's summary.
    pub fn with_box_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_classes(&mut self.box_classes, classes);
        self
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn is_masked(&self) -> bool {
        self.mask
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn box_classes(&self) -> &[String] {
        &self.box_classes
    }
}

fn extend_classes<I, S>(target: &mut Vec<String>, classes: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for class in classes {
        for name in class.as_ref().split_whitespace() {
            if !target.iter().any(|c| c == name) {
                target.push(name.to_string());
            }
        }
    }
}

/// Loosely-typed event description for bulk loading, e.g. from JSON.
///
/// `start` and `end` are required; they are optional here so that a missing
/// field can be reported with the entry's position instead of failing the
/// whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub start: Option<DateInput>,
    pub end: Option<DateInput>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub mask: bool,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub event_box_classes: Vec<String>,
}

impl EventInput {
    pub fn new(start: impl Into<DateInput>, end: impl Into<DateInput>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
            ..Self::default()
        }
    }

    /// Validate and resolve into an [`Event`]. `index` is the entry's
    /// position in its batch and only used for error reporting.
    ///
    /// # Errors
    /// `CalendarError::MissingField` if `start` or `end` is absent,
    /// `CalendarError::DateParse` if either cannot be parsed.
    pub fn into_event(self, index: usize) -> Result<Event> {
        let start = self.start.ok_or(CalendarError::MissingField {
            field: "start",
            index,
        })?;
        let end = self.end.ok_or(CalendarError::MissingField {
            field: "end",
            index,
        })?;
        Ok(Event::new(start, end)?
            .with_summary(self.summary)
            .masked(self.mask)
            .with_classes(&self.classes)
            .with_box_classes(&self.event_box_classes))
    }
}

/// Parse a JSON array of event descriptions.
///
/// # Errors
/// Returns `CalendarError::JsonParse` if the document is not an array of
/// objects with the expected field types.
pub fn parse_event_list(json: &str) -> Result<Vec<EventInput>> {
    Ok(serde_json::from_str(json)?)
}

/// Position of an event in its [`EventStore`]; stable until the store is
/// cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventId(usize);

impl EventId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Insertion-ordered collection of events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) -> EventId {
        self.events.push(event);
        EventId(self.events.len() - 1)
    }

    /// Add a batch of inputs in order. On the first invalid entry the error
    /// is returned and every entry before it stays added.
    pub fn extend_inputs<I>(&mut self, inputs: I) -> Result<()>
    where
        I: IntoIterator<Item = EventInput>,
    {
        let before = self.events.len();
        for (index, input) in inputs.into_iter().enumerate() {
            let event = input.into_event(index)?;
            self.push(event);
        }
        debug!(added = self.events.len() - before, total = self.events.len(), "events added");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EventId, &Event)> + '_ {
        self.events
            .iter()
            .enumerate()
            .map(|(index, event)| (EventId(index), event))
    }
}
