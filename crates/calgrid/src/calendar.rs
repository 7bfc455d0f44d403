//! The `Calendar` facade: configuration, events and clock behind one value.

use std::collections::HashSet;

use chrono::{Locale, NaiveTime, Weekday};
use tracing::{debug, info};

use crate::config::{CalendarConfig, ViewType};
use crate::date::{parse_weekday, Clock, DateInput, DayNameFormat, StartingDay, SystemClock};
use crate::error::Result;
use crate::event::{parse_event_list, Event, EventInput, EventStore};
use crate::grid::{MonthGrid, WeekGrid};
use crate::month::build_month_grid;
use crate::render::{render_month, render_week};
use crate::week::build_week_grid;

/// A configurable calendar holding its own events.
///
/// Setters take `&mut self` and return it for chaining. Grids are built
/// fresh on every call and never change afterwards.
#[derive(Debug, Clone, Default)]
pub struct Calendar<C = SystemClock> {
    config: CalendarConfig,
    events: EventStore,
    clock: C,
}

impl Calendar<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> Calendar<C> {
    /// A calendar that asks `clock` for the current moment.
    pub fn with_clock(clock: C) -> Self {
        Self {
            config: CalendarConfig::default(),
            events: EventStore::new(),
            clock,
        }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CalendarConfig {
        &mut self.config
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    pub fn set_locale(&mut self, locale: Locale) -> &mut Self {
        self.config.set_locale(locale);
        self
    }

    pub fn set_day_name_format(&mut self, format: DayNameFormat) -> &mut Self {
        self.config.set_day_names(format);
        self
    }

    pub fn set_week_start(&mut self, starting_day: StartingDay) -> &mut Self {
        self.config.set_starting_day(starting_day);
        self
    }

    pub fn set_table_classes(&mut self, classes: impl Into<String>) -> &mut Self {
        self.config.set_table_classes(classes);
        self
    }

    pub fn use_month_view(&mut self) -> &mut Self {
        self.config.set_view(ViewType::Month);
        self
    }

    pub fn use_week_view(&mut self) -> &mut Self {
        self.config.set_view(ViewType::Week);
        self
    }

    pub fn hide_weekday(&mut self, weekday: Weekday) -> &mut Self {
        self.config.hide(weekday);
        self
    }

    pub fn show_weekday(&mut self, weekday: Weekday) -> &mut Self {
        self.config.show(weekday);
        self
    }

    pub fn toggle_hidden_weekday(&mut self, weekday: Weekday) -> &mut Self {
        self.config.toggle_hidden(weekday);
        self
    }

    pub fn set_hidden_weekdays(&mut self, days: HashSet<Weekday>) -> &mut Self {
        self.config.set_hidden_days(days);
        self
    }

    /// Hide a weekday given by name, e.g. `"saturdays"` or `"Sun"`.
    ///
    /// # Errors
    /// Returns `CalendarError::UnsupportedOperation` if `name` is not a
    /// weekday.
    pub fn hide_weekday_named(&mut self, name: &str) -> Result<&mut Self> {
        let weekday = parse_weekday(name)?;
        Ok(self.hide_weekday(weekday))
    }

    /// Set the week-view window and slot length.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidConfiguration` if `interval_minutes`
    /// is not positive.
    pub fn set_time_format(
        &mut self,
        start: NaiveTime,
        end: NaiveTime,
        interval_minutes: i64,
    ) -> Result<&mut Self> {
        self.config.set_time_format(start, end, interval_minutes)?;
        Ok(self)
    }

    /// Start times of the week-view slots, ascending and without duplicates.
    pub fn time_slots(&self) -> Vec<NaiveTime> {
        self.config
            .time_slots()
            .into_iter()
            .map(|slot| slot.start)
            .collect()
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    pub fn add_event(&mut self, event: Event) -> &mut Self {
        self.events.push(event);
        self
    }

    /// Add a batch of loosely-typed events in order.
    ///
    /// # Errors
    /// Stops at the first entry missing `start` or `end`
    /// (`CalendarError::MissingField`) or with an unparseable date
    /// (`CalendarError::DateParse`). Entries before it remain added.
    pub fn add_events<I>(&mut self, inputs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = EventInput>,
    {
        self.events.extend_inputs(inputs)?;
        Ok(self)
    }

    /// Add events from a JSON array of event objects.
    ///
    /// # Errors
    /// As [`Calendar::add_events`], plus `CalendarError::JsonParse` for
    /// malformed JSON (in which case nothing is added).
    pub fn add_events_json(&mut self, json: &str) -> Result<&mut Self> {
        let inputs = parse_event_list(json)?;
        self.add_events(inputs)
    }

    pub fn clear_events(&mut self) -> &mut Self {
        self.events.clear();
        debug!("events cleared");
        self
    }

    // -----------------------------------------------------------------------
    // Building and rendering
    // -----------------------------------------------------------------------

    /// The month grid for the month containing `date`.
    ///
    /// # Errors
    /// Returns `CalendarError::DateParse` for unparseable text input.
    pub fn month_grid(&self, date: impl Into<DateInput>) -> Result<MonthGrid> {
        let date = date.into().resolve_date()?;
        Ok(build_month_grid(
            date,
            &self.config,
            &self.events,
            self.clock.now(),
        ))
    }

    /// The week grid for the week containing `date`.
    ///
    /// # Errors
    /// Returns `CalendarError::DateParse` for unparseable text input.
    pub fn week_grid(&self, date: impl Into<DateInput>) -> Result<WeekGrid> {
        let date = date.into().resolve_date()?;
        Ok(build_week_grid(
            date,
            &self.config,
            &self.events,
            self.clock.now(),
        ))
    }

    /// Render the configured view around `date` as HTML, with `theme` added
    /// to the table's classes (pass `""` for none).
    ///
    /// # Errors
    /// Returns `CalendarError::DateParse` for unparseable text input; nothing
    /// is rendered in that case.
    pub fn render(&self, date: impl Into<DateInput>, theme: &str) -> Result<String> {
        let date = date.into();
        let view = self.config.view();
        info!(?view, theme, "rendering calendar");
        let html = match view {
            ViewType::Month => {
                let grid = self.month_grid(date)?;
                render_month(&grid, &self.config, &self.events, theme)
            }
            ViewType::Week => {
                let grid = self.week_grid(date)?;
                render_week(&grid, &self.config, &self.events, theme)
            }
        };
        Ok(html)
    }
}
