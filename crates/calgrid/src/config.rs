//! Calendar configuration: view, week layout, time slots, names and CSS hooks.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{Duration, Locale, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::date::{DayNameFormat, StartingDay};
use crate::error::{CalendarError, Result};
use crate::grid::TimeSlot;

pub const DEFAULT_INTERVAL_MINUTES: u32 = 30;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Which builder a render call dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Month,
    Week,
}

impl FromStr for ViewType {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(ViewType::Month),
            "week" => Ok(ViewType::Week),
            _ => Err(CalendarError::InvalidConfiguration(format!(
                "unknown view '{s}' (expected month or week)"
            ))),
        }
    }
}

/// Long-lived calendar settings, read by the builders on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConfig {
    locale: Locale,
    view: ViewType,
    interval_minutes: u32,
    start_time: NaiveTime,
    end_time: NaiveTime,
    day_names: DayNameFormat,
    starting_day: StartingDay,
    hidden_days: HashSet<Weekday>,
    table_classes: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            locale: Locale::en_US,
            view: ViewType::default(),
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            start_time: NaiveTime::MIN,
            end_time: NaiveTime::MIN,
            day_names: DayNameFormat::default(),
            starting_day: StartingDay::default(),
            hidden_days: HashSet::new(),
            table_classes: String::new(),
        }
    }
}

impl CalendarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn view(&self) -> ViewType {
        self.view
    }

    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn day_names(&self) -> DayNameFormat {
        self.day_names
    }

    pub fn starting_day(&self) -> StartingDay {
        self.starting_day
    }

    pub fn hidden_days(&self) -> &HashSet<Weekday> {
        &self.hidden_days
    }

    pub fn is_hidden(&self, weekday: Weekday) -> bool {
        self.hidden_days.contains(&weekday)
    }

    /// Day columns left visible (`7 - |hidden|`).
    pub fn visible_columns(&self) -> usize {
        7 - self.hidden_days.len()
    }

    pub fn table_classes(&self) -> &str {
        &self.table_classes
    }

    pub fn set_locale(&mut self, locale: Locale) -> &mut Self {
        self.locale = locale;
        self
    }

    pub fn set_view(&mut self, view: ViewType) -> &mut Self {
        self.view = view;
        self
    }

    pub fn set_day_names(&mut self, format: DayNameFormat) -> &mut Self {
        self.day_names = format;
        self
    }

    pub fn set_starting_day(&mut self, starting_day: StartingDay) -> &mut Self {
        self.starting_day = starting_day;
        self
    }

    pub fn set_table_classes(&mut self, classes: impl Into<String>) -> &mut Self {
        self.table_classes = classes.into();
        self
    }

    pub fn hide(&mut self, weekday: Weekday) -> &mut Self {
        self.hidden_days.insert(weekday);
        self
    }

    pub fn show(&mut self, weekday: Weekday) -> &mut Self {
        self.hidden_days.remove(&weekday);
        self
    }

    /// Hide `weekday` if visible, show it if hidden.
    pub fn toggle_hidden(&mut self, weekday: Weekday) -> &mut Self {
        if !self.hidden_days.remove(&weekday) {
            self.hidden_days.insert(weekday);
        }
        self
    }

    pub fn set_hidden_days<I>(&mut self, days: I) -> &mut Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        self.hidden_days = days.into_iter().collect();
        self
    }

    /// Set the week-view time window and slot length.
    ///
    /// An `end` at or before `start` is read as the next day, so equal times
    /// cover a full 24 hours.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidConfiguration` if `interval_minutes` is
    /// zero or negative (or does not fit in a `u32`).
    pub fn set_time_format(
        &mut self,
        start: NaiveTime,
        end: NaiveTime,
        interval_minutes: i64,
    ) -> Result<&mut Self> {
        if interval_minutes <= 0 {
            return Err(CalendarError::InvalidConfiguration(format!(
                "time interval must be positive, got {interval_minutes} minutes"
            )));
        }
        self.interval_minutes = u32::try_from(interval_minutes).map_err(|_| {
            CalendarError::InvalidConfiguration(format!(
                "time interval of {interval_minutes} minutes is too large"
            ))
        })?;
        self.start_time = start;
        self.end_time = end;
        Ok(self)
    }

    /// The week-view slot series: ascending by start, no duplicate starts.
    ///
    /// Generated from `start_time` at `interval_minutes` strides while
    /// strictly before `end_time` (next day's `end_time` when it is not after
    /// `start_time`). Each slot ends one interval after it starts.
    pub fn time_slots(&self) -> Vec<TimeSlot> {
        let span = (self.end_time - self.start_time).num_minutes();
        let span = if span <= 0 { span + MINUTES_PER_DAY } else { span };
        let step = Duration::minutes(i64::from(self.interval_minutes));

        let mut starts: Vec<NaiveTime> = (0..span)
            .step_by(self.interval_minutes as usize)
            .map(|offset| self.start_time + Duration::minutes(offset))
            .collect();
        starts.sort();
        starts.dedup();

        starts
            .into_iter()
            .map(|start| TimeSlot {
                start,
                end: start + step,
            })
            .collect()
    }
}
