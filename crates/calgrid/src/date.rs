//! Date provider: input parsing, calendar arithmetic, localized names and the
//! injectable clock.
//!
//! Everything here works on wall-clock `chrono` values (`NaiveDate`,
//! `NaiveDateTime`, `NaiveTime`). Offsets in RFC 3339 input are dropped after
//! parsing; the grid never converts between zones.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, Local, Locale, NaiveDate, NaiveDateTime, NaiveTime, Utc,
    Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// Number of columns in every grid row.
pub const DAYS_IN_WEEK: usize = 7;

/// Date-time layouts accepted for text input, tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A date argument as supplied by a caller: already structured, or text that
/// still has to be parsed.
///
/// Resolution happens once, at the API boundary, via [`DateInput::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DateInput {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl DateInput {
    /// Resolve to a wall-clock instant. Plain dates resolve to midnight.
    ///
    /// # Errors
    /// Returns `CalendarError::DateParse` if text input matches none of the
    /// accepted layouts.
    pub fn resolve(&self) -> Result<NaiveDateTime> {
        match self {
            DateInput::Date(date) => Ok(date.and_time(NaiveTime::MIN)),
            DateInput::DateTime(dt) => Ok(*dt),
            DateInput::Text(text) => parse_datetime(text),
        }
    }

    /// Resolve to a calendar date, discarding any time of day.
    pub fn resolve_date(&self) -> Result<NaiveDate> {
        self.resolve().map(|dt| dt.date())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(dt: NaiveDateTime) -> Self {
        DateInput::DateTime(dt)
    }
}

/// Parse a date or date-time string.
///
/// Accepts RFC 3339 (the offset is dropped, the wall time kept),
/// `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DD` and
/// `YYYY-MM`. Inputs without a time resolve to midnight; `YYYY-MM` resolves to
/// the first of the month.
///
/// # Errors
/// Returns `CalendarError::DateParse` when no layout matches.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime> {
    let text = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_local());
    }
    for layout in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, layout) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    // Year-month only: pin to the first of the month.
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(CalendarError::DateParse {
        input: input.to_string(),
        reason: "expected RFC 3339, YYYY-MM-DD[ HH:MM[:SS]] or YYYY-MM".to_string(),
    })
}

/// Parse a time of day as `HH:MM` or `HH:MM:SS`.
///
/// # Errors
/// Returns `CalendarError::DateParse` when neither layout matches.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    let text = input.trim();
    TIME_FORMATS
        .iter()
        .find_map(|layout| NaiveTime::parse_from_str(text, layout).ok())
        .ok_or_else(|| CalendarError::DateParse {
            input: input.to_string(),
            reason: "expected HH:MM or HH:MM:SS".to_string(),
        })
}

/// Parse a POSIX locale name such as `en_US` or `fr_FR`.
///
/// # Errors
/// Returns `CalendarError::InvalidConfiguration` for unknown names.
pub fn parse_locale(name: &str) -> Result<Locale> {
    Locale::try_from(name.trim())
        .map_err(|_| CalendarError::InvalidConfiguration(format!("unknown locale '{name}'")))
}

/// Parse a weekday directive such as `"saturday"`, `"Saturdays"`, `"sat"` or
/// `"hideSaturdays"`, case-insensitively.
///
/// # Errors
/// Returns `CalendarError::UnsupportedOperation` if the name is not a
/// weekday.
pub fn parse_weekday(name: &str) -> Result<Weekday> {
    let lowered = name.trim().to_ascii_lowercase();
    let bare = lowered.strip_prefix("hide").unwrap_or(lowered.as_str());
    bare.parse::<Weekday>()
        .or_else(|_| bare.strip_suffix('s').unwrap_or(bare).parse::<Weekday>())
        .map_err(|_| CalendarError::UnsupportedOperation(format!("no weekday named '{name}'")))
}

// ---------------------------------------------------------------------------
// Week layout
// ---------------------------------------------------------------------------

/// The weekday shown in the first column of every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartingDay {
    #[default]
    Sunday,
    Monday,
}

impl StartingDay {
    pub fn weekday(self) -> Weekday {
        match self {
            StartingDay::Sunday => Weekday::Sun,
            StartingDay::Monday => Weekday::Mon,
        }
    }

    /// Column index (0..7) of `weekday` in a row that starts on this day.
    pub fn column_of(self, weekday: Weekday) -> usize {
        let offset = match self {
            StartingDay::Sunday => weekday.num_days_from_sunday(),
            StartingDay::Monday => weekday.num_days_from_monday(),
        };
        offset as usize
    }

    /// The seven weekdays in column order.
    pub fn weekdays(self) -> [Weekday; DAYS_IN_WEEK] {
        std::array::from_fn(|i| (0..i).fold(self.weekday(), |day, _| day.succ()))
    }
}

impl fmt::Display for StartingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(weekday_css_name(self.weekday()))
    }
}

impl FromStr for StartingDay {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match parse_weekday(s) {
            Ok(Weekday::Sun) => Ok(StartingDay::Sunday),
            Ok(Weekday::Mon) => Ok(StartingDay::Monday),
            _ => Err(CalendarError::InvalidConfiguration(format!(
                "week can only start on sunday or monday, got '{s}'"
            ))),
        }
    }
}

/// How weekday names are written in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayNameFormat {
    /// First letter only (`S M T W T F S`).
    #[default]
    Initials,
    /// Locale abbreviation (`Sun Mon ...`).
    Abbreviated,
    /// Full name (`Sunday Monday ...`).
    Full,
}

impl FromStr for DayNameFormat {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "initials" | "initial" => Ok(DayNameFormat::Initials),
            "abbreviated" | "short" => Ok(DayNameFormat::Abbreviated),
            "full" => Ok(DayNameFormat::Full),
            _ => Err(CalendarError::InvalidConfiguration(format!(
                "unknown day name format '{s}' (expected initials, abbreviated or full)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Calendar arithmetic
// ---------------------------------------------------------------------------

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        2 if is_leap_year(date.year()) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// The first date at or before `date` whose weekday is `starting_day`.
pub fn week_start(date: NaiveDate, starting_day: StartingDay) -> NaiveDate {
    let back = starting_day.column_of(date.weekday()) as i64;
    date - Duration::days(back)
}

/// Lowercase English weekday name, used for CSS hooks regardless of locale.
pub fn weekday_css_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

// ---------------------------------------------------------------------------
// Localized names
// ---------------------------------------------------------------------------

fn localized(date: NaiveDate, layout: &str, locale: Locale) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized(layout, locale)
        .to_string()
}

/// Localized name of `date`'s weekday in the requested format.
pub fn weekday_name(date: NaiveDate, format: DayNameFormat, locale: Locale) -> String {
    match format {
        DayNameFormat::Full => localized(date, "%A", locale),
        DayNameFormat::Abbreviated => localized(date, "%a", locale),
        DayNameFormat::Initials => localized(date, "%A", locale)
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default(),
    }
}

/// Localized "Month Year" title, e.g. `February 2024`.
pub fn month_title(date: NaiveDate, locale: Locale) -> String {
    localized(date, "%B %Y", locale)
}

/// Localized long date, e.g. `12 February 2024`.
pub fn long_date(date: NaiveDate, locale: Locale) -> String {
    localized(date, "%-d %B %Y", locale)
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of the current moment, used only for "today" highlighting.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock, in the local zone or a pinned IANA zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock {
    zone: Option<Tz>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock reporting wall time in `zone` instead of the host's zone.
    pub fn in_zone(zone: Tz) -> Self {
        Self { zone: Some(zone) }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.zone {
            Some(zone) => Utc::now().with_timezone(&zone).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
