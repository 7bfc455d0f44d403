//! # calgrid
//!
//! Month and week calendar grids with event placement, rendered as HTML.
//!
//! A [`Calendar`] owns its configuration and events. Asking it for a date
//! lays out the surrounding month (or week) as a grid of day cells, works out
//! which events cover each cell and how they should look there, and
//! serializes the result as a `<table>`. The grid is also available as a
//! plain value for callers that want to draw it themselves.
//!
//! ## Modules
//!
//! - [`calendar`]: the `Calendar` facade
//! - [`config`]: view, week start, hidden days and time-slot settings
//! - [`date`]: input parsing, calendar arithmetic, localized names, clocks
//! - [`event`]: events, bulk input and the event store
//! - [`matcher`]: month and week overlap policies
//! - [`month`] / [`week`]: grid builders
//! - [`grid`]: the intermediate grid model
//! - [`render`]: HTML serialization
//! - [`style`]: the stock stylesheet and color themes
//! - [`error`]: error types
//!
//! ## Quick start
//!
//! ```
//! use calgrid::{Calendar, Event, FixedClock};
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2024, 2, 14)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let mut calendar = Calendar::with_clock(FixedClock(now));
//! calendar.add_event(
//!     Event::new("2024-02-14", "2024-02-16")
//!         .unwrap()
//!         .with_summary("Offsite")
//!         .masked(true),
//! );
//!
//! let html = calendar.render("2024-02-01", "green").unwrap();
//! assert!(html.starts_with("<table class=\"calendar green\">"));
//! assert!(html.contains("February 2024"));
//! assert!(html.contains("<div class=\"cal-event-box\">Offsite</div>"));
//! ```

pub mod calendar;
pub mod config;
pub mod date;
pub mod error;
pub mod event;
pub mod grid;
pub mod matcher;
pub mod month;
pub mod render;
pub mod style;
pub mod week;

pub use calendar::Calendar;
pub use config::{CalendarConfig, ViewType, DEFAULT_INTERVAL_MINUTES};
pub use date::{Clock, DateInput, DayNameFormat, FixedClock, StartingDay, SystemClock};
pub use error::CalendarError;
pub use event::{Event, EventId, EventInput, EventStore};
pub use grid::{
    Cell, CellEvent, EventDisplay, MonthGrid, SlotRow, SpanPosition, TimeSlot, WeekGrid, WeekRow,
};
pub use matcher::{find_events, MatchMode};
pub use month::build_month_grid;
pub use render::{render_month, render_week};
pub use style::{stylesheet, themes};
pub use week::build_week_grid;
