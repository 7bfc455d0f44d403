//! Interval matching: which events overlap a queried range.
//!
//! The two views use different overlap policies and the difference is kept
//! on purpose:
//!
//! - **Month**: only the *start* of the queried range matters, and it is
//!   compared against whole-day boundaries of the event
//!   (`start-of-day(event.start) <= query <= end-of-day(event.end)`). Timed
//!   and all-day events therefore cover the same days.
//! - **Week**: a symmetric three-way test over exact instants where every
//!   boundary is inclusive. The event's start lies in the range, or its end
//!   does, or the range lies inside the event. Zero-length and
//!   boundary-aligned events always match.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use tracing::trace;

use crate::event::{Event, EventId, EventStore};

/// Overlap policy used by [`find_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    Month,
    Week,
}

/// Whether `event` overlaps `[range_start, range_end]` under `mode`.
///
/// `range_end` is ignored in month mode.
pub fn overlaps(
    event: &Event,
    range_start: NaiveDateTime,
    range_end: NaiveDateTime,
    mode: MatchMode,
) -> bool {
    match mode {
        MatchMode::Month => {
            let from = event.start_date().and_time(NaiveTime::MIN);
            // Anything before the next midnight is <= end of the end day.
            let until = event.end_date().and_time(NaiveTime::MIN) + Duration::days(1);
            range_start >= from && range_start < until
        }
        MatchMode::Week => {
            let within = |t: NaiveDateTime| t >= range_start && t <= range_end;
            within(event.start())
                || within(event.end())
                || (range_start >= event.start() && range_end <= event.end())
        }
    }
}

/// All events overlapping the range, in store order, each at most once.
pub fn find_events(
    store: &EventStore,
    range_start: NaiveDateTime,
    range_end: NaiveDateTime,
    mode: MatchMode,
) -> Vec<(EventId, &Event)> {
    store
        .iter()
        .filter(|(id, event)| {
            let hit = overlaps(event, range_start, range_end, mode);
            if hit {
                trace!(event = id.index(), %range_start, ?mode, "event matched");
            }
            hit
        })
        .collect()
}
