//! Property-based tests for grid layout using proptest.
//!
//! These check invariants that must hold for any month, week start, hidden
//! day set, time window and event list, not just the dates in
//! `month_tests.rs` and `week_tests.rs`.

use std::collections::HashMap;

use calgrid::{
    build_month_grid, build_week_grid, date::days_in_month, CalendarConfig, Event,
    EventDisplay, EventStore, SpanPosition, StartingDay,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1970i32..=2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_starting_day() -> impl Strategy<Value = StartingDay> {
    prop_oneof![Just(StartingDay::Sunday), Just(StartingDay::Monday)]
}

fn arb_weekday() -> impl Strategy<Value = Weekday> {
    prop::sample::select(vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ])
}

fn arb_time() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, prop_oneof![Just(0u32), Just(15), Just(30), Just(45)])
        .prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

fn arb_interval() -> impl Strategy<Value = i64> {
    prop_oneof![Just(5i64), Just(15), Just(30), Just(45), Just(60), Just(90)]
}

/// Events within a few weeks of `base`, lasting up to four days.
fn arb_events(base: NaiveDate) -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((-40i64..40, 0i64..(4 * 24 * 60), any::<bool>()), 0..12).prop_map(
        move |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (offset_hours, minutes, mask))| {
                    let start = base.and_time(NaiveTime::MIN) + Duration::hours(offset_hours * 12);
                    Event::from_range(start, start + Duration::minutes(minutes))
                        .with_summary(format!("event {i}"))
                        .masked(mask)
                })
                .collect()
        },
    )
}

fn arb_month_case() -> impl Strategy<Value = (NaiveDate, Vec<Event>)> {
    arb_date().prop_flat_map(|date| (Just(date), arb_events(date)))
}

fn store(events: Vec<Event>) -> EventStore {
    let mut store = EventStore::new();
    for event in events {
        store.push(event);
    }
    store
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: month rows are complete weeks starting on the configured day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn month_rows_are_full_weeks(
        date in arb_date(),
        starting_day in arb_starting_day(),
        hidden in prop::collection::hash_set(arb_weekday(), 0..7),
    ) {
        let mut cfg = CalendarConfig::default();
        cfg.set_starting_day(starting_day).set_hidden_days(hidden);
        let now = date.and_time(NaiveTime::MIN);
        let grid = build_month_grid(date, &cfg, &EventStore::new(), now);

        prop_assert!((4..=6).contains(&grid.rows.len()));
        for row in &grid.rows {
            prop_assert_eq!(row.cells().len(), 7);
            prop_assert_eq!(row.cells()[0].weekday, starting_day.weekday());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: non-padding cells are exactly the month's days, in order
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn month_days_are_contiguous(date in arb_date(), starting_day in arb_starting_day()) {
        let mut cfg = CalendarConfig::default();
        cfg.set_starting_day(starting_day);
        let now = date.and_time(NaiveTime::MIN);
        let grid = build_month_grid(date, &cfg, &EventStore::new(), now);

        let days: Vec<NaiveDate> = grid.cells().filter(|c| !c.is_padding).map(|c| c.date).collect();
        prop_assert_eq!(days.len() as u32, days_in_month(date));
        prop_assert_eq!(days[0].day(), 1);
        for pair in days.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::days(1));
        }

        // Every cell, padding included, is one day after the previous.
        let all: Vec<NaiveDate> = grid.cells().map(|c| c.date).collect();
        for pair in all.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        prop_assert_eq!(grid.cells().filter(|c| c.is_today).count(), 1);
    }
}

// ---------------------------------------------------------------------------
// Property 3: an event's summary appears once in a month, on its start day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn month_summary_on_start_day_only((date, events) in arb_month_case()) {
        let store = store(events);
        let now = date.and_time(NaiveTime::MIN);
        let grid = build_month_grid(date, &CalendarConfig::default(), &store, now);

        let mut labels: HashMap<_, Vec<NaiveDate>> = HashMap::new();
        for cell in grid.cells() {
            prop_assert!(!cell.is_padding || cell.events.is_empty());
            for entry in &cell.events {
                if entry.display == EventDisplay::Summary {
                    labels.entry(entry.id).or_default().push(cell.date);
                }
            }
        }

        for (id, event) in store.iter() {
            let in_month = event.start_date().year() == date.year()
                && event.start_date().month() == date.month();
            match labels.get(&id) {
                Some(days) => {
                    prop_assert_eq!(days.as_slice(), &[event.start_date()][..]);
                }
                None => prop_assert!(!in_month, "event {} starting in month has no label", id.index()),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: a span inside the month covers one cell per day, one start and
// one end
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn month_span_covers_its_days(
        date in arb_date(),
        first in 0i64..28,
        length in 0i64..10,
        starting_day in arb_starting_day(),
    ) {
        let month_start = date.with_day(1).unwrap();
        let start = month_start + Duration::days(first);
        let end = (start + Duration::days(length)).min(month_start + Duration::days(27));
        let mut events = EventStore::new();
        let id = events.push(
            Event::from_range(start.and_time(NaiveTime::MIN), end.and_hms_opt(12, 0, 0).unwrap())
                .masked(true),
        );
        let mut cfg = CalendarConfig::default();
        cfg.set_starting_day(starting_day);
        let grid = build_month_grid(date, &cfg, &events, start.and_time(NaiveTime::MIN));

        let positions: Vec<SpanPosition> = grid
            .cells()
            .filter_map(|c| c.event(id).map(|e| e.position))
            .collect();
        let days = ((end - start).num_days().max(0) + 1) as usize;
        prop_assert_eq!(positions.len(), days);
        prop_assert_eq!(positions.iter().filter(|p| p.is_start()).count(), 1);
        prop_assert_eq!(positions.iter().filter(|p| p.is_end()).count(), 1);
        prop_assert!(positions[0].is_start());
        prop_assert!(positions[days - 1].is_end());
    }
}

// ---------------------------------------------------------------------------
// Property 5: week slots are sorted, unique and one interval long
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn week_slots_sorted_and_unique(
        start in arb_time(),
        end in arb_time(),
        interval in arb_interval(),
    ) {
        let mut cfg = CalendarConfig::default();
        cfg.set_time_format(start, end, interval).unwrap();
        let slots = cfg.time_slots();

        prop_assert!(!slots.is_empty());
        for pair in slots.windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
        }
        for slot in &slots {
            prop_assert_eq!(slot.end, slot.start + Duration::minutes(interval));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: each event is labelled at most once in a week
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn week_labels_each_event_at_most_once(
        (date, events) in arb_month_case(),
        starting_day in arb_starting_day(),
        interval in arb_interval(),
    ) {
        let mut cfg = CalendarConfig::default();
        cfg.set_starting_day(starting_day)
            .set_time_format(NaiveTime::MIN, NaiveTime::MIN, interval)
            .unwrap();
        let store = store(events);
        let grid = build_week_grid(date, &cfg, &store, date.and_time(NaiveTime::MIN));

        prop_assert_eq!(grid.days.len(), 7);
        prop_assert_eq!(grid.days[0].weekday(), starting_day.weekday());
        prop_assert!(grid.days.contains(&date));

        let mut labels: HashMap<_, usize> = HashMap::new();
        for (_, cell) in grid.cells() {
            for entry in &cell.events {
                if entry.display == EventDisplay::Summary {
                    *labels.entry(entry.id).or_default() += 1;
                }
            }
        }
        prop_assert!(labels.values().all(|&n| n == 1));

        // Anything shown at all carries exactly one label.
        for (_, cell) in grid.cells() {
            for entry in &cell.events {
                prop_assert!(labels.contains_key(&entry.id));
            }
        }
    }
}
