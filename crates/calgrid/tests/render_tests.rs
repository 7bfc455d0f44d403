//! Tests for HTML output of both views.

use calgrid::{
    render::{escape_html, hidden_days_style},
    stylesheet, themes, Calendar, CalendarConfig, DayNameFormat, Event, FixedClock, StartingDay,
};
use chrono::{Locale, NaiveDate, NaiveTime, Weekday};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn calendar() -> Calendar<FixedClock> {
    let now = NaiveDate::from_ymd_opt(2024, 2, 14)
        .unwrap()
        .and_hms_opt(9, 15, 0)
        .unwrap();
    Calendar::with_clock(FixedClock(now))
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn event(start: &str, end: &str) -> Event {
    Event::new(start, end).unwrap()
}

// ---------------------------------------------------------------------------
// Month view
// ---------------------------------------------------------------------------

#[test]
fn month_title_spans_all_columns() {
    let html = calendar().render("2024-02-10", "").unwrap();

    assert!(html.starts_with("<table class=\"calendar\">"));
    assert!(html.contains("<tr class=\"calendar-title\"><th colspan=\"7\">February 2024</th></tr>"));
    assert!(html.trim_end().ends_with("</table>"));
}

#[test]
fn month_header_uses_initials_by_default() {
    let html = calendar().render("2024-02-10", "").unwrap();

    assert!(html.contains(
        "<tr class=\"calendar-header\">\
         <th class=\"cal-th cal-th-sunday\">S</th>\
         <th class=\"cal-th cal-th-monday\">M</th>\
         <th class=\"cal-th cal-th-tuesday\">T</th>\
         <th class=\"cal-th cal-th-wednesday\">W</th>\
         <th class=\"cal-th cal-th-thursday\">T</th>\
         <th class=\"cal-th cal-th-friday\">F</th>\
         <th class=\"cal-th cal-th-saturday\">S</th></tr>"
    ));
}

#[test]
fn month_header_full_names_from_monday() {
    let mut cal = calendar();
    cal.set_day_name_format(DayNameFormat::Full)
        .set_week_start(StartingDay::Monday);
    let html = cal.render("2024-02-10", "").unwrap();

    let monday = html.find(">Monday</th>").unwrap();
    let sunday = html.find(">Sunday</th>").unwrap();
    assert!(monday < sunday);
}

#[test]
fn month_header_abbreviated() {
    let mut cal = calendar();
    cal.set_day_name_format(DayNameFormat::Abbreviated);
    let html = cal.render("2024-02-10", "").unwrap();

    assert!(html.contains("<th class=\"cal-th cal-th-wednesday\">Wed</th>"));
}

#[test]
fn localized_month_title() {
    let mut cal = calendar();
    cal.set_locale(Locale::de_DE)
        .set_day_name_format(DayNameFormat::Full);
    let html = cal.render("2024-02-10", "").unwrap();

    assert!(html.contains(">Februar 2024</th>"));
    assert!(html.contains(">Mittwoch</th>"));
}

#[test]
fn month_cells_mark_padding_and_today() {
    let html = calendar().render("2024-02-10", "").unwrap();

    assert!(html.contains("<td class=\"cal-day cal-day-sunday pad\"></td>"));
    assert!(html.contains(
        "<td class=\"cal-day cal-day-wednesday today\"><span class=\"cal-day-number\">14</span></td>"
    ));
    assert!(html.contains(
        "<td class=\"cal-day cal-day-thursday\"><span class=\"cal-day-number\">1</span></td>"
    ));
    assert_eq!(html.matches("<tr class=\"cal-week\">").count(), 5);
}

#[test]
fn month_event_box_on_start_day() {
    let mut cal = calendar();
    cal.add_event(
        event("2024-02-20", "2024-02-22")
            .with_summary("Offsite")
            .masked(true)
            .with_box_classes(["important"]),
    );
    let html = cal.render("2024-02-10", "").unwrap();

    assert!(html.contains(
        "<td class=\"cal-day cal-day-tuesday mask-start\">\
         <span class=\"cal-day-number\">20</span>\
         <div class=\"cal-event-box important\">Offsite</div></td>"
    ));
    assert!(html.contains(
        "<td class=\"cal-day cal-day-wednesday mask\"><span class=\"cal-day-number\">21</span></td>"
    ));
    assert!(html.contains(
        "<td class=\"cal-day cal-day-thursday mask-end\"><span class=\"cal-day-number\">22</span></td>"
    ));
    assert_eq!(html.matches("Offsite").count(), 1);
}

#[test]
fn empty_summary_renders_no_box() {
    let mut cal = calendar();
    cal.add_event(event("2024-02-20", "2024-02-20").masked(true));
    let html = cal.render("2024-02-10", "").unwrap();

    assert!(html.contains("mask-start"));
    assert!(!html.contains("cal-event-box"));
}

#[test]
fn summaries_are_escaped() {
    let mut cal = calendar();
    cal.add_event(event("2024-02-20", "2024-02-20").with_summary("<b>R&D</b> \"sync\""));
    let html = cal.render("2024-02-10", "").unwrap();

    assert!(html.contains("&lt;b&gt;R&amp;D&lt;/b&gt; &quot;sync&quot;"));
    assert!(!html.contains("<b>"));
}

#[test]
fn theme_and_table_classes_join_the_table_class() {
    let mut cal = calendar();
    cal.set_table_classes("striped wide");
    let html = cal.render("2024-02-10", "blue").unwrap();

    assert!(html.starts_with("<table class=\"calendar blue striped wide\">"));
}

// ---------------------------------------------------------------------------
// Hidden days
// ---------------------------------------------------------------------------

#[test]
fn hidden_days_emit_style_and_narrow_title() {
    let mut cal = calendar();
    cal.hide_weekday(Weekday::Sat).hide_weekday(Weekday::Sun);
    let html = cal.render("2024-02-10", "").unwrap();

    assert!(html.starts_with(
        "<style>.calendar .cal-th-sunday, .calendar .cal-day-sunday, \
         .calendar .cal-th-saturday, .calendar .cal-day-saturday { display: none; }</style>\n"
    ));
    assert!(html.contains("<th colspan=\"5\">February 2024</th>"));
    // Hidden columns stay in the markup.
    assert!(html.contains("cal-th-saturday\">S</th>"));
}

#[test]
fn no_hidden_days_no_style() {
    let config = CalendarConfig::default();
    assert_eq!(hidden_days_style(&config), "");
}

#[test]
fn hidden_style_follows_column_order() {
    let mut config = CalendarConfig::default();
    config
        .set_starting_day(StartingDay::Monday)
        .hide(Weekday::Sun)
        .hide(Weekday::Mon);
    let style = hidden_days_style(&config);

    assert!(style.find("cal-th-monday").unwrap() < style.find("cal-th-sunday").unwrap());
}

// ---------------------------------------------------------------------------
// Week view
// ---------------------------------------------------------------------------

#[test]
fn week_title_and_time_column() {
    let mut cal = calendar();
    cal.use_week_view()
        .set_time_format(time(9, 0), time(11, 0), 60)
        .unwrap();
    let html = cal.render("2024-02-14", "").unwrap();

    assert!(html.contains(
        "<tr class=\"calendar-title\"><th colspan=\"8\">11 February 2024 - 17 February 2024</th></tr>"
    ));
    assert!(html.contains("<tr class=\"calendar-header\"><th class=\"cal-th cal-th-time\"></th>"));
    assert!(html.contains(
        "<th class=\"cal-th cal-th-wednesday\"><span class=\"cal-th-name\">W</span> \
         <span class=\"cal-th-date\">14</span></th>"
    ));
    assert!(html.contains("<tr class=\"cal-time-slot\"><th class=\"cal-time\">09:00</th>"));
    assert!(html.contains("<tr class=\"cal-time-slot\"><th class=\"cal-time\">10:00</th>"));
    assert_eq!(html.matches("cal-time-slot").count(), 2);
    assert!(!html.contains("cal-day-number"));
}

#[test]
fn week_event_summary_then_placeholders() {
    let mut cal = calendar();
    cal.use_week_view()
        .set_time_format(time(8, 0), time(12, 0), 30)
        .unwrap();
    cal.add_event(event("2024-02-13 09:00", "2024-02-13 10:00").with_summary("Review"));
    let html = cal.render("2024-02-14", "").unwrap();

    // 08:30, 09:00, 09:30 and 10:00 slots all touch the event.
    assert_eq!(html.matches("<div class=\"cal-event-box\">Review</div>").count(), 1);
    assert_eq!(html.matches("<div class=\"cal-event-box\">&nbsp;</div>").count(), 3);
}

#[test]
fn week_today_cells_follow_the_hour() {
    let mut cal = calendar();
    cal.use_week_view()
        .set_time_format(time(8, 0), time(11, 0), 30)
        .unwrap();
    let html = cal.render("2024-02-14", "").unwrap();

    assert_eq!(html.matches("cal-day-wednesday today").count(), 2);
}

#[test]
fn week_title_narrows_with_hidden_days() {
    let mut cal = calendar();
    cal.use_week_view().hide_weekday(Weekday::Sun);
    let html = cal.render("2024-02-14", "").unwrap();

    assert!(html.contains("<th colspan=\"7\">11 February 2024 - 17 February 2024</th>"));
}

// ---------------------------------------------------------------------------
// Stylesheet and escaping
// ---------------------------------------------------------------------------

#[test]
fn stylesheet_has_a_block_per_theme() {
    let css = stylesheet();

    assert!(css.contains(".calendar .cal-day.mask-start"));
    assert_eq!(themes().count(), 10);
    for theme in themes() {
        assert!(
            css.contains(&format!(".calendar.{theme} .calendar-title th")),
            "missing theme {theme}"
        );
    }
}

#[test]
fn escape_html_handles_all_specials() {
    assert_eq!(escape_html("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&#39;");
    assert_eq!(escape_html("plain"), "plain");
}
