//! HTML serialization of month and week grids.
//!
//! Pure string assembly over a finished grid: no matching or layout happens
//! here. Hidden weekdays stay in the markup; a `<style>` directive in front of
//! the table collapses their columns, and the title row spans only the visible
//! ones.

use chrono::Datelike;

use crate::config::CalendarConfig;
use crate::date::{long_date, month_title, weekday_css_name, weekday_name};
use crate::event::EventStore;
use crate::grid::{Cell, EventDisplay, MonthGrid, WeekGrid};

/// Render a month grid as an HTML table.
pub fn render_month(
    grid: &MonthGrid,
    config: &CalendarConfig,
    events: &EventStore,
    theme: &str,
) -> String {
    let mut out = hidden_days_style(config);
    out.push_str(&table_open(config, theme));

    out.push_str("<thead>\n");
    out.push_str(&format!(
        "<tr class=\"calendar-title\"><th colspan=\"{}\">{}</th></tr>\n",
        config.visible_columns(),
        escape_html(&month_title(grid.month, config.locale()))
    ));
    out.push_str("<tr class=\"calendar-header\">");
    if let Some(first_row) = grid.rows.first() {
        for cell in first_row.cells() {
            out.push_str(&format!(
                "<th class=\"cal-th cal-th-{}\">{}</th>",
                weekday_css_name(cell.weekday),
                escape_html(&weekday_name(cell.date, config.day_names(), config.locale()))
            ));
        }
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &grid.rows {
        out.push_str("<tr class=\"cal-week\">");
        for cell in row.cells() {
            push_cell(&mut out, cell, events, true);
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
    out
}

/// Render a week grid as an HTML table with one row per time slot.
pub fn render_week(
    grid: &WeekGrid,
    config: &CalendarConfig,
    events: &EventStore,
    theme: &str,
) -> String {
    let locale = config.locale();
    let mut out = hidden_days_style(config);
    out.push_str(&table_open(config, theme));

    let title = match (grid.days.first(), grid.days.last()) {
        (Some(&first), Some(&last)) => format!(
            "{} - {}",
            long_date(first, locale),
            long_date(last, locale)
        ),
        _ => String::new(),
    };

    out.push_str("<thead>\n");
    out.push_str(&format!(
        "<tr class=\"calendar-title\"><th colspan=\"{}\">{}</th></tr>\n",
        config.visible_columns() + 1,
        escape_html(&title)
    ));
    out.push_str("<tr class=\"calendar-header\"><th class=\"cal-th cal-th-time\"></th>");
    for &date in &grid.days {
        out.push_str(&format!(
            "<th class=\"cal-th cal-th-{}\"><span class=\"cal-th-name\">{}</span> <span class=\"cal-th-date\">{}</span></th>",
            weekday_css_name(date.weekday()),
            escape_html(&weekday_name(date, config.day_names(), locale)),
            date.format("%-d")
        ));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &grid.rows {
        out.push_str(&format!(
            "<tr class=\"cal-time-slot\"><th class=\"cal-time\">{}</th>",
            row.slot.start.format("%H:%M")
        ));
        for cell in &row.cells {
            push_cell(&mut out, cell, events, false);
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
    out
}

/// The `<style>` directive hiding the configured weekdays' columns, or an
/// empty string when every day is visible.
pub fn hidden_days_style(config: &CalendarConfig) -> String {
    let selectors: Vec<String> = config
        .starting_day()
        .weekdays()
        .into_iter()
        .filter(|&day| config.is_hidden(day))
        .map(|day| {
            let name = weekday_css_name(day);
            format!(".calendar .cal-th-{name}, .calendar .cal-day-{name}")
        })
        .collect();

    if selectors.is_empty() {
        return String::new();
    }
    format!(
        "<style>{} {{ display: none; }}</style>\n",
        selectors.join(", ")
    )
}

fn table_open(config: &CalendarConfig, theme: &str) -> String {
    let mut classes = String::from("calendar");
    for extra in [theme.trim(), config.table_classes().trim()] {
        if !extra.is_empty() {
            classes.push(' ');
            classes.push_str(extra);
        }
    }
    format!("<table class=\"{}\">\n", escape_html(&classes))
}

fn push_cell(out: &mut String, cell: &Cell, events: &EventStore, show_day_number: bool) {
    let mut classes = vec![
        "cal-day".to_string(),
        format!("cal-day-{}", weekday_css_name(cell.weekday)),
    ];
    if cell.is_padding {
        classes.push("pad".to_string());
    }
    if cell.is_today {
        classes.push("today".to_string());
    }
    classes.extend(cell.classes.iter().cloned());

    out.push_str(&format!("<td class=\"{}\">", escape_html(&classes.join(" "))));
    if cell.is_padding {
        out.push_str("</td>");
        return;
    }
    if show_day_number {
        out.push_str(&format!(
            "<span class=\"cal-day-number\">{}</span>",
            cell.date.format("%-d")
        ));
    }

    for entry in &cell.events {
        let Some(event) = events.get(entry.id) else {
            continue;
        };
        if event.summary().is_empty() {
            continue;
        }
        let text = match entry.display {
            EventDisplay::Summary => escape_html(event.summary()),
            EventDisplay::Placeholder => "&nbsp;".to_string(),
            EventDisplay::Hidden => continue,
        };
        let mut box_classes = String::from("cal-event-box");
        for class in event.box_classes() {
            box_classes.push(' ');
            box_classes.push_str(class);
        }
        out.push_str(&format!(
            "<div class=\"{}\">{}</div>",
            escape_html(&box_classes),
            text
        ));
    }
    out.push_str("</td>");
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
