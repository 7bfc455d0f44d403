//! The stock stylesheet for rendered calendars.

/// Built-in color themes as `(class name, accent color)`.
pub const THEMES: &[(&str, &str)] = &[
    ("turquoise", "#1abc9c"),
    ("alizarin", "#e74c3c"),
    ("green", "#2ecc71"),
    ("yellow", "#f1c40f"),
    ("grey", "#95a5a6"),
    ("purple", "#8e44ad"),
    ("pink", "#fd79a8"),
    ("orange", "#e67e22"),
    ("amethyst", "#9b59b6"),
    ("blue", "#3498db"),
];

const BASE: &str = "\
.calendar { width: 100%; border-collapse: collapse; table-layout: fixed; font-family: sans-serif; font-size: 0.9em; }
.calendar th, .calendar td { border: 1px solid #e0e0e0; padding: 4px; vertical-align: top; }
.calendar .calendar-title th { background: #34495e; color: #fff; font-size: 1.2em; padding: 8px; text-align: center; }
.calendar .calendar-header th { background: #ecf0f1; color: #2c3e50; text-align: center; }
.calendar .cal-th-time, .calendar .cal-time { width: 4em; color: #7f8c8d; font-weight: normal; text-align: right; }
.calendar .cal-day { height: 5em; background: #fff; }
.calendar .cal-time-slot .cal-day { height: 2em; padding: 0; }
.calendar .cal-day.pad { background: #f7f7f7; }
.calendar .cal-day-number { display: block; color: #7f8c8d; text-align: right; }
.calendar .cal-day.today { background: #fdf6e3; }
.calendar .cal-day.today .cal-day-number { font-weight: bold; color: #2c3e50; }
.calendar .cal-event-box { margin: 2px 0; padding: 2px 4px; border-radius: 3px; background: #34495e; color: #fff; overflow: hidden; white-space: nowrap; text-overflow: ellipsis; }
.calendar .cal-day.mask-start, .calendar .cal-day.mask, .calendar .cal-day.mask-end { background: #bdc3c7; }
.calendar .cal-day.mask-start { border-top-left-radius: 6px; border-bottom-left-radius: 6px; }
.calendar .cal-day.mask-end { border-top-right-radius: 6px; border-bottom-right-radius: 6px; }
";

/// Names of the built-in color themes.
pub fn themes() -> impl Iterator<Item = &'static str> {
    THEMES.iter().map(|&(name, _)| name)
}

/// The full stylesheet: base rules followed by one block per theme.
pub fn stylesheet() -> String {
    let mut css = String::from(BASE);
    for (name, color) in THEMES {
        css.push_str(&format!(
            ".calendar.{name} .calendar-title th {{ background: {color}; }}\n\
             .calendar.{name} .cal-event-box {{ background: {color}; }}\n\
             .calendar.{name} .cal-day.today {{ box-shadow: inset 0 0 0 2px {color}; }}\n"
        ));
    }
    css
}
