//! `calgrid` CLI: render month and week calendars from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Current month, events from a JSON file
//! calgrid render -e events.json
//!
//! # Week view for a given date, working hours only, weekends hidden
//! calgrid render 2024-02-14 --week --start 08:00 --end 18:00 --hide sat,sun
//!
//! # Standalone page with the stock stylesheet and a color theme
//! calgrid render 2024-02 --theme green --with-stylesheet -o february.html
//!
//! # The laid-out grid as JSON
//! calgrid grid 2024-02 -e events.json
//!
//! # Time slots for a window
//! calgrid slots --start 22:00 --end 02:00 --interval 60
//!
//! # Just the CSS
//! calgrid stylesheet -o calendar.css
//! ```

use std::io::{self, IsTerminal, Read};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use calgrid::date::{parse_locale, parse_time, parse_weekday};
use calgrid::{Calendar, Clock, DateInput, DayNameFormat, StartingDay, SystemClock};
use chrono_tz::Tz;
use clap::{ArgAction, Args, Parser, Subcommand};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "calgrid",
    version,
    about = "Render month and week calendars as HTML"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease log verbosity (-q errors only, -qq silent)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a calendar as an HTML table
    Render {
        #[command(flatten)]
        view: ViewArgs,
        /// Color theme class added to the table (see `calgrid stylesheet`)
        #[arg(long)]
        theme: Option<String>,
        /// Extra classes for the table element
        #[arg(long)]
        table_class: Option<String>,
        /// Prepend the stock stylesheet in a <style> element
        #[arg(long)]
        with_stylesheet: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the laid-out grid and its events as JSON
    Grid {
        #[command(flatten)]
        view: ViewArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the week-view time slots, one per line
    Slots {
        #[command(flatten)]
        slots: SlotArgs,
    },
    /// Print the stock stylesheet
    Stylesheet {
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Date to show: YYYY-MM-DD, YYYY-MM or a date-time (defaults to today)
    date: Option<String>,
    /// JSON file with an array of events ("-" reads stdin)
    #[arg(short, long)]
    events: Option<String>,
    /// Use the week view instead of the month view
    #[arg(long)]
    week: bool,
    /// Start weeks on Monday instead of Sunday
    #[arg(long)]
    monday: bool,
    /// Comma-separated weekdays to hide (e.g. "sat,sun")
    #[arg(long, value_delimiter = ',')]
    hide: Vec<String>,
    /// Locale for month and day names (e.g. "fr_FR")
    #[arg(long)]
    locale: Option<String>,
    /// Header day names: initials, abbreviated or full
    #[arg(long, default_value = "initials")]
    day_names: String,
    /// IANA time zone used to decide "today" (defaults to the host zone)
    #[arg(long)]
    tz: Option<String>,
    #[command(flatten)]
    slots: SlotArgs,
}

#[derive(Args)]
struct SlotArgs {
    /// Week view: first slot start (HH:MM)
    #[arg(long, default_value = "00:00")]
    start: String,
    /// Week view: window end (HH:MM); at or before --start means the next day
    #[arg(long, default_value = "00:00")]
    end: String,
    /// Week view: slot length in minutes
    #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
    interval: i64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    match cli.command {
        Commands::Render {
            view,
            theme,
            table_class,
            with_stylesheet,
            output,
        } => {
            let (mut calendar, date) = build_calendar(&view)?;
            if let Some(classes) = table_class {
                calendar.set_table_classes(classes);
            }
            let mut html = calendar
                .render(date, theme.as_deref().unwrap_or(""))
                .context("Failed to render calendar")?;
            if with_stylesheet {
                html.insert_str(0, &format!("<style>\n{}</style>\n", calgrid::stylesheet()));
            }
            write_output(output.as_deref(), &html)?;
        }
        Commands::Grid { view, output } => {
            let (calendar, date) = build_calendar(&view)?;
            let events: Vec<_> = calendar.events().iter().map(|(_, event)| event).collect();
            let doc = if view.week {
                let grid = calendar.week_grid(date).context("Failed to build week grid")?;
                json!({ "view": "week", "grid": grid, "events": events })
            } else {
                let grid = calendar.month_grid(date).context("Failed to build month grid")?;
                json!({ "view": "month", "grid": grid, "events": events })
            };
            let mut pretty = serde_json::to_string_pretty(&doc)?;
            pretty.push('\n');
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Slots { slots } => {
            let mut calendar = Calendar::new();
            apply_slots(&mut calendar, &slots)?;
            let mut out = String::new();
            for start in calendar.time_slots() {
                out.push_str(&format!("{}\n", start.format("%H:%M")));
            }
            write_output(None, &out)?;
        }
        Commands::Stylesheet { output } => {
            write_output(output.as_deref(), &calgrid::stylesheet())?;
        }
    }

    Ok(())
}

/// Build a calendar from the view flags and resolve the date to show.
fn build_calendar(args: &ViewArgs) -> Result<(Calendar<SystemClock>, DateInput)> {
    let clock = match args.tz.as_deref() {
        Some(zone) => {
            let tz: Tz = zone
                .parse()
                .map_err(|e| anyhow!("Unknown time zone '{}': {}", zone, e))?;
            SystemClock::in_zone(tz)
        }
        None => SystemClock::new(),
    };
    let date = match args.date.as_deref() {
        Some(text) => DateInput::from(text),
        None => DateInput::from(clock.now().date()),
    };

    let mut calendar = Calendar::with_clock(clock);
    if args.week {
        calendar.use_week_view();
    }
    if args.monday {
        calendar.set_week_start(StartingDay::Monday);
    }
    if let Some(name) = args.locale.as_deref() {
        calendar.set_locale(parse_locale(name)?);
    }
    calendar.set_day_name_format(DayNameFormat::from_str(&args.day_names)?);
    for day in &args.hide {
        let day = day.trim();
        if !day.is_empty() {
            calendar.hide_weekday(parse_weekday(day)?);
        }
    }
    apply_slots(&mut calendar, &args.slots)?;

    if let Some(path) = args.events.as_deref() {
        let json = read_input(path)?;
        calendar
            .add_events_json(&json)
            .with_context(|| format!("Failed to load events from {}", path))?;
        info!(path, count = calendar.events().len(), "events loaded");
    }

    Ok((calendar, date))
}

fn apply_slots<C: Clock>(calendar: &mut Calendar<C>, args: &SlotArgs) -> Result<()> {
    let start = parse_time(&args.start).context("Invalid --start")?;
    let end = parse_time(&args.end).context("Invalid --end")?;
    calendar
        .set_time_format(start, end, args.interval)
        .context("Invalid --interval")?;
    debug!(%start, %end, interval = args.interval, "time slots configured");
    Ok(())
}

/// Level for the `calgrid` log targets: warnings by default, each `-v`
/// one step louder, `-q` errors only and `-qq` nothing.
fn log_level(verbose: u8, quiet: u8) -> LevelFilter {
    match (quiet, verbose) {
        (0, 0) => LevelFilter::WARN,
        (0, 1) => LevelFilter::INFO,
        (0, 2) => LevelFilter::DEBUG,
        (0, _) => LevelFilter::TRACE,
        (1, _) => LevelFilter::ERROR,
        _ => LevelFilter::OFF,
    }
}

/// Log to stderr. `RUST_LOG` wins over the flags; otherwise the flags set
/// the level for the library and this binary, and every other crate is
/// capped at `warn`.
fn init_tracing(verbose: u8, quiet: u8) -> Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("Invalid {}: {}", EnvFilter::DEFAULT_ENV, directives))?,
        Err(_) => {
            let level = log_level(verbose, quiet);
            // Target prefix: matches `calgrid` and `calgrid_cli`.
            EnvFilter::default()
                .add_directive(level.min(LevelFilter::WARN).into())
                .add_directive(format!("calgrid={level}").parse()?)
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();

    Ok(())
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
            info!(path, bytes = content.len(), "output written");
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
