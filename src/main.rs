mod app;
mod help;
mod jumpto;
mod logging;
mod theme;
mod widget;
use crate::app::{App, Decorations, View};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use time::{Month, OffsetDateTime};
use yearcal::{CalendarOptions, CellId, PosixLocales, YearCalendar, YearGridRequest};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        target: Option<Target>,
        month_view: bool,
        options: CalendarOptions,
        decorations: Decorations,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut target = None;
        let mut month_view = false;
        let mut options = CalendarOptions::default();
        let mut decorations = Decorations::default();
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('m') | Arg::Long("month") => month_view = true,
                Arg::Short('l') | Arg::Long("locale") => {
                    options.locale = parser.value()?.string()?;
                }
                Arg::Short('w') | Arg::Long("weekdays") => {
                    options.weekday_style = parser.value()?.parse()?;
                }
                Arg::Short('o') | Arg::Long("show-other-month-days") => {
                    options.show_other_month_days = true;
                }
                Arg::Short('y') | Arg::Long("year-first") => options.year_first = true,
                Arg::Long("highlight") => {
                    let id = parser.value()?.parse::<CellId>()?;
                    decorations.highlights.push(id.date());
                }
                Arg::Long("plain-weekends") => decorations.plain_weekends = true,
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if target.is_none() => target = Some(value.parse()?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            target,
            month_view,
            options,
            decorations,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                target,
                month_view,
                options,
                decorations,
                log_file,
            } => {
                if let Some(path) = log_file {
                    logging::init_file_logging(&path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let (year, month) = match target {
                    Some(Target { year, month }) => (year, month),
                    None => (today.year(), None),
                };
                let view = match month {
                    Some(m) => View::Month(m),
                    None if month_view => View::Month(today.month()),
                    None => View::Year,
                };
                tracing::info!(year, ?view, locale = %options.locale, "Starting calendar");
                let calendar =
                    YearCalendar::new(YearGridRequest::new(year, options), PosixLocales, today)
                        .context("failed to build calendar")?;
                let app = App::new(calendar, view, decorations);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: yearcal [<options>] [YYYY | YYYY-MM]");
                println!();
                println!("Month and year calendars in the terminal");
                println!();
                println!("Options:");
                println!("  -m, --month                  Show a single month rather than the year");
                println!("  -l, --locale <LOCALE>        Locale for month & weekday names");
                println!("                               [default: en]");
                println!("  -w, --weekdays <STYLE>       Weekday names: narrow, short, or long");
                println!("                               [default: short]");
                println!("  -o, --show-other-month-days  Fill first & last weeks with days from");
                println!("                               neighboring months");
                println!("  -y, --year-first             Put the year before the month name");
                println!("      --highlight <YYYY-MM-DD> Highlight the given date (repeatable)");
                println!("      --plain-weekends         Draw weekends like weekdays");
                println!("      --log-file <PATH>        Write logs to the given file");
                println!("  -h, --help                   Display this help message and exit");
                println!("  -V, --version                Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// The year, and optionally the month, to start on
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Target {
    year: i32,
    month: Option<Month>,
}

impl FromStr for Target {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Target, ParseTargetError> {
        let err = || ParseTargetError(s.to_owned());
        let (year, month) = match s.split_once('-') {
            Some((y, m)) => {
                let m = m.parse::<u8>().map_err(|_| err())?;
                (y, Some(Month::try_from(m).map_err(|_| err())?))
            }
            None => (s, None),
        };
        if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }
        let year = year.parse::<i32>().map_err(|_| err())?;
        Ok(Target { year, month })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid year/month {0:?}; expected YYYY or YYYY-MM")]
struct ParseTargetError(String);

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use yearcal::WeekdayStyle;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            parse(&[]).unwrap(),
            Command::Run {
                target: None,
                month_view: false,
                options: CalendarOptions::default(),
                decorations: Decorations::default(),
                log_file: None,
            }
        );
    }

    #[test]
    fn test_all_options() {
        let cmd = parse(&[
            "--locale",
            "hu-HU",
            "-w",
            "narrow",
            "--show-other-month-days",
            "--year-first",
            "--highlight",
            "2024-07-04",
            "--highlight=2024-12-25",
            "--plain-weekends",
            "--log-file",
            "yearcal.log",
            "2024-07",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run {
                target: Some(Target {
                    year: 2024,
                    month: Some(Month::July)
                }),
                month_view: false,
                options: CalendarOptions {
                    locale: String::from("hu-HU"),
                    show_other_month_days: true,
                    weekday_style: WeekdayStyle::Narrow,
                    year_first: true,
                },
                decorations: Decorations {
                    highlights: vec![date!(2024 - 07 - 04), date!(2024 - 12 - 25)],
                    plain_weekends: true,
                },
                log_file: Some(PathBuf::from("yearcal.log")),
            }
        );
    }

    #[test]
    fn test_bad_values() {
        assert!(parse(&["--weekdays", "tiny"]).is_err());
        assert!(parse(&["--highlight", "2024-02-30"]).is_err());
        assert!(parse(&["2024-13"]).is_err());
        assert!(parse(&["2024", "2025"]).is_err());
        assert_eq!(parse(&["-h", "--bogus"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_target() {
        assert_eq!(
            "1999".parse::<Target>(),
            Ok(Target {
                year: 1999,
                month: None
            })
        );
        assert_eq!(
            "2023-12".parse::<Target>(),
            Ok(Target {
                year: 2023,
                month: Some(Month::December)
            })
        );
        assert!("".parse::<Target>().is_err());
        assert!("-5".parse::<Target>().is_err());
        assert!("2023-0".parse::<Target>().is_err());
        assert!("twenty".parse::<Target>().is_err());
    }
}
