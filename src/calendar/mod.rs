mod cells;
mod classify;
mod month;
mod year;
pub use self::cells::{
    Cell, CellId, CellRegistry, CellRole, CellTagger, MonthCalendar, ParseCellIdError, TagAction,
};
pub use self::classify::{classify, DayClassification};
pub use self::month::{CalendarDate, MonthGrid, MonthGridRequest, WeekdayLabel};
pub use self::year::{YearCalendar, YearGrid, YearGridRequest};
use crate::locale::WeekdayStyle;
use thiserror::Error;
use time::Weekday;

pub const DAYS_IN_WEEK: usize = 7;

/// Display configuration shared by every month of a calendar
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CalendarOptions {
    /// Locale identifier used for weekday and month names, e.g. "en" or
    /// "hu-HU"
    pub locale: String,

    /// Whether days of the neighboring months that fill out the first and
    /// last weeks are shown.  When false, they are kept in the grid as blank
    /// placeholders.
    pub show_other_month_days: bool,

    pub weekday_style: WeekdayStyle,

    /// Whether the month header reads "2024 July" rather than "July 2024"
    pub year_first: bool,
}

impl Default for CalendarOptions {
    fn default() -> CalendarOptions {
        CalendarOptions {
            locale: String::from("en"),
            show_other_month_days: false,
            weekday_style: WeekdayStyle::Short,
            year_first: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum GridError {
    #[error("invalid month number {0}; expected 1 through 12")]
    InvalidMonth(u8),
    #[error("calendar for {year}-{month:02} extends outside the supported date range")]
    OutOfRange { year: i32, month: u8 },
}

pub(crate) trait WeekdayExt {
    /// 1 for Monday through 7 for Sunday
    fn index1(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index1(&self) -> u8 {
        self.number_from_monday()
    }
}
