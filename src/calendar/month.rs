use super::classify::{classify, DayClassification};
use super::{CalendarOptions, GridError, WeekdayExt, DAYS_IN_WEEK};
use crate::locale::{capitalize, Localizer};
use std::iter::successors;
use std::slice::ChunksExact;
use time::{Date, Duration, Month};

/// A single day of a month grid
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CalendarDate {
    date: Date,
    iso_week: u8,
    weekday_index: u8,
    in_month: bool,
}

impl CalendarDate {
    fn new(date: Date, month: Month) -> CalendarDate {
        CalendarDate {
            date,
            iso_week: date.iso_week(),
            weekday_index: date.weekday().index1(),
            in_month: date.month() == month,
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> Month {
        self.date.month()
    }

    pub fn day(&self) -> u8 {
        self.date.day()
    }

    pub fn iso_week(&self) -> u8 {
        self.iso_week
    }

    /// Position of the date within its week, 1 (Monday) through 7 (Sunday)
    pub fn weekday_index(&self) -> u8 {
        self.weekday_index
    }

    /// `false` for the days of neighboring months that fill out the first and
    /// last weeks
    pub fn in_month(&self) -> bool {
        self.in_month
    }
}

/// Weekday column header
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct WeekdayLabel {
    pub text: String,
    pub is_weekend: bool,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MonthGridRequest {
    pub year: i32,
    pub month: Month,
    pub options: CalendarOptions,
}

impl MonthGridRequest {
    /// Creates a request for the given month number, which must be in the
    /// range 1 through 12
    pub fn new(year: i32, month: u8, options: CalendarOptions) -> Result<Self, GridError> {
        let month = Month::try_from(month).map_err(|_| GridError::InvalidMonth(month))?;
        Ok(MonthGridRequest {
            year,
            month,
            options,
        })
    }

    pub fn for_month(year: i32, month: Month, options: CalendarOptions) -> Self {
        MonthGridRequest {
            year,
            month,
            options,
        }
    }
}

/// The whole weeks (Monday through Sunday) covering a month
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MonthGrid {
    year: i32,
    month: Month,
    options: CalendarOptions,
    month_name: String,
    weekday_labels: [WeekdayLabel; DAYS_IN_WEEK],
    // Invariant: Non-empty, length is a multiple of DAYS_IN_WEEK, starts on a
    // Monday, and consists of consecutive days
    days: Vec<CalendarDate>,
}

impl MonthGrid {
    pub fn build<L: Localizer + ?Sized>(
        request: &MonthGridRequest,
        localizer: &L,
    ) -> Result<MonthGrid, GridError> {
        let MonthGridRequest {
            year,
            month,
            ref options,
        } = *request;
        let out_of_range = || GridError::OutOfRange {
            year,
            month: month.into(),
        };
        let first = Date::from_calendar_date(year, month, 1).map_err(|_| out_of_range())?;
        let weeks = week_count(first);
        let start = grid_start(first).ok_or_else(out_of_range)?;
        let qty = usize::from(weeks) * DAYS_IN_WEEK;
        let days = successors(Some(start), |d| d.next_day())
            .take(qty)
            .map(|d| CalendarDate::new(d, month))
            .collect::<Vec<_>>();
        if days.len() < qty {
            return Err(out_of_range());
        }
        let weekday_names = localizer.weekday_names(&options.locale, options.weekday_style);
        let month_name = localizer.month_name(&options.locale, year, month);
        if weekday_names.is_none() || month_name.is_none() {
            tracing::warn!(locale = %options.locale, "No calendar names available for locale");
        }
        let mut names = weekday_names.unwrap_or_default().into_iter();
        let weekday_labels = std::array::from_fn(|i| WeekdayLabel {
            text: names.next().unwrap_or_default(),
            is_weekend: weekday_label_is_weekend(i),
        });
        let month_name = month_name.as_deref().map_or_else(String::new, capitalize);
        tracing::debug!(
            year,
            month = u8::from(month),
            weeks,
            locale = %options.locale,
            "Built month grid"
        );
        Ok(MonthGrid {
            year,
            month,
            options: options.clone(),
            month_name,
            weekday_labels,
            days,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    /// The localized full name of the month with its first letter
    /// capitalized, or an empty string if the locale has no names
    pub fn month_name(&self) -> &str {
        &self.month_name
    }

    /// The year and month name in the order configured by
    /// [`CalendarOptions::year_first`]
    pub fn header(&self) -> [String; 2] {
        let year = self.year.to_string();
        if self.options.year_first {
            [year, self.month_name.clone()]
        } else {
            [self.month_name.clone(), year]
        }
    }

    /// Identifier of the form "YYYY-MM"
    pub fn id(&self) -> String {
        format!("{}-{:02}", self.year, u8::from(self.month))
    }

    pub fn weekday_labels(&self) -> &[WeekdayLabel; DAYS_IN_WEEK] {
        &self.weekday_labels
    }

    pub fn days(&self) -> &[CalendarDate] {
        &self.days
    }

    pub fn week_count(&self) -> usize {
        self.days.len() / DAYS_IN_WEEK
    }

    pub fn weeks(&self) -> ChunksExact<'_, CalendarDate> {
        self.days.chunks_exact(DAYS_IN_WEEK)
    }

    pub fn first_day(&self) -> Date {
        self.days.first().map_or_else(|| self.first_of_month(), CalendarDate::date)
    }

    pub fn last_day(&self) -> Date {
        self.days.last().map_or_else(|| self.first_of_month(), CalendarDate::date)
    }

    /// Returns true if `day` is shown as a blank placeholder, i.e., it belongs
    /// to a neighboring month and such days are hidden
    pub fn is_suppressed(&self, day: &CalendarDate) -> bool {
        !self.options.show_other_month_days && day.month() != self.month
    }

    /// Classifies the day at position `index` of the grid
    pub fn classify_at(&self, index: usize, today: Date) -> Option<DayClassification> {
        self.days.get(index).map(|day| {
            classify(
                day.date(),
                self.month,
                self.year,
                today,
                index % DAYS_IN_WEEK,
            )
        })
    }

    fn first_of_month(&self) -> Date {
        Date::from_calendar_date(self.year, self.month, 1).unwrap_or(Date::MIN)
    }
}

/// Returns the number of Monday-first weeks touched by the month starting on
/// `first`
fn week_count(first: Date) -> u8 {
    let last = successors(Some(first), |d| d.next_day())
        .take_while(|d| d.month() == first.month())
        .last()
        .unwrap_or(first);
    let first_week = first.iso_week();
    let last_week = last.iso_week();
    if first_week <= last_week {
        last_week - first_week + 1
    } else if first.month() == Month::December {
        // The last days of December belong to week 1 of the next ISO year
        time::util::weeks_in_year(first.year()) - first_week + last_week + 1
    } else {
        // January 1st falls in the last week of the previous ISO year
        last_week + 1
    }
}

/// Returns the Monday on or before `first`
fn grid_start(first: Date) -> Option<Date> {
    let back = first.weekday().number_days_from_monday();
    first.checked_sub(Duration::days(i64::from(back)))
}

/// Whether the weekday header at position `i` is tagged as a weekend.  For a
/// Monday-first week this selects exactly Saturday (5) and Sunday (6).
fn weekday_label_is_weekend(i: usize) -> bool {
    i > 0 && (i % 5 == 0 || i % 6 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{PosixLocales, WeekdayStyle};
    use std::io;
    use std::sync::{Arc, Mutex};
    use time::{macros::date, Weekday};

    fn build(year: i32, month: u8) -> MonthGrid {
        let request = MonthGridRequest::new(year, month, CalendarOptions::default()).unwrap();
        MonthGrid::build(&request, &PosixLocales).unwrap()
    }

    #[test]
    fn test_leap_february() {
        let grid = build(2024, 2);
        assert_eq!(grid.week_count(), 5);
        assert_eq!(grid.days().len(), 35);
        assert_eq!(grid.first_day(), date!(2024 - 01 - 29));
        assert_eq!(grid.last_day(), date!(2024 - 03 - 03));
        assert!(grid.days().iter().any(|d| d.date() == date!(2024 - 02 - 29)));
        assert_eq!(date!(2024 - 02 - 01).weekday(), Weekday::Thursday);
    }

    #[test]
    fn test_december_2023() {
        let grid = build(2023, 12);
        assert_eq!(grid.first_day(), date!(2023 - 11 - 27));
        assert_eq!(grid.last_day(), date!(2023 - 12 - 31));
        assert_eq!(grid.week_count(), 5);
    }

    #[test]
    fn test_december_into_next_iso_year() {
        // Dec 31, 2024 is in week 1 of 2025
        let grid = build(2024, 12);
        assert_eq!(grid.week_count(), 6);
        assert_eq!(grid.first_day(), date!(2024 - 11 - 25));
        assert_eq!(grid.last_day(), date!(2025 - 01 - 05));
    }

    #[test]
    fn test_january_from_previous_iso_year() {
        // Jan 1, 2021 is in week 53 of 2020
        let grid = build(2021, 1);
        assert_eq!(grid.week_count(), 5);
        assert_eq!(grid.first_day(), date!(2020 - 12 - 28));
        assert_eq!(grid.last_day(), date!(2021 - 01 - 31));
        assert_eq!(grid.days()[0].iso_week(), 53);
    }

    #[test]
    fn test_four_week_february() {
        // Feb 1, 2021 is a Monday and Feb 28 a Sunday
        let grid = build(2021, 2);
        assert_eq!(grid.week_count(), 4);
        assert_eq!(grid.days().len(), 28);
        assert!(grid.days().iter().all(CalendarDate::in_month));
    }

    #[test]
    fn test_whole_weeks_covering_month() {
        for year in 1995..=2035 {
            for month in 1..=12 {
                let grid = build(year, month);
                let days = grid.days();
                assert_eq!(days.len() % DAYS_IN_WEEK, 0, "{year}-{month}");
                assert!(days.len() >= 28, "{year}-{month}");
                assert!(days.len() <= 42, "{year}-{month}");
                for (i, d) in days.iter().enumerate() {
                    assert_eq!(usize::from(d.weekday_index()), i % DAYS_IN_WEEK + 1);
                }
                for pair in days.windows(2) {
                    assert_eq!(pair[0].date().next_day(), Some(pair[1].date()));
                }
                // No week lies entirely outside the month
                for week in grid.weeks() {
                    assert!(week.iter().any(CalendarDate::in_month), "{year}-{month}");
                }
                assert_eq!(days.first().map(CalendarDate::in_month), Some(days[0].day() == 1));
            }
        }
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(build(2024, 7), build(2024, 7));
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(
            MonthGridRequest::new(2024, 13, CalendarOptions::default()),
            Err(GridError::InvalidMonth(13))
        );
        assert_eq!(
            MonthGridRequest::new(2024, 0, CalendarOptions::default()),
            Err(GridError::InvalidMonth(0))
        );
    }

    #[test]
    fn test_out_of_range() {
        let request =
            MonthGridRequest::for_month(9999, Month::December, CalendarOptions::default());
        assert_eq!(
            MonthGrid::build(&request, &PosixLocales),
            Err(GridError::OutOfRange {
                year: 9999,
                month: 12
            })
        );
    }

    #[test]
    fn test_weekday_labels() {
        let grid = build(2024, 7);
        let labels = grid
            .weekday_labels()
            .iter()
            .map(|l| (l.text.as_str(), l.is_weekend))
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            [
                ("Mon", false),
                ("Tue", false),
                ("Wed", false),
                ("Thu", false),
                ("Fri", false),
                ("Sat", true),
                ("Sun", true),
            ]
        );
    }

    #[test]
    fn test_unknown_locale_degrades() {
        let options = CalendarOptions {
            locale: String::from("zz-ZZ"),
            ..CalendarOptions::default()
        };
        let request = MonthGridRequest::new(2024, 7, options).unwrap();
        let grid = MonthGrid::build(&request, &PosixLocales).unwrap();
        assert_eq!(grid.month_name(), "");
        assert!(grid.weekday_labels().iter().all(|l| l.text.is_empty()));
        assert!(grid.weekday_labels()[6].is_weekend);
        assert_eq!(grid.week_count(), 5);
    }

    #[derive(Clone, Debug, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unknown_locale_warns_once_per_grid() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let options = CalendarOptions {
            locale: String::from("zz"),
            ..CalendarOptions::default()
        };
        tracing::subscriber::with_default(subscriber, || {
            let request = MonthGridRequest::new(2024, 7, options).unwrap();
            MonthGrid::build(&request, &PosixLocales).unwrap();
            let request = MonthGridRequest::new(2024, 7, CalendarOptions::default()).unwrap();
            MonthGrid::build(&request, &PosixLocales).unwrap();
        });
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("No calendar names available").count(), 1);
    }

    #[test]
    fn test_localized_header() {
        let options = CalendarOptions {
            locale: String::from("hu"),
            weekday_style: WeekdayStyle::Long,
            year_first: true,
            ..CalendarOptions::default()
        };
        let request = MonthGridRequest::new(2024, 7, options).unwrap();
        let grid = MonthGrid::build(&request, &PosixLocales).unwrap();
        assert_eq!(grid.month_name(), "Július");
        assert_eq!(grid.header(), ["2024".to_owned(), "Július".to_owned()]);
        assert_eq!(grid.weekday_labels()[0].text, "hétfő");
        assert_eq!(grid.id(), "2024-07");
    }

    #[test]
    fn test_suppressed() {
        let grid = build(2024, 2);
        let days = grid.days();
        assert!(grid.is_suppressed(&days[0]));
        assert!(!grid.is_suppressed(&days[3]));
        let options = CalendarOptions {
            show_other_month_days: true,
            ..CalendarOptions::default()
        };
        let request = MonthGridRequest::new(2024, 2, options).unwrap();
        let shown = MonthGrid::build(&request, &PosixLocales).unwrap();
        assert!(!shown.is_suppressed(&shown.days()[0]));
        assert_eq!(shown.days(), grid.days());
    }

    #[test]
    fn test_label_weekend_formula() {
        let flagged = (0..DAYS_IN_WEEK)
            .filter(|&i| weekday_label_is_weekend(i))
            .collect::<Vec<_>>();
        assert_eq!(flagged, [5, 6]);
    }
}
