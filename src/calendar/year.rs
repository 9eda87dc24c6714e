use super::cells::{CellRole, CellTagger, MonthCalendar, TagAction};
use super::month::{MonthGrid, MonthGridRequest};
use super::{CalendarOptions, GridError};
use crate::locale::{Localizer, WeekdayStyle};
use std::iter::successors;
use time::{Date, Month};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct YearGridRequest {
    pub year: i32,
    pub options: CalendarOptions,
}

impl YearGridRequest {
    pub fn new(year: i32, options: CalendarOptions) -> YearGridRequest {
        YearGridRequest { year, options }
    }

    /// The request for each month of the year, January through December
    pub fn month_requests(&self) -> impl Iterator<Item = MonthGridRequest> + '_ {
        months().map(|month| MonthGridRequest::for_month(self.year, month, self.options.clone()))
    }
}

fn months() -> impl Iterator<Item = Month> {
    successors(Some(Month::January), |&m| {
        (m != Month::December).then(|| m.next())
    })
}

/// The twelve month grids of a year
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct YearGrid {
    year: i32,
    // Invariant: Exactly twelve grids, January through December
    months: Vec<MonthGrid>,
}

impl YearGrid {
    pub fn build<L: Localizer + ?Sized>(
        request: &YearGridRequest,
        localizer: &L,
    ) -> Result<YearGrid, GridError> {
        let months = request
            .month_requests()
            .map(|r| MonthGrid::build(&r, localizer))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(YearGrid {
            year: request.year,
            months,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn months(&self) -> &[MonthGrid] {
        &self.months
    }

    pub fn month(&self, month: Month) -> Option<&MonthGrid> {
        self.months.get(usize::from(u8::from(month)) - 1)
    }
}

/// A year of month calendars that stays consistent under reconfiguration.
///
/// Every setter rebuilds all twelve months before returning, discarding any
/// tags applied since the last build.  If the rebuild fails, the calendar is
/// left exactly as it was.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YearCalendar<L> {
    localizer: L,
    today: Date,
    request: YearGridRequest,
    // Invariant: Exactly twelve calendars, January through December
    months: Vec<MonthCalendar>,
}

impl<L: Localizer> YearCalendar<L> {
    pub fn new(
        request: YearGridRequest,
        localizer: L,
        today: Date,
    ) -> Result<YearCalendar<L>, GridError> {
        let months = build_months(&request, &localizer, today)?;
        Ok(YearCalendar {
            localizer,
            today,
            request,
            months,
        })
    }

    pub fn year(&self) -> i32 {
        self.request.year
    }

    pub fn options(&self) -> &CalendarOptions {
        &self.request.options
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn months(&self) -> &[MonthCalendar] {
        &self.months
    }

    pub fn month(&self, month: Month) -> Option<&MonthCalendar> {
        self.months.get(usize::from(u8::from(month)) - 1)
    }

    pub fn set_year(&mut self, year: i32) -> Result<(), GridError> {
        self.reconfigure(|r| r.year = year)
    }

    pub fn set_locale<S: Into<String>>(&mut self, locale: S) -> Result<(), GridError> {
        let locale = locale.into();
        self.reconfigure(|r| r.options.locale = locale)
    }

    pub fn set_year_first(&mut self, year_first: bool) -> Result<(), GridError> {
        self.reconfigure(|r| r.options.year_first = year_first)
    }

    pub fn set_show_other_month_days(&mut self, show: bool) -> Result<(), GridError> {
        self.reconfigure(|r| r.options.show_other_month_days = show)
    }

    pub fn set_weekday_style(&mut self, style: WeekdayStyle) -> Result<(), GridError> {
        self.reconfigure(|r| r.options.weekday_style = style)
    }

    fn reconfigure<F: FnOnce(&mut YearGridRequest)>(&mut self, f: F) -> Result<(), GridError> {
        let mut request = self.request.clone();
        f(&mut request);
        let months = build_months(&request, &self.localizer, self.today)?;
        tracing::debug!(
            year = request.year,
            locale = %request.options.locale,
            "Rebuilt year calendar"
        );
        self.request = request;
        self.months = months;
        Ok(())
    }
}

fn build_months<L: Localizer + ?Sized>(
    request: &YearGridRequest,
    localizer: &L,
    today: Date,
) -> Result<Vec<MonthCalendar>, GridError> {
    request
        .month_requests()
        .map(|r| MonthCalendar::new(&r, localizer, today))
        .collect()
}

impl<L> CellTagger for YearCalendar<L> {
    fn tag_cells_by_role(&mut self, role: CellRole, tag: &str, action: TagAction) {
        for month in &mut self.months {
            month.tag_cells_by_role(role, tag, action);
        }
    }

    fn tag_cells_by_dates(&mut self, dates: &[Date], tag: &str) {
        for month in &mut self.months {
            month.tag_cells_by_dates(dates, tag);
        }
    }
}
