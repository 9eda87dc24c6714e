//! Month and year calendar grids.
//!
//! A [`MonthGrid`] covers a month with whole Monday-first weeks, classifying
//! every day as today / current month / weekend.  A [`YearGrid`] is twelve of
//! them sharing one configuration, and a [`YearCalendar`] keeps such a year
//! alive together with the per-cell tag sets that a presentation layer
//! styles.  Weekday and month names come from a [`Localizer`].
pub mod calendar;
pub mod locale;
pub use crate::calendar::{
    classify, CalendarDate, CalendarOptions, CellId, CellRegistry, CellRole, CellTagger,
    DayClassification, GridError, MonthCalendar, MonthGrid, MonthGridRequest, TagAction,
    WeekdayLabel, YearCalendar, YearGrid, YearGridRequest, DAYS_IN_WEEK,
};
pub use crate::locale::{Localizer, ParseWeekdayStyleError, PosixLocales, WeekdayStyle};
