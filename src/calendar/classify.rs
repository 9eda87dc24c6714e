use time::{Date, Month};

/// How a single grid cell is presented
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DayClassification {
    pub is_today: bool,
    pub is_current_month: bool,
    pub is_weekend: bool,
}

impl DayClassification {
    /// The tag names a freshly built cell starts out with
    pub fn tag_names(&self) -> Vec<&'static str> {
        let mut tags = vec![
            if self.is_today { "today" } else { "day" },
            if self.is_current_month {
                "currentmonth"
            } else {
                "othermonth"
            },
        ];
        if self.is_weekend {
            tags.push("weekend");
        }
        tags
    }
}

/// Classifies `date`, shown in column `day_index` (0-based, Monday first) of
/// the grid for `request_month` of `request_year`.
///
/// A date is "today" only when `today` falls in the requested month and
/// `date` is the same day of that month.  Weekends are the last two columns
/// of the grid regardless of the date's actual weekday.
pub fn classify(
    date: Date,
    request_month: Month,
    request_year: i32,
    today: Date,
    day_index: usize,
) -> DayClassification {
    let is_current_month = date.month() == request_month;
    DayClassification {
        is_today: today.year() == request_year
            && today.month() == request_month
            && today.day() == date.day()
            && is_current_month,
        is_current_month,
        is_weekend: day_index == 5 || day_index == 6,
    }
}
