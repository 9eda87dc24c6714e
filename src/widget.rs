use crate::theme::{cell_style, HEADER_STYLE, WEEKDAY_STYLE, WEEKEND_LABEL_STYLE};
use ratatui::{prelude::*, widgets::*};
use yearcal::{Localizer, MonthCalendar, YearCalendar, DAYS_IN_WEEK};

/// Number of lines taken up by the month header and the weekday labels
const HEADER_LINES: u16 = 2;

/// A month grid never has more than six weeks
const MAX_WEEKS: u16 = 6;

/// Height of a month block
const MONTH_HEIGHT: u16 = HEADER_LINES + MAX_WEEKS;

/// Columns per day in the year view
const COMPACT_DAY_WIDTH: u16 = 3;

/// Blank columns and lines between the months of the year view
const MONTH_GAP: u16 = 3;

/// Renders a single month: a header with the year and month name, the weekday
/// labels, and one line per week
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a> {
    month: &'a MonthCalendar,
    day_width: u16,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(month: &'a MonthCalendar) -> Self {
        MonthView {
            month,
            day_width: COMPACT_DAY_WIDTH,
        }
    }

    /// Use columns wide enough for the longest weekday label
    pub(crate) fn wide(mut self) -> Self {
        let longest = self
            .month
            .grid()
            .weekday_labels()
            .iter()
            .map(|l| Line::raw(l.text.as_str()).width())
            .max()
            .unwrap_or_default();
        self.day_width = u16::try_from(longest)
            .unwrap_or(u16::MAX)
            .saturating_add(1)
            .clamp(COMPACT_DAY_WIDTH, 12);
        self
    }

    pub(crate) fn width(&self) -> u16 {
        self.day_width * 7
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid = self.month.grid();
        let mut canvas = BufferCanvas::new(area, buf);
        let width = self.width();
        let [left, right] = grid.header();
        canvas.print(0, 0, &left, width, HEADER_STYLE);
        let right_width = u16::try_from(Line::raw(right.as_str()).width()).unwrap_or(u16::MAX);
        canvas.print(0, width.saturating_sub(right_width), &right, right_width, HEADER_STYLE);
        let label_width = self.day_width - 1;
        let columns = (0..).step_by(self.day_width.into());
        for (x, label) in std::iter::zip(columns, grid.weekday_labels()) {
            let style = if label.is_weekend {
                WEEKEND_LABEL_STYLE
            } else {
                WEEKDAY_STYLE
            };
            canvas.print(1, x, &label.text, label_width, style);
        }
        for (i, day) in grid.days().iter().enumerate() {
            if grid.is_suppressed(day) {
                continue;
            }
            let Some(cell) = self.month.cells().get(i) else {
                continue;
            };
            let (Ok(week), Ok(col)) = (
                u16::try_from(i / DAYS_IN_WEEK),
                u16::try_from(i % DAYS_IN_WEEK),
            ) else {
                continue;
            };
            let s = format!("{:>w$}", day.day(), w = usize::from(label_width));
            canvas.print(
                HEADER_LINES + week,
                col * self.day_width,
                &s,
                label_width,
                cell_style(cell),
            );
        }
    }
}

/// Renders all twelve months of a year, as many side by side as fit
#[derive(Copy, Clone, Debug)]
pub(crate) struct YearView<'a, L> {
    calendar: &'a YearCalendar<L>,
}

impl<'a, L> YearView<'a, L> {
    pub(crate) fn new(calendar: &'a YearCalendar<L>) -> Self {
        YearView { calendar }
    }

    fn columns_for_width(width: u16) -> u16 {
        let month_width = COMPACT_DAY_WIDTH * 7;
        (width.saturating_add(MONTH_GAP) / (month_width + MONTH_GAP)).clamp(1, 4)
    }
}

impl<L: Localizer> Widget for YearView<'_, L> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let month_width = COMPACT_DAY_WIDTH * 7;
        let columns = Self::columns_for_width(area.width);
        let total_width = columns * month_width + (columns - 1) * MONTH_GAP;
        let left = area.x + area.width.saturating_sub(total_width) / 2;
        for (i, month) in std::iter::zip(0u16.., self.calendar.months()) {
            let x = left + (i % columns) * (month_width + MONTH_GAP);
            let y = area.y + (i / columns) * (MONTH_HEIGHT + 1);
            let month_area = Rect::new(x, y, month_width, MONTH_HEIGHT).intersection(area);
            if !month_area.is_empty() {
                MonthView::new(month).render(month_area, buf);
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    // Prints at most `max_width` columns of `s` starting at (`x`, `y`),
    // relative to the canvas area
    fn print(&mut self, y: u16, x: u16, s: &str, max_width: u16, style: Style) {
        if y < self.area.height && x < self.area.width && max_width > 0 {
            let text = Text::styled(s, style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width).min(max_width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}

/// The text of each line of `buf`, without trailing blanks
#[cfg(test)]
pub(crate) fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let width = usize::from(buf.area.width);
    buf.content()
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(|c| c.symbol())
                .collect::<String>()
                .trim_end()
                .to_owned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{macros::date, Month};
    use yearcal::{CalendarOptions, MonthGridRequest, PosixLocales, WeekdayStyle};

    fn july(options: CalendarOptions) -> MonthCalendar {
        let request = MonthGridRequest::for_month(2024, Month::July, options);
        MonthCalendar::new(&request, &PosixLocales, date!(2024 - 07 - 10)).unwrap()
    }

    #[test]
    fn test_compact_month() {
        let month = july(CalendarOptions::default());
        let area = Rect::new(0, 0, 21, 8);
        let mut buffer = Buffer::empty(area);
        MonthView::new(&month).render(area, &mut buffer);
        assert_eq!(
            buffer_lines(&buffer),
            [
                "July             2024",
                "Mo Tu We Th Fr Sa Su",
                " 1  2  3  4  5  6  7",
                " 8  9 10 11 12 13 14",
                "15 16 17 18 19 20 21",
                "22 23 24 25 26 27 28",
                "29 30 31",
                "",
            ]
        );
        assert_eq!(buffer[(0, 1)].style().fg, WEEKDAY_STYLE.fg);
        assert_eq!(buffer[(15, 1)].style().fg, WEEKEND_LABEL_STYLE.fg);
        assert!(buffer[(7, 3)]
            .style()
            .add_modifier
            .contains(Modifier::REVERSED));
    }

    #[test]
    fn test_other_month_days_year_first() {
        let month = july(CalendarOptions {
            show_other_month_days: true,
            year_first: true,
            ..CalendarOptions::default()
        });
        let area = Rect::new(0, 0, 21, 8);
        let mut buffer = Buffer::empty(area);
        MonthView::new(&month).render(area, &mut buffer);
        let lines = buffer_lines(&buffer);
        assert_eq!(lines[0], "2024             July");
        assert_eq!(lines[6], "29 30 31  1  2  3  4");
    }

    #[test]
    fn test_wide_month() {
        let month = july(CalendarOptions {
            weekday_style: WeekdayStyle::Long,
            ..CalendarOptions::default()
        });
        let view = MonthView::new(&month).wide();
        // "Wednesday" plus a space
        assert_eq!(view.width(), 70);
        let area = Rect::new(0, 0, 70, 8);
        let mut buffer = Buffer::empty(area);
        view.render(area, &mut buffer);
        let lines = buffer_lines(&buffer);
        assert!(lines[1].starts_with("Monday    Tuesday   Wednesday Thursday"));
        assert_eq!(
            lines[2].trim_start(),
            "1         2         3         4         5         6         7"
        );
    }

    #[test]
    fn test_year_columns() {
        assert_eq!(YearView::<PosixLocales>::columns_for_width(80), 3);
        assert_eq!(YearView::<PosixLocales>::columns_for_width(93), 4);
        assert_eq!(YearView::<PosixLocales>::columns_for_width(200), 4);
        assert_eq!(YearView::<PosixLocales>::columns_for_width(10), 1);
    }
}
