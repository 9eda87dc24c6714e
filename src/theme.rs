use ratatui::style::{Color, Modifier, Style};
use yearcal::calendar::Cell;

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const HEADER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKEND_LABEL_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

pub(crate) const WEEKEND_STYLE: Style = Style::new().fg(Color::LightRed).bg(Color::Black);

pub(crate) const OTHER_MONTH_STYLE: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);

pub(crate) const HIGHLIGHT_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

/// Tags given to cells by classification; any other tag is drawn highlighted
static CLASS_TAGS: &[&str] = &["day", "today", "currentmonth", "othermonth", "weekend"];

pub(crate) fn cell_style(cell: &Cell) -> Style {
    let mut style = BASE_STYLE;
    if cell.has_tag("weekend") {
        style = style.patch(WEEKEND_STYLE);
    }
    if cell.has_tag("othermonth") {
        style = style.patch(OTHER_MONTH_STYLE);
    }
    if cell
        .tags()
        .iter()
        .any(|t| !CLASS_TAGS.contains(&t.as_str()))
    {
        style = style.patch(HIGHLIGHT_STYLE);
    }
    if cell.has_tag("today") {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
