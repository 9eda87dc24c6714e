use crate::theme::BASE_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static COMMANDS: &[(&str, &str)] = &[
    ("n, RIGHT", "Next month/year"),
    ("p, LEFT", "Previous month/year"),
    ("m", "Toggle month/year view"),
    ("t", "Toggle other months' days"),
    ("w", "Cycle weekday names"),
    ("y", "Toggle year/month order"),
    ("0, HOME", "Jump to today"),
    ("g", "Input month to jump to"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

const KEY_COLUMN_WIDTH: usize = 16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help;

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = COMMANDS
            .iter()
            .map(|&(keys, what)| {
                Line::raw(format!("{keys:width$}{what}", width = KEY_COLUMN_WIDTH))
            })
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        let text = Text::from(lines);
        let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
        let height = u16::try_from(text.height()).unwrap_or(u16::MAX);
        let inner = popup_area(area, width.saturating_add(2), height.saturating_add(2), buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE)
            .render(inner, buf);
    }
}

/// Clears a box of the given size (plus a one-column margin on either side)
/// in the center of `area` and returns the box's area
pub(crate) fn popup_area(area: Rect, width: u16, height: u16, buf: &mut Buffer) -> Rect {
    let [popup] = Layout::horizontal([width.min(area.width)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([height.min(area.height)])
        .flex(Flex::Center)
        .areas(popup);
    let outer = Rect {
        x: popup.x.saturating_sub(1),
        y: popup.y,
        width: popup.width.saturating_add(2),
        height: popup.height,
    }
    .intersection(area);
    Clear.render(outer, buf);
    Block::new().style(BASE_STYLE).render(outer, buf);
    popup
}
