use crate::help::popup_area;
use crate::theme::{
    jumpto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, StatefulWidget, Widget},
};
use time::Month;

const BOX_WIDTH: u16 = 15;
const BOX_HEIGHT: u16 = 6;
const ENTER_POS: usize = 6;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct JumpTo;

impl StatefulWidget for JumpTo {
    type State = JumpToState;

    /*
     * ...............
     * .┌─ Jump To… ─┐.
     * .│            │.
     * .│  -YYYY-MM  │.
     * .│            │.
     * .│  [ENTER]   │.
     * .└────────────┘.
     * ...............
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block_area = popup_area(area, BOX_WIDTH, BOX_HEIGHT, buf);
        Block::bordered()
            .title(" Jump To… ")
            .title_alignment(Alignment::Center)
            .style(BASE_STYLE)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// Digits typed so far into the "jump to YYYY-MM" prompt
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct JumpToState {
    negative: bool,
    year: [Option<u8>; 4],
    month: [Option<u8>; 2],
    pos: usize,
}

impl JumpToState {
    pub(crate) fn new() -> JumpToState {
        JumpToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Style a span and convert it to a line rather than creating a
            // styled line directly so that only the "[ENTER]" text and not any
            // of its centering padding will be underlined:
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            if self.negative { "-" } else { " " },
            BASE_STYLE,
        )];
        for (i, (fallback, digit)) in self
            .year
            .iter()
            .map(|d| ("Y", d))
            .chain(self.month.iter().map(|d| ("M", d)))
            .enumerate()
        {
            if i == self.year.len() {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            spans.push(match digit {
                Some(d) => Span::styled(d.to_string(), BASE_STYLE),
                None => Span::styled(fallback, UNFILLED_CELL_STYLE),
            });
        }
        Line::from_iter(spans)
    }

    fn slot(&mut self, pos: usize) -> &mut Option<u8> {
        if pos < self.year.len() {
            &mut self.year[pos]
        } else {
            &mut self.month[pos - self.year.len()]
        }
    }

    pub(crate) fn handle_input(&mut self, input: JumpToInput) -> JumpToOutput {
        match (input, self.pos) {
            (JumpToInput::Negative, 0) => {
                self.negative = !self.negative;
                JumpToOutput::Ok
            }
            (JumpToInput::Positive, 0) => {
                self.negative = false;
                JumpToOutput::Ok
            }
            (JumpToInput::Digit(d), 0..ENTER_POS) => {
                *self.slot(self.pos) = Some(d);
                self.pos += 1;
                JumpToOutput::Ok
            }
            (JumpToInput::Backspace, 1..) => {
                self.pos -= 1;
                *self.slot(self.pos) = None;
                JumpToOutput::Ok
            }
            (JumpToInput::Enter, ENTER_POS) => {
                let year = self
                    .year
                    .iter()
                    .flatten()
                    .fold(0i32, |acc, &d| acc * 10 + i32::from(d));
                let year = if self.negative { -year } else { year };
                let month = self.month.iter().flatten().fold(0u8, |acc, &d| acc * 10 + d);
                match Month::try_from(month) {
                    Ok(month) => JumpToOutput::Jump(year, month),
                    Err(_) => JumpToOutput::Invalid,
                }
            }
            _ => JumpToOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToInput {
    Negative,
    Positive,
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToOutput {
    Ok,
    Invalid,
    Jump(i32, Month),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(state: &mut JumpToState, digits: &[u8]) {
        for &d in digits {
            assert_eq!(state.handle_input(JumpToInput::Digit(d)), JumpToOutput::Ok);
        }
    }

    #[test]
    fn test_jump() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2, 0, 2, 4, 0, 7]);
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump(2024, Month::July)
        );
    }

    #[test]
    fn test_enter_too_early() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2, 0, 2, 4, 0]);
        assert_eq!(state.handle_input(JumpToInput::Enter), JumpToOutput::Invalid);
        assert_eq!(state.handle_input(JumpToInput::Backspace), JumpToOutput::Ok);
        type_digits(&mut state, &[1, 2]);
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump(2024, Month::December)
        );
    }

    #[test]
    fn test_negative_year_bad_month() {
        let mut state = JumpToState::new();
        assert_eq!(state.handle_input(JumpToInput::Negative), JumpToOutput::Ok);
        type_digits(&mut state, &[0, 0, 4, 4, 1, 3]);
        assert_eq!(state.handle_input(JumpToInput::Enter), JumpToOutput::Invalid);
        assert_eq!(state.handle_input(JumpToInput::Digit(1)), JumpToOutput::Invalid);
    }

    #[test]
    fn test_line() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[1, 9]);
        let line = state.to_line();
        let s = line
            .spans
            .iter()
            .map(|sp| sp.content.as_ref())
            .collect::<String>();
        assert_eq!(s, " 19YY-MM");
    }
}
