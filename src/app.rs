use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::BASE_STYLE;
use crate::widget::{MonthView, YearView};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::{Date, Month};
use yearcal::{CellRole, CellTagger, GridError, Localizer, TagAction, YearCalendar};

/// Which part of the calendar is on screen
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum View {
    Month(Month),
    Year,
}

/// Tags reapplied to the calendar every time it is rebuilt
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Decorations {
    pub(crate) highlights: Vec<Date>,
    pub(crate) plain_weekends: bool,
}

impl Decorations {
    fn apply<T: CellTagger>(&self, target: &mut T) {
        if self.plain_weekends {
            target.tag_cells_by_role(CellRole::Weekend, "weekend", TagAction::Remove);
        }
        target.tag_cells_by_dates(&self.highlights, "holiday");
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<L> {
    calendar: YearCalendar<L>,
    view: View,
    decorations: Decorations,
    state: AppState,
}

impl<L: Localizer> App<L> {
    pub(crate) fn new(calendar: YearCalendar<L>, view: View, decorations: Decorations) -> App<L> {
        let mut app = App {
            calendar,
            view,
            decorations,
            state: AppState::Calendar,
        };
        app.decorate();
        app
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or the requested
    // calendar could not be built
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => self.forwards(),
                KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => self.backwards(),
                KeyCode::Char('t') => {
                    let show = !self.calendar.options().show_other_month_days;
                    self.reconfigure(|cal| cal.set_show_other_month_days(show))
                }
                KeyCode::Char('w') => {
                    let style = self.calendar.options().weekday_style.next();
                    self.reconfigure(|cal| cal.set_weekday_style(style))
                }
                KeyCode::Char('y') => {
                    let year_first = !self.calendar.options().year_first;
                    self.reconfigure(|cal| cal.set_year_first(year_first))
                }
                KeyCode::Char('m') => {
                    self.view = match self.view {
                        View::Month(_) => View::Year,
                        View::Year => View::Month(self.default_month()),
                    };
                    true
                }
                KeyCode::Char('0') | KeyCode::Home => self.reset(),
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => state.handle_input(JumpToInput::Negative),
                        KeyCode::Char('+') => state.handle_input(JumpToInput::Positive),
                        KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok())
                        {
                            Some(d) => state.handle_input(JumpToInput::Digit(d)),
                            None => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(year, month) => {
                            self.state = AppState::Calendar;
                            self.jump_to(year, month)
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    /// The month shown on switching from the year view: today's month if
    /// today is in the displayed year, January otherwise
    fn default_month(&self) -> Month {
        let today = self.calendar.today();
        if today.year() == self.calendar.year() {
            today.month()
        } else {
            Month::January
        }
    }

    fn forwards(&mut self) -> bool {
        let year = self.calendar.year();
        match self.view {
            View::Month(Month::December) => self.jump_to(year.saturating_add(1), Month::January),
            View::Month(month) => {
                self.view = View::Month(month.next());
                true
            }
            View::Year => self.reconfigure(|cal| cal.set_year(year.saturating_add(1))),
        }
    }

    fn backwards(&mut self) -> bool {
        let year = self.calendar.year();
        match self.view {
            View::Month(Month::January) => self.jump_to(year.saturating_sub(1), Month::December),
            View::Month(month) => {
                self.view = View::Month(month.previous());
                true
            }
            View::Year => self.reconfigure(|cal| cal.set_year(year.saturating_sub(1))),
        }
    }

    fn reset(&mut self) -> bool {
        let today = self.calendar.today();
        self.jump_to(today.year(), today.month())
    }

    fn jump_to(&mut self, year: i32, month: Month) -> bool {
        if year != self.calendar.year() && !self.reconfigure(|cal| cal.set_year(year)) {
            return false;
        }
        if let View::Month(_) = self.view {
            self.view = View::Month(month);
        }
        true
    }

    fn reconfigure<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut YearCalendar<L>) -> Result<(), GridError>,
    {
        match f(&mut self.calendar) {
            Ok(()) => {
                self.decorate();
                true
            }
            Err(e) => {
                tracing::info!(error = %e, "Calendar change rejected");
                false
            }
        }
    }

    fn decorate(&mut self) {
        self.decorations.apply(&mut self.calendar);
    }
}

impl<L: Localizer> Widget for &mut App<L> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        match self.view {
            View::Month(month) => {
                if let Some(cal) = self.calendar.month(month) {
                    let view = MonthView::new(cal).wide();
                    let [area] = Layout::horizontal([Constraint::Length(view.width())])
                        .flex(Flex::Center)
                        .areas(area);
                    let [area] = Layout::vertical([Constraint::Length(8)])
                        .flex(Flex::Center)
                        .areas(area);
                    view.render(area, buf);
                }
            }
            View::Year => YearView::new(&self.calendar).render(area, buf),
        }
        if self.state == AppState::Helping {
            Help.render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
