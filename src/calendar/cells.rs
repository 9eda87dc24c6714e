use super::month::{MonthGrid, MonthGridRequest};
use super::{GridError, DAYS_IN_WEEK};
use crate::locale::Localizer;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The identity of an addressable day cell, displayed as a zero-padded
/// "YYYY-MM-DD" string
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CellId(Date);

impl CellId {
    pub fn date(self) -> Date {
        self.0
    }
}

impl From<Date> for CellId {
    fn from(date: Date) -> CellId {
        CellId(date)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl FromStr for CellId {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> Result<CellId, ParseCellIdError> {
        Date::parse(s, &YMD_FMT)
            .map(CellId)
            .map_err(|source| ParseCellIdError {
                value: s.to_owned(),
                source,
            })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid date {value:?}; expected YYYY-MM-DD")]
pub struct ParseCellIdError {
    value: String,
    source: time::error::Parse,
}

/// Which kind of column a cell sits in
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CellRole {
    Weekday,
    Weekend,
}

impl CellRole {
    /// Columns 5 and 6 (Saturday and Sunday in a Monday-first week) are
    /// weekends
    pub fn for_column(day_index: usize) -> CellRole {
        if day_index % DAYS_IN_WEEK >= 5 {
            CellRole::Weekend
        } else {
            CellRole::Weekday
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TagAction {
    Add,
    Remove,
}

/// Presentation state of one grid position
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    // Both `None` for suppressed placeholders, which cannot be addressed
    id: Option<CellId>,
    role: Option<CellRole>,
    tags: BTreeSet<String>,
}

impl Cell {
    pub fn id(&self) -> Option<CellId> {
        self.id
    }

    pub fn role(&self) -> Option<CellRole> {
        self.role
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    fn apply(&mut self, tag: &str, action: TagAction) {
        match action {
            TagAction::Add => {
                self.tags.insert(tag.to_owned());
            }
            TagAction::Remove => {
                self.tags.remove(tag);
            }
        }
    }
}

/// Operations for restyling day cells after a calendar has been built
pub trait CellTagger {
    /// Adds or removes `tag` on every addressable cell in a column of the
    /// given role
    fn tag_cells_by_role(&mut self, role: CellRole, tag: &str, action: TagAction);

    /// Adds `tag` to every addressable cell showing one of `dates`.  Dates
    /// without such a cell are ignored.
    fn tag_cells_by_dates(&mut self, dates: &[Date], tag: &str);
}

/// Tag sets of the cells of one month grid, in grid order
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellRegistry {
    cells: Vec<Cell>,
}

impl CellRegistry {
    /// Creates the cells for `grid`, each tagged with its classification
    /// relative to `today`
    pub fn for_grid(grid: &MonthGrid, today: Date) -> CellRegistry {
        let cells = grid
            .days()
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let tags = grid
                    .classify_at(i, today)
                    .unwrap_or_default()
                    .tag_names()
                    .into_iter()
                    .map(String::from)
                    .collect();
                if grid.is_suppressed(day) {
                    Cell {
                        id: None,
                        role: None,
                        tags,
                    }
                } else {
                    Cell {
                        id: Some(CellId::from(day.date())),
                        role: Some(CellRole::for_column(i)),
                        tags,
                    }
                }
            })
            .collect();
        CellRegistry { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn find(&self, id: CellId) -> Option<&Cell> {
        self.cells.iter().find(|c| c.id == Some(id))
    }
}

impl CellTagger for CellRegistry {
    fn tag_cells_by_role(&mut self, role: CellRole, tag: &str, action: TagAction) {
        let mut qty = 0usize;
        for cell in self.cells.iter_mut().filter(|c| c.role == Some(role)) {
            cell.apply(tag, action);
            qty += 1;
        }
        tracing::trace!(?role, tag, ?action, cells = qty, "Tagged cells by role");
    }

    fn tag_cells_by_dates(&mut self, dates: &[Date], tag: &str) {
        let mut qty = 0usize;
        for &date in dates {
            let id = CellId::from(date);
            for cell in self.cells.iter_mut().filter(|c| c.id == Some(id)) {
                cell.apply(tag, TagAction::Add);
                qty += 1;
            }
        }
        tracing::trace!(tag, dates = dates.len(), cells = qty, "Tagged cells by date");
    }
}

/// A built month grid together with the presentation state of its cells
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthCalendar {
    grid: MonthGrid,
    cells: CellRegistry,
}

impl MonthCalendar {
    pub fn new<L: Localizer + ?Sized>(
        request: &MonthGridRequest,
        localizer: &L,
        today: Date,
    ) -> Result<MonthCalendar, GridError> {
        let grid = MonthGrid::build(request, localizer)?;
        Ok(MonthCalendar::from_grid(grid, today))
    }

    pub fn from_grid(grid: MonthGrid, today: Date) -> MonthCalendar {
        let cells = CellRegistry::for_grid(&grid, today);
        MonthCalendar { grid, cells }
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn cells(&self) -> &CellRegistry {
        &self.cells
    }
}

impl CellTagger for MonthCalendar {
    fn tag_cells_by_role(&mut self, role: CellRole, tag: &str, action: TagAction) {
        self.cells.tag_cells_by_role(role, tag, action);
    }

    fn tag_cells_by_dates(&mut self, dates: &[Date], tag: &str) {
        self.cells.tag_cells_by_dates(dates, tag);
    }
}
