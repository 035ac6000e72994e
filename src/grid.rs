use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data::{CourseEntry, DAYS_PER_WEEK, Day, PERIODS_PER_DAY};
use crate::error::TimetableError;

pub type Cell = Option<Arc<CourseEntry>>;

/// Weekly timetable: five days of six periods. Every cell always exists and
/// is either empty or shares one entry from the pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "GridRepr", into = "GridRepr")]
pub struct ScheduleGrid {
    cells: [[Cell; PERIODS_PER_DAY]; DAYS_PER_WEEK],
}

// day name -> cells in period order
type GridRepr = BTreeMap<Day, Vec<Option<CourseEntry>>>;

impl ScheduleGrid {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fills cells in row-major order: every period of Monday, then Tuesday, ...
    /// Cells past the end of `entries` stay empty.
    pub fn from_row_major<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Arc<CourseEntry>>,
    {
        let mut grid = Self::empty();
        let mut entries = entries.into_iter();
        for cell in grid.cells.iter_mut().flatten() {
            *cell = entries.next();
        }
        grid
    }

    /// `period` is 1-based. Out-of-range periods read as empty.
    pub fn get(&self, day: Day, period: usize) -> Option<&Arc<CourseEntry>> {
        period
            .checked_sub(1)
            .and_then(|p| self.cells[day.index()].get(p))
            .and_then(Option::as_ref)
    }

    /// Replaces one cell and returns what it held. `period` is 1-based.
    pub fn set(&mut self, day: Day, period: usize, cell: Cell) -> Result<Cell, TimetableError> {
        let slot = period
            .checked_sub(1)
            .and_then(|p| self.cells[day.index()].get_mut(p))
            .ok_or_else(|| {
                TimetableError::Validation(format!(
                    "period {period} is outside 1..={PERIODS_PER_DAY}"
                ))
            })?;
        Ok(std::mem::replace(slot, cell))
    }

    pub fn day(&self, day: Day) -> &[Cell; PERIODS_PER_DAY] {
        &self.cells[day.index()]
    }

    pub fn filled_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_cells() == 0
    }

    /// Iterates `(day, period, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, usize, &Cell)> {
        Day::ALL.into_iter().flat_map(move |day| {
            self.cells[day.index()]
                .iter()
                .enumerate()
                .map(move |(p, cell)| (day, p + 1, cell))
        })
    }
}

impl From<ScheduleGrid> for GridRepr {
    fn from(grid: ScheduleGrid) -> Self {
        Day::ALL
            .into_iter()
            .map(|day| {
                let cells = grid.cells[day.index()]
                    .iter()
                    .map(|c| c.as_deref().cloned())
                    .collect();
                (day, cells)
            })
            .collect()
    }
}

impl TryFrom<GridRepr> for ScheduleGrid {
    type Error = String;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let mut grid = ScheduleGrid::empty();
        for (day, cells) in repr {
            if cells.len() > PERIODS_PER_DAY {
                return Err(format!(
                    "{day} has {} periods, at most {PERIODS_PER_DAY} allowed",
                    cells.len()
                ));
            }
            for (slot, cell) in grid.cells[day.index()].iter_mut().zip(cells) {
                *slot = cell.map(Arc::new);
            }
        }
        Ok(grid)
    }
}
