use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

use crate::checker;
use crate::data::{CourseEntry, NewEntry, ViolationReport};
use crate::error::TimetableError;
use crate::generator;
use crate::grid::ScheduleGrid;
use crate::pool::EntryPool;

/// State owned by one planning session: the entry pool, the current grid,
/// the report for that grid, and the random source used for generation.
///
/// The grid and report are always replaced together, never edited in place.
#[derive(Debug)]
pub struct Planner {
    pool: EntryPool,
    grid: ScheduleGrid,
    violations: ViolationReport,
    rng: StdRng,
}

impl Planner {
    pub fn new(rng: StdRng) -> Self {
        Planner {
            pool: EntryPool::new(),
            grid: ScheduleGrid::empty(),
            violations: ViolationReport::default(),
            rng,
        }
    }

    /// Seeded from the given value, or from the OS when `None`.
    pub fn with_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(rng)
    }

    pub fn add_entry(&mut self, input: NewEntry) -> Result<Arc<CourseEntry>, TimetableError> {
        let entry = CourseEntry::try_from(input)?;
        Ok(self.pool.add(entry))
    }

    pub fn remove_entry(&mut self, id: &str) -> usize {
        self.pool.remove(id)
    }

    /// Generates a new grid from the pool and re-checks it. On failure the
    /// previous grid and report are left untouched.
    pub fn generate(&mut self) -> Result<(&ScheduleGrid, &ViolationReport), TimetableError> {
        let grid = generator::generate(&self.pool, &mut self.rng)?;
        self.violations = checker::check(&grid);
        self.grid = grid;
        info!(
            "Generated timetable from {} entries with {} violations",
            self.pool.len(),
            self.violations.len()
        );
        Ok((&self.grid, &self.violations))
    }

    /// Clears the pool, the grid and the report.
    pub fn reset(&mut self) {
        self.pool.reset();
        self.grid = ScheduleGrid::empty();
        self.violations = ViolationReport::default();
    }

    pub fn pool(&self) -> &EntryPool {
        &self.pool
    }

    pub fn grid(&self) -> &ScheduleGrid {
        &self.grid
    }

    pub fn violations(&self) -> &ViolationReport {
        &self.violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EntryType;

    fn new_entry(subject: &str, entry_type: EntryType) -> NewEntry {
        NewEntry {
            subject: subject.to_string(),
            handler: "Rao".to_string(),
            room: "A1".to_string(),
            entry_type,
        }
    }

    #[test]
    fn test_blank_entry_leaves_pool_unchanged() {
        let mut planner = Planner::with_seed(Some(1));
        let err = planner.add_entry(new_entry("  ", EntryType::Academic)).unwrap_err();
        assert!(matches!(err, TimetableError::Validation(_)));
        assert!(planner.pool().is_empty());
    }

    #[test]
    fn test_generate_on_empty_pool_keeps_previous_grid() {
        let mut planner = Planner::with_seed(Some(1));
        assert_eq!(planner.generate().unwrap_err(), TimetableError::EmptyPool);
        assert!(planner.grid().is_empty());
        assert!(planner.violations().is_empty());
    }

    #[test]
    fn test_generate_replaces_grid_and_report() {
        let mut planner = Planner::with_seed(Some(5));
        planner.add_entry(new_entry("Math", EntryType::Academic)).unwrap();

        let (grid, violations) = planner.generate().unwrap();
        assert_eq!(grid.filled_cells(), 30);
        // all-academic week: two run messages and one wellness message per day
        assert_eq!(violations.len(), 15);
    }

    #[test]
    fn test_seeded_planners_agree() {
        let mut a = Planner::with_seed(Some(11));
        let mut b = Planner::with_seed(Some(11));
        for planner in [&mut a, &mut b] {
            planner.add_entry(new_entry("Math", EntryType::Academic)).unwrap();
            planner.add_entry(new_entry("Yoga", EntryType::Wellness)).unwrap();
            planner.add_entry(new_entry("Music", EntryType::Elective)).unwrap();
            planner.generate().unwrap();
        }
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.violations(), b.violations());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut planner = Planner::with_seed(Some(2));
        planner.add_entry(new_entry("Math", EntryType::Academic)).unwrap();
        planner.generate().unwrap();

        planner.reset();
        assert!(planner.pool().is_empty());
        assert!(planner.grid().is_empty());
        assert!(planner.violations().is_empty());
    }
}
