use log::debug;

use crate::data::{Day, ViolationReport};
use crate::grid::ScheduleGrid;

/// Longest allowed unbroken run of academic periods in a day.
pub const MAX_CONSECUTIVE_ACADEMIC: usize = 4;

/// Walks the grid day by day and reports every rule breach.
///
/// Per day, empty cells are skipped without touching the run. Each academic
/// period that extends a run beyond the limit adds one message, so a run of
/// six yields two. A day with no wellness or elective period, including an
/// entirely empty day, gets one closing message after its run messages.
pub fn check(grid: &ScheduleGrid) -> ViolationReport {
    let mut report = ViolationReport::default();

    for day in Day::ALL {
        check_day(grid, day, &mut report);
    }

    debug!("Compliance check found {} violations", report.len());
    report
}

fn check_day(grid: &ScheduleGrid, day: Day, report: &mut ViolationReport) {
    let mut consecutive_academic = 0;
    let mut saw_non_academic = false;

    for entry in grid.day(day).iter().flatten() {
        if entry.entry_type.is_academic() {
            consecutive_academic += 1;
            if consecutive_academic > MAX_CONSECUTIVE_ACADEMIC {
                report.push(format!("More than 4 academic classes in a row on {day}"));
            }
        } else {
            consecutive_academic = 0;
            saw_non_academic = true;
        }
    }

    if !saw_non_academic {
        report.push(format!("No wellness / co-curricular session on {day}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CourseEntry, EntryType};
    use std::sync::Arc;

    fn academic() -> Arc<CourseEntry> {
        Arc::new(CourseEntry::new("Math", "Rao", "A1", EntryType::Academic).unwrap())
    }

    fn wellness() -> Arc<CourseEntry> {
        Arc::new(CourseEntry::new("Yoga", "Iyer", "Hall", EntryType::Wellness).unwrap())
    }

    fn elective() -> Arc<CourseEntry> {
        Arc::new(CourseEntry::new("Music", "Das", "Studio", EntryType::Elective).unwrap())
    }

    fn set_day(grid: &mut ScheduleGrid, day: Day, cells: [Option<Arc<CourseEntry>>; 6]) {
        for (p, cell) in cells.into_iter().enumerate() {
            grid.set(day, p + 1, cell).unwrap();
        }
    }

    /// Four academic periods then one wellness period: compliant on its own.
    fn balanced_week() -> ScheduleGrid {
        let mut grid = ScheduleGrid::empty();
        for day in Day::ALL {
            set_day(
                &mut grid,
                day,
                [
                    Some(academic()),
                    Some(academic()),
                    Some(academic()),
                    Some(academic()),
                    Some(wellness()),
                    Some(academic()),
                ],
            );
        }
        grid
    }

    #[test]
    fn test_compliant_week_has_no_violations() {
        assert!(check(&balanced_week()).is_empty());
    }

    #[test]
    fn test_six_academic_monday() {
        let mut grid = balanced_week();
        set_day(&mut grid, Day::Monday, std::array::from_fn(|_| Some(academic())));

        let report = check(&grid);
        assert_eq!(
            report.0,
            vec![
                "More than 4 academic classes in a row on Monday",
                "More than 4 academic classes in a row on Monday",
                "No wellness / co-curricular session on Monday",
            ]
        );
    }

    #[test]
    fn test_elective_resets_run() {
        let mut grid = balanced_week();
        set_day(
            &mut grid,
            Day::Tuesday,
            [
                Some(academic()),
                Some(academic()),
                Some(academic()),
                Some(elective()),
                Some(academic()),
                Some(academic()),
            ],
        );
        assert!(check(&grid).is_empty());
    }

    #[test]
    fn test_empty_cells_do_not_break_run() {
        let mut grid = balanced_week();
        set_day(
            &mut grid,
            Day::Wednesday,
            [
                Some(academic()),
                Some(academic()),
                None,
                Some(academic()),
                Some(academic()),
                Some(academic()),
            ],
        );
        assert_eq!(
            check(&grid).0,
            vec![
                "More than 4 academic classes in a row on Wednesday",
                "No wellness / co-curricular session on Wednesday",
            ]
        );
    }

    #[test]
    fn test_empty_grid_flags_every_day() {
        let report = check(&ScheduleGrid::empty());
        let expected: Vec<String> = Day::ALL
            .iter()
            .map(|d| format!("No wellness / co-curricular session on {d}"))
            .collect();
        assert_eq!(report.0, expected);
    }

    #[test]
    fn test_violations_follow_day_order() {
        let mut grid = balanced_week();
        set_day(&mut grid, Day::Thursday, std::array::from_fn(|_| Some(academic())));
        set_day(&mut grid, Day::Tuesday, std::array::from_fn(|_| None));

        let report = check(&grid);
        assert_eq!(report.len(), 4);
        assert!(report.0[0].ends_with("Tuesday"));
        assert!(report.iter().skip(1).all(|m| m.ends_with("Thursday")));
    }

    #[test]
    fn test_check_is_idempotent() {
        let mut grid = balanced_week();
        set_day(&mut grid, Day::Friday, std::array::from_fn(|_| Some(academic())));
        assert_eq!(check(&grid), check(&grid));
    }
}
