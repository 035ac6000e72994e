//! Weekly timetable generation and curriculum-balance compliance checks.
//!
//! Entries declared by the user go into an [`EntryPool`]; [`generator::generate`]
//! fills a 5 x 6 [`ScheduleGrid`] from it and [`checker::check`] reports rule
//! breaches. Uploaded tables are scored independently by [`scorer::score`].

pub mod checker;
pub mod config;
pub mod data;
pub mod error;
pub mod generator;
pub mod grid;
pub mod pool;
pub mod scorer;
pub mod server;
pub mod session;

pub use data::{
    ComplianceAssessment, ComplianceBand, CourseEntry, Day, EntryType, TimetableRow,
    ViolationReport,
};
pub use error::TimetableError;
pub use grid::ScheduleGrid;
pub use pool::EntryPool;
pub use session::Planner;
