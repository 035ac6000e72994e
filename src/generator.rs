use log::{info, trace};
use rand::Rng;
use std::sync::Arc;

use crate::data::{CourseEntry, TOTAL_SLOTS};
use crate::error::TimetableError;
use crate::grid::ScheduleGrid;
use crate::pool::EntryPool;

/// Fills every cell of a fresh grid from the pool.
///
/// The pool is repeated round-robin until there is one candidate per slot,
/// the candidates are shuffled with an unbiased Fisher-Yates pass driven by
/// `rng`, and the result is laid out row-major (Monday periods 1..6 first).
/// Each entry therefore lands `floor(30/n)` or `ceil(30/n)` times.
pub fn generate<R: Rng>(
    pool: &EntryPool,
    rng: &mut R,
) -> Result<ScheduleGrid, TimetableError> {
    if pool.is_empty() {
        return Err(TimetableError::EmptyPool);
    }
    info!(
        "Generating timetable with {} entries across {} slots...",
        pool.len(),
        TOTAL_SLOTS
    );

    let mut candidates = round_robin(pool.entries(), TOTAL_SLOTS);
    shuffle(&mut candidates, rng);
    trace!(
        "Shuffled order: {:?}",
        candidates.iter().map(|e| e.id.as_str()).collect::<Vec<_>>()
    );

    Ok(ScheduleGrid::from_row_major(candidates))
}

/// `candidate[i] = entries[i mod n]` for `i < len`.
fn round_robin(entries: &[Arc<CourseEntry>], len: usize) -> Vec<Arc<CourseEntry>> {
    entries.iter().cycle().take(len).cloned().collect()
}

fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for j in (1..items.len()).rev() {
        let k = rng.random_range(0..=j);
        items.swap(j, k);
    }
}
