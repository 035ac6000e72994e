use log::debug;
use serde::Serialize;
use std::sync::Arc;

use crate::data::CourseEntry;

/// Ordered collection of course entries used as generation material.
///
/// Insertion order matters: the generator cycles through entries in this
/// order before shuffling. Entries with identical content are kept as
/// separate items.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EntryPool {
    entries: Vec<Arc<CourseEntry>>,
}

impl EntryPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an already validated entry and returns the shared handle.
    pub fn add(&mut self, entry: CourseEntry) -> Arc<CourseEntry> {
        let entry = Arc::new(entry);
        debug!("Adding entry {} to pool (size {})", entry.id, self.entries.len() + 1);
        self.entries.push(Arc::clone(&entry));
        entry
    }

    /// Removes every entry with the given identity key, returning how many went.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before - self.entries.len()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Arc<CourseEntry>] {
        &self.entries
    }
}

impl FromIterator<CourseEntry> for EntryPool {
    fn from_iter<T: IntoIterator<Item = CourseEntry>>(iter: T) -> Self {
        EntryPool {
            entries: iter.into_iter().map(Arc::new).collect(),
        }
    }
}
