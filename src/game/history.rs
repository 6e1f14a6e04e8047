//! Recent-Rounds History
//!
//! Bounded record of past crash points, newest first. The engine only ever
//! appends; the presentation layer reads it to color-code recent outcomes,
//! so entries keep their full 2-decimal resolution.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::fixed::Fixed;

/// Fixed-capacity log of past crash points, newest at index 0.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: VecDeque<Fixed>,
    capacity: usize,
}

impl HistoryLog {
    /// Create an empty log with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend a crash point, evicting the oldest entry beyond capacity.
    pub fn record(&mut self, crash_point: Fixed) {
        self.entries.push_front(crash_point);
        self.entries.truncate(self.capacity);
    }

    /// Newest entry, if any.
    pub fn latest(&self) -> Option<Fixed> {
        self.entries.front().copied()
    }

    /// Entry at `index` (0 = newest).
    pub fn get(&self, index: usize) -> Option<Fixed> {
        self.entries.get(index).copied()
    }

    /// Iterate newest-first.
    pub fn iter(&self) -> impl Iterator<Item = Fixed> + '_ {
        self.entries.iter().copied()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot as a plain vector, newest-first.
    pub fn to_vec(&self) -> Vec<Fixed> {
        self.entries.iter().copied().collect()
    }
}
