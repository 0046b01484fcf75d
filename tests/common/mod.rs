//! Shared fixtures for integration tests.

#![allow(dead_code)] // each test binary uses a subset of these helpers

use std::cell::Cell;

use listview::{CellValue, SequenceRef, SnapshotSource, StageSnapshot, StageSource};

/// Snapshot source from `(id, name, values)` triples.
pub fn stage<const N: usize>(entries: [(&str, &str, Vec<CellValue>); N]) -> SnapshotSource {
    SnapshotSource::new(StageSnapshot::from_entries(entries))
}

/// Numeric list values.
pub fn nums(values: &[f64]) -> Vec<CellValue> {
    values.iter().copied().map(CellValue::from).collect()
}

/// String list values.
pub fn texts(values: &[&str]) -> Vec<CellValue> {
    values.iter().copied().map(CellValue::from).collect()
}

/// A source where one sequence can be made to vanish after discovery,
/// reproducing the "vanished between discovery and resolution" race.
pub struct VanishingSource {
    pub inner: SnapshotSource,
    pub vanished_id: String,
    pub hidden: Cell<bool>,
}

impl VanishingSource {
    pub fn new(inner: SnapshotSource, vanished_id: &str) -> Self {
        Self {
            inner,
            vanished_id: vanished_id.to_string(),
            hidden: Cell::new(false),
        }
    }
}

impl StageSource for VanishingSource {
    fn list_variables(&self) -> Option<Vec<SequenceRef>> {
        self.inner.list_variables()
    }

    fn values(&self, id: &str) -> Option<&[CellValue]> {
        if self.hidden.get() && id == self.vanished_id {
            return None;
        }
        self.inner.values(id)
    }
}
