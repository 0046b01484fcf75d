//! Table reconciliation: aligning sequences of differing lengths under one
//! rectangular row/column index space.
//!
//! Row 0 is the header row, column 0 the index column. A [`TableView`] is
//! built fresh on every refresh tick; resolution is lazy, so only cells the
//! virtualizer schedules are ever materialized.

use crate::source::{CellValue, SequenceSet, StageSource};

/// Reconciled table dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableShape {
    /// Data rows plus the header row. Always >= 1.
    pub row_count: u32,
    /// Sequences plus the index column. Always >= 1.
    pub column_count: u32,
}

/// Zero-based cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub row: u32,
    pub column: u32,
}

impl CellAddress {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// Result of resolving a cell address.
///
/// Every consumer must handle all cases; there is no untyped fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Top-left cell. Text comes from the chrome's localized index label.
    Corner,
    /// Header cell carrying a sequence's display name.
    ColumnHeader(String),
    /// 1-based row number in the index column.
    RowIndex(u32),
    /// An element of a sequence.
    Value(CellValue),
    /// The sequence is shorter than this row.
    Missing,
    /// Out-of-bounds address, or the sequence vanished mid-tick.
    Unresolved,
}

/// One tick's reconciled view over a [`StageSource`].
///
/// Pure with respect to its inputs: resolving the same address twice with
/// no intervening host mutation yields identical results.
pub struct TableView<'a, S: StageSource> {
    source: &'a S,
    set: SequenceSet,
    shape: TableShape,
}

impl<'a, S: StageSource> TableView<'a, S> {
    /// Discover the visible sequences and compute the table shape.
    pub fn new(source: &'a S) -> Self {
        let set = SequenceSet::discover(source);
        let shape = compute_shape(&set, source);
        Self { source, set, shape }
    }

    pub fn shape(&self) -> TableShape {
        self.shape
    }

    pub fn sequences(&self) -> &SequenceSet {
        &self.set
    }

    /// Resolve a cell address to its content.
    ///
    /// Runs inside the render loop, so it never panics: addresses outside
    /// the current shape and sequences that vanished since discovery both
    /// come back as [`CellContent::Unresolved`].
    pub fn resolve(&self, addr: CellAddress) -> CellContent {
        if addr.row >= self.shape.row_count || addr.column >= self.shape.column_count {
            return CellContent::Unresolved;
        }
        match (addr.row, addr.column) {
            (0, 0) => CellContent::Corner,
            (0, c) => match self.set.get(c as usize - 1) {
                Some(seq) => CellContent::ColumnHeader(seq.name.clone()),
                None => CellContent::Unresolved,
            },
            (r, 0) => CellContent::RowIndex(r),
            (r, c) => {
                let Some(seq) = self.set.get(c as usize - 1) else {
                    return CellContent::Unresolved;
                };
                match self.source.values(&seq.id) {
                    // Vanished between discovery and resolution.
                    None => CellContent::Unresolved,
                    Some(values) => match values.get(r as usize - 1) {
                        Some(v) => CellContent::Value(v.clone()),
                        None => CellContent::Missing,
                    },
                }
            }
        }
    }
}

/// Derive the table shape from a sequence set.
///
/// `column_count = |set| + 1` (index column), `row_count = max_len + 1`
/// (header row); both stay 1 for an empty set so the corner cell always
/// exists.
pub fn compute_shape(set: &SequenceSet, source: &impl StageSource) -> TableShape {
    let data_rows = u32::try_from(set.max_len(source)).unwrap_or(u32::MAX);
    let data_cols = u32::try_from(set.len()).unwrap_or(u32::MAX);
    TableShape {
        row_count: data_rows.saturating_add(1),
        column_count: data_cols.saturating_add(1),
    }
}
