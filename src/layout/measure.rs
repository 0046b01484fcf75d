//! Deferred cell measurement cache.
//!
//! Column width is uniform and known up front, but row height depends on
//! rendered content (text wrapping), so the table cannot be laid out
//! synchronously in one pass. Cells are measured once as they scroll into
//! view and the result is cached here; already-seen rows never pay the
//! measurement cost again. The cache is invalidated wholesale whenever the
//! reconciled column set changes, since row/column semantics are
//! index-based and a shifted header makes every cached entry stale.

use std::collections::HashMap;

use crate::table::CellAddress;

/// Uniform column width in logical pixels.
pub const DEFAULT_COLUMN_WIDTH: f32 = 100.0;

/// Row height assumed until a row's cells are first measured.
pub const DEFAULT_ROW_HEIGHT: f32 = 20.0;

/// Measured cell extent in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Per-axis measurement policy.
///
/// An axis marked fixed always reports its default and ignores
/// measurements along that axis; the other axis grows with the largest
/// measurement seen. The table uses fixed width / variable height.
#[derive(Debug, Clone, Copy)]
pub struct MeasureConfig {
    pub default_width: f32,
    pub default_height: f32,
    pub fixed_width: bool,
    pub fixed_height: bool,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_COLUMN_WIDTH,
            default_height: DEFAULT_ROW_HEIGHT,
            fixed_width: true,
            fixed_height: false,
        }
    }
}

/// Cache of per-cell measurements with derived row/column extents.
///
/// Owned by a single table-view instance on the UI thread; never shared.
#[derive(Debug, Default)]
pub struct MeasureCache {
    config: MeasureConfig,
    cells: HashMap<CellAddress, Size>,
    // Running maxima, kept in step with `cells` on every insert.
    row_heights: HashMap<u32, f32>,
    column_widths: HashMap<u32, f32>,
}

impl MeasureCache {
    pub fn new(config: MeasureConfig) -> Self {
        Self {
            config,
            cells: HashMap::new(),
            row_heights: HashMap::new(),
            column_widths: HashMap::new(),
        }
    }

    pub fn config(&self) -> MeasureConfig {
        self.config
    }

    /// Measured size for a cell, if it has been measured this generation.
    pub fn get(&self, addr: CellAddress) -> Option<Size> {
        self.cells.get(&addr).copied()
    }

    /// Whether a cell has a measurement.
    pub fn has(&self, addr: CellAddress) -> bool {
        self.cells.contains_key(&addr)
    }

    /// Record a measurement and fold it into the row/column maxima.
    pub fn set(&mut self, addr: CellAddress, size: Size) {
        self.cells.insert(addr, size);
        if !self.config.fixed_height {
            let row_max = self.row_heights.entry(addr.row).or_insert(size.height);
            *row_max = row_max.max(size.height);
        }
        if !self.config.fixed_width {
            let col_max = self
                .column_widths
                .entry(addr.column)
                .or_insert(size.width);
            *col_max = col_max.max(size.width);
        }
    }

    /// Effective height of a row: the tallest measured cell in it, or the
    /// default before any measurement (always the default on a fixed axis).
    pub fn row_height(&self, row: u32) -> f32 {
        if self.config.fixed_height {
            return self.config.default_height;
        }
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(self.config.default_height)
    }

    /// Effective width of a column, symmetric to [`row_height`](Self::row_height).
    pub fn column_width(&self, column: u32) -> f32 {
        if self.config.fixed_width {
            return self.config.default_width;
        }
        self.column_widths
            .get(&column)
            .copied()
            .unwrap_or(self.config.default_width)
    }

    /// Whether every body cell of `row` across `column_count` columns has
    /// been measured (column 0 is the index column and is never measured).
    pub fn row_measured(&self, row: u32, column_count: u32) -> bool {
        (1..column_count).all(|c| self.has(CellAddress::new(row, c)))
    }

    /// Drop every measurement. Applied atomically: there is no state in
    /// which some addresses read stale sizes and others read defaults.
    pub fn invalidate_all(&mut self) {
        self.cells.clear();
        self.row_heights.clear();
        self.column_widths.clear();
    }

    /// Number of measured cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
