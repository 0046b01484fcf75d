//! Pre-computed layout data for the reconciled table.
//!
//! Rebuilt from the measurement cache on each render pass, enabling
//! O(log n) position lookups while the pass runs. Row 0 and column 0 are
//! always frozen (header row and index column).

use crate::layout::measure::MeasureCache;
use crate::table::TableShape;

/// Cumulative edge positions for the current table shape.
#[derive(Debug, Clone)]
pub struct GridLayout {
    /// `col_positions[i]` = x of column i's left edge, plus a final edge.
    pub col_positions: Vec<f32>,
    /// `row_positions[i]` = y of row i's top edge, plus a final edge.
    pub row_positions: Vec<f32>,
    /// Shape the layout was built for.
    pub shape: TableShape,
}

impl GridLayout {
    /// Build the layout for `shape` from cached (or default) extents.
    pub fn new(shape: TableShape, cache: &MeasureCache) -> Self {
        let mut col_positions = Vec::with_capacity(shape.column_count as usize + 1);
        let mut x: f32 = 0.0;
        for col in 0..shape.column_count {
            col_positions.push(x);
            x += cache.column_width(col);
        }
        col_positions.push(x); // final edge

        let mut row_positions = Vec::with_capacity(shape.row_count as usize + 1);
        let mut y: f32 = 0.0;
        for row in 0..shape.row_count {
            row_positions.push(y);
            y += cache.row_height(row);
        }
        row_positions.push(y); // final edge

        Self {
            col_positions,
            row_positions,
            shape,
        }
    }

    /// Find the row containing y (binary search over edge positions).
    pub fn row_at_y(&self, y: f32) -> Option<u32> {
        position_at(&self.row_positions, y)
    }

    /// Find the column containing x.
    pub fn col_at_x(&self, x: f32) -> Option<u32> {
        position_at(&self.col_positions, x)
    }

    /// Top edge of a row.
    pub fn row_y(&self, row: u32) -> f32 {
        self.row_positions.get(row as usize).copied().unwrap_or(0.0)
    }

    /// Left edge of a column.
    pub fn col_x(&self, col: u32) -> f32 {
        self.col_positions.get(col as usize).copied().unwrap_or(0.0)
    }

    /// Height of a row as laid out.
    pub fn row_height(&self, row: u32) -> f32 {
        self.row_y(row.saturating_add(1)) - self.row_y(row)
    }

    /// Width of a column as laid out.
    pub fn col_width(&self, col: u32) -> f32 {
        self.col_x(col.saturating_add(1)) - self.col_x(col)
    }

    /// Total laid-out width.
    pub fn total_width(&self) -> f32 {
        self.col_positions.last().copied().unwrap_or(0.0)
    }

    /// Total laid-out height.
    pub fn total_height(&self) -> f32 {
        self.row_positions.last().copied().unwrap_or(0.0)
    }

    /// Height of the frozen header row.
    pub fn header_height(&self) -> f32 {
        self.row_positions.get(1).copied().unwrap_or(0.0)
    }

    /// Width of the frozen index column.
    pub fn index_width(&self) -> f32 {
        self.col_positions.get(1).copied().unwrap_or(0.0)
    }

    /// Index of the last row (the shape guarantees at least one).
    pub fn max_row(&self) -> u32 {
        self.shape.row_count.saturating_sub(1)
    }

    /// Index of the last column.
    pub fn max_col(&self) -> u32 {
        self.shape.column_count.saturating_sub(1)
    }
}

fn position_at(positions: &[f32], offset: f32) -> Option<u32> {
    if positions.is_empty() {
        return None;
    }
    match positions
        .binary_search_by(|pos| pos.partial_cmp(&offset).unwrap_or(std::cmp::Ordering::Equal))
    {
        Ok(i) => u32::try_from(i).ok(),
        Err(i) => u32::try_from(i.saturating_sub(1)).ok(),
    }
}
