//! Layout engine for the reconciled table.
//!
//! This module handles:
//! - Caching deferred per-cell measurements (variable row heights)
//! - Pre-computing cell edge positions from cached extents
//! - Managing viewport state (scroll position, visible window)
//! - Binary search for efficient row/column lookup at offsets

mod grid;
mod measure;
mod viewport;

pub use grid::GridLayout;
pub use measure::{
    MeasureCache, MeasureConfig, Size, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT,
};
pub use viewport::{
    Viewport, ViewportWindow, OVERSCAN_COLUMNS, OVERSCAN_ROWS, PREFERRED_HEIGHT, PREFERRED_WIDTH,
};
