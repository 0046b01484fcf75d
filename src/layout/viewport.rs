//! Viewport state and visible-window computation.
//!
//! The virtualizer is stateless beyond the measurement cache: the visible
//! window is a pure function of the current layout and scroll/size inputs,
//! recomputed on every scroll or resize event.
//!
//! Scroll coordinates follow the frozen-pane convention: the minimum scroll
//! position sits at the frozen boundary (just past the header row / index
//! column), so the frozen panes never scroll out from under the body.

use std::ops::RangeInclusive;

use crate::layout::grid::GridLayout;
use crate::table::{CellAddress, TableShape};

/// Extra rows rendered above and below the visible range.
pub const OVERSCAN_ROWS: u32 = 10;

/// Extra columns rendered left and right of the visible range.
pub const OVERSCAN_COLUMNS: u32 = 2;

/// Preferred frame width reported to the window chrome (logical px).
pub const PREFERRED_WIDTH: f32 = 434.0;

/// Preferred frame height reported to the window chrome (logical px).
pub const PREFERRED_HEIGHT: f32 = 224.0;

/// Viewport state - the visible area of the table.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Horizontal scroll position in table coordinates.
    pub scroll_x: f32,
    /// Vertical scroll position in table coordinates.
    pub scroll_y: f32,
    /// Viewport width in logical pixels.
    pub width: f32,
    /// Viewport height in logical pixels.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Viewport at the chrome-reported preferred size, unscrolled.
    pub fn new() -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: PREFERRED_WIDTH,
            height: PREFERRED_HEIGHT,
        }
    }

    /// Which body cells must be materialized this pass.
    ///
    /// Accumulated row heights (the layout's prefix sums) locate the first
    /// and last visible body row/column; the range is then widened by the
    /// overscan margins and clamped to the table, never yielding negative
    /// or out-of-bounds indices. The header row and index column are not
    /// part of the window - they render unconditionally.
    pub fn compute_visible(&self, layout: &GridLayout) -> ViewportWindow {
        if layout.shape.row_count <= 1 || layout.shape.column_count <= 1 {
            // No data sequences: only the corner (and header/index) render.
            return ViewportWindow::empty();
        }

        let header_h = layout.header_height();
        let index_w = layout.index_width();
        let body_h = (self.height - header_h).max(0.0);
        let body_w = (self.width - index_w).max(0.0);
        let max_row = layout.max_row();
        let max_col = layout.max_col();

        // Scroll can be transiently below the frozen boundary (fresh
        // viewport, shrunk table); treat it as the boundary.
        let scroll_y = self.scroll_y.max(header_h);
        let scroll_x = self.scroll_x.max(index_w);

        let first_row = layout.row_at_y(scroll_y).unwrap_or(max_row);
        let last_row = layout.row_at_y(scroll_y + body_h).unwrap_or(max_row);
        let first_col = layout.col_at_x(scroll_x).unwrap_or(max_col);
        let last_col = layout.col_at_x(scroll_x + body_w).unwrap_or(max_col);

        ViewportWindow {
            row_start: first_row.saturating_sub(OVERSCAN_ROWS).max(1),
            row_end: last_row.saturating_add(OVERSCAN_ROWS).min(max_row),
            col_start: first_col.saturating_sub(OVERSCAN_COLUMNS).max(1),
            col_end: last_col.saturating_add(OVERSCAN_COLUMNS).min(max_col),
        }
    }

    /// Map body-cell table coordinates to screen coordinates.
    ///
    /// Body cells sit past the frozen panes and move with both scroll
    /// offsets. The header row shares the x component (horizontal sync),
    /// the index column shares the y component (vertical sync).
    pub fn body_to_screen(&self, x: f32, y: f32, layout: &GridLayout) -> (f32, f32) {
        (
            layout.index_width() + (x - self.scroll_x),
            layout.header_height() + (y - self.scroll_y),
        )
    }

    /// Clamp scroll to the valid range for `layout`.
    ///
    /// Minimum is the frozen boundary; maximum leaves the last content edge
    /// at the viewport edge (or the minimum when content fits).
    pub fn clamp_scroll(&mut self, layout: &GridLayout) {
        let frozen_w = layout.index_width();
        let frozen_h = layout.header_height();

        let scrollable_w = layout.total_width() - frozen_w;
        let scrollable_h = layout.total_height() - frozen_h;
        let body_w = self.width - frozen_w;
        let body_h = self.height - frozen_h;

        let max_x = frozen_w + (scrollable_w - body_w).max(0.0);
        let max_y = frozen_h + (scrollable_h - body_h).max(0.0);

        self.scroll_x = self.scroll_x.clamp(frozen_w, max_x);
        self.scroll_y = self.scroll_y.clamp(frozen_h, max_y);
    }

    /// Scroll by delta amounts, clamped.
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32, layout: &GridLayout) {
        self.scroll_x += delta_x;
        self.scroll_y += delta_y;
        self.clamp_scroll(layout);
    }

    /// Set absolute scroll position, clamped.
    pub fn set_scroll(&mut self, x: f32, y: f32, layout: &GridLayout) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll(layout);
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

/// Inclusive body row/column ranges scheduled for rendering.
///
/// An empty body (1x1 table) is represented by inverted ranges, which
/// iterate as empty. Header-row and index-column cells are always rendered
/// regardless of the window; [`contains`](Self::contains) reflects that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportWindow {
    pub row_start: u32,
    pub row_end: u32,
    pub col_start: u32,
    pub col_end: u32,
}

impl ViewportWindow {
    /// Window with no body cells.
    pub fn empty() -> Self {
        Self {
            row_start: 1,
            row_end: 0,
            col_start: 1,
            col_end: 0,
        }
    }

    /// Whether any body cells are scheduled.
    pub fn has_body(&self) -> bool {
        self.row_start <= self.row_end && self.col_start <= self.col_end
    }

    /// Scheduled body rows.
    pub fn rows(&self) -> RangeInclusive<u32> {
        self.row_start..=self.row_end
    }

    /// Scheduled body columns.
    pub fn cols(&self) -> RangeInclusive<u32> {
        self.col_start..=self.col_end
    }

    /// Whether `addr` renders this pass: any in-shape header/index cell
    /// (always pinned), or a body cell inside the window.
    pub fn contains(&self, addr: CellAddress, shape: TableShape) -> bool {
        if addr.row >= shape.row_count || addr.column >= shape.column_count {
            return false;
        }
        if addr.row == 0 || addr.column == 0 {
            return true;
        }
        self.rows().contains(&addr.row) && self.cols().contains(&addr.column)
    }
}
