//! Canvas 2D rendering of the visible table window.
//!
//! Draw order matters for the frozen panes: body cells first (clipped to
//! the body region), then the pinned index column and header row (each
//! clipped to its own strip and synchronized with the body along the
//! non-fixed axis), the corner cell, and the frozen divider lines on top.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{ListviewError, Result};
use crate::layout::{GridLayout, Size, Viewport, ViewportWindow};
use crate::source::StageSource;
use crate::table::{CellAddress, CellContent, TableView};

const CELL_FONT: &str = "12px -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";
const HEADER_FONT: &str =
    "600 12px -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";
const LINE_HEIGHT: f64 = 16.0;
const CELL_PADDING: f64 = 4.0;

/// Table color palette.
mod colors {
    pub const BACKGROUND: &str = "#FFFFFF";
    pub const HEADER_BG: &str = "#F3F3F3";
    pub const GRID_LINE: &str = "#D8D8D8";
    pub const TEXT: &str = "#202124";
    pub const HEADER_TEXT: &str = "#5F6368";
    /// Frozen pane divider, same subtle gray as spreadsheet UIs.
    pub const FROZEN_DIVIDER: &str = "#BABABA";
}

/// Crisp pixel position for 1px lines.
fn crisp(x: f64) -> f64 {
    x.floor() + 0.5
}

/// Everything one render pass needs, borrowed for the duration of the pass.
pub struct RenderParams<'a, S: StageSource> {
    pub table: &'a TableView<'a, S>,
    pub layout: &'a GridLayout,
    pub viewport: &'a Viewport,
    pub window: &'a ViewportWindow,
    /// Chrome-localized text for the corner cell.
    pub corner_label: &'a str,
}

/// Canvas 2D renderer for the table viewer.
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
    dpr: f32,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let width = canvas.width();
        let height = canvas.height();

        Ok(Self {
            canvas,
            ctx,
            width,
            height,
            dpr: 1.0,
        })
    }

    /// Resize the backing store and rescale for the device pixel ratio.
    pub fn resize(&mut self, width: u32, height: u32, dpr: f32) {
        self.width = width;
        self.height = height;
        self.dpr = dpr;
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", self.logical_width()));
        let _ = style.set_property("height", &format!("{}px", self.logical_height()));

        // All subsequent coordinates are logical (CSS) pixels.
        let scale = f64::from(dpr);
        let _ = self.ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0);
    }

    /// Current width in logical pixels.
    pub fn logical_width(&self) -> f32 {
        self.width as f32 / self.dpr
    }

    /// Current height in logical pixels.
    pub fn logical_height(&self) -> f32 {
        self.height as f32 / self.dpr
    }

    /// Measure the wrapped extent of one cell's text at a fixed width.
    ///
    /// This is the off-window measurement of the two-pass layout: the cell
    /// is never drawn here, only sized. Errors from the context surface as
    /// [`ListviewError::Measurement`]; callers fall back to the default
    /// size so rendering is never blocked.
    #[allow(clippy::cast_possible_truncation)]
    pub fn measure_cell(&self, text: &str, max_width: f32) -> Result<Size> {
        let avail = f64::from(max_width) - 2.0 * CELL_PADDING;
        if avail <= 0.0 {
            return Err(ListviewError::Measurement(
                "cell has no usable width".to_string(),
            ));
        }
        self.ctx.set_font(CELL_FONT);
        let lines = self.wrap_text(text, avail)?;
        let height = lines.len().max(1) as f64 * LINE_HEIGHT + 2.0 * CELL_PADDING;
        Ok(Size {
            width: max_width,
            height: height as f32,
        })
    }

    /// Render the full table view for this pass.
    pub fn render<S: StageSource>(&self, params: &RenderParams<'_, S>) {
        let width = f64::from(self.logical_width());
        let height = f64::from(self.logical_height());

        self.ctx.set_fill_style_str(colors::BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, width, height);

        self.render_body(params, width, height);
        self.render_index_column(params, height);
        self.render_header_row(params, width);
        self.render_corner(params);
        self.render_frozen_dividers(params.layout, width, height);
    }

    // === Pass 1: scrollable body, clipped past the frozen panes ===
    fn render_body<S: StageSource>(&self, params: &RenderParams<'_, S>, width: f64, height: f64) {
        if !params.window.has_body() {
            return;
        }
        let layout = params.layout;
        let index_w = f64::from(layout.index_width());
        let header_h = f64::from(layout.header_height());

        self.ctx.save();
        self.ctx.begin_path();
        self.ctx
            .rect(index_w, header_h, width - index_w, height - header_h);
        self.ctx.clip();

        self.ctx.set_font(CELL_FONT);
        self.ctx.set_text_baseline("top");

        for row in params.window.rows() {
            for col in params.window.cols() {
                let (x, y) =
                    params
                        .viewport
                        .body_to_screen(layout.col_x(col), layout.row_y(row), layout);
                let w = f64::from(layout.col_width(col));
                let h = f64::from(layout.row_height(row));
                self.draw_grid_cell(f64::from(x), f64::from(y), w, h);

                let content = params.table.resolve(CellAddress::new(row, col));
                if let Some(text) = content_text(&content, params.corner_label) {
                    self.draw_cell_text(&text, f64::from(x), f64::from(y), w, colors::TEXT);
                }
            }
        }

        self.ctx.restore();
    }

    // === Pass 2: pinned index column, vertically synced with the body ===
    fn render_index_column<S: StageSource>(&self, params: &RenderParams<'_, S>, height: f64) {
        let layout = params.layout;
        let index_w = f64::from(layout.index_width());
        let header_h = f64::from(layout.header_height());

        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.rect(0.0, header_h, index_w, height - header_h);
        self.ctx.clip();

        self.ctx.set_fill_style_str(colors::HEADER_BG);
        self.ctx.fill_rect(0.0, header_h, index_w, height - header_h);

        self.ctx.set_font(CELL_FONT);
        self.ctx.set_text_baseline("top");

        for row in params.window.rows() {
            let y = header_h + f64::from(layout.row_y(row) - params.viewport.scroll_y);
            let h = f64::from(layout.row_height(row));
            self.draw_grid_cell(0.0, y, index_w, h);

            let content = params.table.resolve(CellAddress::new(row, 0));
            if let Some(text) = content_text(&content, params.corner_label) {
                self.draw_cell_text(&text, 0.0, y, index_w, colors::HEADER_TEXT);
            }
        }

        self.ctx.restore();
    }

    // === Pass 3: pinned header row, horizontally synced with the body ===
    fn render_header_row<S: StageSource>(&self, params: &RenderParams<'_, S>, width: f64) {
        let layout = params.layout;
        let index_w = f64::from(layout.index_width());
        let header_h = f64::from(layout.header_height());

        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.rect(index_w, 0.0, width - index_w, header_h);
        self.ctx.clip();

        self.ctx.set_fill_style_str(colors::HEADER_BG);
        self.ctx.fill_rect(index_w, 0.0, width - index_w, header_h);

        self.ctx.set_font(HEADER_FONT);
        self.ctx.set_text_baseline("top");

        for col in params.window.cols() {
            let x = index_w + f64::from(layout.col_x(col) - params.viewport.scroll_x);
            let w = f64::from(layout.col_width(col));
            self.draw_grid_cell(x, 0.0, w, header_h);

            let content = params.table.resolve(CellAddress::new(0, col));
            if let Some(text) = content_text(&content, params.corner_label) {
                self.draw_cell_text(&text, x, 0.0, w, colors::HEADER_TEXT);
            }
        }

        self.ctx.restore();
    }

    // === Pass 4: the corner cell, fully fixed ===
    fn render_corner<S: StageSource>(&self, params: &RenderParams<'_, S>) {
        let layout = params.layout;
        let index_w = f64::from(layout.index_width());
        let header_h = f64::from(layout.header_height());

        self.ctx.set_fill_style_str(colors::HEADER_BG);
        self.ctx.fill_rect(0.0, 0.0, index_w, header_h);
        self.draw_grid_cell(0.0, 0.0, index_w, header_h);

        self.ctx.set_font(HEADER_FONT);
        self.ctx.set_text_baseline("top");
        let content = params.table.resolve(CellAddress::new(0, 0));
        if let Some(text) = content_text(&content, params.corner_label) {
            self.draw_cell_text(&text, 0.0, 0.0, index_w, colors::HEADER_TEXT);
        }
    }

    /// Frozen pane divider lines under the header row and right of the
    /// index column, limited to the laid-out content.
    fn render_frozen_dividers(&self, layout: &GridLayout, width: f64, height: f64) {
        let data_width = f64::from(layout.total_width()).min(width);
        let data_height = f64::from(layout.total_height()).min(height);

        let y = crisp(f64::from(layout.header_height()));
        let x = crisp(f64::from(layout.index_width()));

        self.ctx.save();
        self.ctx.set_stroke_style_str(colors::FROZEN_DIVIDER);
        self.ctx.set_line_width(1.0);

        self.ctx.begin_path();
        self.ctx.move_to(0.0, y);
        self.ctx.line_to(data_width, y);
        self.ctx.stroke();

        self.ctx.begin_path();
        self.ctx.move_to(x, 0.0);
        self.ctx.line_to(x, data_height);
        self.ctx.stroke();

        self.ctx.restore();
    }

    fn draw_grid_cell(&self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.set_stroke_style_str(colors::GRID_LINE);
        self.ctx.set_line_width(1.0);
        self.ctx
            .stroke_rect(crisp(x), crisp(y), w.max(0.0), h.max(0.0));
    }

    /// Word-wrap and left-align text inside a cell of width `w`.
    ///
    /// A failed measurement degrades to drawing the raw text on one line.
    fn draw_cell_text(&self, text: &str, x: f64, y: f64, w: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        let avail = w - 2.0 * CELL_PADDING;
        let lines = if avail > 0.0 {
            self.wrap_text(text, avail)
                .unwrap_or_else(|_| vec![text.to_string()])
        } else {
            vec![text.to_string()]
        };
        for (i, line) in lines.iter().enumerate() {
            let line_y = y + CELL_PADDING + i as f64 * LINE_HEIGHT;
            let _ = self.ctx.fill_text(line, x + CELL_PADDING, line_y);
        }
    }

    /// Wrap text into lines that fit within `max_width` (greedy by word).
    fn wrap_text(&self, text: &str, max_width: f64) -> Result<Vec<String>> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
                continue;
            }
            let test = format!("{current} {word}");
            if self.text_width(&test)? <= max_width {
                current = test;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        Ok(lines)
    }

    fn text_width(&self, text: &str) -> Result<f64> {
        let metrics = self
            .ctx
            .measure_text(text)
            .map_err(|_| ListviewError::Measurement("measure_text failed".to_string()))?;
        Ok(metrics.width())
    }
}

/// Display text for resolved cell content.
///
/// `Missing` and `Unresolved` render as blank cells rather than errors;
/// this view must never crash or alarm the host editor.
pub fn content_text(content: &CellContent, corner_label: &str) -> Option<String> {
    match content {
        CellContent::Corner => Some(corner_label.to_string()),
        CellContent::ColumnHeader(name) => Some(name.clone()),
        CellContent::RowIndex(n) => Some(n.to_string()),
        CellContent::Value(v) => Some(v.to_string()),
        CellContent::Missing | CellContent::Unresolved => None,
    }
}
