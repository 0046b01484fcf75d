//! Rendering of the visible table window.
//!
//! Canvas 2D via web-sys: rectangles, lines and text are all the table
//! needs. The renderer draws only the cells the virtualizer scheduled,
//! plus the pinned header row, index column and frozen dividers.

mod canvas;

pub use canvas::{content_text, CanvasRenderer, RenderParams};
