//! listview - live table viewer for list variables
//!
//! Binds the host runtime's stage-level list variables ("sequences") into a
//! single virtualized table and renders it in the browser via WebAssembly
//! and Canvas 2D:
//! - Sequences of differing lengths reconciled under one row/column space
//! - Lazy cell resolution - only the visible window is ever materialized
//! - Deferred per-row height measurement with caching
//! - Frozen header row and index column, overscanned scrolling
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { ListView } from 'listview';
//! await init();
//! const viewer = new ListView(canvas, window.devicePixelRatio);
//! viewer.setIndexLabel(intl.formatMessage('index-column-label'));
//! viewer.refresh(stage.listVariablesOfKind('list'));
//! ```

pub mod error;
pub mod layout;
pub mod render;
pub mod source;
pub mod table;
pub mod viewer;

use wasm_bindgen::prelude::*;

// Re-export the main viewer struct
pub use viewer::ListView;

pub use error::{ListviewError, Result};
pub use layout::{
    GridLayout, MeasureCache, MeasureConfig, Size, Viewport, ViewportWindow,
    DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT, OVERSCAN_COLUMNS, OVERSCAN_ROWS, PREFERRED_HEIGHT,
    PREFERRED_WIDTH,
};
pub use source::{CellValue, SequenceRef, SequenceSet, SnapshotSource, StageSnapshot, StageSource};
pub use table::{compute_shape, CellAddress, CellContent, TableShape, TableView};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
