//! Main `ListView` struct - the WASM-exported entry point.
//!
//! The window chrome owns visibility, position and expansion; it mounts a
//! `ListView` over a canvas whenever the window is expanded and calls
//! [`ListView::refresh`] on each data-refresh tick with the current stage
//! snapshot. Everything here runs synchronously inside the triggering event
//! handler: discover -> reconcile -> lay out -> compute window -> resolve
//! and measure visible cells -> draw, in that order, so each pass sees one
//! consistent snapshot.

mod events;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlCanvasElement, WheelEvent};

#[cfg(target_arch = "wasm32")]
use crate::error::ListviewError;
use crate::layout::{GridLayout, MeasureCache, MeasureConfig, Viewport, ViewportWindow};
#[cfg(target_arch = "wasm32")]
use crate::layout::{Size, PREFERRED_HEIGHT, PREFERRED_WIDTH};
#[cfg(target_arch = "wasm32")]
use crate::render::{content_text, CanvasRenderer, RenderParams};
use crate::source::{SequenceSet, SnapshotSource, StageSnapshot, StageSource};
#[cfg(target_arch = "wasm32")]
use crate::table::CellAddress;
use crate::table::TableView;

/// Localization key the chrome resolves for the corner cell text.
pub const INDEX_LABEL_KEY: &str = "index-column-label";

/// Fallback corner text until the chrome provides the localized string.
const DEFAULT_INDEX_LABEL: &str = "index";

/// One synchronous recomputation pass over the current snapshot.
///
/// Rebuilds the reconciler, invalidates the measurement cache when the
/// sequence set changed identity (a shifted header makes every cached
/// row height stale), lays the table out from cached extents, clamps the
/// scroll position to the new content, and computes the visible window.
pub fn prepare_pass<'a, S: StageSource>(
    source: &'a S,
    last_set: &mut SequenceSet,
    cache: &mut MeasureCache,
    viewport: &mut Viewport,
) -> (TableView<'a, S>, GridLayout, ViewportWindow) {
    let table = TableView::new(source);
    if table.sequences() != last_set {
        cache.invalidate_all();
        last_set.clone_from(table.sequences());
    }
    let layout = GridLayout::new(table.shape(), cache);
    viewport.clamp_scroll(&layout);
    let window = viewport.compute_visible(&layout);
    (table, layout, window)
}

/// Shared state accessed by event handlers (wasm32 only).
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) renderer: CanvasRenderer,
    pub(crate) source: SnapshotSource,
    pub(crate) last_set: SequenceSet,
    pub(crate) cache: MeasureCache,
    pub(crate) viewport: Viewport,
    pub(crate) corner_label: String,
}

/// Live table view over the host's list variables.
#[wasm_bindgen]
pub struct ListView {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)] // kept alive for the lifetime of the canvas listener
    wheel_closure: Option<Closure<dyn FnMut(WheelEvent)>>,

    // Non-wasm32 fields: the same pipeline without a canvas, used by
    // native integration tests.
    #[cfg(not(target_arch = "wasm32"))]
    source: SnapshotSource,
    #[cfg(not(target_arch = "wasm32"))]
    last_set: SequenceSet,
    #[cfg(not(target_arch = "wasm32"))]
    cache: MeasureCache,
    #[cfg(not(target_arch = "wasm32"))]
    viewport: Viewport,
    #[cfg(not(target_arch = "wasm32"))]
    corner_label: String,
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl ListView {
    /// Create a viewer over `canvas`.
    ///
    /// Registers a wheel handler on the canvas; scrolling re-renders
    /// synchronously. The chrome still drives data refresh and resize.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, dpr: f32) -> Result<ListView, JsValue> {
        console_error_panic_hook::set_once();

        let mut renderer = CanvasRenderer::new(canvas.clone())?;
        renderer.resize(canvas.width().max(1), canvas.height().max(1), dpr);

        let mut viewport = Viewport::new();
        viewport.resize(renderer.logical_width(), renderer.logical_height());

        let state = Rc::new(RefCell::new(SharedState {
            renderer,
            source: SnapshotSource::no_stage(),
            last_set: SequenceSet::default(),
            cache: MeasureCache::new(MeasureConfig::default()),
            viewport,
            corner_label: DEFAULT_INDEX_LABEL.to_string(),
        }));

        let wheel_closure = events::register_wheel_handler(&canvas, &state)?;

        Ok(ListView {
            state,
            wheel_closure: Some(wheel_closure),
        })
    }

    /// Data-refresh trigger from the chrome.
    ///
    /// `stage` is the host's `{id: {name, values}}` mapping of list
    /// variables, or `null`/`undefined` when no stage target exists.
    pub fn refresh(&mut self, stage: JsValue) -> Result<(), JsValue> {
        let snapshot = if stage.is_null() || stage.is_undefined() {
            None
        } else {
            Some(
                serde_wasm_bindgen::from_value::<StageSnapshot>(stage)
                    .map_err(|e| ListviewError::Snapshot(e.to_string()))?,
            )
        };
        self.state.borrow_mut().source.replace(snapshot);
        Self::render_pass(&mut self.state.borrow_mut());
        Ok(())
    }

    /// Set the chrome-localized corner label (key `index-column-label`).
    #[wasm_bindgen(js_name = "setIndexLabel")]
    pub fn set_index_label(&mut self, label: String) {
        let mut s = self.state.borrow_mut();
        s.corner_label = label;
        Self::render_pass(&mut s);
    }

    /// Scroll the body by delta amounts (logical pixels).
    #[wasm_bindgen(js_name = "scrollBy")]
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) {
        Self::scroll_and_render(&mut self.state.borrow_mut(), delta_x, delta_y);
    }

    /// Resize the canvas backing store and viewport.
    pub fn resize(&mut self, width: u32, height: u32, dpr: f32) {
        let mut s = self.state.borrow_mut();
        s.renderer.resize(width.max(1), height.max(1), dpr);
        let (w, h) = (s.renderer.logical_width(), s.renderer.logical_height());
        s.viewport.resize(w, h);
        Self::render_pass(&mut s);
    }

    /// Re-render from current state (e.g. after the chrome re-mounts).
    pub fn render(&mut self) {
        Self::render_pass(&mut self.state.borrow_mut());
    }

    /// Preferred frame width the chrome should allot (logical px).
    #[wasm_bindgen(js_name = "preferredWidth")]
    pub fn preferred_width() -> f32 {
        PREFERRED_WIDTH
    }

    /// Preferred frame height the chrome should allot (logical px).
    #[wasm_bindgen(js_name = "preferredHeight")]
    pub fn preferred_height() -> f32 {
        PREFERRED_HEIGHT
    }
}

#[cfg(target_arch = "wasm32")]
impl ListView {
    pub(crate) fn scroll_and_render(s: &mut SharedState, delta_x: f32, delta_y: f32) {
        {
            let SharedState {
                source,
                last_set,
                cache,
                viewport,
                ..
            } = s;
            let (_table, layout, _window) = prepare_pass(source, last_set, cache, viewport);
            viewport.scroll_by(delta_x, delta_y, &layout);
        }
        Self::render_pass(s);
    }

    /// Full synchronous pass: reconcile, measure what scrolled into view,
    /// re-lay out if heights changed, draw.
    pub(crate) fn render_pass(s: &mut SharedState) {
        let SharedState {
            renderer,
            source,
            last_set,
            cache,
            viewport,
            corner_label,
        } = s;

        let (table, mut layout, mut window) = prepare_pass(source, last_set, cache, viewport);

        // Two-pass layout: measure unseen cells in the window, then rebuild
        // positions. New heights can pull more rows into view, so repeat
        // until the window is fully measured (each pass only measures cells
        // it has not seen, so this terminates).
        loop {
            let mut measured_any = false;
            for row in window.rows() {
                for col in window.cols() {
                    let addr = CellAddress::new(row, col);
                    if cache.has(addr) {
                        continue;
                    }
                    let width = cache.column_width(col);
                    let size = match content_text(&table.resolve(addr), corner_label) {
                        Some(text) => renderer.measure_cell(&text, width).unwrap_or(Size {
                            width,
                            height: cache.config().default_height,
                        }),
                        // Blank cells take the default extent.
                        None => Size {
                            width,
                            height: cache.config().default_height,
                        },
                    };
                    cache.set(addr, size);
                    measured_any = true;
                }
            }
            if !measured_any {
                break;
            }
            layout = GridLayout::new(table.shape(), cache);
            viewport.clamp_scroll(&layout);
            window = viewport.compute_visible(&layout);
        }

        renderer.render(&RenderParams {
            table: &table,
            layout: &layout,
            viewport,
            window: &window,
            corner_label,
        });
    }
}

// ============================================================================
// Non-WASM32 Implementation (native pipeline, no canvas)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ListView {
    /// Viewer with no stage and the preferred viewport size.
    pub fn new() -> Self {
        Self {
            source: SnapshotSource::no_stage(),
            last_set: SequenceSet::default(),
            cache: MeasureCache::new(MeasureConfig::default()),
            viewport: Viewport::new(),
            corner_label: DEFAULT_INDEX_LABEL.to_string(),
        }
    }

    /// Replace the backing snapshot (`None` = stage went away).
    pub fn refresh_snapshot(&mut self, snapshot: Option<StageSnapshot>) {
        self.source.replace(snapshot);
    }

    pub fn set_index_label(&mut self, label: String) {
        self.corner_label = label;
    }

    pub fn corner_label(&self) -> &str {
        &self.corner_label
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn cache(&self) -> &MeasureCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut MeasureCache {
        &mut self.cache
    }

    /// Run one recomputation pass and return the scheduled window.
    pub fn compute_window(&mut self) -> ViewportWindow {
        let (_table, _layout, window) = prepare_pass(
            &self.source,
            &mut self.last_set,
            &mut self.cache,
            &mut self.viewport,
        );
        window
    }

    /// Run one recomputation pass and hand the reconciled view to `f`.
    pub fn with_table<R>(
        &mut self,
        f: impl FnOnce(&TableView<'_, SnapshotSource>, &GridLayout, ViewportWindow) -> R,
    ) -> R {
        let (table, layout, window) = prepare_pass(
            &self.source,
            &mut self.last_set,
            &mut self.cache,
            &mut self.viewport,
        );
        f(&table, &layout, window)
    }
}
