//! Event wiring for `ListView`.
//!
//! Only wheel scrolling is handled here; data refresh, resize and
//! mount/unmount are chrome policy and arrive through the `ListView` API.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlCanvasElement, WheelEvent};

#[cfg(target_arch = "wasm32")]
use super::{ListView, SharedState};

/// Attach a wheel listener that scrolls the body and re-renders.
///
/// The returned closure must be kept alive as long as the canvas listens.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn register_wheel_handler(
    canvas: &HtmlCanvasElement,
    state: &Rc<RefCell<SharedState>>,
) -> Result<Closure<dyn FnMut(WheelEvent)>, JsValue> {
    let state = Rc::clone(state);
    let closure = Closure::wrap(Box::new(move |event: WheelEvent| {
        event.prevent_default();
        let mut s = state.borrow_mut();
        ListView::scroll_and_render(&mut s, event.delta_x() as f32, event.delta_y() as f32);
    }) as Box<dyn FnMut(WheelEvent)>);

    canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref())?;
    Ok(closure)
}
