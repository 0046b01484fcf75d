//! Structured error types for listview.
//!
//! Nothing in the per-frame render path returns these; every failure there
//! degrades to an emptier-but-consistent table instead. Errors surface only
//! at the host boundary (malformed snapshot data, canvas setup).

/// All errors that can occur while binding or rendering the table.
#[derive(Debug, thiserror::Error)]
pub enum ListviewError {
    /// The host runtime has no active stage target.
    #[error("no active stage target")]
    NoActiveStage,

    /// A list variable disappeared between discovery and resolution.
    #[error("list variable vanished: {0}")]
    VanishedSequence(String),

    /// A cell could not be measured (e.g. zero-size context).
    #[error("measurement failed: {0}")]
    Measurement(String),

    /// The host passed a snapshot the adapter cannot understand.
    #[error("malformed stage snapshot: {0}")]
    Snapshot(String),

    /// Rendering error.
    #[error("render error: {0}")]
    Render(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ListviewError>;

impl From<String> for ListviewError {
    fn from(s: String) -> Self {
        Self::Render(s)
    }
}

impl From<&str> for ListviewError {
    fn from(s: &str) -> Self {
        Self::Render(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<ListviewError> for wasm_bindgen::JsValue {
    fn from(e: ListviewError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
