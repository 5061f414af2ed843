//! tablegrip - resize bars for HTML tables in rich-text editors
//!
//! Draws draggable bars on the row and column boundaries of the hovered
//! table and turns a drag into new pixel sizes, correctly handling merged
//! cells:
//! - Logical ("jenga") grid of rowspan/colspan footprints
//! - One representative cell per logical row and column
//! - Size deduction for units only covered by spanned cells
//! - Min-size clamped deltas, written back as inline styles
//! - Right-to-left column handling
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { TableResizer } from 'tablegrip';
//! await init();
//! const resizer = new TableResizer(editor.getBody(), { minWidth: 16 });
//! resizer.setResizeCallback(({ axis, index, delta }) => editor.nodeChanged());
//! ```

pub mod dom;
pub mod error;
pub mod layout;
pub mod length;
pub mod logging;
pub mod overlay;
pub mod report;
pub mod types;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use overlay::TableResizer;

pub use error::{Result, TablegripError};
pub use types::*;

/// Compute the layout of a described table and return it as JSON
///
/// # Arguments
/// * `json` - A serialized table description (rows, cells, spans, boxes)
///
/// # Errors
/// Returns an error if the description is not valid JSON or has invalid
/// boxes.
#[wasm_bindgen(js_name = "describeTable")]
pub fn describe_table(json: &str) -> std::result::Result<String, JsValue> {
    report::describe_json(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute the layout of a described table and return it as a `JsValue`
///
/// # Errors
/// Returns an error if the description cannot be decoded.
#[wasm_bindgen(js_name = "describeTableToJs")]
pub fn describe_table_to_js(json: &str) -> std::result::Result<JsValue, JsValue> {
    let description = report::TableDescription::from_json(json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let layout = report::describe(&description).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&layout)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Drag boundary `index` of a described table by `delta` pixels and return
/// the planned sizes as JSON
///
/// # Errors
/// Returns an error for an unknown axis or an invalid description.
#[wasm_bindgen(js_name = "simulateDrag")]
pub fn simulate_drag(
    json: &str,
    axis: &str,
    index: usize,
    delta: f32,
) -> std::result::Result<String, JsValue> {
    let axis = Axis::parse(axis)
        .ok_or_else(|| JsValue::from_str(&format!("unknown axis: {axis}")))?;
    let description = report::TableDescription::from_json(json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let drag = report::simulate_drag(&description, axis, index, delta)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&drag)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Per-unit size deltas for dragging boundary `index` by `step` pixels
#[must_use]
#[wasm_bindgen(js_name = "determineDeltas")]
pub fn resize_deltas(sizes: Vec<f32>, index: usize, step: f32, min: f32) -> Vec<f32> {
    layout::determine_deltas(&sizes, index, step, min)
}

/// Send log output at `level` and above to the browser console (WASM only)
///
/// # Errors
/// Returns an error for an unknown level name.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = "initLogging")]
pub fn init_logging(level: &str) -> std::result::Result<(), JsValue> {
    let level = logging::parse_level(level)?;
    logging::init_console_logger(level);
    Ok(())
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
