//! Structured error types for tablegrip.
//!
//! The geometry core never fails; these errors only come from decoding table
//! descriptions and from the host DOM boundary.

/// All errors that can occur outside the pure geometry core.
#[derive(Debug, thiserror::Error)]
pub enum TablegripError {
    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A table description that cannot be turned into a document.
    #[error("Invalid table description: {0}")]
    Description(String),

    /// A host DOM call failed.
    #[error("DOM error: {0}")]
    Dom(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TablegripError>;

impl From<String> for TablegripError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for TablegripError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<TablegripError> for wasm_bindgen::JsValue {
    fn from(e: TablegripError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
