//! Structured error types for masonry-grid.
//!
//! Only construction and document handling can fail. Layout queries never
//! return errors; a missing element is `None`.

/// All errors that can occur while configuring or driving a layout.
#[derive(Debug, thiserror::Error)]
pub enum MasonryError {
    /// A layout needs at least one column.
    #[error("Invalid column count: {0} (must be at least 1)")]
    InvalidColumnCount(usize),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization error for configs and documents.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MasonryError>;

#[cfg(target_arch = "wasm32")]
impl From<MasonryError> for wasm_bindgen::JsValue {
    fn from(e: MasonryError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
