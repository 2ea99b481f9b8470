//! masonry-grid - sectioned masonry layout for card feeds
//!
//! Computes a Pinterest-style grid for a scrollable collection of
//! variable-height cards:
//! - Sections with full-width headers and footers
//! - Cards placed column by column, row partners stretched to the taller card
//! - Cached frames, discarded only when the viewport size changes
//! - Per-element lookups and visible-rectangle queries
//!
//! # Usage (Rust)
//!
//! ```rust
//! use masonry_grid::{ElementRef, LayoutConfig, MasonryLayout, Rect, StaticCollection};
//!
//! let feed = StaticCollection::new(
//!     Rect::new(0.0, 0.0, 300.0, 600.0),
//!     vec![vec![100.0, 50.0, 80.0, 80.0]],
//! );
//! let mut layout = MasonryLayout::new(LayoutConfig::default(), feed.clone())?;
//! layout.prepare(&feed);
//!
//! let first = layout.cell_attributes(ElementRef::new(0, 0));
//! assert!(first.is_some());
//! # Ok::<(), masonry_grid::MasonryError>(())
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { MasonryView } from 'masonry-grid';
//! await init();
//! const view = new MasonryView({ columnCount: 2 }, (section, item) => heights[section][item]);
//! view.setSections([heights[0].length]);
//! view.setBounds(0, scrollTop, width, height);
//! const visible = view.attributesInRect(0, scrollTop, width, height);
//! ```

pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod wasm;

use wasm_bindgen::prelude::*;

pub use config::LayoutConfig;
pub use document::{run_document, LayoutDocument, LayoutReport};
pub use element::{ElementKind, ElementRef, LayoutAttributes, SupplementaryKind};
pub use error::{MasonryError, Result};
pub use geometry::{EdgeInsets, Point, Rect, Size};
pub use host::{HeightProvider, LayoutHost, StaticCollection};
pub use layout::{AttributeCache, MasonryLayout};
pub use wasm::MasonryView;

/// Lay out a JSON document and return the report as a JSON string
///
/// # Errors
/// Returns an error if the document is malformed or its config is invalid.
#[wasm_bindgen(js_name = "layoutDocument")]
pub fn layout_document(json: &str) -> std::result::Result<String, JsValue> {
    let document = LayoutDocument::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let report = run_document(&document).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&report)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
