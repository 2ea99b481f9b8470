//! WASM-exported `MasonryView` - the entry point for a JavaScript host.
//!
//! The JS side owns the scrollable element and the card data. It hands the
//! view a height callback `(section, item) => number`, keeps the section
//! counts and viewport bounds up to date, and asks for the frames to render.
//! The layout pass runs lazily on the first query after an invalidation.

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::config::LayoutConfig;
use crate::element::{ElementRef, SupplementaryKind};
use crate::geometry::{EdgeInsets, Rect};
use crate::host::{HeightProvider, LayoutHost};
use crate::layout::MasonryLayout;

/// Height provider backed by a JS function
struct JsHeightProvider {
    callback: Function,
}

impl HeightProvider for JsHeightProvider {
    #[allow(clippy::cast_possible_truncation)]
    fn height_for_item(&self, reference: ElementRef) -> f32 {
        self.callback
            .call2(
                &JsValue::NULL,
                &JsValue::from_f64(reference.section as f64),
                &JsValue::from_f64(reference.item as f64),
            )
            .ok()
            .and_then(|value| value.as_f64())
            .map_or(0.0, |height| height as f32)
    }
}

/// Viewport and item counts as last reported by JS
#[derive(Debug, Clone, Default)]
struct SectionCounts {
    bounds: Rect,
    insets: EdgeInsets,
    counts: Vec<usize>,
}

impl LayoutHost for SectionCounts {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn content_insets(&self) -> EdgeInsets {
        self.insets
    }

    fn section_count(&self) -> usize {
        self.counts.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.counts.get(section).copied().unwrap_or(0)
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

#[wasm_bindgen]
pub struct MasonryView {
    layout: MasonryLayout<JsHeightProvider>,
    host: SectionCounts,
}

#[wasm_bindgen]
impl MasonryView {
    /// Create a view from a config object (or `undefined` for defaults) and
    /// a height callback.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, height_callback: Function) -> Result<MasonryView, JsValue> {
        console_error_panic_hook::set_once();

        let config: LayoutConfig = if config.is_undefined() || config.is_null() {
            LayoutConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
        };
        let provider = JsHeightProvider {
            callback: height_callback,
        };
        let layout =
            MasonryLayout::new(config, provider).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(MasonryView {
            layout,
            host: SectionCounts::default(),
        })
    }

    /// Report new viewport bounds. Returns whether the host should query the
    /// layout again (always true); the cached frames survive pure scrolls.
    #[wasm_bindgen(js_name = "setBounds")]
    pub fn set_bounds(&mut self, x: f32, y: f32, width: f32, height: f32) -> bool {
        let bounds = Rect::new(x, y, width, height);
        self.host.bounds = bounds;
        self.layout.should_invalidate(bounds)
    }

    #[wasm_bindgen(js_name = "setInsets")]
    pub fn set_insets(&mut self, top: f32, left: f32, bottom: f32, right: f32) {
        self.host.insets = EdgeInsets::new(top, left, bottom, right);
        self.layout.invalidate();
    }

    /// Replace the item count of every section
    #[wasm_bindgen(js_name = "setSections")]
    pub fn set_sections(&mut self, counts: Vec<u32>) {
        self.host.counts = counts.into_iter().map(|count| count as usize).collect();
        self.layout.invalidate();
    }

    /// Discard the cached layout, e.g. after card heights changed
    #[wasm_bindgen]
    pub fn invalidate(&mut self) {
        self.layout.invalidate();
    }

    /// `{ width, height }` of the laid out content
    #[wasm_bindgen(js_name = "contentSize")]
    pub fn content_size(&mut self) -> Result<JsValue, JsValue> {
        self.layout.prepare(&self.host);
        to_js(&self.layout.content_size())
    }

    /// Attributes of every element intersecting the rectangle
    #[wasm_bindgen(js_name = "attributesInRect")]
    pub fn attributes_in_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<JsValue, JsValue> {
        self.layout.prepare(&self.host);
        to_js(&self
            .layout
            .attributes_in_rect(Rect::new(x, y, width, height)))
    }

    /// Attributes of one cell, `undefined` if it does not exist
    #[wasm_bindgen(js_name = "cellAttributes")]
    pub fn cell_attributes(&mut self, section: usize, item: usize) -> Result<JsValue, JsValue> {
        self.layout.prepare(&self.host);
        to_js(&self
            .layout
            .cell_attributes(ElementRef::new(section, item))
            .copied())
    }

    /// Attributes of a section's `"header"` or `"footer"`, `undefined` if it
    /// does not exist
    #[wasm_bindgen(js_name = "supplementaryAttributes")]
    pub fn supplementary_attributes(
        &mut self,
        kind: &str,
        section: usize,
    ) -> Result<JsValue, JsValue> {
        let kind = match kind {
            "header" => SupplementaryKind::Header,
            "footer" => SupplementaryKind::Footer,
            other => {
                return Err(JsValue::from_str(&format!(
                    "Unknown supplementary kind: {other}"
                )))
            }
        };
        self.layout.prepare(&self.host);
        to_js(&self
            .layout
            .supplementary_attributes(kind, ElementRef::supplementary(kind, section))
            .copied())
    }
}
