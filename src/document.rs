//! JSON document surface.
//!
//! A [`LayoutDocument`] bundles a config, a viewport and the item heights of
//! every section. Running it produces a [`LayoutReport`] with the content
//! size, every laid out element and, optionally, the elements visible in a
//! query rectangle. The CLI and the WASM binding both speak this format.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::element::LayoutAttributes;
use crate::error::Result;
use crate::geometry::{EdgeInsets, Rect, Size};
use crate::host::StaticCollection;
use crate::layout::MasonryLayout;

/// Input document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutDocument {
    pub config: LayoutConfig,
    /// Viewport bounds
    pub bounds: Rect,
    pub insets: EdgeInsets,
    /// Content height of every item, grouped by section
    pub sections: Vec<Vec<f32>>,
    /// Optional visible rectangle to query after the pass
    pub query: Option<Rect>,
}

impl LayoutDocument {
    /// Parse a document from JSON.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Host view of the document
    pub fn collection(&self) -> StaticCollection {
        StaticCollection::new(self.bounds, self.sections.clone()).with_insets(self.insets)
    }
}

/// Output of a layout pass over a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub content_size: Size,
    pub column_width: f32,
    pub elements: Vec<LayoutAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<Vec<LayoutAttributes>>,
}

/// Lay out a document and collect the report.
///
/// # Errors
/// Returns an error if the document's config does not validate.
pub fn run_document(document: &LayoutDocument) -> Result<LayoutReport> {
    let collection = document.collection();
    let mut layout = MasonryLayout::new(document.config, collection.clone())?;
    layout.prepare(&collection);

    Ok(LayoutReport {
        content_size: layout.content_size(),
        column_width: layout.column_width(),
        elements: layout.attributes().copied().collect(),
        visible: document.query.map(|rect| layout.attributes_in_rect(rect)),
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    const DOCUMENT: &str = r#"{
        "config": {
            "columnCount": 2,
            "cellPadding": 6,
            "headerSize": { "width": 300, "height": 40 },
            "footerSize": { "width": 300, "height": 20 }
        },
        "bounds": { "x": 0, "y": 0, "width": 300, "height": 600 },
        "sections": [[100, 50, 80, 80]],
        "query": { "x": 0, "y": 0, "width": 300, "height": 100 }
    }"#;

    #[test]
    fn test_run_document() {
        let document = LayoutDocument::from_json(DOCUMENT).unwrap();
        let report = run_document(&document).unwrap();

        // header + 112 + 92 + footer
        assert_eq!(report.content_size, Size::new(300.0, 264.0));
        assert_eq!(report.column_width, 150.0);
        assert_eq!(report.elements.len(), 6);
        assert_eq!(report.elements[0].kind, ElementKind::SectionHeader);
        assert_eq!(report.elements[5].kind, ElementKind::SectionFooter);

        // Header plus the first row
        let visible = report.visible.unwrap();
        assert_eq!(visible.len(), 3);
    }

    #[test]
    fn test_report_json_shape() {
        let document = LayoutDocument::from_json(r#"{"bounds": {"x": 0, "y": 0, "width": 200, "height": 100}, "sections": [[10]]}"#)
            .unwrap();
        let report = run_document(&document).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("contentSize").is_some());
        assert!(json.get("visible").is_none());
        assert_eq!(json["elements"][0]["kind"], "cell");
        assert_eq!(json["elements"][0]["reference"]["item"], 0);
    }

    #[test]
    fn test_invalid_document_config() {
        let document =
            LayoutDocument::from_json(r#"{"config": {"columnCount": 0}, "sections": [[10]]}"#)
                .unwrap();
        assert!(run_document(&document).is_err());
    }
}
