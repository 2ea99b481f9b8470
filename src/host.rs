//! Capabilities the layout engine consumes from its surroundings.
//!
//! The engine never owns the data it lays out. A [`LayoutHost`] reports the
//! viewport and the section/item counts, and a [`HeightProvider`] measures
//! each card. Both are queried synchronously during a layout pass.

use serde::{Deserialize, Serialize};

use crate::element::ElementRef;
use crate::geometry::{EdgeInsets, Rect};

/// Supplies the content height of each item.
///
/// Implementations must be deterministic within a pass: the engine asks for
/// the height of every item once and asks again for the earlier item of each
/// row pair.
pub trait HeightProvider {
    fn height_for_item(&self, reference: ElementRef) -> f32;
}

impl<F> HeightProvider for F
where
    F: Fn(ElementRef) -> f32,
{
    fn height_for_item(&self, reference: ElementRef) -> f32 {
        self(reference)
    }
}

/// The scrollable surface that owns the layout.
pub trait LayoutHost {
    /// Viewport bounds. The origin carries the scroll offset.
    fn bounds(&self) -> Rect;

    /// Insets subtracted from the bounds to get the content width.
    fn content_insets(&self) -> EdgeInsets {
        EdgeInsets::ZERO
    }

    fn section_count(&self) -> usize;

    /// Number of items in `section`. Out-of-range sections have no items.
    fn item_count(&self, section: usize) -> usize;
}

/// In-memory host and height provider backed by a list of item heights per
/// section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticCollection {
    pub bounds: Rect,
    pub insets: EdgeInsets,
    /// Content height of every item, grouped by section
    pub sections: Vec<Vec<f32>>,
}

impl StaticCollection {
    pub fn new(bounds: Rect, sections: Vec<Vec<f32>>) -> Self {
        Self {
            bounds,
            insets: EdgeInsets::ZERO,
            sections,
        }
    }

    #[must_use]
    pub fn with_insets(mut self, insets: EdgeInsets) -> Self {
        self.insets = insets;
        self
    }

    /// Move or resize the viewport
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Total number of items across all sections
    pub fn total_items(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }
}

impl LayoutHost for StaticCollection {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn content_insets(&self) -> EdgeInsets {
        self.insets
    }

    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, Vec::len)
    }
}

impl HeightProvider for StaticCollection {
    fn height_for_item(&self, reference: ElementRef) -> f32 {
        self.sections
            .get(reference.section)
            .and_then(|items| items.get(reference.item))
            .copied()
            .unwrap_or(0.0)
    }
}
