//! Common test utilities and assertion helpers.
//!
//! Feed builders, a height provider that records every call, and assertions
//! shared by the layout integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;

use masonry_grid::{
    ElementKind, ElementRef, HeightProvider, LayoutAttributes, LayoutConfig, MasonryLayout, Rect,
    Size, StaticCollection,
};

/// Content width used by most tests
pub const WIDTH: f32 = 300.0;

/// Header height used by most tests
pub const HEADER: f32 = 40.0;

/// Footer height used by most tests
pub const FOOTER: f32 = 20.0;

// ============================================================================
// Fixtures
// ============================================================================

/// Viewport of `WIDTH` x 800 at the origin
pub fn viewport() -> Rect {
    Rect::new(0.0, 0.0, WIDTH, 800.0)
}

/// Collection with the given item heights per section
pub fn feed(sections: Vec<Vec<f32>>) -> StaticCollection {
    StaticCollection::new(viewport(), sections)
}

/// Two columns, padding 6, 40px headers and 20px footers
pub fn sectioned_config() -> LayoutConfig {
    LayoutConfig::default()
        .with_header_size(Size::new(WIDTH, HEADER))
        .with_footer_size(Size::new(WIDTH, FOOTER))
}

/// Build and run a layout whose height provider is the feed itself
pub fn prepared(config: LayoutConfig, host: &StaticCollection) -> MasonryLayout<StaticCollection> {
    let mut layout = MasonryLayout::new(config, host.clone()).expect("valid config");
    layout.prepare(host);
    layout
}

/// Height provider that records every reference it is asked about
pub struct RecordingProvider {
    heights: Vec<Vec<f32>>,
    calls: RefCell<Vec<ElementRef>>,
}

impl RecordingProvider {
    pub fn new(heights: Vec<Vec<f32>>) -> Self {
        Self {
            heights,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls(&self) -> Vec<ElementRef> {
        self.calls.borrow().clone()
    }
}

impl HeightProvider for RecordingProvider {
    fn height_for_item(&self, reference: ElementRef) -> f32 {
        self.calls.borrow_mut().push(reference);
        self.heights[reference.section][reference.item]
    }
}

// ============================================================================
// Lookups
// ============================================================================

pub fn cell<P: HeightProvider>(
    layout: &MasonryLayout<P>,
    section: usize,
    item: usize,
) -> LayoutAttributes {
    *layout
        .cell_attributes(ElementRef::new(section, item))
        .unwrap_or_else(|| panic!("cell ({section}, {item}) should be laid out"))
}

pub fn snapshot<P: HeightProvider>(layout: &MasonryLayout<P>) -> Vec<LayoutAttributes> {
    layout.attributes().copied().collect()
}

// ============================================================================
// Assertions
// ============================================================================

/// No element may extend below the reported content height.
pub fn assert_within_content<P: HeightProvider>(layout: &MasonryLayout<P>) {
    let height = layout.content_size().height;
    for attributes in layout.attributes() {
        assert!(
            attributes.frame.max_y() <= height,
            "{:?} {:?} ends at {} below content height {}",
            attributes.kind,
            attributes.reference,
            attributes.frame.max_y(),
            height
        );
    }
}

/// Cells must stay inside their column's horizontal band.
pub fn assert_cells_in_columns<P: HeightProvider>(layout: &MasonryLayout<P>, padding: f32) {
    let column_width = layout.column_width();
    let columns = layout.config().column_count;
    for attributes in layout
        .attributes()
        .filter(|a| a.kind == ElementKind::Cell)
    {
        let column = attributes.reference.item % columns;
        let slot_x = attributes.frame.x - padding;
        let start = column as f32 * column_width;
        assert!(
            slot_x >= start && slot_x < start + column_width,
            "cell {:?} at x={} is outside column {} [{}, {})",
            attributes.reference,
            slot_x,
            column,
            start,
            start + column_width
        );
    }
}
