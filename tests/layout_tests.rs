//! Layout pass tests for masonry-grid
//!
//! Tests for card placement, row-pair stretching, column bands, sections,
//! suppressed headers/footers and height provider usage.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use masonry_grid::{
    ElementKind, ElementRef, LayoutConfig, MasonryLayout, Rect, Size, SupplementaryKind,
};

// =============================================================================
// SINGLE SECTION
// =============================================================================

#[test]
fn test_four_card_scenario() {
    let host = feed(vec![vec![100.0, 50.0, 80.0, 80.0]]);
    let layout = prepared(sectioned_config(), &host);

    // Row 0: max(100, 50) + 12 = 112, row 1: 80 + 12 = 92
    assert_eq!(cell(&layout, 0, 0).frame, Rect::new(6.0, 46.0, 138.0, 100.0));
    assert_eq!(cell(&layout, 0, 1).frame, Rect::new(156.0, 46.0, 138.0, 100.0));
    assert_eq!(cell(&layout, 0, 2).frame, Rect::new(6.0, 158.0, 138.0, 80.0));
    assert_eq!(cell(&layout, 0, 3).frame, Rect::new(156.0, 158.0, 138.0, 80.0));

    let header = layout
        .supplementary_attributes(SupplementaryKind::Header, ElementRef::header(0))
        .unwrap();
    assert_eq!(header.frame, Rect::new(0.0, 0.0, WIDTH, HEADER));

    let footer = layout
        .supplementary_attributes(SupplementaryKind::Footer, ElementRef::footer(0))
        .unwrap();
    assert_eq!(footer.frame, Rect::new(0.0, 244.0, WIDTH, FOOTER));

    assert_eq!(
        layout.content_size(),
        Size::new(WIDTH, HEADER + 112.0 + 92.0 + FOOTER)
    );
}

#[test]
fn test_first_card_of_pair_is_stretched() {
    // The taller card comes second: the first card's frame must be patched
    let host = feed(vec![vec![30.0, 90.0]]);
    let layout = prepared(LayoutConfig::default(), &host);

    assert_eq!(cell(&layout, 0, 0).frame.height, 90.0);
    assert_eq!(cell(&layout, 0, 1).frame.height, 90.0);
    assert_eq!(cell(&layout, 0, 0).frame.y, cell(&layout, 0, 1).frame.y);
    assert_eq!(layout.content_size().height, 102.0);
}

#[test]
fn test_row_pairs_share_height() {
    let heights = vec![120.0, 40.0, 10.0, 75.0, 60.0, 60.0, 200.0, 5.0];
    let host = feed(vec![heights.clone()]);
    let layout = prepared(LayoutConfig::default(), &host);

    for pair in 0..heights.len() / 2 {
        let left = cell(&layout, 0, pair * 2);
        let right = cell(&layout, 0, pair * 2 + 1);
        let expected = heights[pair * 2].max(heights[pair * 2 + 1]);

        assert_eq!(left.frame.height, expected, "left card of row {pair}");
        assert_eq!(right.frame.height, expected, "right card of row {pair}");
        assert_eq!(left.frame.y, right.frame.y, "row {pair} starts level");
    }
    assert_within_content(&layout);
}

#[test]
fn test_odd_last_card_keeps_own_height() {
    let host = feed(vec![vec![100.0, 50.0, 30.0]]);
    let layout = prepared(LayoutConfig::default(), &host);

    let last = cell(&layout, 0, 2);
    assert_eq!(last.frame, Rect::new(6.0, 118.0, 138.0, 30.0));
    assert_eq!(layout.content_size().height, 112.0 + 42.0);
}

#[test]
fn test_cells_stay_in_column_bands() {
    let host = feed(vec![vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]]);
    for columns in 1..=4 {
        let config = LayoutConfig::default().with_column_count(columns);
        let layout = prepared(config, &host);
        assert_cells_in_columns(&layout, config.cell_padding);
        assert_eq!(layout.column_width(), WIDTH / columns as f32);
    }
}

#[test]
fn test_zero_padding_frames_fill_columns() {
    let host = feed(vec![vec![100.0, 100.0]]);
    let layout = prepared(LayoutConfig::default().with_cell_padding(0.0), &host);

    assert_eq!(cell(&layout, 0, 0).frame, Rect::new(0.0, 0.0, 150.0, 100.0));
    assert_eq!(cell(&layout, 0, 1).frame, Rect::new(150.0, 0.0, 150.0, 100.0));
}

// =============================================================================
// THREE OR MORE COLUMNS
// =============================================================================

#[test]
fn test_three_columns_only_align_last_two() {
    let host = feed(vec![vec![100.0, 20.0, 50.0]]);
    let config = LayoutConfig::default()
        .with_column_count(3)
        .with_cell_padding(0.0);
    let layout = prepared(config, &host);

    assert_eq!(cell(&layout, 0, 0).frame, Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(cell(&layout, 0, 1).frame, Rect::new(100.0, 0.0, 100.0, 50.0));
    assert_eq!(cell(&layout, 0, 2).frame, Rect::new(200.0, 0.0, 100.0, 50.0));
    assert_eq!(layout.content_size().height, 100.0);
}

#[test]
fn test_three_columns_second_row_follows_each_column() {
    let host = feed(vec![vec![100.0, 20.0, 50.0, 10.0, 10.0]]);
    let config = LayoutConfig::default()
        .with_column_count(3)
        .with_cell_padding(0.0);
    let layout = prepared(config, &host);

    // Column 0 is still below the 100px card, column 1 below the stretched 50px pair
    assert_eq!(cell(&layout, 0, 3).frame, Rect::new(0.0, 100.0, 100.0, 10.0));
    assert_eq!(cell(&layout, 0, 4).frame, Rect::new(100.0, 50.0, 100.0, 10.0));
    assert_eq!(layout.content_size().height, 110.0);
    assert_within_content(&layout);
}

// =============================================================================
// SECTIONS
// =============================================================================

#[test]
fn test_empty_section_header_and_footer_back_to_back() {
    let host = feed(vec![vec![]]);
    let layout = prepared(sectioned_config(), &host);

    let header = layout
        .supplementary_attributes(SupplementaryKind::Header, ElementRef::header(0))
        .unwrap();
    let footer = layout
        .supplementary_attributes(SupplementaryKind::Footer, ElementRef::footer(0))
        .unwrap();

    assert_eq!(header.frame.y, 0.0);
    assert_eq!(footer.frame.y, header.frame.max_y());
    assert_eq!(layout.element_count(), 2);
    assert_eq!(layout.content_size().height, HEADER + FOOTER);
}

#[test]
fn test_sections_stack_vertically() {
    let host = feed(vec![vec![100.0, 50.0, 30.0], vec![], vec![20.0, 20.0]]);
    let layout = prepared(sectioned_config(), &host);

    // Section 0: header 0..40, rows 40..152 and 152..194, footer 194..214
    let footer0 = layout
        .supplementary_attributes(SupplementaryKind::Footer, ElementRef::footer(0))
        .unwrap();
    assert_eq!(footer0.frame.y, 194.0);

    // Section 1 is empty: header 214..254, footer 254..274
    let header1 = layout
        .supplementary_attributes(SupplementaryKind::Header, ElementRef::header(1))
        .unwrap();
    let footer1 = layout
        .supplementary_attributes(SupplementaryKind::Footer, ElementRef::footer(1))
        .unwrap();
    assert_eq!(header1.frame.y, 214.0);
    assert_eq!(footer1.frame.y, 254.0);

    // Section 2 restarts in the first column below its own header
    let header2 = layout
        .supplementary_attributes(SupplementaryKind::Header, ElementRef::header(2))
        .unwrap();
    assert_eq!(header2.frame.y, 274.0);
    assert_eq!(cell(&layout, 2, 0).frame, Rect::new(6.0, 320.0, 138.0, 20.0));
    assert_eq!(cell(&layout, 2, 1).frame, Rect::new(156.0, 320.0, 138.0, 20.0));

    assert_eq!(layout.content_size().height, 274.0 + HEADER + 32.0 + FOOTER);
    assert_within_content(&layout);
}

#[test]
fn test_every_element_within_content_height() {
    let host = feed(vec![
        vec![300.0, 12.0, 45.0],
        vec![7.0],
        vec![80.0, 80.0, 80.0, 81.0, 1.0],
    ]);
    for columns in 1..=3 {
        let layout = prepared(sectioned_config().with_column_count(columns), &host);
        assert_within_content(&layout);
        assert_eq!(layout.element_count(), 9 + 6);
    }
}

// =============================================================================
// SUPPRESSED SUPPLEMENTARY VIEWS
// =============================================================================

#[test]
fn test_zero_height_header_is_not_emitted() {
    let host = feed(vec![vec![100.0]]);
    let config = LayoutConfig::default()
        .with_header_size(Size::new(WIDTH, 0.0))
        .with_footer_size(Size::new(WIDTH, FOOTER));
    let layout = prepared(config, &host);

    assert!(layout
        .supplementary_attributes(SupplementaryKind::Header, ElementRef::header(0))
        .is_none());
    assert_eq!(cell(&layout, 0, 0).frame.y, 6.0);
    assert_eq!(layout.content_size().height, 112.0 + FOOTER);
}

#[test]
fn test_zero_width_footer_is_not_emitted() {
    let host = feed(vec![vec![100.0]]);
    let config = LayoutConfig::default()
        .with_header_size(Size::new(WIDTH, HEADER))
        .with_footer_size(Size::new(0.0, 50.0));
    let layout = prepared(config, &host);

    assert!(layout
        .supplementary_attributes(SupplementaryKind::Footer, ElementRef::footer(0))
        .is_none());
    assert_eq!(layout.content_size().height, HEADER + 112.0);
}

#[test]
fn test_headers_span_content_width_not_reference_width() {
    let host = feed(vec![vec![]]);
    let config = LayoutConfig::default().with_header_size(Size::new(1.0, HEADER));
    let layout = prepared(config, &host);

    let header = layout
        .supplementary_attributes(SupplementaryKind::Header, ElementRef::header(0))
        .unwrap();
    assert_eq!(header.frame.width, WIDTH);
    assert_eq!(header.kind, ElementKind::SectionHeader);
}

// =============================================================================
// HEIGHT PROVIDER
// =============================================================================

#[test]
fn test_provider_called_once_per_item_plus_row_partner() {
    let host = feed(vec![vec![0.0; 4]]);
    let provider = RecordingProvider::new(vec![vec![100.0, 50.0, 80.0, 80.0]]);
    let mut layout = MasonryLayout::new(LayoutConfig::default(), provider).unwrap();
    layout.prepare(&host);

    let calls = layout.height_provider().calls();
    assert_eq!(
        calls,
        vec![
            ElementRef::new(0, 0),
            ElementRef::new(0, 1),
            ElementRef::new(0, 0),
            ElementRef::new(0, 2),
            ElementRef::new(0, 3),
            ElementRef::new(0, 2),
        ]
    );
}

#[test]
fn test_provider_calls_with_three_columns() {
    let host = feed(vec![vec![0.0; 6]]);
    let provider = RecordingProvider::new(vec![vec![10.0; 6]]);
    let mut layout =
        MasonryLayout::new(LayoutConfig::default().with_column_count(3), provider).unwrap();
    layout.prepare(&host);

    // Six items, one re-measure for each of the two rows
    assert_eq!(layout.height_provider().call_count(), 8);
}

#[test]
fn test_closure_height_provider() {
    let host = feed(vec![vec![0.0; 3]]);
    let mut layout = MasonryLayout::new(LayoutConfig::default(), |r: ElementRef| {
        20.0 * (r.item as f32 + 1.0)
    })
    .unwrap();
    layout.prepare(&host);

    assert_eq!(cell(&layout, 0, 0).frame.height, 40.0);
    assert_eq!(cell(&layout, 0, 2).frame.height, 60.0);
}
