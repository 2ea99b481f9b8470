//! Shortest-column masonry layout with sections.
//!
//! A layout pass walks every section in order: a full-width header, the
//! section's cards distributed across the columns, then a full-width footer.
//! When a card lands in the last column of a row, the card before it is
//! measured again and both are stretched to the taller of the two, so the
//! next row starts level. The earlier card's cached frame is patched in place.
//!
//! Results are cached until the viewport size changes or the layout is
//! invalidated explicitly; repeated passes on a populated cache do nothing.

use tracing::{debug, debug_span, trace, warn};

use crate::config::LayoutConfig;
use crate::element::{ElementKind, ElementRef, LayoutAttributes, SupplementaryKind};
use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::host::{HeightProvider, LayoutHost};

use super::AttributeCache;

/// Masonry layout engine.
///
/// Owns the attribute cache and the running state of the last pass. The
/// height provider is required up front; there is no "unconfigured" state.
pub struct MasonryLayout<P> {
    config: LayoutConfig,
    provider: P,
    cache: AttributeCache,
    prepared: bool,
    /// Viewport bounds recorded by the last pass
    last_bounds: Rect,
    content_width: f32,
    /// Grows during a pass; the final value is the total content height
    content_height: f32,
    column_width: f32,
    /// Left edge of each column
    x_offsets: Vec<f32>,
    /// Running bottom of each column
    y_offsets: Vec<f32>,
    /// Column the next card goes into
    column: usize,
    /// Top of the most recently placed card
    last_top: f32,
}

impl<P: HeightProvider> MasonryLayout<P> {
    /// Create a layout with the given config and height provider.
    ///
    /// # Errors
    /// Returns an error if the config does not validate.
    pub fn new(config: LayoutConfig, provider: P) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            provider,
            cache: AttributeCache::new(),
            prepared: false,
            last_bounds: Rect::ZERO,
            content_width: 0.0,
            content_height: 0.0,
            column_width: 0.0,
            x_offsets: Vec::new(),
            y_offsets: Vec::new(),
            column: 0,
            last_top: 0.0,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the config. The cache is discarded.
    ///
    /// # Errors
    /// Returns an error (and keeps the current config) if `config` does not
    /// validate.
    pub fn set_config(&mut self, config: LayoutConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.invalidate();
        Ok(())
    }

    pub fn height_provider(&self) -> &P {
        &self.provider
    }

    /// Swap the height provider. The cache is discarded.
    pub fn set_height_provider(&mut self, provider: P) {
        self.provider = provider;
        self.invalidate();
    }

    /// True once a pass has populated the cache and no invalidation happened since
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Run a layout pass against `host`.
    ///
    /// Does nothing if the cache is already populated; call
    /// [`invalidate`](Self::invalidate) first to force a recomputation.
    pub fn prepare<H: LayoutHost + ?Sized>(&mut self, host: &H) {
        if self.prepared {
            return;
        }

        let sections = host.section_count();
        let _span = debug_span!("masonry_prepare", sections).entered();

        self.reset(host);

        for section in 0..sections {
            self.place_supplementary(SupplementaryKind::Header, section);
            self.begin_section();
            for item in 0..host.item_count(section) {
                self.place_cell(ElementRef::new(section, item));
            }
            self.place_supplementary(SupplementaryKind::Footer, section);
        }

        self.prepared = true;
        debug!(
            elements = self.cache.len(),
            content_width = self.content_width,
            content_height = self.content_height,
            "layout pass complete"
        );
    }

    /// Decide how to react to new viewport bounds.
    ///
    /// Always returns `true` so the host re-queries the layout. The cache is
    /// only discarded when the size changed; a pure scroll (origin change)
    /// keeps every cached frame.
    pub fn should_invalidate(&mut self, new_bounds: Rect) -> bool {
        if !new_bounds.size().same_as(&self.last_bounds.size()) {
            debug!(
                old_width = self.last_bounds.width,
                old_height = self.last_bounds.height,
                new_width = new_bounds.width,
                new_height = new_bounds.height,
                "viewport resized, discarding layout"
            );
            self.invalidate();
        }
        true
    }

    /// Discard all cached geometry; the next pass recomputes from scratch.
    pub fn invalidate(&mut self) {
        self.cache.clear();
        self.prepared = false;
    }

    /// Total size of the laid out content (zero height before the first pass)
    pub fn content_size(&self) -> Size {
        Size::new(self.content_width, self.content_height)
    }

    /// Width of one column in the last pass
    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    /// Cached header or footer of a section.
    ///
    /// `None` if the section does not exist, the element was suppressed by an
    /// empty reference size, or no pass has run.
    pub fn supplementary_attributes(
        &self,
        kind: SupplementaryKind,
        reference: ElementRef,
    ) -> Option<&LayoutAttributes> {
        self.cache.get(kind.into(), reference)
    }

    /// Cached attributes of a cell, `None` if out of range or not laid out
    pub fn cell_attributes(&self, reference: ElementRef) -> Option<&LayoutAttributes> {
        self.cache.get(ElementKind::Cell, reference)
    }

    /// Every cached element whose frame intersects `rect`
    pub fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        self.cache.intersecting(&rect)
    }

    /// Every cached element: headers, then cells, then footers
    pub fn attributes(&self) -> impl Iterator<Item = &LayoutAttributes> {
        self.cache.iter()
    }

    /// Number of cached elements
    pub fn element_count(&self) -> usize {
        self.cache.len()
    }

    fn reset<H: LayoutHost + ?Sized>(&mut self, host: &H) {
        self.cache.clear();
        self.content_height = 0.0;
        self.last_bounds = host.bounds();
        self.content_width = self
            .last_bounds
            .inset_by_edges(host.content_insets())
            .width;

        let columns = self.config.column_count.max(1);
        self.column_width = self.content_width / columns as f32;
        self.x_offsets = (0..columns)
            .map(|column| column as f32 * self.column_width)
            .collect();
        self.y_offsets = vec![supplementary_height(self.config.header_size); columns];
        self.column = 0;
        self.last_top = 0.0;
    }

    /// Level every column at the current content height and restart at the
    /// first column.
    fn begin_section(&mut self) {
        let top = self.content_height;
        self.y_offsets.fill(top);
        self.column = 0;
        self.last_top = top;
    }

    fn place_supplementary(&mut self, kind: SupplementaryKind, section: usize) {
        let size = match kind {
            SupplementaryKind::Header => self.config.header_size,
            SupplementaryKind::Footer => self.config.footer_size,
        };
        if size.is_empty() {
            return;
        }
        let frame = Rect::new(0.0, self.content_height, self.content_width, size.height);
        self.cache.insert(LayoutAttributes::new(
            kind.into(),
            ElementRef::supplementary(kind, section),
            frame,
        ));
        self.content_height += size.height;
    }

    fn place_cell(&mut self, reference: ElementRef) {
        let columns = self.y_offsets.len();
        let column = self.column;
        let mut height = self.cell_height(reference);
        let mut top = self.column_offset(column);

        // Last column of a row: stretch the pair to the taller card and
        // patch the card already placed in the previous column.
        let previous = reference
            .item
            .checked_sub(1)
            .zip(column.checked_sub(1))
            .filter(|_| columns > 1 && column == columns - 1);
        if let Some((previous_item, previous_column)) = previous {
            let previous_ref = ElementRef::new(reference.section, previous_item);
            let previous_height = self.cell_height(previous_ref);

            top = top.max(self.last_top);
            height = height.max(previous_height);

            self.write_cell(previous_ref, previous_column, top, height);
            self.set_column_offset(previous_column, top + height);
            trace!(
                section = reference.section,
                item = previous_item,
                height,
                "stretched row partner"
            );
        }

        self.write_cell(reference, column, top, height);
        self.content_height = self.content_height.max(top + height);
        self.set_column_offset(column, top + height);
        self.last_top = top;
        self.column = if column + 1 >= columns { 0 } else { column + 1 };
    }

    /// Insert or patch the cached frame of a cell occupying the slot
    /// `(column, top, height)` before padding.
    fn write_cell(&mut self, reference: ElementRef, column: usize, top: f32, height: f32) {
        let x = self.x_offsets.get(column).copied().unwrap_or(0.0);
        let padding = self.config.cell_padding;
        let frame = Rect::new(x, top, self.column_width, height).inset_by(padding, padding);

        match self.cache.get_mut(ElementKind::Cell, reference) {
            Some(existing) => existing.frame = frame,
            None => self
                .cache
                .insert(LayoutAttributes::new(ElementKind::Cell, reference, frame)),
        }
    }

    /// Slot height of a card: its measured content plus padding on both sides
    fn cell_height(&self, reference: ElementRef) -> f32 {
        let measured = self.provider.height_for_item(reference);
        let content = if measured.is_finite() && measured >= 0.0 {
            measured
        } else {
            warn!(
                section = reference.section,
                item = reference.item,
                measured,
                "height provider returned an unusable height, using 0"
            );
            0.0
        };
        2.0 * self.config.cell_padding + content
    }

    fn column_offset(&self, column: usize) -> f32 {
        self.y_offsets
            .get(column)
            .copied()
            .unwrap_or(self.content_height)
    }

    fn set_column_offset(&mut self, column: usize, value: f32) {
        if let Some(offset) = self.y_offsets.get_mut(column) {
            *offset = value;
        }
    }
}

fn supplementary_height(size: Size) -> f32 {
    if size.is_empty() {
        0.0
    } else {
        size.height
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::host::StaticCollection;

    fn collection(width: f32, sections: Vec<Vec<f32>>) -> StaticCollection {
        StaticCollection::new(Rect::new(0.0, 0.0, width, 800.0), sections)
    }

    fn layout_for(
        config: LayoutConfig,
        host: &StaticCollection,
    ) -> MasonryLayout<StaticCollection> {
        let mut layout = MasonryLayout::new(config, host.clone()).unwrap();
        layout.prepare(host);
        layout
    }

    #[test]
    fn test_single_card_uses_own_height() {
        let host = collection(300.0, vec![vec![100.0]]);
        let layout = layout_for(LayoutConfig::default(), &host);

        let cell = layout.cell_attributes(ElementRef::new(0, 0)).unwrap();
        assert_eq!(cell.frame, Rect::new(6.0, 6.0, 138.0, 100.0));
        assert_eq!(layout.content_size(), Size::new(300.0, 112.0));
    }

    #[test]
    fn test_row_pair_stretches_shorter_card() {
        let host = collection(300.0, vec![vec![50.0, 100.0]]);
        let layout = layout_for(LayoutConfig::default(), &host);

        let first = layout.cell_attributes(ElementRef::new(0, 0)).unwrap();
        let second = layout.cell_attributes(ElementRef::new(0, 1)).unwrap();
        assert_eq!(first.frame, Rect::new(6.0, 6.0, 138.0, 100.0));
        assert_eq!(second.frame, Rect::new(156.0, 6.0, 138.0, 100.0));
    }

    #[test]
    fn test_single_column_never_pairs() {
        let host = collection(300.0, vec![vec![10.0, 20.0, 30.0]]);
        let config = LayoutConfig::default()
            .with_column_count(1)
            .with_cell_padding(0.0);
        let layout = layout_for(config, &host);

        let tops: Vec<f32> = (0..3)
            .map(|item| layout.cell_attributes(ElementRef::new(0, item)).unwrap().frame.y)
            .collect();
        assert_eq!(tops, vec![0.0, 10.0, 30.0]);
        assert_eq!(layout.cell_attributes(ElementRef::new(0, 0)).unwrap().frame.height, 10.0);
        assert_eq!(layout.content_size().height, 60.0);
    }

    #[test]
    fn test_unusable_heights_become_zero() {
        let provider = |r: ElementRef| if r.item == 0 { f32::NAN } else { -5.0 };
        let host = collection(300.0, vec![vec![0.0, 0.0]]);
        let mut layout = MasonryLayout::new(LayoutConfig::default(), provider).unwrap();
        layout.prepare(&host);

        let cell = layout.cell_attributes(ElementRef::new(0, 0)).unwrap();
        assert_eq!(cell.frame.height, 0.0);
        assert_eq!(layout.content_size().height, 12.0);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let result = MasonryLayout::new(
            LayoutConfig::default().with_column_count(0),
            |_: ElementRef| 1.0_f32,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_set_config_invalidates() {
        let host = collection(300.0, vec![vec![100.0]]);
        let mut layout = layout_for(LayoutConfig::default(), &host);
        assert!(layout.is_prepared());

        layout
            .set_config(LayoutConfig::default().with_column_count(3))
            .unwrap();
        assert!(!layout.is_prepared());
        assert_eq!(layout.element_count(), 0);

        layout.prepare(&host);
        assert_eq!(layout.column_width(), 100.0);
    }

    #[test]
    fn test_rejected_config_keeps_layout() {
        let host = collection(300.0, vec![vec![100.0]]);
        let mut layout = layout_for(LayoutConfig::default(), &host);

        assert!(layout
            .set_config(LayoutConfig::default().with_cell_padding(f32::INFINITY))
            .is_err());
        assert!(layout.is_prepared());
        assert_eq!(layout.config().cell_padding, 6.0);
    }

    #[test]
    fn test_content_width_respects_insets() {
        let host = collection(320.0, vec![vec![10.0, 10.0]])
            .with_insets(crate::geometry::EdgeInsets::new(0.0, 10.0, 0.0, 10.0));
        let layout = layout_for(LayoutConfig::default(), &host);

        assert_eq!(layout.content_size().width, 300.0);
        assert_eq!(layout.column_width(), 150.0);
        let second = layout.cell_attributes(ElementRef::new(0, 1)).unwrap();
        assert_eq!(second.frame.x, 156.0);
    }
}
