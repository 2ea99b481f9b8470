//! Per-kind storage for computed layout attributes.

use std::collections::BTreeMap;

use crate::element::{ElementKind, ElementRef, LayoutAttributes};
use crate::geometry::Rect;

type Partition = BTreeMap<ElementRef, LayoutAttributes>;

/// Cached attributes, one map per element kind.
///
/// Maps are ordered by reference so that iteration (and therefore every
/// query result) is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeCache {
    headers: Partition,
    footers: Partition,
    cells: Partition,
}

impl AttributeCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn partition(&self, kind: ElementKind) -> &Partition {
        match kind {
            ElementKind::SectionHeader => &self.headers,
            ElementKind::SectionFooter => &self.footers,
            ElementKind::Cell => &self.cells,
        }
    }

    fn partition_mut(&mut self, kind: ElementKind) -> &mut Partition {
        match kind {
            ElementKind::SectionHeader => &mut self.headers,
            ElementKind::SectionFooter => &mut self.footers,
            ElementKind::Cell => &mut self.cells,
        }
    }

    /// Drop every entry of every kind
    pub fn clear(&mut self) {
        self.headers.clear();
        self.footers.clear();
        self.cells.clear();
    }

    /// Store attributes under their own kind and reference, replacing any
    /// previous entry.
    pub fn insert(&mut self, attributes: LayoutAttributes) {
        self.partition_mut(attributes.kind)
            .insert(attributes.reference, attributes);
    }

    pub fn get(&self, kind: ElementKind, reference: ElementRef) -> Option<&LayoutAttributes> {
        self.partition(kind).get(&reference)
    }

    /// Mutable access for patching an entry in place
    pub fn get_mut(
        &mut self,
        kind: ElementKind,
        reference: ElementRef,
    ) -> Option<&mut LayoutAttributes> {
        self.partition_mut(kind).get_mut(&reference)
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.footers.is_empty() && self.cells.is_empty()
    }

    /// Total number of cached elements
    pub fn len(&self) -> usize {
        self.headers.len() + self.footers.len() + self.cells.len()
    }

    /// Number of cached elements of one kind
    pub fn len_of(&self, kind: ElementKind) -> usize {
        self.partition(kind).len()
    }

    /// Every cached element: headers, then cells, then footers.
    pub fn iter(&self) -> impl Iterator<Item = &LayoutAttributes> {
        self.headers
            .values()
            .chain(self.cells.values())
            .chain(self.footers.values())
    }

    /// Elements whose frame intersects `rect`.
    ///
    /// Full scan over every partition.
    pub fn intersecting(&self, rect: &Rect) -> Vec<LayoutAttributes> {
        self.iter()
            .filter(|attributes| attributes.frame.intersects(rect))
            .copied()
            .collect()
    }
}
