//! Element identity and computed layout attributes.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Which kind of element a set of attributes describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    SectionHeader,
    SectionFooter,
    Cell,
}

/// Tag for the two supplementary (non-cell) element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SupplementaryKind {
    Header,
    Footer,
}

impl From<SupplementaryKind> for ElementKind {
    fn from(kind: SupplementaryKind) -> Self {
        match kind {
            SupplementaryKind::Header => ElementKind::SectionHeader,
            SupplementaryKind::Footer => ElementKind::SectionFooter,
        }
    }
}

/// (section, item) pair identifying a header, footer or cell.
///
/// Headers and footers use a reserved item index within their section:
/// 0 for the header and 1 for the footer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct ElementRef {
    pub section: usize,
    pub item: usize,
}

impl ElementRef {
    pub const HEADER_ITEM: usize = 0;
    pub const FOOTER_ITEM: usize = 1;

    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Reference of the header of `section`
    pub const fn header(section: usize) -> Self {
        Self::new(section, Self::HEADER_ITEM)
    }

    /// Reference of the footer of `section`
    pub const fn footer(section: usize) -> Self {
        Self::new(section, Self::FOOTER_ITEM)
    }

    /// Reference of the supplementary element of `kind` in `section`
    pub const fn supplementary(kind: SupplementaryKind, section: usize) -> Self {
        match kind {
            SupplementaryKind::Header => Self::header(section),
            SupplementaryKind::Footer => Self::footer(section),
        }
    }
}

/// Computed geometry for one element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutAttributes {
    pub kind: ElementKind,
    pub reference: ElementRef,
    /// Frame in content coordinates. Cells are already inset by the padding.
    pub frame: Rect,
}

impl LayoutAttributes {
    pub fn new(kind: ElementKind, reference: ElementRef, frame: Rect) -> Self {
        Self {
            kind,
            reference,
            frame,
        }
    }
}
