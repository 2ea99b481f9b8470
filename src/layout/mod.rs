//! Masonry layout engine and its attribute cache.
//!
//! This module handles:
//! - Placing section headers, cards and footers into shortest-column order
//! - Caching computed frames until the viewport size changes
//! - Answering per-element and visible-rectangle queries from the cache

mod cache;
mod masonry;

pub use cache::AttributeCache;
pub use masonry::MasonryLayout;
