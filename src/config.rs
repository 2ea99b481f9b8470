//! Layout configuration.
//!
//! Configs are plain serde structs so they can come from JSON documents,
//! the CLI, or a JS object through the WASM binding.

use serde::{Deserialize, Serialize};

use crate::error::{MasonryError, Result};
use crate::geometry::Size;

/// Default number of columns
pub const DEFAULT_COLUMN_COUNT: usize = 2;

/// Default inset applied to every side of a cell (pixels)
pub const DEFAULT_CELL_PADDING: f32 = 6.0;

/// Tunable parameters of the masonry layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Number of columns cards are distributed across
    pub column_count: usize,
    /// Inset applied to all sides of a cell frame
    pub cell_padding: f32,
    /// Reference size of each section header. Only the height is used for
    /// placement; an empty size suppresses headers entirely.
    pub header_size: Size,
    /// Reference size of each section footer (same rules as the header)
    pub footer_size: Size,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_count: DEFAULT_COLUMN_COUNT,
            cell_padding: DEFAULT_CELL_PADDING,
            header_size: Size::ZERO,
            footer_size: Size::ZERO,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_column_count(mut self, column_count: usize) -> Self {
        self.column_count = column_count;
        self
    }

    #[must_use]
    pub fn with_cell_padding(mut self, cell_padding: f32) -> Self {
        self.cell_padding = cell_padding;
        self
    }

    #[must_use]
    pub fn with_header_size(mut self, header_size: Size) -> Self {
        self.header_size = header_size;
        self
    }

    #[must_use]
    pub fn with_footer_size(mut self, footer_size: Size) -> Self {
        self.footer_size = footer_size;
        self
    }

    /// Check that every value is usable by the layout pass.
    ///
    /// # Errors
    /// Returns an error for a zero column count, or for a padding or
    /// supplementary size that is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.column_count == 0 {
            return Err(MasonryError::InvalidColumnCount(self.column_count));
        }
        check_length("cell_padding", self.cell_padding)?;
        check_length("header_size.width", self.header_size.width)?;
        check_length("header_size.height", self.header_size.height)?;
        check_length("footer_size.width", self.footer_size.width)?;
        check_length("footer_size.height", self.footer_size.height)?;
        Ok(())
    }

    /// Parse a config from JSON and validate it.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the config is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_length(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(MasonryError::InvalidConfig(format!(
            "{name} is not finite: {value}"
        )));
    }
    if value < 0.0 {
        return Err(MasonryError::InvalidConfig(format!(
            "{name} is negative: {value}"
        )));
    }
    Ok(())
}
