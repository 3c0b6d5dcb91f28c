//! Layout configuration
//!
//! Every dimension is in pixels at zoom 1. Only the horizontal day axis is
//! scaled by zoom; row heights and bar heights are fixed.

use ganttline_core::DateLocale;
use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// Chart dimensions and display options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Width of one day cell
    pub cell_width: f64,
    /// Height of one activity row
    pub row_height: f64,
    /// Height of a task bar
    pub bar_height: f64,
    /// Height of a collapsed top-level parent bar
    pub parent_bar_height: f64,
    /// Offset of bars from the top of their row
    pub bar_top: f64,
    /// Milestone marker size (scaled by zoom)
    pub milestone_size: f64,
    /// Offset of milestone markers from the top of their row
    pub milestone_top: f64,
    /// Sidebar indentation per depth level
    pub indent_per_level: f64,
    /// Length of the horizontal connector stubs
    pub route_offset: f64,
    /// Locale for header labels
    pub locale: DateLocale,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_width: 50.0,
            row_height: 40.0,
            bar_height: 18.0,
            parent_bar_height: 22.0,
            bar_top: 1.0,
            milestone_size: 16.0,
            milestone_top: 2.0,
            indent_per_level: 30.0,
            route_offset: 20.0,
            locale: DateLocale::Es,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure day cell width
    pub fn cell_width(mut self, width: f64) -> Self {
        self.cell_width = width;
        self
    }

    /// Configure row height
    pub fn row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    /// Configure connector stub length
    pub fn route_offset(mut self, offset: f64) -> Self {
        self.route_offset = offset;
        self
    }

    /// Use English header labels
    pub fn english(mut self) -> Self {
        self.locale = DateLocale::En;
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.cell_width.is_finite() && self.cell_width > 0.0) {
            return Err(LayoutError::InvalidCellWidth(self.cell_width));
        }
        Ok(())
    }
}
