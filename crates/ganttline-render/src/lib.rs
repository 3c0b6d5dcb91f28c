//! # ganttline-render
//!
//! Render consumers for computed chart state.
//!
//! This crate provides:
//! - A standalone SVG document of the whole chart (`chart`)
//! - Connector path data for any vector target (`connector`)
//! - Tooltip content for a row (`tooltip`)
//! - A single error view replacing the chart when loading fails
//!
//! ## Example
//!
//! ```rust
//! use ganttline_core::{Activity, Project};
//! use ganttline_layout::{GanttChart, LayoutConfig};
//! use ganttline_render::{Renderer, SvgRenderer};
//!
//! let mut project = Project::new("Demo", "2024-01-01", "2024-01-10");
//! project.activities.push(Activity::new("T1").dates("2024-01-02", "2024-01-04"));
//!
//! let chart = GanttChart::new(project, LayoutConfig::default())?;
//! let svg = SvgRenderer::new().render(chart.state())?;
//! assert!(svg.starts_with("<svg"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod chart;
pub mod connector;
pub mod tooltip;

pub use chart::{SvgRenderer, SvgTheme};
pub use connector::path_data;
pub use tooltip::TooltipContent;

use ganttline_layout::ChartState;
use thiserror::Error;

/// Turns a computed chart state into some output format
pub trait Renderer {
    type Output;

    fn render(&self, state: &ChartState) -> Result<Self::Output, RenderError>;
}

/// Error raised while rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Output formatting failed: {0}")]
    Format(String),

    #[error("Nothing to render: {0}")]
    InvalidData(String),
}
