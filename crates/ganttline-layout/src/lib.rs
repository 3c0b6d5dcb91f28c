//! # ganttline-layout
//!
//! Layout engine turning an activity tree into chart geometry.
//!
//! This crate provides:
//! - Hierarchical flattening with expand/collapse state (`tree`)
//! - Day-axis projection of bars, milestones and timeline headers (`layout`)
//! - Orthogonal dependency connector routing (`routing`)
//! - A chart session that runs the flatten → layout → route cycle on every
//!   command (`chart`)
//!
//! ## Example
//!
//! ```rust
//! use ganttline_core::{Activity, Project};
//! use ganttline_layout::{GanttChart, LayoutConfig};
//!
//! let mut project = Project::new("Demo", "2024-01-01", "2024-01-10");
//! project.activities.push(Activity::new("T1").dates("2024-01-02", "2024-01-04"));
//! project.activities.push(Activity::new("M1").milestone("2024-01-05").depends_on("T1"));
//!
//! let mut chart = GanttChart::new(project, LayoutConfig::default())?;
//! assert_eq!(chart.state().layout.rows.len(), 2);
//! assert_eq!(chart.state().routes.len(), 1);
//!
//! chart.set_zoom(2.0)?;
//! assert_eq!(chart.state().layout.zoom, 2.0);
//! # Ok::<(), ganttline_layout::LayoutError>(())
//! ```

pub mod chart;
pub mod config;
pub mod geometry;
pub mod layout;
pub mod routing;
pub mod tree;
pub mod zoom;

pub use chart::{ChartState, GanttChart};
pub use config::LayoutConfig;
pub use geometry::{Point, Rect};
pub use layout::{
    BarGeometry, ChartLayout, DayCell, Geometry, LayoutEngine, MilestoneGeometry, MonthBlock,
    RowLayout, Timeline,
};
pub use routing::{ConnectionRouter, Route, RouteShape};
pub use tree::{effective_range, effective_ranges, ActivityTree, FlatRow, RangeTable};
pub use zoom::ZoomControl;

use ganttline_core::{ActivityId, DateError, LoadError};
use thiserror::Error;

/// Error raised by a layout cycle or a chart command
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Activity '{activity}' has an invalid date: {source}")]
    Date {
        activity: ActivityId,
        #[source]
        source: DateError,
    },

    #[error(transparent)]
    Project(#[from] LoadError),

    #[error("Zoom multiplier must be positive and finite, got {0}")]
    InvalidZoom(f64),

    #[error("Cell width must be positive and finite, got {0}")]
    InvalidCellWidth(f64),
}
