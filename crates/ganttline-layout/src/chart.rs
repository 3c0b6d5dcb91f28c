//! Chart session
//!
//! A `GanttChart` owns one project, its expansion state, the zoom level and
//! the last published `ChartState`. Every command runs a complete
//! flatten → layout → route cycle and replaces the published state only when
//! the cycle succeeds, so readers never observe a half-updated chart.

use chrono::NaiveDate;
use ganttline_core::Project;
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::layout::{ChartLayout, LayoutEngine, Timeline};
use crate::routing::{ConnectionRouter, Route};
use crate::tree::ActivityTree;
use crate::zoom::ZoomControl;
use crate::LayoutError;

/// Result of one cycle: visible rows with geometry, and their connectors
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartState {
    pub project_name: String,
    pub layout: ChartLayout,
    pub routes: Vec<Route>,
}

/// Interactive chart over a single project
#[derive(Clone, Debug)]
pub struct GanttChart {
    tree: ActivityTree,
    timeline: Timeline,
    config: LayoutConfig,
    zoom: ZoomControl,
    today: NaiveDate,
    state: ChartState,
}

impl GanttChart {
    /// Build a chart whose today marker follows the local calendar date
    pub fn new(project: Project, config: LayoutConfig) -> Result<Self, LayoutError> {
        Self::with_today(project, config, chrono::Local::now().date_naive())
    }

    /// Build a chart with an explicit "today"
    pub fn with_today(
        project: Project,
        config: LayoutConfig,
        today: NaiveDate,
    ) -> Result<Self, LayoutError> {
        config.validate()?;
        let timeline = Timeline::new(project.bounds()?);
        let tree = ActivityTree::new(project);
        let zoom = ZoomControl::new();
        let state = compute(&tree, &timeline, &config, zoom.level(), today)?;

        Ok(Self {
            tree,
            timeline,
            config,
            zoom,
            today,
            state,
        })
    }

    /// Last published state
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn tree(&self) -> &ActivityTree {
        &self.tree
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn zoom(&self) -> f64 {
        self.zoom.level()
    }

    /// Expand or collapse an activity.
    ///
    /// Unknown ids leave the chart untouched.
    pub fn toggle_activity(&mut self, id: &str) -> Result<&ChartState, LayoutError> {
        if !self.tree.toggle(id) {
            return Ok(&self.state);
        }
        match self.recompute(self.zoom.level()) {
            Ok(()) => Ok(&self.state),
            Err(err) => {
                // Keep the expansion set in step with the published state
                self.tree.toggle(id);
                Err(err)
            }
        }
    }

    /// Apply an arbitrary positive zoom multiplier.
    ///
    /// The multiplier is used as given; the button clamp does not apply here.
    pub fn set_zoom(&mut self, multiplier: f64) -> Result<&ChartState, LayoutError> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            tracing::warn!(multiplier, "rejected zoom multiplier");
            return Err(LayoutError::InvalidZoom(multiplier));
        }
        self.recompute(multiplier)?;
        self.zoom.jump_to(multiplier);
        Ok(&self.state)
    }

    pub fn zoom_in(&mut self) -> Result<&ChartState, LayoutError> {
        let mut control = self.zoom;
        control.zoom_in();
        self.apply_control(control)
    }

    pub fn zoom_out(&mut self) -> Result<&ChartState, LayoutError> {
        let mut control = self.zoom;
        control.zoom_out();
        self.apply_control(control)
    }

    pub fn reset_zoom(&mut self) -> Result<&ChartState, LayoutError> {
        let mut control = self.zoom;
        control.reset();
        self.apply_control(control)
    }

    /// Replace the layout configuration and relayout.
    ///
    /// An invalid configuration leaves the chart untouched.
    pub fn set_config(&mut self, config: LayoutConfig) -> Result<&ChartState, LayoutError> {
        config.validate()?;
        let state = compute(&self.tree, &self.timeline, &config, self.zoom.level(), self.today)?;
        self.config = config;
        self.state = state;
        Ok(&self.state)
    }

    /// Move the today marker
    pub fn set_today(&mut self, today: NaiveDate) -> Result<&ChartState, LayoutError> {
        let state = compute(&self.tree, &self.timeline, &self.config, self.zoom.level(), today)?;
        self.today = today;
        self.state = state;
        Ok(&self.state)
    }

    fn apply_control(&mut self, control: ZoomControl) -> Result<&ChartState, LayoutError> {
        self.recompute(control.level())?;
        self.zoom = control;
        Ok(&self.state)
    }

    fn recompute(&mut self, zoom: f64) -> Result<(), LayoutError> {
        self.state = compute(&self.tree, &self.timeline, &self.config, zoom, self.today)?;
        Ok(())
    }
}

/// One full flatten → layout → route cycle
fn compute(
    tree: &ActivityTree,
    timeline: &Timeline,
    config: &LayoutConfig,
    zoom: f64,
    today: NaiveDate,
) -> Result<ChartState, LayoutError> {
    let layout = LayoutEngine::new(config).layout(tree, timeline, zoom, today)?;
    let routes = ConnectionRouter::new(config.route_offset).route(&layout.rows);
    tracing::debug!(
        rows = layout.rows.len(),
        routes = routes.len(),
        zoom,
        "chart cycle complete"
    );
    Ok(ChartState {
        project_name: tree.project().name.clone(),
        layout,
        routes,
    })
}
