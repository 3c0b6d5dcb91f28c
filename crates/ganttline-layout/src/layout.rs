//! Day-axis layout
//!
//! Every horizontal position is `day_index × cell_width × zoom`, measured from
//! the project's first day. Zoom rescales that one axis and nothing else, so
//! doubling the zoom doubles every left offset and width while rows stay where
//! they are.
//!
//! Vertical positions are row-based: row `i` occupies
//! `[i × row_height, (i + 1) × row_height)`.

use chrono::{Datelike, NaiveDate};
use ganttline_core::dates::{calendar_days, day_index};
use ganttline_core::{Activity, ActivityId, ActivityKind, Avatar, DateRange, Status};
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::geometry::Rect;
use crate::tree::{effective_ranges, ActivityTree, FlatRow, RangeTable};
use crate::LayoutError;

/// Calendar days covered by the chart
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    pub bounds: DateRange,
    pub days: Vec<NaiveDate>,
}

impl Timeline {
    pub fn new(bounds: DateRange) -> Self {
        Self {
            bounds,
            days: calendar_days(bounds.start, bounds.end),
        }
    }

    /// First day, column 0
    pub fn origin(&self) -> NaiveDate {
        self.bounds.start
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }
}

/// Duration bar of a task (or of a parent whose children are hidden)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarGeometry {
    pub left: f64,
    pub width: f64,
    /// Offset from the row top
    pub top: f64,
    pub height: f64,
    /// Width of the completed portion
    pub progress_width: f64,
    /// Collapsed top-level parent, drawn taller and without progress
    pub parent: bool,
}

/// Milestone marker, anchored at its visual center
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneGeometry {
    pub center_x: f64,
    pub size: f64,
    /// Offset from the row top
    pub top: f64,
}

impl MilestoneGeometry {
    /// Left edge of the rendered marker
    pub fn left(&self) -> f64 {
        self.center_x - self.size / 2.0
    }
}

/// What a row draws on the timeline
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Geometry {
    Bar(BarGeometry),
    Milestone(MilestoneGeometry),
}

impl Geometry {
    /// Bounding box in chart coordinates for a row starting at `row_y`
    pub fn bounds(&self, row_y: f64) -> Rect {
        match self {
            Geometry::Bar(bar) => Rect::new(bar.left, row_y + bar.top, bar.width, bar.height),
            Geometry::Milestone(marker) => Rect::new(
                marker.left(),
                row_y + marker.top,
                marker.size,
                marker.size,
            ),
        }
    }
}

/// One visible row with its sidebar data and timeline geometry
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowLayout {
    pub index: usize,
    pub id: ActivityId,
    pub name: String,
    pub depth: usize,
    /// Sidebar indentation
    pub indent: f64,
    /// Top of the row
    pub y: f64,
    pub kind: ActivityKind,
    pub has_children: bool,
    pub expanded: bool,
    /// Hidden while the row's children are visible
    pub status: Option<Status>,
    pub progress: u8,
    pub color: String,
    pub range: DateRange,
    /// Authored date strings, shown verbatim in the sidebar
    pub start_label: String,
    pub end_label: String,
    pub assignee_name: Option<String>,
    pub assignee_role: Option<String>,
    pub avatar: Option<Avatar>,
    pub description: Option<String>,
    pub dependencies: Vec<ActivityId>,
    /// `None` when the row's children are visible
    pub geometry: Option<Geometry>,
}

impl RowLayout {
    /// Bounding box of the row's bar or marker
    pub fn bounds(&self) -> Option<Rect> {
        self.geometry.map(|g| g.bounds(self.y))
    }
}

/// A day column in the header
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub label: String,
    pub left: f64,
}

/// A run of consecutive days sharing one month label
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBlock {
    pub label: String,
    pub left: f64,
    pub width: f64,
    pub days: Vec<DayCell>,
}

/// Complete geometry of one layout pass
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    pub zoom: f64,
    /// Width of one day at this zoom
    pub day_width: f64,
    pub row_height: f64,
    pub day_count: usize,
    pub timeline_width: f64,
    pub total_height: f64,
    pub header: Vec<MonthBlock>,
    /// Left offset of each day's grid line
    pub grid_lines: Vec<f64>,
    /// Day index of today (may fall outside the chart)
    pub today_index: i64,
    /// Offset of the today marker when today falls inside the chart
    pub today_offset: Option<f64>,
    pub rows: Vec<RowLayout>,
}

/// Projects flattened rows onto the day axis
#[derive(Clone, Copy, Debug)]
pub struct LayoutEngine<'a> {
    config: &'a LayoutConfig,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Pixels per day at `zoom`
    pub fn day_width(&self, zoom: f64) -> f64 {
        self.config.cell_width * zoom
    }

    /// Lay out the tree's current visible rows
    pub fn layout(
        &self,
        tree: &ActivityTree,
        timeline: &Timeline,
        zoom: f64,
        today: NaiveDate,
    ) -> Result<ChartLayout, LayoutError> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(LayoutError::InvalidZoom(zoom));
        }
        self.config.validate()?;

        let ranges = effective_ranges(&tree.project().activities)?;
        let rows: Vec<RowLayout> = tree
            .flatten()
            .into_iter()
            .enumerate()
            .map(|(index, row)| self.row_layout(tree, index, row, &ranges, timeline.origin(), zoom))
            .collect();

        let day_width = self.day_width(zoom);
        let today_index = day_index(timeline.origin(), today);
        let today_offset = (today_index >= 0 && (today_index as usize) < timeline.day_count())
            .then(|| today_index as f64 * day_width);

        tracing::debug!(
            rows = rows.len(),
            days = timeline.day_count(),
            zoom,
            "layout pass complete"
        );

        Ok(ChartLayout {
            zoom,
            day_width,
            row_height: self.config.row_height,
            day_count: timeline.day_count(),
            timeline_width: timeline.day_count() as f64 * day_width,
            total_height: rows.len() as f64 * self.config.row_height,
            header: self.header_blocks(timeline, zoom),
            grid_lines: (0..timeline.day_count())
                .map(|i| i as f64 * day_width)
                .collect(),
            today_index,
            today_offset,
            rows,
        })
    }

    fn row_layout(
        &self,
        tree: &ActivityTree,
        index: usize,
        row: FlatRow<'_>,
        ranges: &RangeTable<'_>,
        origin: NaiveDate,
        zoom: f64,
    ) -> RowLayout {
        let activity = row.activity;
        let children_visible = tree.shows_children(activity);
        // Every activity in the tree was visited by `effective_ranges`
        let range = ranges[activity.id.as_str()];

        RowLayout {
            index,
            id: activity.id.clone(),
            name: activity.name.clone(),
            depth: row.depth,
            indent: row.depth as f64 * self.config.indent_per_level,
            y: index as f64 * self.config.row_height,
            kind: activity.kind,
            has_children: activity.has_children(),
            expanded: children_visible,
            status: (!children_visible).then(|| activity.effective_status()),
            progress: activity.progress,
            color: activity.color.clone(),
            range,
            start_label: activity.start_date.clone(),
            end_label: activity.end_date.clone(),
            assignee_name: activity.assignee_name.clone(),
            assignee_role: activity.assignee_role.clone(),
            avatar: activity.assignee_avatar(),
            description: activity.description.clone(),
            dependencies: activity.dependencies.clone(),
            geometry: (!children_visible)
                .then(|| self.geometry(activity, row.depth, range, origin, zoom)),
        }
    }

    /// Bar or marker for an activity whose children are not visible
    pub fn geometry(
        &self,
        activity: &Activity,
        depth: usize,
        range: DateRange,
        origin: NaiveDate,
        zoom: f64,
    ) -> Geometry {
        let day_width = self.day_width(zoom);
        let start = day_index(origin, range.start) as f64 * day_width;

        match activity.kind {
            ActivityKind::Milestone => Geometry::Milestone(MilestoneGeometry {
                center_x: start,
                size: self.config.milestone_size * zoom,
                top: self.config.milestone_top,
            }),
            ActivityKind::Task => {
                let width = range.inclusive_days() as f64 * day_width;
                let parent = activity.has_children() && depth == 0;
                let progress_width = if parent {
                    0.0
                } else {
                    width * f64::from(activity.progress.min(100)) / 100.0
                };
                Geometry::Bar(BarGeometry {
                    left: start,
                    width,
                    top: self.config.bar_top,
                    height: if parent {
                        self.config.parent_bar_height
                    } else {
                        self.config.bar_height
                    },
                    progress_width,
                    parent,
                })
            }
        }
    }

    /// Group the timeline's days into month runs
    pub fn header_blocks(&self, timeline: &Timeline, zoom: f64) -> Vec<MonthBlock> {
        let day_width = self.day_width(zoom);
        let mut blocks: Vec<MonthBlock> = Vec::new();
        let mut current_label: Option<String> = None;

        for (index, day) in timeline.days.iter().enumerate() {
            let label = self.config.locale.format_month_year(*day);
            let left = index as f64 * day_width;

            if current_label.as_deref() != Some(label.as_str()) {
                blocks.push(MonthBlock {
                    label: label.clone(),
                    left,
                    width: 0.0,
                    days: Vec::new(),
                });
                current_label = Some(label);
            }

            if let Some(block) = blocks.last_mut() {
                block.width += day_width;
                block.days.push(DayCell {
                    date: *day,
                    label: day.day().to_string(),
                    left,
                });
            }
        }

        blocks
    }
}
