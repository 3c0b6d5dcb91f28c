//! # ganttline-core
//!
//! Core activity model for the ganttline Gantt chart engine.
//!
//! This crate provides:
//! - Domain types: `Project`, `Activity`, `ActivityKind`, `Status`
//! - Date projection onto the day axis (`dates`)
//! - The JSON load interface used by host pages
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use ganttline_core::{Activity, Project};
//!
//! let mut project = Project::new("Website", "2024-01-01", "2024-01-31");
//! project.activities.push(
//!     Activity::new("design")
//!         .name("Design")
//!         .dates("2024-01-02", "2024-01-10")
//!         .child(Activity::new("wireframes").dates("2024-01-02", "2024-01-05"))
//!         .child(Activity::new("mockups").dates("2024-01-06", "2024-01-10")),
//! );
//! project.activities.push(
//!     Activity::new("launch")
//!         .name("Launch")
//!         .milestone("2024-01-20")
//!         .depends_on("design"),
//! );
//!
//! assert!(project.find_activity("mockups").is_some());
//! ```

pub mod avatar;
pub mod dates;
pub mod status;

pub use avatar::Avatar;
pub use dates::{DateError, DateLocale, DateRange};
pub use status::Status;

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for an activity, shared by the whole tree
pub type ActivityId = String;

/// Trimmed text, or `None` when absent or blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Project
// ============================================================================

/// Root container handed to the chart once, at construction time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Human-readable name
    #[serde(rename = "proyecto")]
    pub name: String,
    /// First day of the timeline (`YYYY-MM-DD`)
    #[serde(rename = "fechaInicio")]
    pub start_date: String,
    /// Last day of the timeline (`YYYY-MM-DD`)
    #[serde(rename = "fechaFin")]
    pub end_date: String,
    /// Top-level activities, in display order
    #[serde(rename = "actividades", default)]
    pub activities: Vec<Activity>,
}

impl Project {
    /// Create an empty project spanning `start_date..=end_date`
    pub fn new(
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            activities: Vec::new(),
        }
    }

    /// Parse a project document
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a project document from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse the project's timeline bounds
    ///
    /// Fails when either bound is malformed or when the start falls after the end.
    pub fn bounds(&self) -> Result<DateRange, LoadError> {
        let range = DateRange::parse(&self.start_date, &self.end_date)?;
        if range.start > range.end {
            return Err(LoadError::InvalidBounds {
                start: self.start_date.clone(),
                end: self.end_date.clone(),
            });
        }
        Ok(range)
    }

    /// Get an activity by ID (searches recursively)
    pub fn find_activity(&self, id: &str) -> Option<&Activity> {
        find_in(&self.activities, id)
    }

    /// Total number of activities at every level
    pub fn activity_count(&self) -> usize {
        fn count(activities: &[Activity]) -> usize {
            activities.iter().map(|a| 1 + count(&a.children)).sum()
        }
        count(&self.activities)
    }
}

fn find_in<'a>(activities: &'a [Activity], id: &str) -> Option<&'a Activity> {
    for activity in activities {
        if activity.id == id {
            return Some(activity);
        }
        if let Some(found) = find_in(&activity.children, id) {
            return Some(found);
        }
    }
    None
}

/// Load a project document from disk
pub fn load_project(path: &Path) -> Result<Project, LoadError> {
    let file = std::fs::File::open(path)?;
    Project::from_reader(std::io::BufReader::new(file))
}

// ============================================================================
// Activity
// ============================================================================

/// How an activity is drawn on the timeline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    /// Duration bar
    #[default]
    #[serde(rename = "actividad")]
    Task,
    /// Point-in-time marker
    #[serde(rename = "hito")]
    Milestone,
}

/// A schedulable unit of work or milestone
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier across the whole tree
    pub id: ActivityId,
    /// Display label
    #[serde(rename = "nombre")]
    pub name: String,
    /// Authored start (`YYYY-MM-DD`), ignored for layout once the activity has children
    #[serde(rename = "fechaInicio")]
    pub start_date: String,
    /// Authored end (`YYYY-MM-DD`), ignored for layout once the activity has children
    #[serde(rename = "fechaFin")]
    pub end_date: String,
    #[serde(rename = "tipo", default)]
    pub kind: ActivityKind,
    /// Completion percentage (0-100), meaningful for tasks only
    #[serde(rename = "progreso", default, deserialize_with = "clamped_percent")]
    pub progress: u8,
    /// Authored status; derived from progress when absent
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "rol", default, skip_serializing_if = "Option::is_none")]
    pub assignee_role: Option<String>,
    #[serde(rename = "asignado", default, skip_serializing_if = "Option::is_none")]
    pub assignee_name: Option<String>,
    /// Avatar image reference
    #[serde(rename = "avatar", default, skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Bar or marker fill
    pub color: String,
    /// Predecessor activity ids (cross-references, not ownership)
    #[serde(rename = "dependencias", default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<ActivityId>,
    /// Sub-activities, in display order
    #[serde(rename = "subactividades", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Activity>,
}

impl Activity {
    /// Create a task with the given ID and no dates yet.
    ///
    /// It cannot be laid out until `dates` or `milestone` sets them.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            start_date: String::new(),
            end_date: String::new(),
            kind: ActivityKind::Task,
            progress: 0,
            status: None,
            assignee_role: None,
            assignee_name: None,
            avatar_ref: None,
            description: None,
            color: "#3498db".into(),
            dependencies: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the authored start and end dates
    pub fn dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    /// Turn this activity into a milestone on `date`
    pub fn milestone(mut self, date: impl Into<String>) -> Self {
        let date = date.into();
        self.kind = ActivityKind::Milestone;
        self.start_date = date.clone();
        self.end_date = date;
        self
    }

    /// Set completion percentage (clamped to 100)
    pub fn progress(mut self, progress: u8) -> Self {
        self.progress = progress.min(100);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the assignee's name and role
    pub fn assign(mut self, name: impl Into<String>, role: impl Into<String>) -> Self {
        self.assignee_name = Some(name.into());
        self.assignee_role = Some(role.into());
        self
    }

    pub fn avatar(mut self, reference: impl Into<String>) -> Self {
        self.avatar_ref = Some(reference.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Add a predecessor
    pub fn depends_on(mut self, predecessor: impl Into<String>) -> Self {
        self.dependencies.push(predecessor.into());
        self
    }

    /// Add a child activity
    pub fn child(mut self, child: Activity) -> Self {
        self.children.push(child);
        self
    }

    /// Check if this activity aggregates children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_milestone(&self) -> bool {
        self.kind == ActivityKind::Milestone
    }

    /// Authored status, or the one implied by progress
    pub fn effective_status(&self) -> Status {
        self.status
            .unwrap_or_else(|| Status::from_progress(self.progress))
    }

    /// Parse the activity's own authored dates
    pub fn authored_range(&self) -> Result<DateRange, DateError> {
        DateRange::parse(&self.start_date, &self.end_date)
    }

    /// Name shown next to the avatar: the assignee, else the role
    pub fn assignee_label(&self) -> Option<&str> {
        non_blank(self.assignee_name.as_deref())
            .or_else(|| non_blank(self.assignee_role.as_deref()))
    }

    /// Avatar for the assignee, if anyone is assigned
    pub fn assignee_avatar(&self) -> Option<Avatar> {
        self.assignee_label()
            .map(|name| Avatar::new(name, self.avatar_ref.as_deref()))
    }
}

/// Percentages above 100 are read as 100
fn clamped_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = u64::deserialize(deserializer)?;
    Ok(value.min(100) as u8)
}

// ============================================================================
// Errors
// ============================================================================

/// Error loading a project document
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid project document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid project bounds: {0}")]
    Date(#[from] DateError),

    #[error("Project starts ({start}) after it ends ({end})")]
    InvalidBounds { start: String, end: String },
}

// ============================================================================
// Tests
// ============================================================================
