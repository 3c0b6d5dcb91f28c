//! Activity status
//!
//! An activity may carry an authored status. When it does not, the status is
//! derived from its progress: complete work is `Done`, started work is
//! `InProgress`, anything else is `Open`.
//!
//! # Example
//!
//! ```rust
//! use ganttline_core::status::Status;
//!
//! assert_eq!(Status::from_progress(100), Status::Done);
//! assert_eq!(Status::from_progress(40), Status::InProgress);
//! assert_eq!(Status::from_progress(0).as_str(), "Open");
//! ```

use serde::{Deserialize, Serialize};

/// Status of an activity as shown in the sidebar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Done,
    #[serde(rename = "In progress")]
    InProgress,
    Open,
    Planned,
}

impl Status {
    /// Derive a status from a completion percentage
    pub fn from_progress(progress: u8) -> Self {
        match progress {
            p if p >= 100 => Status::Done,
            0 => Status::Open,
            _ => Status::InProgress,
        }
    }

    /// Display string, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Done => "Done",
            Status::InProgress => "In progress",
            Status::Open => "Open",
            Status::Planned => "Planned",
        }
    }

    /// Indicator dot color
    pub fn color(&self) -> &'static str {
        match self {
            Status::Done => "#2196F3",
            Status::InProgress => "#FF9800",
            Status::Open | Status::Planned => "#9E9E9E",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_from_progress() {
        assert_eq!(Status::from_progress(0), Status::Open);
        assert_eq!(Status::from_progress(1), Status::InProgress);
        assert_eq!(Status::from_progress(99), Status::InProgress);
        assert_eq!(Status::from_progress(100), Status::Done);
    }

    #[test]
    fn serialized_names_match_display() {
        for status in [Status::Done, Status::InProgress, Status::Open, Status::Planned] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }

    #[test]
    fn open_and_planned_share_color() {
        assert_eq!(Status::Open.color(), Status::Planned.color());
        assert_ne!(Status::Done.color(), Status::InProgress.color());
    }
}
