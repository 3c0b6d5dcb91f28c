//! Activity tree and flattening
//!
//! The tree owns the project and the set of expanded activity ids. Flattening
//! is a pre-order walk that emits every activity followed by its children when
//! it is expanded, producing a fresh depth-annotated row list on every call.
//! The project itself is never mutated by a walk.
//!
//! Parent activities have no dates of their own for layout purposes: their
//! effective range is the union of their children's effective ranges.

use ganttline_core::{Activity, ActivityId, DateRange, Project};
use std::collections::{HashMap, HashSet};

use crate::LayoutError;

/// A visible row: an activity reference and its depth in the current walk
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatRow<'a> {
    pub activity: &'a Activity,
    /// 0 for top-level activities
    pub depth: usize,
}

/// Project tree plus expand/collapse state
#[derive(Clone, Debug)]
pub struct ActivityTree {
    project: Project,
    expanded: HashSet<ActivityId>,
}

impl ActivityTree {
    /// Take ownership of the project with every parent expanded
    pub fn new(project: Project) -> Self {
        let mut expanded = HashSet::new();
        seed_expanded(&project.activities, &mut expanded);
        Self { project, expanded }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Whether the activity's children are part of the current walk
    pub fn shows_children(&self, activity: &Activity) -> bool {
        activity.has_children() && self.is_expanded(&activity.id)
    }

    /// Flip the expansion state of `id`.
    ///
    /// Returns `false` (and changes nothing) when no activity has that id.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.project.find_activity(id).is_none() {
            tracing::trace!(id, "toggle ignored for unknown activity");
            return false;
        }
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
        true
    }

    /// Pre-order walk honoring the expansion state
    pub fn flatten(&self) -> Vec<FlatRow<'_>> {
        let mut rows = Vec::new();
        self.collect_rows(&self.project.activities, 0, &mut rows);
        rows
    }

    fn collect_rows<'a>(&'a self, activities: &'a [Activity], depth: usize, rows: &mut Vec<FlatRow<'a>>) {
        for activity in activities {
            rows.push(FlatRow { activity, depth });
            if self.shows_children(activity) {
                self.collect_rows(&activity.children, depth + 1, rows);
            }
        }
    }
}

fn seed_expanded(activities: &[Activity], expanded: &mut HashSet<ActivityId>) {
    for activity in activities {
        if activity.has_children() {
            expanded.insert(activity.id.clone());
            seed_expanded(&activity.children, expanded);
        }
    }
}

/// Effective ranges of every activity in a tree, keyed by id
pub type RangeTable<'a> = HashMap<&'a str, DateRange>;

/// Effective range of a single activity.
///
/// Leaves use their authored dates; parents span from the earliest child
/// start to the latest child end, recursively.
pub fn effective_range(activity: &Activity) -> Result<DateRange, LayoutError> {
    let mut scratch = RangeTable::new();
    collect_range(activity, &mut scratch)
}

/// Effective ranges of every activity, computed in one post-order pass
pub fn effective_ranges(activities: &[Activity]) -> Result<RangeTable<'_>, LayoutError> {
    let mut table = RangeTable::new();
    for activity in activities {
        collect_range(activity, &mut table)?;
    }
    Ok(table)
}

fn collect_range<'a>(
    activity: &'a Activity,
    table: &mut RangeTable<'a>,
) -> Result<DateRange, LayoutError> {
    let range = if activity.has_children() {
        let mut merged: Option<DateRange> = None;
        for child in &activity.children {
            let child_range = collect_range(child, table)?;
            merged = Some(merged.map_or(child_range, |m| m.union(child_range)));
        }
        merged
    } else {
        None
    };

    let range = match range {
        Some(range) => range,
        None => activity
            .authored_range()
            .map_err(|source| LayoutError::Date {
                activity: activity.id.clone(),
                source,
            })?,
    };

    table.entry(activity.id.as_str()).or_insert(range);
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_project() -> Project {
        let mut project = Project::new("Tree", "2024-01-01", "2024-01-31");
        project.activities = vec![
            Activity::new("A")
                .dates("2024-01-01", "2024-01-31")
                .child(
                    Activity::new("A1")
                        .child(Activity::new("A1a").dates("2024-01-03", "2024-01-05"))
                        .child(Activity::new("A1b").dates("2024-01-04", "2024-01-09")),
                )
                .child(Activity::new("A2").dates("2024-01-10", "2024-01-12")),
            Activity::new("B").dates("2024-01-15", "2024-01-16"),
        ];
        project
    }

    fn ids(rows: &[FlatRow<'_>]) -> Vec<(String, usize)> {
        rows.iter()
            .map(|r| (r.activity.id.clone(), r.depth))
            .collect()
    }

    #[test]
    fn everything_starts_expanded() {
        let tree = ActivityTree::new(sample_project());
        assert!(tree.is_expanded("A"));
        assert!(tree.is_expanded("A1"));
        assert!(!tree.is_expanded("A2"));
        assert!(!tree.is_expanded("B"));
    }

    #[test]
    fn flatten_is_pre_order_with_depth() {
        let tree = ActivityTree::new(sample_project());
        assert_eq!(
            ids(&tree.flatten()),
            vec![
                ("A".to_string(), 0),
                ("A1".to_string(), 1),
                ("A1a".to_string(), 2),
                ("A1b".to_string(), 2),
                ("A2".to_string(), 1),
                ("B".to_string(), 0),
            ]
        );
    }

    #[test]
    fn flatten_is_deterministic() {
        let tree = ActivityTree::new(sample_project());
        assert_eq!(tree.flatten(), tree.flatten());
    }

    #[test]
    fn collapsing_hides_descendants() {
        let mut tree = ActivityTree::new(sample_project());
        assert!(tree.toggle("A1"));
        assert_eq!(
            ids(&tree.flatten()),
            vec![
                ("A".to_string(), 0),
                ("A1".to_string(), 1),
                ("A2".to_string(), 1),
                ("B".to_string(), 0),
            ]
        );

        assert!(tree.toggle("A"));
        assert_eq!(
            ids(&tree.flatten()),
            vec![("A".to_string(), 0), ("B".to_string(), 0)]
        );
    }

    #[test]
    fn collapsed_ancestor_keeps_inner_state() {
        let mut tree = ActivityTree::new(sample_project());
        tree.toggle("A1");
        tree.toggle("A");
        tree.toggle("A");
        assert!(!tree.is_expanded("A1"));
        assert_eq!(tree.flatten().len(), 4);
    }

    #[test]
    fn toggle_twice_restores_rows() {
        let mut tree = ActivityTree::new(sample_project());
        let before = ids(&tree.flatten());
        for id in ["A", "A1", "A1a", "A2", "B"] {
            tree.toggle(id);
            tree.toggle(id);
            assert_eq!(ids(&tree.flatten()), before, "round trip on {id}");
        }
    }

    #[test]
    fn toggle_unknown_id_is_a_no_op() {
        let mut tree = ActivityTree::new(sample_project());
        let before = ids(&tree.flatten());
        assert!(!tree.toggle("nope"));
        assert_eq!(ids(&tree.flatten()), before);
    }

    #[test]
    fn expanding_a_leaf_keeps_it_a_leaf() {
        let mut tree = ActivityTree::new(sample_project());
        assert!(tree.toggle("B"));
        assert!(tree.is_expanded("B"));
        assert_eq!(tree.flatten().len(), 6);
    }

    #[test]
    fn parent_range_aggregates_children() {
        let parent = Activity::new("P")
            .dates("2030-01-01", "2030-01-02")
            .child(Activity::new("c1").dates("2024-01-01", "2024-01-05"))
            .child(Activity::new("c2").dates("2024-01-03", "2024-01-07"));

        assert_eq!(
            effective_range(&parent).unwrap(),
            DateRange::new(date(2024, 1, 1), date(2024, 1, 7))
        );
    }

    #[test]
    fn nested_ranges_recurse() {
        let project = sample_project();
        let table = effective_ranges(&project.activities).unwrap();
        assert_eq!(table["A1"], DateRange::new(date(2024, 1, 3), date(2024, 1, 9)));
        assert_eq!(table["A"], DateRange::new(date(2024, 1, 3), date(2024, 1, 12)));
        assert_eq!(table["B"], DateRange::new(date(2024, 1, 15), date(2024, 1, 16)));
        assert_eq!(table.len(), project.activity_count());
    }

    #[test]
    fn parent_authored_dates_are_never_parsed() {
        let parent = Activity::new("P")
            .dates("garbage", "")
            .child(Activity::new("c").dates("2024-01-01", "2024-01-02"));
        assert!(effective_range(&parent).is_ok());
    }

    #[test]
    fn bad_leaf_date_names_the_activity() {
        let parent = Activity::new("P")
            .child(Activity::new("ok").dates("2024-01-01", "2024-01-02"))
            .child(Activity::new("bad").dates("2024-01-01", "2024-1x-02"));

        match effective_range(&parent) {
            Err(LayoutError::Date { activity, .. }) => assert_eq!(activity, "bad"),
            other => panic!("expected date error, got {other:?}"),
        }
    }
}
