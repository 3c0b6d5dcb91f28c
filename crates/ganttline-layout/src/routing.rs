//! Dependency connector routing
//!
//! A connector leaves the predecessor's right edge and enters the dependent's
//! left edge, both at mid-height. When the dependent starts far enough to the
//! right, the route is a three-segment elbow. Otherwise it detours through the
//! vertical midpoint between the rows so it never doubles back over either bar.
//!
//! ```text
//!  forward:                 detour:
//!  [src]──┐                 [src]──┐
//!         │                   ┌────┘
//!         └──▶[dst]           └──▶[dst]
//! ```

use ganttline_core::ActivityId;
use serde::Serialize;
use std::collections::HashMap;

use crate::geometry::{Point, Rect};
use crate::layout::RowLayout;

/// Which path shape a connector uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteShape {
    /// Right, vertical, right (3 segments)
    Forward,
    /// Right, vertical to the midpoint, left, vertical, right (5 segments)
    Detour,
}

/// A routed connector between two visible rows
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Predecessor id
    pub from: ActivityId,
    /// Dependent id
    pub to: ActivityId,
    pub shape: RouteShape,
    /// Polyline vertices, starting at the predecessor anchor
    pub points: Vec<Point>,
}

impl Route {
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Orthogonal router with a fixed stub length
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionRouter {
    /// Horizontal distance travelled before the first vertical leg
    pub offset: f64,
}

impl Default for ConnectionRouter {
    fn default() -> Self {
        Self { offset: 20.0 }
    }
}

impl ConnectionRouter {
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }

    /// Route from `source`'s right-center to `target`'s left-center
    pub fn connect(&self, source: &Rect, target: &Rect) -> (RouteShape, Vec<Point>) {
        let start = source.right_center();
        let end = target.left_center();
        let exit_x = start.x + self.offset;

        if end.x > exit_x {
            (
                RouteShape::Forward,
                vec![
                    start,
                    Point::new(exit_x, start.y),
                    Point::new(exit_x, end.y),
                    end,
                ],
            )
        } else {
            let mid_y = start.y + (end.y - start.y) / 2.0;
            let entry_x = end.x - self.offset;
            (
                RouteShape::Detour,
                vec![
                    start,
                    Point::new(exit_x, start.y),
                    Point::new(exit_x, mid_y),
                    Point::new(entry_x, mid_y),
                    Point::new(entry_x, end.y),
                    end,
                ],
            )
        }
    }

    /// Route every dependency whose both ends currently draw geometry.
    ///
    /// References to collapsed, geometry-less or unknown rows are skipped.
    /// When ids collide, the first visible row with that id is used.
    pub fn route(&self, rows: &[RowLayout]) -> Vec<Route> {
        let mut anchors: HashMap<&str, Rect> = HashMap::new();
        for row in rows {
            if let Some(bounds) = row.bounds() {
                anchors.entry(row.id.as_str()).or_insert(bounds);
            }
        }

        let mut routes = Vec::new();
        for row in rows {
            let Some(target) = row.bounds() else {
                continue;
            };
            for dependency in &row.dependencies {
                let Some(source) = anchors.get(dependency.as_str()) else {
                    tracing::trace!(from = %dependency, to = %row.id, "dependency not visible");
                    continue;
                };
                let (shape, points) = self.connect(source, &target);
                routes.push(Route {
                    from: dependency.clone(),
                    to: row.id.clone(),
                    shape,
                    points,
                });
            }
        }

        tracing::debug!(routes = routes.len(), "routing pass complete");
        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rect_with_right_edge(right: f64, y: f64) -> Rect {
        Rect::new(right - 50.0, y, 50.0, 20.0)
    }

    #[test]
    fn forward_route_when_target_clears_the_stub() {
        let router = ConnectionRouter::default();
        let source = rect_with_right_edge(100.0, 0.0);
        let target = Rect::new(150.0, 40.0, 60.0, 20.0);

        let (shape, points) = router.connect(&source, &target);
        assert_eq!(shape, RouteShape::Forward);
        assert_eq!(
            points,
            vec![
                Point::new(100.0, 10.0),
                Point::new(120.0, 10.0),
                Point::new(120.0, 50.0),
                Point::new(150.0, 50.0),
            ]
        );
    }

    #[test]
    fn detour_when_target_starts_before_source_ends() {
        let router = ConnectionRouter::default();
        let source = rect_with_right_edge(100.0, 0.0);
        let target = Rect::new(90.0, 40.0, 60.0, 20.0);

        let (shape, points) = router.connect(&source, &target);
        assert_eq!(shape, RouteShape::Detour);
        assert_eq!(
            points,
            vec![
                Point::new(100.0, 10.0),
                Point::new(120.0, 10.0),
                Point::new(120.0, 30.0),
                Point::new(70.0, 30.0),
                Point::new(70.0, 50.0),
                Point::new(90.0, 50.0),
            ]
        );
    }

    #[test]
    fn gap_equal_to_offset_still_detours() {
        let router = ConnectionRouter::default();
        let source = rect_with_right_edge(100.0, 0.0);
        let target = Rect::new(120.0, 40.0, 60.0, 20.0);
        assert_eq!(router.connect(&source, &target).0, RouteShape::Detour);

        let target = Rect::new(120.5, 40.0, 60.0, 20.0);
        assert_eq!(router.connect(&source, &target).0, RouteShape::Forward);
    }

    #[test]
    fn upward_dependency_routes_through_midpoint() {
        let router = ConnectionRouter::new(10.0);
        let source = rect_with_right_edge(200.0, 80.0);
        let target = Rect::new(0.0, 0.0, 40.0, 20.0);
        let (shape, points) = router.connect(&source, &target);
        assert_eq!(shape, RouteShape::Detour);
        assert_eq!(points[2], Point::new(210.0, 50.0));
        assert_eq!(points[3], Point::new(-10.0, 50.0));
    }
}
