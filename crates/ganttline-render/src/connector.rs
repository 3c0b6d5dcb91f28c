//! Connector path data
//!
//! Routes are polylines; vector targets draw them as a single `<path>` with
//! an absolute move followed by absolute line commands.

use ganttline_layout::{Point, Route};

/// SVG path data for a polyline, e.g. `M100,10 L120,10 L120,50`
pub fn path_data(points: &[Point]) -> String {
    let mut commands = Vec::with_capacity(points.len());
    for (i, point) in points.iter().enumerate() {
        let op = if i == 0 { 'M' } else { 'L' };
        commands.push(format!("{op}{},{}", point.x, point.y));
    }
    commands.join(" ")
}

/// Path data for a routed connector
pub fn route_path(route: &Route) -> String {
    path_data(&route.points)
}
