//! Pixel-space primitives shared by layout and routing

use serde::Serialize;

/// A point in chart coordinates (origin at the first day of the first row)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Middle of the left edge
    pub fn left_center(&self) -> Point {
        Point::new(self.x, self.center_y())
    }

    /// Middle of the right edge
    pub fn right_center(&self) -> Point {
        Point::new(self.right(), self.center_y())
    }
}
