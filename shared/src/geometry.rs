use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A location on screen or in video space, in CSS pixels.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug, Serialize, Deserialize, Default)]
pub struct Point(pub f64, pub f64);

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Point(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        Point(self.0 - rhs.0, self.1 - rhs.1)
    }
}

/// Width and height of a surface, such as the canvas or the camera frame.
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize, Default)]
pub struct Extent {
    /// Horizontal size.
    pub width: f64,
    /// Vertical size.
    pub height: f64,
}

impl Extent {
    /// Instantiates an [`Extent`].
    pub fn new(width: f64, height: f64) -> Extent {
        Extent { width, height }
    }

    /// An [`Extent`] with no area cannot be mapped from.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned box in screen space, laid out the same way as a `DOMRect`.
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Rect {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A [`Rect`] of the given size whose centre sits on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> Rect {
        let Point(x, y) = center - Point(width / 2.0, height / 2.0);

        Rect::new(x, y, x + width, y + height)
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point(self.left, self.top)
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: Point) -> bool {
        point.0 >= self.left && point.0 <= self.right && point.1 >= self.top && point.1 <= self.bottom
    }
}
