//! Geometry primitives in millimetres.
//!
//! Coordinates are y-down and x-right with the origin at the top-left of
//! whatever is being drawn (label, remote or sheet).

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point in millimetres
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn midpoint(self, other: Self) -> Self {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point { x: v.x, y: v.y }
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

/// Point + offset vector
impl Add<DVec2> for Point {
    type Output = Point;
    fn add(self, rhs: DVec2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Point - point = displacement
impl Sub<Point> for Point {
    type Output = DVec2;
    fn sub(self, rhs: Point) -> DVec2 {
        DVec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect { x, y, w, h }
    }

    /// A `w`×`h` rectangle centered inside an `outer_w`×`outer_h` canvas
    pub fn centered_in(outer_w: f64, outer_h: f64, w: f64, h: f64) -> Self {
        Rect::new((outer_w - w) / 2.0, (outer_h - h) / 2.0, w, h)
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Half of the smaller side; the largest corner radius that still fits
    pub fn max_corner_radius(&self) -> f64 {
        (self.w.min(self.h) / 2.0).max(0.0)
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// An empty box that any expansion will replace
    pub fn new() -> Self {
        BBox {
            min: Point::new(f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn expand_rect(&mut self, r: Rect) {
        self.expand_point(Point::new(r.x, r.y));
        self.expand_point(Point::new(r.right(), r.bottom()));
    }

    pub fn union(mut self, other: BBox) -> BBox {
        if !other.is_empty() {
            self.expand_point(other.min);
            self.expand_point(other.max);
        }
        self
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }
}

/// Per-corner radii, clockwise from the top-left
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerRadii {
    #[serde(default)]
    pub tl: f64,
    #[serde(default)]
    pub tr: f64,
    #[serde(default)]
    pub br: f64,
    #[serde(default)]
    pub bl: f64,
}

impl CornerRadii {
    pub const ZERO: CornerRadii = CornerRadii::uniform(0.0);

    pub const fn uniform(r: f64) -> Self {
        CornerRadii {
            tl: r,
            tr: r,
            br: r,
            bl: r,
        }
    }

    /// Clamp every radius into `[0, max]`; non-finite radii become 0
    pub fn clamped(self, max: f64) -> Self {
        let fit = |r: f64| if r.is_finite() { r.clamp(0.0, max.max(0.0)) } else { 0.0 };
        CornerRadii {
            tl: fit(self.tl),
            tr: fit(self.tr),
            br: fit(self.br),
            bl: fit(self.bl),
        }
    }

    /// The shared radius when all four corners agree
    pub fn as_uniform(&self) -> Option<f64> {
        (self.tl == self.tr && self.tr == self.br && self.br == self.bl).then_some(self.tl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_centered_in_canvas() {
        let r = Rect::centered_in(40.0, 30.0, 20.0, 10.0);
        assert_eq!(r, Rect::new(10.0, 10.0, 20.0, 10.0));
        assert_eq!(r.center(), Point::new(20.0, 15.0));
    }

    #[test]
    fn rect_larger_than_canvas_goes_negative() {
        let r = Rect::centered_in(10.0, 10.0, 20.0, 20.0);
        assert_eq!(r.x, -5.0);
        assert_eq!(r.y, -5.0);
    }

    #[test]
    fn bbox_starts_empty() {
        let b = BBox::new();
        assert!(b.is_empty());
        assert!(BBox::new().union(b).is_empty());
    }

    #[test]
    fn bbox_expand_rect() {
        let mut b = BBox::new();
        b.expand_rect(Rect::new(1.0, 2.0, 3.0, 4.0));
        b.expand_point(Point::new(-1.0, 0.0));
        assert_eq!(b.min, Point::new(-1.0, 0.0));
        assert_eq!(b.max, Point::new(4.0, 6.0));
        assert_eq!(b.width(), 5.0);
        assert_eq!(b.height(), 6.0);
    }

    #[test]
    fn corner_radii_clamp() {
        let r = CornerRadii {
            tl: 1000.0,
            tr: -2.0,
            br: f64::NAN,
            bl: 3.0,
        }
        .clamped(5.0);
        assert_eq!(r, CornerRadii { tl: 5.0, tr: 0.0, br: 0.0, bl: 3.0 });
        assert_eq!(r.as_uniform(), None);
        assert_eq!(CornerRadii::uniform(2.0).as_uniform(), Some(2.0));
    }

    #[test]
    fn point_vector_ops() {
        let p = Point::new(1.0, 2.0) + DVec2::new(0.5, -1.0);
        assert_eq!(p, Point::new(1.5, 1.0));
        assert_eq!(Point::new(3.0, 3.0) - Point::new(1.0, 2.0), DVec2::new(2.0, 1.0));
    }
}
