use derive_more::{Add, Constructor, Sub};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Value Object - screen space point in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Add, Sub, Constructor, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn scaled(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (*self - other).length()
    }

    pub fn lerp(&self, other: Point, t: f64) -> Point {
        *self + (other - *self).scaled(t)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Screen anchor derived from a domain point every invalidation cycle.
/// `index` ties it back to the originating domain point or names a
/// synthetic handle such as a rectangle corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
    pub index: usize,
    pub square: bool,
}

impl AnchorPoint {
    pub fn new(x: f64, y: f64, index: usize) -> Self {
        Self { x, y, index, square: false }
    }

    pub fn square(x: f64, y: f64, index: usize) -> Self {
        Self { x, y, index, square: true }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn translated(&self, delta: Point) -> Self {
        Self { x: self.x + delta.x, y: self.y + delta.y, ..*self }
    }
}

impl From<AnchorPoint> for Point {
    fn from(anchor: AnchorPoint) -> Self {
        anchor.point()
    }
}

/// Value Object - axis aligned box
#[derive(Debug, Clone, Copy, PartialEq, Default, Constructor, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Normalised box spanning two corners
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn bounding(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min, mut max) = (*first, *first);
        for p in points {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Self::from_corners(min, max))
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn inflate(&self, by: f64) -> Self {
        Self::new(self.x - by, self.y - by, self.width + 2.0 * by, self.height + 2.0 * by)
    }
}

/// Distance from `p` to the segment `a`-`b` using the clamped projection.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_to(a + ab.scaled(t))
}

/// Distance from `p` to the infinite line through `a` and `b`.
pub fn distance_to_line(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len = ab.length();
    if len == 0.0 {
        return p.distance_to(a);
    }
    ((p.x - a.x) * ab.y - (p.y - a.y) * ab.x).abs() / len
}

/// Maps any angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let full = 2.0 * PI;
    let wrapped = angle % full;
    if wrapped < 0.0 { wrapped + full } else { wrapped }
}

/// Wrap aware containment of `angle` in the arc running from `start` to `end`.
pub fn is_angle_between(angle: f64, start: f64, end: f64) -> bool {
    let angle = normalize_angle(angle);
    let start = normalize_angle(start);
    let end = normalize_angle(end);
    if start <= end {
        angle >= start && angle <= end
    } else {
        angle >= start || angle <= end
    }
}

/// Ray casting containment for simple polygons.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Extends the segment `a`-`b` to the pane edges on the requested sides.
///
/// Returns `None` when an extension is requested on a degenerate segment or
/// when the extended line never crosses the pane.
pub fn extend_segment(
    a: Point,
    b: Point,
    extend_left: bool,
    extend_right: bool,
    width: f64,
    height: f64,
) -> Option<(Point, Point)> {
    if !extend_left && !extend_right {
        return Some((a, b));
    }
    let d = b - a;
    if d.x == 0.0 && d.y == 0.0 {
        return None;
    }

    // Liang-Barsky clip of the infinite line against the pane
    let mut t_min = f64::NEG_INFINITY;
    let mut t_max = f64::INFINITY;
    for (p, q) in [(-d.x, a.x), (d.x, width - a.x), (-d.y, a.y), (d.y, height - a.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t_min = t_min.max(t);
        } else {
            t_max = t_max.min(t);
        }
    }
    if t_min > t_max {
        return None;
    }

    let start = if extend_left { t_min.min(0.0) } else { 0.0 };
    let end = if extend_right { t_max.max(1.0) } else { 1.0 };
    Some((a + d.scaled(start), a + d.scaled(end)))
}
