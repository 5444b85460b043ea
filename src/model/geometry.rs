//! Geometry primitives in PDF user space (y grows upwards).

use serde::{Deserialize, Serialize};

/// A point in user space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub min_x: f32,
    /// Bottom edge
    pub min_y: f32,
    /// Right edge
    pub max_x: f32,
    /// Top edge
    pub max_y: f32,
}

impl Rect {
    /// Create a new rectangle from its edges.
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a rectangle from its lower-left corner and size.
    pub fn from_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Whether all coordinates are finite and both extents are positive.
    ///
    /// Degenerate rectangles are rejected before they reach an area.
    pub fn is_well_formed(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
            && self.width() > 0.0
            && self.height() > 0.0
    }

    /// Whether `other` lies completely inside this rectangle (edges inclusive).
    pub fn contains(&self, other: &Rect) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Whether the point lies inside this rectangle (edges inclusive).
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Whether the two rectangles share a non-empty intersection.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_horizontally(other) && self.overlaps_vertically(other)
    }

    /// Whether the x-ranges share a non-empty interval.
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.min_x < other.max_x && other.min_x < self.max_x
    }

    /// Whether the y-ranges share a non-empty interval.
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.min_y < other.max_y && other.min_y < self.max_y
    }

    /// The smallest rectangle covering both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// The intersection of both rectangles, if it is non-empty.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Rect::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        ))
    }

    /// Bounding box of a sequence of rectangles.
    pub fn bounding<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        rects.into_iter().fold(None, |acc, r| match acc {
            None => Some(*r),
            Some(b) => Some(b.union(r)),
        })
    }
}

/// A line segment, used for baselines and meanlines.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    /// Start point
    pub start: Point,
    /// End point
    pub end: Point,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a horizontal line at `y` from `x0` to `x1`.
    pub fn horizontal(x0: f32, x1: f32, y: f32) -> Self {
        Self::new(Point::new(x0, y), Point::new(x1, y))
    }

    /// Y coordinate of the start point (baselines are horizontal).
    pub fn y(&self) -> f32 {
        self.start.y
    }

    /// Length of the segment.
    pub fn length(&self) -> f32 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::new(10.0, 20.0, 30.0, 60.0);
        assert_eq!(r.width(), 20.0);
        assert_eq!(r.height(), 40.0);
        assert_eq!(r.area(), 800.0);
        assert_eq!(r.center(), Point::new(20.0, 40.0));
    }

    #[test]
    fn test_rect_contains_and_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(10.0, 10.0, 20.0, 20.0);
        let crossing = Rect::new(90.0, 90.0, 110.0, 110.0);
        let apart = Rect::new(200.0, 0.0, 210.0, 10.0);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.overlaps(&crossing));
        assert!(!outer.contains(&crossing));
        assert!(!outer.overlaps(&apart));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps_vertically(&b));
        assert!(!a.overlaps_horizontally(&b));
    }

    #[test]
    fn test_union_and_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 20.0, 15.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 20.0, 15.0));
        assert_eq!(a.intersection(&b), Some(Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert_eq!(a.intersection(&Rect::new(50.0, 50.0, 60.0, 60.0)), None);
    }

    #[test]
    fn test_well_formed() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, f32::NAN, 1.0).is_well_formed());
        assert!(!Rect::new(5.0, 0.0, 1.0, 1.0).is_well_formed());
    }

    #[test]
    fn test_bounding() {
        let rects = [Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(4.0, -2.0, 5.0, 3.0)];
        assert_eq!(Rect::bounding(&rects), Some(Rect::new(0.0, -2.0, 5.0, 3.0)));
        assert_eq!(Rect::bounding(&[]), None);
    }
}
