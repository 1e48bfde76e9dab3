//! Plain geometry values shared by the scroll, reveal and cursor components.
//!
//! All coordinates are in CSS-like pixels. Element rectangles are expressed in
//! document space (top measured from the top of the page) unless a function
//! says otherwise.

use serde::{Deserialize, Serialize};

/// Pointer sample in viewport coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
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

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// A rectangle is measured once layout produced a finite, non-negative size
    pub fn is_measured(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Grow (positive) or shrink (negative) every edge by `margin`
    pub fn inflate(&self, margin: f64) -> Rect {
        let width = (self.width + margin * 2.0).max(0.0);
        let height = (self.height + margin * 2.0).max(0.0);
        Rect::new(self.x - margin, self.y - margin, width, height)
    }

    /// Same rectangle shifted vertically by `dy`
    pub fn offset_y(&self, dy: f64) -> Rect {
        Rect::new(self.x, self.y + dy, self.width, self.height)
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// The single document viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Visible region in document space for a given scroll offset
    pub fn visible_rect(&self, scroll_offset: f64) -> Rect {
        Rect::new(0.0, scroll_offset, self.width, self.height)
    }
}

/// Fraction of `element` inside `root`, with `root` grown or shrunk by
/// `root_margin` pixels on every edge.
///
/// An unmeasured or empty element reports 0.
pub fn intersection_ratio(element: &Rect, root: &Rect, root_margin: f64) -> f64 {
    if !element.is_measured() || !root.is_measured() {
        return 0.0;
    }
    let root = root.inflate(root_margin);
    if element.area() <= 0.0 {
        // Zero-area elements count as fully visible once their origin is inside
        return if root.contains(Point::new(element.x, element.y)) {
            1.0
        } else {
            0.0
        };
    }
    match element.intersection(&root) {
        Some(visible) => (visible.area() / element.area()).clamp(0.0, 1.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_ratio_half_visible() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        let element = Rect::new(0.0, 50.0, 100.0, 100.0);
        assert!((intersection_ratio(&element, &root, 0.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_intersection_ratio_margin_shrinks_root() {
        let root = Rect::new(0.0, 0.0, 200.0, 200.0);
        let element = Rect::new(0.0, 160.0, 200.0, 40.0);
        assert!((intersection_ratio(&element, &root, 0.0) - 1.0).abs() < 1e-9);
        // A -50px margin pulls the bottom edge up to 150
        assert_eq!(intersection_ratio(&element, &root, -50.0), 0.0);
    }

    #[test]
    fn test_intersection_ratio_unmeasured() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        let element = Rect::new(0.0, f64::NAN, 10.0, 10.0);
        assert_eq!(intersection_ratio(&element, &root, 0.0), 0.0);
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(!rect.contains(Point::new(15.0, 12.0)));
        assert_eq!(rect.center(), Point::new(12.5, 12.5));
    }
}
