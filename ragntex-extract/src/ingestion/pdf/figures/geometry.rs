//! Axis-aligned rectangles in page space.

use std::fmt;

/// Rectangle in page coordinates (points, origin top-left, y downwards).
///
/// Always satisfies `left <= right` and `top <= bottom` with finite
/// coordinates; construction through [`Rectangle::new`] enforces it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Rectangle {
    /// Build a rectangle, rejecting non-finite coordinates and inverted extents.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Option<Self> {
        let finite = left.is_finite() && top.is_finite() && right.is_finite() && bottom.is_finite();
        if !finite || left > right || top > bottom {
            return None;
        }
        Some(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Build a rectangle from a `[left, top, right, bottom]` box.
    pub fn from_bbox(bbox: [f64; 4]) -> Option<Self> {
        Self::new(bbox[0], bbox[1], bbox[2], bbox[3])
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Grow the rectangle by `margin` on all four sides.
    ///
    /// Negative margins are treated as zero so the result stays well formed.
    pub fn expand(&self, margin: f64) -> Self {
        let margin = margin.max(0.0);
        Self {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }

    /// Smallest rectangle enclosing both `self` and `other`.
    pub fn union(&self, other: &Rectangle) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Closed-interval intersection test: rectangles sharing only an edge
    /// or a corner intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    /// Whether `other` lies entirely inside `self` (edges inclusive).
    pub fn contains(&self, other: &Rectangle) -> bool {
        self.left <= other.left
            && self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
    }

    /// Overlap of two rectangles, or `None` when they are disjoint.
    pub fn intersection(&self, other: &Rectangle) -> Option<Self> {
        Self::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }

    pub fn min_corner(&self) -> [f64; 2] {
        [self.left, self.top]
    }

    pub fn max_corner(&self) -> [f64; 2] {
        [self.right, self.bottom]
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.1},{:.1})-({:.1},{:.1})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Fold a set of rectangles into their union, `None` for an empty set.
pub fn merge_all<'a, I>(rects: I) -> Option<Rectangle>
where
    I: IntoIterator<Item = &'a Rectangle>,
{
    rects
        .into_iter()
        .fold(None, |acc: Option<Rectangle>, rect| match acc {
            Some(merged) => Some(merged.union(rect)),
            None => Some(*rect),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(l: f64, t: f64, r: f64, b: f64) -> Rectangle {
        Rectangle::new(l, t, r, b).unwrap()
    }

    #[test]
    fn test_rejects_inverted_and_non_finite() {
        assert!(Rectangle::new(10.0, 0.0, 0.0, 10.0).is_none());
        assert!(Rectangle::new(0.0, 10.0, 10.0, 0.0).is_none());
        assert!(Rectangle::new(f64::NAN, 0.0, 1.0, 1.0).is_none());
        assert!(Rectangle::new(0.0, 0.0, f64::INFINITY, 1.0).is_none());
        // Zero-height rules are valid primitives
        assert!(Rectangle::new(0.0, 5.0, 100.0, 5.0).is_some());
    }

    #[test]
    fn test_union_is_smallest_enclosing() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        let b = rect(50.0, 50.0, 150.0, 150.0);

        let union = a.union(&b);
        assert_eq!(union, rect(0.0, 0.0, 150.0, 150.0));
        assert!(union.contains(&a));
        assert!(union.contains(&b));
    }

    #[test]
    fn test_intersects_includes_touching_edges() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        let b = rect(50.0, 50.0, 150.0, 150.0);
        let c = rect(200.0, 200.0, 300.0, 300.0);
        let touching = rect(100.0, 0.0, 120.0, 10.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!b.intersects(&c));
        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
    }

    #[test]
    fn test_expand_grows_every_side() {
        let expanded = rect(10.0, 20.0, 30.0, 40.0).expand(5.0);
        assert_eq!(expanded, rect(5.0, 15.0, 35.0, 45.0));
        assert_eq!(expanded.area(), 30.0 * 30.0);
    }

    #[test]
    fn test_intersection() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 20.0, 20.0);
        assert_eq!(a.intersection(&b), Some(rect(5.0, 5.0, 10.0, 10.0)));
        assert_eq!(a.intersection(&rect(11.0, 11.0, 12.0, 12.0)), None);
    }

    #[test]
    fn test_merge_all() {
        assert_eq!(merge_all(&[] as &[Rectangle]), None);
        let rects = [rect(0.0, 0.0, 1.0, 1.0), rect(3.0, -2.0, 4.0, 0.5)];
        assert_eq!(merge_all(&rects), Some(rect(0.0, -2.0, 4.0, 1.0)));
    }
}
