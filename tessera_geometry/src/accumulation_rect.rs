// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Running bounds of a sequence of points and rectangles.

use crate::point::Point;
use crate::rect::Rect;
use crate::scalar::Scalar;

/// Accumulates the bounding box of points and rects, and notices when a rect lands on the
/// area covered so far.
///
/// Overlap detection compares each new rect against the bounding box of everything before
/// it, not against the individual rects. It can report overlap for rects that do not
/// actually touch, but never misses rects that do.
///
/// This is a plain value with no synchronization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccumulationRect {
    min_x: Scalar,
    min_y: Scalar,
    max_x: Scalar,
    max_y: Scalar,
    overlap_detected: bool,
}

impl Default for AccumulationRect {
    fn default() -> Self {
        Self::new()
    }
}

impl AccumulationRect {
    /// An accumulator with an inverted, empty extent.
    pub fn new() -> Self {
        Self {
            min_x: Scalar::MAX,
            min_y: Scalar::MAX,
            max_x: Scalar::MIN,
            max_y: Scalar::MIN,
            overlap_detected: false,
        }
    }

    /// Grows the bounds to include `p`. Points never trigger overlap detection.
    pub fn accumulate_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Grows the bounds to include `rect`.
    ///
    /// Empty rects are ignored. A rect that shares area with the current bounds sets the
    /// overlap flag; one that only touches an edge does not.
    pub fn accumulate_rect(&mut self, rect: &Rect) {
        if rect.is_empty() {
            return;
        }
        if rect.left < self.max_x
            && rect.right > self.min_x
            && rect.top < self.max_y
            && rect.bottom > self.min_y
        {
            self.overlap_detected = true;
        }
        self.min_x = self.min_x.min(rect.left);
        self.min_y = self.min_y.min(rect.top);
        self.max_x = self.max_x.max(rect.right);
        self.max_y = self.max_y.max(rect.bottom);
    }

    /// Folds in the bounds and overlap state of another accumulator.
    pub fn accumulate(&mut self, other: &Self) {
        self.overlap_detected |= other.overlap_detected;
        if other.is_not_empty() {
            self.accumulate_rect(&other.bounds());
        } else if other.min_x <= other.max_x && other.min_y <= other.max_y {
            self.accumulate_point(Point::new(other.min_x, other.min_y));
            self.accumulate_point(Point::new(other.max_x, other.max_y));
        }
    }

    /// Returns `true` if the bounds have no area.
    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Returns `true` if the bounds span a positive width and height.
    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// The accumulated bounds, or an empty rect at the origin if nothing was accumulated.
    ///
    /// Accumulated points that span no area still give their degenerate bounds.
    pub fn bounds(&self) -> Rect {
        if self.min_x <= self.max_x && self.min_y <= self.max_y {
            Rect::make_ltrb(self.min_x, self.min_y, self.max_x, self.max_y)
        } else {
            Rect::ZERO
        }
    }

    /// Returns `true` once any accumulated rect landed on the bounds accumulated before it.
    pub fn overlap_detected(&self) -> bool {
        self.overlap_detected
    }

    /// Forgets everything, including detected overlap.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::AccumulationRect;
    use crate::point::Point;
    use crate::rect::Rect;

    #[test]
    fn empty_until_area_is_spanned() {
        let mut acc = AccumulationRect::new();
        assert!(acc.is_empty());
        assert_eq!(acc.bounds(), Rect::ZERO);

        acc.accumulate_point(Point::new(10.0, 10.0));
        assert!(acc.is_empty());
        assert_eq!(acc.bounds(), Rect::make_ltrb(10.0, 10.0, 10.0, 10.0));

        acc.accumulate_point(Point::new(20.0, 10.0));
        assert!(acc.is_empty());

        acc.accumulate_point(Point::new(15.0, 30.0));
        assert!(acc.is_not_empty());
        assert_eq!(acc.bounds(), Rect::make_ltrb(10.0, 10.0, 20.0, 30.0));
        assert!(!acc.overlap_detected());
    }

    #[test]
    fn overlap_uses_running_bounds() {
        let mut acc = AccumulationRect::new();
        acc.accumulate_rect(&Rect::make_ltrb(0.0, 0.0, 10.0, 10.0));
        acc.accumulate_rect(&Rect::make_ltrb(20.0, 20.0, 30.0, 30.0));
        assert!(!acc.overlap_detected());

        // Disjoint from both rects, but inside their combined bounds.
        acc.accumulate_rect(&Rect::make_ltrb(20.0, 0.0, 30.0, 10.0));
        assert!(acc.overlap_detected());

        acc.accumulate_rect(&Rect::make_ltrb(100.0, 100.0, 110.0, 110.0));
        assert!(acc.overlap_detected());
        assert_eq!(acc.bounds(), Rect::make_ltrb(0.0, 0.0, 110.0, 110.0));
    }

    #[test]
    fn touching_edges_and_empty_rects_do_not_overlap() {
        let mut acc = AccumulationRect::new();
        acc.accumulate_rect(&Rect::make_ltrb(0.0, 0.0, 10.0, 10.0));
        acc.accumulate_rect(&Rect::make_ltrb(10.0, 0.0, 20.0, 10.0));
        acc.accumulate_rect(&Rect::make_ltrb(5.0, 5.0, 5.0, 8.0));
        assert!(!acc.overlap_detected());
        assert_eq!(acc.bounds(), Rect::make_ltrb(0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn reset_clears_overlap() {
        let mut acc = AccumulationRect::default();
        acc.accumulate_rect(&Rect::make_ltrb(0.0, 0.0, 10.0, 10.0));
        acc.accumulate_rect(&Rect::make_ltrb(5.0, 5.0, 15.0, 15.0));
        assert!(acc.overlap_detected());
        acc.reset();
        assert!(acc.is_empty());
        assert!(!acc.overlap_detected());
    }

    #[test]
    fn merging_accumulators() {
        let mut a = AccumulationRect::new();
        a.accumulate_rect(&Rect::make_ltrb(0.0, 0.0, 10.0, 10.0));
        let mut b = AccumulationRect::new();
        b.accumulate_rect(&Rect::make_ltrb(50.0, 50.0, 60.0, 60.0));
        a.accumulate(&b);
        assert!(!a.overlap_detected());
        assert_eq!(a.bounds(), Rect::make_ltrb(0.0, 0.0, 60.0, 60.0));
        a.accumulate(&AccumulationRect::new());
        assert_eq!(a.bounds(), Rect::make_ltrb(0.0, 0.0, 60.0, 60.0));
    }
}
