// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned rectangles.

use peniko::kurbo;

use crate::matrix::Matrix;
use crate::point::Point;
use crate::scalar::Scalar;
use crate::size::Size;

/// An axis-aligned rectangle given by its edges.
///
/// The edges may be in any order. [`Rect::positive`] returns the canonical form with
/// `left <= right` and `top <= bottom`. A rect is empty when `left >= right` or `top >= bottom`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// The left edge.
    pub left: Scalar,
    /// The top edge.
    pub top: Scalar,
    /// The right edge.
    pub right: Scalar,
    /// The bottom edge.
    pub bottom: Scalar,
}

impl Rect {
    /// The empty rect at the origin.
    pub const ZERO: Self = Self::make_ltrb(0., 0., 0., 0.);

    /// A rect from its four edges.
    pub const fn make_ltrb(left: Scalar, top: Scalar, right: Scalar, bottom: Scalar) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A rect from an origin and a size.
    pub fn make_xywh(x: Scalar, y: Scalar, width: Scalar, height: Scalar) -> Self {
        Self::make_ltrb(x, y, x + width, y + height)
    }

    /// A rect at the origin with the given size.
    pub fn make_size(size: Size) -> Self {
        Self::make_ltrb(0.0, 0.0, size.width, size.height)
    }

    /// A rect from two opposite corners.
    pub fn from_points(p0: Point, p1: Point) -> Self {
        Self::make_ltrb(p0.x, p0.y, p1.x, p1.y).positive()
    }

    /// The bounding box of a set of points, or `None` if there are none.
    pub fn make_point_bounds(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::make_ltrb(first.x, first.y, first.x, first.y);
        for p in points {
            bounds.left = bounds.left.min(p.x);
            bounds.top = bounds.top.min(p.y);
            bounds.right = bounds.right.max(p.x);
            bounds.bottom = bounds.bottom.max(p.y);
        }
        Some(bounds)
    }

    /// The largest representable rect.
    pub const fn maximum() -> Self {
        Self::make_ltrb(Scalar::MIN, Scalar::MIN, Scalar::MAX, Scalar::MAX)
    }

    /// Returns `true` if the rect has no area, or any edge is NaN.
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// Returns `true` if every edge is finite.
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Returns `true` if this is [`Rect::maximum`].
    pub fn is_maximum(&self) -> bool {
        *self == Self::maximum()
    }

    /// The rect with edges sorted so that `left <= right` and `top <= bottom`.
    #[must_use]
    pub fn positive(&self) -> Self {
        Self::make_ltrb(
            self.left.min(self.right),
            self.top.min(self.bottom),
            self.left.max(self.right),
            self.top.max(self.bottom),
        )
    }

    /// The signed width.
    pub fn width(&self) -> Scalar {
        self.right - self.left
    }

    /// The signed height.
    pub fn height(&self) -> Scalar {
        self.bottom - self.top
    }

    /// The size.
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// The area of the positive rect.
    pub fn area(&self) -> Scalar {
        let p = self.positive();
        p.width() * p.height()
    }

    /// The top left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// The center.
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// The four corners in the order top left, top right, bottom left, bottom right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.left, self.bottom),
            Point::new(self.right, self.bottom),
        ]
    }

    /// Returns `true` if the point lies inside, with the right and bottom edges exclusive.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// Returns `true` if `other` lies entirely inside this rect.
    ///
    /// An empty `other` is contained by any non-empty rect.
    pub fn contains_rect(&self, other: &Self) -> bool {
        if self.is_empty() {
            return false;
        }
        if other.is_empty() {
            return true;
        }
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Returns `true` if the two rects share a region with positive area.
    pub fn intersects(&self, other: &Self) -> bool {
        self.left.max(other.left) < self.right.min(other.right)
            && self.top.max(other.top) < self.bottom.min(other.bottom)
    }

    /// The overlapping region, or `None` if it is empty.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let r = Self::make_ltrb(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (!r.is_empty()).then_some(r)
    }

    /// The smallest rect containing both.
    ///
    /// An empty operand is ignored.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self::make_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Grows each edge outward by the given amounts.
    #[must_use]
    pub fn expand(&self, dx: Scalar, dy: Scalar) -> Self {
        Self::make_ltrb(
            self.left - dx,
            self.top - dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Translates the rect.
    #[must_use]
    pub fn shift(&self, offset: Point) -> Self {
        Self::make_ltrb(
            self.left + offset.x,
            self.top + offset.y,
            self.right + offset.x,
            self.bottom + offset.y,
        )
    }

    /// Scales every edge.
    #[must_use]
    pub fn scale(&self, sx: Scalar, sy: Scalar) -> Self {
        Self::make_ltrb(
            self.left * sx,
            self.top * sy,
            self.right * sx,
            self.bottom * sy,
        )
    }

    /// The bounding box of the four transformed corners.
    #[must_use]
    pub fn transform_bounds(&self, transform: &Matrix) -> Self {
        if self.is_maximum() {
            return *self;
        }
        Self::make_point_bounds(self.corners().map(|p| transform.transform_point(p)))
            .unwrap_or(Self::ZERO)
    }

    /// Converts a kurbo rect, narrowing to `f32`.
    pub fn from_kurbo(rect: kurbo::Rect) -> Self {
        Self::make_ltrb(
            rect.x0 as Scalar,
            rect.y0 as Scalar,
            rect.x1 as Scalar,
            rect.y1 as Scalar,
        )
    }

    /// Converts to a kurbo rect.
    pub fn to_kurbo(&self) -> kurbo::Rect {
        kurbo::Rect::new(
            self.left as f64,
            self.top as f64,
            self.right as f64,
            self.bottom as f64,
        )
    }
}
