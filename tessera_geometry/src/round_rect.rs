// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rounded rectangles.

use crate::point::Point;
use crate::rect::Rect;
use crate::rounding_radii::RoundingRadii;
use crate::scalar::{nearly_equal, Scalar};
use crate::size::Size;

/// A rectangle with elliptical corners.
///
/// Values built through the constructors always hold positive bounds and radii that fit
/// them, see [`RoundingRadii::scaled`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoundRect {
    bounds: Rect,
    radii: RoundingRadii,
}

impl RoundRect {
    /// A rect with the given radii, shrunk to fit if needed.
    pub fn make_rect_radii(rect: Rect, radii: RoundingRadii) -> Self {
        let bounds = rect.positive();
        Self {
            bounds,
            radii: radii.scaled(&bounds),
        }
    }

    /// A rect with the same elliptical radii on every corner.
    pub fn make_rect_xy(rect: Rect, rx: Scalar, ry: Scalar) -> Self {
        Self::make_rect_radii(rect, RoundingRadii::make_radii(Size::new(rx, ry)))
    }

    /// A rect with square corners.
    pub fn make_rect(rect: Rect) -> Self {
        Self::make_rect_radii(rect, RoundingRadii::default())
    }

    /// The round rect that traces the oval inscribed in `rect`.
    pub fn make_oval(rect: Rect) -> Self {
        let bounds = rect.positive();
        Self::make_rect_radii(
            bounds,
            RoundingRadii::make_radii(Size::new(bounds.width() * 0.5, bounds.height() * 0.5)),
        )
    }

    /// The bounding rectangle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The corner radii.
    pub fn radii(&self) -> RoundingRadii {
        self.radii
    }

    /// Returns `true` if the bounds are empty.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Returns `true` if every corner is square.
    pub fn is_rect(&self) -> bool {
        self.radii.are_all_corners_empty()
    }

    /// Returns `true` if every corner spans half of the bounds, forming an ellipse.
    pub fn is_oval(&self) -> bool {
        let half = Size::new(self.bounds.width() * 0.5, self.bounds.height() * 0.5);
        !self.is_empty()
            && self.radii.are_all_corners_same()
            && nearly_equal(self.radii.top_left.width, half.width)
            && nearly_equal(self.radii.top_left.height, half.height)
    }

    /// The same round rect translated by `offset`.
    #[must_use]
    pub fn shift(&self, offset: Point) -> Self {
        Self {
            bounds: self.bounds.shift(offset),
            radii: self.radii,
        }
    }

    /// Returns `true` if `p` lies inside the rounded shape.
    pub fn contains(&self, p: Point) -> bool {
        if !self.bounds.contains_point(p) {
            return false;
        }
        let b = &self.bounds;
        let corners = [
            (self.radii.top_left, Point::new(b.left, b.top), Point::new(1.0, 1.0)),
            (self.radii.top_right, Point::new(b.right, b.top), Point::new(-1.0, 1.0)),
            (self.radii.bottom_left, Point::new(b.left, b.bottom), Point::new(1.0, -1.0)),
            (self.radii.bottom_right, Point::new(b.right, b.bottom), Point::new(-1.0, -1.0)),
        ];
        for (radii, corner, inward) in corners {
            if radii.is_empty() {
                continue;
            }
            let center = corner + Point::new(radii.width, radii.height) * inward;
            let d = p - center;
            // Only the quadrant facing away from the rect interior is rounded.
            if d.x * inward.x < 0.0 && d.y * inward.y < 0.0 {
                let nx = d.x / radii.width;
                let ny = d.y / radii.height;
                if nx * nx + ny * ny > 1.0 {
                    return false;
                }
            }
        }
        true
    }
}
