// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-corner radii for rounded rectangles.

use core::ops::Mul;

use crate::rect::Rect;
use crate::scalar::{nearly_equal, Scalar};
use crate::size::Size;

/// The elliptical radii of the four corners of a rounded rectangle.
///
/// A corner whose width or height is not positive is empty and is treated as a square
/// corner. When all four corners are empty the radii describe a plain rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoundingRadii {
    /// The top left corner.
    pub top_left: Size,
    /// The top right corner.
    pub top_right: Size,
    /// The bottom left corner.
    pub bottom_left: Size,
    /// The bottom right corner.
    pub bottom_right: Size,
}

impl RoundingRadii {
    /// The same circular radius on every corner.
    pub fn make_radius(radius: Scalar) -> Self {
        Self::make_radii(Size::square(radius))
    }

    /// The same elliptical radii on every corner.
    pub fn make_radii(radii: Size) -> Self {
        Self {
            top_left: radii,
            top_right: radii,
            bottom_left: radii,
            bottom_right: radii,
        }
    }

    /// Returns `true` if every corner is empty.
    pub fn are_all_corners_empty(&self) -> bool {
        self.corners().iter().all(Size::is_empty)
    }

    /// Returns `true` if all four corners have (nearly) the same radii.
    pub fn are_all_corners_same(&self) -> bool {
        let same = |a: Size, b: Size| {
            nearly_equal(a.width, b.width) && nearly_equal(a.height, b.height)
        };
        same(self.top_left, self.top_right)
            && same(self.top_left, self.bottom_left)
            && same(self.top_left, self.bottom_right)
    }

    /// Returns `true` if every radius is finite.
    pub fn is_finite(&self) -> bool {
        self.corners().iter().all(Size::is_finite)
    }

    /// The corners in the order top left, top right, bottom left, bottom right.
    pub fn corners(&self) -> [Size; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Returns radii that fit inside `bounds`.
    ///
    /// Empty corners become exactly zero. A corner is empty when either dimension is not
    /// positive, so a corner of (10, 0) is dropped rather than scaled. Then, if the two radii
    /// along any edge add up to more than that edge's length, every corner is shrunk by the
    /// same factor: the smallest `edge / sum` ratio over the four edges. This keeps the
    /// proportions of the rounding intact instead of clipping individual corners.
    ///
    /// An empty `bounds`, all-empty radii or any non-finite radius produce all-zero radii.
    #[must_use]
    pub fn scaled(&self, bounds: &Rect) -> Self {
        let bounds = bounds.positive();
        if bounds.is_empty() || self.are_all_corners_empty() || !self.is_finite() {
            return Self::default();
        }

        let normalize = |corner: Size| {
            if corner.is_empty() {
                Size::ZERO
            } else {
                corner
            }
        };
        let radii = Self {
            top_left: normalize(self.top_left),
            top_right: normalize(self.top_right),
            bottom_left: normalize(self.bottom_left),
            bottom_right: normalize(self.bottom_right),
        };

        let size = bounds.size();
        let mut scale: Scalar = 1.0;
        let mut adjust = |r1: Scalar, r2: Scalar, dimension: Scalar| {
            let sum = r1 + r2;
            if sum > dimension {
                scale = scale.min(dimension / sum);
            }
        };
        adjust(radii.top_left.width, radii.top_right.width, size.width);
        adjust(radii.bottom_left.width, radii.bottom_right.width, size.width);
        adjust(radii.top_left.height, radii.bottom_left.height, size.height);
        adjust(radii.top_right.height, radii.bottom_right.height, size.height);

        if scale < 1.0 {
            radii * scale
        } else {
            radii
        }
    }
}

impl Mul<Scalar> for RoundingRadii {
    type Output = Self;

    fn mul(self, scale: Scalar) -> Self {
        Self {
            top_left: self.top_left * scale,
            top_right: self.top_right * scale,
            bottom_left: self.bottom_left * scale,
            bottom_right: self.bottom_right * scale,
        }
    }
}
