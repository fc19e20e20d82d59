// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sizes.

use core::ops::Mul;

use crate::scalar::Scalar;

/// A width and height.
///
/// Sizes are non-negative by convention; callers that derive sizes from arbitrary input
/// should clamp them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// The width.
    pub width: Scalar,
    /// The height.
    pub height: Scalar,
}

impl Size {
    /// The size `0 x 0`.
    pub const ZERO: Self = Self::new(0., 0.);

    /// Create a new size.
    pub const fn new(width: Scalar, height: Scalar) -> Self {
        Self { width, height }
    }

    /// A size with equal width and height.
    pub const fn square(side: Scalar) -> Self {
        Self::new(side, side)
    }

    /// Returns `true` if either dimension is zero, negative, or NaN.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Returns `true` if both dimensions are zero.
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Returns `true` if both dimensions are finite.
    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    /// The larger of the two dimensions.
    pub fn max_dimension(&self) -> Scalar {
        self.width.max(self.height)
    }

    /// Both dimensions clamped to be non-negative.
    pub fn clamp_non_negative(self) -> Self {
        Self::new(self.width.max(0.0), self.height.max(0.0))
    }
}

impl Mul<Scalar> for Size {
    type Output = Self;

    fn mul(self, rhs: Scalar) -> Self {
        Self::new(self.width * rhs, self.height * rhs)
    }
}
