// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Points and vectors.

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};
use peniko::kurbo;

use crate::scalar::{nearly_equal, Scalar};

/// A 2D point, also used as a vector.
///
/// The layout is `[x, y]` so slices of points can be uploaded directly as vertex data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Point {
    /// The x coordinate.
    pub x: Scalar,
    /// The y coordinate.
    pub y: Scalar,
}

impl Point {
    /// The point `(0, 0)`.
    pub const ZERO: Self = Self::new(0., 0.);

    /// Create a new point.
    pub const fn new(x: Scalar, y: Scalar) -> Self {
        Self { x, y }
    }

    /// Converts a kurbo point, narrowing to `f32`.
    pub fn from_kurbo(point: kurbo::Point) -> Self {
        Self::new(point.x as Scalar, point.y as Scalar)
    }

    /// Converts to a kurbo point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x as f64, self.y as f64)
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> Scalar {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the 3D cross product.
    ///
    /// Positive when `other` is rotated clockwise from `self` in a y-down coordinate system.
    #[inline]
    pub fn cross(self, other: Self) -> Scalar {
        self.x * other.y - self.y * other.x
    }

    /// Squared length.
    #[inline]
    pub fn length_squared(self) -> Scalar {
        self.dot(self)
    }

    /// Length.
    #[inline]
    pub fn length(self) -> Scalar {
        self.length_squared().sqrt()
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> Scalar {
        (self - other).length()
    }

    /// Returns the unit vector in the same direction, or `None` for a (nearly) zero vector.
    pub fn normalize(self) -> Option<Self> {
        let length = self.length();
        if length <= Scalar::EPSILON || !length.is_finite() {
            return None;
        }
        Some(self / length)
    }

    /// The vector rotated by 90 degrees, `(-y, x)`.
    #[inline]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Linear interpolation between `self` (at `t = 0`) and `other` (at `t = 1`).
    #[inline]
    pub fn lerp(self, other: Self, t: Scalar) -> Self {
        self + (other - self) * t
    }

    /// Componentwise absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// The vector rotated by `radians`.
    pub fn rotate(self, radians: Scalar) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Returns `true` if both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns `true` if both coordinates are within tolerance of `other`'s.
    pub fn nearly_equals(self, other: Self) -> bool {
        nearly_equal(self.x, other.x) && nearly_equal(self.y, other.y)
    }

    /// As an `[x, y]` array.
    #[inline]
    pub fn to_array(self) -> [Scalar; 2] {
        [self.x, self.y]
    }
}

impl From<[Scalar; 2]> for Point {
    fn from(value: [Scalar; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<(Scalar, Scalar)> for Point {
    fn from(value: (Scalar, Scalar)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<Scalar> for Point {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Scalar) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Point> for Point {
    type Output = Self;

    /// Componentwise product.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Div<Scalar> for Point {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Scalar) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
