// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D affine transforms.

use core::ops::Mul;

use bytemuck::{Pod, Zeroable};
use peniko::kurbo;

use crate::point::Point;
use crate::scalar::Scalar;

/// A 2D affine transform.
///
/// The coefficients are in the same order as [`kurbo::Affine`]: a point `(x, y)` maps to
/// `(a * x + c * y + e, b * x + d * y + f)`.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix {
    /// The coefficients `[a, b, c, d, e, f]`.
    pub coeffs: [Scalar; 6],
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        coeffs: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Creates a transform from its coefficients.
    pub const fn new(coeffs: [Scalar; 6]) -> Self {
        Self { coeffs }
    }

    /// A translation.
    pub const fn translate(tx: Scalar, ty: Scalar) -> Self {
        Self::new([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// A non-uniform scale about the origin.
    pub const fn scale(sx: Scalar, sy: Scalar) -> Self {
        Self::new([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// A rotation about the origin.
    pub fn rotate(radians: Scalar) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new([cos, sin, -sin, cos, 0.0, 0.0])
    }

    /// Creates a transform from a kurbo affine matrix.
    pub fn from_kurbo(transform: &kurbo::Affine) -> Self {
        Self::new(transform.as_coeffs().map(|x| x as Scalar))
    }

    /// Converts the transform to a kurbo affine matrix.
    pub fn to_kurbo(&self) -> kurbo::Affine {
        kurbo::Affine::new(self.coeffs.map(|x| x as f64))
    }

    /// The translation component.
    pub fn translation(&self) -> Point {
        Point::new(self.coeffs[4], self.coeffs[5])
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.coeffs;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Applies only the linear part of the transform to a vector.
    #[inline]
    pub fn transform_vector(&self, v: Point) -> Point {
        let [a, b, c, d, _, _] = self.coeffs;
        Point::new(a * v.x + c * v.y, b * v.x + d * v.y)
    }

    /// The determinant of the linear part.
    pub fn determinant(&self) -> Scalar {
        let [a, b, c, d, _, _] = self.coeffs;
        a * d - b * c
    }

    /// Returns `true` if the transform collapses the plane onto a line or a point.
    pub fn is_degenerate(&self) -> bool {
        let det = self.determinant();
        det == 0.0 || !det.is_finite()
    }

    /// The inverse transform, or `None` if the transform is not invertible.
    pub fn invert(&self) -> Option<Self> {
        if self.is_degenerate() {
            return None;
        }
        let [a, b, c, d, e, f] = self.coeffs;
        let inv_det = self.determinant().recip();
        let ia = d * inv_det;
        let ib = -b * inv_det;
        let ic = -c * inv_det;
        let id = a * inv_det;
        Some(Self::new([
            ia,
            ib,
            ic,
            id,
            -(ia * e + ic * f),
            -(ib * e + id * f),
        ]))
    }

    /// The length of the longer of the two transformed unit basis vectors.
    ///
    /// This is the largest factor by which the transform can stretch a distance along an
    /// axis, and is the usual way to turn a device space tolerance into a local one.
    pub fn max_basis_length(&self) -> Scalar {
        let [a, b, c, d, _, _] = self.coeffs;
        let x = (a * a + b * b).sqrt();
        let y = (c * c + d * d).sqrt();
        x.max(y)
    }

    /// The length of each transformed basis vector.
    pub fn basis_lengths(&self) -> (Scalar, Scalar) {
        let [a, b, c, d, _, _] = self.coeffs;
        ((a * a + b * b).sqrt(), (c * c + d * d).sqrt())
    }

    /// Returns `true` if the transform has no rotation or skew.
    pub fn is_translation_scale_only(&self) -> bool {
        self.coeffs[1] == 0.0 && self.coeffs[2] == 0.0
    }

    /// Returns `true` if the transform maps axis-aligned rects to axis-aligned rects.
    pub fn is_aligned(&self) -> bool {
        let [a, b, c, d, _, _] = self.coeffs;
        (b == 0.0 && c == 0.0) || (a == 0.0 && d == 0.0)
    }

    /// Returns `true` for the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Returns `true` if every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_finite())
    }
}

impl Mul for Matrix {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        let [a0, b0, c0, d0, e0, f0] = self.coeffs;
        let [a1, b1, c1, d1, e1, f1] = other.coeffs;
        Self::new([
            a0 * a1 + c0 * b1,
            b0 * a1 + d0 * b1,
            a0 * c1 + c0 * d1,
            b0 * c1 + d0 * d1,
            a0 * e1 + c0 * f1 + e0,
            b0 * e1 + d0 * f1 + f0,
        ])
    }
}

impl Mul<Point> for Matrix {
    type Output = Point;

    #[inline]
    fn mul(self, p: Point) -> Point {
        self.transform_point(p)
    }
}
