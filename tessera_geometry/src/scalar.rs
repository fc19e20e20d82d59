// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scalar type and tolerance comparisons.
//!
//! Equality and degeneracy checks in this crate go through [`nearly_equal`] and
//! [`nearly_zero`] rather than exact float comparison.

/// The floating point type used for all coordinates.
pub type Scalar = f32;

/// Two scalars closer than this are considered equal.
pub const EH_CLOSE_ENOUGH: Scalar = 1e-3;

/// `sqrt(2)`.
pub const SQRT_2: Scalar = core::f32::consts::SQRT_2;

/// `1 / sqrt(2)`, the conic weight of a quarter circle.
pub const FRAC_1_SQRT_2: Scalar = core::f32::consts::FRAC_1_SQRT_2;

/// Returns `true` if `a` and `b` differ by less than [`EH_CLOSE_ENOUGH`].
///
/// The comparison is symmetric for all finite inputs.
#[inline]
pub fn nearly_equal(a: Scalar, b: Scalar) -> bool {
    (a - b).abs() < EH_CLOSE_ENOUGH
}

/// Returns `true` if `x` is within [`EH_CLOSE_ENOUGH`] of zero.
#[inline]
pub fn nearly_zero(x: Scalar) -> bool {
    nearly_equal(x, 0.0)
}

/// Returns `true` if `a` and `b` differ by less than `tolerance`.
#[inline]
pub fn nearly_equal_with(a: Scalar, b: Scalar, tolerance: Scalar) -> bool {
    (a - b).abs() < tolerance
}
