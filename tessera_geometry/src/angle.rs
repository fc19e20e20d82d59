// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angle newtypes.

use core::ops::{Add, Neg, Sub};

use crate::scalar::Scalar;

/// An angle in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Degrees(pub Scalar);

/// An angle in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Radians(pub Scalar);

impl Degrees {
    /// The raw value.
    #[inline]
    pub fn value(self) -> Scalar {
        self.0
    }

    /// Converts to radians.
    #[inline]
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }
}

impl Radians {
    /// The raw value.
    #[inline]
    pub fn value(self) -> Scalar {
        self.0
    }

    /// Converts to degrees.
    #[inline]
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0.to_degrees())
    }
}

impl From<Degrees> for Radians {
    fn from(value: Degrees) -> Self {
        value.to_radians()
    }
}

impl From<Radians> for Degrees {
    fn from(value: Radians) -> Self {
        value.to_degrees()
    }
}

macro_rules! angle_ops {
    ($ty:ident) => {
        impl Add for $ty {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $ty {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $ty {
            type Output = Self;

            fn neg(self) -> Self {
                Self(-self.0)
            }
        }
    };
}

angle_ops!(Degrees);
angle_ops!(Radians);

#[cfg(test)]
mod tests {
    use super::{Degrees, Radians};

    #[test]
    fn conversion() {
        let r: Radians = Degrees(180.0).into();
        assert!((r.value() - core::f32::consts::PI).abs() < 1e-6);
        let d: Degrees = Radians(core::f32::consts::FRAC_PI_2).into();
        assert!((d.value() - 90.0).abs() < 1e-4);
    }
}
