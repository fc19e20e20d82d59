// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotate, uniform scale and translate transforms for sprite drawing.

use crate::matrix::Matrix;
use crate::point::Point;
use crate::rect::Rect;
use crate::scalar::Scalar;

/// A rotation and uniform scale followed by a translation, with no shear.
///
/// `scaled_cos` and `scaled_sin` are `scale * cos(angle)` and `scale * sin(angle)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RSTransform {
    /// `scale * cos(angle)`.
    pub scaled_cos: Scalar,
    /// `scale * sin(angle)`.
    pub scaled_sin: Scalar,
    /// Horizontal translation.
    pub translate_x: Scalar,
    /// Vertical translation.
    pub translate_y: Scalar,
}

impl Default for RSTransform {
    fn default() -> Self {
        Self {
            scaled_cos: 1.0,
            scaled_sin: 0.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl RSTransform {
    /// Scales and rotates about the origin, then moves the origin to `origin`.
    pub fn make(origin: Point, scale: Scalar, radians: Scalar) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            scaled_cos: cos * scale,
            scaled_sin: sin * scale,
            translate_x: origin.x,
            translate_y: origin.y,
        }
    }

    /// Returns `true` if the rotation is a multiple of 90 degrees.
    pub fn is_axis_aligned(&self) -> bool {
        self.scaled_cos == 0.0 || self.scaled_sin == 0.0
    }

    /// The equivalent affine matrix.
    pub fn matrix(&self) -> Matrix {
        Matrix::new([
            self.scaled_cos,
            self.scaled_sin,
            -self.scaled_sin,
            self.scaled_cos,
            self.translate_x,
            self.translate_y,
        ])
    }

    /// The transformed corners of a `width` x `height` rect at the origin.
    ///
    /// The order is top left, top right, bottom left, bottom right.
    pub fn quad(&self, width: Scalar, height: Scalar) -> [Point; 4] {
        let origin = Point::new(self.translate_x, self.translate_y);
        let along_width = Point::new(width * self.scaled_cos, width * self.scaled_sin);
        let along_height = Point::new(-height * self.scaled_sin, height * self.scaled_cos);
        [
            origin,
            origin + along_width,
            origin + along_height,
            origin + along_width + along_height,
        ]
    }

    /// The bounds of [`RSTransform::quad`], or `None` if any corner is not finite.
    pub fn bounds(&self, width: Scalar, height: Scalar) -> Option<Rect> {
        let quad = self.quad(width, height);
        if !quad.iter().all(|p| p.is_finite()) {
            return None;
        }
        Rect::make_point_bounds(quad)
    }
}
