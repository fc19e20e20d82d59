// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{
    adjusted_stroke_width, stroke_alpha_coverage, Geometry, GeometryContext, GeometryResult,
    PrimitiveType,
};
use crate::config::DEFAULT_MIN_STROKE_SIZE;
use crate::error::GeometryError;
use crate::matrix::Matrix;
use crate::point::Point;
use crate::rect::Rect;
use crate::scalar::Scalar;

/// A filled circle or a circular ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleGeometry {
    center: Point,
    radius: Scalar,
    /// Negative for a filled circle.
    stroke_width: Scalar,
    min_stroke_size: Scalar,
}

impl CircleGeometry {
    /// A circle that is filled when `stroke_width` is negative and stroked otherwise.
    pub fn new(center: Point, radius: Scalar, stroke_width: Scalar) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            stroke_width,
            min_stroke_size: DEFAULT_MIN_STROKE_SIZE,
        }
    }

    /// A filled circle.
    pub fn filled(center: Point, radius: Scalar) -> Self {
        Self::new(center, radius, -1.0)
    }

    /// A ring centered on the circle's outline.
    pub fn stroked(center: Point, radius: Scalar, stroke_width: Scalar) -> Self {
        Self::new(center, radius, stroke_width.max(0.0))
    }

    /// Sets the thinnest ring, in device pixels, that is drawn at its real width.
    ///
    /// Pass the [`GeometryConfig::min_stroke_size`](crate::GeometryConfig::min_stroke_size)
    /// the geometry will be tessellated with.
    #[must_use]
    pub fn with_min_stroke_size(mut self, size: Scalar) -> Self {
        self.min_stroke_size = size;
        self
    }

    /// The center in local coordinates.
    pub fn center(&self) -> Point {
        self.center
    }

    /// The radius of the filled disc, or of the ring's center line.
    pub fn radius(&self) -> Scalar {
        self.radius
    }

    /// Returns `true` for a ring.
    pub fn is_stroked(&self) -> bool {
        self.stroke_width >= 0.0
    }

    /// The stroke width, or `None` for a filled circle.
    pub fn stroke_width(&self) -> Option<Scalar> {
        self.is_stroked().then_some(self.stroke_width)
    }

    /// Half the width the ring is drawn at under `transform`, or zero for a filled circle.
    fn drawn_half_width(&self, transform: &Matrix) -> Scalar {
        if !self.is_stroked() {
            return 0.0;
        }
        adjusted_stroke_width(transform, self.stroke_width, self.min_stroke_size) * 0.5
    }
}

impl Geometry for CircleGeometry {
    /// The exact bounds of the transformed circle.
    ///
    /// An affine transform maps the circle to an ellipse whose half extent along x is the
    /// radius times the length of the matrix row `(a, c)`, and along y of the row `(b, d)`.
    /// This stays tight and conservative under rotation. A ring includes the widening applied
    /// to hairlines, so a ring of zero radius still covers the dot it draws.
    fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        let r = self.radius + self.drawn_half_width(transform);
        if r <= 0.0 || !r.is_finite() {
            return None;
        }
        let [a, b, c, d, _, _] = transform.coeffs;
        let center = transform.transform_point(self.center);
        let extent = Point::new(a.hypot(c), b.hypot(d)) * r;
        Some(Rect::from_points(center - extent, center + extent))
    }

    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError> {
        let strip = if self.is_stroked() {
            let half_width = self.drawn_half_width(&ctx.transform);
            ctx.tessellator
                .stroked_circle(&ctx.transform, self.center, self.radius, half_width)
        } else {
            ctx.tessellator
                .filled_circle(&ctx.transform, self.center, self.radius)
        };
        ctx.positions_result(PrimitiveType::TriangleStrip, strip)
    }

    fn compute_alpha_coverage(&self, transform: &Matrix) -> Scalar {
        if !self.is_stroked() {
            return 1.0;
        }
        stroke_alpha_coverage(transform, self.stroke_width, self.min_stroke_size)
    }
}
