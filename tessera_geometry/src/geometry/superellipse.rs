// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Superellipses and rectangles with superelliptical corners.
//!
//! A superellipse of degree `n` with semi-axes `b` (horizontal) and `a` (vertical) is the
//! curve `|x/b|^n + |y/a|^n = 1`. Degree 2 is an ellipse; larger degrees bulge towards the
//! bounding rectangle. There is no closed form for the arc length, so the curve is sampled
//! at angles like an ellipse, with the density picked from the on-screen size.

use smallvec::smallvec;

use super::{flat_bands_cover, Geometry, GeometryContext, GeometryResult, PrimitiveType};
use crate::error::GeometryError;
use crate::flatten::{Contour, Polyline};
use crate::matrix::Matrix;
use crate::point::Point;
use crate::rect::Rect;
use crate::rounding_radii::RoundingRadii;
use crate::scalar::Scalar;
use crate::size::Size;
use crate::tessellator::{quadrant_divisions, Tessellator};

/// The degree of the corners of a [`RoundSuperellipseGeometry`].
pub const ROUND_SUPERELLIPSE_DEGREE: Scalar = 5.0;

/// The outline of a rectangle whose corners are quarter superellipses.
///
/// Radii are in the order top left, top right, bottom right, bottom left, and must already
/// fit inside `bounds`. The outline runs clockwise (in y-down coordinates) from the top of
/// the left edge.
fn outline(
    tessellator: &mut Tessellator,
    transform: &Matrix,
    bounds: &Rect,
    radii: [Size; 4],
    degree: Scalar,
) -> Polyline {
    let max_radius = radii.iter().map(Size::max_dimension).fold(0.0, Scalar::max);
    // Higher degrees spread the samples apart near the axes.
    let divisions = quadrant_divisions(max_radius * transform.max_basis_length()) * 2;
    let trigs = tessellator.trigs(divisions);
    let exponent = 2.0 / degree;

    let [tl, tr, br, bl] = radii;
    let corners = [
        (Point::new(bounds.left + tl.width, bounds.top + tl.height), tl),
        (Point::new(bounds.right - tr.width, bounds.top + tr.height), tr),
        (Point::new(bounds.right - br.width, bounds.bottom - br.height), br),
        (Point::new(bounds.left + bl.width, bounds.bottom - bl.height), bl),
    ];
    let mut points: Vec<Point> = Vec::with_capacity(trigs.len() * 4);
    for (quadrant, (center, radii)) in corners.into_iter().enumerate() {
        for trig in trigs {
            let c = trig.cos.powf(exponent);
            let s = trig.sin.powf(exponent);
            let (rx, ry) = (radii.width, radii.height);
            let offset = match quadrant {
                0 => Point::new(-rx * c, -ry * s),
                1 => Point::new(rx * s, -ry * c),
                2 => Point::new(rx * c, ry * s),
                _ => Point::new(-rx * s, ry * c),
            };
            let p = center + offset;
            if points.last() != Some(&p) {
                points.push(p);
            }
        }
    }
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    let end = points.len();
    Polyline {
        points,
        contours: smallvec![Contour {
            start: 0,
            end,
            is_closed: true,
        }],
    }
}

fn convex_strip(
    ctx: &mut GeometryContext<'_>,
    polyline: &Polyline,
) -> Result<GeometryResult, GeometryError> {
    if polyline.distinct_points_up_to_three() < 3 {
        return Ok(GeometryResult::empty(ctx.shader_transform()));
    }
    let strip = Tessellator::tessellate_convex(polyline);
    ctx.positions_result(PrimitiveType::TriangleStrip, strip)
}

/// A filled superellipse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuperellipseGeometry {
    center: Point,
    radius: Scalar,
    degree: Scalar,
    alpha: Scalar,
    beta: Scalar,
}

impl SuperellipseGeometry {
    /// The curve `|x/beta|^degree + |y/alpha|^degree = 1` scaled by `radius` around `center`.
    ///
    /// Degrees below 1 would not be convex and are raised to 1.
    pub fn new(
        center: Point,
        radius: Scalar,
        degree: Scalar,
        alpha: Scalar,
        beta: Scalar,
    ) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            degree: degree.max(1.0),
            alpha: alpha.abs(),
            beta: beta.abs(),
        }
    }

    pub fn degree(&self) -> Scalar {
        self.degree
    }

    /// The horizontal and vertical semi-axes.
    pub fn semi_axes(&self) -> Size {
        Size::new(self.radius * self.beta, self.radius * self.alpha)
    }

    pub fn bounds(&self) -> Rect {
        let Size { width, height } = self.semi_axes();
        Rect::make_ltrb(
            self.center.x - width,
            self.center.y - height,
            self.center.x + width,
            self.center.y + height,
        )
    }
}

impl Geometry for SuperellipseGeometry {
    fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        let bounds = self.bounds();
        if bounds.is_empty() || !bounds.is_finite() {
            return None;
        }
        Some(bounds.transform_bounds(transform))
    }

    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError> {
        let bounds = self.bounds();
        if bounds.is_empty() {
            return Ok(GeometryResult::empty(ctx.shader_transform()));
        }
        let polyline = outline(
            ctx.tessellator,
            &ctx.transform,
            &bounds,
            [self.semi_axes(); 4],
            self.degree,
        );
        convex_strip(ctx, &polyline)
    }
}

/// A filled rectangle with superelliptical corners of degree [`ROUND_SUPERELLIPSE_DEGREE`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundSuperellipseGeometry {
    bounds: Rect,
    radii: RoundingRadii,
}

impl RoundSuperellipseGeometry {
    /// Radii that do not fit are scaled down with [`RoundingRadii::scaled`].
    pub fn new(bounds: Rect, radii: RoundingRadii) -> Self {
        let bounds = bounds.positive();
        Self {
            bounds,
            radii: radii.scaled(&bounds),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn radii(&self) -> RoundingRadii {
        self.radii
    }
}

impl Geometry for RoundSuperellipseGeometry {
    fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        if self.bounds.is_empty() {
            return None;
        }
        Some(self.bounds.transform_bounds(transform))
    }

    fn covers_area(&self, transform: &Matrix, rect: &Rect) -> bool {
        let RoundingRadii {
            top_left: tl,
            top_right: tr,
            bottom_left: bl,
            bottom_right: br,
        } = self.radii;
        let insets = [
            tl.width.max(bl.width),
            tl.height.max(tr.height),
            tr.width.max(br.width),
            bl.height.max(br.height),
        ];
        flat_bands_cover(&self.bounds, insets, transform, rect)
    }

    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError> {
        if self.bounds.is_empty() {
            return Ok(GeometryResult::empty(ctx.shader_transform()));
        }
        let r = self.radii;
        let polyline = outline(
            ctx.tessellator,
            &ctx.transform,
            &self.bounds,
            [r.top_left, r.top_right, r.bottom_right, r.bottom_left],
            ROUND_SUPERELLIPSE_DEGREE,
        );
        convex_strip(ctx, &polyline)
    }
}
