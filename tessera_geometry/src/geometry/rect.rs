// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::Join;

use super::{
    adjusted_stroke_width, stroke_alpha_coverage, Geometry, GeometryContext, GeometryResult,
    PrimitiveType,
};
use crate::config::DEFAULT_MIN_STROKE_SIZE;
use crate::error::GeometryError;
use crate::matrix::Matrix;
use crate::path::Path;
use crate::rect::Rect;
use crate::scalar::Scalar;
use crate::stroke::{stroke_path, StrokeStyle};

/// A filled rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillRectGeometry {
    rect: Rect,
}

impl FillRectGeometry {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect: rect.positive(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
}

impl Geometry for FillRectGeometry {
    fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        if self.rect.is_empty() {
            return None;
        }
        Some(self.rect.transform_bounds(transform))
    }

    fn covers_area(&self, transform: &Matrix, rect: &Rect) -> bool {
        transform.is_translation_scale_only()
            && !self.rect.is_empty()
            && self.rect.transform_bounds(transform).contains_rect(rect)
    }

    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError> {
        if self.rect.is_empty() {
            return Ok(GeometryResult::empty(ctx.shader_transform()));
        }
        let [tl, tr, bl, br] = self.rect.corners();
        ctx.positions_result(PrimitiveType::TriangleStrip, vec![tl, tr, bl, br])
    }

    fn is_axis_aligned_rect(&self) -> bool {
        true
    }
}

/// The outline of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeRectGeometry {
    rect: Rect,
    stroke_width: Scalar,
    join: Join,
    miter_limit: Scalar,
    min_stroke_size: Scalar,
}

impl StrokeRectGeometry {
    /// A rectangle outline centered on the edges of `rect`.
    ///
    /// A width of zero is a hairline.
    pub fn new(rect: Rect, stroke_width: Scalar, join: Join, miter_limit: Scalar) -> Self {
        Self {
            rect: rect.positive(),
            stroke_width: stroke_width.max(0.0),
            join,
            miter_limit,
            min_stroke_size: DEFAULT_MIN_STROKE_SIZE,
        }
    }

    /// Sets the thinnest outline, in device pixels, that is drawn at its real width.
    ///
    /// Pass the [`GeometryConfig::min_stroke_size`](crate::GeometryConfig::min_stroke_size)
    /// the geometry will be tessellated with.
    #[must_use]
    pub fn with_min_stroke_size(mut self, size: Scalar) -> Self {
        self.min_stroke_size = size;
        self
    }

    /// The rectangle whose edges the outline is centered on.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The requested width, before hairlines are widened.
    pub fn stroke_width(&self) -> Scalar {
        self.stroke_width
    }

    /// How the corners are joined.
    pub fn join(&self) -> Join {
        self.join
    }

    /// The miter limit, used only by [`Join::Miter`].
    pub fn miter_limit(&self) -> Scalar {
        self.miter_limit
    }
}

impl Geometry for StrokeRectGeometry {
    fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        let width = adjusted_stroke_width(transform, self.stroke_width, self.min_stroke_size);
        // Right angle miters reach exactly to the corners of the expanded rect.
        let outset = width * 0.5;
        let expanded = self.rect.expand(outset, outset);
        if expanded.is_empty() {
            return None;
        }
        Some(expanded.transform_bounds(transform))
    }

    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError> {
        let width = adjusted_stroke_width(&ctx.transform, self.stroke_width, self.min_stroke_size);
        let style = StrokeStyle::new(width)
            .with_join(self.join)
            .with_miter_limit(self.miter_limit);
        let triangles = stroke_path(&Path::make_rect(self.rect), &style, ctx.tolerance());
        ctx.positions_result(PrimitiveType::TriangleList, triangles)
    }

    fn compute_alpha_coverage(&self, transform: &Matrix) -> Scalar {
        stroke_alpha_coverage(transform, self.stroke_width, self.min_stroke_size)
    }
}

#[cfg(test)]
mod tests {
    use peniko::kurbo::Join;

    use super::{FillRectGeometry, StrokeRectGeometry};
    use crate::config::GeometryConfig;
    use crate::geometry::{Geometry, GeometryContext, PrimitiveType};
    use crate::matrix::Matrix;
    use crate::point::Point;
    use crate::rect::Rect;
    use crate::size::Size;
    use crate::tessellator::Tessellator;

    #[test]
    fn fill_rect_covers_contained_rects() {
        let rect = FillRectGeometry::new(Rect::make_ltrb(0.0, 0.0, 100.0, 100.0));
        assert!(rect.is_axis_aligned_rect());
        let query = Rect::make_ltrb(10.0, 10.0, 20.0, 20.0);
        assert!(rect.covers_area(&Matrix::IDENTITY, &query));
        assert!(rect.covers_area(&Matrix::translate(5.0, 5.0), &query));
        assert!(!rect.covers_area(&Matrix::translate(15.0, 0.0), &query));
        assert!(!rect.covers_area(&Matrix::rotate(0.1), &query));
        assert_eq!(
            rect.coverage(&Matrix::scale(2.0, 0.5)),
            Some(Rect::make_ltrb(0.0, 0.0, 200.0, 50.0))
        );
    }

    #[test]
    fn fill_rect_strip() {
        let mut tessellator = Tessellator::new();
        let config = GeometryConfig::default();
        let mut ctx =
            GeometryContext::new(&mut tessellator, &config, Matrix::IDENTITY, Size::ZERO);
        let result = FillRectGeometry::new(Rect::make_ltrb(0.0, 0.0, 10.0, 5.0))
            .position_buffer(&mut ctx)
            .unwrap();
        assert_eq!(result.primitive_type, PrimitiveType::TriangleStrip);
        let area: f32 = result
            .triangles()
            .iter()
            .map(|[a, b, c]| ((*b - *a).cross(*c - *a) * 0.5).abs())
            .sum();
        assert_eq!(area, 50.0);
    }

    #[test]
    fn stroke_rect_joins() {
        let rect = Rect::make_ltrb(0.0, 0.0, 10.0, 10.0);
        let mut tessellator = Tessellator::new();
        let config = GeometryConfig::default();
        let mut ctx =
            GeometryContext::new(&mut tessellator, &config, Matrix::IDENTITY, Size::ZERO);

        let miter = StrokeRectGeometry::new(rect, 2.0, Join::Miter, 4.0);
        assert_eq!(
            miter.coverage(&Matrix::IDENTITY),
            Some(Rect::make_ltrb(-1.0, -1.0, 11.0, 11.0))
        );
        let result = miter.position_buffer(&mut ctx).unwrap();
        // Four sides, four bevels and four miter tips.
        assert_eq!(result.vertex_count, 16 * 3);
        assert!(result
            .vertex_buffer
            .positions()
            .contains(&Point::new(-1.0, -1.0)));

        let clipped = StrokeRectGeometry::new(rect, 2.0, Join::Miter, 1.0);
        let result = clipped.position_buffer(&mut ctx).unwrap();
        assert_eq!(result.vertex_count, 12 * 3);

        let round = StrokeRectGeometry::new(rect, 2.0, Join::Round, 4.0);
        let result = round.position_buffer(&mut ctx).unwrap();
        assert!(result.vertex_count > 12 * 3);
    }

    #[test]
    fn thin_strokes_report_partial_coverage() {
        let rect = Rect::make_ltrb(0.0, 0.0, 10.0, 10.0);
        let thin = StrokeRectGeometry::new(rect, 0.25, Join::Bevel, 4.0);
        assert!(thin.compute_alpha_coverage(&Matrix::IDENTITY) < 1.0);
        assert_eq!(thin.compute_alpha_coverage(&Matrix::scale(8.0, 8.0)), 1.0);
    }

    #[test]
    fn raised_minimum_widens_coverage_and_vertices() {
        let rect = Rect::make_ltrb(0.0, 0.0, 10.0, 10.0);
        let config = GeometryConfig::default().with_min_stroke_size(4.0);
        let outline = StrokeRectGeometry::new(rect, 1.0, Join::Miter, 4.0)
            .with_min_stroke_size(config.min_stroke_size);
        let coverage = outline.coverage(&Matrix::IDENTITY).unwrap();
        assert_eq!(coverage, Rect::make_ltrb(-2.0, -2.0, 12.0, 12.0));
        assert_eq!(outline.compute_alpha_coverage(&Matrix::IDENTITY), 0.25);

        let mut tessellator = Tessellator::new();
        let mut ctx =
            GeometryContext::new(&mut tessellator, &config, Matrix::IDENTITY, Size::ZERO);
        let result = outline.position_buffer(&mut ctx).unwrap();
        let positions = result.vertex_buffer.positions();
        assert!(positions.contains(&Point::new(-2.0, -2.0)));
        assert!(positions.iter().all(|p| {
            p.x >= coverage.left
                && p.x <= coverage.right
                && p.y >= coverage.top
                && p.y <= coverage.bottom
        }));
    }
}
