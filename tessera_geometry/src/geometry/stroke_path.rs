// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::{Cap, Join};

use super::{
    adjusted_stroke_width, stroke_alpha_coverage, Geometry, GeometryContext, GeometryResult,
    PrimitiveType,
};
use crate::config::DEFAULT_MIN_STROKE_SIZE;
use crate::error::GeometryError;
use crate::matrix::Matrix;
use crate::path::Path;
use crate::rect::Rect;
use crate::scalar::{Scalar, SQRT_2};
use crate::stroke::{stroke_path, StrokeStyle};

/// A stroked path.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokePathGeometry {
    path: Path,
    style: StrokeStyle,
    min_stroke_size: Scalar,
}

impl StrokePathGeometry {
    /// Negative widths are treated as hairlines.
    pub fn new(path: Path, style: StrokeStyle) -> Self {
        let style = StrokeStyle {
            width: style.width.max(0.0),
            ..style
        };
        Self {
            path,
            style,
            min_stroke_size: DEFAULT_MIN_STROKE_SIZE,
        }
    }

    /// Sets the thinnest stroke, in device pixels, that is drawn at its real width.
    ///
    /// Pass the [`GeometryConfig::min_stroke_size`](crate::GeometryConfig::min_stroke_size)
    /// the geometry will be tessellated with.
    #[must_use]
    pub fn with_min_stroke_size(mut self, size: Scalar) -> Self {
        self.min_stroke_size = size;
        self
    }

    /// The stroked path in local coordinates.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The style as requested, before hairlines are widened.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// The requested width. Zero is a hairline.
    pub fn stroke_width(&self) -> Scalar {
        self.style.width
    }

    /// The miter limit, used only by [`Join::Miter`].
    pub fn miter_limit(&self) -> Scalar {
        self.style.miter_limit
    }

    /// How open contours end.
    pub fn cap(&self) -> Cap {
        self.style.cap
    }

    /// How segments meet.
    pub fn join(&self) -> Join {
        self.style.join
    }

    /// Returns `true` if drawing under `transform` would not touch any pixel.
    ///
    /// That is the case for a collapsed transform, a non-finite width, an empty path, and a
    /// path that is a single point with butt caps. Thin strokes are still drawn, widened to
    /// the minimum stroke size.
    pub fn skip_rendering(&self, transform: &Matrix) -> bool {
        let scale = transform.max_basis_length();
        if scale <= 0.0 || !scale.is_finite() || !self.style.width.is_finite() {
            return true;
        }
        if self.path.is_empty() {
            return true;
        }
        let bounds = self.path.bounds();
        bounds.width() == 0.0 && bounds.height() == 0.0 && self.style.cap == Cap::Butt
    }

    /// How far outside the path's control bounds the stroke can reach, for a given width.
    fn outset(&self, width: Scalar) -> Scalar {
        let mut factor: Scalar = 1.0;
        if self.style.join == Join::Miter {
            factor = factor.max(self.style.miter_limit);
        }
        if self.style.cap == Cap::Square {
            factor = factor.max(SQRT_2);
        }
        width * 0.5 * factor
    }
}

impl Geometry for StrokePathGeometry {
    fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        if self.path.is_empty() {
            return None;
        }
        let width = adjusted_stroke_width(transform, self.style.width, self.min_stroke_size);
        let outset = self.outset(width);
        Some(
            self.path
                .bounds()
                .expand(outset, outset)
                .transform_bounds(transform),
        )
    }

    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError> {
        if self.skip_rendering(&ctx.transform) {
            return Ok(GeometryResult::empty(ctx.shader_transform()));
        }
        let style = StrokeStyle {
            width: adjusted_stroke_width(&ctx.transform, self.style.width, self.min_stroke_size),
            ..self.style
        };
        let triangles = stroke_path(&self.path, &style, ctx.tolerance());
        ctx.positions_result(PrimitiveType::TriangleList, triangles)
    }

    fn compute_alpha_coverage(&self, transform: &Matrix) -> Scalar {
        stroke_alpha_coverage(transform, self.style.width, self.min_stroke_size)
    }
}

#[cfg(test)]
mod tests {
    use peniko::kurbo::{Cap, Join};

    use super::StrokePathGeometry;
    use crate::config::GeometryConfig;
    use crate::geometry::{Geometry, GeometryContext};
    use crate::matrix::Matrix;
    use crate::path::{FillType, Path};
    use crate::point::Point;
    use crate::rect::Rect;
    use crate::size::Size;
    use crate::stroke::StrokeStyle;
    use crate::tessellator::Tessellator;

    #[test]
    fn accessors_and_coverage() {
        let path = Path::make_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let style = StrokeStyle::new(4.0).with_join(Join::Bevel).with_cap(Cap::Round);
        let geometry = StrokePathGeometry::new(path, style);
        assert_eq!(geometry.stroke_width(), 4.0);
        assert_eq!(geometry.cap(), Cap::Round);
        assert_eq!(geometry.join(), Join::Bevel);
        assert_eq!(geometry.miter_limit(), 4.0);
        assert_eq!(
            geometry.coverage(&Matrix::IDENTITY),
            Some(Rect::make_ltrb(-2.0, -2.0, 12.0, 2.0))
        );
    }

    #[test]
    fn skip_rendering() {
        let line = Path::make_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let geometry = StrokePathGeometry::new(line, StrokeStyle::new(0.0));
        assert!(!geometry.skip_rendering(&Matrix::IDENTITY));
        assert!(geometry.skip_rendering(&Matrix::scale(0.0, 0.0)));

        let point = Path::make_line(Point::new(3.0, 3.0), Point::new(3.0, 3.0));
        let butt = StrokePathGeometry::new(point.clone(), StrokeStyle::new(2.0));
        assert!(butt.skip_rendering(&Matrix::IDENTITY));
        let round = StrokePathGeometry::new(point, StrokeStyle::new(2.0).with_cap(Cap::Round));
        assert!(!round.skip_rendering(&Matrix::IDENTITY));
        assert!(StrokePathGeometry::new(Path::default(), StrokeStyle::new(1.0))
            .skip_rendering(&Matrix::IDENTITY));
    }

    #[test]
    fn hairlines_are_widened() {
        let path = Path::make_poly(
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ],
            false,
            FillType::NonZero,
        );
        let config = GeometryConfig::default().with_min_stroke_size(2.0);
        let geometry = StrokePathGeometry::new(path, StrokeStyle::new(0.0))
            .with_min_stroke_size(config.min_stroke_size);
        assert_eq!(geometry.compute_alpha_coverage(&Matrix::IDENTITY), 1.0);
        // A two pixel wide stroke with miter joins limited to four half widths.
        assert_eq!(
            geometry.coverage(&Matrix::IDENTITY),
            Some(Rect::make_ltrb(-4.0, -4.0, 14.0, 14.0))
        );

        let mut tessellator = Tessellator::new();
        let mut ctx =
            GeometryContext::new(&mut tessellator, &config, Matrix::IDENTITY, Size::ZERO);
        let result = geometry.position_buffer(&mut ctx).unwrap();
        assert!(!result.is_empty());
        let positions = result.vertex_buffer.positions();
        assert!(positions.contains(&Point::new(0.0, -1.0)));
        assert!(positions.contains(&Point::new(0.0, 1.0)));
    }
}
