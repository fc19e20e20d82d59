// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Geometry, GeometryContext, GeometryResult, PrimitiveType};
use crate::error::GeometryError;
use crate::matrix::Matrix;
use crate::rect::Rect;

/// Covers the whole render target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoverGeometry;

impl CoverGeometry {
    pub fn new() -> Self {
        Self
    }
}

impl Geometry for CoverGeometry {
    fn coverage(&self, _transform: &Matrix) -> Option<Rect> {
        Some(Rect::maximum())
    }

    fn covers_area(&self, _transform: &Matrix, _rect: &Rect) -> bool {
        true
    }

    /// The render target mapped back into local space, so that the usual transform puts it
    /// exactly on the target.
    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError> {
        let inverse = ctx
            .transform
            .invert()
            .ok_or(GeometryError::NonInvertibleTransform)?;
        let strip = Rect::make_size(ctx.target_size)
            .corners()
            .into_iter()
            .map(|p| inverse.transform_point(p))
            .collect();
        ctx.positions_result(PrimitiveType::TriangleStrip, strip)
    }

    fn can_apply_mask_filter(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::CoverGeometry;
    use crate::config::GeometryConfig;
    use crate::error::GeometryError;
    use crate::geometry::{Geometry, GeometryContext};
    use crate::matrix::Matrix;
    use crate::point::Point;
    use crate::rect::Rect;
    use crate::size::Size;
    use crate::tessellator::Tessellator;

    #[test]
    fn covers_everything() {
        let cover = CoverGeometry::new();
        assert!(cover.coverage(&Matrix::IDENTITY).unwrap().is_maximum());
        assert!(cover.covers_area(&Matrix::rotate(1.0), &Rect::make_ltrb(-1e6, -1e6, 1e6, 1e6)));
        assert!(!cover.can_apply_mask_filter());
    }

    #[test]
    fn buffer_maps_back_to_target() {
        let mut tessellator = Tessellator::new();
        let config = GeometryConfig::default();
        let transform = Matrix::scale(2.0, 2.0);
        let mut ctx =
            GeometryContext::new(&mut tessellator, &config, transform, Size::new(128.0, 64.0));
        let result = CoverGeometry::new().position_buffer(&mut ctx).unwrap();
        assert_eq!(
            result.vertex_buffer.positions(),
            [
                Point::new(0.0, 0.0),
                Point::new(64.0, 0.0),
                Point::new(0.0, 32.0),
                Point::new(64.0, 32.0),
            ]
        );
        // The shader transform takes the strip onto clip space corners.
        assert_eq!(
            result.transform.transform_point(Point::new(64.0, 32.0)),
            Point::new(1.0, -1.0)
        );
    }

    #[test]
    fn singular_transform_fails() {
        let mut tessellator = Tessellator::new();
        let config = GeometryConfig::default();
        let mut ctx = GeometryContext::new(
            &mut tessellator,
            &config,
            Matrix::scale(0.0, 1.0),
            Size::new(10.0, 10.0),
        );
        assert_eq!(
            CoverGeometry::new().position_buffer(&mut ctx),
            Err(GeometryError::NonInvertibleTransform)
        );
    }
}
