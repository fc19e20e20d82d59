// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{flat_bands_cover, Geometry, GeometryContext, GeometryResult, PrimitiveType};
use crate::error::GeometryError;
use crate::matrix::Matrix;
use crate::rect::Rect;
use crate::size::Size;

/// A filled rectangle with the same elliptical rounding on every corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundRectGeometry {
    bounds: Rect,
    radii: Size,
}

impl RoundRectGeometry {
    /// Radii larger than half the bounds are clamped.
    pub fn new(bounds: Rect, radii: Size) -> Self {
        let bounds = bounds.positive();
        let radii = Size::new(
            radii.width.clamp(0.0, bounds.width().max(0.0) * 0.5),
            radii.height.clamp(0.0, bounds.height().max(0.0) * 0.5),
        );
        Self { bounds, radii }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn radii(&self) -> Size {
        self.radii
    }
}

impl Geometry for RoundRectGeometry {
    fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        if self.bounds.is_empty() {
            return None;
        }
        Some(self.bounds.transform_bounds(transform))
    }

    /// Checks the two rectangles left after shaving the rounding off either pair of edges.
    fn covers_area(&self, transform: &Matrix, rect: &Rect) -> bool {
        let Size { width, height } = self.radii;
        flat_bands_cover(&self.bounds, [width, height, width, height], transform, rect)
    }

    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError> {
        if self.bounds.is_empty() {
            return Ok(GeometryResult::empty(ctx.shader_transform()));
        }
        let strip = ctx
            .tessellator
            .filled_round_rect(&ctx.transform, &self.bounds, self.radii);
        ctx.positions_result(PrimitiveType::TriangleStrip, strip)
    }
}
