// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Geometry, GeometryContext, GeometryResult, PrimitiveType};
use crate::error::GeometryError;
use crate::matrix::Matrix;
use crate::rect::Rect;

/// A filled ellipse inscribed in a rectangle.
///
/// There is no stroked variant; stroke the path from
/// [`Path::make_oval`](crate::Path::make_oval) instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipseGeometry {
    bounds: Rect,
}

impl EllipseGeometry {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: bounds.positive(),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Geometry for EllipseGeometry {
    fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        if self.bounds.is_empty() {
            return None;
        }
        Some(self.bounds.transform_bounds(transform))
    }

    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError> {
        if self.bounds.is_empty() {
            return Ok(GeometryResult::empty(ctx.shader_transform()));
        }
        let strip = ctx.tessellator.filled_ellipse(&ctx.transform, &self.bounds);
        ctx.positions_result(PrimitiveType::TriangleStrip, strip)
    }
}
