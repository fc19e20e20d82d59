// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Geometry, GeometryContext, GeometryResult, PrimitiveType, ResultMode, VertexBuffer};
use crate::config::FillStrategy;
use crate::error::{GeometryError, TessellationError};
use crate::flatten::{flatten, Polyline};
use crate::matrix::Matrix;
use crate::path::{FillType, Path};
use crate::point::Point;
use crate::rect::Rect;
use crate::tessellator::Tessellator;

/// A filled path.
#[derive(Clone, Debug, PartialEq)]
pub struct FillPathGeometry {
    path: Path,
    inner_rect: Option<Rect>,
}

impl FillPathGeometry {
    pub fn new(path: Path) -> Self {
        Self {
            path,
            inner_rect: None,
        }
    }

    /// A filled path known to cover all of `inner_rect`.
    ///
    /// The rect lets [`Geometry::covers_area`] answer without looking at the path.
    pub fn with_inner_rect(path: Path, inner_rect: Rect) -> Self {
        Self {
            path,
            inner_rect: Some(inner_rect.positive()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn inner_rect(&self) -> Option<Rect> {
        self.inner_rect
    }
}

/// One triangle fan per contour, as a triangle list.
///
/// The fans overlap wherever the path is concave, so the result must be drawn through a
/// stencil that counts winding.
fn contour_fans(polyline: &Polyline) -> Vec<Point> {
    let mut output = Vec::new();
    for contour in &polyline.contours {
        let points = polyline.contour_points(contour);
        let Some((hub, rest)) = points.split_first() else {
            continue;
        };
        for pair in rest.windows(2) {
            output.extend_from_slice(&[*hub, pair[0], pair[1]]);
        }
    }
    output
}

impl Geometry for FillPathGeometry {
    fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        if self.path.is_empty() {
            return None;
        }
        Some(self.path.bounds().transform_bounds(transform))
    }

    fn covers_area(&self, transform: &Matrix, rect: &Rect) -> bool {
        if !transform.is_translation_scale_only() {
            return false;
        }
        let inner = match (self.inner_rect, self.path.as_rect()) {
            (Some(inner), _) => inner,
            (None, Some((rect, true))) => rect,
            _ => return false,
        };
        !inner.is_empty() && inner.transform_bounds(transform).contains_rect(rect)
    }

    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError> {
        let polyline = flatten(&self.path, ctx.tolerance());
        if polyline.distinct_points_up_to_three() < 3 {
            return Ok(GeometryResult::empty(ctx.shader_transform()));
        }

        if ctx.config.fill_strategy == FillStrategy::StencilThenCover {
            let fans = contour_fans(&polyline);
            let mut result = ctx.positions_result(PrimitiveType::TriangleList, fans)?;
            result.mode = match self.path.fill_type() {
                FillType::NonZero => ResultMode::NonZero,
                FillType::EvenOdd => ResultMode::EvenOdd,
            };
            return Ok(result);
        }

        if polyline.is_convex() {
            let strip = Tessellator::tessellate_convex(&polyline);
            return ctx.positions_result(PrimitiveType::TriangleStrip, strip);
        }

        let mut vertices = Vec::new();
        let mut index_buffer = None;
        let tessellated = ctx.tessellator.tessellate_polyline(
            &polyline,
            self.path.fill_type(),
            |points, indices| {
                vertices = points.chunks_exact(2).map(|p| Point::new(p[0], p[1])).collect();
                index_buffer = indices.map(<[u16]>::to_vec);
                true
            },
        );
        match tessellated {
            Ok(()) => {}
            // Collinear or cancelling contours cover nothing.
            Err(TessellationError::Input) => {
                return Ok(GeometryResult::empty(ctx.shader_transform()));
            }
            Err(err) => return Err(err.into()),
        }
        ctx.check_vertex_budget(vertices.len())?;
        let vertex_count = index_buffer.as_ref().map_or(vertices.len(), Vec::len);
        Ok(GeometryResult {
            primitive_type: PrimitiveType::TriangleList,
            vertex_buffer: VertexBuffer::Positions(vertices),
            index_buffer,
            vertex_count,
            transform: ctx.shader_transform(),
            mode: ResultMode::Normal,
        })
    }
}
