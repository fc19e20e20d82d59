// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::OnceLock;

use log::warn;
use peniko::Color;

use super::{
    transformed_bounds, Geometry, GeometryContext, GeometryResult, PrimitiveType, ResultMode,
    TexturedVertex, VertexBuffer,
};
use crate::error::GeometryError;
use crate::matrix::Matrix;
use crate::point::Point;
use crate::rect::Rect;

/// The largest vertex count that 16-bit indices can address.
const MAX_U16_VERTICES: usize = u16::MAX as usize + 1;

/// How the vertices of a [`VerticesGeometry`] form triangles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VertexMode {
    #[default]
    Triangles,
    TriangleStrip,
    /// Every vertex after the second forms a triangle with the first and the previous one.
    TriangleFan,
}

/// Caller supplied indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum VertexIndices {
    /// The vertices are used in order.
    #[default]
    None,
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl VertexIndices {
    fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
        }
    }
}

/// The draw order after re-indexing, shared by every buffer request.
#[derive(Debug)]
struct Normalized {
    primitive_type: PrimitiveType,
    /// Present when the vertices are drawn through 16-bit indices.
    indices: Option<Vec<u16>>,
    /// Present when the mesh is too large for 16-bit indices and must be expanded.
    expanded: Option<Vec<u32>>,
}

/// A mesh from caller supplied positions, with optional per-vertex colors and texture
/// coordinates.
#[derive(Debug)]
pub struct VerticesGeometry {
    mode: VertexMode,
    positions: Vec<Point>,
    colors: Option<Vec<Color>>,
    tex_coords: Option<Vec<Point>>,
    indices: VertexIndices,
    /// `None` once the indices are known to be unusable.
    normalized: OnceLock<Option<Normalized>>,
}

impl VerticesGeometry {
    pub fn new(mode: VertexMode, positions: Vec<Point>) -> Self {
        Self {
            mode,
            positions,
            colors: None,
            tex_coords: None,
            indices: VertexIndices::None,
            normalized: OnceLock::new(),
        }
    }

    /// Sets one color per vertex.
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self.normalized = OnceLock::new();
        self
    }

    /// Sets one texture coordinate per vertex.
    pub fn with_texture_coordinates(mut self, tex_coords: Vec<Point>) -> Self {
        self.tex_coords = Some(tex_coords);
        self.normalized = OnceLock::new();
        self
    }

    pub fn with_indices(mut self, indices: VertexIndices) -> Self {
        self.indices = indices;
        self.normalized = OnceLock::new();
        self
    }

    pub fn mode(&self) -> VertexMode {
        self.mode
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn indices(&self) -> &VertexIndices {
        &self.indices
    }

    pub fn has_vertex_colors(&self) -> bool {
        self.colors.is_some()
    }

    pub fn has_texture_coordinates(&self) -> bool {
        self.tex_coords.is_some()
    }

    /// The bounds of the texture coordinates, which can differ from the bounds of the
    /// positions when the texture is a region of an atlas.
    pub fn texture_coordinate_coverage(&self) -> Option<Rect> {
        Rect::make_point_bounds(self.tex_coords.as_ref()?.iter().copied())
    }

    /// The number of vertices drawn, before any expansion.
    pub fn vertex_count(&self) -> usize {
        match self.mode {
            VertexMode::TriangleFan => self.draw_count().saturating_sub(2) * 3,
            _ => self.draw_count(),
        }
    }

    fn draw_count(&self) -> usize {
        match self.indices {
            VertexIndices::None => self.positions.len(),
            _ => self.indices.len(),
        }
    }

    fn normalized(&self) -> Option<&Normalized> {
        self.normalized.get_or_init(|| self.normalize()).as_ref()
    }

    fn normalize(&self) -> Option<Normalized> {
        let count = self.positions.len();
        let attribute_short = |len: usize| len < count;
        if self.colors.as_ref().is_some_and(|c| attribute_short(c.len()))
            || self.tex_coords.as_ref().is_some_and(|t| attribute_short(t.len()))
        {
            warn!("Vertex attributes are shorter than the {count} positions, dropping the draw");
            return None;
        }

        let order: Vec<u32> = match &self.indices {
            VertexIndices::None => (0..count as u32).collect(),
            VertexIndices::U16(v) => v.iter().map(|i| u32::from(*i)).collect(),
            VertexIndices::U32(v) => v.clone(),
        };
        if let Some(bad) = order.iter().find(|i| **i as usize >= count) {
            warn!("Vertex index {bad} is out of range for {count} vertices, dropping the draw");
            return None;
        }

        let (primitive_type, order) = match self.mode {
            VertexMode::Triangles => (PrimitiveType::TriangleList, order),
            VertexMode::TriangleStrip => (PrimitiveType::TriangleStrip, order),
            VertexMode::TriangleFan => {
                let list = match order.split_first() {
                    Some((first, rest)) => rest
                        .windows(2)
                        .flat_map(|pair| [*first, pair[0], pair[1]])
                        .collect(),
                    None => Vec::new(),
                };
                (PrimitiveType::TriangleList, list)
            }
        };

        let sequential = matches!(self.indices, VertexIndices::None)
            && self.mode != VertexMode::TriangleFan;
        Some(if count > MAX_U16_VERTICES {
            Normalized {
                primitive_type,
                indices: None,
                expanded: (!sequential).then_some(order),
            }
        } else {
            Normalized {
                primitive_type,
                // Every index is below `count`, which fits in 16 bits here.
                indices: (!sequential).then(|| order.iter().map(|i| *i as u16).collect()),
                expanded: None,
            }
        })
    }

    fn vertex(&self, i: usize) -> TexturedVertex {
        let color = match &self.colors {
            Some(colors) => {
                let Color { r, g, b, a } = colors[i];
                [r, g, b, a].map(|c| f32::from(c) / 255.0)
            }
            None => [1.0; 4],
        };
        let uv = match &self.tex_coords {
            Some(tex_coords) => tex_coords[i].to_array(),
            None => [0.0; 2],
        };
        TexturedVertex {
            position: self.positions[i].to_array(),
            uv,
            color,
        }
    }
}

impl Clone for VerticesGeometry {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            positions: self.positions.clone(),
            colors: self.colors.clone(),
            tex_coords: self.tex_coords.clone(),
            indices: self.indices.clone(),
            normalized: OnceLock::new(),
        }
    }
}

impl Geometry for VerticesGeometry {
    fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        transformed_bounds(self.positions.iter().copied(), transform)
    }

    /// Positions only, unless the mesh has colors or texture coordinates, in which case the
    /// buffer holds [`TexturedVertex`]es.
    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError> {
        let transform = ctx.shader_transform();
        let Some(normalized) = self.normalized() else {
            return Ok(GeometryResult::empty(transform));
        };
        let order: Vec<usize> = match &normalized.expanded {
            Some(expanded) => expanded.iter().map(|i| *i as usize).collect(),
            None => (0..self.positions.len()).collect(),
        };
        ctx.check_vertex_budget(order.len())?;

        let textured = self.has_vertex_colors() || self.has_texture_coordinates();
        let vertex_buffer = if textured {
            VertexBuffer::Textured(order.iter().map(|i| self.vertex(*i)).collect())
        } else {
            VertexBuffer::Positions(order.iter().map(|i| self.positions[*i]).collect())
        };
        let vertex_count = match &normalized.indices {
            Some(indices) => indices.len(),
            None => vertex_buffer.len(),
        };
        Ok(GeometryResult {
            primitive_type: normalized.primitive_type,
            vertex_buffer,
            index_buffer: normalized.indices.clone(),
            vertex_count,
            transform,
            mode: ResultMode::Normal,
        })
    }

    fn can_apply_mask_filter(&self) -> bool {
        false
    }
}
