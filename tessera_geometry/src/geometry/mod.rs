// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shapes that know how to cover themselves with triangles.
//!
//! A [`Geometry`] holds the parameters of one shape, but never a transform. Every query takes
//! the transform it should be answered for, so the same geometry can be drawn at several
//! places and scales.
//!
//! The vertex buffers produced here are in the geometry's local space. The
//! [`GeometryResult::transform`] maps them to clip space.

mod circle;
mod cover;
mod ellipse;
mod fill_path;
mod point_field;
mod rect;
mod round_rect;
mod stroke_path;
mod superellipse;
mod vertices;

use core::fmt;

use bytemuck::{Pod, Zeroable};
use log::debug;
use static_assertions::const_assert_eq;

pub use circle::CircleGeometry;
pub use cover::CoverGeometry;
pub use ellipse::EllipseGeometry;
pub use fill_path::FillPathGeometry;
pub use point_field::PointFieldGeometry;
pub use rect::{FillRectGeometry, StrokeRectGeometry};
pub use round_rect::RoundRectGeometry;
pub use stroke_path::StrokePathGeometry;
pub use superellipse::{
    RoundSuperellipseGeometry, SuperellipseGeometry, ROUND_SUPERELLIPSE_DEGREE,
};
pub use vertices::{VertexIndices, VertexMode, VerticesGeometry};

use crate::config::GeometryConfig;
use crate::error::GeometryError;
use crate::matrix::Matrix;
use crate::point::Point;
use crate::rect::Rect;
use crate::scalar::Scalar;
use crate::size::Size;
use crate::tessellator::Tessellator;

/// How the vertices of a [`GeometryResult`] form triangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveType {
    /// Every three vertices are a triangle.
    TriangleList,
    /// Every vertex after the second forms a triangle with the two before it.
    TriangleStrip,
}

/// How the backend must draw a [`GeometryResult`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResultMode {
    /// The triangles do not overlap and can be drawn directly.
    #[default]
    Normal,
    /// The triangles overlap; fill where the stencil winding count is non-zero.
    NonZero,
    /// The triangles overlap; fill where the stencil winding count is odd.
    EvenOdd,
}

/// A vertex with texture coordinates and a color, laid out for GPU upload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct TexturedVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    /// Straight alpha RGBA in `0..=1`.
    pub color: [f32; 4],
}

const_assert_eq!(size_of::<TexturedVertex>(), 32);
const_assert_eq!(size_of::<Point>(), 8);

/// The vertices of a [`GeometryResult`].
#[derive(Clone, Debug, PartialEq)]
pub enum VertexBuffer {
    Positions(Vec<Point>),
    Textured(Vec<TexturedVertex>),
}

impl Default for VertexBuffer {
    fn default() -> Self {
        Self::Positions(Vec::new())
    }
}

impl VertexBuffer {
    /// The number of vertices.
    pub fn len(&self) -> usize {
        match self {
            Self::Positions(v) => v.len(),
            Self::Textured(v) => v.len(),
        }
    }

    /// Returns `true` if there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The raw vertex data.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Positions(v) => bytemuck::cast_slice(v),
            Self::Textured(v) => bytemuck::cast_slice(v),
        }
    }

    /// The position of every vertex.
    pub fn positions(&self) -> Vec<Point> {
        match self {
            Self::Positions(v) => v.clone(),
            Self::Textured(v) => v.iter().map(|v| Point::from(v.position)).collect(),
        }
    }
}

/// Everything a backend needs to draw a geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryResult {
    /// How `vertex_buffer`, or `index_buffer` when present, forms triangles.
    pub primitive_type: PrimitiveType,
    /// The vertices in the geometry's local space.
    pub vertex_buffer: VertexBuffer,
    /// 16-bit indices into `vertex_buffer`, if the draw is indexed.
    pub index_buffer: Option<Vec<u16>>,
    /// The number of vertices to draw: the index count for indexed draws.
    pub vertex_count: usize,
    /// Maps local vertex positions to clip space.
    pub transform: Matrix,
    /// Whether the triangles can be drawn directly or need a stencil pass.
    pub mode: ResultMode,
}

impl GeometryResult {
    /// A result that draws nothing.
    pub fn empty(transform: Matrix) -> Self {
        Self {
            primitive_type: PrimitiveType::TriangleList,
            vertex_buffer: VertexBuffer::default(),
            index_buffer: None,
            vertex_count: 0,
            transform,
            mode: ResultMode::Normal,
        }
    }

    /// Returns `true` if nothing will be drawn.
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// The drawn triangles as corner positions, with strips and indices resolved.
    pub fn triangles(&self) -> Vec<[Point; 3]> {
        let positions = self.vertex_buffer.positions();
        let order: Vec<Point> = match &self.index_buffer {
            Some(indices) => indices.iter().map(|i| positions[*i as usize]).collect(),
            None => positions,
        };
        match self.primitive_type {
            PrimitiveType::TriangleList => {
                order.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect()
            }
            PrimitiveType::TriangleStrip => {
                order.windows(3).map(|t| [t[0], t[1], t[2]]).collect()
            }
        }
    }
}

/// The per-draw inputs to [`Geometry::position_buffer`].
pub struct GeometryContext<'a> {
    pub tessellator: &'a mut Tessellator,
    pub config: &'a GeometryConfig,
    /// The geometry's local to device transform.
    pub transform: Matrix,
    /// The size of the render target in device pixels.
    pub target_size: Size,
}

impl fmt::Debug for GeometryContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryContext")
            .field("config", &self.config)
            .field("transform", &self.transform)
            .field("target_size", &self.target_size)
            .finish_non_exhaustive()
    }
}

impl<'a> GeometryContext<'a> {
    pub fn new(
        tessellator: &'a mut Tessellator,
        config: &'a GeometryConfig,
        transform: Matrix,
        target_size: Size,
    ) -> Self {
        Self {
            tessellator,
            config,
            transform,
            target_size,
        }
    }

    /// The transform from local coordinates to clip space.
    ///
    /// Device space has its origin at the top left and y pointing down; clip space spans
    /// `-1..1` with y pointing up. An empty target leaves the device transform as is.
    pub fn shader_transform(&self) -> Matrix {
        if self.target_size.is_empty() {
            return self.transform;
        }
        let Size { width, height } = self.target_size;
        let ortho = Matrix::new([2.0 / width, 0.0, 0.0, -2.0 / height, -1.0, 1.0]);
        ortho * self.transform
    }

    /// The curve flattening tolerance in local coordinates.
    pub fn tolerance(&self) -> Scalar {
        self.config.local_tolerance(self.transform.max_basis_length())
    }

    /// Fails if `count` vertices exceed the configured budget.
    pub fn check_vertex_budget(&self, count: usize) -> Result<(), GeometryError> {
        let limit = self.config.max_vertex_count;
        if count > limit {
            debug!("Dropping geometry with {count} vertices, the limit is {limit}");
            return Err(GeometryError::VertexBudgetExceeded { count, limit });
        }
        Ok(())
    }

    /// A non-indexed result over `points`.
    pub fn positions_result(
        &self,
        primitive_type: PrimitiveType,
        points: Vec<Point>,
    ) -> Result<GeometryResult, GeometryError> {
        self.check_vertex_budget(points.len())?;
        Ok(GeometryResult {
            primitive_type,
            vertex_count: points.len(),
            vertex_buffer: VertexBuffer::Positions(points),
            index_buffer: None,
            transform: self.shader_transform(),
            mode: ResultMode::Normal,
        })
    }
}

/// A shape that can be drawn.
pub trait Geometry: fmt::Debug {
    /// The device space bounds of the shape under `transform`, or `None` if it covers nothing.
    ///
    /// This may be larger than the shape but never smaller.
    fn coverage(&self, transform: &Matrix) -> Option<Rect>;

    /// Returns `true` only if the shape under `transform` is known to cover all of `rect`.
    ///
    /// `false` is always a safe answer.
    fn covers_area(&self, transform: &Matrix, rect: &Rect) -> bool {
        let _ = (transform, rect);
        false
    }

    /// Produces the vertices that draw the shape.
    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError>;

    /// An estimate of how much of each covered pixel is opaque, in `0..=1`.
    fn compute_alpha_coverage(&self, transform: &Matrix) -> Scalar {
        let _ = transform;
        1.0
    }

    /// Returns `true` if the shape is an unrotated filled rectangle in its local space.
    fn is_axis_aligned_rect(&self) -> bool {
        false
    }

    /// Returns `false` for shapes that cannot be blurred or masked.
    fn can_apply_mask_filter(&self) -> bool {
        true
    }
}

/// Alpha coverage for a stroke of `stroke_width` local units.
///
/// Strokes thinner than `min_stroke_size` device pixels are drawn at that size, so their
/// coverage is scaled down instead. Hairlines (zero width) count as fully covered.
pub fn stroke_alpha_coverage(
    transform: &Matrix,
    stroke_width: Scalar,
    min_stroke_size: Scalar,
) -> Scalar {
    let scaled = transform.max_basis_length() * stroke_width;
    if scaled <= 0.0 || scaled >= min_stroke_size || !scaled.is_finite() {
        return 1.0;
    }
    (scaled / min_stroke_size).clamp(0.1, 1.0)
}

/// The local width a stroke of `stroke_width` is drawn at under `transform`.
///
/// The result is at least `min_stroke_size` device pixels wide. A collapsed or non-finite
/// transform leaves the width unchanged.
pub fn adjusted_stroke_width(
    transform: &Matrix,
    stroke_width: Scalar,
    min_stroke_size: Scalar,
) -> Scalar {
    let scale = transform.max_basis_length();
    if scale <= 0.0 || !scale.is_finite() {
        return stroke_width;
    }
    stroke_width.max(min_stroke_size / scale)
}

/// Returns `true` if, under a scale and translate `transform`, the flat bands of a rounded
/// rectangle cover `rect`.
///
/// `insets` are the depths of the rounding on the left, top, right and bottom edges.
pub(crate) fn flat_bands_cover(
    bounds: &Rect,
    insets: [Scalar; 4],
    transform: &Matrix,
    rect: &Rect,
) -> bool {
    if !transform.is_translation_scale_only() {
        return false;
    }
    let [left, top, right, bottom] = insets;
    let horizontal = Rect::make_ltrb(
        bounds.left,
        bounds.top + top,
        bounds.right,
        bounds.bottom - bottom,
    );
    let vertical = Rect::make_ltrb(
        bounds.left + left,
        bounds.top,
        bounds.right - right,
        bounds.bottom,
    );
    [horizontal, vertical]
        .iter()
        .any(|band| !band.is_empty() && band.transform_bounds(transform).contains_rect(rect))
}

/// The device space bounds of `points` under `transform`.
pub(crate) fn transformed_bounds(
    points: impl IntoIterator<Item = Point>,
    transform: &Matrix,
) -> Option<Rect> {
    Rect::make_point_bounds(points.into_iter().map(|p| transform.transform_point(p)))
}
