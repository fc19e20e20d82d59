// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for geometry generation.

use crate::scalar::Scalar;

/// How filled paths are turned into triangles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillStrategy {
    /// Triangulate on the CPU so the result can be drawn in a single pass.
    #[default]
    Tessellate,
    /// Emit one triangle fan per contour and leave the fill rule to a stencil pass.
    ///
    /// The fans overlap, so the backend must count winding in a stencil buffer and then
    /// cover the stenciled region.
    StencilThenCover,
}

/// The default [`GeometryConfig::min_stroke_size`], also used by stroked geometries that are
/// not given one.
pub const DEFAULT_MIN_STROKE_SIZE: Scalar = 1.0;

/// Options used by every [`Geometry`](crate::geometry::Geometry) when producing vertex buffers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryConfig {
    /// Maximum distance, in device pixels, between a curve and its flattened polyline.
    ///
    /// The local tolerance is this value divided by the transform's
    /// [`max_basis_length`](crate::Matrix::max_basis_length).
    pub curve_tolerance: Scalar,
    /// The thinnest stroke, in device pixels, that is drawn at its real width.
    ///
    /// Thinner strokes are widened to this size and reported with partial
    /// [alpha coverage](crate::geometry::Geometry::compute_alpha_coverage). Stroked
    /// geometries take this value when they are built, through their `with_min_stroke_size`
    /// methods, so that their coverage agrees with the vertices they produce.
    pub min_stroke_size: Scalar,
    /// How filled paths are triangulated.
    pub fill_strategy: FillStrategy,
    /// The largest vertex buffer a single geometry may produce.
    pub max_vertex_count: usize,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            curve_tolerance: 0.1,
            min_stroke_size: DEFAULT_MIN_STROKE_SIZE,
            fill_strategy: FillStrategy::default(),
            max_vertex_count: 1 << 22,
        }
    }
}

impl GeometryConfig {
    /// Sets [`curve_tolerance`](Self::curve_tolerance).
    #[must_use]
    pub fn with_curve_tolerance(mut self, tolerance: Scalar) -> Self {
        self.curve_tolerance = tolerance;
        self
    }

    /// Sets [`min_stroke_size`](Self::min_stroke_size).
    #[must_use]
    pub fn with_min_stroke_size(mut self, size: Scalar) -> Self {
        self.min_stroke_size = size;
        self
    }

    /// Sets [`fill_strategy`](Self::fill_strategy).
    #[must_use]
    pub fn with_fill_strategy(mut self, strategy: FillStrategy) -> Self {
        self.fill_strategy = strategy;
        self
    }

    /// Sets [`max_vertex_count`](Self::max_vertex_count).
    #[must_use]
    pub fn with_max_vertex_count(mut self, count: usize) -> Self {
        self.max_vertex_count = count;
        self
    }

    /// The flattening tolerance in local coordinates for a given transform scale.
    pub fn local_tolerance(&self, max_basis_length: Scalar) -> Scalar {
        if max_basis_length > 0.0 && max_basis_length.is_finite() {
            self.curve_tolerance / max_basis_length
        } else {
            self.curve_tolerance
        }
    }
}
