// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// Errors that can occur while triangulating a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TessellationError {
    /// The path has fewer than three distinct points or encloses no area.
    #[error("Path has no area to tessellate")]
    Input,
    /// The triangulation itself failed, or the output callback rejected the result.
    #[error("Tessellation failed: {0}")]
    Tessellation(String),
}

/// Errors that can occur while producing a geometry's vertex buffer.
///
/// A failed buffer fails the single draw that requested it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Triangulating a path failed.
    #[error(transparent)]
    Tessellation(#[from] TessellationError),
    /// The geometry would need more vertices than the configured budget allows.
    /// See [`GeometryConfig::max_vertex_count`](crate::GeometryConfig::max_vertex_count).
    #[error("Geometry needs {count} vertices, which exceeds the limit of {limit}")]
    VertexBudgetExceeded {
        /// The number of vertices the geometry needed.
        count: usize,
        /// The configured limit.
        limit: usize,
    },
    /// The entity transform can't be inverted, so device space can't be mapped back.
    #[error("Transform is not invertible")]
    NonInvertibleTransform,
}

/// The status of a lazily derived outline path.
///
/// [`OutlineError::Unavailable`] is not a failure: it means there is legitimately nothing
/// to draw for the given content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    /// The content has no outline, or producing it was cancelled.
    #[error("No outline is available")]
    Unavailable,
    /// Producing the outline failed.
    #[error("Outline generation failed: {0}")]
    Failed(String),
}
