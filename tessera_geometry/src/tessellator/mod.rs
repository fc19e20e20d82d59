// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangulation of arbitrary paths.
//!
//! Paths are flattened to polylines first. The polylines, which may be concave,
//! self-intersecting or made of several contours, are then handed to lyon's sweep line fill
//! tessellator, which resolves overlaps according to the path's fill rule.

mod generators;

use std::collections::HashMap;

use log::debug;
use lyon_tessellation::math::point;
use lyon_tessellation::path::Path as LyonPath;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};

pub use generators::{quadrant_divisions, Trig};

use crate::error::TessellationError;
use crate::flatten::{flatten, Polyline};
use crate::path::{FillType, Path};
use crate::point::Point;
use crate::scalar::Scalar;

/// The largest vertex count that can be addressed with 16-bit indices.
const MAX_U16_VERTICES: usize = u16::MAX as usize + 1;

/// Converts paths into triangles.
///
/// A tessellator keeps scratch buffers and caches between calls, so reusing one is cheaper
/// than creating a new one per path. It is not meant to be shared between threads; give each
/// thread its own instance.
pub struct Tessellator {
    fill: FillTessellator,
    buffers: VertexBuffers<[f32; 2], u32>,
    indices: Vec<u16>,
    expanded: Vec<f32>,
    trigs: HashMap<usize, Vec<Trig>>,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Tessellator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tessellator")
            .field("cached_trigs", &self.trigs.len())
            .finish_non_exhaustive()
    }
}

impl Tessellator {
    /// Creates a tessellator with empty scratch state.
    pub fn new() -> Self {
        Self {
            fill: FillTessellator::new(),
            buffers: VertexBuffers::new(),
            indices: Vec::new(),
            expanded: Vec::new(),
            trigs: HashMap::new(),
        }
    }

    /// Flattens `path` to within `tolerance` and triangulates it.
    ///
    /// On success `callback` receives the vertices as interleaved `x, y` pairs and, when every
    /// vertex can be addressed with 16 bits, a triangle list of indices. Larger meshes are
    /// expanded to a plain triangle list and passed without indices. Returning `false` from
    /// the callback fails the call.
    ///
    /// Fails with [`TessellationError::Input`] when the flattened path has fewer than three
    /// distinct points or produces no triangles.
    pub fn tessellate<F>(
        &mut self,
        path: &Path,
        tolerance: Scalar,
        callback: F,
    ) -> Result<(), TessellationError>
    where
        F: FnMut(&[f32], Option<&[u16]>) -> bool,
    {
        let polyline = flatten(path, tolerance);
        self.tessellate_polyline(&polyline, path.fill_type(), callback)
    }

    /// Triangulates an already flattened path; see [`Tessellator::tessellate`].
    pub fn tessellate_polyline<F>(
        &mut self,
        polyline: &Polyline,
        fill_type: FillType,
        mut callback: F,
    ) -> Result<(), TessellationError>
    where
        F: FnMut(&[f32], Option<&[u16]>) -> bool,
    {
        if polyline.distinct_points_up_to_three() < 3 {
            return Err(TessellationError::Input);
        }
        match polyline.bounds() {
            Some(bounds) if bounds.width() > 0.0 && bounds.height() > 0.0 => {}
            _ => return Err(TessellationError::Input),
        }

        let mut builder = LyonPath::builder();
        for contour in &polyline.contours {
            let points = polyline.contour_points(contour);
            let Some((first, rest)) = points.split_first() else {
                continue;
            };
            builder.begin(point(first.x, first.y));
            for p in rest {
                builder.line_to(point(p.x, p.y));
            }
            builder.end(true);
        }
        let lyon_path = builder.build();

        let fill_rule = match fill_type {
            FillType::NonZero => FillRule::NonZero,
            FillType::EvenOdd => FillRule::EvenOdd,
        };
        let options =
            FillOptions::tolerance(FillOptions::DEFAULT_TOLERANCE).with_fill_rule(fill_rule);

        self.buffers.vertices.clear();
        self.buffers.indices.clear();
        self.fill
            .tessellate_path(
                &lyon_path,
                &options,
                &mut BuffersBuilder::new(&mut self.buffers, |vertex: FillVertex<'_>| {
                    vertex.position().to_array()
                }),
            )
            .map_err(|err| TessellationError::Tessellation(format!("{err:?}")))?;

        if self.buffers.indices.is_empty() {
            return Err(TessellationError::Input);
        }

        let accepted = if self.buffers.vertices.len() <= MAX_U16_VERTICES {
            self.indices.clear();
            // Every index is below the vertex count, which fits in 16 bits here.
            self.indices
                .extend(self.buffers.indices.iter().map(|i| *i as u16));
            callback(
                bytemuck::cast_slice(&self.buffers.vertices),
                Some(&self.indices),
            )
        } else {
            debug!(
                "Tessellation produced {} vertices, expanding to a triangle list",
                self.buffers.vertices.len()
            );
            self.expanded.clear();
            for i in &self.buffers.indices {
                self.expanded
                    .extend_from_slice(&self.buffers.vertices[*i as usize]);
            }
            callback(&self.expanded, None)
        };
        if accepted {
            Ok(())
        } else {
            Err(TessellationError::Tessellation(
                "callback rejected the output".into(),
            ))
        }
    }

    /// Triangulates `path` into a flat triangle list of interleaved `x, y` coordinates.
    ///
    /// Every three vertices (six floats) form one triangle.
    pub fn tessellate_to_triangles(
        &mut self,
        path: &Path,
        tolerance: Scalar,
    ) -> Result<Vec<f32>, TessellationError> {
        let mut output = Vec::new();
        self.tessellate(path, tolerance, |vertices, indices| {
            match indices {
                Some(indices) => {
                    output.reserve(indices.len() * 2);
                    for i in indices {
                        let i = *i as usize * 2;
                        output.extend_from_slice(&vertices[i..i + 2]);
                    }
                }
                None => output.extend_from_slice(vertices),
            }
            true
        })?;
        Ok(output)
    }

    /// Triangulates a convex polyline into a triangle strip.
    ///
    /// Each contour is zig-zagged from both ends towards the middle. Contours are joined by
    /// repeating the last vertex of one and the first vertex of the next, which only adds
    /// zero-area triangles.
    pub fn tessellate_convex(polyline: &Polyline) -> Vec<Point> {
        let mut output = Vec::with_capacity(polyline.points.len() + polyline.contours.len() * 2);
        for contour in &polyline.contours {
            let points = polyline.contour_points(contour);
            let Some(first) = points.first() else {
                continue;
            };
            if let Some(last) = output.last().copied() {
                output.push(last);
                output.push(*first);
            }
            output.push(*first);
            let (mut lo, mut hi) = (1, points.len() - 1);
            while lo <= hi {
                output.push(points[lo]);
                lo += 1;
                if lo > hi {
                    break;
                }
                output.push(points[hi]);
                hi -= 1;
            }
        }
        output
    }
}
