// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path representation, shape geometry and tessellation for 2D renderers.
//!
//! This crate turns abstract vector shapes into vertex buffers that a GPU backend can draw.
//!
//! # Contents
//!
//! - Scalar and geometry primitives ([`Point`], [`Size`], [`Rect`], [`Matrix`]) using `f32`
//!   throughout, with tolerance-based comparisons in [`scalar`].
//! - [`RoundingRadii`] and [`RoundRect`], with uniform scale-to-fit normalization.
//! - [`RSTransform`], the compact rotate/scale/translate transform used for atlas drawing.
//! - [`Path`], a cheaply cloneable path that holds either a [`kurbo::BezPath`] or a packed
//!   verb/point encoding and converts between them lazily.
//! - [`geometry`], the shape variants that compute coverage and produce vertex buffers.
//! - [`Tessellator`], which flattens paths and triangulates arbitrary polygons.
//! - [`AccumulationRect`] and [`PaintRegion`], used by callers to track damage.
//!
//! # Threading
//!
//! Everything here runs synchronously on the calling thread. [`Path`] values can be shared
//! across threads; a [`Tessellator`] holds scratch state and needs one instance per thread.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod accumulation_rect;
pub mod angle;
pub mod config;
pub mod error;
pub mod flatten;
pub mod geometry;
pub mod matrix;
pub mod paint_region;
pub mod path;
pub mod point;
pub mod rect;
pub mod round_rect;
pub mod rounding_radii;
pub mod rstransform;
pub mod scalar;
pub mod size;
pub mod stroke;
pub mod tessellator;

pub use peniko;
pub use peniko::kurbo;

pub use accumulation_rect::AccumulationRect;
pub use angle::{Degrees, Radians};
pub use config::{FillStrategy, GeometryConfig, DEFAULT_MIN_STROKE_SIZE};
pub use error::{GeometryError, OutlineError, TessellationError};
pub use matrix::Matrix;
pub use paint_region::{PaintRegion, PaintRegionRecorder};
pub use path::{FillType, Path, PathBuilder, PathReceiver};
pub use point::Point;
pub use rect::Rect;
pub use round_rect::RoundRect;
pub use rounding_radii::RoundingRadii;
pub use rstransform::RSTransform;
pub use scalar::Scalar;
pub use size::Size;
pub use stroke::StrokeStyle;
pub use tessellator::Tessellator;
