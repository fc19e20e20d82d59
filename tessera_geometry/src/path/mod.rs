// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cheaply cloneable paths with two interchangeable encodings.
//!
//! A [`Path`] is created holding either a [`BezPath`] or a [`PackedPath`]. The other form is
//! derived the first time something asks for it and cached in the shared storage, so every
//! clone of the path benefits. Paths are never mutated in place.

mod encoding;
pub mod outline;
mod receiver;
mod shape;

use std::fmt;
use std::ops::Add;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};

use peniko::kurbo::{self, BezPath, Shape as _};

pub use encoding::{Conic, Elements, PackedPath, PathBuilder, PathElement, Verb};
pub use receiver::{PathReceiver, CONIC_TO_QUAD_TOLERANCE};

use crate::point::Point;
use crate::rect::Rect;
use crate::round_rect::RoundRect;
use receiver::{dispatch_elements, BezPathReceiver};

/// The fill rule of a path.
///
/// There is no inverse fill: a path always fills its interior.
pub type FillType = peniko::Fill;

/// How many render hints a path receives before it stops being considered volatile.
const VOLATILE_RENDER_COUNT: u32 = 2;

/// The shape a path was made from, recorded by the factory functions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ShapeKind {
    Rect(Rect),
    Oval(Rect),
    RoundRect(RoundRect),
    Line(Point, Point),
}

impl ShapeKind {
    fn with_offset(self, offset: Point) -> Self {
        match self {
            Self::Rect(r) => Self::Rect(r.shift(offset)),
            Self::Oval(r) => Self::Oval(r.shift(offset)),
            Self::RoundRect(rr) => Self::RoundRect(rr.shift(offset)),
            Self::Line(p0, p1) => Self::Line(p0 + offset, p1 + offset),
        }
    }
}

/// Shared storage. Exactly one encoding is set at construction.
struct PathData {
    packed: OnceLock<PackedPath>,
    bez: OnceLock<BezPath>,
    bounds: OnceLock<Rect>,
    render_count: AtomicU32,
}

impl PathData {
    fn new(packed: Option<PackedPath>, bez: Option<BezPath>) -> Self {
        Self {
            packed: packed.map(OnceLock::from).unwrap_or_default(),
            bez: bez.map(OnceLock::from).unwrap_or_default(),
            bounds: OnceLock::new(),
            render_count: AtomicU32::new(VOLATILE_RENDER_COUNT),
        }
    }
}

/// An immutable path with a fill rule.
///
/// Cloning shares the underlying storage. Equality compares fill rules and the verb and
/// point streams, regardless of which encoding each side currently holds.
#[derive(Clone)]
pub struct Path {
    fill_type: FillType,
    shape: Option<ShapeKind>,
    data: Arc<PathData>,
}

impl Default for Path {
    fn default() -> Self {
        Self::from_packed(PackedPath::new(), FillType::NonZero)
    }
}

impl Path {
    /// Wraps a kurbo path.
    pub fn from_bez_path(path: BezPath, fill_type: FillType) -> Self {
        Self {
            fill_type,
            shape: None,
            data: Arc::new(PathData::new(None, Some(path))),
        }
    }

    /// Wraps a packed path.
    pub fn from_packed(path: PackedPath, fill_type: FillType) -> Self {
        Self {
            fill_type,
            shape: None,
            data: Arc::new(PathData::new(Some(path), None)),
        }
    }

    pub(crate) fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = Some(shape);
        self
    }

    pub(crate) fn shape(&self) -> Option<ShapeKind> {
        self.shape
    }

    /// The fill rule.
    pub fn fill_type(&self) -> FillType {
        self.fill_type
    }

    /// The packed encoding, derived from the kurbo path on first use.
    pub fn packed(&self) -> &PackedPath {
        self.data.packed.get_or_init(|| {
            let mut builder = PathBuilder::new();
            self.dispatch(&mut builder);
            builder.build()
        })
    }

    /// The kurbo encoding, derived from the packed path on first use.
    ///
    /// Conics become quadratic Béziers.
    pub fn bez_path(&self) -> &BezPath {
        self.data.bez.get_or_init(|| {
            let mut receiver = BezPathReceiver::default();
            self.dispatch(&mut receiver);
            receiver.path
        })
    }

    /// Returns `true` if the packed encoding is currently available.
    pub fn has_packed(&self) -> bool {
        self.data.packed.get().is_some()
    }

    /// Returns `true` if the kurbo encoding is currently available.
    pub fn has_bez_path(&self) -> bool {
        self.data.bez.get().is_some()
    }

    /// Signals that the caller is about to render this unchanged path again.
    ///
    /// This is purely a caching hint. Each call brings the path closer to being considered
    /// non-volatile; see [`Path::is_volatile`].
    pub fn will_render_bez_path(&self) -> &BezPath {
        let _ = self.data.render_count.fetch_update(
            Ordering::Relaxed,
            Ordering::Relaxed,
            |count| count.checked_sub(1),
        );
        self.bez_path()
    }

    /// Returns `true` until the path has been rendered often enough to be worth caching.
    pub fn is_volatile(&self) -> bool {
        self.data.render_count.load(Ordering::Relaxed) > 0
    }

    /// Returns `true` if the path has no verbs.
    pub fn is_empty(&self) -> bool {
        match self.data.packed.get() {
            Some(packed) => packed.is_empty(),
            None => self.bez_path().elements().is_empty(),
        }
    }

    /// The bounds of every point of the path, including control points.
    ///
    /// This is never smaller than the area the path encloses. An empty path has empty bounds.
    pub fn bounds(&self) -> Rect {
        *self.data.bounds.get_or_init(|| match self.data.packed.get() {
            Some(packed) => packed.control_bounds().unwrap_or(Rect::ZERO),
            None => {
                let points = self.bez_path().elements().iter().flat_map(|el| {
                    let (pts, n): ([kurbo::Point; 3], usize) = match *el {
                        kurbo::PathEl::MoveTo(p) | kurbo::PathEl::LineTo(p) => {
                            ([p, p, p], 1)
                        }
                        kurbo::PathEl::QuadTo(p1, p2) => ([p1, p2, p2], 2),
                        kurbo::PathEl::CurveTo(p1, p2, p3) => ([p1, p2, p3], 3),
                        kurbo::PathEl::ClosePath => ([kurbo::Point::ZERO; 3], 0),
                    };
                    pts.into_iter().take(n).map(Point::from_kurbo)
                });
                Rect::make_point_bounds(points).unwrap_or(Rect::ZERO)
            }
        })
    }

    /// Returns `true` if `point` is inside the path according to its fill rule.
    ///
    /// Open contours are treated as closed.
    pub fn contains(&self, point: Point) -> bool {
        let mut closed = BezPath::new();
        let mut open = false;
        for el in self.bez_path().elements() {
            match el {
                kurbo::PathEl::MoveTo(_) => {
                    if open {
                        closed.close_path();
                    }
                    open = true;
                }
                kurbo::PathEl::ClosePath => open = false,
                _ => {}
            }
            closed.push(*el);
        }
        if open {
            closed.close_path();
        }
        let winding = closed.winding(point.to_kurbo());
        match self.fill_type {
            FillType::NonZero => winding != 0,
            FillType::EvenOdd => winding % 2 != 0,
        }
    }

    /// Feeds the verbs of whichever encoding is available to `receiver`.
    pub fn dispatch<R: PathReceiver + ?Sized>(&self, receiver: &mut R) {
        if let Some(packed) = self.data.packed.get() {
            dispatch_elements(packed.elements(), receiver);
        } else if let Some(bez) = self.data.bez.get() {
            dispatch_elements(
                bez.elements().iter().map(|el| PathElement::from_kurbo(*el)),
                receiver,
            );
        } else {
            receiver.path_end();
        }
    }

    /// The same path translated by `offset`.
    #[must_use]
    pub fn with_offset(&self, offset: Point) -> Self {
        Self {
            fill_type: self.fill_type,
            shape: self.shape.map(|shape| shape.with_offset(offset)),
            data: Arc::new(PathData::new(Some(self.packed().with_offset(offset)), None)),
        }
    }

    /// The same path with a different fill rule, sharing storage with `self`.
    #[must_use]
    pub fn with_fill_type(&self, fill_type: FillType) -> Self {
        Self {
            fill_type,
            ..self.clone()
        }
    }
}

impl From<BezPath> for Path {
    fn from(path: BezPath) -> Self {
        Self::from_bez_path(path, FillType::NonZero)
    }
}

impl PathBuilder {
    /// Finishes building and wraps the result in a [`Path`].
    pub fn into_path(self, fill_type: FillType) -> Path {
        Path::from_packed(self.build(), fill_type)
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.fill_type == other.fill_type
            && (Arc::ptr_eq(&self.data, &other.data) || self.packed() == other.packed())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("fill_type", &self.fill_type)
            .field("shape", &self.shape)
            .field("packed", self.packed())
            .finish()
    }
}

/// Concatenates the contours of both paths.
///
/// The result takes the fill rule of the left operand and carries no shape metadata,
/// except that adding an empty path returns the other operand unchanged apart from the
/// fill rule.
impl Add<&Path> for &Path {
    type Output = Path;

    fn add(self, rhs: &Path) -> Path {
        if rhs.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return rhs.with_fill_type(self.fill_type);
        }
        let mut packed = self.packed().clone();
        packed.extend(rhs.packed());
        Path::from_packed(packed, self.fill_type)
    }
}

impl Add for Path {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}
