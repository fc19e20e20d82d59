// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The packed verb/point path encoding and its builder.

use crate::angle::Degrees;
use crate::point::Point;
use crate::rect::Rect;
use crate::round_rect::RoundRect;
use crate::scalar::{Scalar, FRAC_1_SQRT_2};

/// A path verb in a [`PackedPath`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Verb {
    /// Starts a contour. Consumes one point.
    Move,
    /// A line. Consumes one point.
    Line,
    /// A quadratic Bézier. Consumes two points.
    Quad,
    /// A rational quadratic with a weight. Consumes two points and one weight.
    Conic,
    /// A cubic Bézier. Consumes three points.
    Cubic,
    /// Closes the current contour. Consumes nothing.
    Close,
}

impl Verb {
    /// The number of points this verb consumes.
    pub fn point_count(self) -> usize {
        match self {
            Self::Move | Self::Line => 1,
            Self::Quad | Self::Conic => 2,
            Self::Cubic => 3,
            Self::Close => 0,
        }
    }
}

/// A single decoded path element.
///
/// Segment elements only carry their control and end points; the start point is the end
/// of the previous element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathElement {
    /// Starts a contour.
    MoveTo(Point),
    /// A line to the point.
    LineTo(Point),
    /// A quadratic Bézier with a control point and an end point.
    QuadTo(Point, Point),
    /// A conic with a control point, an end point and a weight.
    ConicTo(Point, Point, Scalar),
    /// A cubic Bézier with two control points and an end point.
    CubicTo(Point, Point, Point),
    /// Closes the current contour.
    Close,
}

impl PathElement {
    /// Converts a kurbo path element.
    pub fn from_kurbo(el: peniko::kurbo::PathEl) -> Self {
        use peniko::kurbo::PathEl;
        match el {
            PathEl::MoveTo(p) => Self::MoveTo(Point::from_kurbo(p)),
            PathEl::LineTo(p) => Self::LineTo(Point::from_kurbo(p)),
            PathEl::QuadTo(p1, p2) => Self::QuadTo(Point::from_kurbo(p1), Point::from_kurbo(p2)),
            PathEl::CurveTo(p1, p2, p3) => Self::CubicTo(
                Point::from_kurbo(p1),
                Point::from_kurbo(p2),
                Point::from_kurbo(p3),
            ),
            PathEl::ClosePath => Self::Close,
        }
    }

    /// The point the element ends at, if it has one.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => Some(p),
            Self::QuadTo(_, p) | Self::ConicTo(_, p, _) | Self::CubicTo(_, _, p) => Some(p),
            Self::Close => None,
        }
    }
}

/// A path stored as parallel arrays of verbs, points and conic weights.
///
/// Every contour starts with [`Verb::Move`]. Paths are normally produced by [`PathBuilder`],
/// which maintains that invariant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedPath {
    verbs: Vec<Verb>,
    points: Vec<Point>,
    weights: Vec<Scalar>,
}

impl PackedPath {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// The verbs.
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    /// The points consumed by the verbs, in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// One weight per [`Verb::Conic`], in order.
    pub fn weights(&self) -> &[Scalar] {
        &self.weights
    }

    /// Returns `true` if there are no verbs.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Iterates over the decoded elements.
    pub fn elements(&self) -> Elements<'_> {
        Elements {
            path: self,
            verb: 0,
            point: 0,
            weight: 0,
        }
    }

    /// The bounds of all points, including control points.
    pub fn control_bounds(&self) -> Option<Rect> {
        Rect::make_point_bounds(self.points.iter().copied())
    }

    /// The same path translated by `offset`.
    #[must_use]
    pub fn with_offset(&self, offset: Point) -> Self {
        Self {
            verbs: self.verbs.clone(),
            points: self.points.iter().map(|p| *p + offset).collect(),
            weights: self.weights.clone(),
        }
    }

    /// Appends every contour of `other`.
    pub fn extend(&mut self, other: &Self) {
        self.verbs.extend_from_slice(&other.verbs);
        self.points.extend_from_slice(&other.points);
        self.weights.extend_from_slice(&other.weights);
    }
}

/// Iterator over the elements of a [`PackedPath`].
#[derive(Clone, Debug)]
pub struct Elements<'a> {
    path: &'a PackedPath,
    verb: usize,
    point: usize,
    weight: usize,
}

impl Iterator for Elements<'_> {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        let verb = *self.path.verbs.get(self.verb)?;
        self.verb += 1;
        let pts = &self.path.points[self.point..self.point + verb.point_count()];
        self.point += verb.point_count();
        Some(match verb {
            Verb::Move => PathElement::MoveTo(pts[0]),
            Verb::Line => PathElement::LineTo(pts[0]),
            Verb::Quad => PathElement::QuadTo(pts[0], pts[1]),
            Verb::Conic => {
                let weight = self.path.weights[self.weight];
                self.weight += 1;
                PathElement::ConicTo(pts[0], pts[1], weight)
            }
            Verb::Cubic => PathElement::CubicTo(pts[0], pts[1], pts[2]),
            Verb::Close => PathElement::Close,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.path.verbs.len() - self.verb;
        (remaining, Some(remaining))
    }
}

/// The most times a conic is halved when approximating it with quadratics.
const MAX_CONIC_TO_QUAD_POW2: u32 = 5;

/// A rational quadratic Bézier.
///
/// A weight below 1 gives an elliptical arc, 1 a parabola and above 1 a hyperbola.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Conic {
    /// Start point.
    pub p0: Point,
    /// Control point.
    pub p1: Point,
    /// End point.
    pub p2: Point,
    /// Weight of the control point.
    pub weight: Scalar,
}

impl Conic {
    /// Create a new conic.
    pub fn new(p0: Point, p1: Point, p2: Point, weight: Scalar) -> Self {
        Self { p0, p1, p2, weight }
    }

    /// The point at parameter `t`.
    pub fn eval(&self, t: Scalar) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt;
        let b = 2.0 * t * mt * self.weight;
        let c = t * t;
        let numerator = self.p0 * a + self.p1 * b + self.p2 * c;
        numerator / (a + b + c)
    }

    /// Splits the conic at `t = 0.5`.
    pub fn chop(&self) -> (Self, Self) {
        let scale = 1.0 / (1.0 + self.weight);
        let new_weight = (0.5 + self.weight * 0.5).sqrt();
        let wp1 = self.p1 * self.weight;
        let mid = (self.p0 + wp1 * 2.0 + self.p2) * (scale * 0.5);
        (
            Self::new(self.p0, (self.p0 + wp1) * scale, mid, new_weight),
            Self::new(mid, (wp1 + self.p2) * scale, self.p2, new_weight),
        )
    }

    /// The number of halvings needed before each piece's control polygon is within
    /// `tolerance` of the conic when read as a quadratic.
    pub fn quad_pow2(&self, tolerance: Scalar) -> u32 {
        if !(tolerance > 0.0) || !self.weight.is_finite() {
            return 0;
        }
        let a = self.weight - 1.0;
        let k = a / (4.0 * (2.0 + a));
        let d = (self.p0 - self.p1 * 2.0 + self.p2) * k;
        let mut error = d.length();
        let mut pow2 = 0;
        while pow2 < MAX_CONIC_TO_QUAD_POW2 && error > tolerance {
            error *= 0.25;
            pow2 += 1;
        }
        pow2
    }

    /// Approximates the conic with `2^quad_pow2(tolerance)` quadratics and hands each
    /// quadratic's control and end point to `f`.
    pub fn for_each_quad(&self, tolerance: Scalar, f: &mut impl FnMut(Point, Point)) {
        fn subdivide(conic: &Conic, level: u32, f: &mut impl FnMut(Point, Point)) {
            if level == 0 {
                f(conic.p1, conic.p2);
                return;
            }
            let (a, b) = conic.chop();
            subdivide(&a, level - 1, f);
            subdivide(&b, level - 1, f);
        }
        subdivide(self, self.quad_pow2(tolerance), f);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum BuilderState {
    /// No contour is open.
    #[default]
    Start,
    /// The last verb is a move.
    MoveTo,
    /// The open contour has at least one segment.
    NonemptySubpath,
}

/// Incrementally builds a [`PackedPath`].
///
/// Consecutive moves collapse into the last one, and a segment added with no open contour
/// starts one at the previous contour's start point. Degenerate conic weights are
/// simplified: a weight of exactly 1 becomes a quadratic, and a non-positive or non-finite
/// weight becomes a line.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    path: PackedPath,
    state: BuilderState,
    contour_start: Point,
}

impl PathBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The end point of the last element, if any.
    pub fn current_point(&self) -> Option<Point> {
        match self.state {
            BuilderState::Start => self.path.points.last().map(|_| self.contour_start),
            _ => self.path.points.last().copied(),
        }
    }

    /// Starts a new contour at `p`.
    pub fn move_to(&mut self, p: Point) -> &mut Self {
        if self.state == BuilderState::MoveTo {
            if let Some(last) = self.path.points.last_mut() {
                *last = p;
            }
        } else {
            self.path.verbs.push(Verb::Move);
            self.path.points.push(p);
        }
        self.contour_start = p;
        self.state = BuilderState::MoveTo;
        self
    }

    fn ensure_contour(&mut self) {
        if self.state == BuilderState::Start {
            self.move_to(self.contour_start);
        }
        self.state = BuilderState::NonemptySubpath;
    }

    /// Adds a line to `p`.
    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.ensure_contour();
        self.path.verbs.push(Verb::Line);
        self.path.points.push(p);
        self
    }

    /// Adds a quadratic Bézier.
    pub fn quad_to(&mut self, p1: Point, p2: Point) -> &mut Self {
        self.ensure_contour();
        self.path.verbs.push(Verb::Quad);
        self.path.points.extend([p1, p2]);
        self
    }

    /// Adds a conic.
    pub fn conic_to(&mut self, p1: Point, p2: Point, weight: Scalar) -> &mut Self {
        if !(weight > 0.0) || !weight.is_finite() {
            return self.line_to(p2);
        }
        if weight == 1.0 {
            return self.quad_to(p1, p2);
        }
        self.ensure_contour();
        self.path.verbs.push(Verb::Conic);
        self.path.points.extend([p1, p2]);
        self.path.weights.push(weight);
        self
    }

    /// Adds a cubic Bézier.
    pub fn cubic_to(&mut self, p1: Point, p2: Point, p3: Point) -> &mut Self {
        self.ensure_contour();
        self.path.verbs.push(Verb::Cubic);
        self.path.points.extend([p1, p2, p3]);
        self
    }

    /// Closes the open contour.
    ///
    /// Closing a contour that has no segments does nothing.
    pub fn close(&mut self) -> &mut Self {
        if self.state == BuilderState::NonemptySubpath {
            self.path.verbs.push(Verb::Close);
            self.state = BuilderState::Start;
        }
        self
    }

    /// Adds a line to `p` unless it would have zero length.
    fn line_to_if_moved(&mut self, p: Point) {
        if self.current_point() != Some(p) {
            self.line_to(p);
        }
    }

    /// Adds a closed rectangle, clockwise from the top left corner.
    pub fn add_rect(&mut self, rect: &Rect) -> &mut Self {
        self.move_to(Point::new(rect.left, rect.top))
            .line_to(Point::new(rect.right, rect.top))
            .line_to(Point::new(rect.right, rect.bottom))
            .line_to(Point::new(rect.left, rect.bottom))
            .close()
    }

    /// Adds the ellipse inscribed in `rect` as four quarter conics, clockwise from the
    /// middle of the right edge.
    pub fn add_oval(&mut self, rect: &Rect) -> &mut Self {
        let c = rect.center();
        let w = FRAC_1_SQRT_2;
        self.move_to(Point::new(rect.right, c.y))
            .conic_to(Point::new(rect.right, rect.bottom), Point::new(c.x, rect.bottom), w)
            .conic_to(Point::new(rect.left, rect.bottom), Point::new(rect.left, c.y), w)
            .conic_to(Point::new(rect.left, rect.top), Point::new(c.x, rect.top), w)
            .conic_to(Point::new(rect.right, rect.top), Point::new(rect.right, c.y), w)
            .close()
    }

    /// Adds a rounded rectangle, clockwise from the end of the top left corner.
    ///
    /// Square corners and zero length edges are left out.
    pub fn add_round_rect(&mut self, round_rect: &RoundRect) -> &mut Self {
        let b = round_rect.bounds();
        let r = round_rect.radii();
        let w = FRAC_1_SQRT_2;
        self.move_to(Point::new(b.left + r.top_left.width, b.top));
        self.line_to_if_moved(Point::new(b.right - r.top_right.width, b.top));
        if !r.top_right.is_empty() {
            self.conic_to(
                Point::new(b.right, b.top),
                Point::new(b.right, b.top + r.top_right.height),
                w,
            );
        }
        self.line_to_if_moved(Point::new(b.right, b.bottom - r.bottom_right.height));
        if !r.bottom_right.is_empty() {
            self.conic_to(
                Point::new(b.right, b.bottom),
                Point::new(b.right - r.bottom_right.width, b.bottom),
                w,
            );
        }
        self.line_to_if_moved(Point::new(b.left + r.bottom_left.width, b.bottom));
        if !r.bottom_left.is_empty() {
            self.conic_to(
                Point::new(b.left, b.bottom),
                Point::new(b.left, b.bottom - r.bottom_left.height),
                w,
            );
        }
        self.line_to_if_moved(Point::new(b.left, b.top + r.top_left.height));
        if !r.top_left.is_empty() {
            self.conic_to(
                Point::new(b.left, b.top),
                Point::new(b.left + r.top_left.width, b.top),
                w,
            );
        }
        self.close()
    }

    /// Adds an arc of the ellipse inscribed in `bounds`.
    ///
    /// Angles are measured clockwise from the positive x axis. With `use_center` the arc
    /// is closed through the center, forming a wedge. A sweep of a full turn or more adds
    /// the whole oval.
    pub fn add_arc(
        &mut self,
        bounds: &Rect,
        start: Degrees,
        sweep: Degrees,
        use_center: bool,
    ) -> &mut Self {
        let sweep = sweep.value();
        if sweep.abs() >= 360.0 {
            return self.add_oval(bounds);
        }
        let center = bounds.center();
        let rx = bounds.width() * 0.5;
        let ry = bounds.height() * 0.5;
        let on_ellipse = |radians: Scalar| {
            let (sin, cos) = radians.sin_cos();
            center + Point::new(rx * cos, ry * sin)
        };
        let start = start.to_radians().value();
        let start_point = on_ellipse(start);
        if use_center {
            self.move_to(center).line_to(start_point);
        } else {
            self.move_to(start_point);
        }
        if sweep == 0.0 {
            if use_center {
                return self.close();
            }
            return self.line_to(start_point);
        }

        let segments = (sweep.abs() / 90.0).ceil().max(1.0);
        let step = sweep.to_radians() / segments;
        let half = step * 0.5;
        let weight = half.cos();
        let mut angle = start;
        for _ in 0..segments as u32 {
            let mid = angle + half;
            let control = center + Point::new(rx * mid.cos() / weight, ry * mid.sin() / weight);
            angle += step;
            self.conic_to(control, on_ellipse(angle), weight);
        }
        if use_center {
            self.close();
        }
        self
    }

    /// Adds a polyline through `points`, optionally closed.
    pub fn add_poly(&mut self, points: &[Point], close: bool) -> &mut Self {
        let Some((first, rest)) = points.split_first() else {
            return self;
        };
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
        if close {
            self.close();
        }
        self
    }

    /// Finishes building. A trailing move with no segments is dropped.
    pub fn build(mut self) -> PackedPath {
        if self.state == BuilderState::MoveTo {
            self.path.verbs.pop();
            self.path.points.pop();
        }
        self.path
    }
}
