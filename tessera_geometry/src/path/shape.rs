// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape factories and structural shape recognition.

use super::{FillType, Path, PathBuilder, ShapeKind, Verb};
use crate::angle::Degrees;
use crate::point::Point;
use crate::rect::Rect;
use crate::round_rect::RoundRect;
use crate::scalar::{nearly_equal, Scalar, FRAC_1_SQRT_2};

impl Path {
    /// A closed rectangle, clockwise from the top left corner.
    pub fn make_rect(rect: Rect) -> Self {
        let mut builder = PathBuilder::new();
        builder.add_rect(&rect);
        builder
            .into_path(FillType::NonZero)
            .with_shape(ShapeKind::Rect(rect.positive()))
    }

    /// A closed rectangle from its edges.
    pub fn make_rect_ltrb(left: Scalar, top: Scalar, right: Scalar, bottom: Scalar) -> Self {
        Self::make_rect(Rect::make_ltrb(left, top, right, bottom))
    }

    /// The ellipse inscribed in `bounds`.
    pub fn make_oval(bounds: Rect) -> Self {
        let mut builder = PathBuilder::new();
        builder.add_oval(&bounds);
        builder
            .into_path(FillType::NonZero)
            .with_shape(ShapeKind::Oval(bounds.positive()))
    }

    /// A circle.
    pub fn make_circle(center: Point, radius: Scalar) -> Self {
        Self::make_oval(Rect::make_ltrb(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        ))
    }

    /// A rounded rectangle.
    pub fn make_round_rect(round_rect: RoundRect) -> Self {
        let mut builder = PathBuilder::new();
        builder.add_round_rect(&round_rect);
        builder
            .into_path(FillType::NonZero)
            .with_shape(ShapeKind::RoundRect(round_rect))
    }

    /// A single open line segment.
    pub fn make_line(p0: Point, p1: Point) -> Self {
        let mut builder = PathBuilder::new();
        builder.move_to(p0).line_to(p1);
        builder
            .into_path(FillType::NonZero)
            .with_shape(ShapeKind::Line(p0, p1))
    }

    /// A polyline through `points`, optionally closed.
    pub fn make_poly(points: &[Point], close: bool, fill_type: FillType) -> Self {
        let mut builder = PathBuilder::new();
        builder.add_poly(points, close);
        builder.into_path(fill_type)
    }

    /// An arc of the ellipse inscribed in `bounds`; see [`PathBuilder::add_arc`].
    pub fn make_arc(bounds: Rect, start: Degrees, sweep: Degrees, use_center: bool) -> Self {
        let mut builder = PathBuilder::new();
        builder.add_arc(&bounds, start, sweep, use_center);
        let path = builder.into_path(FillType::NonZero);
        if sweep.value().abs() >= 360.0 {
            path.with_shape(ShapeKind::Oval(bounds.positive()))
        } else {
            path
        }
    }

    /// If the path is a rectangle, returns it and whether the contour is explicitly closed.
    ///
    /// Paths made by [`Path::make_rect`] are recognized directly. Otherwise the path must be
    /// a single contour of three or four axis-aligned lines that alternate between
    /// horizontal and vertical, optionally followed by a close.
    pub fn as_rect(&self) -> Option<(Rect, bool)> {
        match self.shape() {
            Some(ShapeKind::Rect(rect)) => return Some((rect, true)),
            Some(ShapeKind::RoundRect(rr)) if rr.is_rect() => return Some((rr.bounds(), true)),
            Some(_) => return None,
            None => {}
        }
        let packed = self.packed();
        let verbs = packed.verbs();
        let (closed, lines) = match verbs.split_last() {
            Some((Verb::Close, rest)) => (true, rest),
            _ => (false, verbs),
        };
        let (Verb::Move, lines) = lines.split_first()? else {
            return None;
        };
        if !(3..=4).contains(&lines.len()) || lines.iter().any(|v| *v != Verb::Line) {
            return None;
        }
        let points = packed.points();
        if lines.len() == 4 && points[4] != points[0] {
            return None;
        }
        let corners = [points[0], points[1], points[2], points[3]];
        let mut horizontal = None;
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            let is_horizontal = match (a.x == b.x, a.y == b.y) {
                (false, true) => true,
                (true, false) => false,
                _ => return None,
            };
            if horizontal == Some(is_horizontal) {
                return None;
            }
            horizontal = Some(is_horizontal);
        }
        Some((Rect::from_points(corners[0], corners[2]), closed))
    }

    /// If the path is an ellipse, returns its bounds.
    ///
    /// Besides paths made by [`Path::make_oval`], this recognizes a single closed contour of
    /// four quarter conics whose control points are the corners of the bounds.
    pub fn as_oval(&self) -> Option<Rect> {
        match self.shape() {
            Some(ShapeKind::Oval(bounds)) => return Some(bounds),
            Some(_) => return None,
            None => {}
        }
        let packed = self.packed();
        let expected = [
            Verb::Move,
            Verb::Conic,
            Verb::Conic,
            Verb::Conic,
            Verb::Conic,
            Verb::Close,
        ];
        if packed.verbs() != expected
            || !packed.weights().iter().all(|w| nearly_equal(*w, FRAC_1_SQRT_2))
        {
            return None;
        }
        let bounds = packed.control_bounds()?;
        if bounds.is_empty() {
            return None;
        }
        let corners = bounds.corners();
        let c = bounds.center();
        let midpoints = [
            Point::new(bounds.left, c.y),
            Point::new(bounds.right, c.y),
            Point::new(c.x, bounds.top),
            Point::new(c.x, bounds.bottom),
        ];
        let points = packed.points();
        let near = |p: &Point, set: &[Point]| set.iter().any(|q| p.nearly_equals(*q));
        if points.iter().step_by(2).all(|p| near(p, &midpoints))
            && points.iter().skip(1).step_by(2).all(|p| near(p, &corners))
            && points[0] == points[8]
        {
            Some(bounds)
        } else {
            None
        }
    }

    /// If the path is a single line segment, returns its end points.
    pub fn as_line(&self) -> Option<(Point, Point)> {
        match self.shape() {
            Some(ShapeKind::Line(p0, p1)) => return Some((p0, p1)),
            Some(_) => return None,
            None => {}
        }
        let packed = self.packed();
        if packed.verbs() == [Verb::Move, Verb::Line] {
            Some((packed.points()[0], packed.points()[1]))
        } else {
            None
        }
    }

    /// If the path was made by [`Path::make_round_rect`], returns the round rect.
    pub fn as_round_rect(&self) -> Option<RoundRect> {
        match self.shape() {
            Some(ShapeKind::RoundRect(rr)) => Some(rr),
            _ => None,
        }
    }

    /// Returns `true` if [`Path::as_rect`] recognizes the path.
    pub fn is_rect(&self) -> bool {
        self.as_rect().is_some()
    }

    /// Returns `true` if [`Path::as_oval`] recognizes the path.
    pub fn is_oval(&self) -> bool {
        self.as_oval().is_some()
    }

    /// Returns `true` if [`Path::as_line`] recognizes the path.
    pub fn is_line(&self) -> bool {
        self.as_line().is_some()
    }

    /// Returns `true` if [`Path::as_round_rect`] recognizes the path.
    pub fn is_round_rect(&self) -> bool {
        self.as_round_rect().is_some()
    }
}
