// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expanding flattened paths into stroke triangles.
//!
//! Every segment becomes a quad. Joins are added on the outer side of each corner and caps at
//! the ends of open contours. The output is a plain triangle list; overlapping triangles are
//! expected and are resolved by drawing with a non-overlapping blend or a stencil.

use core::f32::consts::PI;

use peniko::kurbo::{self, Cap, Join};

use crate::flatten::{flatten, Polyline};
use crate::path::Path;
use crate::point::Point;
use crate::scalar::Scalar;

/// Corners sharper than this are treated as straight.
const TANGENT_THRESHOLD: Scalar = 1e-6;

/// The most segments a round join or cap is split into.
const MAX_ARC_SEGMENTS: usize = 256;

/// Stroke parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Full width of the stroke. Zero is a hairline.
    pub width: Scalar,
    /// End cap of open contours.
    pub cap: Cap,
    /// Corner join.
    pub join: Join,
    /// Miter joins longer than this multiple of the half width become bevels.
    pub miter_limit: Scalar,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: Cap::Butt,
            join: Join::Miter,
            miter_limit: 4.0,
        }
    }
}

impl StrokeStyle {
    /// A butt capped, miter joined stroke of the given width.
    pub fn new(width: Scalar) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_cap(mut self, cap: Cap) -> Self {
        self.cap = cap;
        self
    }

    #[must_use]
    pub fn with_join(mut self, join: Join) -> Self {
        self.join = join;
        self
    }

    #[must_use]
    pub fn with_miter_limit(mut self, limit: Scalar) -> Self {
        self.miter_limit = limit;
        self
    }
}

impl From<&kurbo::Stroke> for StrokeStyle {
    /// Dashes are ignored and the start cap is used for both ends.
    fn from(stroke: &kurbo::Stroke) -> Self {
        Self {
            width: stroke.width as Scalar,
            cap: stroke.start_cap,
            join: stroke.join,
            miter_limit: stroke.miter_limit as Scalar,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    from: Point,
    to: Point,
    tangent: Point,
}

/// Builds the triangle list for a stroke.
#[derive(Debug)]
struct Stroker<'a> {
    style: &'a StrokeStyle,
    half_width: Scalar,
    tolerance: Scalar,
    output: Vec<Point>,
}

impl Stroker<'_> {
    fn triangle(&mut self, a: Point, b: Point, c: Point) {
        self.output.extend_from_slice(&[a, b, c]);
    }

    fn segment(&mut self, segment: &Segment) {
        let n = segment.tangent.perpendicular() * self.half_width;
        let (a, b) = (segment.from, segment.to);
        self.triangle(a + n, a - n, b + n);
        self.triangle(a - n, b - n, b + n);
    }

    fn arc_segments(&self, angle: Scalar) -> usize {
        let step = 2.0 * (1.0 - self.tolerance / self.half_width).clamp(-1.0, 1.0).acos();
        if step <= 0.0 {
            return MAX_ARC_SEGMENTS;
        }
        ((angle / step).ceil() as usize).clamp(1, MAX_ARC_SEGMENTS)
    }

    /// A triangle fan around `center` from `center + start` through `angle` radians.
    fn fan(&mut self, center: Point, start: Point, angle: Scalar) {
        let n = self.arc_segments(angle.abs());
        let step = angle / n as Scalar;
        let mut prev = center + start;
        for i in 1..=n {
            let next = center + start.rotate(step * i as Scalar);
            self.triangle(center, prev, next);
            prev = next;
        }
    }

    fn join(&mut self, at: Point, prev: Point, next: Point) {
        let cross = prev.cross(next);
        let dot = prev.dot(next);
        if cross.abs() <= TANGENT_THRESHOLD && dot > 0.0 {
            return;
        }
        // Turning towards positive angles puts the outer edge on the negative normal side.
        let (side, turn) = if cross > 0.0 { (-1.0, 1.0) } else { (1.0, -1.0) };
        let n0 = prev.perpendicular() * (self.half_width * side);
        let n1 = next.perpendicular() * (self.half_width * side);
        match self.style.join {
            Join::Bevel => self.triangle(at, at + n0, at + n1),
            Join::Miter => {
                self.triangle(at, at + n0, at + n1);
                let hypot = cross.hypot(dot);
                let limit = self.style.miter_limit;
                if 2.0 * hypot < (hypot + dot) * limit * limit {
                    let tip = at + (n0 + n1) / (1.0 + dot);
                    self.triangle(at + n0, tip, at + n1);
                }
            }
            Join::Round => {
                let angle = cross.atan2(dot).abs();
                self.fan(at, n0, angle * turn);
            }
        }
    }

    /// A cap at `at`, where `outward` points away from the stroke.
    fn cap(&mut self, at: Point, outward: Point) {
        let n = outward.perpendicular() * self.half_width;
        match self.style.cap {
            Cap::Butt => {}
            Cap::Square => {
                let v = outward * self.half_width;
                self.triangle(at + n, at - n, at + n + v);
                self.triangle(at - n, at - n + v, at + n + v);
            }
            Cap::Round => self.fan(at, -n, PI),
        }
    }

    fn dot(&mut self, at: Point) {
        match self.style.cap {
            Cap::Butt => {}
            Cap::Square => {
                let h = self.half_width;
                let (tl, br) = (at - Point::new(h, h), at + Point::new(h, h));
                let (tr, bl) = (Point::new(br.x, tl.y), Point::new(tl.x, br.y));
                self.triangle(tl, tr, bl);
                self.triangle(tr, br, bl);
            }
            Cap::Round => self.fan(at, Point::new(self.half_width, 0.0), 2.0 * PI),
        }
    }

    fn contour(&mut self, points: &[Point], is_closed: bool) {
        let mut segments = Vec::with_capacity(points.len());
        let closing = points
            .last()
            .copied()
            .zip(points.first().copied())
            .filter(|_| is_closed);
        let pairs = points.windows(2).map(|w| (w[0], w[1])).chain(closing);
        for (from, to) in pairs {
            // Zero length segments have no direction and contribute nothing.
            if let Some(tangent) = (to - from).normalize() {
                segments.push(Segment { from, to, tangent });
            }
        }

        let (Some(first), Some(last)) = (segments.first().copied(), segments.last().copied())
        else {
            if let Some(p) = points.first() {
                self.dot(*p);
            }
            return;
        };

        for segment in &segments {
            self.segment(segment);
        }
        for pair in segments.windows(2) {
            self.join(pair[0].to, pair[0].tangent, pair[1].tangent);
        }
        if is_closed {
            if segments.len() > 1 {
                self.join(last.to, last.tangent, first.tangent);
            }
        } else {
            self.cap(first.from, -first.tangent);
            self.cap(last.to, last.tangent);
        }
    }
}

/// Expands a polyline into a stroke triangle list.
///
/// Round joins and caps are flattened to within `tolerance`. Every three points form one
/// triangle.
pub fn stroke_polyline(polyline: &Polyline, style: &StrokeStyle, tolerance: Scalar) -> Vec<Point> {
    let half_width = style.width.max(0.0) * 0.5;
    if half_width <= 0.0 || !half_width.is_finite() {
        return Vec::new();
    }
    let mut stroker = Stroker {
        style,
        half_width,
        tolerance: tolerance.max(Scalar::EPSILON),
        output: Vec::with_capacity(polyline.points.len() * 6),
    };
    for contour in &polyline.contours {
        stroker.contour(polyline.contour_points(contour), contour.is_closed);
    }
    stroker.output
}

/// Flattens `path` and expands it into a stroke triangle list.
pub fn stroke_path(path: &Path, style: &StrokeStyle, tolerance: Scalar) -> Vec<Point> {
    stroke_polyline(&flatten(path, tolerance), style, tolerance)
}

#[cfg(test)]
mod tests {
    use peniko::kurbo::{Cap, Join};

    use super::{stroke_path, StrokeStyle};
    use crate::path::{FillType, Path};
    use crate::point::Point;

    fn elbow() -> Path {
        Path::make_poly(
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ],
            false,
            FillType::NonZero,
        )
    }

    fn triangle_count(path: &Path, style: &StrokeStyle) -> usize {
        let output = stroke_path(path, style, 0.1);
        assert_eq!(output.len() % 3, 0);
        assert!(output.iter().all(|p| p.is_finite()));
        output.len() / 3
    }

    #[test]
    fn join_styles() {
        let path = elbow();
        let bevel = StrokeStyle::new(2.0).with_join(Join::Bevel);
        assert_eq!(triangle_count(&path, &bevel), 5);
        let miter = StrokeStyle::new(2.0).with_join(Join::Miter);
        assert_eq!(triangle_count(&path, &miter), 6);
        let round = StrokeStyle::new(2.0).with_join(Join::Round);
        assert!(triangle_count(&path, &round) > 5);
    }

    #[test]
    fn miter_limit_downgrades_per_corner() {
        // A right angle needs a miter ratio of sqrt(2).
        let path = elbow();
        let limited = StrokeStyle::new(2.0).with_miter_limit(1.2);
        assert_eq!(triangle_count(&path, &limited), 5);

        // One sharp corner and one right angle: only the sharp one loses its miter.
        let zigzag = Path::make_poly(
            &[
                Point::new(0.0, 0.0),
                Point::new(20.0, 0.0),
                Point::new(0.0, 1.0),
                Point::new(0.0, 20.0),
            ],
            false,
            FillType::NonZero,
        );
        let style = StrokeStyle::new(2.0).with_miter_limit(4.0);
        assert_eq!(triangle_count(&zigzag, &style), 3 * 2 + 1 + 2);
    }

    #[test]
    fn miter_tip_position() {
        let output = stroke_path(&elbow(), &StrokeStyle::new(2.0), 0.1);
        assert!(output.contains(&Point::new(11.0, -1.0)));
    }

    #[test]
    fn caps() {
        let line = Path::make_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let butt = StrokeStyle::new(2.0);
        assert_eq!(triangle_count(&line, &butt), 2);
        let square = StrokeStyle::new(2.0).with_cap(Cap::Square);
        assert_eq!(triangle_count(&line, &square), 6);
        let output = stroke_path(&line, &square, 0.1);
        assert!(output.iter().any(|p| p.x == -1.0));
        assert!(output.iter().any(|p| p.x == 11.0));
        let round = StrokeStyle::new(2.0).with_cap(Cap::Round);
        assert!(triangle_count(&line, &round) > 4);
    }

    #[test]
    fn closed_contours_have_no_caps() {
        let rect = Path::make_rect_ltrb(0.0, 0.0, 10.0, 10.0);
        let style = StrokeStyle::new(2.0).with_cap(Cap::Square).with_join(Join::Bevel);
        // Four quads and four bevels.
        assert_eq!(triangle_count(&rect, &style), 12);
    }

    #[test]
    fn degenerate_input_does_not_produce_nan() {
        let repeated = Path::make_poly(
            &[
                Point::new(5.0, 5.0),
                Point::new(5.0, 5.0),
                Point::new(10.0, 5.0),
                Point::new(10.0, 5.0),
                Point::new(5.0, 5.0),
            ],
            false,
            FillType::NonZero,
        );
        for join in [Join::Bevel, Join::Miter, Join::Round] {
            let style = StrokeStyle::new(3.0).with_join(join).with_cap(Cap::Round);
            triangle_count(&repeated, &style);
        }

        let dot = Path::make_line(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        assert_eq!(triangle_count(&dot, &StrokeStyle::new(2.0)), 0);
        let square = StrokeStyle::new(2.0).with_cap(Cap::Square);
        assert_eq!(triangle_count(&dot, &square), 2);
        assert_eq!(triangle_count(&elbow(), &StrokeStyle::new(0.0)), 0);
    }
}
