// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening paths into polylines.

use core::f32::consts::TAU;

use log::warn;
use smallvec::SmallVec;

use crate::path::{Conic, Path, PathReceiver};
use crate::point::Point;
use crate::rect::Rect;
use crate::scalar::Scalar;

/// The most line segments a single curve is split into.
const MAX_CURVE_SEGMENTS: usize = 1024;

/// A run of points in a [`Polyline`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contour {
    /// Index of the first point.
    pub start: usize,
    /// One past the index of the last point.
    pub end: usize,
    /// Whether the source contour ended with a close.
    ///
    /// The start point is never repeated at the end of a closed contour.
    pub is_closed: bool,
}

impl Contour {
    /// The number of points.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the contour has no points.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// A flattened path: line segments through consecutive points of each contour.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    /// The points of every contour, back to back.
    pub points: Vec<Point>,
    /// The contours, in path order.
    pub contours: SmallVec<[Contour; 4]>,
}

impl Polyline {
    /// Returns `true` if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points of one contour.
    pub fn contour_points(&self, contour: &Contour) -> &[Point] {
        &self.points[contour.start..contour.end]
    }

    /// The bounding box of all points.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::make_point_bounds(self.points.iter().copied())
    }

    /// The number of distinct points, up to three.
    ///
    /// Enough to tell whether the polyline can enclose any area.
    pub fn distinct_points_up_to_three(&self) -> usize {
        let mut distinct: SmallVec<[Point; 3]> = SmallVec::new();
        for p in &self.points {
            if !distinct.contains(p) {
                distinct.push(*p);
                if distinct.len() == 3 {
                    break;
                }
            }
        }
        distinct.len()
    }

    /// Returns `true` if the polyline is a single convex polygon.
    ///
    /// The contour is treated as closed. It is convex when every corner turns the same way
    /// and the corners turn through one full revolution in total, which rules out
    /// self-intersecting stars.
    pub fn is_convex(&self) -> bool {
        let [contour] = self.contours.as_slice() else {
            return false;
        };
        let mut points: SmallVec<[Point; 32]> =
            self.contour_points(contour).iter().copied().collect();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        let n = points.len();
        if n < 3 {
            return false;
        }
        let mut sign = 0.0;
        let mut turning = 0.0;
        for i in 0..n {
            let e0 = points[(i + 1) % n] - points[i];
            let e1 = points[(i + 2) % n] - points[(i + 1) % n];
            let cross = e0.cross(e1);
            if cross.abs() > Scalar::EPSILON * e0.length() * e1.length() {
                if sign == 0.0 {
                    sign = cross.signum();
                } else if cross.signum() != sign {
                    return false;
                }
            }
            turning += cross.atan2(e0.dot(e1));
        }
        sign != 0.0 && (turning.abs() - TAU).abs() < 1e-2
    }
}

/// The number of lines needed to keep a quadratic within `tolerance` of its flattening.
///
/// This is Wang's formula for degree 2.
pub fn quad_segment_count(p0: Point, p1: Point, p2: Point, tolerance: Scalar) -> usize {
    let dd = (p0 - p1 * 2.0 + p2).length();
    segment_count(0.25 * dd / tolerance)
}

/// The number of lines needed to keep a cubic within `tolerance` of its flattening.
///
/// This is Wang's formula for degree 3.
pub fn cubic_segment_count(p0: Point, p1: Point, p2: Point, p3: Point, tolerance: Scalar) -> usize {
    let dd0 = (p0 - p1 * 2.0 + p2).length();
    let dd1 = (p1 - p2 * 2.0 + p3).length();
    segment_count(0.75 * dd0.max(dd1) / tolerance)
}

fn segment_count(squared: Scalar) -> usize {
    (squared.sqrt().ceil() as usize).clamp(1, MAX_CURVE_SEGMENTS)
}

/// Collects a flattened path from [`Path::dispatch`].
#[derive(Debug)]
pub struct PolylineBuilder {
    tolerance: Scalar,
    polyline: Polyline,
    contour_start: usize,
    contour_has_segment: bool,
    current: Point,
    is_nan: bool,
}

impl PolylineBuilder {
    /// Creates a builder that keeps curves within `tolerance` of the output lines.
    pub fn new(tolerance: Scalar) -> Self {
        Self {
            tolerance,
            polyline: Polyline::default(),
            contour_start: 0,
            contour_has_segment: false,
            current: Point::ZERO,
            is_nan: false,
        }
    }

    fn push(&mut self, p: Point) {
        if !p.is_finite() {
            self.is_nan = true;
        }
        if self.polyline.points.len() > self.contour_start
            && self.polyline.points.last() == Some(&p)
        {
            return;
        }
        self.polyline.points.push(p);
    }

    fn end_contour(&mut self, is_closed: bool) {
        let start = self.contour_start;
        let points = &mut self.polyline.points;
        if !self.contour_has_segment {
            points.truncate(start);
            return;
        }
        if is_closed && points.len() > start + 1 && points.last() == points.get(start) {
            points.pop();
        }
        self.polyline.contours.push(Contour {
            start,
            end: points.len(),
            is_closed,
        });
        self.contour_start = points.len();
        self.contour_has_segment = false;
    }

    /// Finishes flattening.
    ///
    /// A path with non-finite coordinates is ill-defined, so it produces an empty polyline.
    pub fn finish(mut self) -> Polyline {
        if self.polyline.points.len() > self.contour_start || self.contour_has_segment {
            self.end_contour(false);
        }
        if self.is_nan {
            warn!("A path contains NaN, ignoring it.");
            return Polyline::default();
        }
        self.polyline
    }
}

impl PathReceiver for PolylineBuilder {
    fn accepts_conics(&self) -> bool {
        true
    }

    fn move_to(&mut self, p: Point, _will_be_closed: bool) {
        if self.polyline.points.len() > self.contour_start {
            self.end_contour(false);
        }
        self.push(p);
        self.current = p;
    }

    fn line_to(&mut self, p: Point) {
        self.push(p);
        self.current = p;
        self.contour_has_segment = true;
    }

    fn quad_to(&mut self, cp: Point, p: Point) {
        let p0 = self.current;
        let n = quad_segment_count(p0, cp, p, self.tolerance);
        let step = 1.0 / n as Scalar;
        for i in 1..n {
            let t = i as Scalar * step;
            let mt = 1.0 - t;
            self.push(p0 * (mt * mt) + cp * (2.0 * mt * t) + p * (t * t));
        }
        self.line_to(p);
    }

    fn conic_to(&mut self, cp: Point, p: Point, weight: Scalar) {
        Conic::new(self.current, cp, p, weight).for_each_quad(self.tolerance, &mut |qcp, qp| {
            self.quad_to(qcp, qp);
        });
    }

    fn cubic_to(&mut self, cp1: Point, cp2: Point, p: Point) {
        let p0 = self.current;
        let n = cubic_segment_count(p0, cp1, cp2, p, self.tolerance);
        let step = 1.0 / n as Scalar;
        for i in 1..n {
            let t = i as Scalar * step;
            let mt = 1.0 - t;
            self.push(
                p0 * (mt * mt * mt)
                    + cp1 * (3.0 * mt * mt * t)
                    + cp2 * (3.0 * mt * t * t)
                    + p * (t * t * t),
            );
        }
        self.line_to(p);
    }

    fn close(&mut self) {
        self.end_contour(true);
    }
}

/// Flattens `path` so that no curve deviates from its lines by more than `tolerance`.
pub fn flatten(path: &Path, tolerance: Scalar) -> Polyline {
    let mut builder = PolylineBuilder::new(tolerance);
    path.dispatch(&mut builder);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::{cubic_segment_count, flatten, quad_segment_count};
    use crate::path::{FillType, Path, PathBuilder};
    use crate::point::Point;
    use crate::rect::Rect;

    #[test]
    fn rect_flattens_to_four_points() {
        let polyline = flatten(&Path::make_rect_ltrb(0.0, 0.0, 10.0, 10.0), 0.1);
        assert_eq!(polyline.points.len(), 4);
        assert_eq!(polyline.contours.len(), 1);
        assert!(polyline.contours[0].is_closed);
        assert!(polyline.is_convex());
    }

    #[test]
    fn circle_stays_within_tolerance() {
        let tolerance = 0.05;
        let polyline = flatten(&Path::make_circle(Point::ZERO, 50.0), tolerance);
        assert!(polyline.points.len() > 16);
        // Conic to quadratic approximation and flattening each contribute up to `tolerance`.
        for p in &polyline.points {
            assert!((p.length() - 50.0).abs() < tolerance * 2.0);
        }
        let n = polyline.points.len();
        for i in 0..n {
            let mid = (polyline.points[i] + polyline.points[(i + 1) % n]) * 0.5;
            assert!(50.0 - mid.length() <= tolerance * 3.0);
        }
        assert!(polyline.is_convex());
    }

    #[test]
    fn segment_counts_grow_with_precision() {
        let (a, b, c, d) = (
            Point::new(0.0, 0.0),
            Point::new(50.0, 100.0),
            Point::new(100.0, 0.0),
            Point::new(150.0, 100.0),
        );
        assert!(quad_segment_count(a, b, c, 0.01) > quad_segment_count(a, b, c, 1.0));
        assert!(cubic_segment_count(a, b, c, d, 0.01) > cubic_segment_count(a, b, c, d, 1.0));
        assert_eq!(quad_segment_count(a, a, a, 0.1), 1);
        assert_eq!(quad_segment_count(a, b, c, 0.0), 1024);
    }

    #[test]
    fn nan_path_is_ignored() {
        let path = Path::make_poly(
            &[
                Point::new(0.0, 0.0),
                Point::new(f32::NAN, 1.0),
                Point::new(1.0, 1.0),
            ],
            true,
            FillType::NonZero,
        );
        assert!(flatten(&path, 0.1).is_empty());
    }

    #[test]
    fn concave_and_multi_contour_are_not_convex() {
        let arrow = Path::make_poly(
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 5.0),
                Point::new(0.0, 10.0),
                Point::new(4.0, 5.0),
            ],
            true,
            FillType::NonZero,
        );
        assert!(!flatten(&arrow, 0.1).is_convex());

        let mut b = PathBuilder::new();
        b.add_rect(&Rect::make_ltrb(0.0, 0.0, 1.0, 1.0))
            .add_rect(&Rect::make_ltrb(3.0, 3.0, 4.0, 4.0));
        let two = flatten(&b.into_path(FillType::NonZero), 0.1);
        assert_eq!(two.contours.len(), 2);
        assert!(!two.is_convex());
    }

    #[test]
    fn pentagram_is_not_convex() {
        let star: Vec<Point> = (0..5)
            .map(|i| {
                let angle = (i * 2) as f32 * core::f32::consts::TAU / 5.0;
                Point::new(angle.cos(), angle.sin()) * 10.0
            })
            .collect();
        let path = Path::make_poly(&star, true, FillType::NonZero);
        assert!(!flatten(&path, 0.1).is_convex());
    }

    #[test]
    fn open_contours_keep_their_points() {
        let line = Path::make_line(Point::new(0.0, 0.0), Point::new(5.0, 0.0));
        let polyline = flatten(&line, 0.1);
        assert_eq!(polyline.points, [Point::new(0.0, 0.0), Point::new(5.0, 0.0)]);
        assert!(!polyline.contours[0].is_closed);
        assert_eq!(polyline.distinct_points_up_to_three(), 2);
    }
}
