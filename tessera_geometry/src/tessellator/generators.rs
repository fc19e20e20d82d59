// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangle strip generators for circles, ellipses and rounded rectangles.
//!
//! Each generator samples one quadrant of the unit circle and mirrors it, so only
//! `divisions + 1` sines and cosines are needed per shape. Those are cached on the
//! [`Tessellator`] by division count.

use core::f32::consts::FRAC_PI_2;
use core::f32::consts::FRAC_PI_4;

use super::Tessellator;
use crate::matrix::Matrix;
use crate::point::Point;
use crate::rect::Rect;
use crate::scalar::Scalar;
use crate::size::Size;

/// The largest distance, in device pixels, between a circle and its polygon.
const CIRCLE_TOLERANCE: Scalar = 0.1;

const MAX_QUADRANT_DIVISIONS: usize = 1024;

/// A cosine and sine pair for one sample angle in the first quadrant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trig {
    pub cos: Scalar,
    pub sin: Scalar,
}

impl Trig {
    fn new(radians: Scalar) -> Self {
        Self {
            cos: radians.cos(),
            sin: radians.sin(),
        }
    }
}

/// The number of segments per quarter circle for a circle of `pixel_radius` device pixels.
pub fn quadrant_divisions(pixel_radius: Scalar) -> usize {
    if pixel_radius.is_nan() || pixel_radius <= 0.0 {
        return 1;
    }
    let k = CIRCLE_TOLERANCE / pixel_radius;
    // NaN (tiny circles) saturates to zero and is clamped up.
    let divisions = (FRAC_PI_4 / (1.0 - k).acos()).ceil();
    (divisions as usize).clamp(1, MAX_QUADRANT_DIVISIONS)
}

impl Tessellator {
    /// The quadrant samples for `divisions`, from 0 to 90 degrees inclusive.
    pub fn trigs(&mut self, divisions: usize) -> &[Trig] {
        self.trigs.entry(divisions).or_insert_with(|| {
            let step = FRAC_PI_2 / divisions as Scalar;
            let mut trigs: Vec<Trig> = (0..divisions)
                .map(|i| Trig::new(i as Scalar * step))
                .collect();
            trigs.push(Trig { cos: 0.0, sin: 1.0 });
            trigs
        })
    }

    /// A triangle strip covering the circle, sampled for display under `transform`.
    pub fn filled_circle(
        &mut self,
        transform: &Matrix,
        center: Point,
        radius: Scalar,
    ) -> Vec<Point> {
        let bounds = Rect::make_ltrb(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        );
        self.filled_ellipse(transform, &bounds)
    }

    /// A triangle strip covering the ellipse inscribed in `bounds`.
    pub fn filled_ellipse(&mut self, transform: &Matrix, bounds: &Rect) -> Vec<Point> {
        let bounds = bounds.positive();
        let half = bounds.size() * 0.5;
        self.filled_round_rect(transform, &bounds, half)
    }

    /// A triangle strip covering a rectangle whose corners are all rounded by `radii`.
    ///
    /// The strip runs from top to bottom as left/right pairs. When the radii are half the
    /// bounds this is an ellipse.
    pub fn filled_round_rect(
        &mut self,
        transform: &Matrix,
        bounds: &Rect,
        radii: Size,
    ) -> Vec<Point> {
        let bounds = bounds.positive();
        let rx = radii.width.clamp(0.0, bounds.width() * 0.5);
        let ry = radii.height.clamp(0.0, bounds.height() * 0.5);
        let pixel_radius = rx.max(ry) * transform.max_basis_length();
        let trigs = self.trigs(quadrant_divisions(pixel_radius));

        let left = bounds.left + rx;
        let right = bounds.right - rx;
        let top = bounds.top + ry;
        let bottom = bounds.bottom - ry;
        let mut strip = Vec::with_capacity(trigs.len() * 4);
        for trig in trigs {
            let dx = rx * trig.sin;
            let y = top - ry * trig.cos;
            strip.push(Point::new(left - dx, y));
            strip.push(Point::new(right + dx, y));
        }
        for trig in trigs.iter().rev() {
            let dx = rx * trig.sin;
            let y = bottom + ry * trig.cos;
            strip.push(Point::new(left - dx, y));
            strip.push(Point::new(right + dx, y));
        }
        strip
    }

    /// A triangle strip covering the ring between `radius - half_width` and
    /// `radius + half_width`.
    ///
    /// The inner radius is clamped at zero, in which case the ring is a filled disc.
    pub fn stroked_circle(
        &mut self,
        transform: &Matrix,
        center: Point,
        radius: Scalar,
        half_width: Scalar,
    ) -> Vec<Point> {
        let outer = radius + half_width;
        let inner = (radius - half_width).max(0.0);
        let trigs = self.trigs(quadrant_divisions(outer * transform.max_basis_length()));
        let quadrant = trigs.len() - 1;

        let mut strip = Vec::with_capacity((quadrant * 4 + 1) * 2);
        let mut push = |dir: Point| {
            strip.push(center + dir * outer);
            strip.push(center + dir * inner);
        };
        for q in 0..4 {
            for trig in &trigs[..quadrant] {
                let (c, s) = (trig.cos, trig.sin);
                push(match q {
                    0 => Point::new(c, s),
                    1 => Point::new(-s, c),
                    2 => Point::new(-c, -s),
                    _ => Point::new(s, -c),
                });
            }
        }
        push(Point::new(1.0, 0.0));
        strip
    }
}

/// The area covered by a triangle strip, counting overlaps once per triangle.
#[cfg(test)]
pub(crate) fn strip_area(strip: &[Point]) -> Scalar {
    strip
        .windows(3)
        .map(|t| ((t[1] - t[0]).cross(t[2] - t[0]) * 0.5).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use core::f32::consts::PI;

    use super::{quadrant_divisions, strip_area};
    use crate::matrix::Matrix;
    use crate::point::Point;
    use crate::rect::Rect;
    use crate::size::Size;
    use crate::tessellator::Tessellator;

    #[test]
    fn divisions_grow_with_radius() {
        assert_eq!(quadrant_divisions(0.0), 1);
        assert_eq!(quadrant_divisions(-3.0), 1);
        assert_eq!(quadrant_divisions(0.01), 1);
        assert!(quadrant_divisions(10.0) < quadrant_divisions(1000.0));
        assert!(quadrant_divisions(1.0e9) <= 1024);
    }

    #[test]
    fn trigs_span_the_quadrant() {
        let mut tessellator = Tessellator::new();
        let trigs = tessellator.trigs(4);
        assert_eq!(trigs.len(), 5);
        assert_eq!(trigs[0].cos, 1.0);
        assert_eq!(trigs[4].sin, 1.0);
    }

    #[test]
    fn filled_circle_area() {
        let mut tessellator = Tessellator::new();
        let strip = tessellator.filled_circle(&Matrix::IDENTITY, Point::new(5.0, 5.0), 10.0);
        let area = strip_area(&strip);
        let expected = PI * 100.0;
        assert!(area <= expected);
        assert!(expected - area < expected * 0.02);
        for p in &strip {
            assert!(p.distance(Point::new(5.0, 5.0)) <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn round_rect_area() {
        let mut tessellator = Tessellator::new();
        let bounds = Rect::make_ltrb(0.0, 0.0, 100.0, 50.0);
        let strip =
            tessellator.filled_round_rect(&Matrix::IDENTITY, &bounds, Size::new(10.0, 10.0));
        let expected = 100.0 * 50.0 - (4.0 - PI) * 100.0;
        let area = strip_area(&strip);
        assert!(area <= expected + 1e-2);
        assert!(expected - area < 5.0);
    }

    #[test]
    fn ring_area() {
        let mut tessellator = Tessellator::new();
        let strip = tessellator.stroked_circle(&Matrix::IDENTITY, Point::ZERO, 10.0, 1.0);
        let expected = PI * (11.0 * 11.0 - 9.0 * 9.0);
        let area = strip_area(&strip);
        assert!((area - expected).abs() < expected * 0.02);
        assert_eq!(strip.first(), Some(&Point::new(11.0, 0.0)));
        assert_eq!(strip[strip.len() - 2], Point::new(11.0, 0.0));
    }
}
