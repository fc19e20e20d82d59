// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{transformed_bounds, Geometry, GeometryContext, GeometryResult, PrimitiveType};
use crate::error::GeometryError;
use crate::matrix::Matrix;
use crate::point::Point;
use crate::rect::Rect;
use crate::scalar::Scalar;
use crate::tessellator::quadrant_divisions;

/// A dot of `radius` at each of a set of points.
///
/// The points are borrowed from the caller for the duration of the draw. They are never
/// copied into the geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointFieldGeometry<'a> {
    points: &'a [Point],
    radius: Scalar,
    round: bool,
}

impl<'a> PointFieldGeometry<'a> {
    /// Round dots when `round` is set, squares with half side `radius` otherwise.
    pub fn new(points: &'a [Point], radius: Scalar, round: bool) -> Self {
        Self {
            points,
            radius: radius.max(0.0),
            round,
        }
    }

    pub fn points(&self) -> &'a [Point] {
        self.points
    }

    pub fn radius(&self) -> Scalar {
        self.radius
    }

    pub fn is_round(&self) -> bool {
        self.round
    }

    fn vertices_per_point(&self, divisions: usize) -> usize {
        if self.round {
            divisions * 4 * 3
        } else {
            6
        }
    }
}

impl Geometry for PointFieldGeometry<'_> {
    fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        let r = self.radius;
        let bounds = Rect::make_point_bounds(self.points.iter().copied())?.expand(r, r);
        transformed_bounds(bounds.corners(), transform)
    }

    fn position_buffer(
        &self,
        ctx: &mut GeometryContext<'_>,
    ) -> Result<GeometryResult, GeometryError> {
        if self.points.is_empty() || self.radius <= 0.0 {
            return Ok(GeometryResult::empty(ctx.shader_transform()));
        }
        let divisions = quadrant_divisions(self.radius * ctx.transform.max_basis_length());
        ctx.check_vertex_budget(self.points.len() * self.vertices_per_point(divisions))?;

        let r = self.radius;
        let mut triangles =
            Vec::with_capacity(self.points.len() * self.vertices_per_point(divisions));
        if self.round {
            // One full turn of offsets, shared by every dot.
            let trigs = ctx.tessellator.trigs(divisions);
            let quadrant = trigs.len() - 1;
            let mut ring = Vec::with_capacity(quadrant * 4 + 1);
            for q in 0..4 {
                for trig in &trigs[..quadrant] {
                    let (c, s) = (trig.cos * r, trig.sin * r);
                    ring.push(match q {
                        0 => Point::new(c, s),
                        1 => Point::new(-s, c),
                        2 => Point::new(-c, -s),
                        _ => Point::new(s, -c),
                    });
                }
            }
            ring.push(Point::new(r, 0.0));
            for center in self.points {
                for pair in ring.windows(2) {
                    triangles.extend([*center, *center + pair[0], *center + pair[1]]);
                }
            }
        } else {
            for p in self.points {
                let tl = Point::new(p.x - r, p.y - r);
                let tr = Point::new(p.x + r, p.y - r);
                let bl = Point::new(p.x - r, p.y + r);
                let br = Point::new(p.x + r, p.y + r);
                triangles.extend([tl, tr, bl, bl, tr, br]);
            }
        }
        ctx.positions_result(PrimitiveType::TriangleList, triangles)
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::PI;

    use super::PointFieldGeometry;
    use crate::config::GeometryConfig;
    use crate::error::GeometryError;
    use crate::geometry::{Geometry, GeometryContext, PrimitiveType};
    use crate::matrix::Matrix;
    use crate::point::Point;
    use crate::rect::Rect;
    use crate::size::Size;
    use crate::tessellator::Tessellator;

    fn area(triangles: &[[Point; 3]]) -> f32 {
        triangles
            .iter()
            .map(|[a, b, c]| ((*b - *a).cross(*c - *a) * 0.5).abs())
            .sum()
    }

    #[test]
    fn coverage_expands_by_radius() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 5.0)];
        let field = PointFieldGeometry::new(&points, 2.0, true);
        assert_eq!(
            field.coverage(&Matrix::translate(1.0, 1.0)),
            Some(Rect::make_ltrb(-1.0, -1.0, 13.0, 8.0))
        );
        assert_eq!(PointFieldGeometry::new(&[], 2.0, true).coverage(&Matrix::IDENTITY), None);
    }

    #[test]
    fn square_dots() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        let mut tessellator = Tessellator::new();
        let config = GeometryConfig::default();
        let mut ctx =
            GeometryContext::new(&mut tessellator, &config, Matrix::IDENTITY, Size::ZERO);
        let result = PointFieldGeometry::new(&points, 1.0, false)
            .position_buffer(&mut ctx)
            .unwrap();
        assert_eq!(result.primitive_type, PrimitiveType::TriangleList);
        assert_eq!(result.vertex_count, 12);
        assert!((area(&result.triangles()) - 8.0).abs() < 1e-4);
    }

    #[test]
    fn round_dots() {
        let points = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        let mut tessellator = Tessellator::new();
        let config = GeometryConfig::default();
        let mut ctx =
            GeometryContext::new(&mut tessellator, &config, Matrix::IDENTITY, Size::ZERO);
        let result = PointFieldGeometry::new(&points, 10.0, true)
            .position_buffer(&mut ctx)
            .unwrap();
        let expected = 2.0 * PI * 100.0;
        let area = area(&result.triangles());
        assert!(area <= expected);
        assert!(expected - area < expected * 0.02);
    }

    #[test]
    fn budget_is_enforced() {
        let points = vec![Point::new(1.0, 1.0); 100];
        let mut tessellator = Tessellator::new();
        let config = GeometryConfig::default().with_max_vertex_count(100);
        let mut ctx =
            GeometryContext::new(&mut tessellator, &config, Matrix::IDENTITY, Size::ZERO);
        let result = PointFieldGeometry::new(&points, 1.0, false).position_buffer(&mut ctx);
        assert_eq!(
            result.unwrap_err(),
            GeometryError::VertexBudgetExceeded {
                count: 600,
                limit: 100
            }
        );
    }
}
