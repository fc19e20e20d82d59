// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End to end behaviour of paths, radii and shape geometry.

use tessera_geometry::geometry::{
    CircleGeometry, FillPathGeometry, Geometry, GeometryContext, StrokePathGeometry,
    StrokeRectGeometry,
};
use tessera_geometry::kurbo::{Cap, Join};
use tessera_geometry::{
    AccumulationRect, FillType, GeometryConfig, Matrix, Path, PathBuilder, Point, Rect,
    RoundRect, RoundingRadii, Size, StrokeStyle, Tessellator,
};

#[test]
fn rect_path_bounds_and_recognition() {
    let path = Path::make_rect_ltrb(0.0, 0.0, 100.0, 50.0);
    let rect = Rect::make_ltrb(0.0, 0.0, 100.0, 50.0);
    assert_eq!(path.bounds(), rect);
    assert_eq!(path.as_rect(), Some((rect, true)));
}

#[test]
fn radii_shrink_uniformly() {
    let radii = RoundingRadii::make_radius(20.0).scaled(&Rect::make_xywh(0.0, 0.0, 30.0, 100.0));
    assert_eq!(radii, RoundingRadii::make_radius(15.0));
    assert_eq!(radii.scaled(&Rect::make_xywh(0.0, 0.0, 30.0, 100.0)), radii);
}

#[test]
fn circle_alpha_coverage() {
    let filled = CircleGeometry::new(Point::ZERO, 10.0, -1.0);
    assert_eq!(filled.compute_alpha_coverage(&Matrix::IDENTITY), 1.0);
    let thin = CircleGeometry::new(Point::ZERO, 10.0, 0.5);
    assert!(thin.compute_alpha_coverage(&Matrix::IDENTITY) < 1.0);
}

#[test]
fn factories_are_recognized() {
    let bounds = Rect::make_ltrb(10.0, 20.0, 50.0, 40.0);
    assert_eq!(Path::make_oval(bounds).as_oval(), Some(bounds));
    assert_eq!(
        Path::make_circle(Point::new(5.0, 5.0), 5.0).as_oval(),
        Some(Rect::make_ltrb(0.0, 0.0, 10.0, 10.0))
    );
    let rr = RoundRect::make_rect_xy(bounds, 4.0, 4.0);
    assert_eq!(Path::make_round_rect(rr).as_round_rect(), Some(rr));
    let (p0, p1) = (Point::new(1.0, 2.0), Point::new(3.0, 4.0));
    assert_eq!(Path::make_line(p0, p1).as_line(), Some((p0, p1)));
}

#[test]
fn equality_is_structural() {
    let mut builder = PathBuilder::new();
    builder
        .move_to(Point::new(0.0, 0.0))
        .line_to(Point::new(10.0, 0.0))
        .line_to(Point::new(10.0, 10.0))
        .line_to(Point::new(0.0, 10.0))
        .close();
    let manual = builder.into_path(FillType::NonZero);
    let factory = Path::make_rect_ltrb(0.0, 0.0, 10.0, 10.0);
    assert_eq!(manual, factory);
    assert_eq!(manual.as_rect(), factory.as_rect());
    assert_ne!(manual.with_fill_type(FillType::EvenOdd), factory);
}

#[test]
fn accumulation_overlap_heuristic() {
    let mut acc = AccumulationRect::new();
    acc.accumulate_rect(&Rect::make_ltrb(0.0, 0.0, 10.0, 10.0));
    acc.accumulate_rect(&Rect::make_ltrb(20.0, 20.0, 30.0, 30.0));
    assert!(!acc.overlap_detected());
    acc.accumulate_rect(&Rect::make_ltrb(0.0, 20.0, 10.0, 30.0));
    assert!(acc.overlap_detected());
}

#[test]
fn geometry_buffers_share_a_tessellator() {
    let mut tessellator = Tessellator::new();
    let config = GeometryConfig::default();
    let transform = Matrix::scale(2.0, 2.0);
    let target = Size::new(200.0, 200.0);

    let star = Path::make_poly(
        &[
            Point::new(0.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(40.0, 0.0),
            Point::new(30.0, 20.0),
            Point::new(40.0, 40.0),
            Point::new(20.0, 30.0),
            Point::new(0.0, 40.0),
            Point::new(10.0, 20.0),
        ],
        true,
        FillType::NonZero,
    );
    let fill = FillPathGeometry::new(star.clone());
    let stroke = StrokePathGeometry::new(star, StrokeStyle::new(2.0).with_join(Join::Round));

    let mut ctx = GeometryContext::new(&mut tessellator, &config, transform, target);
    let filled = fill.position_buffer(&mut ctx).unwrap();
    let stroked = stroke.position_buffer(&mut ctx).unwrap();
    assert!(!filled.is_empty());
    assert!(filled.index_buffer.is_some());
    assert!(!stroked.is_empty());

    let fill_bounds = fill.coverage(&transform).unwrap();
    let stroke_bounds = stroke.coverage(&transform).unwrap();
    assert_eq!(fill_bounds, Rect::make_ltrb(0.0, 0.0, 80.0, 80.0));
    assert!(stroke_bounds.contains_rect(&fill_bounds));
}

/// Stroked shapes with sharp corners, every cap, and a ring that collapses to a dot.
fn stroked_shapes(width: f32, min_stroke_size: f32) -> Vec<Box<dyn Geometry>> {
    let rect = Rect::make_ltrb(0.0, 0.0, 10.0, 10.0);
    let center = Point::new(5.0, 5.0);
    let spike = Path::make_poly(
        &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 3.0)],
        false,
        FillType::NonZero,
    );
    let mut shapes: Vec<Box<dyn Geometry>> = Vec::new();
    for radius in [10.0, 0.0] {
        let ring = CircleGeometry::stroked(center, radius, width);
        shapes.push(Box::new(ring.with_min_stroke_size(min_stroke_size)));
    }
    for join in [Join::Miter, Join::Round, Join::Bevel] {
        let outline =
            StrokeRectGeometry::new(rect, width, join, 4.0).with_min_stroke_size(min_stroke_size);
        shapes.push(Box::new(outline));
    }
    for cap in [Cap::Butt, Cap::Square, Cap::Round] {
        let style = StrokeStyle::new(width).with_cap(cap).with_join(Join::Miter);
        let stroke =
            StrokePathGeometry::new(spike.clone(), style).with_min_stroke_size(min_stroke_size);
        shapes.push(Box::new(stroke));
    }
    shapes
}

#[test]
fn thin_stroke_vertices_stay_inside_coverage() {
    let transforms = [Matrix::IDENTITY, Matrix::scale(0.5, 0.5), Matrix::rotate(0.3)];
    let configs = [
        GeometryConfig::default(),
        GeometryConfig::default().with_min_stroke_size(4.0),
    ];
    let mut tessellator = Tessellator::new();
    for config in &configs {
        for width in [0.0, 0.3] {
            for shape in stroked_shapes(width, config.min_stroke_size) {
                for transform in transforms {
                    let coverage = shape
                        .coverage(&transform)
                        .unwrap_or_else(|| panic!("{shape:?} has no coverage"))
                        .expand(1e-3, 1e-3);
                    let mut ctx =
                        GeometryContext::new(&mut tessellator, config, transform, Size::ZERO);
                    let result = shape.position_buffer(&mut ctx).unwrap();
                    assert!(!result.is_empty(), "{shape:?} drew nothing");
                    for p in result.vertex_buffer.positions() {
                        let p = result.transform.transform_point(p);
                        assert!(
                            p.x >= coverage.left
                                && p.x <= coverage.right
                                && p.y >= coverage.top
                                && p.y <= coverage.bottom,
                            "{p:?} of {shape:?} under {transform:?} is outside {coverage:?}"
                        );
                    }
                }
            }
        }
    }
}
