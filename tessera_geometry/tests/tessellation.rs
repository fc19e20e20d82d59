// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End to end tessellation of paths.

use core::f32::consts::PI;

use tessera_geometry::{FillType, Path, PathBuilder, Point, Rect, TessellationError, Tessellator};

fn triangles(flat: &[f32]) -> Vec<[Point; 3]> {
    flat.chunks_exact(6)
        .map(|t| {
            [
                Point::new(t[0], t[1]),
                Point::new(t[2], t[3]),
                Point::new(t[4], t[5]),
            ]
        })
        .collect()
}

fn area(triangles: &[[Point; 3]]) -> f32 {
    triangles
        .iter()
        .map(|[a, b, c]| ((*b - *a).cross(*c - *a) * 0.5).abs())
        .sum()
}

fn covers(triangles: &[[Point; 3]], p: Point) -> bool {
    triangles.iter().any(|[a, b, c]| {
        let d0 = (*b - *a).cross(p - *a);
        let d1 = (*c - *b).cross(p - *b);
        let d2 = (*a - *c).cross(p - *c);
        let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
        let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
        !(has_neg && has_pos)
    })
}

fn pentagram(fill_type: FillType) -> Path {
    let points: Vec<Point> = (0..5)
        .map(|k| {
            let angle = -PI / 2.0 + k as f32 * 4.0 * PI / 5.0;
            Point::new(10.0 * angle.cos(), 10.0 * angle.sin())
        })
        .collect();
    Path::make_poly(&points, true, fill_type)
}

#[test]
fn rect_is_two_triangles() {
    let mut tessellator = Tessellator::new();
    for tolerance in [0.01, 0.1, 1.0, 10.0] {
        let flat = tessellator
            .tessellate_to_triangles(&Path::make_rect_ltrb(0.0, 0.0, 10.0, 10.0), tolerance)
            .unwrap();
        assert_eq!(flat.len(), 12);
        assert!((area(&triangles(&flat)) - 100.0).abs() < 1e-3);
    }
}

#[test]
fn self_intersecting_fill_rules() {
    let mut tessellator = Tessellator::new();
    let non_zero = triangles(
        &tessellator
            .tessellate_to_triangles(&pentagram(FillType::NonZero), 0.1)
            .unwrap(),
    );
    let even_odd = triangles(
        &tessellator
            .tessellate_to_triangles(&pentagram(FillType::EvenOdd), 0.1)
            .unwrap(),
    );

    let center = Point::new(0.3, 0.2);
    let tip = Point::new(0.0, -8.0);
    assert!(covers(&non_zero, center));
    assert!(!covers(&even_odd, center));
    assert!(covers(&non_zero, tip));
    assert!(covers(&even_odd, tip));
    assert!(area(&even_odd) < area(&non_zero));
}

#[test]
fn overlapping_contours() {
    let mut builder = PathBuilder::new();
    builder
        .add_rect(&Rect::make_ltrb(0.0, 0.0, 20.0, 20.0))
        .add_rect(&Rect::make_ltrb(10.0, 10.0, 30.0, 30.0));
    let packed = builder.build();
    let mut tessellator = Tessellator::new();

    let non_zero = Path::from_packed(packed.clone(), FillType::NonZero);
    let flat = tessellator.tessellate_to_triangles(&non_zero, 0.1).unwrap();
    assert!((area(&triangles(&flat)) - 700.0).abs() < 1e-2);

    let even_odd = non_zero.with_fill_type(FillType::EvenOdd);
    let flat = tessellator.tessellate_to_triangles(&even_odd, 0.1).unwrap();
    assert!((area(&triangles(&flat)) - 600.0).abs() < 1e-2);
}

#[test]
fn curves_are_flattened_within_tolerance() {
    let mut tessellator = Tessellator::new();
    let circle = Path::make_circle(Point::new(50.0, 50.0), 40.0);
    let flat = tessellator.tessellate_to_triangles(&circle, 0.1).unwrap();
    let tris = triangles(&flat);
    let expected = PI * 1600.0;
    assert!((area(&tris) - expected).abs() < expected * 0.01);
    for t in &tris {
        for p in t {
            assert!(p.distance(Point::new(50.0, 50.0)) <= 40.0 + 0.2);
        }
    }
}

#[test]
fn degenerate_paths_are_input_errors() {
    let mut tessellator = Tessellator::new();
    let point = Path::make_line(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
    let two_points = Path::make_poly(
        &[
            Point::new(0.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 0.0),
        ],
        true,
        FillType::NonZero,
    );
    for path in [Path::default(), point, two_points] {
        assert_eq!(
            tessellator.tessellate(&path, 0.1, |_, _| true),
            Err(TessellationError::Input)
        );
    }
}

#[test]
fn indexed_output() {
    let mut tessellator = Tessellator::new();
    let arrow = Path::make_poly(
        &[
            Point::new(0.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(0.0, 10.0),
            Point::new(5.0, 5.0),
        ],
        true,
        FillType::NonZero,
    );
    let mut seen = None;
    tessellator
        .tessellate(&arrow, 0.1, |vertices, indices| {
            seen = Some((vertices.len(), indices.map(|i| i.to_vec())));
            true
        })
        .unwrap();
    let (floats, indices) = seen.unwrap();
    let indices = indices.unwrap();
    assert_eq!(floats, 8);
    assert_eq!(indices.len(), 6);
    assert!(indices.iter().all(|i| (*i as usize) < 4));
}
