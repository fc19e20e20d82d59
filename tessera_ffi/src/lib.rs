// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! C entry points for tessellating paths.
//!
//! A caller creates a path builder, feeds it move, line, cubic and close commands, and asks
//! for a tessellation. The result is a flat triangle list of interleaved `x, y` floats that
//! must be released with `DestroyVertices`. Builders are released with `DestroyPathBuilder`.
//!
//! None of the handles are thread safe.

use core::ptr;

use log::warn;
use tessera_geometry::{FillType, PathBuilder, Point, Tessellator};

/// A path under construction.
#[derive(Debug, Default)]
pub struct TesseraPathBuilder {
    builder: PathBuilder,
}

/// A tessellated path: `length` floats at `points`, three `x, y` pairs per triangle.
#[derive(Debug)]
#[repr(C)]
pub struct Vertices {
    pub points: *mut f32,
    pub length: u32,
}

/// The fill rule for an integer fill type: 0 is non-zero and 1 is even-odd.
fn fill_type_from_int(fill_type: i32) -> FillType {
    match fill_type {
        0 => FillType::NonZero,
        1 => FillType::EvenOdd,
        other => {
            warn!("Unknown fill type {other}, using non-zero");
            FillType::NonZero
        }
    }
}

/// Creates an empty path builder.
#[export_name = "CreatePathBuilder"]
pub extern "C" fn create_path_builder() -> *mut TesseraPathBuilder {
    Box::into_raw(Box::default())
}

/// Destroys a path builder.
///
/// # Safety
///
/// `builder` must be null or a pointer returned by `CreatePathBuilder` that has not been
/// destroyed yet.
#[export_name = "DestroyPathBuilder"]
pub unsafe extern "C" fn destroy_path_builder(builder: *mut TesseraPathBuilder) {
    if !builder.is_null() {
        drop(Box::from_raw(builder));
    }
}

/// Starts a new contour.
///
/// # Safety
///
/// `builder` must be a live pointer returned by `CreatePathBuilder`.
#[export_name = "MoveTo"]
pub unsafe extern "C" fn move_to(builder: *mut TesseraPathBuilder, x: f32, y: f32) {
    (*builder).builder.move_to(Point::new(x, y));
}

/// Adds a line.
///
/// # Safety
///
/// `builder` must be a live pointer returned by `CreatePathBuilder`.
#[export_name = "LineTo"]
pub unsafe extern "C" fn line_to(builder: *mut TesseraPathBuilder, x: f32, y: f32) {
    (*builder).builder.line_to(Point::new(x, y));
}

/// Adds a cubic Bézier.
///
/// # Safety
///
/// `builder` must be a live pointer returned by `CreatePathBuilder`.
#[export_name = "CubicTo"]
pub unsafe extern "C" fn cubic_to(
    builder: *mut TesseraPathBuilder,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    x3: f32,
    y3: f32,
) {
    (*builder)
        .builder
        .cubic_to(Point::new(x1, y1), Point::new(x2, y2), Point::new(x3, y3));
}

/// Closes the current contour.
///
/// # Safety
///
/// `builder` must be a live pointer returned by `CreatePathBuilder`.
#[export_name = "Close"]
pub unsafe extern "C" fn close(builder: *mut TesseraPathBuilder) {
    (*builder).builder.close();
}

/// Tessellates the path built so far into a triangle list.
///
/// Returns null if the path could not be tessellated, for example because it encloses no
/// area. The builder is left untouched and can be extended and tessellated again.
///
/// # Safety
///
/// `builder` must be a live pointer returned by `CreatePathBuilder`.
#[export_name = "Tessellate"]
pub unsafe extern "C" fn tessellate(
    builder: *mut TesseraPathBuilder,
    fill_type: i32,
    tolerance: f32,
) -> *mut Vertices {
    let path = (*builder)
        .builder
        .clone()
        .into_path(fill_type_from_int(fill_type));
    let points = match Tessellator::new().tessellate_to_triangles(&path, tolerance) {
        Ok(points) => points,
        Err(err) => {
            warn!("Tessellate failed: {err}");
            return ptr::null_mut();
        }
    };
    let Ok(length) = u32::try_from(points.len()) else {
        warn!("Tessellate produced {} floats, too many to return", points.len());
        return ptr::null_mut();
    };
    let points = Box::into_raw(points.into_boxed_slice()).cast::<f32>();
    Box::into_raw(Box::new(Vertices { points, length }))
}

/// Releases the result of `Tessellate`.
///
/// # Safety
///
/// `vertices` must be null or a pointer returned by `Tessellate` that has not been destroyed
/// yet.
#[export_name = "DestroyVertices"]
pub unsafe extern "C" fn destroy_vertices(vertices: *mut Vertices) {
    if vertices.is_null() {
        return;
    }
    let vertices = Box::from_raw(vertices);
    let points = ptr::slice_from_raw_parts_mut(vertices.points, vertices.length as usize);
    drop(Box::from_raw(points));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_is_two_triangles() {
        unsafe {
            let builder = create_path_builder();
            move_to(builder, 0.0, 0.0);
            line_to(builder, 10.0, 0.0);
            line_to(builder, 10.0, 10.0);
            line_to(builder, 0.0, 10.0);
            close(builder);

            let vertices = tessellate(builder, 0, 0.1);
            assert!(!vertices.is_null());
            assert_eq!((*vertices).length, 12);
            let points = core::slice::from_raw_parts((*vertices).points, 12);
            assert!(points.iter().all(|v| *v == 0.0 || *v == 10.0));

            destroy_vertices(vertices);
            destroy_path_builder(builder);
        }
    }

    #[test]
    fn curves_and_fill_rules() {
        unsafe {
            let builder = create_path_builder();
            move_to(builder, 0.0, 50.0);
            cubic_to(builder, 0.0, 0.0, 100.0, 0.0, 100.0, 50.0);
            cubic_to(builder, 100.0, 100.0, 0.0, 100.0, 0.0, 50.0);
            close(builder);

            for fill_type in [0, 1, 7] {
                let vertices = tessellate(builder, fill_type, 0.1);
                assert!(!vertices.is_null());
                assert!((*vertices).length > 12);
                assert_eq!((*vertices).length % 6, 0);
                destroy_vertices(vertices);
            }
            destroy_path_builder(builder);
        }
    }

    #[test]
    fn degenerate_path_returns_null() {
        unsafe {
            let builder = create_path_builder();
            move_to(builder, 0.0, 0.0);
            line_to(builder, 10.0, 10.0);
            assert!(tessellate(builder, 0, 0.1).is_null());
            destroy_path_builder(builder);
            destroy_vertices(ptr::null_mut());
            destroy_path_builder(ptr::null_mut());
        }
    }
}
