// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walking path verbs without knowing which encoding is stored.

use peniko::kurbo::BezPath;

use super::encoding::{Conic, PathBuilder, PathElement};
use crate::point::Point;
use crate::scalar::Scalar;

/// Tolerance used when a receiver needs conics approximated by quadratics.
pub const CONIC_TO_QUAD_TOLERANCE: Scalar = 0.1;

/// A consumer of path verbs.
///
/// [`Path::dispatch`](super::Path::dispatch) guarantees that every segment is preceded by a
/// [`move_to`](Self::move_to) for its contour, and that [`path_end`](Self::path_end) is
/// called exactly once, last.
pub trait PathReceiver {
    /// Returns `true` if [`conic_to`](Self::conic_to) can be called.
    ///
    /// When this is `false`, conics are approximated with quadratics before they reach
    /// the receiver. The flag is read once per dispatch.
    fn accepts_conics(&self) -> bool {
        false
    }

    /// Starts a contour. `will_be_closed` tells whether the contour ends with a close.
    fn move_to(&mut self, p: Point, will_be_closed: bool);

    /// A line from the current point.
    fn line_to(&mut self, p: Point);

    /// A quadratic Bézier from the current point.
    fn quad_to(&mut self, cp: Point, p: Point);

    /// A conic from the current point.
    ///
    /// Only called when [`accepts_conics`](Self::accepts_conics) returns `true`.
    fn conic_to(&mut self, cp: Point, p: Point, weight: Scalar) {
        let _ = (cp, p, weight);
        debug_assert!(false, "conic sent to a receiver that does not accept conics");
    }

    /// A cubic Bézier from the current point.
    fn cubic_to(&mut self, cp1: Point, cp2: Point, p: Point);

    /// Closes the current contour.
    fn close(&mut self);

    /// Called once after the last verb.
    fn path_end(&mut self) {}
}

/// Returns `true` if the contour that the remaining elements belong to ends with a close.
fn contour_will_close(rest: impl Iterator<Item = PathElement>) -> bool {
    for el in rest {
        match el {
            PathElement::Close => return true,
            PathElement::MoveTo(_) => return false,
            _ => {}
        }
    }
    false
}

/// Feeds a stream of elements to a receiver.
pub(crate) fn dispatch_elements<I, R>(mut elements: I, receiver: &mut R)
where
    I: Iterator<Item = PathElement> + Clone,
    R: PathReceiver + ?Sized,
{
    let accepts_conics = receiver.accepts_conics();
    let mut contour_start = Point::ZERO;
    let mut current = Point::ZERO;
    let mut contour_open = false;
    while let Some(el) = elements.next() {
        match el {
            PathElement::MoveTo(p) => {
                receiver.move_to(p, contour_will_close(elements.clone()));
                contour_start = p;
                current = p;
                contour_open = true;
                continue;
            }
            PathElement::Close => {
                if contour_open {
                    receiver.close();
                    contour_open = false;
                    current = contour_start;
                }
                continue;
            }
            _ => {}
        }
        if !contour_open {
            receiver.move_to(contour_start, contour_will_close(elements.clone()));
            current = contour_start;
            contour_open = true;
        }
        match el {
            PathElement::LineTo(p) => receiver.line_to(p),
            PathElement::QuadTo(cp, p) => receiver.quad_to(cp, p),
            PathElement::ConicTo(cp, p, weight) => {
                if accepts_conics {
                    receiver.conic_to(cp, p, weight);
                } else {
                    Conic::new(current, cp, p, weight)
                        .for_each_quad(CONIC_TO_QUAD_TOLERANCE, &mut |qcp, qp| {
                            receiver.quad_to(qcp, qp);
                        });
                }
            }
            PathElement::CubicTo(cp1, cp2, p) => receiver.cubic_to(cp1, cp2, p),
            PathElement::MoveTo(_) | PathElement::Close => unreachable!(),
        }
        if let Some(end) = el.end_point() {
            current = end;
        }
    }
    receiver.path_end();
}

/// Builds a [`BezPath`], turning conics into quadratics.
#[derive(Debug, Default)]
pub(crate) struct BezPathReceiver {
    pub(crate) path: BezPath,
}

impl PathReceiver for BezPathReceiver {
    fn move_to(&mut self, p: Point, _will_be_closed: bool) {
        self.path.move_to(p.to_kurbo());
    }

    fn line_to(&mut self, p: Point) {
        self.path.line_to(p.to_kurbo());
    }

    fn quad_to(&mut self, cp: Point, p: Point) {
        self.path.quad_to(cp.to_kurbo(), p.to_kurbo());
    }

    fn cubic_to(&mut self, cp1: Point, cp2: Point, p: Point) {
        self.path.curve_to(cp1.to_kurbo(), cp2.to_kurbo(), p.to_kurbo());
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

impl PathReceiver for PathBuilder {
    fn accepts_conics(&self) -> bool {
        true
    }

    fn move_to(&mut self, p: Point, _will_be_closed: bool) {
        Self::move_to(self, p);
    }

    fn line_to(&mut self, p: Point) {
        Self::line_to(self, p);
    }

    fn quad_to(&mut self, cp: Point, p: Point) {
        Self::quad_to(self, cp, p);
    }

    fn conic_to(&mut self, cp: Point, p: Point, weight: Scalar) {
        Self::conic_to(self, cp, p, weight);
    }

    fn cubic_to(&mut self, cp1: Point, cp2: Point, p: Point) {
        Self::cubic_to(self, cp1, cp2, p);
    }

    fn close(&mut self) {
        Self::close(self);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::PathReceiver;
    use crate::path::{FillType, Path, PathBuilder};
    use crate::point::Point;
    use crate::rect::Rect;
    use crate::scalar::Scalar;

    /// Records every call as a string.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub(crate) conics: bool,
        pub(crate) calls: Vec<String>,
    }

    impl PathReceiver for Recorder {
        fn accepts_conics(&self) -> bool {
            self.conics
        }

        fn move_to(&mut self, p: Point, will_be_closed: bool) {
            self.calls
                .push(format!("M {} {} {will_be_closed}", p.x, p.y));
        }

        fn line_to(&mut self, p: Point) {
            self.calls.push(format!("L {} {}", p.x, p.y));
        }

        fn quad_to(&mut self, _cp: Point, p: Point) {
            self.calls.push(format!("Q {} {}", p.x, p.y));
        }

        fn conic_to(&mut self, _cp: Point, p: Point, weight: Scalar) {
            self.calls.push(format!("K {} {} {weight}", p.x, p.y));
        }

        fn cubic_to(&mut self, _cp1: Point, _cp2: Point, p: Point) {
            self.calls.push(format!("C {} {}", p.x, p.y));
        }

        fn close(&mut self) {
            self.calls.push("Z".into());
        }

        fn path_end(&mut self) {
            self.calls.push("E".into());
        }
    }

    #[test]
    fn empty_path_only_ends() {
        let mut rec = Recorder::default();
        Path::default().dispatch(&mut rec);
        assert_eq!(rec.calls, ["E"]);
    }

    #[test]
    fn close_lookahead() {
        let mut b = PathBuilder::new();
        b.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(1.0, 0.0))
            .move_to(Point::new(5.0, 5.0))
            .line_to(Point::new(6.0, 5.0))
            .close();
        let mut rec = Recorder::default();
        b.into_path(FillType::NonZero).dispatch(&mut rec);
        assert_eq!(rec.calls, ["M 0 0 false", "L 1 0", "M 5 5 true", "L 6 5", "Z", "E"]);
    }

    #[test]
    fn conics_follow_receiver_capability() {
        let oval = Path::make_oval(Rect::make_ltrb(0.0, 0.0, 10.0, 10.0));

        let mut accepting = Recorder {
            conics: true,
            ..Default::default()
        };
        oval.dispatch(&mut accepting);
        assert_eq!(accepting.calls.iter().filter(|c| c.starts_with('K')).count(), 4);

        let mut rejecting = Recorder::default();
        oval.dispatch(&mut rejecting);
        assert!(!rejecting.calls.iter().any(|c| c.starts_with('K')));
        assert!(rejecting.calls.iter().filter(|c| c.starts_with('Q')).count() >= 4);
        assert_eq!(rejecting.calls.last().map(String::as_str), Some("E"));
    }

    #[test]
    fn both_encodings_dispatch_alike() {
        let packed = Path::make_rect_ltrb(0.0, 0.0, 4.0, 3.0);
        let bez = Path::from_bez_path(packed.bez_path().clone(), FillType::NonZero);
        let mut a = Recorder::default();
        let mut b = Recorder::default();
        packed.dispatch(&mut a);
        bez.dispatch(&mut b);
        assert_eq!(a.calls, b.calls);
    }
}
