// Short runs that are nearly straight at deep zoom become the reference chord

use crate::clip::clip_to_screen;
use crate::context::ViewContext;
use crate::fit::estimate_radius;
use crate::geometry::{angle_between_vectors, distance};
use crate::types::Point;

/// Angle at the mid point above which a run counts as straight.
const STRAIGHT_ANGLE_DEG: f64 = 179.0;
/// End points farther than this many half-diagonals are "far".
const FAR_FACTOR: f64 = 2.0;
/// Fitted radius, in half-diagonals, above which an arc is drawn flat.
const FLAT_RADIUS_RATIO: f64 = 60.0;
/// Points beyond this many half-diagonals are not handed to the backend.
const SANITY_FACTOR: f64 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Nothing,
    /// Two projected points joined directly.
    Line(Point, Point),
    /// The reference pair, clipped to the screen.
    Chord(Point, Point),
    Curve(Vec<Point>),
    ClosedCurve(Vec<Point>),
}

pub fn classify(points: Vec<Point>, refs: Option<[Point; 2]>, closed: bool, view: &ViewContext) -> Shape {
    if closed {
        return Shape::ClosedCurve(points);
    }

    match points.len() {
        0 | 1 => return Shape::Nothing,
        2 => return Shape::Line(points[0], points[1]),
        _ => {}
    }

    let origin = view.origin();
    let r = view.half_diagonal();

    if points.len() < 6 {
        let p_start = points[0];
        let p_mid = points[points.len() / 2];
        let p_end = points[points.len() - 1];

        let alpha = angle_between_vectors(p_mid, p_start, p_end);
        let d1 = distance(p_start, origin);
        let d2 = distance(p_end, origin);
        let far = r * FAR_FACTOR;

        if let Some([a, b]) = refs {
            if alpha > STRAIGHT_ANGLE_DEG && (d1 > far || d2 > far) {
                return chord(a, b, view);
            }
            if d1 > far && d2 > far && estimate_radius(&points) / r > FLAT_RADIUS_RATIO {
                return chord(a, b, view);
            }
        }
    }

    if points.iter().all(|&p| distance(p, origin) < r * SANITY_FACTOR) {
        Shape::Curve(points)
    } else {
        Shape::Nothing
    }
}

fn chord(a: Point, b: Point, view: &ViewContext) -> Shape {
    let (a, b) = if view.is_off_screen(a) || view.is_off_screen(b) {
        clip_to_screen(a, b, view.width, view.height)
    } else {
        (a, b)
    };
    Shape::Chord(a, b)
}
