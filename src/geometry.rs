use crate::types::{Horizontal, Point, Projection};
use std::f64::consts::PI;

#[inline]
fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

#[inline]
pub fn to_pixels(tp: Point, center_px: Point, scale: f64) -> Point {
    Point {
        x: center_px.x + tp.x * scale,
        y: center_px.y - tp.y * scale,
    }
}

/// Great-circle angle between two horizontal directions, in degrees.
pub fn angular_separation(a: Horizontal, b: Horizontal) -> f64 {
    let (a1, h1) = (a.az_deg.to_radians(), a.alt_deg.to_radians());
    let (a2, h2) = (b.az_deg.to_radians(), b.alt_deg.to_radians());

    // Haversine form keeps precision for tiny separations at deep zoom
    let s_alt = ((h2 - h1) / 2.0).sin();
    let s_az = ((a2 - a1) / 2.0).sin();
    let hav = s_alt * s_alt + h1.cos() * h2.cos() * s_az * s_az;
    (2.0 * clamp(hav, 0.0, 1.0).sqrt().asin()).to_degrees()
}

/// Radial distance on the tangent plane for an angular distance (radians) from the center.
pub fn radial(zenith: f64, projection: Projection) -> f64 {
    match projection {
        Projection::Stereographic => (zenith / 2.0).tan(),
        Projection::Equidistant => zenith / (PI / 2.0),
    }
}

// Project a horizontal direction relative to a view center onto the tangent plane.
// The zenith side of the center is +y and azimuth grows toward +x.
// Unlike a gnomonic chart, both projections here stay finite on the far
// hemisphere, so every direction gets a point.
pub fn project(coords: Horizontal, center: Horizontal, projection: Projection) -> Point {
    let az = coords.az_deg.to_radians();
    let alt = coords.alt_deg.to_radians();
    let caz = center.az_deg.to_radians();
    let calt = center.alt_deg.to_radians();

    let d_az = az - caz;

    let cos_z = clamp(
        calt.sin() * alt.sin() + calt.cos() * alt.cos() * d_az.cos(),
        -1.0,
        1.0,
    );
    let zenith = cos_z.acos();

    // Bearing from the center, measured from the direction toward the zenith
    let y = d_az.sin() * alt.cos();
    let x = calt.cos() * alt.sin() - calt.sin() * alt.cos() * d_az.cos();
    let bearing = y.atan2(x);

    let r = radial(zenith, projection);

    Point {
        x: r * bearing.sin(),
        y: r * bearing.cos(),
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Angle at `vertex` between the rays toward `a` and `b`, in degrees.
/// A zero-length ray reads as a straight angle.
pub fn angle_between_vectors(vertex: Point, a: Point, b: Point) -> f64 {
    let (ax, ay) = (a.x - vertex.x, a.y - vertex.y);
    let (bx, by) = (b.x - vertex.x, b.y - vertex.y);
    let la = ax.hypot(ay);
    let lb = bx.hypot(by);
    if la == 0.0 || lb == 0.0 {
        return 180.0;
    }
    let cos_alpha = clamp((ax * bx + ay * by) / (la * lb), -1.0, 1.0);
    cos_alpha.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::approx;

    #[test]
    fn separation_along_horizon_and_to_zenith() {
        let a = Horizontal::new(10.0, 0.0);
        let b = Horizontal::new(40.0, 0.0);
        assert!(approx(angular_separation(a, b), 30.0, 1e-9));

        let zenith = Horizontal::new(123.0, 90.0);
        assert!(approx(angular_separation(a, zenith), 90.0, 1e-9));
    }

    #[test]
    fn separation_wraps_through_north() {
        let a = Horizontal::new(359.0, 0.0);
        let b = Horizontal::new(1.0, 0.0);
        assert!(approx(angular_separation(a, b), 2.0, 1e-9));
    }

    #[test]
    fn separation_resolves_tiny_angles() {
        let a = Horizontal::new(180.0, 45.0);
        let b = Horizontal::new(180.0, 45.0 + 1e-6);
        assert!(approx(angular_separation(a, b), 1e-6, 1e-12));
    }

    #[test]
    fn center_projects_to_origin() {
        let c = Horizontal::new(180.0, 30.0);
        for projection in [Projection::Stereographic, Projection::Equidistant] {
            let p = project(c, c, projection);
            assert!(approx(p.x, 0.0, 1e-15));
            assert!(approx(p.y, 0.0, 1e-15));
        }
    }

    #[test]
    fn increasing_azimuth_goes_right_and_altitude_goes_up() {
        let c = Horizontal::new(180.0, 0.0);
        let right = project(Horizontal::new(190.0, 0.0), c, Projection::Stereographic);
        assert!(right.x > 0.0);
        assert!(approx(right.y, 0.0, 1e-12));
        assert!(approx(right.x, (5.0_f64).to_radians().tan(), 1e-12));

        let up = project(Horizontal::new(180.0, 10.0), c, Projection::Equidistant);
        assert!(approx(up.x, 0.0, 1e-12));
        assert!(approx(up.y, 10.0 / 90.0, 1e-12));
    }

    #[test]
    fn far_hemisphere_stays_finite() {
        let c = Horizontal::new(0.0, 0.0);
        let p = project(Horizontal::new(170.0, 0.0), c, Projection::Stereographic);
        assert!(p.is_finite());
        assert!(approx(p.x, (85.0_f64).to_radians().tan(), 1e-9));
    }

    #[test]
    fn to_pixels_applies_center_and_scale_with_y_flip() {
        let center = Point::new(400.0, 300.0);
        let px = to_pixels(Point::new(0.5, 0.25), center, 100.0);
        assert!(approx(px.x, 450.0, 1e-12));
        assert!(approx(px.y, 275.0, 1e-12));
    }

    #[test]
    fn angle_between_vectors_straight_and_right() {
        let v = Point::new(0.0, 0.0);
        let straight = angle_between_vectors(v, Point::new(-1.0, 0.0), Point::new(3.0, 0.0));
        assert!(approx(straight, 180.0, 1e-9));

        let right = angle_between_vectors(v, Point::new(0.0, 2.0), Point::new(5.0, 0.0));
        assert!(approx(right, 90.0, 1e-9));
    }

    #[test]
    fn zero_length_ray_is_treated_as_collinear() {
        let v = Point::new(1.0, 1.0);
        assert!(approx(
            angle_between_vectors(v, v, Point::new(4.0, 5.0)),
            180.0,
            0.0
        ));
    }

    #[test]
    fn distance_is_euclidean() {
        assert!(approx(
            distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)),
            5.0,
            1e-12
        ));
    }
}
