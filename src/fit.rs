use crate::types::Point;

// Relative size below which the normal-equation determinant counts as zero
const SINGULAR_EPS: f64 = 1e-10;

/// Radius of the circle best fitting `points` in the algebraic least-squares
/// sense, from second and third order power sums.
///
/// Collinear or coincident points have no finite circle; they return
/// `f64::INFINITY` so callers treat them as straight.
pub fn estimate_radius(points: &[Point]) -> f64 {
    let n = points.len() as f64;
    if points.len() < 3 {
        return f64::INFINITY;
    }

    let (mut sx, mut sy, mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let (mut sxxx, mut syyy, mut sxxy, mut sxyy) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        let (x, y) = (p.x, p.y);
        sx += x;
        sy += y;
        sxx += x * x;
        syy += y * y;
        sxy += x * y;
        sxxx += x * x * x;
        syyy += y * y * y;
        sxxy += x * x * y;
        sxyy += x * y * y;
    }

    let d11 = n * sxy - sx * sy;
    let d20 = n * sxx - sx * sx;
    let d02 = n * syy - sy * sy;
    let d30 = n * sxxx - sxx * sx;
    let d03 = n * syyy - syy * sy;
    let d21 = n * sxxy - sxx * sy;
    let d12 = n * sxyy - syy * sx;

    let det = d20 * d02 - d11 * d11;
    let scale = (d20 * d02).abs() + d11 * d11;
    if scale == 0.0 || det.abs() <= SINGULAR_EPS * scale {
        return f64::INFINITY;
    }

    let cx = ((d30 + d12) * d02 - (d03 + d21) * d11) / (2.0 * det);
    let cy = ((d03 + d21) * d20 - (d30 + d12) * d11) / (2.0 * det);
    let c = (sxx + syy - 2.0 * cx * sx - 2.0 * cy * sy) / n;

    let r = (c + cx * cx + cy * cy).sqrt();
    if r.is_finite() { r } else { f64::INFINITY }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_circle(cx: f64, cy: f64, r: f64, angles_deg: &[f64]) -> Vec<Point> {
        angles_deg
            .iter()
            .map(|a| {
                let t = a.to_radians();
                Point::new(cx + r * t.cos(), cy + r * t.sin())
            })
            .collect()
    }

    #[test]
    fn recovers_radius_of_exact_circle() {
        let pts = on_circle(120.0, -45.0, 37.5, &[0.0, 50.0, 100.0, 170.0, 260.0]);
        let r = estimate_radius(&pts);
        assert!(((r - 37.5) / 37.5).abs() < 1e-6, "r = {r}");
    }

    #[test]
    fn recovers_radius_from_a_short_arc() {
        let pts = on_circle(400.0, 300.0, 5000.0, &[80.0, 85.0, 90.0, 95.0, 100.0]);
        let r = estimate_radius(&pts);
        assert!(((r - 5000.0) / 5000.0).abs() < 1e-6, "r = {r}");
    }

    #[test]
    fn three_points_define_their_circumcircle() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 1.0),
        ];
        assert!((estimate_radius(&pts) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_points_are_infinitely_flat() {
        let diagonal: Vec<Point> = (0..5).map(|i| Point::new(i as f64, i as f64)).collect();
        assert_eq!(estimate_radius(&diagonal), f64::INFINITY);

        let horizontal: Vec<Point> = (0..5).map(|i| Point::new(i as f64 * 10.0, 7.0)).collect();
        assert_eq!(estimate_radius(&horizontal), f64::INFINITY);
    }

    #[test]
    fn coincident_points_are_infinitely_flat() {
        let pts = vec![Point::new(3.0, 4.0); 4];
        assert_eq!(estimate_radius(&pts), f64::INFINITY);
    }

    #[test]
    fn too_few_points_are_flat() {
        assert_eq!(estimate_radius(&[]), f64::INFINITY);
        assert_eq!(
            estimate_radius(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
            f64::INFINITY
        );
    }
}
