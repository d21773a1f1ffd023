use crate::types::Point;

/// Clip the segment `p0`-`p1` to the rectangle `[0,width]×[0,height]`
/// (Liang-Barsky). A segment that misses the rectangle comes back unchanged;
/// drawing it is harmless.
pub fn clip_to_screen(p0: Point, p1: Point, width: f64, height: f64) -> (Point, Point) {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;

    // (p, q) per edge: left, right, top, bottom
    let edges = [
        (-dx, p0.x),
        (dx, width - p0.x),
        (-dy, p0.y),
        (dy, height - p0.y),
    ];

    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return (p0, p1);
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return (p0, p1);
        }
    }

    (
        Point::new(p0.x + t0 * dx, p0.y + t0 * dy),
        Point::new(p0.x + t1 * dx, p0.y + t1 * dy),
    )
}
