/// A point on the screen, in pixels. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Direction relative to the observer's horizon.
/// Azimuth is measured from north through east, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizontal {
    pub az_deg: f64,
    pub alt_deg: f64,
}

impl Horizontal {
    pub fn new(az_deg: f64, alt_deg: f64) -> Self {
        Self { az_deg, alt_deg }
    }
}

/// A longitude/latitude pair in some grid's native frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl Coord {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

/// One sample of an angular grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub row: usize,
    pub column: usize,
    pub coord: Coord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Stereographic,
    Equidistant,
}

impl Projection {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "stereographic" => Some(Self::Stereographic),
            "equidistant" => Some(Self::Equidistant),
            _ => None,
        }
    }
}

// Small helpers used by multiple modules
pub fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    s.parse::<T>().unwrap_or(default)
}

pub fn sexagesimal_dms_to_degrees(d: f64, m: f64, s: f64) -> f64 {
    let sign = if d.is_sign_negative() { -1.0 } else { 1.0 };
    let ad = d.abs();
    sign * (ad + (m * 60.0 + s) / 3600.0)
}

pub fn parse_dms(s: &str) -> Option<(f64, f64, f64)> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    Some((
        parse_or(parts[0], 0.0),
        parse_or(parts[1], 0.0),
        parse_or(parts[2], 0.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::approx;

    #[test]
    fn projection_from_str_recognizes_known_values() {
        assert_eq!(
            Projection::from_str("stereographic"),
            Some(Projection::Stereographic)
        );
        assert_eq!(
            Projection::from_str("equidistant"),
            Some(Projection::Equidistant)
        );
    }

    #[test]
    fn projection_from_str_is_case_sensitive_and_handles_unknown() {
        assert_eq!(Projection::from_str("Stereographic"), None);
        assert_eq!(Projection::from_str("gnomonic"), None);
        assert_eq!(Projection::from_str(""), None);
    }

    #[test]
    fn parse_or_parses_floats_and_defaults_on_error() {
        let v: f64 = parse_or("3.14159", 0.0);
        assert!(approx(v, 3.14159, 1e-12));

        let v_bad: f64 = parse_or("oops", 1.23);
        assert!(approx(v_bad, 1.23, 1e-12));
    }

    #[test]
    fn dms_to_degrees_positive_and_negative() {
        assert!(approx(
            sexagesimal_dms_to_degrees(55.0, 45.0, 0.0),
            55.75,
            1e-12
        ));
        assert!(approx(
            sexagesimal_dms_to_degrees(-10.0, 30.0, 0.0),
            -10.5,
            1e-12
        ));
    }

    #[test]
    fn dms_handles_negative_zero_degrees() {
        // -0° 30' 0" should be -0.5°
        let result = sexagesimal_dms_to_degrees(-0.0, 30.0, 0.0);
        assert!(approx(result, -0.5, 1e-12));
    }

    #[test]
    fn parse_dms_ok_and_wrong_lengths() {
        let (d, m, s) = parse_dms("-10:30:00").expect("should parse");
        assert!(approx(d, -10.0, 1e-12));
        assert!(approx(m, 30.0, 1e-12));
        assert!(approx(s, 0.0, 1e-12));

        assert!(parse_dms("10:30").is_none());
        assert!(parse_dms("10:30:00:00").is_none());
        assert!(parse_dms("xx").is_none());
    }

    #[test]
    fn point_finiteness() {
        assert!(Point::new(1.0, -2.0).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }
}
