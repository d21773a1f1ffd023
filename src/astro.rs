// Plain spherical rotations between frames, no precession or nutation

use crate::types::{Coord, Horizontal};

pub const J2000: f64 = 2451545.0;
const UNIX_EPOCH_JD: f64 = 2440587.5;

// J2000 north galactic pole and the galactic longitude of the north celestial pole
const NGP_RA_DEG: f64 = 192.85948;
const NGP_DEC_DEG: f64 = 27.12825;
const NCP_GAL_LON_DEG: f64 = 122.93192;

pub fn jd_from_unix_seconds(secs: f64) -> f64 {
    secs / 86400.0 + UNIX_EPOCH_JD
}

pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000) / 36525.0
}

/// Greenwich mean sidereal time shifted by the observer's east longitude, in degrees.
pub fn local_sidereal_time_deg(jd: f64, lon_east_deg: f64) -> f64 {
    let t = julian_centuries(jd);
    let gmst = 280.46061837 + 360.98564736629 * (jd - J2000) + 0.000387933 * t * t
        - t * t * t / 38710000.0;
    (gmst + lon_east_deg).rem_euclid(360.0)
}

pub fn mean_obliquity_deg(jd: f64) -> f64 {
    23.439291 - 0.0130042 * julian_centuries(jd)
}

/// Mean longitude of the Moon's ascending node.
pub fn lunar_ascending_node_deg(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    (125.04452 - 1934.136261 * t + 0.0020708 * t * t + t * t * t / 450000.0).rem_euclid(360.0)
}

// atan2 form keeps full precision near the poles
fn latitude(x: f64, y: f64, z: f64) -> f64 {
    z.atan2(x.hypot(y))
}

pub fn equatorial_to_horizontal(eq: Coord, lst_deg: f64, lat_deg: f64) -> Horizontal {
    let h = (lst_deg - eq.lon_deg).to_radians();
    let dec = eq.lat_deg.to_radians();
    let phi = lat_deg.to_radians();

    let x = dec.sin() * phi.cos() - dec.cos() * phi.sin() * h.cos();
    let y = -dec.cos() * h.sin();
    let z = phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos();

    Horizontal {
        az_deg: y.atan2(x).to_degrees().rem_euclid(360.0),
        alt_deg: latitude(x, y, z).to_degrees(),
    }
}

pub fn horizontal_to_equatorial(hor: Horizontal, lst_deg: f64, lat_deg: f64) -> Coord {
    let az = hor.az_deg.to_radians();
    let alt = hor.alt_deg.to_radians();
    let phi = lat_deg.to_radians();

    let x = alt.sin() * phi.cos() - alt.cos() * phi.sin() * az.cos();
    let y = -az.sin() * alt.cos();
    let z = phi.sin() * alt.sin() + phi.cos() * alt.cos() * az.cos();

    Coord {
        lon_deg: (lst_deg - y.atan2(x).to_degrees()).rem_euclid(360.0),
        lat_deg: latitude(x, y, z).to_degrees(),
    }
}

pub fn ecliptic_to_equatorial(ecl: Coord, obliquity_deg: f64) -> Coord {
    let lambda = ecl.lon_deg.to_radians();
    let beta = ecl.lat_deg.to_radians();
    let eps = obliquity_deg.to_radians();

    let x = lambda.cos() * beta.cos();
    let y = lambda.sin() * eps.cos() * beta.cos() - beta.sin() * eps.sin();
    let z = beta.sin() * eps.cos() + beta.cos() * eps.sin() * lambda.sin();

    Coord {
        lon_deg: y.atan2(x).to_degrees().rem_euclid(360.0),
        lat_deg: latitude(x, y, z).to_degrees(),
    }
}

pub fn equatorial_to_ecliptic(eq: Coord, obliquity_deg: f64) -> Coord {
    let alpha = eq.lon_deg.to_radians();
    let delta = eq.lat_deg.to_radians();
    let eps = obliquity_deg.to_radians();

    let x = alpha.cos() * delta.cos();
    let y = alpha.sin() * eps.cos() * delta.cos() + delta.sin() * eps.sin();
    let z = delta.sin() * eps.cos() - delta.cos() * eps.sin() * alpha.sin();

    Coord {
        lon_deg: y.atan2(x).to_degrees().rem_euclid(360.0),
        lat_deg: latitude(x, y, z).to_degrees(),
    }
}

pub fn galactic_to_equatorial(gal: Coord) -> Coord {
    let dl = (NCP_GAL_LON_DEG - gal.lon_deg).to_radians();
    let b = gal.lat_deg.to_radians();
    let dec_g = NGP_DEC_DEG.to_radians();

    let x = b.sin() * dec_g.cos() - b.cos() * dec_g.sin() * dl.cos();
    let y = b.cos() * dl.sin();
    let z = b.sin() * dec_g.sin() + b.cos() * dec_g.cos() * dl.cos();

    Coord {
        lon_deg: (NGP_RA_DEG + y.atan2(x).to_degrees()).rem_euclid(360.0),
        lat_deg: latitude(x, y, z).to_degrees(),
    }
}

pub fn equatorial_to_galactic(eq: Coord) -> Coord {
    let dra = (eq.lon_deg - NGP_RA_DEG).to_radians();
    let dec = eq.lat_deg.to_radians();
    let dec_g = NGP_DEC_DEG.to_radians();

    let x = dec.sin() * dec_g.cos() - dec.cos() * dec_g.sin() * dra.cos();
    let y = dec.cos() * dra.sin();
    let z = dec.sin() * dec_g.sin() + dec.cos() * dec_g.cos() * dra.cos();

    Coord {
        lon_deg: (NCP_GAL_LON_DEG - y.atan2(x).to_degrees()).rem_euclid(360.0),
        lat_deg: latitude(x, y, z).to_degrees(),
    }
}
