use crate::astro::J2000;
use crate::settings::Settings;
use crate::types::{Horizontal, Projection};

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub center: Horizontal,
    pub projection: Projection,
    /// Full displayed field, degrees.
    pub fov_deg: f64,
    pub width: u32,
    pub height: u32,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub jd: f64,
    pub settings: Settings,
}
impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            center: Horizontal {
                az_deg: 180.0,
                alt_deg: 30.0,
            },
            projection: Projection::Stereographic,
            fov_deg: 90.0,
            width: 800,
            height: 600,
            latitude_deg: 51.48,
            longitude_deg: 0.0,
            jd: J2000,
            settings: Settings::default(),
        }
    }
}
