use crate::astro::{local_sidereal_time_deg, lunar_ascending_node_deg, mean_obliquity_deg};
use crate::config::RenderConfig;
use crate::geometry::{project, radial, to_pixels};
use crate::grid::SkyGrids;
use crate::types::{Horizontal, Point, Projection};

/// Observation instant and location, with the angles derived from them.
#[derive(Debug, Clone, Copy)]
pub struct SkyContext {
    pub jd: f64,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub lst_deg: f64,
    pub obliquity_deg: f64,
    pub lunar_node_deg: f64,
}

impl SkyContext {
    pub fn new(jd: f64, latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            jd,
            latitude_deg,
            longitude_deg,
            lst_deg: local_sidereal_time_deg(jd, longitude_deg),
            obliquity_deg: mean_obliquity_deg(jd),
            lunar_node_deg: lunar_ascending_node_deg(jd),
        }
    }
}

/// Read-only view state for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext {
    pub center: Horizontal,
    /// Half of the displayed field, degrees. Maps to half the screen diagonal.
    pub view_angle: f64,
    pub width: f64,
    pub height: f64,
    pub projection: Projection,
    scale: f64,
}

impl ViewContext {
    pub fn new(
        center: Horizontal,
        view_angle: f64,
        width: f64,
        height: f64,
        projection: Projection,
    ) -> Self {
        let rho_max = radial(view_angle.to_radians(), projection);
        let scale = width.hypot(height) / 2.0 / rho_max;
        Self {
            center,
            view_angle,
            width,
            height,
            projection,
            scale,
        }
    }

    pub fn origin(&self) -> Point {
        Point {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }

    pub fn half_diagonal(&self) -> f64 {
        self.width.hypot(self.height) / 2.0
    }

    pub fn project(&self, h: Horizontal) -> Point {
        to_pixels(
            project(h, self.center, self.projection),
            self.origin(),
            self.scale,
        )
    }

    pub fn is_off_screen(&self, p: Point) -> bool {
        p.x < 0.0 || p.x > self.width || p.y < 0.0 || p.y > self.height
    }
}

/// Everything a layer reads while rendering one frame.
pub struct ChartContext<'a> {
    pub grids: &'a SkyGrids,
    pub sky: SkyContext,
    pub view: ViewContext,
}

impl<'a> ChartContext<'a> {
    pub fn new(grids: &'a SkyGrids, cfg: &RenderConfig) -> Self {
        Self {
            grids,
            sky: SkyContext::new(cfg.jd, cfg.latitude_deg, cfg.longitude_deg),
            view: ViewContext::new(
                cfg.center,
                cfg.fov_deg / 2.0,
                cfg.width as f64,
                cfg.height as f64,
                cfg.projection,
            ),
        }
    }
}
