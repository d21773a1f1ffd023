use crate::config::RenderConfig;
use crate::context::ViewContext;

// Check that the error between a and b is close enough
pub fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

// Same as approx, for angles that may differ by whole turns
pub fn approx_angle(a: f64, b: f64, eps: f64) -> bool {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d) <= eps
}

pub fn make_config(patch: impl FnOnce(&mut RenderConfig)) -> RenderConfig {
    let mut cfg = RenderConfig::default();
    patch(&mut cfg);
    cfg
}

pub fn make_view(patch: impl FnOnce(&mut RenderConfig)) -> ViewContext {
    let cfg = make_config(patch);
    ViewContext::new(
        cfg.center,
        cfg.fov_deg / 2.0,
        cfg.width as f64,
        cfg.height as f64,
        cfg.projection,
    )
}
