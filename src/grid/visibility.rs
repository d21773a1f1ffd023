use crate::context::ViewContext;
use crate::geometry::angular_separation;
use crate::types::Horizontal;

/// Runs reach this far past the view half-angle so stitched curves have no
/// seam at the visible boundary.
pub const VISIBILITY_MARGIN: f64 = 1.2;

pub fn is_visible(h: Horizontal, view: &ViewContext) -> bool {
    angular_separation(h, view.center) < view.view_angle * VISIBILITY_MARGIN
}
