use crate::backend::DrawingBackend;
use crate::context::ChartContext;
use crate::error::RenderError;

pub trait Layer {
    fn name(&self) -> &str;

    /// Layers with lower values are drawn first.
    fn draw_order(&self) -> i32;

    /// Issue this layer's draw calls for one frame.
    fn render(
        &self,
        context: &ChartContext<'_>,
        out: &mut dyn DrawingBackend,
    ) -> Result<(), RenderError>;
}

pub mod grid;
pub mod markers;

pub use grid::GridLayer;
pub use markers::{MarkerSet, MarkersLayer};
