use tracing::{debug, trace};

use crate::backend::DrawingBackend;
use crate::classify::{Shape, classify};
use crate::context::ChartContext;
use crate::error::RenderError;
use crate::grid::GridKind;
use crate::grid::segments::extract_runs;
use crate::layers::Layer;
use crate::settings::Stroke;
use crate::types::Point;

/// Draws one grid: meridians, parallels, or a single great circle.
pub struct GridLayer {
    kind: GridKind,
    stroke: Stroke,
    order: i32,
}

impl GridLayer {
    pub fn new(kind: GridKind, stroke: Stroke, order: i32) -> Self {
        Self {
            kind,
            stroke,
            order,
        }
    }
}

impl Layer for GridLayer {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn draw_order(&self) -> i32 {
        self.order
    }

    fn render(
        &self,
        context: &ChartContext<'_>,
        out: &mut dyn DrawingBackend,
    ) -> Result<(), RenderError> {
        let grid = context.grids.get(self.kind);
        let (sky, view) = (&context.sky, &context.view);

        let runs = extract_runs(grid, sky, view);
        let mut drawn = 0;
        for run in &runs {
            let points: Vec<Point> = run
                .points
                .iter()
                .map(|p| view.project(grid.to_horizontal(p.coord, sky)))
                .collect();
            if !points.iter().all(Point::is_finite) {
                return Err(RenderError::NonFinite {
                    layer: self.name().to_owned(),
                });
            }
            let refs = run.refs.map(|pair| pair.map(|h| view.project(h)));

            match classify(points, refs, run.closed, view) {
                Shape::Nothing => {
                    trace!(grid = grid.name, kind = ?run.kind, "run left undrawn");
                    continue;
                }
                Shape::Line(a, b) | Shape::Chord(a, b) => out.draw_line(&self.stroke, a, b),
                Shape::Curve(pts) => out.draw_open_curve(&self.stroke, &pts),
                Shape::ClosedCurve(pts) => out.draw_closed_curve(&self.stroke, &pts),
            }
            drawn += 1;
        }

        debug!(grid = grid.name, runs = runs.len(), drawn, "grid rendered");
        Ok(())
    }
}
