use tracing::debug;

use crate::backend::{DrawingBackend, MarkerShape};
use crate::context::ChartContext;
use crate::error::RenderError;
use crate::grid::visibility::is_visible;
use crate::layers::Layer;
use crate::settings::Stroke;
use crate::types::{Coord, Horizontal, Point};

const CARDINAL_LABELS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// A family of labeled points tied to one of the grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerSet {
    EquatorialPoles,
    HorizontalPoles,
    EquinoxPoints,
    LunarNodes,
    CardinalDirections,
}

impl MarkerSet {
    pub fn name(self) -> &'static str {
        match self {
            MarkerSet::EquatorialPoles => "equatorial-poles",
            MarkerSet::HorizontalPoles => "horizontal-poles",
            MarkerSet::EquinoxPoints => "equinox-points",
            MarkerSet::LunarNodes => "lunar-nodes",
            MarkerSet::CardinalDirections => "cardinal-directions",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Marker {
    at: Horizontal,
    label: &'static str,
    shape: Option<MarkerShape>,
    label_offset: (f64, f64),
}

pub struct MarkersLayer {
    set: MarkerSet,
    stroke: Stroke,
    order: i32,
}

impl MarkersLayer {
    pub fn new(set: MarkerSet, stroke: Stroke, order: i32) -> Self {
        Self { set, stroke, order }
    }

    fn markers(&self, context: &ChartContext<'_>) -> Vec<Marker> {
        let grids = context.grids;
        let sky = &context.sky;
        match self.set {
            MarkerSet::EquatorialPoles => [("NCP", 90.0), ("SCP", -90.0)]
                .into_iter()
                .map(|(label, lat)| Marker {
                    at: grids.equatorial.to_horizontal(Coord::new(0.0, lat), sky),
                    label,
                    shape: Some(MarkerShape::Cross),
                    label_offset: (5.0, 5.0),
                })
                .collect(),
            MarkerSet::HorizontalPoles => [("Zenith", 90.0), ("Nadir", -90.0)]
                .into_iter()
                .map(|(label, alt)| Marker {
                    at: Horizontal::new(0.0, alt),
                    label,
                    shape: Some(MarkerShape::Cross),
                    label_offset: (5.0, 5.0),
                })
                .collect(),
            MarkerSet::EquinoxPoints => [("\u{2648}", 0), ("\u{264E}", 12)]
                .into_iter()
                .filter_map(|(label, column)| {
                    let p = grids.ecliptic.column(column).next()?;
                    Some(Marker {
                        at: grids.ecliptic.to_horizontal(p.coord, sky),
                        label,
                        shape: None,
                        label_offset: (0.0, 0.0),
                    })
                })
                .collect(),
            MarkerSet::LunarNodes => [("\u{260A}", 0.0), ("\u{260B}", 180.0)]
                .into_iter()
                .map(|(label, offset)| Marker {
                    at: grids
                        .ecliptic
                        .to_horizontal(Coord::new(sky.lunar_node_deg + offset, 0.0), sky),
                    label,
                    shape: Some(MarkerShape::Dot),
                    label_offset: (0.0, 0.0),
                })
                .collect(),
            MarkerSet::CardinalDirections => CARDINAL_LABELS
                .iter()
                .enumerate()
                .map(|(k, &label)| Marker {
                    at: Horizontal::new(k as f64 * 45.0, 0.0),
                    label,
                    shape: None,
                    label_offset: (0.0, 0.0),
                })
                .collect(),
        }
    }
}

impl Layer for MarkersLayer {
    fn name(&self) -> &str {
        self.set.name()
    }

    fn draw_order(&self) -> i32 {
        self.order
    }

    fn render(
        &self,
        context: &ChartContext<'_>,
        out: &mut dyn DrawingBackend,
    ) -> Result<(), RenderError> {
        let view = &context.view;
        let mut shown = 0;
        for m in self.markers(context) {
            if !is_visible(m.at, view) {
                continue;
            }
            let p = view.project(m.at);
            if let Some(shape) = m.shape {
                out.draw_marker(&self.stroke, p, shape);
            }
            let (dx, dy) = m.label_offset;
            out.draw_label(&self.stroke, Point::new(p.x + dx, p.y + dy), m.label);
            shown += 1;
        }
        debug!(markers = self.name(), shown, "markers rendered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CommandBuffer, DrawCommand};
    use crate::config::RenderConfig;
    use crate::grid::SkyGrids;
    use crate::test_utils::{approx, make_config};

    fn render(set: MarkerSet, patch: impl FnOnce(&mut RenderConfig)) -> CommandBuffer {
        let grids = SkyGrids::new();
        let cfg = make_config(patch);
        let context = ChartContext::new(&grids, &cfg);
        let mut buf = CommandBuffer::new();
        MarkersLayer::new(set, Stroke::new("marker", "#0ff"), 0)
            .render(&context, &mut buf)
            .expect("markers render");
        buf
    }

    fn labels(buf: &CommandBuffer) -> Vec<String> {
        buf.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Label { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn zenith_marker_sits_at_screen_center_with_offset_label() {
        let buf = render(MarkerSet::HorizontalPoles, |cfg| {
            cfg.center = Horizontal::new(0.0, 90.0);
            cfg.fov_deg = 60.0;
        });
        assert_eq!(labels(&buf), vec!["Zenith"]);
        match (&buf.commands[0], &buf.commands[1]) {
            (
                DrawCommand::Marker {
                    at,
                    shape: MarkerShape::Cross,
                    ..
                },
                DrawCommand::Label { at: label_at, .. },
            ) => {
                assert!(approx(at.x, 400.0, 1e-9) && approx(at.y, 300.0, 1e-9));
                assert!(approx(label_at.x, 405.0, 1e-9) && approx(label_at.y, 305.0, 1e-9));
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn north_celestial_pole_is_found_above_the_north_point() {
        // Observer at 51.48°N: the pole stands 51.48° above due north
        let buf = render(MarkerSet::EquatorialPoles, |cfg| {
            cfg.center = Horizontal::new(0.0, 51.48);
            cfg.fov_deg = 10.0;
        });
        assert_eq!(labels(&buf), vec!["NCP"]);
    }

    #[test]
    fn markers_outside_the_view_are_skipped() {
        let buf = render(MarkerSet::HorizontalPoles, |cfg| {
            cfg.center = Horizontal::new(90.0, 0.0);
            cfg.fov_deg = 60.0;
        });
        assert!(buf.commands.is_empty());
    }

    #[test]
    fn cardinal_directions_along_a_wide_horizon_view() {
        let buf = render(MarkerSet::CardinalDirections, |cfg| {
            cfg.center = Horizontal::new(180.0, 0.0);
            cfg.fov_deg = 100.0;
        });
        // 60° reach: SE, S, SW
        assert_eq!(labels(&buf), vec!["SE", "S", "SW"]);
    }

    #[test]
    fn lunar_nodes_are_dots_with_labels() {
        let grids = SkyGrids::new();
        let cfg = make_config(|_| {});
        let context = ChartContext::new(&grids, &cfg);
        let node = grids.ecliptic.to_horizontal(
            Coord::new(context.sky.lunar_node_deg, 0.0),
            &context.sky,
        );

        let buf = render(MarkerSet::LunarNodes, |cfg| {
            cfg.center = node;
            cfg.fov_deg = 20.0;
        });
        assert_eq!(labels(&buf), vec!["\u{260A}"]);
        assert!(matches!(
            buf.commands[0],
            DrawCommand::Marker {
                shape: MarkerShape::Dot,
                ..
            }
        ));
    }

    #[test]
    fn vernal_equinox_label_is_placed_on_the_point() {
        let grids = SkyGrids::new();
        let cfg = make_config(|_| {});
        let context = ChartContext::new(&grids, &cfg);
        let vernal = grids
            .ecliptic
            .to_horizontal(Coord::new(0.0, 0.0), &context.sky);

        let buf = render(MarkerSet::EquinoxPoints, |cfg| {
            cfg.center = vernal;
            cfg.fov_deg = 20.0;
        });
        assert_eq!(buf.commands.len(), 1);
        match &buf.commands[0] {
            DrawCommand::Label { at, text, .. } => {
                assert_eq!(text, "\u{2648}");
                assert!(approx(at.x, 400.0, 1e-6) && approx(at.y, 300.0, 1e-6));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
