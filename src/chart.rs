use crate::backend::{CommandBuffer, SvgBackend};
use crate::config::RenderConfig;
use crate::context::ChartContext;
use crate::grid::{GridKind, SkyGrids};
use crate::layers::{GridLayer, Layer, MarkerSet, MarkersLayer};
use std::fs;
use svg::Document;
use svg::node::element::{ClipPath, Definitions, Group, Rectangle, Style};
use tracing::{debug, warn};

// Load the default css for embedding
const DEFAULT_CSS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/styles/chart.css"));

pub struct Chart<'a> {
    pub context: ChartContext<'a>,
    layers: Vec<Box<dyn Layer>>,
    css_path: Option<String>,
}

/// The enabled layers for these settings, back to front. Markers are only
/// drawn together with the grid or line they belong to.
pub fn default_layers(cfg: &RenderConfig) -> Vec<Box<dyn Layer>> {
    let s = &cfg.settings;
    let style = s.style();
    let mut layers: Vec<Box<dyn Layer>> = Vec::new();

    if s.galactic_equator {
        layers.push(Box::new(GridLayer::new(GridKind::Galactic, style.galactic.clone(), 10)));
    }
    if s.equatorial_grid {
        layers.push(Box::new(GridLayer::new(
            GridKind::Equatorial,
            style.equatorial.clone(),
            20,
        )));
        if s.label_equatorial_poles {
            layers.push(Box::new(MarkersLayer::new(
                MarkerSet::EquatorialPoles,
                style.equatorial.clone(),
                21,
            )));
        }
    }
    if s.horizontal_grid {
        layers.push(Box::new(GridLayer::new(
            GridKind::Horizontal,
            style.horizontal.clone(),
            30,
        )));
        if s.label_horizontal_poles {
            layers.push(Box::new(MarkersLayer::new(
                MarkerSet::HorizontalPoles,
                style.horizontal.clone(),
                31,
            )));
        }
    }
    if s.ecliptic_line {
        layers.push(Box::new(GridLayer::new(GridKind::Ecliptic, style.ecliptic.clone(), 40)));
        if s.label_equinox_points {
            layers.push(Box::new(MarkersLayer::new(
                MarkerSet::EquinoxPoints,
                style.ecliptic.clone(),
                41,
            )));
        }
        if s.label_lunar_nodes {
            layers.push(Box::new(MarkersLayer::new(
                MarkerSet::LunarNodes,
                style.ecliptic.clone(),
                42,
            )));
        }
    }
    if s.horizon_line {
        layers.push(Box::new(GridLayer::new(GridKind::Horizon, style.horizon.clone(), 50)));
        if s.label_cardinal_directions {
            layers.push(Box::new(MarkersLayer::new(
                MarkerSet::CardinalDirections,
                style.cardinal.clone(),
                51,
            )));
        }
    }
    layers
}

impl<'a> Chart<'a> {
    pub fn new(grids: &'a SkyGrids, cfg: &RenderConfig, css_path: Option<String>) -> Self {
        Self::with_layers(grids, cfg, default_layers(cfg), css_path)
    }

    pub fn with_layers(
        grids: &'a SkyGrids,
        cfg: &RenderConfig,
        mut layers: Vec<Box<dyn Layer>>,
        css_path: Option<String>,
    ) -> Self {
        layers.sort_by_key(|l| l.draw_order());
        Self {
            context: ChartContext::new(grids, cfg),
            layers,
            css_path,
        }
    }

    fn load_css_text(&self) -> String {
        if let Some(path) = &self.css_path {
            match fs::read_to_string(path) {
                Ok(text) => return text,
                Err(err) => warn!(path = %path, %err, "css override unreadable, using embedded"),
            }
        }
        // Embedded fallback
        DEFAULT_CSS.to_owned()
    }

    /// Render every layer into its own buffer. A layer whose output is not
    /// finite is dropped and the rest of the frame carries on.
    pub fn render_layers(&self) -> Vec<(&str, CommandBuffer)> {
        let mut out = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let mut buf = CommandBuffer::new();
            let result = layer
                .render(&self.context, &mut buf)
                .and_then(|()| buf.check_finite(layer.name()));
            match result {
                Ok(()) => {
                    debug!(layer = layer.name(), commands = buf.commands.len(), "layer ready");
                    out.push((layer.name(), buf));
                }
                Err(err) => warn!(%err, "skipping layer"),
            }
        }
        out
    }

    pub fn draw_document(&self) -> Document {
        let w = self.context.view.width;
        let h = self.context.view.height;
        let sky = &self.context.sky;
        debug!(
            jd = sky.jd,
            lat = sky.latitude_deg,
            lon = sky.longitude_deg,
            lst = sky.lst_deg,
            "drawing chart"
        );

        let mut doc = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("width", w)
            .set("height", h)
            .set("viewBox", (0.0, 0.0, w, h))
            .set("class", "chart");

        let css = self.load_css_text();
        if !css.is_empty() {
            doc = doc.add(Style::new(css));
        }

        let clip_rect = Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", w)
            .set("height", h);
        let clip = ClipPath::new().set("id", "clip-chart").add(clip_rect);
        doc = doc.add(Definitions::new().add(clip));
        doc = doc.add(
            Rectangle::new()
                .set("class", "background")
                .set("width", w)
                .set("height", h),
        );

        let mut clipped = Group::new().set("clip-path", "url(#clip-chart)");
        for (name, buf) in self.render_layers() {
            let mut svg = SvgBackend::new(name);
            buf.replay(&mut svg);
            clipped = clipped.add(svg.into_group());
        }
        doc.add(clipped)
    }

    pub fn to_file(&self, path: &str) -> std::io::Result<()> {
        let doc = self.draw_document();
        svg::save(path, &doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DrawingBackend, MarkerShape};
    use crate::error::RenderError;
    use crate::settings::Stroke;
    use crate::test_utils::make_config;
    use crate::types::{Horizontal, Point};

    struct Broken;

    impl Layer for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn draw_order(&self) -> i32 {
            0
        }

        fn render(
            &self,
            _context: &ChartContext<'_>,
            out: &mut dyn DrawingBackend,
        ) -> Result<(), RenderError> {
            let stroke = Stroke::new("broken", "#f00");
            out.draw_marker(&stroke, Point::new(f64::NAN, 1.0), MarkerShape::Dot);
            Ok(())
        }
    }

    fn names(chart: &Chart<'_>) -> Vec<String> {
        chart
            .render_layers()
            .into_iter()
            .map(|(name, _)| name.to_owned())
            .collect()
    }

    #[test]
    fn default_settings_stack_layers_back_to_front() {
        let grids = SkyGrids::new();
        let cfg = make_config(|_| {});
        let chart = Chart::new(&grids, &cfg, None);
        let orders: Vec<i32> = chart.layers.iter().map(|l| l.draw_order()).collect();
        assert_eq!(orders, vec![10, 20, 21, 40, 41, 42, 50, 51]);
    }

    #[test]
    fn markers_are_hidden_with_their_grid() {
        let grids = SkyGrids::new();
        let cfg = make_config(|cfg| {
            cfg.settings.hide(GridKind::Equatorial);
            cfg.settings.hide(GridKind::Ecliptic);
        });
        let chart = Chart::new(&grids, &cfg, None);
        let names: Vec<&str> = chart.layers.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["galactic", "horizon", "cardinal-directions"]);

        let cfg = make_config(|cfg| cfg.settings.horizontal_grid = true);
        let chart = Chart::new(&grids, &cfg, None);
        assert!(chart.layers.iter().any(|l| l.name() == "horizontal-poles"));
    }

    #[test]
    fn cardinal_directions_follow_the_horizon_toggle() {
        let grids = SkyGrids::new();
        let cfg = make_config(|cfg| cfg.settings.horizon_line = false);
        let chart = Chart::new(&grids, &cfg, None);
        assert!(chart.layers.iter().all(|l| l.draw_order() < 50));
    }

    #[test]
    fn a_non_finite_layer_is_skipped_without_losing_the_others() {
        let grids = SkyGrids::new();
        let cfg = make_config(|cfg| {
            cfg.center = Horizontal::new(180.0, 5.0);
            cfg.settings.galactic_equator = false;
            cfg.settings.equatorial_grid = false;
            cfg.settings.ecliptic_line = false;
        });
        let layers: Vec<Box<dyn Layer>> = vec![
            Box::new(GridLayer::new(
                GridKind::Horizon,
                Stroke::new("line horizon", "#0f0"),
                50,
            )),
            Box::new(Broken),
        ];
        let chart = Chart::with_layers(&grids, &cfg, layers, None);
        assert_eq!(names(&chart), vec!["horizon"]);
    }

    #[test]
    fn document_embeds_css_and_one_group_per_layer() {
        let grids = SkyGrids::new();
        let cfg = make_config(|cfg| cfg.center = Horizontal::new(180.0, 5.0));
        let chart = Chart::new(&grids, &cfg, Some("/no/such/file.css".to_owned()));
        let text = chart.draw_document().to_string();
        assert!(text.contains("<style"));
        assert!(text.contains("clip-chart"));
        assert!(text.contains(r#"class="horizon""#));
        assert!(text.contains("<path"));
    }
}
