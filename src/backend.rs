use svg::Node;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Line, Path, Text as TextEl};

use crate::error::RenderError;
use crate::settings::Stroke;
use crate::types::Point;

/// Spline tension for smooth curves through the run points.
const CURVE_TENSION: f64 = 0.5;
const CROSS_SIZE: f64 = 3.0;
const DOT_RADIUS: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Cross,
    Dot,
}

/// Drawing capability consumed by the layers.
pub trait DrawingBackend {
    fn draw_line(&mut self, stroke: &Stroke, from: Point, to: Point);
    fn draw_open_curve(&mut self, stroke: &Stroke, points: &[Point]);
    fn draw_closed_curve(&mut self, stroke: &Stroke, points: &[Point]);
    fn draw_marker(&mut self, stroke: &Stroke, at: Point, shape: MarkerShape);
    fn draw_label(&mut self, stroke: &Stroke, at: Point, text: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        stroke: Stroke,
        from: Point,
        to: Point,
    },
    OpenCurve {
        stroke: Stroke,
        points: Vec<Point>,
    },
    ClosedCurve {
        stroke: Stroke,
        points: Vec<Point>,
    },
    Marker {
        stroke: Stroke,
        at: Point,
        shape: MarkerShape,
    },
    Label {
        stroke: Stroke,
        at: Point,
        text: String,
    },
}

impl DrawCommand {
    fn is_finite(&self) -> bool {
        match self {
            DrawCommand::Line { from, to, .. } => from.is_finite() && to.is_finite(),
            DrawCommand::OpenCurve { points, .. } | DrawCommand::ClosedCurve { points, .. } => {
                points.iter().all(Point::is_finite)
            }
            DrawCommand::Marker { at, .. } | DrawCommand::Label { at, .. } => at.is_finite(),
        }
    }
}

/// Records draw calls so a layer's output can be checked before it is kept.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_finite(&self, layer: &str) -> Result<(), RenderError> {
        if self.commands.iter().all(DrawCommand::is_finite) {
            Ok(())
        } else {
            Err(RenderError::NonFinite {
                layer: layer.to_owned(),
            })
        }
    }

    pub fn replay(&self, out: &mut dyn DrawingBackend) {
        for c in &self.commands {
            match c {
                DrawCommand::Line { stroke, from, to } => out.draw_line(stroke, *from, *to),
                DrawCommand::OpenCurve { stroke, points } => out.draw_open_curve(stroke, points),
                DrawCommand::ClosedCurve { stroke, points } => {
                    out.draw_closed_curve(stroke, points)
                }
                DrawCommand::Marker { stroke, at, shape } => out.draw_marker(stroke, *at, *shape),
                DrawCommand::Label { stroke, at, text } => out.draw_label(stroke, *at, text),
            }
        }
    }
}

impl DrawingBackend for CommandBuffer {
    fn draw_line(&mut self, stroke: &Stroke, from: Point, to: Point) {
        self.commands.push(DrawCommand::Line {
            stroke: stroke.clone(),
            from,
            to,
        });
    }

    fn draw_open_curve(&mut self, stroke: &Stroke, points: &[Point]) {
        self.commands.push(DrawCommand::OpenCurve {
            stroke: stroke.clone(),
            points: points.to_vec(),
        });
    }

    fn draw_closed_curve(&mut self, stroke: &Stroke, points: &[Point]) {
        self.commands.push(DrawCommand::ClosedCurve {
            stroke: stroke.clone(),
            points: points.to_vec(),
        });
    }

    fn draw_marker(&mut self, stroke: &Stroke, at: Point, shape: MarkerShape) {
        self.commands.push(DrawCommand::Marker {
            stroke: stroke.clone(),
            at,
            shape,
        });
    }

    fn draw_label(&mut self, stroke: &Stroke, at: Point, text: &str) {
        self.commands.push(DrawCommand::Label {
            stroke: stroke.clone(),
            at,
            text: text.to_owned(),
        });
    }
}

/// Cubic Bézier control points of a cardinal spline through `points`.
/// Each entry is (control 1, control 2, end) for the segment ending at `end`.
pub fn cardinal_segments(points: &[Point], closed: bool) -> Vec<(Point, Point, Point)> {
    let n = points.len();
    if n < 2 {
        return vec![];
    }
    let at = |i: isize| -> Point {
        if closed {
            points[i.rem_euclid(n as isize) as usize]
        } else {
            points[i.clamp(0, n as isize - 1) as usize]
        }
    };
    let tangent = |i: isize| -> (f64, f64) {
        let (prev, next) = (at(i - 1), at(i + 1));
        (
            (next.x - prev.x) * CURVE_TENSION / 3.0,
            (next.y - prev.y) * CURVE_TENSION / 3.0,
        )
    };

    let segments = if closed { n } else { n - 1 };
    (0..segments as isize)
        .map(|i| {
            let (p0, p1) = (at(i), at(i + 1));
            let (t0, t1) = (tangent(i), tangent(i + 1));
            (
                Point::new(p0.x + t0.0, p0.y + t0.1),
                Point::new(p1.x - t1.0, p1.y - t1.1),
                p1,
            )
        })
        .collect()
}

fn curve_data(points: &[Point], closed: bool) -> Data {
    let mut d = Data::new().move_to((points[0].x, points[0].y));
    for (c1, c2, end) in cardinal_segments(points, closed) {
        d = d.cubic_curve_to((c1.x, c1.y, c2.x, c2.y, end.x, end.y));
    }
    if closed {
        d = d.close();
    }
    d
}

/// Writes draw calls into an SVG group.
pub struct SvgBackend {
    group: Group,
}

impl SvgBackend {
    pub fn new(class: &str) -> Self {
        Self {
            group: Group::new().set("class", class),
        }
    }

    pub fn into_group(self) -> Group {
        self.group
    }

    fn add_curve(&mut self, stroke: &Stroke, points: &[Point], closed: bool) {
        if points.len() < 2 {
            return;
        }
        let path = Path::new()
            .set("class", stroke.class.as_str())
            .set("stroke", stroke.color.as_str())
            .set("fill", "none")
            .set("d", curve_data(points, closed));
        self.group.append(path);
    }
}

impl DrawingBackend for SvgBackend {
    fn draw_line(&mut self, stroke: &Stroke, from: Point, to: Point) {
        self.group.append(
            Line::new()
                .set("class", stroke.class.as_str())
                .set("stroke", stroke.color.as_str())
                .set("x1", from.x)
                .set("y1", from.y)
                .set("x2", to.x)
                .set("y2", to.y),
        );
    }

    fn draw_open_curve(&mut self, stroke: &Stroke, points: &[Point]) {
        self.add_curve(stroke, points, false);
    }

    fn draw_closed_curve(&mut self, stroke: &Stroke, points: &[Point]) {
        self.add_curve(stroke, points, true);
    }

    fn draw_marker(&mut self, stroke: &Stroke, at: Point, shape: MarkerShape) {
        match shape {
            MarkerShape::Cross => {
                let s = CROSS_SIZE;
                for (dx1, dy1, dx2, dy2) in [(-s, -s, s, s), (-s, s, s, -s)] {
                    self.group.append(
                        Line::new()
                            .set("class", "marker")
                            .set("stroke", stroke.color.as_str())
                            .set("x1", at.x + dx1)
                            .set("y1", at.y + dy1)
                            .set("x2", at.x + dx2)
                            .set("y2", at.y + dy2),
                    );
                }
            }
            MarkerShape::Dot => {
                self.group.append(
                    Circle::new()
                        .set("class", "marker")
                        .set("fill", stroke.color.as_str())
                        .set("cx", at.x)
                        .set("cy", at.y)
                        .set("r", DOT_RADIUS),
                );
            }
        }
    }

    fn draw_label(&mut self, stroke: &Stroke, at: Point, text: &str) {
        self.group.append(
            TextEl::new(text)
                .set("class", "label")
                .set("fill", stroke.color.as_str())
                .set("x", at.x)
                .set("y", at.y),
        );
    }
}
