use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

use crate::grid::GridKind;

/// User-facing toggles and colors. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub equatorial_grid: bool,
    pub horizontal_grid: bool,
    pub ecliptic_line: bool,
    pub galactic_equator: bool,
    pub horizon_line: bool,

    pub label_equatorial_poles: bool,
    pub label_horizontal_poles: bool,
    pub label_equinox_points: bool,
    pub label_lunar_nodes: bool,
    pub label_cardinal_directions: bool,

    pub color_equatorial_grid: String,
    pub color_horizontal_grid: String,
    pub color_ecliptic: String,
    pub color_galactic: String,
    pub color_horizon: String,
    pub color_cardinal_directions: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            equatorial_grid: true,
            horizontal_grid: false,
            ecliptic_line: true,
            galactic_equator: true,
            horizon_line: true,
            label_equatorial_poles: true,
            label_horizontal_poles: true,
            label_equinox_points: true,
            label_lunar_nodes: true,
            label_cardinal_directions: true,
            color_equatorial_grid: "#004040".to_owned(),
            color_horizontal_grid: "#006000".to_owned(),
            color_ecliptic: "#808000".to_owned(),
            color_galactic: "#400040".to_owned(),
            color_horizon: "#004000".to_owned(),
            color_cardinal_directions: "#009999".to_owned(),
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing settings JSON")
    }

    pub fn load(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
        Self::from_json(&text)
    }

    /// Turn off the grid or line of the given kind.
    pub fn hide(&mut self, kind: GridKind) {
        let toggle = match kind {
            GridKind::Equatorial => &mut self.equatorial_grid,
            GridKind::Horizontal => &mut self.horizontal_grid,
            GridKind::Ecliptic => &mut self.ecliptic_line,
            GridKind::Galactic => &mut self.galactic_equator,
            GridKind::Horizon => &mut self.horizon_line,
        };
        *toggle = false;
    }

    /// Freeze the colors into a snapshot handed to the layers for one frame.
    pub fn style(&self) -> Style {
        Style {
            equatorial: Stroke::new("grid equatorial", &self.color_equatorial_grid),
            horizontal: Stroke::new("grid horizontal", &self.color_horizontal_grid),
            ecliptic: Stroke::new("line ecliptic", &self.color_ecliptic),
            galactic: Stroke::new("line galactic", &self.color_galactic),
            horizon: Stroke::new("line horizon", &self.color_horizon),
            cardinal: Stroke::new("cardinal", &self.color_cardinal_directions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub class: String,
    pub color: String,
}

impl Stroke {
    pub fn new(class: &str, color: &str) -> Self {
        Self {
            class: class.to_owned(),
            color: color.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub equatorial: Stroke,
    pub horizontal: Stroke,
    pub ecliptic: Stroke,
    pub galactic: Stroke,
    pub horizon: Stroke,
    pub cardinal: Stroke,
}
