// Rows x 24 grids: columns wrap, rows do not

use phf::phf_map;

use crate::astro::{
    ecliptic_to_equatorial, equatorial_to_ecliptic, equatorial_to_galactic,
    equatorial_to_horizontal, galactic_to_equatorial, horizontal_to_equatorial,
};
use crate::context::SkyContext;
use crate::types::{Coord, GridPoint, Horizontal};

pub mod segments;
pub mod visibility;

pub const COLUMNS: usize = 24;
pub const COLUMN_STEP_DEG: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Equatorial,
    Horizontal,
    Ecliptic,
    Galactic,
}

impl Frame {
    pub fn to_horizontal(self, c: Coord, sky: &SkyContext) -> Horizontal {
        let eq = match self {
            Frame::Horizontal => {
                return Horizontal {
                    az_deg: c.lon_deg,
                    alt_deg: c.lat_deg,
                };
            }
            Frame::Equatorial => c,
            Frame::Ecliptic => ecliptic_to_equatorial(c, sky.obliquity_deg),
            Frame::Galactic => galactic_to_equatorial(c),
        };
        equatorial_to_horizontal(eq, sky.lst_deg, sky.latitude_deg)
    }

    pub fn from_horizontal(self, h: Horizontal, sky: &SkyContext) -> Coord {
        if self == Frame::Horizontal {
            return Coord {
                lon_deg: h.az_deg,
                lat_deg: h.alt_deg,
            };
        }
        let eq = horizontal_to_equatorial(h, sky.lst_deg, sky.latitude_deg);
        match self {
            Frame::Ecliptic => equatorial_to_ecliptic(eq, sky.obliquity_deg),
            Frame::Galactic => equatorial_to_galactic(eq),
            _ => eq,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    Equatorial,
    Horizontal,
    Ecliptic,
    Galactic,
    Horizon,
}

static GRID_KINDS: phf::Map<&'static str, GridKind> = phf_map! {
    "equatorial" => GridKind::Equatorial,
    "horizontal" => GridKind::Horizontal,
    "ecliptic" => GridKind::Ecliptic,
    "galactic" => GridKind::Galactic,
    "horizon" => GridKind::Horizon,
};

impl GridKind {
    pub fn from_name(name: &str) -> Option<Self> {
        GRID_KINDS.get(name.to_lowercase().as_str()).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            GridKind::Equatorial => "equatorial",
            GridKind::Horizontal => "horizontal",
            GridKind::Ecliptic => "ecliptic",
            GridKind::Galactic => "galactic",
            GridKind::Horizon => "horizon",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CelestialGrid {
    pub name: &'static str,
    pub frame: Frame,
    rows: usize,
    points: Vec<GridPoint>,
}

impl CelestialGrid {
    /// Build a grid with one row per latitude and 24 columns at 15° steps.
    pub fn new(name: &'static str, frame: Frame, latitudes: &[f64]) -> Self {
        let mut points = Vec::with_capacity(latitudes.len() * COLUMNS);
        for (row, &lat_deg) in latitudes.iter().enumerate() {
            for column in 0..COLUMNS {
                points.push(GridPoint {
                    row,
                    column,
                    coord: Coord {
                        lon_deg: column as f64 * COLUMN_STEP_DEG,
                        lat_deg,
                    },
                });
            }
        }
        Self {
            name,
            frame,
            rows: latitudes.len(),
            points,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub fn point(&self, row: usize, column: usize) -> &GridPoint {
        &self.points[row * COLUMNS + column]
    }

    pub fn row(&self, row: usize) -> &[GridPoint] {
        &self.points[row * COLUMNS..(row + 1) * COLUMNS]
    }

    pub fn column(&self, column: usize) -> impl Iterator<Item = &GridPoint> + '_ {
        self.points.iter().skip(column).step_by(COLUMNS)
    }

    pub fn to_horizontal(&self, c: Coord, sky: &SkyContext) -> Horizontal {
        self.frame.to_horizontal(c, sky)
    }

    pub fn from_horizontal(&self, h: Horizontal, sky: &SkyContext) -> Coord {
        self.frame.from_horizontal(h, sky)
    }
}

/// The grids the renderer knows about, built once and read every frame.
#[derive(Debug, Clone)]
pub struct SkyGrids {
    pub equatorial: CelestialGrid,
    pub horizontal: CelestialGrid,
    pub ecliptic: CelestialGrid,
    pub galactic: CelestialGrid,
    pub horizon: CelestialGrid,
}

impl Default for SkyGrids {
    fn default() -> Self {
        Self::new()
    }
}

impl SkyGrids {
    pub fn new() -> Self {
        let parallels: Vec<f64> = (-8..=8).map(|i| i as f64 * 10.0).collect();
        Self {
            equatorial: CelestialGrid::new("equatorial", Frame::Equatorial, &parallels),
            horizontal: CelestialGrid::new("horizontal", Frame::Horizontal, &parallels),
            ecliptic: CelestialGrid::new("ecliptic", Frame::Ecliptic, &[0.0]),
            galactic: CelestialGrid::new("galactic", Frame::Galactic, &[0.0]),
            horizon: CelestialGrid::new("horizon", Frame::Horizontal, &[0.0]),
        }
    }

    pub fn get(&self, kind: GridKind) -> &CelestialGrid {
        match kind {
            GridKind::Equatorial => &self.equatorial,
            GridKind::Horizontal => &self.horizontal,
            GridKind::Ecliptic => &self.ecliptic,
            GridKind::Galactic => &self.galactic,
            GridKind::Horizon => &self.horizon,
        }
    }
}
