// Visible runs along columns (bounded) and rows (wrapping at 23 -> 0)

use crate::context::{SkyContext, ViewContext};
use crate::geometry::angular_separation;
use crate::grid::visibility::{VISIBILITY_MARGIN, is_visible};
use crate::grid::{COLUMNS, CelestialGrid};
use crate::types::{GridPoint, Horizontal};

/// Reference latitudes for meridian runs never go closer to the poles than this.
const REFERENCE_LAT_LIMIT: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Column(usize),
    Row(usize),
}

#[derive(Debug, Clone)]
pub struct Run {
    pub kind: RunKind,
    pub points: Vec<GridPoint>,
    /// A row run covering all 24 columns.
    pub closed: bool,
    /// Extrapolated directions before the first and after the last point.
    /// Absent for closed runs.
    pub refs: Option<[Horizontal; 2]>,
}

/// Per-frame horizontal positions and visibility of every grid point.
struct Snapshot {
    horizontal: Vec<Horizontal>,
    visible: Vec<bool>,
}

impl Snapshot {
    fn new(grid: &CelestialGrid, sky: &SkyContext, view: &ViewContext) -> Self {
        let horizontal: Vec<Horizontal> = grid
            .points()
            .iter()
            .map(|p| grid.to_horizontal(p.coord, sky))
            .collect();
        let visible = horizontal.iter().map(|&h| is_visible(h, view)).collect();
        Self {
            horizontal,
            visible,
        }
    }

    fn is_visible(&self, p: &GridPoint) -> bool {
        self.visible[p.row * COLUMNS + p.column]
    }
}

/// Split a sequence into maximal runs of points passing `keep`.
pub fn split_runs<'a>(
    points: impl IntoIterator<Item = &'a GridPoint>,
    keep: impl Fn(&GridPoint) -> bool,
) -> Vec<Vec<GridPoint>> {
    let mut runs = Vec::new();
    let mut run: Vec<GridPoint> = Vec::new();
    for p in points {
        if keep(p) {
            run.push(*p);
        } else if !run.is_empty() {
            runs.push(std::mem::take(&mut run));
        }
    }
    if !run.is_empty() {
        runs.push(run);
    }
    runs
}

/// Join the run ending at column 23 with the run starting at column 0.
pub fn merge_wrapped(mut runs: Vec<Vec<GridPoint>>) -> Vec<Vec<GridPoint>> {
    let head = runs
        .iter()
        .position(|r| r.first().is_some_and(|p| p.column == 0));
    let tail = runs
        .iter()
        .position(|r| r.last().is_some_and(|p| p.column == COLUMNS - 1));
    if let (Some(head), Some(tail)) = (head, tail) {
        if head != tail {
            let head_run = runs.remove(head);
            let tail = if head < tail { tail - 1 } else { tail };
            runs[tail].extend(head_run);
        }
    }
    runs
}

/// Widen a meridian run by one row at each end where the neighbor exists.
pub fn extend_column(grid: &CelestialGrid, run: &mut Vec<GridPoint>) {
    let (Some(&first), Some(&last)) = (run.first(), run.last()) else {
        return;
    };
    if first.row > 0 {
        run.insert(0, *grid.point(first.row - 1, first.column));
    }
    if last.row + 1 < grid.rows() {
        run.push(*grid.point(last.row + 1, last.column));
    }
}

/// Widen a parallel run by one column at each end, wrapping 23 <-> 0.
pub fn extend_row(grid: &CelestialGrid, run: &mut Vec<GridPoint>) {
    let (Some(&first), Some(&last)) = (run.first(), run.last()) else {
        return;
    };
    let before = (first.column + COLUMNS - 1) % COLUMNS;
    let after = (last.column + 1) % COLUMNS;
    run.insert(0, *grid.point(first.row, before));
    run.push(*grid.point(last.row, after));
}

fn column_refs(
    grid: &CelestialGrid,
    run: &[GridPoint],
    sky: &SkyContext,
    view: &ViewContext,
) -> [Horizontal; 2] {
    let reach = view.view_angle * VISIBILITY_MARGIN;
    let center = grid.from_horizontal(view.center, sky);
    [-reach, reach].map(|offset| {
        let mut c = center;
        c.lon_deg = run[0].coord.lon_deg;
        c.lat_deg = (c.lat_deg + offset).clamp(-REFERENCE_LAT_LIMIT, REFERENCE_LAT_LIMIT);
        grid.to_horizontal(c, sky)
    })
}

fn row_refs(
    grid: &CelestialGrid,
    run: &[GridPoint],
    sky: &SkyContext,
    view: &ViewContext,
) -> [Horizontal; 2] {
    let reach = view.view_angle * VISIBILITY_MARGIN;
    let center = grid.from_horizontal(view.center, sky);
    [-reach, reach].map(|offset| {
        let mut c = center;
        c.lon_deg += offset;
        c.lat_deg = run[0].coord.lat_deg;
        grid.to_horizontal(c, sky)
    })
}

fn column_run(
    grid: &CelestialGrid,
    column: usize,
    mut points: Vec<GridPoint>,
    sky: &SkyContext,
    view: &ViewContext,
) -> Run {
    extend_column(grid, &mut points);
    let refs = column_refs(grid, &points, sky, view);
    Run {
        kind: RunKind::Column(column),
        points,
        closed: false,
        refs: Some(refs),
    }
}

fn row_run(
    grid: &CelestialGrid,
    row: usize,
    mut points: Vec<GridPoint>,
    sky: &SkyContext,
    view: &ViewContext,
) -> Run {
    if points.len() == COLUMNS {
        return Run {
            kind: RunKind::Row(row),
            points,
            closed: true,
            refs: None,
        };
    }
    extend_row(grid, &mut points);
    let refs = row_refs(grid, &points, sky, view);
    Run {
        kind: RunKind::Row(row),
        points,
        closed: false,
        refs: Some(refs),
    }
}

/// Extract every run of `grid` that should be drawn for this view.
///
/// When no grid point is visible at all (deep zoom between grid nodes), the
/// point closest to the view center seeds one row run and one column run so
/// the grid never silently disappears.
pub fn extract_runs(grid: &CelestialGrid, sky: &SkyContext, view: &ViewContext) -> Vec<Run> {
    let snapshot = Snapshot::new(grid, sky, view);
    let mut out = Vec::new();

    for column in 0..COLUMNS {
        for points in split_runs(grid.column(column), |p| snapshot.is_visible(p)) {
            out.push(column_run(grid, column, points, sky, view));
        }
    }

    for row in 0..grid.rows() {
        let runs = merge_wrapped(split_runs(grid.row(row), |p| snapshot.is_visible(p)));
        for points in runs {
            out.push(row_run(grid, row, points, sky, view));
        }
    }

    if out.is_empty() {
        if let Some(closest) = closest_point(grid, &snapshot, view) {
            out.push(row_run(grid, closest.row, vec![closest], sky, view));
            out.push(column_run(grid, closest.column, vec![closest], sky, view));
        }
    }

    out
}

fn closest_point(grid: &CelestialGrid, snapshot: &Snapshot, view: &ViewContext) -> Option<GridPoint> {
    grid.points()
        .iter()
        .zip(&snapshot.horizontal)
        .map(|(p, &h)| (p, angular_separation(h, view.center)))
        .filter(|(_, d)| !d.is_nan())
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, _)| *p)
}
