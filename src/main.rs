mod astro;
mod backend;
mod chart;
mod classify;
mod clip;
mod config;
mod context;
mod error;
mod fit;
mod geometry;
mod grid;
mod layers;
mod settings;
mod types;

use crate::astro::jd_from_unix_seconds;
use crate::chart::Chart;
use crate::config::RenderConfig;
use crate::grid::{GridKind, SkyGrids};
use crate::settings::Settings;
use crate::types::{Horizontal, Projection, parse_dms, sexagesimal_dms_to_degrees};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "graticule")]
#[command(about = "Coordinate grids and reference lines for a sky view", version)]
struct Args {
    /// View center azimuth, from north through east, as degree:minute:second or decimal degrees
    #[arg(long, default_value = "180", allow_hyphen_values = true)]
    az: String,

    /// View center altitude as degree:minute:second (e.g. "-5:23:28") or decimal degrees
    #[arg(long, default_value = "30", allow_hyphen_values = true)]
    alt: String,

    /// Field of view across the screen diagonal (in degrees)
    #[arg(long, default_value_t = 90.0)]
    fov: f64,

    /// Observer latitude, degrees north
    #[arg(long, default_value = "51.48", allow_hyphen_values = true)]
    lat: String,

    /// Observer longitude, degrees east
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    lon: String,

    /// Julian date of the observation; defaults to now
    #[arg(long)]
    jd: Option<f64>,

    /// Type of projection to draw, either stereographic or equidistant
    #[arg(long, default_value = "stereographic")]
    projection: String,

    /// Output image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Output image height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Output SVG path
    #[arg(short = 'o', long = "out")]
    out: String,

    /// Optional CSS override file path; if omitted embedded CSS is used
    #[arg(long)]
    css: Option<String>,

    /// Optional JSON file with grid toggles and colors
    #[arg(long)]
    settings: Option<String>,

    /// Grid or line to leave out (equatorial, horizontal, ecliptic, galactic, horizon); repeatable
    #[arg(long)]
    hide: Vec<String>,
}

fn parse_angle_deg(s: &str, what: &str) -> Result<f64> {
    if s.contains(':') {
        let (d, m, sec) = parse_dms(s).ok_or_else(|| anyhow!("bad {what} DMS: {s}"))?;
        Ok(sexagesimal_dms_to_degrees(d, m, sec))
    } else {
        s.trim()
            .parse()
            .with_context(|| format!("{what} must be DMS or degrees"))
    }
}

fn parse_projection(s: &str) -> Result<Projection> {
    Projection::from_str(&s.to_lowercase())
        .ok_or_else(|| anyhow!("invalid projection '{s}'. Use: stereographic | equidistant"))
}

fn now_jd() -> Result<f64> {
    let since = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before 1970")?;
    Ok(jd_from_unix_seconds(since.as_secs_f64()))
}

fn build_config(args: &Args) -> Result<RenderConfig> {
    let az_deg = parse_angle_deg(&args.az, "azimuth")?.rem_euclid(360.0);
    let alt_deg = parse_angle_deg(&args.alt, "altitude")?;
    if !(-90.0..=90.0).contains(&alt_deg) {
        return Err(anyhow!("altitude {alt_deg} is outside -90..90"));
    }
    if !(args.fov > 0.0 && args.fov < 360.0) {
        return Err(anyhow!("field of view must be between 0 and 360 degrees"));
    }

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    for name in &args.hide {
        let kind = GridKind::from_name(name).ok_or_else(|| anyhow!("unknown grid '{name}'"))?;
        settings.hide(kind);
    }

    Ok(RenderConfig {
        center: Horizontal::new(az_deg, alt_deg),
        projection: parse_projection(&args.projection)?,
        fov_deg: args.fov,
        width: args.width,
        height: args.height,
        latitude_deg: parse_angle_deg(&args.lat, "latitude")?,
        longitude_deg: parse_angle_deg(&args.lon, "longitude")?,
        jd: match args.jd {
            Some(jd) => jd,
            None => now_jd()?,
        },
        settings,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = build_config(&args)?;

    let grids = SkyGrids::new();
    let chart = Chart::new(&grids, &cfg, args.css.clone());
    chart
        .to_file(&args.out)
        .with_context(|| format!("writing {}", args.out))?;

    info!(out = %args.out, jd = cfg.jd, fov = cfg.fov_deg, "chart written");
    Ok(())
}

#[cfg(test)]
mod test_utils;
