mod bezier;
mod clip;
mod config;
mod data;
mod error;
mod path;
mod projection;
mod render;
mod scene;
mod types;

use crate::clip::ClipRegion;
use crate::config::ChartConfig;
use crate::data::{load_stars, load_track};
use crate::projection::Projection;
use crate::render::render_document;
use crate::scene::{
    build_grid, build_marker, build_stars, build_ticks, build_track, Element, GridSpec, Group,
    Plane, Scene, TickSpec,
};
use crate::types::{
    hours_to_degrees, parse_dms, parse_hms, sexagesimal_dms_to_degrees, sexagesimal_hms_to_hours,
    PlanarPoint, SphericalCoord,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

// Load the default css for embedding
const DEFAULT_CSS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/styles/chart.css"));

#[derive(Parser, Debug)]
#[command(name = "skymark")]
#[command(about = "Star charts as smooth vector curves", version)]
struct Args {
    /// Center RA either as hour:minute:second (e.g. "5:35:17.3") or decimal degrees ("83.821")
    #[arg(long = "ra", alias = "center-ra")]
    ra: String,

    /// Center Dec as degree:minute:second (e.g. "-5:23:28") or decimal degrees ("-5.391")
    #[arg(long = "dec", alias = "center-dec")]
    dec: String,

    /// Field of view along right ascension, degrees (0 derives it from --fov-dec)
    #[arg(long, default_value_t = 90.0)]
    fov_ra: f64,

    /// Field of view along declination, degrees (0 derives it from --fov-ra)
    #[arg(long, default_value_t = 0.0)]
    fov_dec: f64,

    /// Type of projection to draw, either azimuthalequidistant or cylindricalequidistant
    #[arg(long, default_value = "azimuthalequidistant")]
    projection: String,

    /// Canvas width in millimetres
    #[arg(long, default_value_t = 240.0)]
    width: f64,

    /// Canvas height in millimetres
    #[arg(long, default_value_t = 320.0)]
    height: f64,

    /// Margin around the canvas kept visible when clipping
    #[arg(long, default_value_t = 10.0)]
    margin: f64,

    /// RA gridlines step in degrees (e.g., 15)
    #[arg(long, default_value_t = 15.0)]
    step_ra_deg: f64,

    /// Dec gridlines step in degrees (e.g., 10)
    #[arg(long, default_value_t = 10.0)]
    step_dec_deg: f64,

    /// Sample spacing along grid lines, degrees
    #[arg(long, default_value_t = 2.0)]
    grid_density_deg: f64,

    /// Level the chart so the chord between two "ra,dec" points (decimal
    /// degrees) renders horizontal
    #[arg(long, num_args = 2, value_names = ["BEGIN", "END"])]
    level: Option<Vec<String>>,

    /// Star list CSV with id,ra,dec,mag columns in degrees, optionally gzipped
    #[arg(long)]
    stars: Option<String>,

    /// Track CSV with ra,dec columns in degrees, rendered as a smooth curve
    #[arg(long)]
    track: Option<String>,

    /// Name for the track group
    #[arg(long, default_value = "track")]
    track_name: String,

    /// Tick mark every Nth track point (0 disables ticks)
    #[arg(long, default_value_t = 0)]
    track_ticks: usize,

    /// Marker "ra,dec,radius_deg,label" drawn as a disk of that angular radius
    #[arg(long)]
    marker: Vec<String>,

    /// Label the grid steps with coordinate values
    #[arg(long)]
    ticks: bool,

    /// Declination of the parallel carrying the RA labels, degrees
    #[arg(long, default_value_t = 0.0)]
    tick_base_dec: f64,

    /// Right ascension of the meridian carrying the Dec labels, degrees
    #[arg(long, default_value_t = 0.0)]
    tick_base_ra: f64,

    /// Optional CSS override file path; if omitted embedded CSS is used
    #[arg(long)]
    css: Option<String>,

    /// Output SVG path
    #[arg(short = 'o', long = "out")]
    out: String,
}

fn parse_ra_deg(s: &str) -> Result<f64> {
    if s.contains(':') {
        let (h, m, sec) = parse_hms(s).ok_or_else(|| anyhow!("bad RA HMS: {s}"))?;
        let hours = sexagesimal_hms_to_hours(h, m, sec);
        Ok(hours_to_degrees(hours).rem_euclid(360.0))
    } else {
        let deg: f64 = s.parse().context("RA must be HMS or degrees")?;
        Ok(deg.rem_euclid(360.0))
    }
}

fn parse_dec_deg(s: &str) -> Result<f64> {
    if s.contains(':') {
        let (d, m, sec) = parse_dms(s).ok_or_else(|| anyhow!("bad Dec DMS: {s}"))?;
        Ok(sexagesimal_dms_to_degrees(d, m, sec))
    } else {
        let deg: f64 = s.parse().context("Dec must be DMS or degrees")?;
        Ok(deg)
    }
}

fn parse_pair(s: &str) -> Result<SphericalCoord> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        bail!("expected 'ra,dec' in decimal degrees, got '{s}'");
    }
    let ra: f64 = parts[0].trim().parse().context("ra must be decimal degrees")?;
    let dec: f64 = parts[1].trim().parse().context("dec must be decimal degrees")?;
    Ok(SphericalCoord::from_degrees(ra.rem_euclid(360.0), dec))
}

fn parse_marker(s: &str) -> Result<(SphericalCoord, f64, String)> {
    let parts: Vec<&str> = s.splitn(4, ',').collect();
    if parts.len() != 4 {
        bail!("expected 'ra,dec,radius_deg,label', got '{s}'");
    }
    let pos = parse_pair(&format!("{},{}", parts[0], parts[1]))?;
    let radius: f64 = parts[2]
        .trim()
        .parse()
        .context("marker radius must be decimal degrees")?;
    Ok((pos, radius, parts[3].trim().to_string()))
}

fn load_css_text(path: Option<&str>) -> String {
    if let Some(p) = path {
        if let Ok(text) = std::fs::read_to_string(p) {
            return text;
        }
    }
    // Embedded fallback
    DEFAULT_CSS.to_owned()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let ra_deg = parse_ra_deg(&args.ra)?;
    let dec_deg = parse_dec_deg(&args.dec)?;

    let level = match &args.level {
        Some(pair) => Some((parse_pair(&pair[0])?, parse_pair(&pair[1])?)),
        None => None,
    };

    let cfg = ChartConfig {
        center: SphericalCoord::from_degrees(ra_deg, dec_deg),
        fov: SphericalCoord::from_degrees(args.fov_ra, args.fov_dec),
        projection: args.projection.clone(),
        canvas: PlanarPoint::new(args.width, args.height),
        margin: args.margin,
        step_ra_deg: args.step_ra_deg,
        step_dec_deg: args.step_dec_deg,
        grid_density_deg: args.grid_density_deg,
        level,
    };

    let mut projection = Projection::create(&cfg.projection, cfg.canvas, cfg.fov, cfg.center)?;
    if let Some((begin, end)) = cfg.level {
        projection.rotate_to_level(begin, end)?;
    }
    let clip = ClipRegion::for_canvas(cfg.canvas, cfg.margin);

    let mut scene = Scene::new();

    {
        let mut gr = Group::new("rectangle", "background");
        gr.elements.push(Element::Rect {
            start: PlanarPoint::new(-cfg.canvas.x / 2.0, -cfg.canvas.y / 2.0),
            size: cfg.canvas,
        });
        scene.add_group(gr);
    }

    if let Some(path) = &args.stars {
        let stars = load_stars(path).with_context(|| format!("loading stars from {path}"))?;
        scene.add_group(build_stars(path, &projection, &stars));
    }

    if let Some(path) = &args.track {
        let coords = load_track(path).with_context(|| format!("loading track from {path}"))?;
        scene.add_group(build_track(
            &projection,
            &clip,
            &args.track_name,
            &coords,
            args.track_ticks,
        ));
    }

    scene.add_group(build_grid(
        &projection,
        &clip,
        &GridSpec {
            name: "meridians".to_string(),
            plane: Plane::Meridian,
            start: -90.0,
            end: 90.0,
            step: cfg.step_ra_deg,
            density: cfg.grid_density_deg,
        },
    ));
    scene.add_group(build_grid(
        &projection,
        &clip,
        &GridSpec {
            name: "parallels".to_string(),
            plane: Plane::Parallel,
            start: -80.0,
            end: 80.0,
            step: cfg.step_dec_deg,
            density: cfg.grid_density_deg,
        },
    ));

    if args.ticks {
        scene.add_group(build_ticks(
            &projection,
            &TickSpec {
                name: "ra-labels".to_string(),
                plane: Plane::Parallel,
                base: args.tick_base_dec,
                start: 0.0,
                end: 359.9,
                step: cfg.step_ra_deg,
                as_hours: true,
            },
        ));
        scene.add_group(build_ticks(
            &projection,
            &TickSpec {
                name: "dec-labels".to_string(),
                plane: Plane::Meridian,
                base: args.tick_base_ra,
                start: -80.0,
                end: 80.0,
                step: cfg.step_dec_deg,
                as_hours: false,
            },
        ));
    }

    if !args.marker.is_empty() {
        let mut gr = Group::new("markers", "markers");
        for m in &args.marker {
            let (pos, radius_deg, label) = parse_marker(m)?;
            if let Some(el) = build_marker(&projection, pos, radius_deg, &label) {
                gr.elements.push(el);
            }
        }
        scene.add_group(gr);
    }

    let css = load_css_text(args.css.as_deref());
    let doc = render_document(&scene, cfg.canvas, cfg.margin, &css);
    svg::save(&args.out, &doc).with_context(|| format!("writing {}", args.out))?;

    Ok(())
}

#[cfg(test)]
mod test_utils;
