use anyhow::Context;
use clap::Parser;
use orrery::config::load_bodies;
use orrery::export::scene::{ORBITS_ROOT, SceneDescription};
use orrery::export::writer_for_path;
use orrery::orbits::CurveResolution;
use std::path::PathBuf;

#[path = "common/logging.rs"]
mod logging;

/// Emit display curves for every orbit in a catalog as a JSON scene description.
#[derive(Parser, Debug)]
#[command(
    author,
    version = orrery::version(),
    about = "Orbit display curves for a body catalog"
)]
struct Cli {
    /// Body catalog: YAML list, TOML record, or directory of TOML records
    #[arg(long, default_value = "configs/bodies")]
    catalog: PathBuf,

    /// Output path (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Use this many points for every curve instead of the eccentricity-based default
    #[arg(long)]
    fixed: Option<usize>,

    /// Multiplier applied to every vertex
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Only draw bodies in this catalog group
    #[arg(long)]
    group: Option<String>,

    /// Root node the orbit curves hang under
    #[arg(long, default_value = ORBITS_ROOT)]
    root: String,

    /// Parent curves to the root instead of one node per catalog group
    #[arg(long, default_value_t = false)]
    flat: bool,

    /// Include a circular reference orbit of radius 1
    #[arg(long, default_value_t = false)]
    reference: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let bodies = load_bodies(&cli.catalog)
        .with_context(|| format!("failed to load catalog {}", cli.catalog.display()))?;
    let resolution = cli
        .fixed
        .map_or(CurveResolution::Adaptive, CurveResolution::Fixed);

    let mut scene = SceneDescription::with_root(&cli.root);
    if cli.reference {
        scene.add_reference_orbit(1.0, resolution, cli.scale)?;
    }
    for (idx, body) in bodies.iter().enumerate() {
        if let Some(group) = &cli.group {
            if body.group.as_deref() != Some(group.as_str()) {
                continue;
            }
        }
        let orbit = body.to_named_orbit()?;
        if cli.flat {
            scene.add_orbit(idx + 1, &orbit, resolution, cli.scale)?;
        } else {
            scene.add_grouped_orbit(
                idx + 1,
                &orbit,
                body.group.as_deref(),
                resolution,
                cli.scale,
            )?;
        }
        tracing::debug!(body = %orbit.name, "curve added");
    }

    let writer = writer_for_path(&cli.output)
        .with_context(|| format!("failed to open {}", cli.output.display()))?;
    scene.write_to(writer)?;
    Ok(())
}
