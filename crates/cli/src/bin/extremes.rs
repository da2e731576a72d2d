use anyhow::{Context, bail};
use clap::Parser;
use orrery::config::{BodyConfig, ScenarioConfig, load_bodies, load_scenario, resolve_pairs};
use orrery::export::distances::{DistanceRow, write_rows};
use orrery::export::scene::SceneDescription;
use orrery::export::table::render_summary;
use orrery::export::writer_for_path;
use orrery::extremes::{ExtremalSolver, SolverConfig};
use orrery::orbits::{CurveResolution, NamedOrbit};
use std::path::{Path, PathBuf};

#[path = "common/logging.rs"]
mod logging;

/// Compute the closest and farthest approach for pairs of catalog orbits.
#[derive(Parser, Debug)]
#[command(
    author,
    version = orrery::version(),
    about = "Closest and farthest approach between pairs of Keplerian orbits"
)]
struct Cli {
    /// Scenario file (TOML or YAML) naming a catalog and the pairs to analyse
    #[arg(long, conflicts_with_all = ["catalog", "pairs"])]
    scenario: Option<PathBuf>,

    /// Body catalog: YAML list, TOML record, or directory of TOML records
    #[arg(long, default_value = "configs/bodies")]
    catalog: PathBuf,

    /// Pair to analyse as `A:B` (repeatable, names are case-insensitive)
    #[arg(long = "pair", value_parser = parse_pair)]
    pairs: Vec<(String, String)>,

    /// Samples per orbit for the coarse grid (overrides the scenario)
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Write one CSV row per pair (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON scene description with orbit curves and extremal markers
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Length unit shown in the summary table
    #[arg(long, default_value = "AU")]
    unit: String,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((first, second)) if !first.trim().is_empty() && !second.trim().is_empty() => {
            Ok((first.trim().to_string(), second.trim().to_string()))
        }
        _ => Err(format!("expected a pair like Earth:Mars, got '{raw}'")),
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut scenario = match &cli.scenario {
        Some(path) => load_scenario(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => ScenarioConfig {
            catalog: cli.catalog.clone(),
            pairs: cli.pairs.clone(),
            solver: SolverConfig::default(),
            curve_resolution: CurveResolution::default(),
            curve_scale: 1.0,
            reference_orbit: false,
        },
    };
    if let Some(n) = cli.samples {
        scenario.solver.sample_count = n;
    }
    if scenario.pairs.is_empty() {
        bail!("nothing to analyse: pass --scenario or at least one --pair A:B");
    }

    let bodies = load_bodies(&scenario.catalog)
        .with_context(|| format!("failed to load catalog {}", scenario.catalog.display()))?;
    let pairs = resolve_pairs(&bodies, &scenario.pairs)?;
    let mut solver = ExtremalSolver::new(scenario.solver)?;

    let mut scene = SceneDescription::new();
    if scenario.reference_orbit {
        scene.add_reference_orbit(1.0, scenario.curve_resolution, scenario.curve_scale)?;
    }
    let mut drawn: Vec<&str> = Vec::new();
    let mut rows = Vec::with_capacity(pairs.len());

    for (first, second) in &pairs {
        for orbit in [first, second] {
            if !drawn.contains(&orbit.name.as_str()) {
                drawn.push(&orbit.name);
                scene.add_orbit(
                    catalog_index(&bodies, orbit),
                    orbit,
                    scenario.curve_resolution,
                    scenario.curve_scale,
                )?;
            }
        }

        let result = solver.extremes(first, second)?;
        tracing::info!(
            first = %first.name,
            second = %second.name,
            min = result.min_distance(),
            max = result.max_distance(),
            "pair solved"
        );
        scene.add_pair(&first.name, &second.name, &result, scenario.curve_scale);
        rows.push(DistanceRow::new(&first.name, &second.name, &result));
    }

    let summary = render_summary(&rows, &cli.unit);
    let csv_on_stdout = cli.csv.as_deref() == Some(Path::new("-"));
    if csv_on_stdout {
        eprint!("{summary}");
    } else {
        print!("{summary}");
    }

    if let Some(path) = &cli.csv {
        let writer = writer_for_path(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        write_rows(writer, &rows)?;
    }
    if let Some(path) = &cli.scene {
        scene
            .write_json(path)
            .with_context(|| format!("failed to write scene {}", path.display()))?;
        eprintln!("Scene description written to {}", path.display());
    }

    Ok(())
}

/// 1-based position in the catalog; 0 is reserved for the reference orbit.
fn catalog_index(bodies: &[BodyConfig], orbit: &NamedOrbit) -> usize {
    bodies
        .iter()
        .position(|b| b.name == orbit.name)
        .map_or(bodies.len() + 1, |idx| idx + 1)
}
