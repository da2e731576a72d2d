use anyhow::Context;
use clap::Parser;
use orrery::config::{find_body, load_bodies};
use orrery::extremes::ExtremalSolver;
use orrery::extremes::solver::DEFAULT_MEDIAN_SAMPLE_COUNT;
use std::path::PathBuf;

#[path = "common/logging.rs"]
mod logging;

/// Typical separation between two orbits: the median over an `n × n` grid of sample pairs.
#[derive(Parser, Debug)]
#[command(
    author,
    version = orrery::version(),
    about = "Median distance between two Keplerian orbits"
)]
struct Cli {
    /// Body catalog: YAML list, TOML record, or directory of TOML records
    #[arg(long, default_value = "configs/bodies")]
    catalog: PathBuf,

    /// First body (case-insensitive)
    #[arg(long)]
    from: String,

    /// Second body (case-insensitive)
    #[arg(long)]
    to: String,

    /// Samples per orbit
    #[arg(short = 'n', long, default_value_t = DEFAULT_MEDIAN_SAMPLE_COUNT)]
    samples: usize,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let bodies = load_bodies(&cli.catalog)
        .with_context(|| format!("failed to load catalog {}", cli.catalog.display()))?;
    let first = find_body(&bodies, &cli.from)?.to_named_orbit()?;
    let second = find_body(&bodies, &cli.to)?.to_named_orbit()?;

    let median = ExtremalSolver::default().median_distance(&first, &second, cli.samples)?;
    println!(
        "Median distance {}-{}: {:.6} (n = {})",
        first.name, second.name, median, cli.samples
    );
    Ok(())
}
