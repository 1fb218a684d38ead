//! Town Planner - Entry Point
//!
//! Command-line front end for the generator: reads population, area and an
//! optional class mix, generates a town, and writes the map as a PNG plus an
//! optional JSON report.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use town_planner::allocation::CategoryMix;
use town_planner::core::error::Result;
use town_planner::{generate, TownConfig, TownRequest};

/// Town Planner - generate a town map from population and area
#[derive(Parser, Debug)]
#[command(name = "town_planner")]
#[command(about = "Generate a synthetic town layout and render it to a PNG")]
struct Args {
    /// Number of residents
    #[arg(long)]
    population: u64,

    /// Land area in square kilometers
    #[arg(long)]
    area: f64,

    /// Class mix, e.g. "residential=0.5,commerce=0.2,industry=20%,recreation=0.1"
    #[arg(long)]
    mix: Option<String>,

    /// Random seed for reproducible layouts
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding generator constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the rendered map
    #[arg(long, short = 'o', default_value = "map.png")]
    output: PathBuf,

    /// Optional path for a JSON report of the allocation and layout
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log every allocation step and dropped building
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "town_planner=debug"
    } else {
        "town_planner=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => TownConfig::load(path)?,
        None => TownConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut request = TownRequest::new(args.population, args.area).with_seed(seed);
    if let Some(text) = &args.mix {
        request = request.with_mix(CategoryMix::parse(text)?);
    }

    let town = generate(&request, &config)?;
    let report = town.report();

    town.canvas.image().save(&args.output)?;
    tracing::info!(path = %args.output.display(), "map written");

    if let Some(path) = &args.report {
        fs::write(path, report.to_json()?)?;
        tracing::info!(path = %path.display(), "report written");
    }

    println!("=== Town Building Report ===");
    println!("{}", report.summary());
    println!("Seed: {}", seed);
    println!();
    print!("{}", report.breakdown());
    println!();
    println!("Map saved as {}", args.output.display());

    Ok(())
}
