use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Reef site assessment CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "reefsite", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess deployment sites for a region
    Assess(AssessArgs),
}

#[derive(Args, Debug)]
pub struct AssessArgs {
    /// Criteria raster dataset (JSON container)
    #[arg(value_hint = ValueHint::FilePath)]
    pub dataset: PathBuf,

    /// Reef outline polygons (GeoJSON)
    #[arg(value_hint = ValueHint::FilePath)]
    pub reefs: PathBuf,

    /// Assessment config: criteria bounds and search parameters
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: PathBuf,

    /// Output site collection, defaults to "./sites.geojson"
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
