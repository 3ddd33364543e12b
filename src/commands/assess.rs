use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::{AssessArgs, Cli};
use crate::config::AssessConfig;
use crate::io::{GEOJSON_EPSG, read_criteria_grid, read_reef_outlines, write_sites};
use crate::reef::ReefOutlineStore;
use crate::site::{Engine, filter_overlaps};

pub fn run(cli: &Cli, args: &AssessArgs) -> Result<()> {
    let output = args.output.as_deref().unwrap_or(Path::new("sites.geojson"));

    if cli.verbose > 0 {
        eprintln!(
            "[assess] dataset={} reefs={} -> {}",
            args.dataset.display(),
            args.reefs.display(),
            output.display()
        );
    }

    let config = AssessConfig::from_path(&args.config)?;
    let grid = read_criteria_grid(&args.dataset)?;
    let reef_bytes = std::fs::read(&args.reefs)
        .with_context(|| format!("Failed to read reef outlines {}", args.reefs.display()))?;
    let store = ReefOutlineStore::new(read_reef_outlines(&reef_bytes)?, GEOJSON_EPSG);

    let engine = Engine::new(&grid, &store, &config)?;
    let pixels = engine.suitable_pixels();
    tracing::info!(pixels = pixels.len(), outlines = store.len(), "assessing candidate pixels");

    let candidates = engine.find_sites(&pixels, config.align_to_edges);
    let mut sites = filter_overlaps(candidates);
    sites.retain_min_score(config.min_score);
    tracing::info!(sites = sites.len(), "retained non-overlapping sites");

    let bytes = write_sites(&sites)?;
    std::fs::write(output, bytes)
        .with_context(|| format!("Failed to write sites to {}", output.display()))?;
    println!("Wrote {} sites -> {}", sites.len(), output.display());
    Ok(())
}
