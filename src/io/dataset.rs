use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use ndarray::Array2;
use serde::Deserialize;

use crate::grid::SuitabilityGrid;

/// On-disk JSON container for a region's criteria rasters: georeferencing
/// plus one row-major value array per criterion.
#[derive(Deserialize)]
struct RawDataset {
    epsg: u32,
    west: f64,
    north: f64,
    resolution: f64,
    shape: [usize; 2],
    layers: HashMap<String, Vec<f64>>,
}

/// Read a criteria grid from a JSON dataset file.
pub fn read_criteria_grid(path: &Path) -> Result<SuitabilityGrid> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read criteria dataset {}", path.display()))?;
    let raw: RawDataset =
        serde_json::from_slice(&bytes).context("Failed to parse criteria dataset")?;

    let [rows, cols] = raw.shape;
    let mut layers = HashMap::new();
    for (name, values) in raw.layers {
        if values.len() != rows * cols {
            bail!("Layer `{name}` has {} values, expected {}", values.len(), rows * cols);
        }
        let layer = Array2::from_shape_vec((rows, cols), values)
            .with_context(|| format!("Layer `{name}` does not match the declared shape"))?;
        layers.insert(name, layer);
    }

    Ok(SuitabilityGrid::new(raw.epsg, raw.west, raw.north, raw.resolution, layers)?)
}
