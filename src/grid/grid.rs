use std::collections::HashMap;
use std::ops::Range;

use geo::{BoundingRect, Contains, Point, Polygon, Rect};
use ndarray::Array2;

use crate::config::CriterionBounds;
use crate::error::EngineError;

/// Gridded environmental criteria over a geographic extent. Rows run
/// north to south; cell (0, 0) sits at the northwest corner. All layers
/// share one shape, resolution, and CRS.
#[derive(Debug, Clone)]
pub struct SuitabilityGrid {
    epsg: u32,
    west: f64,
    north: f64,
    resolution: f64, // square cell size, in degrees
    shape: (usize, usize),
    layers: HashMap<String, Array2<f64>>,
}

impl SuitabilityGrid {
    /// Construct a grid from named criterion layers. Fails when the
    /// resolution is non-positive or any layer disagrees on shape.
    pub fn new(
        epsg: u32,
        west: f64,
        north: f64,
        resolution: f64,
        layers: HashMap<String, Array2<f64>>,
    ) -> Result<Self, EngineError> {
        if !(resolution > 0.0) {
            return Err(EngineError::InvalidResolution(resolution));
        }
        let shape = layers.values().next().map(|layer| layer.dim()).unwrap_or((0, 0));
        for (name, layer) in &layers {
            if layer.dim() != shape {
                return Err(EngineError::LayerShape {
                    name: name.clone(),
                    expected: shape,
                    found: layer.dim(),
                });
            }
        }
        Ok(Self { epsg, west, north, resolution, shape, layers })
    }

    /// Get the EPSG code of the grid's CRS.
    #[inline] pub fn epsg(&self) -> u32 { self.epsg }

    /// Get the cell size in degrees.
    #[inline] pub fn resolution(&self) -> f64 { self.resolution }

    /// Get the (rows, cols) shape shared by all layers.
    #[inline] pub fn shape(&self) -> (usize, usize) { self.shape }

    /// Center coordinate of a cell, as (lon, lat).
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.west + (col as f64 + 0.5) * self.resolution,
            self.north - (row as f64 + 0.5) * self.resolution,
        )
    }

    /// Point query: the value of one criterion at a cell, if in range.
    pub fn value(&self, criterion: &str, row: usize, col: usize) -> Option<f64> {
        self.layers.get(criterion).and_then(|layer| layer.get((row, col)).copied())
    }

    /// Evaluate the suitability predicate cell-by-cell: a cell is suitable
    /// when every criterion lies within its bounds. Unknown criterion names
    /// and inverted bounds fail before any scoring work starts.
    pub fn suitability_mask(&self, criteria: &[CriterionBounds]) -> Result<Array2<bool>, EngineError> {
        let mut mask = Array2::from_elem(self.shape, true);
        for bounds in criteria {
            bounds.validate()?;
            let layer = self
                .layers
                .get(&bounds.name)
                .ok_or_else(|| EngineError::UnknownCriterion(bounds.name.clone()))?;
            for ((row, col), keep) in mask.indexed_iter_mut() {
                let value = layer[[row, col]];
                // NaN compares false, so nodata cells drop out here.
                *keep = *keep && value >= bounds.lower && value <= bounds.upper;
            }
        }
        Ok(mask)
    }

    /// Fraction of the cells under a polygon footprint that are suitable,
    /// sampling each covered cell at its center. `None` when the footprint
    /// covers no cell center at all (score is non-computable).
    pub fn coverage_ratio(&self, mask: &Array2<bool>, polygon: &Polygon<f64>) -> Option<f64> {
        let rect = polygon.bounding_rect()?;
        let (rows, cols) = self.window(&rect)?;
        let mut covered = 0usize;
        let mut suitable = 0usize;
        for row in rows {
            for col in cols.clone() {
                let (lon, lat) = self.cell_center(row, col);
                if polygon.contains(&Point::new(lon, lat)) {
                    covered += 1;
                    if mask[[row, col]] {
                        suitable += 1;
                    }
                }
            }
        }
        (covered > 0).then(|| suitable as f64 / covered as f64)
    }

    /// Index window of cells whose centers could fall inside `rect`,
    /// clamped to the grid. `None` when the rectangle misses the grid.
    fn window(&self, rect: &Rect<f64>) -> Option<(Range<usize>, Range<usize>)> {
        let (rows, cols) = self.shape;
        if rows == 0 || cols == 0 {
            return None;
        }
        let col_lo = ((rect.min().x - self.west) / self.resolution).floor().max(0.0) as usize;
        let col_hi = ((rect.max().x - self.west) / self.resolution).ceil().min(cols as f64) as usize;
        let row_lo = ((self.north - rect.max().y) / self.resolution).floor().max(0.0) as usize;
        let row_hi = ((self.north - rect.min().y) / self.resolution).ceil().min(rows as f64) as usize;
        (row_lo < row_hi && col_lo < col_hi).then(|| (row_lo..row_hi, col_lo..col_hi))
    }
}
