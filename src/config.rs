use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Inclusive lower/upper acceptance bounds for one criterion layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionBounds {
    /// Layer name in the criteria grid (e.g. "depth", "slope", "rugosity")
    pub name: String,
    pub lower: f64,
    pub upper: f64,
}

impl CriterionBounds {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.lower > self.upper {
            return Err(EngineError::InvalidBounds {
                name: self.name.clone(),
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }
}

/// Assessment parameters for one region, supplied externally as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessConfig {
    /// Per-criterion acceptance bounds; a grid cell is suitable when every
    /// criterion falls within its bounds.
    pub criteria: Vec<CriterionBounds>,

    /// Search-box footprint along the reef-parallel axis, in meters.
    pub site_x_m: f64,

    /// Search-box footprint along the reef-normal axis, in meters.
    pub site_y_m: f64,

    /// Radius used to look up nearby reef outlines for edge alignment.
    #[serde(default = "default_search_radius_m")]
    pub search_radius_m: f64,

    /// Minimum acceptable coverage score; lower-scoring sites are dropped
    /// from the final output after overlap filtering.
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Rotate each search box to match the nearest natural reef edge.
    #[serde(default = "default_align_to_edges")]
    pub align_to_edges: bool,
}

fn default_search_radius_m() -> f64 { 20_000.0 }

fn default_min_score() -> f64 { 0.33 }

fn default_align_to_edges() -> bool { true }

impl AssessConfig {
    /// Read a config from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_slice(&bytes)
            .context("Failed to parse assessment config")?;
        Ok(config)
    }

    /// Reject malformed parameters before any candidate processing starts.
    pub fn validate(&self) -> Result<(), EngineError> {
        for bounds in &self.criteria {
            bounds.validate()?;
        }
        for (name, value) in [
            ("site_x_m", self.site_x_m),
            ("site_y_m", self.site_y_m),
            ("search_radius_m", self.search_radius_m),
        ] {
            if !(value > 0.0) {
                return Err(EngineError::InvalidParameter { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(EngineError::InvalidParameter { name: "min_score", value: self.min_score });
        }
        Ok(())
    }
}
