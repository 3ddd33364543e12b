use geo::{Coord, Point, Polygon, Rect};
use ndarray::Array2;
use rayon::prelude::*;

use crate::config::AssessConfig;
use crate::error::EngineError;
use crate::geom::{meters_to_degrees, rotate};
use crate::grid::{CandidatePixel, SuitabilityGrid, suitable_pixels};
use crate::reef::ReefOutlineStore;

use super::align::alignment_rotation;
use super::candidate::{ResultSet, SearchCandidate};

/// The site search engine for one region. Borrows the criteria grid and
/// reef outlines read-only for the lifetime of one invocation; all
/// configuration-level validation happens at construction, before any
/// candidate work.
pub struct Engine<'a> {
    grid: &'a SuitabilityGrid,
    reefs: &'a ReefOutlineStore,
    config: &'a AssessConfig,
    mask: Array2<bool>,
}

impl<'a> Engine<'a> {
    /// Validate the configuration against the region's data and precompute
    /// the suitability mask. Fails fast on malformed bounds, unknown
    /// criterion names, and CRS disagreements.
    pub fn new(
        grid: &'a SuitabilityGrid,
        reefs: &'a ReefOutlineStore,
        config: &'a AssessConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if grid.epsg() != reefs.epsg() {
            return Err(EngineError::CrsMismatch { grid: grid.epsg(), outlines: reefs.epsg() });
        }
        let mask = grid.suitability_mask(&config.criteria)?;
        Ok(Self { grid, reefs, config, mask })
    }

    /// Every grid cell satisfying the suitability predicate, in row-major
    /// order. An empty result is valid and yields an empty ResultSet.
    pub fn suitable_pixels(&self) -> Vec<CandidatePixel> {
        suitable_pixels(self.grid, &self.mask)
    }

    /// Assess one search-box pose per candidate pixel. Pixels are
    /// independent, so the sweep runs as a parallel map over shared
    /// read-only inputs; candidate order matches pixel order regardless.
    pub fn find_sites(&self, pixels: &[CandidatePixel], align_to_edges: bool) -> ResultSet {
        let sites: Vec<SearchCandidate> = pixels
            .par_iter()
            .map(|pixel| self.assess_pixel(pixel, align_to_edges))
            .collect();
        let flagged = sites.iter().filter(|site| site.qc_flag).count();
        tracing::debug!(candidates = sites.len(), flagged, "site sweep complete");
        ResultSet::new(sites)
    }

    fn assess_pixel(&self, pixel: &CandidatePixel, align_to_edges: bool) -> SearchCandidate {
        let center = Point::new(pixel.lon, pixel.lat);
        let unrotated = self.default_box(pixel);

        let rotation = if align_to_edges {
            match alignment_rotation(center, self.reefs, self.config.search_radius_m, &unrotated) {
                Ok(rotation) => rotation,
                Err(failure) => {
                    tracing::trace!(row = pixel.row, col = pixel.col, %failure, "pixel rejected");
                    return Self::rejected(pixel, unrotated);
                }
            }
        } else {
            0.0
        };

        let geometry = rotate(&unrotated, rotation, center);
        match self.grid.coverage_ratio(&self.mask, &geometry) {
            Some(score) => SearchCandidate {
                pixel: (pixel.row, pixel.col),
                geometry,
                rotation,
                score,
                qc_flag: false,
            },
            None => Self::rejected(pixel, geometry),
        }
    }

    /// Axis-aligned search box centered on the pixel, sized by the
    /// configured footprint and buffered outward by one grid cell so
    /// boundary cells are not under-counted.
    fn default_box(&self, pixel: &CandidatePixel) -> Polygon<f64> {
        let half_x = meters_to_degrees(self.config.site_x_m, pixel.lat) / 2.0
            + self.grid.resolution();
        let half_y = meters_to_degrees(self.config.site_y_m, pixel.lat) / 2.0
            + self.grid.resolution();
        Rect::new(
            Coord { x: pixel.lon - half_x, y: pixel.lat - half_y },
            Coord { x: pixel.lon + half_x, y: pixel.lat + half_y },
        )
        .to_polygon()
    }

    fn rejected(pixel: &CandidatePixel, geometry: Polygon<f64>) -> SearchCandidate {
        SearchCandidate {
            pixel: (pixel.row, pixel.col),
            geometry,
            rotation: 0.0,
            score: 0.0,
            qc_flag: true,
        }
    }
}
