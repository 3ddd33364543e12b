#![doc = "ReefSite public API"]
mod config;
mod error;
mod geom;
mod grid;
mod io;
mod reef;
mod site;

pub mod cli;
pub mod commands;

#[doc(inline)]
pub use config::{AssessConfig, CriterionBounds};

#[doc(inline)]
pub use error::EngineError;

#[doc(inline)]
pub use grid::{CandidatePixel, SuitabilityGrid};

#[doc(inline)]
pub use reef::{ReefOutline, ReefOutlineStore};

#[doc(inline)]
pub use site::{Engine, ResultSet, SearchCandidate, SiteRecord, filter_overlaps};

#[doc(inline)]
pub use io::{GEOJSON_EPSG, read_criteria_grid, read_reef_outlines, write_sites};
