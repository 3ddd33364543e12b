mod dataset;
mod geojson;

pub use dataset::read_criteria_grid;
pub use geojson::{GEOJSON_EPSG, read_reef_outlines, write_sites};
