mod grid;
mod select;

pub use grid::SuitabilityGrid;
pub use select::{CandidatePixel, suitable_pixels};
