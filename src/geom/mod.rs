mod angle;
mod transform;

pub use angle::{
    angle_between, boundary_lines, find_horizontal_edge, meters_to_degrees, normalize_to_origin,
    point_outline_distance, point_segment_distance,
};
pub use transform::{centroid, rotate, translate};
