use geo::{Contains, Coord, Line, Point, Polygon};

use crate::error::SiteFailure;
use crate::geom::{
    angle_between, find_horizontal_edge, meters_to_degrees, normalize_to_origin,
    point_outline_distance, point_segment_distance,
};
use crate::reef::{ReefOutline, ReefOutlineStore};

/// Fixed north-pointing axis the edge bearing is measured against.
const VERTICAL_REFERENCE: Line<f64> = Line {
    start: Coord { x: 0.0, y: 0.0 },
    end: Coord { x: 0.0, y: 1.0 },
};

/// Rotation, in degrees, that aligns the default search box's horizontal
/// axis with the nearest natural reef edge.
///
/// Outlines are pruned to those whose centroid lies within the search
/// radius of the target. Among those, outlines containing the target win;
/// when none contains it, only the single nearest outline contributes
/// edges. The winning edge is the one at minimum distance from the target.
/// Bearings strictly beyond 90 degrees flip the rotation sign so the box
/// does not align to the mirrored orientation.
pub(crate) fn alignment_rotation(
    target: Point<f64>,
    reefs: &ReefOutlineStore,
    radius_m: f64,
    default_box: &Polygon<f64>,
) -> Result<f64, SiteFailure> {
    let radius_deg = meters_to_degrees(radius_m, target.y());
    let nearby = reefs.candidates_near(target, radius_deg);
    if nearby.is_empty() {
        return Err(SiteFailure::NoNearbyReef);
    }

    let containing: Vec<&ReefOutline> = nearby
        .iter()
        .copied()
        .filter(|outline| outline.polygon().contains(&target))
        .collect();
    let pool: Vec<&ReefOutline> = if containing.is_empty() {
        let nearest = nearby
            .iter()
            .copied()
            .min_by(|a, b| {
                point_outline_distance(&target, a.polygon())
                    .total_cmp(&point_outline_distance(&target, b.polygon()))
            })
            .ok_or(SiteFailure::NoNearbyReef)?;
        vec![nearest]
    } else {
        containing
    };

    let nearest_edge = pool
        .iter()
        .flat_map(|outline| outline.edges())
        .min_by(|a, b| {
            point_segment_distance(&target, a).total_cmp(&point_segment_distance(&target, b))
        })
        .ok_or(SiteFailure::DegenerateGeometry)?;
    let horizontal = find_horizontal_edge(default_box).ok_or(SiteFailure::DegenerateGeometry)?;

    let edge = normalize_to_origin(nearest_edge);
    let edge_bearing = angle_between(&normalize_to_origin(&VERTICAL_REFERENCE), &edge);
    let mut rotation = angle_between(&normalize_to_origin(&horizontal), &edge);
    if edge_bearing > 90.0 {
        rotation = -rotation;
    }
    Ok(rotation)
}
