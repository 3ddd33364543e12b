use geo::{Line, Point, Polygon};

use super::transform::translate;

/// Decompose a polygon boundary into its exterior edges, in ring order.
pub fn boundary_lines(polygon: &Polygon<f64>) -> Vec<Line<f64>> {
    polygon.exterior().lines().collect()
}

/// Angle between the direction vectors of two lines, in degrees within
/// [0, 180]. The cosine is clamped to [-1, 1] before `acos` so parallel
/// lines with floating-point drift cannot produce a domain error.
pub fn angle_between(a: &Line<f64>, b: &Line<f64>) -> f64 {
    let norm = a.dx().hypot(a.dy()) * b.dx().hypot(b.dy());
    debug_assert!(norm > 0.0, "angle_between requires non-degenerate lines");
    let cos = (a.dx() * b.dx() + a.dy() * b.dy()) / norm;
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Re-anchor a line at the origin: order the endpoints so the
/// lexicographically maximal one (by x, then y) comes first, then shift it
/// to (0, 0). Length is preserved and the direction becomes canonical,
/// independent of the winding of the ring the edge came from.
pub fn normalize_to_origin(line: &Line<f64>) -> Line<f64> {
    let (s, e) = (line.start, line.end);
    let start_is_max = s.x > e.x || (s.x == e.x && s.y >= e.y);
    let anchor = if start_is_max { s } else { e };
    let other = if start_is_max { e } else { s };
    translate(&Line::new(anchor, other), -anchor.x, -anchor.y)
}

/// First exterior edge whose endpoints share a latitude. `None` signals a
/// malformed or non-axis-aligned search box.
pub fn find_horizontal_edge(polygon: &Polygon<f64>) -> Option<Line<f64>> {
    polygon
        .exterior()
        .lines()
        .find(|line| line.start.y == line.end.y && line.start.x != line.end.x)
}

/// Planar distance from a point to a line segment.
pub fn point_segment_distance(point: &Point<f64>, segment: &Line<f64>) -> f64 {
    let (px, py) = (point.x() - segment.start.x, point.y() - segment.start.y);
    let (dx, dy) = (segment.dx(), segment.dy());
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return px.hypot(py);
    }
    let t = ((px * dx + py * dy) / len2).clamp(0.0, 1.0);
    (px - t * dx).hypot(py - t * dy)
}

/// Planar distance from a point to a polygon's exterior boundary.
pub fn point_outline_distance(point: &Point<f64>, polygon: &Polygon<f64>) -> f64 {
    polygon
        .exterior()
        .lines()
        .map(|line| point_segment_distance(point, &line))
        .fold(f64::INFINITY, f64::min)
}

/// Convert a distance in meters to degrees of longitude at the given
/// latitude: `m / (111_100 * cos(lat))`.
pub fn meters_to_degrees(meters: f64, latitude: f64) -> f64 {
    meters / (111_100.0 * latitude.to_radians().cos())
}
