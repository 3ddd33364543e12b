use geo::{Centroid, Point, Polygon, Rotate, Translate};

/// Area centroid of a polygon, or `None` for degenerate/empty rings.
#[inline]
pub fn centroid(polygon: &Polygon<f64>) -> Option<Point<f64>> {
    polygon.centroid()
}

/// Rotate a polygon about a pivot point. An angle of zero returns the input
/// unchanged, bit for bit.
pub fn rotate(polygon: &Polygon<f64>, degrees: f64, pivot: Point<f64>) -> Polygon<f64> {
    if degrees == 0.0 {
        return polygon.clone();
    }
    polygon.rotate_around_point(degrees, pivot)
}

/// Shift a geometry by (dx, dy). Pure value transform.
#[inline]
pub fn translate<G: Translate<f64>>(geometry: &G, dx: f64, dy: f64) -> G {
    geometry.translate(dx, dy)
}

#[cfg(test)]
mod tests {
    use geo::{Line, LineString, polygon};

    use super::*;

    fn unit_square() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ]
    }

    fn assert_rings_close(a: &LineString<f64>, b: &LineString<f64>, tol: f64) {
        assert_eq!(a.0.len(), b.0.len());
        for (ca, cb) in a.0.iter().zip(b.0.iter()) {
            assert!((ca.x - cb.x).abs() < tol && (ca.y - cb.y).abs() < tol,
                "{ca:?} != {cb:?}");
        }
    }

    #[test]
    fn zero_rotation_is_identity() {
        let square = unit_square();
        assert_eq!(rotate(&square, 0.0, Point::new(0.5, 0.5)), square);
    }

    #[test]
    fn rotation_round_trips_within_tolerance() {
        let square = unit_square();
        let pivot = Point::new(0.3, -0.7);
        for degrees in [15.0, 45.0, 90.0, 178.5] {
            let restored = rotate(&rotate(&square, degrees, pivot), -degrees, pivot);
            assert_rings_close(restored.exterior(), square.exterior(), 1e-9);
        }
    }

    #[test]
    fn quarter_turn_about_center_permutes_corners() {
        let turned = rotate(&unit_square(), 90.0, Point::new(0.5, 0.5));
        let expected = unit_square();
        // A square is invariant under a quarter turn about its center.
        for corner in expected.exterior().coords() {
            assert!(turned.exterior().coords().any(|c| {
                (c.x - corner.x).abs() < 1e-9 && (c.y - corner.y).abs() < 1e-9
            }));
        }
    }

    #[test]
    fn translate_shifts_lines() {
        let line = Line::new((1.0, 2.0), (3.0, 4.0));
        let moved = translate(&line, -1.0, 2.0);
        assert_eq!(moved, Line::new((0.0, 4.0), (2.0, 6.0)));
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid(&unit_square()).unwrap();
        assert!((c.x() - 0.5).abs() < 1e-12);
        assert!((c.y() - 0.5).abs() < 1e-12);
    }
}
