use geo::{Line, Point, Polygon};

use crate::geom::{boundary_lines, centroid};

/// A simplified, buffer-expanded reef boundary with its decomposition into
/// constituent edges. Built once per region; immutable thereafter.
#[derive(Debug, Clone)]
pub struct ReefOutline {
    polygon: Polygon<f64>,
    edges: Vec<Line<f64>>,
    centroid: Point<f64>,
}

impl ReefOutline {
    /// Wrap a boundary polygon, precomputing its edges and centroid.
    /// `None` for degenerate rings with no interior. Zero-length edges
    /// from repeated vertices are dropped.
    pub fn new(polygon: Polygon<f64>) -> Option<Self> {
        let centroid = centroid(&polygon)?;
        let mut edges = boundary_lines(&polygon);
        edges.retain(|line| line.start != line.end);
        Some(Self { polygon, edges, centroid })
    }

    /// Get the boundary polygon.
    #[inline] pub fn polygon(&self) -> &Polygon<f64> { &self.polygon }

    /// Get the precomputed boundary edges, in ring order.
    #[inline] pub fn edges(&self) -> &[Line<f64>] { &self.edges }

    /// Get the precomputed centroid.
    #[inline] pub fn centroid(&self) -> Point<f64> { self.centroid }
}
