use geo::{BoundingRect, Point, Rect};
use rstar::{AABB, RTree, RTreeObject};

use super::ReefOutline;

/// A bounding box in the R-tree, associated with a ReefOutline by index.
#[derive(Debug, Clone)]
struct OutlineBounds {
    idx: usize,
    bbox: Rect<f64>,
}

impl RTreeObject for OutlineBounds {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// Read-only regional set of reef outlines with an R-tree over their
/// bounding boxes for radius queries.
#[derive(Debug, Clone)]
pub struct ReefOutlineStore {
    outlines: Vec<ReefOutline>,
    rtree: RTree<OutlineBounds>,
    epsg: u32,
}

impl ReefOutlineStore {
    /// Construct a store from a vector of outlines.
    pub fn new(outlines: Vec<ReefOutline>, epsg: u32) -> Self {
        Self {
            rtree: RTree::bulk_load(
                outlines
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, outline)| {
                        outline.polygon().bounding_rect().map(|bbox| OutlineBounds { idx, bbox })
                    })
                    .collect(),
            ),
            outlines,
            epsg,
        }
    }

    /// Get the number of outlines.
    #[inline] pub fn len(&self) -> usize { self.outlines.len() }

    /// Check if there are no outlines.
    #[inline] pub fn is_empty(&self) -> bool { self.outlines.is_empty() }

    /// Get the EPSG code of the outlines' CRS.
    #[inline] pub fn epsg(&self) -> u32 { self.epsg }

    /// Get a reference to the list of outlines.
    #[inline] pub fn outlines(&self) -> &[ReefOutline] { &self.outlines }

    /// Outlines whose centroid lies within `radius_deg` of `point`. The
    /// R-tree envelope query is the coarse prune; the centroid check
    /// refines it. Results keep store order.
    pub fn candidates_near(&self, point: Point<f64>, radius_deg: f64) -> Vec<&ReefOutline> {
        let envelope = AABB::from_corners(
            [point.x() - radius_deg, point.y() - radius_deg],
            [point.x() + radius_deg, point.y() + radius_deg],
        );
        let mut hits: Vec<usize> = self
            .rtree
            .locate_in_envelope_intersecting(&envelope)
            .map(|bounds| bounds.idx)
            .filter(|&idx| {
                let c = self.outlines[idx].centroid();
                (c.x() - point.x()).hypot(c.y() - point.y()) <= radius_deg
            })
            .collect();
        hits.sort_unstable();
        hits.into_iter().map(|idx| &self.outlines[idx]).collect()
    }
}
