use geo::Polygon;

/// One assessed search-box pose for a candidate pixel.
#[derive(Debug, Clone)]
pub struct SearchCandidate {
    /// Origin pixel (row, col) in the criteria grid.
    pub pixel: (usize, usize),
    /// Footprint polygon in the grid's CRS.
    pub geometry: Polygon<f64>,
    /// Rotation applied to the default search box, in degrees (0 = unrotated).
    pub rotation: f64,
    /// Fraction of covered cells that are suitable, in [0, 1].
    pub score: f64,
    /// True when the candidate is unusable (no alignment found, score not
    /// computable) and must be excluded from output.
    pub qc_flag: bool,
}

/// Ordered collection of search candidates. The order is the input row
/// order and is observable: overlap filtering resolves ties by it.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    sites: Vec<SearchCandidate>,
}

impl ResultSet {
    pub fn new(sites: Vec<SearchCandidate>) -> Self {
        Self { sites }
    }

    /// Get the number of candidates.
    #[inline] pub fn len(&self) -> usize { self.sites.len() }

    /// Check if there are no candidates.
    #[inline] pub fn is_empty(&self) -> bool { self.sites.is_empty() }

    /// Get a view of the candidates in input order.
    #[inline] pub fn sites(&self) -> &[SearchCandidate] { &self.sites }

    #[inline] pub(crate) fn into_sites(self) -> Vec<SearchCandidate> { self.sites }

    /// Drop candidates scoring below the caller's minimum.
    pub fn retain_min_score(&mut self, min_score: f64) {
        self.sites.retain(|site| site.score >= min_score);
    }

    /// Flatten to output records with the stable field contract
    /// (geometry, score, rotation). Internal fields do not surface.
    pub fn records(&self) -> Vec<SiteRecord> {
        self.sites
            .iter()
            .map(|site| SiteRecord {
                geometry: site.geometry.clone(),
                score: site.score,
                rotation: site.rotation,
            })
            .collect()
    }
}

/// The per-site output schema consumed by the GeoJSON writer. Field order
/// and names are a stable contract for downstream serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteRecord {
    pub geometry: Polygon<f64>,
    pub score: f64,
    pub rotation: f64,
}
