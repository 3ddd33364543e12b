use thiserror::Error;

/// Fatal configuration and input-shape errors. All variants are raised
/// before any candidate processing begins; a caller never receives a
/// partial result set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("unknown criterion `{0}`")]
    UnknownCriterion(String),

    #[error("invalid bounds for `{name}`: lower {lower} exceeds upper {upper}")]
    InvalidBounds { name: String, lower: f64, upper: f64 },

    #[error("parameter `{name}` out of range: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("criteria grid is EPSG:{grid} but reef outlines are EPSG:{outlines}")]
    CrsMismatch { grid: u32, outlines: u32 },

    #[error("layer `{name}` has shape {found:?}, expected {expected:?}")]
    LayerShape { name: String, expected: (usize, usize), found: (usize, usize) },

    #[error("grid resolution must be positive, got {0}")]
    InvalidResolution(f64),
}

/// Per-candidate geometric failures. Never fatal: the search driver folds
/// these into the candidate's qc flag so one bad pixel cannot abort a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum SiteFailure {
    #[error("no reef outline within the search radius")]
    NoNearbyReef,

    #[error("search box has no horizontal reference edge")]
    DegenerateGeometry,
}
