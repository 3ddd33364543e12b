mod align;
mod candidate;
mod filter;
mod search;

pub use candidate::{ResultSet, SearchCandidate, SiteRecord};
pub use filter::filter_overlaps;
pub use search::Engine;
