use ahash::AHashSet;
use geo::Intersects;

use super::candidate::ResultSet;

/// Reduce a candidate set to a non-overlapping, score-maximal subset.
///
/// Single pass in input order with a discard set: qc-flagged candidates
/// are dropped outright; each remaining candidate is compared against the
/// full set of candidates its polygon intersects (self included, discarded
/// members included). A candidate tied for the maximum score in that
/// subset discards every other member; otherwise it discards itself.
///
/// The pass order is the input row order, not score order, so tie-break
/// outcomes depend on input ordering. That order sensitivity is the
/// documented, deterministic policy of this resolver — equal-score
/// mutually-intersecting survivors are possible when their subsets are
/// never directly compared.
pub fn filter_overlaps(results: ResultSet) -> ResultSet {
    let sites = results.into_sites();
    let mut discarded: AHashSet<usize> = AHashSet::new();

    for i in 0..sites.len() {
        if discarded.contains(&i) {
            continue;
        }
        if sites[i].qc_flag {
            discarded.insert(i);
            continue;
        }

        let overlapping: Vec<usize> = (0..sites.len())
            .filter(|&j| sites[i].geometry.intersects(&sites[j].geometry))
            .collect();
        let best = overlapping
            .iter()
            .map(|&j| sites[j].score)
            .fold(f64::NEG_INFINITY, f64::max);

        if sites[i].score >= best {
            for &j in &overlapping {
                if j != i {
                    discarded.insert(j);
                }
            }
        } else {
            discarded.insert(i);
        }
    }

    let survivors: Vec<_> = sites
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !discarded.contains(i))
        .map(|(_, site)| site)
        .collect();
    tracing::debug!(kept = survivors.len(), dropped = discarded.len(), "overlap filtering complete");
    ResultSet::new(survivors)
}
