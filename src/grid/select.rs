use std::ops::RangeInclusive;

use ndarray::Array2;

use super::SuitabilityGrid;

/// A grid cell that satisfies the suitability predicate: the seed point for
/// one search-box placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidatePixel {
    pub row: usize,
    pub col: usize,
    pub lon: f64,
    pub lat: f64,
}

/// Collect every suitable cell as a candidate pixel, in row-major order.
/// Only the bounding window of set cells is scanned, so empty border
/// regions cost nothing. An empty result is valid.
pub fn suitable_pixels(grid: &SuitabilityGrid, mask: &Array2<bool>) -> Vec<CandidatePixel> {
    let Some((rows, cols)) = occupied_window(mask) else {
        return Vec::new();
    };
    let mut pixels = Vec::new();
    for row in rows {
        for col in cols.clone() {
            if mask[[row, col]] {
                let (lon, lat) = grid.cell_center(row, col);
                pixels.push(CandidatePixel { row, col, lon, lat });
            }
        }
    }
    pixels
}

/// Smallest row/col window containing every set cell, or `None` for an
/// all-clear mask.
fn occupied_window(mask: &Array2<bool>) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for ((row, col), &set) in mask.indexed_iter() {
        if !set {
            continue;
        }
        bounds = Some(match bounds {
            None => (row, row, col, col),
            Some((r0, r1, c0, c1)) => (r0.min(row), r1.max(row), c0.min(col), c1.max(col)),
        });
    }
    bounds.map(|(r0, r1, c0, c1)| (r0..=r1, c0..=c1))
}
