use rand::Rng;

use crate::snapshot::{color_distance, Rgb, Snapshot};
use crate::transition::types::PixelCorrespondence;

/// Picks, for every cell of a new snapshot, the cell of the previous
/// snapshot it should animate from.
///
/// A cell whose color barely changed keeps its own position. Anything else
/// flies in from the nearest-colored cell of the previous snapshot, found by
/// exhaustive search. The search is `O(cells)` per changed cell, which is
/// fine for grids a few dozen cells on a side.
#[derive(Debug, Clone)]
pub struct CorrespondenceMatcher {
    tolerance: f64,
}

/// How each target cell found its source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Kept their own position
    pub identity: usize,
    /// Resolved by nearest-color search
    pub searched: usize,
    /// Fell back to a random source cell
    pub random_fallback: usize,
    /// No source available at all; start where they end
    pub stationary: usize,
}

impl MatchStats {
    pub fn total(&self) -> usize {
        self.identity + self.searched + self.random_fallback + self.stationary
    }
}

impl CorrespondenceMatcher {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Produce exactly one correspondence per cell of `next`, in row-major
    /// order. Randomness is only consumed by the fallback branch.
    pub fn correspond<R: Rng + ?Sized>(
        &self,
        prev: &Snapshot,
        next: &Snapshot,
        rng: &mut R,
    ) -> (Vec<PixelCorrespondence>, MatchStats) {
        let mut stats = MatchStats::default();
        let mut pairs = Vec::with_capacity(next.cell_count());

        for (x, y, color) in next.cells() {
            if let Some(same) = prev.get(x, y) {
                if color_distance(color, same) < self.tolerance {
                    stats.identity += 1;
                    pairs.push(PixelCorrespondence::identity(x, y, same, color));
                    continue;
                }
            }

            let source = match nearest_color(prev, color) {
                Some(index) => {
                    stats.searched += 1;
                    Some(index)
                }
                None => random_cell(prev, rng).map(|index| {
                    stats.random_fallback += 1;
                    index
                }),
            };

            let pair = match source {
                Some(index) => PixelCorrespondence {
                    source: prev.size().coords(index),
                    target: (x, y),
                    source_color: prev.color_at_index(index),
                    target_color: color,
                },
                None => {
                    stats.stationary += 1;
                    PixelCorrespondence::identity(x, y, color, color)
                }
            };
            pairs.push(pair);
        }

        (pairs, stats)
    }
}

/// Row-major index of the cell of `snapshot` closest in color to `color`.
/// Ties go to the first cell in scan order.
pub fn nearest_color(snapshot: &Snapshot, color: Rgb) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, (_, _, candidate)) in snapshot.cells().enumerate() {
        let dist = color_distance(color, candidate);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((index, dist)),
        }
    }
    best.map(|(index, _)| index)
}

fn random_cell<R: Rng + ?Sized>(snapshot: &Snapshot, rng: &mut R) -> Option<usize> {
    if snapshot.is_empty() {
        return None;
    }
    Some(rng.gen_range(0..snapshot.cell_count()))
}
