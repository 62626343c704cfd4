use crate::{
    algorithm::multiset::WeightedMultiset,
    math::probability::{RandomSelector, shannon_entropy},
    spatial::grid::{Cell, WaveGrid},
};
use ndarray::Array2;

/// Shannon entropy of a cell's candidate distribution
///
/// Counts are treated as an unnormalised distribution; a collapsed cell has
/// entropy 0.0 and so does an empty one.
pub fn cell_entropy(states: &WeightedMultiset) -> f64 {
    if states.distinct_len() <= 1 {
        return 0.0;
    }
    shannon_entropy(states.iter().map(|(_, count)| count))
}

/// Whether a cell may still be chosen for collapse
///
/// Collapsed cells are finished and contradicted cells have nothing left to
/// choose from.
pub fn is_selectable(cell: &Cell) -> bool {
    !cell.is_collapsed() && !cell.is_contradiction()
}

/// Entropy of every cell, `f64::INFINITY` where the cell is not selectable
pub fn entropy_map(grid: &WaveGrid) -> Array2<f64> {
    let mut map = Array2::from_elem(grid.dim(), f64::INFINITY);
    for (position, cell) in grid.iter() {
        if is_selectable(cell) {
            if let Some(slot) = map.get_mut(position) {
                *slot = cell_entropy(cell.states());
            }
        }
    }
    map
}

/// Pick the selectable cell with the lowest jittered entropy
///
/// Each candidate's entropy is perturbed by a uniform value in `[0, jitter)`
/// so ties and near-ties break randomly. Returns `None` when no cell is
/// selectable, which ends the run.
pub fn select_lowest_entropy(
    grid: &WaveGrid,
    selector: &mut RandomSelector,
    jitter: f64,
) -> Option<[usize; 2]> {
    let mut best: Option<([usize; 2], f64)> = None;

    for (position, cell) in grid.iter() {
        if !is_selectable(cell) {
            continue;
        }
        let score = cell_entropy(cell.states()) + selector.jitter(jitter);
        if best.is_none_or(|(_, lowest)| score < lowest) {
            best = Some((position, score));
        }
    }

    best.map(|(position, _)| position)
}

/// Draw one identity for a cell, weighted by candidate counts
pub fn choose_pattern(cell: &Cell, selector: &mut RandomSelector) -> Option<usize> {
    cell.states().sample(selector)
}
