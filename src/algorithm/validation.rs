//! Post-generation neighborhood oracle
//!
//! Rebuilds the output values from the anchor value of each collapsed cell,
//! then checks that every toroidal N×N window of that value grid is a pattern
//! of the catalog. This uses only the catalog, never the rule table, so it
//! can catch propagation defects.

use crate::{analysis::catalog::PatternCatalog, spatial::grid::WaveGrid};
use ndarray::Array2;

/// Positions whose N×N window failed the check
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Windows touching a cell that is not collapsed
    pub unresolved: Vec<[usize; 2]>,
    /// Fully resolved windows whose content is not a catalog pattern
    pub mismatches: Vec<[usize; 2]>,
}

impl ValidationReport {
    /// Whether every window is resolved and known
    pub fn is_valid(&self) -> bool {
        self.unresolved.is_empty() && self.mismatches.is_empty()
    }
}

/// Sample value rendered at each cell, `None` where the cell is not collapsed
pub fn value_grid(grid: &WaveGrid, catalog: &PatternCatalog) -> Array2<Option<usize>> {
    grid.collapsed_ids().map(|id| {
        id.and_then(|id| catalog.pattern(id))
            .and_then(|pattern| pattern.anchor_value())
    })
}

/// The `size`×`size` window of values anchored at `position`, wrapping at the edges
///
/// Returns `None` if any covered cell has no value.
pub fn reconstruct_window(
    values: &Array2<Option<usize>>,
    position: [usize; 2],
    size: usize,
) -> Option<Array2<usize>> {
    let (rows, cols) = values.dim();
    if rows == 0 || cols == 0 {
        return None;
    }

    let mut window = Array2::zeros((size, size));
    for ((dr, dc), slot) in window.indexed_iter_mut() {
        let row = (position[0] + dr) % rows;
        let col = (position[1] + dc) % cols;
        *slot = values.get([row, col]).copied().flatten()?;
    }
    Some(window)
}

/// Check every window of the finished grid against the catalog
pub fn validate(grid: &WaveGrid, catalog: &PatternCatalog) -> ValidationReport {
    let values = value_grid(grid, catalog);
    let mut report = ValidationReport::default();

    for (position, _) in grid.iter() {
        match reconstruct_window(&values, position, catalog.size()) {
            None => report.unresolved.push(position),
            Some(window) if !catalog.contains(window.view()) => report.mismatches.push(position),
            Some(_) => {}
        }
    }

    report
}
