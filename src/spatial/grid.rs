//! Wave grid state with toroidal addressing
//!
//! Every cell holds the weighted multiset of pattern identities still possible
//! at that position. Neighbor lookups wrap at all four edges. Cells are never
//! added or removed; only their candidate multisets shrink during a run.

use ndarray::Array2;

use crate::algorithm::multiset::WeightedMultiset;
use crate::io::error::{AlgorithmError, Result, invariant_violation};
use crate::spatial::direction::Direction;

/// Observable state of a cell for renderers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellView {
    /// Exactly one candidate remains
    Collapsed(usize),
    /// More than one candidate remains (the payload is the total count)
    Superposed(usize),
    /// No candidate remains
    Contradiction,
}

/// Result of narrowing a cell's candidates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Narrowing {
    /// The new multiset equals the current one
    Unchanged,
    /// Candidates were removed or their counts reduced
    Narrowed,
    /// The candidate multiset became empty
    Contradiction,
}

/// A single output position and its remaining candidates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    states: WeightedMultiset,
}

impl Cell {
    /// Create a cell holding the given candidates
    pub const fn new(states: WeightedMultiset) -> Self {
        Self { states }
    }

    /// Remaining candidates
    pub const fn states(&self) -> &WeightedMultiset {
        &self.states
    }

    /// Collapsed cells hold exactly one instance
    pub fn is_collapsed(&self) -> bool {
        self.states.total() == 1
    }

    /// Cells in contradiction hold nothing
    pub fn is_contradiction(&self) -> bool {
        self.states.is_empty()
    }

    /// The collapsed identity, if any
    pub fn collapsed_id(&self) -> Option<usize> {
        if self.is_collapsed() {
            self.states.single()
        } else {
            None
        }
    }

    /// Renderer view of the cell
    pub fn view(&self) -> CellView {
        match self.collapsed_id() {
            Some(id) => CellView::Collapsed(id),
            None if self.is_contradiction() => CellView::Contradiction,
            None => CellView::Superposed(self.states.total()),
        }
    }

    /// Commit the cell to a single instance of `id`
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if `id` is not among the current
    /// candidates, since that would leave the cell without a valid state.
    pub fn collapse_to(&mut self, id: usize, position: [usize; 2]) -> Result<()> {
        if !self.states.contains(id) {
            return Err(invariant_violation(
                "collapse",
                Some(position),
                &format!("pattern {id} is not a candidate of this cell"),
            ));
        }
        self.states = WeightedMultiset::singleton(id);
        Ok(())
    }

    /// Replace the candidates with a sub-multiset of the current ones
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if `next` holds any identity more often
    /// than the cell currently does; candidates only ever shrink.
    pub fn narrow(&mut self, next: WeightedMultiset, position: [usize; 2]) -> Result<Narrowing> {
        if next == self.states {
            return Ok(Narrowing::Unchanged);
        }
        if !next.is_subset_of(&self.states) {
            return Err(invariant_violation(
                "narrow",
                Some(position),
                &"narrowing would add candidates",
            ));
        }
        self.states = next;
        if self.states.is_empty() {
            Ok(Narrowing::Contradiction)
        } else {
            Ok(Narrowing::Narrowed)
        }
    }
}

/// Dense toroidal grid of cells
#[derive(Clone, Debug)]
pub struct WaveGrid {
    cells: Array2<Cell>,
}

impl WaveGrid {
    /// Create a `rows × cols` grid with every cell set to `initial`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero.
    pub fn new(rows: usize, cols: usize, initial: &WeightedMultiset) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "dimensions",
                value: format!("{rows}x{cols}"),
                reason: "output grid must have at least one row and one column".to_string(),
            });
        }
        Ok(Self {
            cells: Array2::from_elem((rows, cols), Cell::new(initial.clone())),
        })
    }

    /// Reset every cell to `initial` (full superposition)
    pub fn clear(&mut self, initial: &WeightedMultiset) {
        self.cells.fill(Cell::new(initial.clone()));
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid dimensions as `(rows, cols)`
    pub fn dim(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Grids always hold at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Borrow the cell at `position`
    pub fn cell(&self, position: [usize; 2]) -> Option<&Cell> {
        self.cells.get(position)
    }

    /// Mutably borrow the cell at `position`
    pub fn cell_mut(&mut self, position: [usize; 2]) -> Option<&mut Cell> {
        self.cells.get_mut(position)
    }

    /// Borrow the cell at `position` or report it as out of bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for positions outside the grid.
    pub fn try_cell_mut(&mut self, position: [usize; 2]) -> Result<&mut Cell> {
        let dims = self.dim();
        self.cells
            .get_mut(position)
            .ok_or_else(|| out_of_bounds(position, dims))
    }

    /// Neighbor of `position` in `direction`, wrapping at the edges
    pub fn neighbor(&self, position: [usize; 2], direction: Direction) -> [usize; 2] {
        direction.step(position, self.dim())
    }

    /// The four neighbors in LEFT, DOWN, RIGHT, UP order
    pub fn neighbors(&self, position: [usize; 2]) -> [[usize; 2]; 4] {
        Direction::ALL.map(|direction| self.neighbor(position, direction))
    }

    /// Renderer view of the cell at `position`
    pub fn view(&self, position: [usize; 2]) -> Option<CellView> {
        self.cell(position).map(Cell::view)
    }

    /// Iterate positions with their cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ([usize; 2], &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ([row, col], cell))
    }

    /// Whether every cell holds exactly one instance
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Positions of all cells in contradiction, row-major
    pub fn contradictions(&self) -> Vec<[usize; 2]> {
        self.iter()
            .filter(|(_, cell)| cell.is_contradiction())
            .map(|(position, _)| position)
            .collect()
    }

    /// Collapsed identity per cell (`None` while superposed or contradicted)
    pub fn collapsed_ids(&self) -> Array2<Option<usize>> {
        self.cells.map(Cell::collapsed_id)
    }
}

fn out_of_bounds(position: [usize; 2], dims: (usize, usize)) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter: "position",
        value: format!("{position:?}"),
        reason: format!("outside the {}x{} grid", dims.0, dims.1),
    }
}
