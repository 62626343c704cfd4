//! Pattern windows and the geometric operations on them
//!
//! Windows are square `Array2<usize>` matrices of sample symbol indices.
//! Extraction wraps around the sample edges so the sample is treated as
//! periodic. Rotation and mirroring produce the dihedral variants used by
//! symmetry augmentation.

use ndarray::Array2;

use crate::spatial::direction::Direction;

/// An N×N window of symbol indices with a stable identity
///
/// Patterns are immutable once the catalog is built. The weight is the number
/// of times the window was seen while scanning the (augmented) sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    id: usize,
    cells: Array2<usize>,
    weight: usize,
}

impl Pattern {
    /// Create a pattern from its identity, value matrix and occurrence count
    pub const fn new(id: usize, cells: Array2<usize>, weight: usize) -> Self {
        Self { id, cells, weight }
    }

    /// Stable integer identity (index into the catalog)
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Side length N
    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    /// The value matrix
    pub const fn cells(&self) -> &Array2<usize> {
        &self.cells
    }

    /// How often the window occurred in the scan
    pub const fn weight(&self) -> usize {
        self.weight
    }

    /// Value at the top-left corner, rendered at the cell the pattern is anchored to
    pub fn anchor_value(&self) -> Option<usize> {
        self.cells.get([0, 0]).copied()
    }

    /// Value at `(row, col)` inside the window
    pub fn value(&self, row: usize, col: usize) -> Option<usize> {
        self.cells.get([row, col]).copied()
    }

    pub(crate) const fn add_occurrence(&mut self) {
        self.weight += 1;
    }

    /// Flattened row-major key used for content deduplication
    pub fn key(&self) -> Vec<usize> {
        window_key(&self.cells)
    }
}

/// Flatten a window into a hashable key
pub fn window_key(cells: &Array2<usize>) -> Vec<usize> {
    cells.iter().copied().collect()
}

/// Extract the `size`×`size` window anchored at `(row, col)` with toroidal wrap
pub fn extract_window(source: &Array2<usize>, row: usize, col: usize, size: usize) -> Array2<usize> {
    let (rows, cols) = source.dim();
    Array2::from_shape_fn((size, size), |(dr, dc)| {
        source
            .get([(row + dr) % rows.max(1), (col + dc) % cols.max(1)])
            .copied()
            .unwrap_or(0)
    })
}

/// Rotate a matrix 90° clockwise
///
/// A `rows×cols` input yields a `cols×rows` output.
pub fn rotate_90(source: &Array2<usize>) -> Array2<usize> {
    let (rows, cols) = source.dim();
    Array2::from_shape_fn((cols, rows), |(i, j)| {
        source.get([rows - 1 - j, i]).copied().unwrap_or(0)
    })
}

/// Mirror a matrix horizontally (reverse every row)
pub fn reflect(source: &Array2<usize>) -> Array2<usize> {
    let (rows, cols) = source.dim();
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        source.get([i, cols - 1 - j]).copied().unwrap_or(0)
    })
}

/// The eight dihedral orientations of a matrix
///
/// Order is the four clockwise rotations of the original followed by the
/// four rotations of its mirror. Duplicates are kept; callers deduplicate by
/// content where needed.
pub fn orientations(source: &Array2<usize>) -> Vec<Array2<usize>> {
    let mut result = Vec::with_capacity(8);
    for base in [source.clone(), reflect(source)] {
        let mut current = base;
        for _ in 0..4 {
            let next = rotate_90(&current);
            result.push(current);
            current = next;
        }
    }
    result
}

/// Whether window `b` may be anchored one step from `a` in `direction`
///
/// The two windows must agree on every overlapping cell. For 1×1 windows the
/// overlap is empty and any pair agrees. The relation is symmetric under
/// swapping the windows and reversing the direction.
pub fn patterns_overlap(a: &Array2<usize>, b: &Array2<usize>, direction: Direction) -> bool {
    if a.dim() != b.dim() {
        return false;
    }
    let (rows, cols) = a.dim();
    let [dr, dc] = direction.offset();

    for r in 0..rows {
        for c in 0..cols {
            let br = r as isize - dr;
            let bc = c as isize - dc;
            if br < 0 || bc < 0 || br >= rows as isize || bc >= cols as isize {
                continue;
            }
            if a.get([r, c]) != b.get([br as usize, bc as usize]) {
                return false;
            }
        }
    }
    true
}
