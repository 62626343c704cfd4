//! Cardinal directions on a toroidal grid
//!
//! Positions are `[row, col]` with rows growing downward, so `Up` moves to
//! row - 1 and `Down` to row + 1.

/// One of the four cardinal directions used by adjacency rules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards column - 1
    Left,
    /// Towards row + 1
    Down,
    /// Towards column + 1
    Right,
    /// Towards row - 1
    Up,
}

impl Direction {
    /// All directions in table order (LEFT, DOWN, RIGHT, UP)
    pub const ALL: [Self; 4] = [Self::Left, Self::Down, Self::Right, Self::Up];

    /// Index of this direction inside per-direction tables
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Down => 1,
            Self::Right => 2,
            Self::Up => 3,
        }
    }

    /// The direction pointing back (LEFT↔RIGHT, DOWN↔UP)
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
        }
    }

    /// Row and column delta of a single step
    pub const fn offset(self) -> [isize; 2] {
        match self {
            Self::Left => [0, -1],
            Self::Down => [1, 0],
            Self::Right => [0, 1],
            Self::Up => [-1, 0],
        }
    }

    /// Step from `position` in this direction, wrapping at the grid edges
    ///
    /// `dims` is `(rows, cols)`; both must be non-zero.
    pub const fn step(self, position: [usize; 2], dims: (usize, usize)) -> [usize; 2] {
        let (rows, cols) = dims;
        match self {
            Self::Left => [position[0], (position[1] + cols - 1) % cols],
            Self::Down => [(position[0] + 1) % rows, position[1]],
            Self::Right => [position[0], (position[1] + 1) % cols],
            Self::Up => [(position[0] + rows - 1) % rows, position[1]],
        }
    }
}
