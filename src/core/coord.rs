//! Grid coordinates and neighbourhood enumeration.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Row/column offsets of the eight surrounding cells.
pub static DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A cell position on the grid, zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index on a grid with `cols` columns.
    #[must_use]
    pub const fn index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// Inverse of [`Coord::index`].
    #[must_use]
    pub const fn from_index(index: usize, cols: usize) -> Self {
        Self::new(index / cols, index % cols)
    }

    /// Is this coordinate inside a `rows` x `cols` grid?
    #[must_use]
    pub const fn in_bounds(self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }

    /// In-bounds neighbours of this cell, in [`DIRECTIONS`] order.
    ///
    /// Corner cells yield 3, edge cells 5, interior cells 8.
    #[must_use]
    pub fn neighbours(self, rows: usize, cols: usize) -> SmallVec<[Coord; 8]> {
        DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| {
                let row = self.row.checked_add_signed(dr)?;
                let col = self.col.checked_add_signed(dc)?;
                let next = Coord::new(row, col);
                next.in_bounds(rows, cols).then_some(next)
            })
            .collect()
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
