//! Grid coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell of the grid, 0-indexed `(row, col)`.
///
/// Positions double as the agent's state and as keys into the Q-table, so
/// they are `Copy`, hashable and totally ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a `(row, col)` delta, returning `None` when the result would
    /// fall off the top or left edge of the grid.
    ///
    /// The bottom and right edges depend on the grid size and are checked
    /// by [`Position::within`].
    pub fn offset(self, (dr, dc): (isize, isize)) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// Whether the position lies inside a `rows x cols` grid.
    pub fn within(self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
