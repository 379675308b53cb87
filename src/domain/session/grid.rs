//! The 6 × 7 Connect Four grid and its marks.

use serde::{Deserialize, Serialize};

/// Number of rows in the grid. Row 0 is the top row.
pub const ROWS: usize = 6;

/// Number of columns in the grid.
pub const COLS: usize = 7;

/// Length of the line that wins the game.
pub const CONNECT: usize = 4;

/// Total number of slots on the grid.
pub const SLOTS: usize = ROWS * COLS;

// (row delta, column delta): horizontal, vertical, diagonal ↗, diagonal ↘.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (-1, 1), (1, 1)];

/// Symbol owned by a seated player.
///
/// The seat that joined first always plays `First` (`X`), the second seat
/// always plays `Second` (`O`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[serde(rename = "X")]
    First,
    #[serde(rename = "O")]
    Second,
}

impl Mark {
    /// Returns the mark bound to a join-order seat, if the seat exists.
    pub fn for_seat(seat: usize) -> Option<Mark> {
        match seat {
            0 => Some(Mark::First),
            1 => Some(Mark::Second),
            _ => None,
        }
    }

    /// Returns the character drawn on the board for this mark.
    pub fn symbol(&self) -> char {
        match self {
            Mark::First => 'X',
            Mark::Second => 'O',
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Rectangular matrix of cells, each empty (`None`) or holding a mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: [[Option<Mark>; COLS]; ROWS],
}

impl Grid {
    /// Creates a grid with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [[None; COLS]; ROWS],
        }
    }

    /// Returns the content of one cell, `None` when empty or off the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Mark>; COLS]> {
        self.cells.iter()
    }

    /// Places `mark` in the lowest empty cell of `col`.
    ///
    /// Returns the row the piece settled in, or `None` if the column is full.
    /// `col` must be a valid column index.
    pub(crate) fn drop_into(&mut self, col: usize, mark: Mark) -> Option<usize> {
        let row = (0..ROWS).rev().find(|&row| self.cells[row][col].is_none())?;
        self.cells[row][col] = Some(mark);
        Some(row)
    }

    /// Empties every cell.
    pub(crate) fn clear(&mut self) {
        self.cells = [[None; COLS]; ROWS];
    }

    /// Counts the non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Returns true if `mark` owns four contiguous cells in a row, a column
    /// or either diagonal.
    ///
    /// Scans the whole grid on every call.
    pub fn has_line(&self, mark: Mark) -> bool {
        (0..ROWS).any(|row| {
            (0..COLS).any(|col| {
                DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| self.line_from(row, col, dr, dc, mark))
            })
        })
    }

    fn line_from(&self, row: usize, col: usize, dr: isize, dc: isize, mark: Mark) -> bool {
        (0..CONNECT as isize).all(|step| {
            let r = row as isize + dr * step;
            let c = col as isize + dc * step;
            r >= 0
                && c >= 0
                && (r as usize) < ROWS
                && (c as usize) < COLS
                && self.cells[r as usize][c as usize] == Some(mark)
        })
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, row: usize, col: usize, mark: Mark) {
        self.cells[row][col] = Some(mark);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}
