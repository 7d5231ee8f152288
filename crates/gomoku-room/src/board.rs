//! The 15×15 grid a room plays on.

use gomoku_protocol::{Color, MoveRejection};

/// Side length of the square board.
pub const BOARD_SIZE: usize = 15;

/// A fixed 15×15 grid. Each cell is empty (`None`) or holds a stone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Color>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Converts wire coordinates into board indices.
    ///
    /// Returns `None` if either coordinate is negative or `>= BOARD_SIZE`.
    pub fn index(row: i64, col: i64) -> Option<(usize, usize)> {
        let row = usize::try_from(row).ok().filter(|r| *r < BOARD_SIZE)?;
        let col = usize::try_from(col).ok().filter(|c| *c < BOARD_SIZE)?;
        Some((row, col))
    }

    /// Returns the stone at `(row, col)`, or `None` if the cell is empty
    /// or off the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<Color> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Places `color` at `(row, col)`.
    ///
    /// # Errors
    /// - [`MoveRejection::OutOfBounds`] if the cell is off the board
    /// - [`MoveRejection::CellOccupied`] if it already holds a stone
    ///
    /// The board is unchanged on error.
    pub fn place(
        &mut self,
        row: usize,
        col: usize,
        color: Color,
    ) -> Result<(), MoveRejection> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(MoveRejection::OutOfBounds)?;
        if cell.is_some() {
            return Err(MoveRejection::CellOccupied);
        }
        *cell = Some(color);
        Ok(())
    }

    /// Number of stones on the board.
    pub fn stone_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
