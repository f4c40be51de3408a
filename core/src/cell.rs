use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2};

/// One position on the board.
///
/// Cells are plain values: every change produces an updated copy, and the
/// position never changes after creation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    row: Coord,
    col: Coord,
    has_mine: bool,
    is_opened: bool,
    is_flagged: bool,
    adjacent_mines: u8,
}

impl Cell {
    /// A closed, unflagged, mineless cell at `(row, col)`.
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self {
            row,
            col,
            has_mine: false,
            is_opened: false,
            is_flagged: false,
            adjacent_mines: 0,
        }
    }

    pub const fn row(self) -> Coord {
        self.row
    }

    pub const fn col(self) -> Coord {
        self.col
    }

    pub const fn coords(self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn has_mine(self) -> bool {
        self.has_mine
    }

    pub const fn is_opened(self) -> bool {
        self.is_opened
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Number of mines among the 8 neighbors, only meaningful without a mine.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn opened(self) -> Self {
        Self {
            is_opened: true,
            ..self
        }
    }

    pub const fn with_flag(self, is_flagged: bool) -> Self {
        Self { is_flagged, ..self }
    }

    pub(crate) const fn with_mine(self) -> Self {
        Self {
            has_mine: true,
            ..self
        }
    }

    pub(crate) const fn with_adjacent_mines(self, adjacent_mines: u8) -> Self {
        Self {
            adjacent_mines,
            ..self
        }
    }
}
