use mineplay_core::{
    Cell, CellCount, Coord, Coord2, GameError, Grid, Result, ToNdIndex, flagged_count,
    grid_size, is_valid_cell, mine_count, open_all,
};
use serde::{Deserialize, Serialize};

/// Where a game stands. `Won` and `GameOver` only leave through a reset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    Won,
    GameOver,
}

impl Phase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::GameOver)
    }
}

/// Immutable snapshot of one game, as observed by the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    cols: Coord,
    rows: Coord,
    total_mines: CellCount,
    available_flag_count: CellCount,
    #[serde(with = "mineplay_core::grid_rows")]
    cells: Grid,
    game_over: bool,
    win: bool,
    // never advanced, no timer drives it
    time_in_sec: u32,
}

impl GameState {
    /// A playing snapshot over `cells`, with one flag per mine minus the flags already placed.
    ///
    /// Rejects boards carrying more flags than mines.
    pub fn new(cells: Grid) -> Result<Self> {
        let total_mines = mine_count(&cells);
        let available_flag_count = total_mines
            .checked_sub(flagged_count(&cells))
            .ok_or(GameError::TooManyFlags)?;
        Ok(Self::with_counts(cells, total_mines, available_flag_count))
    }

    /// Snapshot over a freshly generated board, which never carries flags.
    pub(crate) fn fresh(cells: Grid) -> Self {
        let total_mines = mine_count(&cells);
        Self::with_counts(cells, total_mines, total_mines)
    }

    fn with_counts(cells: Grid, total_mines: CellCount, available_flag_count: CellCount) -> Self {
        let (rows, cols) = grid_size(&cells);
        Self {
            cols,
            rows,
            total_mines,
            available_flag_count,
            cells,
            game_over: false,
            win: false,
            time_in_sec: 0,
        }
    }

    pub fn cols(&self) -> Coord {
        self.cols
    }

    pub fn rows(&self) -> Coord {
        self.rows
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    pub fn available_flag_count(&self) -> CellCount {
        self.available_flag_count
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn win(&self) -> bool {
        self.win
    }

    pub fn time_in_sec(&self) -> u32 {
        self.time_in_sec
    }

    pub fn phase(&self) -> Phase {
        match (self.game_over, self.win) {
            (true, _) => Phase::GameOver,
            (false, true) => Phase::Won,
            (false, false) => Phase::Playing,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase().is_finished()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if is_valid_cell(coords.0.into(), coords.1.into(), self.rows, self.cols) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Panics when `coords` is outside the board.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub(crate) fn with_cells(&self, cells: Grid) -> Self {
        Self {
            cols: self.cols,
            rows: self.rows,
            total_mines: self.total_mines,
            available_flag_count: self.available_flag_count,
            cells,
            game_over: self.game_over,
            win: self.win,
            time_in_sec: self.time_in_sec,
        }
    }

    pub(crate) fn with_flag_count(self, available_flag_count: CellCount) -> Self {
        Self {
            available_flag_count,
            ..self
        }
    }

    pub(crate) fn lost(&self) -> Self {
        Self {
            game_over: true,
            win: false,
            ..self.clone()
        }
    }

    pub(crate) fn won(&self) -> Self {
        Self {
            game_over: false,
            win: true,
            ..self.with_cells(open_all(&self.cells))
        }
    }
}
