//! Serde adapter writing a [`Grid`] as a list of rows, for use with
//! `#[serde(with = "mineplay_core::grid_rows")]`.

use alloc::vec::Vec;
use ndarray::Array2;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use crate::{Cell, GameError, Grid};

pub fn serialize<S: Serializer>(grid: &Grid, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(grid.rows().into_iter().map(|row| row.to_vec()))
}

/// Rebuilds the grid, requiring equal-length rows and cells stored at their own position.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Grid, D::Error> {
    let rows: Vec<Vec<Cell>> = Vec::deserialize(deserializer)?;
    let row_count = rows.len();
    let col_count = rows.first().map_or(0, Vec::len);

    for (row_index, row) in rows.iter().enumerate() {
        if row.len() != col_count {
            return Err(D::Error::custom(GameError::InvalidBoardShape));
        }
        let misplaced = row.iter().enumerate().any(|(col_index, cell)| {
            usize::from(cell.row()) != row_index || usize::from(cell.col()) != col_index
        });
        if misplaced {
            return Err(D::Error::custom(GameError::InvalidBoardShape));
        }
    }

    let cells: Vec<Cell> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((row_count, col_count), cells).map_err(D::Error::custom)
}
