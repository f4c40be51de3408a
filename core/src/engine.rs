use alloc::vec;

use crate::*;

/// A `size` board of closed, unflagged, mineless cells.
pub(crate) fn empty_grid(size: Coord2) -> Grid {
    Grid::from_shape_fn(size.to_nd_index(), |(row, col)| {
        Cell::new(row as Coord, col as Coord)
    })
}

/// Stores the number of mined neighbors on every cell without a mine.
pub(crate) fn fill_adjacent_mines(grid: &mut Grid) {
    let (rows, cols) = grid_size(grid);
    for row in 0..rows {
        for col in 0..cols {
            let coords = (row, col);
            let cell = grid[coords.to_nd_index()];
            if cell.has_mine() {
                continue;
            }
            let count = grid
                .iter_neighbors(coords)
                .filter(|&pos| grid[pos.to_nd_index()].has_mine())
                .count();
            grid[coords.to_nd_index()] = cell.with_adjacent_mines(count as u8);
        }
    }
}

/// Builds a closed board of `size` with mines exactly at `mine_coords`.
pub fn board_from_mines(size: Coord2, mine_coords: &[Coord2]) -> Result<Grid> {
    if size.0 == 0 || size.1 == 0 {
        return Err(GameError::EmptyBoard);
    }

    let mut grid = empty_grid(size);
    for &coords in mine_coords {
        if coords.0 >= size.0 || coords.1 >= size.1 {
            return Err(GameError::InvalidCoords);
        }
        let cell = grid[coords.to_nd_index()];
        grid[coords.to_nd_index()] = cell.with_mine();
    }

    fill_adjacent_mines(&mut grid);
    Ok(grid)
}

/// Opens the zero region connected to `start` together with its numbered fringe.
///
/// `start` itself is left as the caller set it. Mines are never opened, and the
/// flood only continues through cells with no adjacent mines. A flagged safe cell
/// in the way is opened and keeps its flag.
pub fn reveal_flood(grid: &Grid, start: Coord2) -> Grid {
    let mut next = grid.clone();
    let mut to_visit = vec![start];

    while let Some(coords) = to_visit.pop() {
        for pos in next.iter_neighbors(coords) {
            let cell = next[pos.to_nd_index()];
            if cell.is_opened() || cell.has_mine() {
                continue;
            }

            next[pos.to_nd_index()] = cell.opened();
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                pos,
                cell.adjacent_mines()
            );

            if cell.adjacent_mines() == 0 {
                to_visit.push(pos);
            }
        }
    }

    next
}

/// Every safe cell is opened; flags are not required.
pub fn is_win(grid: &Grid) -> bool {
    grid.iter().all(|cell| cell.is_opened() || cell.has_mine())
}

pub fn open_all(grid: &Grid) -> Grid {
    grid.mapv(Cell::opened)
}

pub fn mine_count(grid: &Grid) -> CellCount {
    count_cells(grid, Cell::has_mine)
}

pub fn flagged_count(grid: &Grid) -> CellCount {
    count_cells(grid, Cell::is_flagged)
}

fn count_cells(grid: &Grid, predicate: impl Fn(Cell) -> bool) -> CellCount {
    let count = grid.iter().filter(|&&cell| predicate(cell)).count();
    CellCount::try_from(count).unwrap_or(CellCount::MAX)
}
