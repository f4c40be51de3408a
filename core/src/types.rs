use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts, flag counts, and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// True iff `(row, col)` lies inside a `rows × cols` board.
///
/// Takes signed inputs so that a neighbor offset stepping off the top or left
/// edge can be checked before it is converted back into a [`Coord`].
pub fn is_valid_cell(row: isize, col: isize, rows: Coord, cols: Coord) -> bool {
    (0..isize::from(rows)).contains(&row) && (0..isize::from(cols)).contains(&col)
}

/// `(rows, cols)` of any grid built by this crate.
pub fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, cols) = grid.dim();
    (
        Coord::try_from(rows).unwrap_or(Coord::MAX),
        Coord::try_from(cols).unwrap_or(Coord::MAX),
    )
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        neighbors(index, grid_size(self))
    }
}

/// Iterates the in-bounds cells among the 8 neighbors of `center` on a board of `size`.
pub fn neighbors(center: Coord2, size: Coord2) -> NeighborIter {
    NeighborIter::new(center, size)
}

/// `(d_row, d_col)` offsets of the four orthogonal and four diagonal neighbors.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `offset` to `coords`, returning a value only when it remains in bounds.
fn apply_offset(coords: Coord2, offset: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let next_row = isize::from(coords.0) + offset.0;
    let next_col = isize::from(coords.1) + offset.1;

    if !is_valid_cell(next_row, next_col, bounds.0, bounds.1) {
        return None;
    }

    Some((next_row.try_into().ok()?, next_col.try_into().ok()?))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = OFFSETS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(next_item) = apply_offset(self.center, offset, self.bounds) {
                return Some(next_item);
            }
        }
        None
    }
}
