use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Generation strategy that drops mines on uniformly random cells, re-drawing on collision.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: BoardConfig) -> Grid {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_board(config, &mut rng)
    }
}

/// Shorthand for [`RandomBoardGenerator`] with the given seed.
pub fn generate_board_seeded(config: BoardConfig, seed: u64) -> Grid {
    RandomBoardGenerator::new(seed).generate(config)
}

/// Builds a fresh board: all cells closed, exactly `config.mines()` mines, adjacency filled in.
///
/// `BoardConfig` guarantees at least one safe cell, so the re-draw loop terminates.
pub fn generate_board<R: Rng + ?Sized>(config: BoardConfig, rng: &mut R) -> Grid {
    let mut grid = empty_grid(config.size());

    let mut mines_placed: CellCount = 0;
    while mines_placed < config.mines() {
        let row = rng.random_range(0..config.rows());
        let col = rng.random_range(0..config.cols());
        let cell = grid[(row, col).to_nd_index()];
        if cell.has_mine() {
            continue;
        }
        grid[(row, col).to_nd_index()] = cell.with_mine();
        mines_placed += 1;
    }

    fill_adjacent_mines(&mut grid);
    log::debug!(
        "Generated {}x{} board with {} mines",
        config.rows(),
        config.cols(),
        mines_placed
    );
    grid
}
