use std::sync::Arc;

use mineplay_core::{
    BoardConfig, Coord2, FlagOutcome, Grid, OpenOutcome, Result, ToNdIndex,
    generate_board_seeded, is_win, reveal_flood,
};
use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::subscriber::Subscribers;
use crate::{GameState, Subscriber, SubscriptionId};

/// Single writer of the current [`GameState`].
///
/// Intents take `&mut self`, so they run one at a time and each published
/// snapshot is complete. Snapshots are shared as `Arc`s and never change once
/// published.
#[derive(Debug)]
pub struct GameSession {
    rng: SmallRng,
    state: Arc<GameState>,
    subscribers: Subscribers,
}

impl GameSession {
    /// Starts a game on a board of the default size, seeding every future board from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = generate_board_seeded(BoardConfig::DEFAULT, rng.random());
        Self::with_state(rng, GameState::fresh(grid))
    }

    /// Starts a game on a prepared board; later resets go back to generated default boards.
    ///
    /// Fails with [`GameError::TooManyFlags`](mineplay_core::GameError::TooManyFlags) when
    /// `grid` carries more flags than mines.
    pub fn from_grid(seed: u64, grid: Grid) -> Result<Self> {
        let state = GameState::new(grid)?;
        Ok(Self::with_state(SmallRng::seed_from_u64(seed), state))
    }

    fn with_state(rng: SmallRng, state: GameState) -> Self {
        log::debug!(
            "New session on {}x{} board with {} mines",
            state.rows(),
            state.cols(),
            state.total_mines()
        );
        Self {
            rng,
            state: Arc::new(state),
            subscribers: Subscribers::default(),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    /// Registers `subscriber` and immediately hands it the current snapshot.
    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        let id = self.subscribers.insert(Box::new(subscriber));
        self.subscribers.notify_one(id, &self.state);
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Throws the current game away and starts a new one on a fresh default board.
    pub fn reset(&mut self) {
        let grid = generate_board_seeded(BoardConfig::DEFAULT, self.rng.random());
        let state = GameState::fresh(grid);
        log::debug!("Reset, {} flags available", state.available_flag_count());
        self.publish(state);
    }

    /// Opens a closed, unflagged cell, flooding out from it when it has no adjacent mines.
    pub fn open(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        let coords = self.state.validate_coords(coords)?;
        let outcome = self.open_cell(coords);
        if !outcome.has_update() {
            log::trace!(
                "Ignoring open at {:?}, phase {:?}, cell {:?}",
                coords,
                self.state.phase(),
                self.state.cell_at(coords)
            );
        }
        Ok(outcome)
    }

    fn open_cell(&mut self, coords: Coord2) -> OpenOutcome {
        if self.state.is_finished() {
            return OpenOutcome::NoChange;
        }

        let cell = self.state.cell_at(coords);
        if cell.is_opened() || cell.is_flagged() {
            return OpenOutcome::NoChange;
        }

        let mut cells = self.state.cells().clone();
        cells[coords.to_nd_index()] = cell.opened();
        self.publish(self.state.with_cells(cells));
        log::debug!(
            "Opened cell at {:?}, mine count: {}",
            coords,
            cell.adjacent_mines()
        );

        if cell.has_mine() {
            log::debug!("Hit mine at {:?}", coords);
            self.publish(self.state.lost());
            return OpenOutcome::HitMine;
        }

        if is_win(self.state.cells()) {
            self.finish_won();
            return OpenOutcome::Won;
        }

        if cell.adjacent_mines() == 0 {
            log::trace!("Starting flood-fill from {:?}", coords);
            let flooded = reveal_flood(self.state.cells(), coords);
            self.publish(self.state.with_cells(flooded));

            if is_win(self.state.cells()) {
                self.finish_won();
                return OpenOutcome::Won;
            }
        }

        OpenOutcome::Opened
    }

    /// Places or removes a flag on a closed cell, within the one-flag-per-mine budget.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.state.validate_coords(coords)?;
        let outcome = self.flag_cell(coords);
        if !outcome.has_update() {
            log::trace!(
                "Ignoring flag at {:?}, phase {:?}, cell {:?}, {} flags left",
                coords,
                self.state.phase(),
                self.state.cell_at(coords),
                self.state.available_flag_count()
            );
        }
        Ok(outcome)
    }

    fn flag_cell(&mut self, coords: Coord2) -> FlagOutcome {
        if self.state.is_finished() {
            return FlagOutcome::NoChange;
        }

        let cell = self.state.cell_at(coords);
        if cell.is_opened() {
            return FlagOutcome::NoChange;
        }

        let available = self.state.available_flag_count();
        let adding = !cell.is_flagged();
        let available = if adding {
            match available.checked_sub(1) {
                Some(available) => available,
                None => return FlagOutcome::NoChange,
            }
        } else {
            available + 1
        };

        let mut cells = self.state.cells().clone();
        cells[coords.to_nd_index()] = cell.with_flag(adding);
        self.publish(self.state.with_cells(cells).with_flag_count(available));
        log::trace!("Flag at {:?} set to {}, {} left", coords, adding, available);

        FlagOutcome::Changed
    }

    fn finish_won(&mut self) {
        log::debug!("Won, all safe cells opened");
        self.publish(self.state.won());
    }

    fn publish(&mut self, state: GameState) {
        self.state = Arc::new(state);
        self.subscribers.notify(&self.state);
    }
}
