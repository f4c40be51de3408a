use std::sync::{Arc, Mutex};

use mineplay_core::{
    BoardConfig, Coord2, FlagOutcome, Grid, OpenOutcome, board_from_mines, is_win, mine_count,
};
use mineplay_session::{GameSession, GameState, Phase};

fn session_with_mines(size: Coord2, mines: &[Coord2]) -> GameSession {
    GameSession::from_grid(0, board_from_mines(size, mines).unwrap()).unwrap()
}

fn opened(state: &GameState) -> Vec<Coord2> {
    state
        .cells()
        .iter()
        .filter(|cell| cell.is_opened())
        .map(|cell| cell.coords())
        .collect()
}

fn recorder(session: &mut GameSession) -> Arc<Mutex<Vec<Arc<GameState>>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    session.subscribe(move |state: &Arc<GameState>| sink.lock().unwrap().push(Arc::clone(state)));
    seen
}

#[test]
fn reset_starts_a_fresh_default_game() {
    let mut session = session_with_mines((3, 3), &[(0, 0)]);
    session.open((0, 0)).unwrap();
    assert!(session.state().game_over());

    for _ in 0..20 {
        session.reset();
        let state = session.state();
        let config = BoardConfig::DEFAULT;

        assert!(!state.game_over());
        assert!(!state.win());
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.total_mines(), config.mines());
        assert_eq!(state.available_flag_count(), state.total_mines());
        assert_eq!((state.rows(), state.cols()), config.size());
        assert_eq!(state.cells().dim(), (12, 8));
        assert_eq!(mine_count(state.cells()), 10);
        assert!(opened(&state).is_empty());
        assert!(state.cells().iter().all(|cell| !cell.is_flagged()));
    }
}

#[test]
fn opening_an_opened_cell_again_changes_nothing() {
    let mut session = session_with_mines((3, 3), &[(0, 0)]);

    assert_eq!(session.open((1, 1)).unwrap(), OpenOutcome::Opened);
    let before = session.state();

    assert_eq!(session.open((1, 1)).unwrap(), OpenOutcome::NoChange);
    assert!(Arc::ptr_eq(&before, &session.state()));

    assert_eq!(session.toggle_flag((1, 1)).unwrap(), FlagOutcome::NoChange);
    assert!(Arc::ptr_eq(&before, &session.state()));
}

#[test]
fn flagged_cells_cannot_be_opened() {
    let mut session = session_with_mines((3, 3), &[(0, 0)]);

    session.toggle_flag((0, 0)).unwrap();
    assert_eq!(session.open((0, 0)).unwrap(), OpenOutcome::NoChange);
    assert!(!session.state().game_over());
}

#[test]
fn flood_fill_across_whole_board_wins() {
    let mut session = session_with_mines((12, 8), &[(5, 3), (6, 4)]);

    assert_eq!(session.open((0, 0)).unwrap(), OpenOutcome::Won);

    let state = session.state();
    assert!(state.win());
    assert!(!state.game_over());
    assert_eq!(opened(&state).len(), 96);
}

#[test]
fn flood_fill_stops_at_mine_wall() {
    let wall: Vec<_> = (0..8).map(|col| (6, col)).collect();
    let mut session = session_with_mines((12, 8), &wall);

    assert_eq!(session.open((0, 3)).unwrap(), OpenOutcome::Opened);

    let state = session.state();
    assert_eq!(opened(&state).len(), 6 * 8);
    assert!(opened(&state).iter().all(|&(row, _)| row <= 5));
    assert_eq!(state.phase(), Phase::Playing);
}

#[test]
fn opening_the_last_safe_cell_wins_and_reveals_everything() {
    let mut grid: Grid = board_from_mines((4, 4), &[(0, 0), (3, 3)]).unwrap();
    grid.mapv_inplace(|cell| {
        if cell.has_mine() || cell.coords() == (2, 2) {
            cell
        } else {
            cell.opened()
        }
    });
    assert!(!is_win(&grid));
    let mut session = GameSession::from_grid(0, grid).unwrap();

    assert_eq!(session.open((2, 2)).unwrap(), OpenOutcome::Won);

    let state = session.state();
    assert!(state.win());
    assert!(!state.game_over());
    assert!(state.cells().iter().all(|cell| cell.is_opened()));
}

#[test]
fn opening_a_mine_ends_the_game_and_keeps_other_cells() {
    let mut session = session_with_mines((3, 3), &[(0, 0)]);
    session.toggle_flag((2, 2)).unwrap();
    session.open((1, 1)).unwrap();
    let before = session.state();

    assert_eq!(session.open((0, 0)).unwrap(), OpenOutcome::HitMine);

    let after = session.state();
    assert!(after.game_over());
    assert!(!after.win());
    assert_eq!(after.phase(), Phase::GameOver);
    for (old, new) in before.cells().iter().zip(after.cells().iter()) {
        if new.coords() == (0, 0) {
            assert!(new.is_opened());
        } else {
            assert_eq!(old, new);
        }
    }
}

#[test]
fn finished_game_ignores_intents_until_reset() {
    let mut session = session_with_mines((3, 3), &[(0, 0)]);
    session.open((0, 0)).unwrap();
    let ended = session.state();

    assert_eq!(session.open((2, 2)).unwrap(), OpenOutcome::NoChange);
    assert_eq!(session.toggle_flag((1, 1)).unwrap(), FlagOutcome::NoChange);
    assert!(Arc::ptr_eq(&ended, &session.state()));

    session.reset();
    assert_eq!(session.state().phase(), Phase::Playing);
}

#[test]
fn won_game_ignores_intents_until_reset() {
    let mut session = session_with_mines((3, 3), &[(0, 0)]);
    assert_eq!(session.open((2, 2)).unwrap(), OpenOutcome::Won);
    let seen = recorder(&mut session);
    let ended = session.state();

    assert_eq!(session.toggle_flag((0, 0)).unwrap(), FlagOutcome::NoChange);
    assert_eq!(session.open((0, 0)).unwrap(), OpenOutcome::NoChange);

    assert!(Arc::ptr_eq(&ended, &session.state()));
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert!(session.state().win());
    assert!(!session.state().game_over());
}

#[test]
fn flood_opens_flagged_safe_cells_and_wins() {
    let mut session = session_with_mines((3, 3), &[(0, 0)]);
    assert_eq!(session.toggle_flag((2, 0)).unwrap(), FlagOutcome::Changed);

    assert_eq!(session.open((2, 2)).unwrap(), OpenOutcome::Won);

    let state = session.state();
    assert!(state.win());
    assert!(state.cell_at((2, 0)).is_opened());
    assert_eq!(state.available_flag_count(), 0);
    assert_eq!(
        state.available_flag_count(),
        state.total_mines() - mineplay_core::flagged_count(state.cells())
    );
}

#[test]
fn prepared_flags_never_push_budget_past_mine_count() {
    let mut grid: Grid = board_from_mines((3, 3), &[(0, 0)]).unwrap();
    grid[[1, 1]] = grid[[1, 1]].with_flag(true);
    grid[[2, 2]] = grid[[2, 2]].with_flag(true);
    assert!(GameSession::from_grid(0, grid).is_err());

    let mut grid: Grid = board_from_mines((3, 3), &[(0, 0)]).unwrap();
    grid[[1, 1]] = grid[[1, 1]].with_flag(true);
    let mut session = GameSession::from_grid(0, grid).unwrap();
    assert_eq!(session.state().available_flag_count(), 0);

    session.toggle_flag((1, 1)).unwrap();
    assert_eq!(session.state().available_flag_count(), 1);
    assert_eq!(session.state().total_mines(), 1);
}

#[test]
fn flag_budget_is_one_per_mine() {
    let mut session = GameSession::new(5);
    let total = session.state().total_mines();
    let closed: Vec<Coord2> = session
        .state()
        .cells()
        .iter()
        .map(|cell| cell.coords())
        .collect();

    for &coords in &closed[..usize::from(total)] {
        assert_eq!(session.toggle_flag(coords).unwrap(), FlagOutcome::Changed);
    }
    assert_eq!(session.state().available_flag_count(), 0);

    let extra = closed[usize::from(total)];
    assert_eq!(session.toggle_flag(extra).unwrap(), FlagOutcome::NoChange);
    assert!(!session.state().cell_at(extra).is_flagged());

    assert_eq!(session.toggle_flag(closed[0]).unwrap(), FlagOutcome::Changed);
    assert_eq!(session.state().available_flag_count(), 1);
    assert!(!session.state().cell_at(closed[0]).is_flagged());
}

#[test]
fn three_by_three_single_mine_scenario() {
    let mut session = session_with_mines((3, 3), &[(0, 0)]);
    let state = session.state();
    assert_eq!(state.cell_at((1, 1)).adjacent_mines(), 1);
    assert_eq!(state.cell_at((2, 2)).adjacent_mines(), 0);
    for cell in state.cells().iter().filter(|cell| !cell.has_mine()) {
        assert!(cell.adjacent_mines() <= 1);
    }

    assert_eq!(session.open((2, 2)).unwrap(), OpenOutcome::Won);
    assert!(session.state().win());
    assert!(session.state().cells().iter().all(|cell| cell.is_opened()));
}

#[test]
fn subscribers_see_each_step_in_order() {
    let mut session = session_with_mines((3, 3), &[(0, 0)]);
    let seen = recorder(&mut session);

    session.open((2, 2)).unwrap();

    let seen = seen.lock().unwrap();
    // initial, cell opened, flood, win
    assert_eq!(seen.len(), 4);
    assert!(opened(&seen[0]).is_empty());
    assert_eq!(opened(&seen[1]), [(2, 2)]);
    assert_eq!(opened(&seen[2]).len(), 8);
    assert!(!seen[2].win());
    assert!(seen[3].win());
    assert_eq!(opened(&seen[3]).len(), 9);
}

#[test]
fn ignored_intents_publish_nothing() {
    let mut session = session_with_mines((3, 3), &[(0, 0)]);
    session.open((1, 1)).unwrap();
    let seen = recorder(&mut session);

    session.open((1, 1)).unwrap();
    session.toggle_flag((1, 1)).unwrap();

    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn unsubscribed_callbacks_stop_receiving() {
    let mut session = GameSession::new(3);
    let count = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&count);
    let id = session.subscribe(move |_: &Arc<GameState>| *sink.lock().unwrap() += 1);
    assert_eq!(session.subscriber_count(), 1);

    session.reset();
    assert!(session.unsubscribe(id));
    assert!(!session.unsubscribe(id));
    session.reset();

    assert_eq!(*count.lock().unwrap(), 2);
    assert_eq!(session.subscriber_count(), 0);
}

#[test]
fn older_snapshots_stay_unchanged() {
    let mut session = session_with_mines((3, 3), &[(0, 0)]);
    let first = session.state();

    session.open((2, 2)).unwrap();

    assert!(opened(&first).is_empty());
    assert!(!first.win());
}

#[test]
fn snapshot_serializes_with_wire_names() {
    let session = session_with_mines((2, 3), &[(1, 2)]);
    let value = serde_json::to_value(&*session.state()).unwrap();

    assert_eq!(value["cols"], 3);
    assert_eq!(value["rows"], 2);
    assert_eq!(value["totalMines"], 1);
    assert_eq!(value["availableFlagCount"], 1);
    assert_eq!(value["gameOver"], false);
    assert_eq!(value["win"], false);
    assert_eq!(value["timeInSec"], 0);
    assert_eq!(value["cells"][1][2]["hasMine"], true);
    assert_eq!(value["cells"][0][1]["adjacentMines"], 1);

    let parsed: GameState = serde_json::from_value(value).unwrap();
    assert_eq!(&parsed, &*session.state());
}
