//! Game session for a single Minesweeper board.
//!
//! A [`GameSession`] owns the current [`GameState`] snapshot, accepts the
//! `open`, `toggle_flag` and `reset` intents, and publishes every new snapshot
//! to its subscribers.

pub use session::*;
pub use state::*;
pub use subscriber::*;

mod session;
mod state;
mod subscriber;
