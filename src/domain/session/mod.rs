//! Session domain module.
//!
//! One Connect Four table: seating, the grid, turn order, win and draw
//! detection, and the text renderings spectators receive.
//!
//! # Events
//!
//! - `PlayerJoined` - A player took a seat
//! - `PlayerLeft` - A player left an idle table
//! - `GameStarted` - A new game began on a cleared board
//! - `PieceDropped` - A move that did not end the game
//! - `GameWon` / `GameDrawn` - A move that ended the game

mod aggregate;
mod errors;
mod events;
mod grid;
mod player;
pub mod render;
mod turn;

pub use aggregate::{MoveOutcome, MoveResult, Session, MAX_PLAYERS};
pub use errors::SessionError;
pub use events::GameEvent;
pub use grid::{Grid, Mark, COLS, CONNECT, ROWS, SLOTS};
pub use player::{Player, PlayerName, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
