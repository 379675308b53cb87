//! Session game events.
//!
//! Each mutating action produces exactly one event. Its description is the
//! headline of the broadcast that spectators see:
//! - `PlayerJoined` / `PlayerLeft` - seating changes
//! - `GameStarted` - a new game began
//! - `PieceDropped` - a move that did not end the game
//! - `GameWon` / `GameDrawn` - a move that ended the game

use std::fmt;

use super::aggregate::{MoveOutcome, MoveResult};
use super::player::PlayerName;

/// What just happened to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PlayerJoined { name: PlayerName },
    PlayerLeft { name: PlayerName },
    GameStarted { first: PlayerName },
    PieceDropped { player: PlayerName, column: usize },
    GameWon { winner: PlayerName, column: usize },
    GameDrawn { player: PlayerName, column: usize },
}

impl GameEvent {
    /// Short machine-readable name of the event.
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::PlayerJoined { .. } => "player.joined",
            GameEvent::PlayerLeft { .. } => "player.left",
            GameEvent::GameStarted { .. } => "game.started",
            GameEvent::PieceDropped { .. } => "piece.dropped",
            GameEvent::GameWon { .. } => "game.won",
            GameEvent::GameDrawn { .. } => "game.drawn",
        }
    }

    /// True for events after which no game is running.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameWon { .. } | GameEvent::GameDrawn { .. })
    }
}

impl From<&MoveOutcome> for GameEvent {
    fn from(outcome: &MoveOutcome) -> Self {
        let player = outcome.player.clone();
        let column = outcome.column;
        match &outcome.result {
            MoveResult::Continue { .. } => GameEvent::PieceDropped { player, column },
            MoveResult::Won { winner } => GameEvent::GameWon {
                winner: winner.clone(),
                column,
            },
            MoveResult::Drawn => GameEvent::GameDrawn { player, column },
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // columns are shown 1-based, as on the rendered board
        match self {
            GameEvent::PlayerJoined { name } => write!(f, "{} joined the session", name),
            GameEvent::PlayerLeft { name } => write!(f, "{} left the session", name),
            GameEvent::GameStarted { first } => {
                write!(f, "Game started, {} moves first", first)
            }
            GameEvent::PieceDropped { player, column } => {
                write!(f, "{} dropped a piece in column {}", player, column + 1)
            }
            GameEvent::GameWon { winner, column } => write!(
                f,
                "{} dropped a piece in column {} and connected four!",
                winner,
                column + 1
            ),
            GameEvent::GameDrawn { player, column } => write!(
                f,
                "{} dropped a piece in column {}, the board is full and the game is a draw",
                player,
                column + 1
            ),
        }
    }
}
