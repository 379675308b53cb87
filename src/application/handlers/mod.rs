//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod game;

pub use game::{
    CreateGameCommand, CreateGameHandler, CreateGameResult, DeleteGameCommand, DeleteGameHandler,
    DropPieceCommand, DropPieceHandler, GameError, GameStatusView, GameUpdate,
    GetGameStatusHandler, GetGameStatusQuery, JoinGameCommand, JoinGameHandler, LeaveGameCommand,
    LeaveGameHandler, StartGameCommand, StartGameHandler,
};
