//! Application layer - Commands, Queries, Handlers and the stream relay.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate and broadcast; the relay runs once per spectator.

pub mod handlers;
pub mod relay;

pub use handlers::{
    CreateGameCommand, CreateGameHandler, CreateGameResult, DeleteGameCommand, DeleteGameHandler,
    DropPieceCommand, DropPieceHandler, GameError, GameStatusView, GameUpdate,
    GetGameStatusHandler, GetGameStatusQuery, JoinGameCommand, JoinGameHandler, LeaveGameCommand,
    LeaveGameHandler, StartGameCommand, StartGameHandler,
};
pub use relay::{CloseReason, RelayError, RelayOutcome, StreamRelay};
