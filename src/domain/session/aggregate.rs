//! Session aggregate entity.
//!
//! A session is one Connect Four table: up to two seated players, the grid,
//! and the turn state. All methods are synchronous and pure with respect to
//! the outside world; persistence and broadcasting happen in the
//! application layer.
//!
//! # Guards
//!
//! The primitive operations (`add_player`, `remove_player`, `drop_piece`)
//! do not check whether a game is running or whose turn it is. Callers use
//! the `ensure_*` guards before invoking them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;

use super::errors::SessionError;
use super::grid::{Grid, Mark, COLS, SLOTS};
use super::player::{Player, PlayerName};

/// Maximum number of seated players.
pub const MAX_PLAYERS: usize = 2;

/// Session aggregate - one game table and its rematch history.
///
/// # Invariants
///
/// - `players.len() <= 2`, names unique, order is join order
/// - `occupied_slots` equals the number of non-empty grid cells
/// - `status` is true only between `start()` and a win or a full board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Turn counter; the active seat is `turn % players.len()`.
    turn: u32,

    /// True while a game is being played.
    status: bool,

    /// Seated players in join order.
    players: Vec<Player>,

    /// The board.
    grid: Grid,

    /// Number of non-empty cells.
    occupied_slots: u32,

    /// Number of games started on this session.
    starts_count: u32,
}

/// How the game stands after a successful drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// No line and free slots remain; `next` is now on turn.
    Continue { next: PlayerName },
    /// The mover connected four.
    Won { winner: PlayerName },
    /// The board filled up without a line.
    Drawn,
}

/// Record of one legal move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub player: PlayerName,
    pub mark: Mark,
    pub column: usize,
    pub row: usize,
    pub result: MoveResult,
}

impl Session {
    /// Create an empty session: no players, empty grid, not started.
    pub fn create(id: SessionId) -> Self {
        Self {
            id,
            turn: 0,
            status: false,
            players: Vec::new(),
            grid: Grid::empty(),
            occupied_slots: 0,
            starts_count: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the raw turn counter.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns true while a game is in progress.
    pub fn status(&self) -> bool {
        self.status
    }

    /// Returns the seated players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the number of occupied cells.
    pub fn occupied_slots(&self) -> u32 {
        self.occupied_slots
    }

    /// Returns how many games have been started on this session.
    pub fn starts_count(&self) -> u32 {
        self.starts_count
    }

    /// Returns the join-order seat of the named player.
    pub fn seat_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name().as_str() == name)
    }

    /// Returns the mark bound to the named player's seat.
    pub fn mark_of(&self, name: &str) -> Option<Mark> {
        self.seat_of(name).and_then(Mark::for_seat)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Guards
    // ─────────────────────────────────────────────────────────────────────────

    /// Fails with `GameInProgress` while a game is running.
    pub fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.status {
            Err(SessionError::GameInProgress)
        } else {
            Ok(())
        }
    }

    /// Fails with `GameNotStarted` unless a game is running.
    pub fn ensure_in_progress(&self) -> Result<(), SessionError> {
        if self.status {
            Ok(())
        } else {
            Err(SessionError::GameNotStarted)
        }
    }

    /// Fails unless `name` is seated and currently on turn.
    pub fn ensure_turn_of(&self, name: &str) -> Result<(), SessionError> {
        if self.seat_of(name).is_none() {
            return Err(SessionError::PlayerNotFound(name.to_string()));
        }
        match self.current_player() {
            Some(current) if current.name().as_str() == name => Ok(()),
            Some(current) => Err(SessionError::NotYourTurn {
                expected: current.name().clone(),
            }),
            None => Err(SessionError::GameNotStarted),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Seat a player at the end of the join order.
    ///
    /// # Errors
    ///
    /// - `CapacityExceeded` if two players are already seated
    /// - `DuplicateName` if the name is taken
    pub fn add_player(&mut self, player: Player) -> Result<(), SessionError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(SessionError::CapacityExceeded {
                capacity: MAX_PLAYERS,
            });
        }
        if self.seat_of(player.name().as_str()).is_some() {
            return Err(SessionError::DuplicateName(player.name().clone()));
        }
        self.players.push(player);
        Ok(())
    }

    /// Remove a player, keeping the remaining join order.
    ///
    /// Only valid while no game is running; see `ensure_idle`.
    ///
    /// # Errors
    ///
    /// - `PlayerNotFound` if no player has that name
    pub fn remove_player(&mut self, name: &str) -> Result<Player, SessionError> {
        let seat = self
            .seat_of(name)
            .ok_or_else(|| SessionError::PlayerNotFound(name.to_string()))?;
        Ok(self.players.remove(seat))
    }

    /// Begin a new game on a cleared board.
    ///
    /// # Errors
    ///
    /// - `NotEnoughPlayers` unless exactly two players are seated
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.players.len() != MAX_PLAYERS {
            return Err(SessionError::NotEnoughPlayers {
                seated: self.players.len(),
            });
        }
        self.grid.clear();
        self.occupied_slots = 0;
        self.starts_count += 1;
        self.turn = self.first_mover_seat();
        self.status = true;
        Ok(())
    }

    /// Drop `mark` into `column`, returning the row it settled in.
    ///
    /// Does not check turn order.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `column` is not in `0..7`
    /// - `ColumnFull` if the column has no empty cell
    pub fn drop_piece(&mut self, column: i32, mark: Mark) -> Result<usize, SessionError> {
        let col = usize::try_from(column)
            .ok()
            .filter(|&c| c < COLS)
            .ok_or(SessionError::OutOfRange { column })?;
        let row = self
            .grid
            .drop_into(col, mark)
            .ok_or(SessionError::ColumnFull { column: col })?;
        self.occupied_slots += 1;
        Ok(row)
    }

    /// True if `mark` has four in a row anywhere on the board.
    pub fn check_win(&self, mark: Mark) -> bool {
        self.grid.has_line(mark)
    }

    /// True when every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.occupied_slots as usize == SLOTS
    }

    /// Play one move for whoever is on turn.
    ///
    /// Drops the current player's mark, then resolves the game: a line wins
    /// (and is credited), a full board draws, otherwise the turn passes.
    ///
    /// # Errors
    ///
    /// - `GameNotStarted` if no game is running
    /// - `OutOfRange` / `ColumnFull` from `drop_piece`; the session is unchanged
    pub fn play_turn(&mut self, column: i32) -> Result<MoveOutcome, SessionError> {
        self.ensure_in_progress()?;
        let seat = self.current_seat().ok_or(SessionError::GameNotStarted)?;
        let mark = Mark::for_seat(seat).ok_or(SessionError::GameNotStarted)?;
        let player = self.players[seat].name().clone();

        let row = self.drop_piece(column, mark)?;
        let result = self.resolve_after_drop(seat, mark);

        Ok(MoveOutcome {
            player,
            mark,
            column: column as usize,
            row,
            result,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub(super) fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    /// Win first, then full board, then pass the turn.
    fn resolve_after_drop(&mut self, seat: usize, mark: Mark) -> MoveResult {
        if self.check_win(mark) {
            self.players[seat].record_win();
            self.status = false;
            return MoveResult::Won {
                winner: self.players[seat].name().clone(),
            };
        }
        if self.is_full() {
            self.status = false;
            return MoveResult::Drawn;
        }
        self.advance_turn();
        match self.current_player() {
            Some(next) => MoveResult::Continue {
                next: next.name().clone(),
            },
            None => MoveResult::Drawn,
        }
    }
}
