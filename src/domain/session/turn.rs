//! Turn coordination for the session aggregate.
//!
//! Strict alternation between the two seats once a game is running. The
//! first mover alternates across rematches through `starts_count` parity.

use super::aggregate::Session;
use super::player::Player;

impl Session {
    /// Returns the player whose move it is, or `None` with no players seated.
    pub fn current_player(&self) -> Option<&Player> {
        self.current_seat().map(|seat| &self.players()[seat])
    }

    /// Pass the turn to the next seat.
    pub fn advance_turn(&mut self) {
        let seated = self.players().len() as u32;
        if seated == 0 {
            return;
        }
        let next = (self.turn() + 1) % seated;
        self.set_turn(next);
    }

    pub(super) fn current_seat(&self) -> Option<usize> {
        let seated = self.players().len();
        if seated == 0 {
            return None;
        }
        Some(self.turn() as usize % seated)
    }

    pub(super) fn first_mover_seat(&self) -> u32 {
        self.starts_count() % 2
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::foundation::SessionId;
    use crate::domain::session::{Player, PlayerName, Session};

    fn seated(names: &[&str]) -> Session {
        let mut session = Session::create(SessionId::new());
        for name in names {
            session
                .add_player(Player::new(PlayerName::new(*name).unwrap()))
                .unwrap();
        }
        session
    }

    #[test]
    fn no_players_means_no_current_player() {
        let session = seated(&[]);
        assert!(session.current_player().is_none());
    }

    #[test]
    fn advance_turn_without_players_is_a_no_op() {
        let mut session = seated(&[]);
        session.advance_turn();
        assert_eq!(session.turn(), 0);
    }

    #[test]
    fn turn_alternates_between_two_seats() {
        let mut session = seated(&["Alice", "Bob"]);
        assert_eq!(session.current_player().unwrap().name().as_str(), "Alice");
        session.advance_turn();
        assert_eq!(session.current_player().unwrap().name().as_str(), "Bob");
        session.advance_turn();
        assert_eq!(session.current_player().unwrap().name().as_str(), "Alice");
        assert!(session.turn() < 2);
    }

    #[test]
    fn first_start_gives_second_seat_the_opening_move() {
        let mut session = seated(&["Alice", "Bob"]);
        session.start().unwrap();
        assert_eq!(session.current_player().unwrap().name().as_str(), "Bob");
        session.start().unwrap();
        assert_eq!(session.current_player().unwrap().name().as_str(), "Alice");
    }
}
