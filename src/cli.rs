//! Command-line interface for connect-four-live.

use clap::{Parser, Subcommand};

/// Connect Four Live - store-backed game sessions with live spectators
#[derive(Parser, Debug)]
#[command(name = "connect-four-live")]
#[command(about = "Play Connect Four sessions and watch them live", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new session and print its id
    Create {
        /// Use this id instead of a generated one
        #[arg(long)]
        id: Option<String>,
    },

    /// Delete a session
    Delete {
        /// Session id
        session: String,
    },

    /// Show a session's status and board
    Status {
        /// Session id
        session: String,
    },

    /// Seat a player
    Join {
        /// Session id
        session: String,
        /// Player name (1-10 characters)
        name: String,
    },

    /// Remove a player between games
    Leave {
        /// Session id
        session: String,
        /// Player name
        name: String,
    },

    /// Start a game with the two seated players
    Start {
        /// Session id
        session: String,
    },

    /// Drop a piece for the player on turn
    Drop {
        /// Session id
        session: String,
        /// Player name
        name: String,
        /// Column index, 0 to 6
        #[arg(allow_negative_numbers = true)]
        column: i32,
    },

    /// Stream a session's updates to stdout until interrupted
    Watch {
        /// Session id
        session: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_drop_with_negative_column() {
        let cli = Cli::try_parse_from(["connect-four-live", "drop", "s-1", "Alice", "-1"]).unwrap();
        match cli.command {
            Command::Drop {
                session,
                name,
                column,
            } => {
                assert_eq!(session, "s-1");
                assert_eq!(name, "Alice");
                assert_eq!(column, -1);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn create_id_is_optional() {
        let cli = Cli::try_parse_from(["connect-four-live", "create"]).unwrap();
        assert!(matches!(cli.command, Command::Create { id: None }));
    }
}
